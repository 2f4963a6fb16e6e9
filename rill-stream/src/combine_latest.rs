// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latest-pair combining of two streams.
//!
//! Nothing is emitted until both inputs have produced at least one value;
//! from then on every arrival re-combines the two cached values. While an
//! asynchronous combine is in flight neither input is polled, so upstream
//! flow is held until the result settles.
//!
//! Termination: an input that ends without ever emitting ends the output at
//! once, since no pair can ever form. Otherwise the output ends when both
//! inputs have ended and no combine is pending.

use futures::future::{ready, Ready};
use futures::Stream;
use pin_project::pin_project;
use rill_core::{Event, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by the combine-latest operators.
#[pin_project]
pub struct CombineLatest<S1, S2, F, Fut, A, B> {
    #[pin]
    primary: S1,
    #[pin]
    secondary: S2,
    combine: F,
    latest_primary: Option<A>,
    latest_secondary: Option<B>,
    #[pin]
    in_flight: Option<Fut>,
    primary_done: bool,
    secondary_done: bool,
}

impl<S1, S2, F, Fut, A, B, R> Stream for CombineLatest<S1, S2, F, Fut, A, B>
where
    S1: Stream<Item = Event<A>>,
    S2: Stream<Item = Event<B>>,
    F: FnMut(A, B) -> Fut,
    Fut: Future<Output = Result<R>>,
    A: Clone,
    B: Clone,
{
    type Item = Event<R>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // A pending combine holds both inputs and defers termination
            if let Some(fut) = this.in_flight.as_mut().as_pin_mut() {
                match fut.poll(cx) {
                    Poll::Ready(Ok(value)) => {
                        this.in_flight.set(None);
                        return Poll::Ready(Some(Event::Value(value)));
                    }
                    Poll::Ready(Err(error)) => {
                        this.in_flight.set(None);
                        return Poll::Ready(Some(Event::Error(error)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            let primary_empty = *this.primary_done && this.latest_primary.is_none();
            let secondary_empty = *this.secondary_done && this.latest_secondary.is_none();
            if primary_empty || secondary_empty {
                return Poll::Ready(None);
            }
            if *this.primary_done && *this.secondary_done {
                return Poll::Ready(None);
            }

            if !*this.primary_done {
                match this.primary.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        *this.latest_primary = Some(value);
                        if let (Some(a), Some(b)) =
                            (this.latest_primary.as_ref(), this.latest_secondary.as_ref())
                        {
                            let fut = (this.combine)(a.clone(), b.clone());
                            this.in_flight.set(Some(fut));
                        }
                        continue;
                    }
                    Poll::Ready(Some(Event::Error(error))) => {
                        return Poll::Ready(Some(Event::Error(error)));
                    }
                    Poll::Ready(None) => {
                        *this.primary_done = true;
                        continue;
                    }
                    Poll::Pending => {}
                }
            }

            if !*this.secondary_done {
                match this.secondary.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        *this.latest_secondary = Some(value);
                        if let (Some(a), Some(b)) =
                            (this.latest_primary.as_ref(), this.latest_secondary.as_ref())
                        {
                            let fut = (this.combine)(a.clone(), b.clone());
                            this.in_flight.set(Some(fut));
                        }
                        continue;
                    }
                    Poll::Ready(Some(Event::Error(error))) => {
                        return Poll::Ready(Some(Event::Error(error)));
                    }
                    Poll::Ready(None) => {
                        *this.secondary_done = true;
                        continue;
                    }
                    Poll::Pending => {}
                }
            }

            return Poll::Pending;
        }
    }
}

/// Extension trait providing the combine-latest operators.
pub trait CombineLatestExt<A>: Stream<Item = Event<A>> + Sized {
    /// Combines the latest values of both streams with a synchronous
    /// selector.
    ///
    /// Emits `combine(latest_self, latest_other)` on every arrival once both
    /// streams have emitted at least once.
    fn combine_latest<S2, B, R, F>(
        self,
        other: S2,
        combine: F,
    ) -> impl Stream<Item = Event<R>> + Send
    where
        Self: Send,
        S2: Stream<Item = Event<B>> + Send,
        F: FnMut(&A, &B) -> R + Send,
        A: Clone + Send,
        B: Clone + Send,
        R: Send;

    /// Combines the latest values of both streams with an asynchronous
    /// selector. While the returned future is pending neither input is
    /// polled.
    fn combine_latest_async<S2, B, R, F, Fut>(
        self,
        other: S2,
        combine: F,
    ) -> CombineLatest<Self, S2, F, Fut, A, B>
    where
        S2: Stream<Item = Event<B>>,
        F: FnMut(A, B) -> Fut,
        Fut: Future<Output = Result<R>>,
        A: Clone,
        B: Clone;
}

impl<S, A> CombineLatestExt<A> for S
where
    S: Stream<Item = Event<A>> + Sized,
{
    fn combine_latest<S2, B, R, F>(
        self,
        other: S2,
        mut combine: F,
    ) -> impl Stream<Item = Event<R>> + Send
    where
        Self: Send,
        S2: Stream<Item = Event<B>> + Send,
        F: FnMut(&A, &B) -> R + Send,
        A: Clone + Send,
        B: Clone + Send,
        R: Send,
    {
        self.combine_latest_async(other, move |a, b| -> Ready<Result<R>> {
            ready(Ok(combine(&a, &b)))
        })
    }

    fn combine_latest_async<S2, B, R, F, Fut>(
        self,
        other: S2,
        combine: F,
    ) -> CombineLatest<Self, S2, F, Fut, A, B>
    where
        S2: Stream<Item = Event<B>>,
        F: FnMut(A, B) -> Fut,
        Fut: Future<Output = Result<R>>,
        A: Clone,
        B: Clone,
    {
        CombineLatest {
            primary: self,
            secondary: other,
            combine,
            latest_primary: None,
            latest_secondary: None,
            in_flight: None,
            primary_done: false,
            secondary_done: false,
        }
    }
}
