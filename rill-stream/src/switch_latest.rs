// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancel-previous flattening.
//!
//! Each outer value replaces the currently active inner stream; replacing
//! drops the previous inner, which cancels it and everything it owns.
//! Because drop-cancellation is synchronous, there is no cancelling-with-
//! pending intermediate state: an outer value arriving mid-switch simply
//! replaces the stored inner again.

use futures::Stream;
use futures::StreamExt;
use pin_project::pin_project;
use rill_core::Event;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by the switch operators.
#[pin_project]
pub struct SwitchLatest<S, Inner> {
    #[pin]
    outer: S,
    inner: Option<Pin<Box<Inner>>>,
    outer_done: bool,
}

impl<S, Inner> SwitchLatest<S, Inner> {
    fn new(outer: S) -> Self {
        Self {
            outer,
            inner: None,
            outer_done: false,
        }
    }
}

impl<S, Inner, T> Stream for SwitchLatest<S, Inner>
where
    S: Stream<Item = Event<Inner>>,
    Inner: Stream<Item = Event<T>>,
{
    type Item = Event<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // Outer first: the newest inner supersedes anything still queued
            // in an older one
            if !*this.outer_done {
                loop {
                    match this.outer.as_mut().poll_next(cx) {
                        Poll::Ready(Some(Event::Value(stream))) => {
                            *this.inner = Some(Box::pin(stream));
                        }
                        Poll::Ready(Some(Event::Error(error))) => {
                            return Poll::Ready(Some(Event::Error(error)));
                        }
                        Poll::Ready(None) => {
                            *this.outer_done = true;
                            break;
                        }
                        Poll::Pending => break,
                    }
                }
            }

            if let Some(active) = this.inner.as_mut() {
                match active.as_mut().poll_next(cx) {
                    Poll::Ready(Some(event)) => return Poll::Ready(Some(event)),
                    Poll::Ready(None) => {
                        *this.inner = None;
                        continue;
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if *this.outer_done {
                return Poll::Ready(None);
            }
            return Poll::Pending;
        }
    }
}

/// Extension trait providing [`switch_latest`](SwitchLatestExt::switch_latest)
/// for streams of streams.
pub trait SwitchLatestExt<Inner, T>: Stream<Item = Event<Inner>> + Sized
where
    Inner: Stream<Item = Event<T>>,
{
    /// Flattens a stream of streams, forwarding only the most recent inner
    /// stream and dropping its predecessor on every switch.
    ///
    /// The output ends once the outer stream has ended and the last inner
    /// stream has ended.
    fn switch_latest(self) -> SwitchLatest<Self, Inner> {
        SwitchLatest::new(self)
    }
}

impl<S, Inner, T> SwitchLatestExt<Inner, T> for S
where
    S: Stream<Item = Event<Inner>> + Sized,
    Inner: Stream<Item = Event<T>>,
{
}

/// Extension trait providing [`switch_map`](SwitchMapExt::switch_map).
pub trait SwitchMapExt<T>: Stream<Item = Event<T>> + Sized {
    /// Maps each value to a stream and switches to it, dropping the
    /// previously active stream.
    fn switch_map<Inner, U, F>(
        self,
        convert: F,
    ) -> impl Stream<Item = Event<U>> + Send
    where
        Self: Send,
        F: FnMut(T) -> Inner + Send,
        Inner: Stream<Item = Event<U>> + Send,
        T: Send,
        U: Send;
}

impl<S, T> SwitchMapExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn switch_map<Inner, U, F>(
        self,
        mut convert: F,
    ) -> impl Stream<Item = Event<U>> + Send
    where
        Self: Send,
        F: FnMut(T) -> Inner + Send,
        Inner: Stream<Item = Event<U>> + Send,
        T: Send,
        U: Send,
    {
        SwitchLatest::new(self.map(move |event| event.map(&mut convert)))
    }
}
