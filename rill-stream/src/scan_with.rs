// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Running accumulation over a stream.
//!
//! Unlike a terminal fold, `scan_with` emits every intermediate accumulator
//! value. The combine callback returns a future, so accumulation may perform
//! async work; while a combine is in flight the source is not polled, which
//! holds upstream flow until the accumulator settles. Output order equals
//! input order.

use futures::Stream;
use pin_project::pin_project;
use rill_core::{Event, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`ScanWithExt::scan_with`].
#[pin_project]
pub struct ScanWith<S, F, Fut, Acc> {
    #[pin]
    source: S,
    combine: F,
    acc: Acc,
    #[pin]
    in_flight: Option<Fut>,
    source_done: bool,
}

impl<S, T, F, Fut, Acc> Stream for ScanWith<S, F, Fut, Acc>
where
    S: Stream<Item = Event<T>>,
    F: FnMut(Acc, T) -> Fut,
    Fut: Future<Output = Result<Acc>>,
    Acc: Clone,
{
    type Item = Event<Acc>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(fut) = this.in_flight.as_mut().as_pin_mut() {
                match fut.poll(cx) {
                    Poll::Ready(Ok(acc)) => {
                        this.in_flight.set(None);
                        *this.acc = acc;
                        return Poll::Ready(Some(Event::Value(this.acc.clone())));
                    }
                    Poll::Ready(Err(error)) => {
                        // Keep the previous accumulator and carry on
                        this.in_flight.set(None);
                        return Poll::Ready(Some(Event::Error(error)));
                    }
                    // Source stays unpolled until the combine settles
                    Poll::Pending => return Poll::Pending,
                }
            }

            if *this.source_done {
                return Poll::Ready(None);
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(Event::Value(value))) => {
                    let fut = (this.combine)(this.acc.clone(), value);
                    this.in_flight.set(Some(fut));
                }
                Poll::Ready(Some(Event::Error(error))) => {
                    return Poll::Ready(Some(Event::Error(error)));
                }
                Poll::Ready(None) => {
                    *this.source_done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Extension trait providing the [`scan_with`](ScanWithExt::scan_with)
/// operator.
pub trait ScanWithExt<T>: Stream<Item = Event<T>> + Sized {
    /// Emits a running accumulation of the source.
    ///
    /// `combine` receives the current accumulator and the next value and
    /// returns a future of the new accumulator; wrap synchronous combining in
    /// [`futures::future::ready`]. A failed combine emits the error and keeps
    /// the previous accumulator.
    fn scan_with<Acc, F, Fut>(self, initial: Acc, combine: F) -> ScanWith<Self, F, Fut, Acc>
    where
        Acc: Clone,
        F: FnMut(Acc, T) -> Fut,
        Fut: Future<Output = Result<Acc>>,
    {
        ScanWith {
            source: self,
            combine,
            acc: initial,
            in_flight: None,
            source_done: false,
        }
    }
}

impl<S, T> ScanWithExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
