// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent asynchronous mapping.
//!
//! Every source value starts its conversion immediately; results are emitted
//! in *completion* order, which may differ from arrival order. The set of
//! in-flight conversions is the pending-work counter: the output stays open
//! until the source is done and the set has drained.

use futures::Stream;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use pin_project::pin_project;
use rill_core::{Event, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`MapConcurrentExt::map_concurrent`].
#[pin_project]
pub struct MapConcurrent<S, F, Fut> {
    #[pin]
    source: S,
    convert: F,
    in_flight: FuturesUnordered<Fut>,
    source_done: bool,
}

impl<S, T, F, Fut, U> Stream for MapConcurrent<S, F, Fut>
where
    S: Stream<Item = Event<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U>>,
{
    type Item = Event<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // Start conversions for everything the source has ready; upstream
        // errors are forwarded in arrival order
        if !*this.source_done {
            loop {
                match this.source.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        this.in_flight.push((this.convert)(value));
                    }
                    Poll::Ready(Some(Event::Error(error))) => {
                        return Poll::Ready(Some(Event::Error(error)));
                    }
                    Poll::Ready(None) => {
                        *this.source_done = true;
                        break;
                    }
                    Poll::Pending => break,
                }
            }
        }

        match this.in_flight.poll_next_unpin(cx) {
            Poll::Ready(Some(Ok(value))) => Poll::Ready(Some(Event::Value(value))),
            Poll::Ready(Some(Err(error))) => Poll::Ready(Some(Event::Error(error))),
            Poll::Ready(None) | Poll::Pending => {
                if *this.source_done && this.in_flight.is_empty() {
                    Poll::Ready(None)
                } else {
                    Poll::Pending
                }
            }
        }
    }
}

/// Extension trait providing the
/// [`map_concurrent`](MapConcurrentExt::map_concurrent) operator.
pub trait MapConcurrentExt<T>: Stream<Item = Event<T>> + Sized {
    /// Converts each value asynchronously, emitting results as they
    /// complete.
    ///
    /// Conversions run concurrently, so output order is completion order. A
    /// failed conversion emits an error event; it does not end the stream or
    /// disturb the other conversions.
    fn map_concurrent<U, F, Fut>(self, convert: F) -> MapConcurrent<Self, F, Fut>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<U>>,
    {
        MapConcurrent {
            source: self,
            convert,
            in_flight: FuturesUnordered::new(),
            source_done: false,
        }
    }
}

impl<S, T> MapConcurrentExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
