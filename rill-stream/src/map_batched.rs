// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Serialized asynchronous mapping over batches.
//!
//! One conversion runs at a time. The first value is handed over alone;
//! values arriving while a conversion runs collect into the next batch,
//! which starts the moment the previous conversion completes. Source order
//! is preserved.

use futures::Stream;
use pin_project::pin_project;
use rill_core::{Event, Result};
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`MapBatchedExt::map_batched`].
#[pin_project]
pub struct MapBatched<S, T, F, Fut> {
    #[pin]
    source: S,
    convert: F,
    #[pin]
    in_flight: Option<Fut>,
    pending: Vec<T>,
    source_done: bool,
}

impl<S, T, F, Fut, U> Stream for MapBatched<S, T, F, Fut>
where
    S: Stream<Item = Event<T>>,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = Result<U>>,
{
    type Item = Event<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if !*this.source_done {
            loop {
                match this.source.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        this.pending.push(value);
                        if this.in_flight.is_none() {
                            let batch = mem::take(this.pending);
                            this.in_flight.set(Some((this.convert)(batch)));
                        }
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

        if let Some(fut) = this.in_flight.as_mut().as_pin_mut() {
            match fut.poll(cx) {
                Poll::Ready(result) => {
                    this.in_flight.set(None);
                    // Flush whatever collected during the flight before
                    // handing the result out
                    if !this.pending.is_empty() {
                        let batch = mem::take(this.pending);
                        this.in_flight.set(Some((this.convert)(batch)));
                    }
                    return match result {
                        Ok(value) => Poll::Ready(Some(Event::Value(value))),
                        Err(error) => Poll::Ready(Some(Event::Error(error))),
                    };
                }
                Poll::Pending => return Poll::Pending,
            }
        }

        if *this.source_done {
            return Poll::Ready(None);
        }
        Poll::Pending
    }
}

/// Extension trait providing the [`map_batched`](MapBatchedExt::map_batched)
/// operator.
pub trait MapBatchedExt<T>: Stream<Item = Event<T>> + Sized {
    /// Converts values asynchronously, collecting arrivals into a batch while
    /// a conversion is running.
    ///
    /// `convert` always receives a non-empty batch. A failed conversion emits
    /// an error event and the operator moves on to the next batch.
    fn map_batched<U, F, Fut>(self, convert: F) -> MapBatched<Self, T, F, Fut>
    where
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = Result<U>>,
    {
        MapBatched {
            source: self,
            convert,
            in_flight: None,
            pending: Vec::new(),
            source_done: false,
        }
    }
}

impl<S, T> MapBatchedExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
