// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use rill_core::{Event, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`MapLatestExt::map_latest`].
#[pin_project]
pub struct MapLatest<S, T, F, Fut> {
    #[pin]
    source: S,
    convert: F,
    #[pin]
    in_flight: Option<Fut>,
    pending: Option<T>,
    source_done: bool,
}

impl<S, T, F, Fut, U> Stream for MapLatest<S, T, F, Fut>
where
    S: Stream<Item = Event<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U>>,
{
    type Item = Event<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if !*this.source_done {
            loop {
                match this.source.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        if this.in_flight.is_none() {
                            this.in_flight.set(Some((this.convert)(value)));
                        } else {
                            // Only the newest value survives the flight
                            *this.pending = Some(value);
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
                    if let Some(next) = this.pending.take() {
                        this.in_flight.set(Some((this.convert)(next)));
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

/// Extension trait providing the [`map_latest`](MapLatestExt::map_latest)
/// operator.
pub trait MapLatestExt<T>: Stream<Item = Event<T>> + Sized {
    /// Converts values asynchronously, keeping only the most recent value
    /// that arrived while a conversion was running.
    ///
    /// Values superseded during a flight are silently discarded; the newest
    /// one starts converting the moment the flight completes. Source order is
    /// preserved.
    fn map_latest<U, F, Fut>(self, convert: F) -> MapLatest<Self, T, F, Fut>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<U>>,
    {
        MapLatest {
            source: self,
            convert,
            in_flight: None,
            pending: None,
            source_done: false,
        }
    }
}

impl<S, T> MapLatestExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
