// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use pin_project::pin_project;
use rill_core::{Event, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A predicate evaluation carrying the value it decides about.
#[pin_project]
pub struct PredicateFuture<T, Fut> {
    #[pin]
    fut: Fut,
    value: Option<T>,
}

impl<T, Fut> Future for PredicateFuture<T, Fut>
where
    Fut: Future<Output = Result<bool>>,
{
    type Output = Result<Option<T>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.fut.poll(cx) {
            Poll::Ready(Ok(true)) => Poll::Ready(Ok(this.value.take())),
            Poll::Ready(Ok(false)) => Poll::Ready(Ok(None)),
            Poll::Ready(Err(error)) => Poll::Ready(Err(error)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Stream returned by [`FilterAsyncExt::filter_async`].
#[pin_project]
pub struct FilterAsync<S, F, T, Fut> {
    #[pin]
    source: S,
    predicate: F,
    in_flight: FuturesUnordered<PredicateFuture<T, Fut>>,
    source_done: bool,
}

impl<S, T, F, Fut> Stream for FilterAsync<S, F, T, Fut>
where
    S: Stream<Item = Event<T>>,
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    type Item = Event<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if !*this.source_done {
            loop {
                match this.source.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        let fut = (this.predicate)(&value);
                        this.in_flight.push(PredicateFuture {
                            fut,
                            value: Some(value),
                        });
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

        loop {
            match this.in_flight.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(Some(value)))) => {
                    return Poll::Ready(Some(Event::Value(value)));
                }
                // Rejected by the predicate
                Poll::Ready(Some(Ok(None))) => {}
                Poll::Ready(Some(Err(error))) => {
                    return Poll::Ready(Some(Event::Error(error)));
                }
                Poll::Ready(None) | Poll::Pending => {
                    if *this.source_done && this.in_flight.is_empty() {
                        return Poll::Ready(None);
                    }
                    return Poll::Pending;
                }
            }
        }
    }
}

/// Extension trait providing the [`filter_async`](FilterAsyncExt::filter_async)
/// operator.
pub trait FilterAsyncExt<T>: Stream<Item = Event<T>> + Sized {
    /// Filters values through an asynchronous predicate.
    ///
    /// Predicate evaluations run concurrently, so passing values are emitted
    /// in the order evaluations complete. A failed evaluation emits an error
    /// event and drops the value under test; the stream continues.
    fn filter_async<F, Fut>(self, predicate: F) -> FilterAsync<Self, F, T, Fut>
    where
        F: FnMut(&T) -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        FilterAsync {
            source: self,
            predicate,
            in_flight: FuturesUnordered::new(),
            source_done: false,
        }
    }
}

impl<S, T> FilterAsyncExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
