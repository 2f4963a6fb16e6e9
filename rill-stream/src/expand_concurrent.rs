// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use futures_util::stream::SelectAll;
use futures_util::StreamExt;
use pin_project::pin_project;
use rill_core::Event;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`ExpandConcurrentExt::expand_concurrent`].
#[pin_project]
pub struct ExpandConcurrent<S, F, Inner>
where
    Inner: Stream,
{
    #[pin]
    outer: S,
    expand: F,
    inners: SelectAll<Pin<Box<Inner>>>,
    outer_done: bool,
}

impl<S, T, F, Inner, U> Stream for ExpandConcurrent<S, F, Inner>
where
    S: Stream<Item = Event<T>>,
    F: FnMut(T) -> Inner,
    Inner: Stream<Item = Event<U>>,
{
    type Item = Event<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if !*this.outer_done {
            loop {
                match this.outer.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        let inner = (this.expand)(value);
                        this.inners.push(Box::pin(inner));
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

        match this.inners.poll_next_unpin(cx) {
            Poll::Ready(Some(event)) => Poll::Ready(Some(event)),
            Poll::Ready(None) | Poll::Pending => {
                if *this.outer_done && this.inners.is_empty() {
                    Poll::Ready(None)
                } else {
                    Poll::Pending
                }
            }
        }
    }
}

/// Extension trait providing the
/// [`expand_concurrent`](ExpandConcurrentExt::expand_concurrent) operator.
pub trait ExpandConcurrentExt<T>: Stream<Item = Event<T>> + Sized {
    /// Maps each value to a stream and interleaves all spawned streams.
    ///
    /// Any number of inner streams may be live at once; their events are
    /// forwarded as they arrive, so output order is arrival order across all
    /// of them. The output ends when the outer stream has ended and every
    /// inner stream has ended.
    fn expand_concurrent<Inner, U, F>(self, expand: F) -> ExpandConcurrent<Self, F, Inner>
    where
        F: FnMut(T) -> Inner,
        Inner: Stream<Item = Event<U>>,
    {
        ExpandConcurrent {
            outer: self,
            expand,
            inners: SelectAll::new(),
            outer_done: false,
        }
    }
}

impl<S, T> ExpandConcurrentExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
