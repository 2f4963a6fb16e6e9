// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use rill_core::Event;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`ExpandSequentialExt::expand_sequential`].
#[pin_project]
pub struct ExpandSequential<S, F, Inner> {
    #[pin]
    outer: S,
    expand: F,
    current: Option<Pin<Box<Inner>>>,
    queue: VecDeque<Inner>,
    outer_done: bool,
}

impl<S, T, F, Inner, U> Stream for ExpandSequential<S, F, Inner>
where
    S: Stream<Item = Event<T>>,
    F: FnMut(T) -> Inner,
    Inner: Stream<Item = Event<U>>,
{
    type Item = Event<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if !*this.outer_done {
                loop {
                    match this.outer.as_mut().poll_next(cx) {
                        Poll::Ready(Some(Event::Value(value))) => {
                            let inner = (this.expand)(value);
                            if this.current.is_none() && this.queue.is_empty() {
                                *this.current = Some(Box::pin(inner));
                            } else {
                                // Later inners wait for every earlier one to
                                // finish; none is ever canceled
                                this.queue.push_back(inner);
                            }
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

            if this.current.is_none() {
                if let Some(next) = this.queue.pop_front() {
                    *this.current = Some(Box::pin(next));
                }
            }

            if let Some(active) = this.current.as_mut() {
                match active.as_mut().poll_next(cx) {
                    Poll::Ready(Some(event)) => return Poll::Ready(Some(event)),
                    Poll::Ready(None) => {
                        *this.current = None;
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

/// Extension trait providing the
/// [`expand_sequential`](ExpandSequentialExt::expand_sequential) operator.
pub trait ExpandSequentialExt<T>: Stream<Item = Event<T>> + Sized {
    /// Maps each value to a stream and concatenates the spawned streams in
    /// outer order.
    ///
    /// Events from a later stream are withheld until every earlier stream has
    /// ended. The output ends when the outer stream and all spawned streams
    /// have ended.
    fn expand_sequential<Inner, U, F>(self, expand: F) -> ExpandSequential<Self, F, Inner>
    where
        F: FnMut(T) -> Inner,
        Inner: Stream<Item = Event<U>>,
    {
        ExpandSequential {
            outer: self,
            expand,
            current: None,
            queue: VecDeque::new(),
            outer_done: false,
        }
    }
}

impl<S, T> ExpandSequentialExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
