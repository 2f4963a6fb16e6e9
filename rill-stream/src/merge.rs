// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Interleaving fan-in.
//!
//! Every event from every input is forwarded as it arrives. Poll order is
//! randomized per wakeup so no input can starve the others. The output ends
//! once every input has ended.

use futures::Stream;
use rill_core::Event;
use std::pin::Pin;
use std::task::{Context, Poll};

type BoxedEventStream<T> = Pin<Box<dyn Stream<Item = Event<T>> + Send>>;

/// Stream returned by the merge operators.
pub struct Merge<T> {
    streams: Vec<BoxedEventStream<T>>,
}

impl<T> Merge<T> {
    fn new(streams: Vec<BoxedEventStream<T>>) -> Self {
        Self { streams }
    }
}

impl<T> Stream for Merge<T> {
    type Item = Event<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        'scan: loop {
            if this.streams.is_empty() {
                return Poll::Ready(None);
            }

            let len = this.streams.len();
            let start = fastrand::usize(..len);
            for step in 0..len {
                let index = (start + step) % len;
                match this.streams[index].as_mut().poll_next(cx) {
                    Poll::Ready(Some(event)) => return Poll::Ready(Some(event)),
                    Poll::Ready(None) => {
                        this.streams.swap_remove(index);
                        continue 'scan;
                    }
                    Poll::Pending => {}
                }
            }

            return Poll::Pending;
        }
    }
}

/// Extension trait providing the merge fan-in operators.
pub trait MergeExt<T>: Stream<Item = Event<T>> + Sized {
    /// Interleaves this stream with another, forwarding every event from
    /// either as it arrives.
    fn merge_with<S2>(self, other: S2) -> Merge<T>
    where
        Self: Send + 'static,
        S2: Stream<Item = Event<T>> + Send + 'static;

    /// Interleaves this stream with any number of others.
    fn merge_all<S2>(self, others: Vec<S2>) -> Merge<T>
    where
        Self: Send + 'static,
        S2: Stream<Item = Event<T>> + Send + 'static;
}

impl<S, T> MergeExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn merge_with<S2>(self, other: S2) -> Merge<T>
    where
        Self: Send + 'static,
        S2: Stream<Item = Event<T>> + Send + 'static,
    {
        Merge::new(vec![Box::pin(self), Box::pin(other)])
    }

    fn merge_all<S2>(self, others: Vec<S2>) -> Merge<T>
    where
        Self: Send + 'static,
        S2: Stream<Item = Event<T>> + Send + 'static,
    {
        let mut streams: Vec<BoxedEventStream<T>> = Vec::with_capacity(others.len() + 1);
        streams.push(Box::pin(self));
        for other in others {
            streams.push(Box::pin(other));
        }
        Merge::new(streams)
    }
}
