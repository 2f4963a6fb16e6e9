// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::followed_by::FollowedByExt;
use futures::stream::iter;
use futures::Stream;
use rill_core::Event;

/// Extension trait providing the `start_with` family of prefix operators.
pub trait StartWithExt<T>: Stream<Item = Event<T>> + Sized {
    /// Emits `value` before any source event.
    fn start_with(self, value: T) -> impl Stream<Item = Event<T>> + Send
    where
        Self: Send,
        T: Send;

    /// Emits `values`, in order, before any source event.
    fn start_with_many(self, values: Vec<T>) -> impl Stream<Item = Event<T>> + Send
    where
        Self: Send,
        T: Send;

    /// Replays all of `prefix` before any source event.
    fn start_with_stream<S2>(self, prefix: S2) -> impl Stream<Item = Event<T>> + Send
    where
        Self: Send,
        S2: Stream<Item = Event<T>> + Send;
}

impl<S, T> StartWithExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn start_with(self, value: T) -> impl Stream<Item = Event<T>> + Send
    where
        Self: Send,
        T: Send,
    {
        self.start_with_many(vec![value])
    }

    fn start_with_many(self, values: Vec<T>) -> impl Stream<Item = Event<T>> + Send
    where
        Self: Send,
        T: Send,
    {
        let prefix: Vec<Event<T>> = values.into_iter().map(Event::Value).collect();
        iter(prefix).followed_by(self)
    }

    fn start_with_stream<S2>(self, prefix: S2) -> impl Stream<Item = Event<T>> + Send
    where
        Self: Send,
        S2: Stream<Item = Event<T>> + Send,
    {
        prefix.followed_by(self)
    }
}
