// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::Chain;
use futures::{Stream, StreamExt};
use rill_core::Event;

/// Extension trait providing the [`followed_by`](FollowedByExt::followed_by)
/// operator.
pub trait FollowedByExt<T>: Stream<Item = Event<T>> + Sized {
    /// Continues with `next` once this stream ends.
    ///
    /// The first stream's end is swallowed; the output ends when `next`
    /// ends. Errors from either stream pass through in order.
    fn followed_by<S2>(self, next: S2) -> Chain<Self, S2>
    where
        S2: Stream<Item = Event<T>>;
}

impl<S, T> FollowedByExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn followed_by<S2>(self, next: S2) -> Chain<Self, S2>
    where
        S2: Stream<Item = Event<T>>,
    {
        self.chain(next)
    }
}
