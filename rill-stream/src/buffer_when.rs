// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::trigger_aggregate::{trigger_aggregate, TriggerAggregate};
use futures::Stream;
use rill_core::Event;

fn append<T>(value: T, so_far: Option<Vec<T>>) -> Vec<T> {
    let mut buffer = so_far.unwrap_or_default();
    buffer.push(value);
    buffer
}

/// Extension trait providing the [`buffer_when`](BufferWhenExt::buffer_when)
/// operator.
pub trait BufferWhenExt<T>: Stream<Item = Event<T>> + Sized {
    /// Collects values into a list emitted whenever `trigger` fires.
    ///
    /// The trigger is long-polled: a trigger firing while the buffer is empty
    /// lets the next value pass through immediately as a one-element list.
    /// Trigger values are ignored; only their arrival matters.
    fn buffer_when<G, TG>(
        self,
        trigger: G,
    ) -> TriggerAggregate<Self, G, Vec<T>, fn(T, Option<Vec<T>>) -> Vec<T>>
    where
        G: Stream<Item = Event<TG>>;
}

impl<S, T> BufferWhenExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn buffer_when<G, TG>(
        self,
        trigger: G,
    ) -> TriggerAggregate<Self, G, Vec<T>, fn(T, Option<Vec<T>>) -> Vec<T>>
    where
        G: Stream<Item = Event<TG>>,
    {
        trigger_aggregate(self, trigger, append as fn(T, Option<Vec<T>>) -> Vec<T>, true)
    }
}
