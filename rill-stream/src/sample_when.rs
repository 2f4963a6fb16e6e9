// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::trigger_aggregate::{trigger_aggregate, TriggerAggregate};
use futures::Stream;
use rill_core::Event;

fn replace<T>(value: T, _so_far: Option<T>) -> T {
    value
}

/// Extension trait providing the [`sample_when`](SampleWhenExt::sample_when)
/// operator.
pub trait SampleWhenExt<T>: Stream<Item = Event<T>> + Sized {
    /// Emits the most recent value each time `trigger` fires.
    ///
    /// Values arriving between triggers overwrite one another; a trigger with
    /// nothing pending emits nothing. With `long_poll` set, such a trigger
    /// instead lets the next value pass through immediately.
    fn sample_when<G, TG>(
        self,
        trigger: G,
        long_poll: bool,
    ) -> TriggerAggregate<Self, G, T, fn(T, Option<T>) -> T>
    where
        G: Stream<Item = Event<TG>>;
}

impl<S, T> SampleWhenExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn sample_when<G, TG>(
        self,
        trigger: G,
        long_poll: bool,
    ) -> TriggerAggregate<Self, G, T, fn(T, Option<T>) -> T>
    where
        G: Stream<Item = Event<TG>>,
    {
        trigger_aggregate(self, trigger, replace as fn(T, Option<T>) -> T, long_poll)
    }
}
