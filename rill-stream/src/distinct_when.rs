// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::handle_events::{EventHandlers, HandleEventsExt, HandledStream};
use futures::Stream;
use rill_core::Event;

/// Extension trait providing the [`distinct_when`](DistinctWhenExt::distinct_when)
/// operator.
pub trait DistinctWhenExt<T>: Stream<Item = Event<T>> + Sized {
    /// Forwards a value when it differs from the last value *seen* (not the
    /// last value emitted), or when the predicate rejects it.
    ///
    /// Values the predicate accepts are suppressed only while the source
    /// keeps repeating the same value. Errors pass through unchanged and do
    /// not disturb the comparison state.
    fn distinct_when<F>(self, accept: F) -> HandledStream<Self, T, T>
    where
        T: Clone + PartialEq + Send + 'static,
        F: FnMut(&T) -> bool + Send + 'static;
}

impl<S, T> DistinctWhenExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn distinct_when<F>(self, mut accept: F) -> HandledStream<Self, T, T>
    where
        T: Clone + PartialEq + Send + 'static,
        F: FnMut(&T) -> bool + Send + 'static,
    {
        let mut last_seen: Option<T> = None;
        self.handle_events(EventHandlers::new(move |value, sink| {
            let changed = last_seen.as_ref() != Some(&value);
            let rejected = !accept(&value);
            last_seen = Some(value.clone());
            if changed || rejected {
                sink.emit(value);
            }
        }))
    }
}
