// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::handle_events::{EventHandlers, EventSink, HandleEventsExt, HandledStream};
use futures::Stream;
use rill_core::{Event, StreamError};

/// Extension trait providing the [`tap`](TapExt::tap) operator.
pub trait TapExt<T>: Stream<Item = Event<T>> + Sized {
    /// Invokes a side-effect callback for each value, before forwarding it.
    ///
    /// The output event sequence is exactly the input sequence; the callback
    /// cannot alter, reorder or drop events. When the output is shared, the
    /// callback runs once per event, not once per subscriber.
    fn tap<F>(self, on_value: F) -> HandledStream<Self, T, T>
    where
        F: FnMut(&T) + Send + 'static;

    /// As [`tap`](TapExt::tap), with additional callbacks observing error and
    /// done events. Each callback runs before the corresponding event is
    /// forwarded.
    fn tap_events<FV, FE, FD>(
        self,
        on_value: FV,
        on_error: FE,
        on_done: FD,
    ) -> HandledStream<Self, T, T>
    where
        FV: FnMut(&T) + Send + 'static,
        FE: FnMut(&StreamError) + Send + 'static,
        FD: FnMut() + Send + 'static;
}

impl<S, T: 'static> TapExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn tap<F>(self, mut on_value: F) -> HandledStream<Self, T, T>
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.handle_events(EventHandlers::new(move |value, sink| {
            on_value(&value);
            sink.emit(value);
        }))
    }

    fn tap_events<FV, FE, FD>(
        self,
        mut on_value: FV,
        mut on_error: FE,
        mut on_done: FD,
    ) -> HandledStream<Self, T, T>
    where
        FV: FnMut(&T) + Send + 'static,
        FE: FnMut(&StreamError) + Send + 'static,
        FD: FnMut() + Send + 'static,
    {
        let handlers = EventHandlers::new(move |value: T, sink: &mut EventSink<T>| {
            on_value(&value);
            sink.emit(value);
        })
        .on_error(move |error, sink| {
            on_error(&error);
            sink.emit_error(error);
        })
        .on_done(move |sink| {
            on_done();
            sink.close();
        });
        self.handle_events(handlers)
    }
}
