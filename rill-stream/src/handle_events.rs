// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The handler primitive every simple transformation reduces to.
//!
//! [`handle_events`](HandleEventsExt::handle_events) wraps a source with
//! three pluggable handlers, one per event kind. Each handler receives the
//! event and an [`EventSink`] it may write any number of output events into.
//! Handlers run exactly once per source event; when the output is shared
//! through a broadcast subject, the fan-out happens downstream of the
//! handlers, so subscriber count never changes how often they run.
//!
//! Default handlers forward values and errors verbatim and close the sink on
//! source end.

use crate::logging::log_warn as warn;
use futures::Stream;
use pin_project::pin_project;
use rill_core::{Event, StreamError};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// The write end handed to event handlers.
///
/// Events written here are drained, in order, into the output stream. Writes
/// after [`close`](EventSink::close) are dropped.
pub struct EventSink<T> {
    buffer: VecDeque<Event<T>>,
    closed: bool,
}

impl<T> EventSink<T> {
    fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
            closed: false,
        }
    }

    /// Queue a data value for the output.
    pub fn emit(&mut self, value: T) {
        self.push(Event::Value(value));
    }

    /// Queue an error event for the output.
    pub fn emit_error(&mut self, error: StreamError) {
        self.push(Event::Error(error));
    }

    /// Close the output. Buffered events still drain; further writes are
    /// dropped.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Returns `true` once the sink has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn push(&mut self, event: Event<T>) {
        if self.closed {
            warn!("event sink is closed; dropping write");
            return;
        }
        self.buffer.push_back(event);
    }

    fn pop(&mut self) -> Option<Event<T>> {
        self.buffer.pop_front()
    }
}

/// The three handlers wired between a source and its output sink.
///
/// Constructed with a value handler; error and done handlers default to
/// forwarding the error and closing the sink.
pub struct EventHandlers<T, U> {
    on_value: Box<dyn FnMut(T, &mut EventSink<U>) + Send>,
    on_error: Box<dyn FnMut(StreamError, &mut EventSink<U>) + Send>,
    on_done: Box<dyn FnMut(&mut EventSink<U>) + Send>,
}

impl<T, U: 'static> EventHandlers<T, U> {
    /// Handlers with the given value handler and forwarding defaults for
    /// error and done.
    pub fn new(on_value: impl FnMut(T, &mut EventSink<U>) + Send + 'static) -> Self {
        Self {
            on_value: Box::new(on_value),
            on_error: Box::new(|error, sink| sink.emit_error(error)),
            on_done: Box::new(EventSink::close),
        }
    }

    /// Replace the error handler.
    #[must_use]
    pub fn on_error(
        mut self,
        handler: impl FnMut(StreamError, &mut EventSink<U>) + Send + 'static,
    ) -> Self {
        self.on_error = Box::new(handler);
        self
    }

    /// Replace the done handler. The default closes the sink; a replacement
    /// that does not close it still ends the output once the source is done
    /// and the buffer has drained.
    #[must_use]
    pub fn on_done(mut self, handler: impl FnMut(&mut EventSink<U>) + Send + 'static) -> Self {
        self.on_done = Box::new(handler);
        self
    }
}

impl<T: 'static> EventHandlers<T, T> {
    /// Handlers that forward every event unchanged.
    #[must_use]
    pub fn forwarding() -> Self {
        Self::new(|value, sink| sink.emit(value))
    }
}

/// Stream returned by [`HandleEventsExt::handle_events`].
#[pin_project]
pub struct HandledStream<S, T, U> {
    #[pin]
    source: S,
    handlers: EventHandlers<T, U>,
    sink: EventSink<U>,
    source_done: bool,
}

impl<S, T, U> HandledStream<S, T, U> {
    fn new(source: S, handlers: EventHandlers<T, U>) -> Self {
        Self {
            source,
            handlers,
            sink: EventSink::new(),
            source_done: false,
        }
    }
}

impl<S, T, U> Stream for HandledStream<S, T, U>
where
    S: Stream<Item = Event<T>>,
{
    type Item = Event<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // Drain handler output before touching the source again
            if let Some(event) = this.sink.pop() {
                return Poll::Ready(Some(event));
            }
            if this.sink.is_closed() || *this.source_done {
                return Poll::Ready(None);
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(Event::Value(value))) => {
                    (this.handlers.on_value)(value, &mut *this.sink);
                }
                Poll::Ready(Some(Event::Error(error))) => {
                    (this.handlers.on_error)(error, &mut *this.sink);
                }
                Poll::Ready(None) => {
                    (this.handlers.on_done)(&mut *this.sink);
                    *this.source_done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Extension trait providing the [`handle_events`](HandleEventsExt::handle_events)
/// primitive.
pub trait HandleEventsExt<T>: Stream<Item = Event<T>> + Sized {
    /// Wraps this stream with per-event handlers writing into a shared output
    /// sink.
    fn handle_events<U>(self, handlers: EventHandlers<T, U>) -> HandledStream<Self, T, U> {
        HandledStream::new(self, handlers)
    }
}

impl<S, T> HandleEventsExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
