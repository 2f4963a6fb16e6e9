// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Adapters turning tokio channels into event streams.

use futures::{Stream, StreamExt};
use rill_core::Event;
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};
use tokio_stream::wrappers::{ReceiverStream, UnboundedReceiverStream};

/// Converts an [`UnboundedReceiver`] into a stream of [`Event`]s.
pub trait UnboundedReceiverExt<T> {
    /// Wraps every received value in [`Event::Value`]. Dropping all senders
    /// ends the stream.
    fn into_event_stream(self) -> impl Stream<Item = Event<T>> + Send + Unpin;
}

impl<T: Send + 'static> UnboundedReceiverExt<T> for UnboundedReceiver<T> {
    fn into_event_stream(self) -> impl Stream<Item = Event<T>> + Send + Unpin {
        UnboundedReceiverStream::new(self).map(Event::Value)
    }
}

/// Converts a bounded [`Receiver`] into a stream of [`Event`]s.
pub trait ReceiverExt<T> {
    /// Wraps every received value in [`Event::Value`]. Dropping all senders
    /// ends the stream.
    fn into_event_stream(self) -> impl Stream<Item = Event<T>> + Send + Unpin;
}

impl<T: Send + 'static> ReceiverExt<T> for Receiver<T> {
    fn into_event_stream(self) -> impl Stream<Item = Event<T>> + Send + Unpin {
        ReceiverStream::new(self).map(Event::Value)
    }
}
