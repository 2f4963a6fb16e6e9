// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A hot, unbounded broadcast subject.
//!
//! [`Publisher`] is the fan-out half of broadcast streams: any number of
//! subscribers may listen concurrently, each receiving every event published
//! after it subscribed. Late subscribers do not see earlier events.
//!
//! Error events are in-band and non-terminal: publishing an error leaves the
//! subject open. Only [`Publisher::close`] ends subscriber streams.

use crate::error::StreamError;
use crate::event::Event;
use async_channel::Sender;
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;

/// The stream handed to each subscriber.
pub type SubscriberStream<T> = Pin<Box<dyn Stream<Item = Event<T>> + Send>>;

/// Errors returned by subject operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    /// The subject has been closed; it accepts no further events or
    /// subscribers.
    #[error("publisher is closed")]
    Closed,
}

struct PublisherState<T> {
    closed: bool,
    senders: Vec<Sender<Event<T>>>,
}

/// A hot, unbounded subject that broadcasts events to all current
/// subscribers.
pub struct Publisher<T: Clone + Send + 'static> {
    state: Arc<Mutex<PublisherState<T>>>,
}

impl<T: Clone + Send + 'static> Publisher<T> {
    /// Creates an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(PublisherState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe and receive every event published from now on.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Closed`] if the subject has been closed.
    pub fn subscribe(&self) -> std::result::Result<SubscriberStream<T>, PublishError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(PublishError::Closed);
        }

        let (tx, rx) = async_channel::unbounded();
        state.senders.push(tx);
        Ok(Box::pin(rx))
    }

    /// Fan an event out to all live subscribers.
    ///
    /// Subscribers that have gone away are pruned here.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Closed`] if the subject has been closed.
    pub fn publish(&self, event: Event<T>) -> std::result::Result<(), PublishError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(PublishError::Closed);
        }

        let mut live = Vec::with_capacity(state.senders.len());
        for tx in state.senders.drain(..) {
            if tx.try_send(event.clone()).is_ok() {
                live.push(tx);
            }
        }
        state.senders = live;
        Ok(())
    }

    /// Publish a data value.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Closed`] if the subject has been closed.
    pub fn value(&self, value: T) -> std::result::Result<(), PublishError> {
        self.publish(Event::Value(value))
    }

    /// Publish an error event. The subject stays open; errors are not
    /// terminal.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Closed`] if the subject has been closed.
    pub fn error(&self, error: StreamError) -> std::result::Result<(), PublishError> {
        self.publish(Event::Error(error))
    }

    /// Closes the subject, ending every subscriber stream.
    ///
    /// Idempotent. After closing, `publish` and `subscribe` return
    /// [`PublishError::Closed`].
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` once the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of currently tracked subscribers.
    ///
    /// Dropped subscribers are pruned lazily on the next `publish`.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + 'static> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
