// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Broadcast sharing of a single-subscription stream.
//!
//! `share` consumes the source exactly once: a detached pump drives the one
//! upstream subscription and fans every event out through a [`Publisher`].
//! All operators applied *before* `share` therefore run once per source
//! event no matter how many subscribers attach afterwards.
//!
//! The pump starts eagerly, before any subscriber exists; events emitted
//! while nobody listens are dropped by the subject. Dropping the [`Shared`]
//! handle aborts the pump, which cancels the upstream subscription.

use futures::{Stream, StreamExt};
use rill_core::{Event, PublishError, Publisher, PumpTask, SubscriberStream};

/// A shared stream fanning one source out to many subscribers.
pub struct Shared<T: Clone + Send + 'static> {
    publisher: Publisher<T>,
    _pump: PumpTask,
}

impl<T: Clone + Send + 'static> Shared<T> {
    /// Starts sharing `source`. Prefer [`ShareExt::share`].
    pub fn new<S>(source: S) -> Self
    where
        S: Stream<Item = Event<T>> + Send + 'static,
    {
        let publisher = Publisher::new();
        let fanout = publisher.clone();

        let pump = PumpTask::spawn(async move {
            futures::pin_mut!(source);
            while let Some(event) = source.next().await {
                if fanout.publish(event).is_err() {
                    // Subject closed underneath us; stop pumping
                    break;
                }
            }
            fanout.close();
        });

        Self {
            publisher,
            _pump: pump,
        }
    }

    /// Attach a new subscriber receiving every event from now on.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Closed`] once the source has ended or the
    /// handle was dropped.
    pub fn subscribe(&self) -> Result<SubscriberStream<T>, PublishError> {
        self.publisher.subscribe()
    }

    /// Returns `true` once the source has ended and the subject closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.publisher.is_closed()
    }

    /// Number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.publisher.subscriber_count()
    }
}

impl<T: Clone + Send + 'static> Drop for Shared<T> {
    fn drop(&mut self) {
        self.publisher.close();
    }
}

/// Extension trait providing the [`share`](ShareExt::share) operator.
pub trait ShareExt<T: Clone + Send + 'static>: Stream<Item = Event<T>> {
    /// Shares this stream among any number of subscribers.
    ///
    /// Must be called from within a tokio runtime: the returned handle owns a
    /// background pump task.
    fn share(self) -> Shared<T>
    where
        Self: Send + Sized + 'static;
}

impl<S, T> ShareExt<T> for S
where
    S: Stream<Item = Event<T>>,
    T: Clone + Send + 'static,
{
    fn share(self) -> Shared<T>
    where
        Self: Send + Sized + 'static,
    {
        Shared::new(self)
    }
}
