// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deferred periodic sampling.
//!
//! The first value after an emit opens a period; values inside the period
//! overwrite one another; when the period ends, the newest value is emitted.
//! A source that ends while a period is open keeps the output alive until
//! that period delivers its value.

use futures::Stream;
use pin_project::pin_project;
use rill_core::Event;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Sleep};

/// Stream returned by [`AuditExt::audit`].
#[pin_project]
pub struct Audit<S, T> {
    #[pin]
    source: S,
    duration: Duration,
    #[pin]
    sleep: Option<Sleep>,
    recent: Option<T>,
    source_done: bool,
}

impl<S, T> Stream for Audit<S, T>
where
    S: Stream<Item = Event<T>>,
{
    type Item = Event<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(timer) = this.sleep.as_mut().as_pin_mut() {
                if timer.poll(cx).is_ready() {
                    this.sleep.set(None);
                    if let Some(value) = this.recent.take() {
                        return Poll::Ready(Some(Event::Value(value)));
                    }
                }
            }

            if *this.source_done {
                if this.sleep.is_none() {
                    return Poll::Ready(None);
                }
                return Poll::Pending;
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(Event::Value(value))) => {
                    *this.recent = Some(value);
                    if this.sleep.is_none() {
                        this.sleep.set(Some(sleep(*this.duration)));
                    }
                }
                Poll::Ready(Some(Event::Error(error))) => {
                    return Poll::Ready(Some(Event::Error(error)));
                }
                Poll::Ready(None) => {
                    *this.source_done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Extension trait providing the [`audit`](AuditExt::audit) operator.
pub trait AuditExt<T>: Stream<Item = Event<T>> + Sized {
    /// Emits the most recent value at the end of each period.
    ///
    /// A period opens on the first value after the previous emit (or after
    /// subscription) and lasts `duration`.
    fn audit(self, duration: Duration) -> Pin<Box<Audit<Self, T>>> {
        Box::pin(Audit {
            source: self,
            duration,
            sleep: None,
            recent: None,
            source_done: false,
        })
    }
}

impl<S, T> AuditExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
