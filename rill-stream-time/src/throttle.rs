// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Periodic rate limiting.
//!
//! The first value of each period is emitted immediately and opens a one-shot
//! timer of the throttle duration. Values arriving inside the period are
//! dropped, or, in trailing mode, remembered: the newest one is emitted when
//! the period ends, opening the next period.
//!
//! A source that ends with a trailing value remembered keeps the output open
//! until the timer delivers it; the output then closes without opening
//! another period. A source that ends with nothing remembered closes the
//! output immediately, discarding the timer.

use futures::Stream;
use pin_project::pin_project;
use rill_core::Event;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Sleep};

/// Stream returned by the throttle operators.
#[pin_project]
pub struct Throttle<S, T> {
    #[pin]
    source: S,
    duration: Duration,
    trailing: bool,
    #[pin]
    sleep: Option<Sleep>,
    pending: Option<T>,
    source_done: bool,
}

impl<S, T> Stream for Throttle<S, T>
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
                    if let Some(value) = this.pending.take() {
                        // The trailing emit opens the next period, unless the
                        // source already ended
                        if !*this.source_done {
                            this.sleep.set(Some(sleep(*this.duration)));
                        }
                        return Poll::Ready(Some(Event::Value(value)));
                    }
                }
            }

            if *this.source_done {
                if this.pending.is_none() {
                    return Poll::Ready(None);
                }
                return Poll::Pending;
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(Event::Value(value))) => {
                    if this.sleep.is_none() {
                        this.sleep.set(Some(sleep(*this.duration)));
                        return Poll::Ready(Some(Event::Value(value)));
                    }
                    if *this.trailing {
                        *this.pending = Some(value);
                    }
                }
                Poll::Ready(Some(Event::Error(error))) => {
                    return Poll::Ready(Some(Event::Error(error)));
                }
                Poll::Ready(None) => {
                    *this.source_done = true;
                    if this.pending.is_none() {
                        return Poll::Ready(None);
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Extension trait providing the throttle operators.
pub trait ThrottleExt<T>: Stream<Item = Event<T>> + Sized {
    /// Emits the first value of each period and drops the rest.
    fn throttle(self, duration: Duration) -> Pin<Box<Throttle<Self, T>>> {
        Box::pin(Throttle {
            source: self,
            duration,
            trailing: false,
            sleep: None,
            pending: None,
            source_done: false,
        })
    }

    /// Emits the first value of each period and remembers the newest dropped
    /// one, delivering it when the period ends.
    fn throttle_trailing(self, duration: Duration) -> Pin<Box<Throttle<Self, T>>> {
        Box::pin(Throttle {
            source: self,
            duration,
            trailing: true,
            sleep: None,
            pending: None,
            source_done: false,
        })
    }
}

impl<S, T> ThrottleExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
