// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Burst collapsing.
//!
//! A burst is a run of values each arriving within the debounce duration of
//! the previous one. Every value restarts the burst timer and folds into the
//! burst aggregate. When the timer finally expires the burst is over: in
//! trailing mode the aggregate is emitted, in leading mode the first value of
//! the burst was already emitted when it opened.
//!
//! A leading emit marks the burst, so a burst consisting of that single value
//! does not emit again as trailing. A source ending mid-burst leaves the
//! output open until the burst timer delivers the pending aggregate.

use futures::Stream;
use pin_project::pin_project;
use rill_core::Event;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Sleep};

/// Stream returned by the debounce operators.
#[pin_project]
pub struct Debounce<S, T, Acc, F> {
    #[pin]
    source: S,
    duration: Duration,
    collect: F,
    leading: bool,
    trailing: bool,
    #[pin]
    sleep: Option<Sleep>,
    so_far: Option<Acc>,
    emitted_leading: bool,
    source_done: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<S, T, Acc, F> Stream for Debounce<S, T, Acc, F>
where
    S: Stream<Item = Event<T>>,
    F: FnMut(T, Option<Acc>) -> Acc,
    Acc: Clone,
{
    type Item = Event<Acc>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(timer) = this.sleep.as_mut().as_pin_mut() {
                if timer.poll(cx).is_ready() {
                    // Burst over
                    this.sleep.set(None);
                    let aggregate = this.so_far.take();
                    let emit = *this.trailing && !*this.emitted_leading;
                    *this.emitted_leading = false;
                    if emit {
                        if let Some(aggregate) = aggregate {
                            return Poll::Ready(Some(Event::Value(aggregate)));
                        }
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
                    let burst_open = this.sleep.is_some();
                    this.sleep.set(Some(sleep(*this.duration)));
                    *this.so_far = Some((this.collect)(value, this.so_far.take()));
                    if *this.leading && !burst_open {
                        *this.emitted_leading = true;
                        let aggregate = this.so_far.clone().expect("burst just collected");
                        return Poll::Ready(Some(Event::Value(aggregate)));
                    }
                    *this.emitted_leading = false;
                }
                Poll::Ready(Some(Event::Error(error))) => {
                    return Poll::Ready(Some(Event::Error(error)));
                }
                Poll::Ready(None) => {
                    *this.source_done = true;
                    let pending_trailing =
                        this.so_far.is_some() && *this.trailing && !*this.emitted_leading;
                    if !pending_trailing {
                        // Nothing left to deliver; discard the burst timer
                        this.sleep.set(None);
                        *this.so_far = None;
                        return Poll::Ready(None);
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

fn replace<T>(value: T, _so_far: Option<T>) -> T {
    value
}

fn append<T>(value: T, so_far: Option<Vec<T>>) -> Vec<T> {
    let mut burst = so_far.unwrap_or_default();
    burst.push(value);
    burst
}

/// Extension trait providing the debounce operators.
pub trait DebounceExt<T>: Stream<Item = Event<T>> + Sized {
    /// Emits the newest value of each burst once the source has been quiet
    /// for `duration`.
    fn debounce(self, duration: Duration) -> Pin<Box<Debounce<Self, T, T, fn(T, Option<T>) -> T>>> {
        self.debounce_with(duration, false, true)
    }

    /// Debounce with explicit edge selection: `leading` emits the first value
    /// of a burst immediately, `trailing` emits the newest value when the
    /// burst ends. A burst whose only value was emitted as leading does not
    /// emit again as trailing.
    fn debounce_with(
        self,
        duration: Duration,
        leading: bool,
        trailing: bool,
    ) -> Pin<Box<Debounce<Self, T, T, fn(T, Option<T>) -> T>>> {
        debug_assert!(leading || trailing, "debounce with both edges disabled emits nothing");
        Box::pin(Debounce {
            source: self,
            duration,
            collect: replace as fn(T, Option<T>) -> T,
            leading,
            trailing,
            sleep: None,
            so_far: None,
            emitted_leading: false,
            source_done: false,
            _marker: std::marker::PhantomData,
        })
    }

    /// Collects each burst into a list emitted when the burst ends.
    fn debounce_buffer(
        self,
        duration: Duration,
    ) -> Pin<Box<Debounce<Self, T, Vec<T>, fn(T, Option<Vec<T>>) -> Vec<T>>>> {
        Box::pin(Debounce {
            source: self,
            duration,
            collect: append as fn(T, Option<Vec<T>>) -> Vec<T>,
            leading: false,
            trailing: true,
            sleep: None,
            so_far: None,
            emitted_leading: false,
            source_done: false,
            _marker: std::marker::PhantomData,
        })
    }
}

impl<S, T> DebounceExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
