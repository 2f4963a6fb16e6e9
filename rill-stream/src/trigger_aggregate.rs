// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The two-input primitive behind flush-driven operators.
//!
//! A values stream is folded into an accumulator; a separate trigger stream
//! flushes the accumulator downstream. In long-poll mode a trigger arriving
//! while nothing is pending arms the operator so that the next value passes
//! through immediately instead of waiting for another trigger.
//!
//! Termination follows both inputs: values ending with nothing pending ends
//! the output at once, otherwise the pending accumulator waits for one more
//! trigger; the trigger ending while no long-poll is armed ends the output,
//! since nothing could ever flush again.

use futures::Stream;
use pin_project::pin_project;
use rill_core::Event;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream produced by [`trigger_aggregate`].
#[pin_project]
pub struct TriggerAggregate<S, G, Acc, F> {
    #[pin]
    values: S,
    #[pin]
    trigger: G,
    aggregate: F,
    current: Option<Acc>,
    waiting_for_trigger: bool,
    long_poll: bool,
    values_done: bool,
    trigger_done: bool,
}

/// Folds `values` into an accumulator flushed whenever `trigger` emits.
///
/// `aggregate` receives each value and the accumulator built so far (`None`
/// right after a flush).
pub fn trigger_aggregate<S, G, T, TG, Acc, F>(
    values: S,
    trigger: G,
    aggregate: F,
    long_poll: bool,
) -> TriggerAggregate<S, G, Acc, F>
where
    S: Stream<Item = Event<T>>,
    G: Stream<Item = Event<TG>>,
    F: FnMut(T, Option<Acc>) -> Acc,
{
    TriggerAggregate {
        values,
        trigger,
        aggregate,
        current: None,
        waiting_for_trigger: true,
        long_poll,
        values_done: false,
        trigger_done: false,
    }
}

impl<S, G, T, TG, Acc, F> Stream for TriggerAggregate<S, G, Acc, F>
where
    S: Stream<Item = Event<T>>,
    G: Stream<Item = Event<TG>>,
    F: FnMut(T, Option<Acc>) -> Acc,
{
    type Item = Event<Acc>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // Values first, so a value and a trigger arriving in the same
            // cycle flush the value rather than dropping it
            if !*this.values_done {
                match this.values.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        let acc = (this.aggregate)(value, this.current.take());
                        if !*this.waiting_for_trigger {
                            // A trigger already fired while empty
                            *this.waiting_for_trigger = true;
                            return Poll::Ready(Some(Event::Value(acc)));
                        }
                        *this.current = Some(acc);
                        continue;
                    }
                    Poll::Ready(Some(Event::Error(error))) => {
                        return Poll::Ready(Some(Event::Error(error)));
                    }
                    Poll::Ready(None) => {
                        *this.values_done = true;
                        if this.current.is_none() {
                            return Poll::Ready(None);
                        }
                        continue;
                    }
                    Poll::Pending => {}
                }
            } else if this.current.is_none() {
                return Poll::Ready(None);
            }

            if !*this.trigger_done {
                match this.trigger.as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(_))) => {
                        if let Some(acc) = this.current.take() {
                            *this.waiting_for_trigger = true;
                            return Poll::Ready(Some(Event::Value(acc)));
                        }
                        if *this.long_poll {
                            *this.waiting_for_trigger = false;
                        }
                        continue;
                    }
                    Poll::Ready(Some(Event::Error(error))) => {
                        return Poll::Ready(Some(Event::Error(error)));
                    }
                    Poll::Ready(None) => {
                        *this.trigger_done = true;
                        if *this.waiting_for_trigger {
                            // No trigger can ever flush the accumulator
                            return Poll::Ready(None);
                        }
                        continue;
                    }
                    Poll::Pending => {}
                }
            } else if *this.waiting_for_trigger {
                return Poll::Ready(None);
            }

            return Poll::Pending;
        }
    }
}
