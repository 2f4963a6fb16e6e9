// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use rill_core::Event;
use std::pin::Pin;
use std::task::{Context, Poll};

type BoxedEventStream<T> = Pin<Box<dyn Stream<Item = Event<T>> + Send>>;

/// Stream returned by [`CombineLatestAllExt::combine_latest_all`].
pub struct CombineLatestAll<T> {
    streams: Vec<BoxedEventStream<T>>,
    latest: Vec<Option<T>>,
    done: Vec<bool>,
}

impl<T> Unpin for CombineLatestAll<T> {}

impl<T: Clone> Stream for CombineLatestAll<T> {
    type Item = Event<Vec<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        // An input that ended empty-handed means no snapshot can ever form
        for index in 0..this.streams.len() {
            if this.done[index] && this.latest[index].is_none() {
                return Poll::Ready(None);
            }
        }
        if this.done.iter().all(|done| *done) {
            return Poll::Ready(None);
        }

        for index in 0..this.streams.len() {
            if this.done[index] {
                continue;
            }
            loop {
                match this.streams[index].as_mut().poll_next(cx) {
                    Poll::Ready(Some(Event::Value(value))) => {
                        this.latest[index] = Some(value);
                        if this.latest.iter().all(Option::is_some) {
                            // Every snapshot is a fresh copy
                            let snapshot = this
                                .latest
                                .iter()
                                .map(|slot| slot.clone().expect("all slots filled"))
                                .collect();
                            return Poll::Ready(Some(Event::Value(snapshot)));
                        }
                    }
                    Poll::Ready(Some(Event::Error(error))) => {
                        return Poll::Ready(Some(Event::Error(error)));
                    }
                    Poll::Ready(None) => {
                        this.done[index] = true;
                        if this.latest[index].is_none() {
                            return Poll::Ready(None);
                        }
                        break;
                    }
                    Poll::Pending => break,
                }
            }
        }

        if this.done.iter().all(|done| *done) {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}

/// Extension trait providing the
/// [`combine_latest_all`](CombineLatestAllExt::combine_latest_all) operator.
pub trait CombineLatestAllExt<T>: Stream<Item = Event<T>> + Sized {
    /// Combines this stream with any number of others, emitting a fresh
    /// snapshot of all latest values whenever any input emits.
    ///
    /// No snapshot is emitted before every input has produced at least one
    /// value. The output ends when every input has ended, or immediately when
    /// any input ends without ever emitting.
    fn combine_latest_all<S2>(self, others: Vec<S2>) -> CombineLatestAll<T>
    where
        Self: Send + 'static,
        S2: Stream<Item = Event<T>> + Send + 'static,
        T: Clone;
}

impl<S, T> CombineLatestAllExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn combine_latest_all<S2>(self, others: Vec<S2>) -> CombineLatestAll<T>
    where
        Self: Send + 'static,
        S2: Stream<Item = Event<T>> + Send + 'static,
        T: Clone,
    {
        let mut streams: Vec<BoxedEventStream<T>> = Vec::with_capacity(others.len() + 1);
        streams.push(Box::pin(self));
        for other in others {
            streams.push(Box::pin(other));
        }
        let count = streams.len();
        CombineLatestAll {
            streams,
            latest: vec![None; count],
            done: vec![false; count],
        }
    }
}
