// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use rill_core::Event;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`TakeUntilSignalExt::take_until_signal`].
#[pin_project]
pub struct TakeUntilSignal<S, Fut> {
    #[pin]
    source: S,
    #[pin]
    signal: Fut,
    stopped: bool,
}

impl<S, T, Fut> Stream for TakeUntilSignal<S, Fut>
where
    S: Stream<Item = Event<T>>,
    Fut: Future,
{
    type Item = Event<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.stopped {
            return Poll::Ready(None);
        }

        if this.signal.poll(cx).is_ready() {
            *this.stopped = true;
            return Poll::Ready(None);
        }

        match this.source.poll_next(cx) {
            Poll::Ready(Some(event)) => Poll::Ready(Some(event)),
            Poll::Ready(None) => {
                *this.stopped = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Extension trait providing the
/// [`take_until_signal`](TakeUntilSignalExt::take_until_signal) operator.
pub trait TakeUntilSignalExt<T>: Stream<Item = Event<T>> + Sized {
    /// Forwards source events until `signal` completes, then ends.
    ///
    /// The signal's output value is ignored. Once it completes, the source is
    /// never polled again and the output ends cleanly, exactly once.
    fn take_until_signal<Fut>(self, signal: Fut) -> TakeUntilSignal<Self, Fut>
    where
        Fut: Future,
    {
        TakeUntilSignal {
            source: self,
            signal,
            stopped: false,
        }
    }
}

impl<S, T> TakeUntilSignalExt<T> for S where S: Stream<Item = Event<T>> + Sized {}
