// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use futures::StreamExt;
use rill_core::{Event, StreamError};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::time::{sleep, timeout};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Creates an unbounded test source whose values arrive wrapped in
/// [`Event::Value`].
///
/// Dropping the sender ends the stream.
pub fn test_channel<T: Send + 'static>(
) -> (UnboundedSender<T>, impl Stream<Item = Event<T>> + Send + Unpin) {
    let (tx, rx) = unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(Event::Value);
    (tx, stream)
}

/// Creates an unbounded test source that accepts raw [`Event`]s, for error
/// propagation tests.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    UnboundedSender<Event<T>>,
    impl Stream<Item = Event<T>> + Send + Unpin,
) {
    let (tx, rx) = unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}

/// Creates a value-less trigger source for flush-driven operators.
pub fn trigger_channel() -> (
    UnboundedSender<()>,
    impl Stream<Item = Event<()>> + Send + Unpin,
) {
    test_channel::<()>()
}

/// Unwraps an `Event::Value`, panicking on errors or stream end.
///
/// # Panics
///
/// Panics if the event is an `Error` or the stream has ended.
pub fn unwrap_value<T>(event: Option<Event<T>>) -> T {
    match event {
        Some(Event::Value(value)) => value,
        Some(Event::Error(e)) => panic!("expected Value but got Error: {e}"),
        None => panic!("expected Value but stream ended"),
    }
}

/// Waits up to `timeout_ms` for the next event.
///
/// # Panics
///
/// Panics if the stream ends or no event arrives within the timeout.
pub async fn unwrap_stream<T, S>(stream: &mut S, timeout_ms: u64) -> Event<T>
where
    S: Stream<Item = Event<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(event)) => event,
        Ok(None) => panic!("expected an event but stream ended"),
        Err(_) => panic!("no event received within {timeout_ms}ms"),
    }
}

/// Asserts that the stream emits nothing within the given window.
///
/// # Panics
///
/// Panics if an event arrives before the timeout elapses.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _event = stream.next() => {
            panic!("unexpected event emitted, expected no output");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Drains a finite stream, collecting values and panicking on errors.
///
/// # Panics
///
/// Panics if the stream yields an error event.
pub async fn collect_values<T, S>(stream: S) -> Vec<T>
where
    S: Stream<Item = Event<T>>,
{
    stream
        .map(|event| match event {
            Event::Value(v) => v,
            Event::Error(e) => panic!("unexpected error event: {e}"),
        })
        .collect()
        .await
}

/// Drains a finite stream into raw results, keeping errors.
pub async fn collect_results<T, S>(stream: S) -> Vec<Result<T, StreamError>>
where
    S: Stream<Item = Event<T>>,
{
    stream.map(Into::into).collect().await
}

/// Wraps a test body in a five second timeout to prevent hanging tests.
#[macro_export]
macro_rules! with_timeout {
    ($test_body:expr) => {
        tokio::time::timeout(std::time::Duration::from_secs(5), async { $test_body })
            .await
            .expect("test timed out after 5 seconds")
    };
}
