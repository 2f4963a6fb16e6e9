// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rill_core::{Event, StreamError};
use rill_stream::{EventHandlers, HandleEventsExt};
use rill_test_utils::{test_channel, test_channel_with_errors, unwrap_stream, unwrap_value};

#[tokio::test]
async fn forwarding_handlers_leave_the_stream_unchanged() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut handled = stream.handle_events(EventHandlers::forwarding());

    // Act & Assert
    tx.send(1)?;
    tx.send(2)?;
    assert_eq!(unwrap_value(handled.next().await), 1);
    assert_eq!(unwrap_value(handled.next().await), 2);

    drop(tx);
    assert!(handled.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn value_handler_may_emit_many_events_per_input() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut handled = stream.handle_events(EventHandlers::new(|value: i32, sink| {
        sink.emit(value);
        sink.emit(value * 10);
    }));

    // Act & Assert
    tx.send(3)?;
    assert_eq!(unwrap_value(handled.next().await), 3);
    assert_eq!(unwrap_value(handled.next().await), 30);

    Ok(())
}

#[tokio::test]
async fn error_handler_can_swallow_errors() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<i32>();
    let handlers = EventHandlers::forwarding().on_error(|_error, _sink| {
        // Swallowed: nothing reaches the output
    });
    let mut handled = stream.handle_events(handlers);

    // Act & Assert
    tx.send(Event::Value(1))?;
    tx.send(Event::Error(StreamError::processing("dropped")))?;
    tx.send(Event::Value(2))?;

    assert_eq!(unwrap_value(handled.next().await), 1);
    assert_eq!(unwrap_value(handled.next().await), 2);

    Ok(())
}

#[tokio::test]
async fn done_handler_may_emit_trailing_events() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let handlers = EventHandlers::forwarding().on_done(|sink| {
        sink.emit(99);
        sink.close();
    });
    let mut handled = stream.handle_events(handlers);

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(handled.next().await), 1);

    drop(tx);
    assert_eq!(unwrap_value(handled.next().await), 99);
    assert!(handled.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn writes_after_close_are_dropped() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut handled = stream.handle_events(EventHandlers::new(|value: i32, sink| {
        sink.emit(value);
        sink.close();
        sink.emit(value + 1000);
    }));

    // Act & Assert
    tx.send(7)?;
    assert_eq!(unwrap_value(handled.next().await), 7);
    assert!(handled.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn default_error_handler_forwards_errors_without_ending() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut handled = stream.handle_events(EventHandlers::forwarding());

    // Act & Assert
    tx.send(Event::Error(StreamError::processing("transient")))?;
    tx.send(Event::Value(5))?;

    assert!(unwrap_stream(&mut handled, 100).await.is_error());
    assert_eq!(unwrap_value(handled.next().await), 5);

    Ok(())
}
