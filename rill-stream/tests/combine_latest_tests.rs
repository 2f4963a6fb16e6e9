// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rill_core::{Event, StreamError};
use rill_stream::{CombineLatestAllExt, CombineLatestExt};
use rill_test_utils::{assert_no_element_emitted, test_channel, test_channel_with_errors, unwrap_value};
use std::time::Duration;

#[tokio::test]
async fn combines_latest_values_on_every_arrival() -> anyhow::Result<()> {
    // Arrange
    let (source_tx, source) = test_channel::<i32>();
    let (other_tx, other) = test_channel::<i32>();
    let mut combined = Box::pin(source.combine_latest(other, |a, b| a + b));

    // Act & Assert
    source_tx.send(1)?;
    assert_no_element_emitted(&mut combined, 10).await;

    other_tx.send(2)?;
    assert_eq!(unwrap_value(combined.next().await), 3);

    source_tx.send(3)?;
    assert_eq!(unwrap_value(combined.next().await), 5);

    source_tx.send(4)?;
    assert_eq!(unwrap_value(combined.next().await), 6);

    other_tx.send(5)?;
    assert_eq!(unwrap_value(combined.next().await), 9);

    drop(source_tx);
    drop(other_tx);
    assert!(combined.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn closes_immediately_when_an_input_ends_without_emitting() -> anyhow::Result<()> {
    // Arrange
    let (source_tx, source) = test_channel::<i32>();
    let (other_tx, other) = test_channel::<i32>();
    let mut combined = Box::pin(source.combine_latest(other, |a, b| a + b));

    // Act: the other side ends empty-handed
    source_tx.send(1)?;
    drop(other_tx);

    // Assert: no event can ever be produced
    assert!(combined.next().await.is_none());
    drop(source_tx);

    Ok(())
}

#[tokio::test]
async fn async_combining_holds_both_inputs() -> anyhow::Result<()> {
    // Arrange
    tokio::time::pause();

    let (source_tx, source) = test_channel::<i32>();
    let (other_tx, other) = test_channel::<i32>();
    let mut combined = Box::pin(source.combine_latest_async(other, |a, b| async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(a * b)
    }));

    // Act & Assert
    source_tx.send(6)?;
    other_tx.send(7)?;
    assert_eq!(unwrap_value(combined.next().await), 42);

    drop(source_tx);
    drop(other_tx);
    assert!(combined.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn combine_failures_become_error_events() -> anyhow::Result<()> {
    // Arrange
    let (source_tx, source) = test_channel::<i32>();
    let (other_tx, other) = test_channel::<i32>();
    let mut combined = Box::pin(source.combine_latest_async(other, |a, b| async move {
        if b == 0 {
            Err(StreamError::processing("division by zero"))
        } else {
            Ok(a / b)
        }
    }));

    // Act & Assert
    source_tx.send(10)?;
    other_tx.send(0)?;
    assert!(combined.next().await.unwrap().is_error());

    other_tx.send(2)?;
    assert_eq!(unwrap_value(combined.next().await), 5);

    Ok(())
}

#[tokio::test]
async fn upstream_errors_are_forwarded() -> anyhow::Result<()> {
    // Arrange
    let (source_tx, source) = test_channel_with_errors::<i32>();
    let (other_tx, other) = test_channel::<i32>();
    let mut combined = Box::pin(source.combine_latest(other, |a, b| a + b));

    // Act & Assert
    source_tx.send(Event::Error(StreamError::processing("bad sensor")))?;
    assert!(combined.next().await.unwrap().is_error());

    source_tx.send(Event::Value(1))?;
    other_tx.send(2)?;
    assert_eq!(unwrap_value(combined.next().await), 3);

    Ok(())
}

#[tokio::test]
async fn snapshot_combining_waits_for_every_input() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let (c_tx, c) = test_channel::<i32>();
    let mut combined = a.combine_latest_all(vec![b, c]);

    // Act & Assert
    a_tx.send(1)?;
    b_tx.send(2)?;
    assert_no_element_emitted(&mut combined, 10).await;

    c_tx.send(3)?;
    assert_eq!(unwrap_value(combined.next().await), vec![1, 2, 3]);

    b_tx.send(5)?;
    assert_eq!(unwrap_value(combined.next().await), vec![1, 5, 3]);

    drop(a_tx);
    drop(b_tx);
    drop(c_tx);
    assert!(combined.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn snapshot_combining_closes_when_any_input_ends_empty() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let mut combined = a.combine_latest_all(vec![b]);

    // Act
    a_tx.send(1)?;
    drop(b_tx);

    // Assert
    assert!(combined.next().await.is_none());
    drop(a_tx);

    Ok(())
}
