// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rill_core::{Event, StreamError};
use rill_stream::{FilterAsyncExt, MapConcurrentExt};
use rill_test_utils::{collect_values, test_channel, test_channel_with_errors, unwrap_value};
use std::time::Duration;
use tokio::time::pause;

#[tokio::test]
async fn emits_results_in_completion_order() -> anyhow::Result<()> {
    // Arrange
    pause();

    let (tx, stream) = test_channel::<u64>();
    let converted = Box::pin(stream.map_concurrent(|value| async move {
        tokio::time::sleep(Duration::from_millis(value * 10)).await;
        Ok(value)
    }));

    // Act: slowest first
    tx.send(3)?;
    tx.send(2)?;
    tx.send(1)?;
    drop(tx);

    // Assert
    assert_eq!(collect_values(converted).await, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn stays_open_until_all_conversions_complete() -> anyhow::Result<()> {
    // Arrange
    pause();

    let (tx, stream) = test_channel::<u64>();
    let mut converted = Box::pin(stream.map_concurrent(|value| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(value * 2)
    }));

    // Act: the source closes while work is still pending
    tx.send(21)?;
    drop(tx);

    // Assert
    assert_eq!(unwrap_value(converted.next().await), 42);
    assert!(converted.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn conversion_failures_become_error_events() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut converted = Box::pin(stream.map_concurrent(|value| async move {
        if value < 0 {
            Err(StreamError::processing("negative input"))
        } else {
            Ok(value)
        }
    }));

    // Act & Assert
    tx.send(-1)?;
    assert!(converted.next().await.unwrap().is_error());

    tx.send(6)?;
    assert_eq!(unwrap_value(converted.next().await), 6);

    drop(tx);
    assert!(converted.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn upstream_errors_are_forwarded_in_arrival_order() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut converted = Box::pin(stream.map_concurrent(|value| async move { Ok(value) }));

    // Act & Assert
    tx.send(Event::Error(StreamError::processing("upstream")))?;
    tx.send(Event::Value(1))?;

    assert!(converted.next().await.unwrap().is_error());
    assert_eq!(unwrap_value(converted.next().await), 1);

    Ok(())
}

#[tokio::test]
async fn async_filter_forwards_passing_values() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let filtered = Box::pin(stream.filter_async(|value| {
        let even = value % 2 == 0;
        async move { Ok(even) }
    }));

    // Act
    for value in [1, 2, 3, 4, 5, 6] {
        tx.send(value)?;
    }
    drop(tx);

    // Assert
    assert_eq!(collect_values(filtered).await, vec![2, 4, 6]);

    Ok(())
}

#[tokio::test]
async fn async_filter_failures_drop_the_value_under_test() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut filtered = Box::pin(stream.filter_async(|value| {
        let result = if *value == 13 {
            Err(StreamError::processing("cannot judge 13"))
        } else {
            Ok(true)
        };
        async move { result }
    }));

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(filtered.next().await), 1);

    tx.send(13)?;
    assert!(filtered.next().await.unwrap().is_error());

    tx.send(2)?;
    assert_eq!(unwrap_value(filtered.next().await), 2);

    drop(tx);
    assert!(filtered.next().await.is_none());

    Ok(())
}
