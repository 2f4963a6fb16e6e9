// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::future::ready;
use futures::StreamExt;
use rill_core::{Event, StreamError};
use rill_stream::ScanWithExt;
use rill_test_utils::{collect_values, test_channel, test_channel_with_errors, unwrap_value};
use std::time::Duration;

#[tokio::test]
async fn emits_running_sums() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let scanned = stream.scan_with(0, |acc, value| ready(Ok(acc + value)));

    // Act
    for value in [1, 2, 3, 4] {
        tx.send(value)?;
    }
    drop(tx);

    // Assert
    assert_eq!(collect_values(scanned).await, vec![1, 3, 6, 10]);

    Ok(())
}

#[tokio::test]
async fn last_accumulation_equals_a_terminal_fold() -> anyhow::Result<()> {
    // Arrange
    let inputs = vec![5, 8, 13, 21];
    let (tx, stream) = test_channel::<i32>();
    let scanned = stream.scan_with(0, |acc, value| ready(Ok(acc + value)));

    // Act
    for value in &inputs {
        tx.send(*value)?;
    }
    drop(tx);

    // Assert
    let emitted = collect_values(scanned).await;
    let folded: i32 = inputs.iter().sum();
    assert_eq!(*emitted.last().unwrap(), folded);

    Ok(())
}

#[tokio::test]
async fn supports_async_combining_in_source_order() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let scanned = Box::pin(stream.scan_with(Vec::new(), |mut acc: Vec<i32>, value| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        acc.push(value);
        Ok(acc)
    }));

    // Act
    tx.send(1)?;
    tx.send(2)?;
    drop(tx);

    // Assert
    let emitted = collect_values(scanned).await;
    assert_eq!(emitted, vec![vec![1], vec![1, 2]]);

    Ok(())
}

#[tokio::test]
async fn failed_combine_keeps_the_previous_accumulator() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut scanned = stream.scan_with(0, |acc, value| {
        if value == 2 {
            ready(Err(StreamError::processing("rejected input")))
        } else {
            ready(Ok(acc + value))
        }
    });

    // Act & Assert
    tx.send(1)?;
    tx.send(2)?;
    tx.send(3)?;
    drop(tx);

    assert_eq!(unwrap_value(scanned.next().await), 1);
    assert!(scanned.next().await.unwrap().is_error());
    assert_eq!(unwrap_value(scanned.next().await), 4);
    assert!(scanned.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn upstream_errors_pass_through_without_touching_state() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<i32>();
    let mut scanned = stream.scan_with(10, |acc, value| ready(Ok(acc + value)));

    // Act & Assert
    tx.send(Event::Value(1))?;
    tx.send(Event::Error(StreamError::processing("glitch")))?;
    tx.send(Event::Value(2))?;
    drop(tx);

    assert_eq!(unwrap_value(scanned.next().await), 11);
    assert!(scanned.next().await.unwrap().is_error());
    assert_eq!(unwrap_value(scanned.next().await), 13);
    assert!(scanned.next().await.is_none());

    Ok(())
}
