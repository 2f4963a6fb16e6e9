// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream;
use futures::StreamExt;
use rill_core::{Event, StreamError};
use rill_stream::{FollowedByExt, StartWithExt, TakeUntilSignalExt};
use rill_test_utils::{assert_no_element_emitted, collect_values, test_channel, unwrap_value};
use tokio::sync::oneshot;

fn finite(values: Vec<i32>) -> impl futures::Stream<Item = Event<i32>> + Send + Unpin {
    stream::iter(values.into_iter().map(Event::Value))
}

#[tokio::test]
async fn continues_with_the_next_stream() -> anyhow::Result<()> {
    // Arrange
    let (tx, first) = test_channel::<i32>();
    let mut chained = first.followed_by(finite(vec![3, 4]));

    // Act & Assert
    tx.send(1)?;
    tx.send(2)?;
    assert_eq!(unwrap_value(chained.next().await), 1);
    assert_eq!(unwrap_value(chained.next().await), 2);

    // The second stream only starts once the first has ended
    assert_no_element_emitted(&mut chained, 10).await;

    drop(tx);
    assert_eq!(unwrap_value(chained.next().await), 3);
    assert_eq!(unwrap_value(chained.next().await), 4);
    assert!(chained.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn empty_continuation_is_the_identity() -> anyhow::Result<()> {
    // Arrange & Act
    let followed = finite(vec![1, 2, 3]).followed_by(finite(vec![]));
    let preceded = finite(vec![]).followed_by(finite(vec![1, 2, 3]));

    // Assert
    assert_eq!(collect_values(followed).await, vec![1, 2, 3]);
    assert_eq!(collect_values(preceded).await, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn prefixes_a_single_value() -> anyhow::Result<()> {
    // Arrange & Act
    let prefixed = finite(vec![2, 3]).start_with(1);

    // Assert
    assert_eq!(collect_values(prefixed).await, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn skipping_the_prefix_restores_the_source() -> anyhow::Result<()> {
    // Arrange & Act
    let restored = finite(vec![5, 6]).start_with(99).skip(1);

    // Assert
    assert_eq!(collect_values(restored).await, vec![5, 6]);

    Ok(())
}

#[tokio::test]
async fn prefixes_many_values_in_order() -> anyhow::Result<()> {
    // Arrange & Act
    let prefixed = finite(vec![4]).start_with_many(vec![1, 2, 3]);

    // Assert
    assert_eq!(collect_values(prefixed).await, vec![1, 2, 3, 4]);

    Ok(())
}

#[tokio::test]
async fn prefixes_a_whole_stream() -> anyhow::Result<()> {
    // Arrange & Act
    let prefixed = finite(vec![3, 4]).start_with_stream(finite(vec![1, 2]));

    // Assert
    assert_eq!(collect_values(prefixed).await, vec![1, 2, 3, 4]);

    Ok(())
}

#[tokio::test]
async fn forwards_until_the_signal_completes() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<i32>();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut truncated = source.take_until_signal(stop_rx);

    // Act & Assert
    tx.send(1)?;
    assert_eq!(unwrap_value(truncated.next().await), 1);

    stop_tx.send(()).unwrap();
    tx.send(2)?;
    assert!(truncated.next().await.is_none());

    // Ends exactly once
    assert!(truncated.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn source_ending_first_ends_the_output() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<i32>();
    let (_stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut truncated = source.take_until_signal(stop_rx);

    // Act
    tx.send(1)?;
    drop(tx);

    // Assert
    assert_eq!(unwrap_value(truncated.next().await), 1);
    assert!(truncated.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn errors_flow_until_truncation() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = rill_test_utils::test_channel_with_errors::<i32>();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut truncated = source.take_until_signal(stop_rx);

    // Act & Assert
    tx.send(Event::Error(StreamError::processing("upstream glitch")))?;
    assert!(truncated.next().await.unwrap().is_error());

    stop_tx.send(()).unwrap();
    assert!(truncated.next().await.is_none());

    Ok(())
}
