// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_stream::{ShareExt, TapExt};
use rill_test_utils::{test_channel, unwrap_stream, unwrap_value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn every_subscriber_sees_every_event() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let shared = stream.share();
    let mut first = shared.subscribe()?;
    let mut second = shared.subscribe()?;

    // Act & Assert
    tx.send(1)?;
    tx.send(2)?;

    assert_eq!(unwrap_stream(&mut first, 500).await.unwrap(), 1);
    assert_eq!(unwrap_stream(&mut first, 500).await.unwrap(), 2);
    assert_eq!(unwrap_stream(&mut second, 500).await.unwrap(), 1);
    assert_eq!(unwrap_stream(&mut second, 500).await.unwrap(), 2);

    Ok(())
}

#[tokio::test]
async fn upstream_operators_run_once_per_event() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invocations);
    let shared = stream
        .tap(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .share();

    let mut first = shared.subscribe()?;
    let mut second = shared.subscribe()?;

    // Act
    tx.send(1)?;
    tx.send(2)?;
    tx.send(3)?;

    // Assert: both subscribers drain everything, the tap ran once per event
    for expected in [1, 2, 3] {
        assert_eq!(unwrap_stream(&mut first, 500).await.unwrap(), expected);
        assert_eq!(unwrap_stream(&mut second, 500).await.unwrap(), expected);
    }
    assert_eq!(invocations.load(Ordering::SeqCst), 3);

    Ok(())
}

#[tokio::test]
async fn source_end_closes_every_subscriber() -> anyhow::Result<()> {
    // Arrange
    use futures::StreamExt;
    let (tx, stream) = test_channel::<i32>();
    let shared = stream.share();
    let mut subscriber = shared.subscribe()?;

    // Act
    tx.send(7)?;
    drop(tx);

    // Assert
    assert_eq!(unwrap_stream(&mut subscriber, 500).await.unwrap(), 7);
    assert!(subscriber.next().await.is_none());

    // The subject closes once the pump observes the source end
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(shared.is_closed());
    assert!(shared.subscribe().is_err());

    Ok(())
}

#[tokio::test]
async fn dropping_the_handle_cancels_the_upstream_pump() -> anyhow::Result<()> {
    // Arrange
    use futures::StreamExt;
    let (tx, stream) = test_channel::<i32>();
    let shared = stream.share();
    let mut subscriber = shared.subscribe()?;

    // Act
    drop(shared);

    // Assert: the subscriber ends and later sends go nowhere
    assert!(subscriber.next().await.is_none());
    let _ = tx.send(1);

    Ok(())
}
