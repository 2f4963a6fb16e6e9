// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::future::Future;
use tokio::task::JoinHandle;

/// A detached background task that is aborted when its handle is dropped.
///
/// Used by broadcast operators to drive the single upstream subscription
/// independently of subscriber lifetimes: dropping the owning handle cancels
/// the pump and thereby the upstream subscription.
pub struct PumpTask {
    handle: JoinHandle<()>,
}

impl PumpTask {
    /// Spawns `fut` onto the current tokio runtime.
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(fut),
        }
    }

    /// Returns `true` once the pump has run to completion or was aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PumpTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
