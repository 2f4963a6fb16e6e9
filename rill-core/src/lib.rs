// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Core building blocks shared by every rill crate: the [`Event`] item type
//! carried by all streams, the [`StreamError`] error model, the broadcast
//! [`Publisher`] and the [`PumpTask`] helper that drives detached pumps.

pub mod error;
pub mod event;
pub mod publisher;
pub mod task;

// Re-export commonly used types
pub use error::{IntoStreamError, Result, ResultExt, StreamError};
pub use event::Event;
pub use publisher::{PublishError, Publisher, SubscriberStream};
pub use task::PumpTask;
