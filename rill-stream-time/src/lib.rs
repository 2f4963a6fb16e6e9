// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Timer-driven rate limiting for streams of [`Event`](rill_core::Event)s.
//!
//! All operators here run on one-shot [`tokio::time::Sleep`] timers, created
//! lazily when a period or burst opens and dropped on the state transitions
//! that discard them. Errors pass through every operator immediately; only
//! data events are rate limited. A pending timer that can still produce
//! output keeps the stream open past the source's end.
//!
//! Timers respect `tokio::time::pause`/`advance`, so all of this is testable
//! under virtual time.

pub mod audit;
pub mod debounce;
pub mod prelude;
pub mod throttle;

// Re-export commonly used types
pub use audit::{Audit, AuditExt};
pub use debounce::{Debounce, DebounceExt};
pub use rill_core::{Event, StreamError};
pub use throttle::{Throttle, ThrottleExt};
