// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! # rill
//!
//! Composable asynchronous stream combinators over an explicit event model.
//!
//! Streams carry [`Event`] items: data values interleaved with non-terminal
//! errors, terminated by the stream ending at most once. Operators cover
//! rate limiting ([`throttle`](rill_stream_time::ThrottleExt::throttle),
//! [`audit`](rill_stream_time::AuditExt::audit),
//! [`debounce`](rill_stream_time::DebounceExt::debounce)), accumulation,
//! async mapping, fan-in, stream-of-stream flattening, concatenation and
//! broadcast sharing.
//!
//! ## Quick start
//!
//! ```rust
//! use futures::StreamExt;
//! use rill_rx::prelude::*;
//! use rill_rx::UnboundedReceiverExt;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<i32>();
//!     let mut doubled = rx
//!         .into_event_stream()
//!         .where_type(|v: i32| Some(v * 2));
//!
//!     tx.send(21).unwrap();
//!     assert_eq!(doubled.next().await.unwrap().unwrap(), 42);
//! }
//! ```

pub mod channel_ext;

// Re-export core types
pub use rill_core::{Event, PublishError, Publisher, Result, StreamError};

// Re-export the operator surface
pub use channel_ext::{ReceiverExt, UnboundedReceiverExt};
pub use rill_stream::{EventHandlers, EventSink, Shared};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::channel_ext::{ReceiverExt, UnboundedReceiverExt};
    pub use rill_core::{Event, Publisher, StreamError};
    pub use rill_stream::prelude::*;
    pub use rill_stream_time::prelude::*;
}
