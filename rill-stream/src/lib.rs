// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Composable combinators over streams of [`Event`]s.
//!
//! Every operator consumes a `Stream<Item = Event<T>>` and produces another,
//! preserving three contracts throughout:
//!
//! - errors are in-band and non-terminal; operators forward them and keep
//!   running,
//! - the output ends at most once, and only after all pending work (timers,
//!   in-flight futures, queued inner streams) has settled,
//! - dropping the output cancels every upstream subscription, pending timer
//!   and queued resource it owns.
//!
//! Flow control is the pull protocol itself: a consumer that stops polling
//! pauses the whole chain, and operators awaiting async callbacks do not
//! poll their inputs, holding upstream flow until the work settles.

mod logging;

pub mod buffer_when;
pub mod combine_latest;
pub mod combine_latest_all;
pub mod distinct_when;
pub mod expand_concurrent;
pub mod expand_sequential;
pub mod filter_async;
pub mod followed_by;
pub mod handle_events;
pub mod map_batched;
pub mod map_concurrent;
pub mod map_latest;
pub mod merge;
pub mod prelude;
pub mod sample_when;
pub mod scan_with;
pub mod share;
pub mod start_with;
pub mod switch_latest;
pub mod take_until_signal;
pub mod tap;
pub mod trigger_aggregate;
pub mod where_type;

// Re-export commonly used types
pub use buffer_when::BufferWhenExt;
pub use combine_latest::{CombineLatest, CombineLatestExt};
pub use combine_latest_all::{CombineLatestAll, CombineLatestAllExt};
pub use distinct_when::DistinctWhenExt;
pub use expand_concurrent::{ExpandConcurrent, ExpandConcurrentExt};
pub use expand_sequential::{ExpandSequential, ExpandSequentialExt};
pub use filter_async::{FilterAsync, FilterAsyncExt};
pub use followed_by::FollowedByExt;
pub use handle_events::{EventHandlers, EventSink, HandleEventsExt, HandledStream};
pub use map_batched::{MapBatched, MapBatchedExt};
pub use map_concurrent::{MapConcurrent, MapConcurrentExt};
pub use map_latest::{MapLatest, MapLatestExt};
pub use merge::{Merge, MergeExt};
pub use rill_core::{Event, Result, StreamError};
pub use sample_when::SampleWhenExt;
pub use scan_with::{ScanWith, ScanWithExt};
pub use share::{Shared, ShareExt};
pub use start_with::StartWithExt;
pub use switch_latest::{SwitchLatest, SwitchLatestExt, SwitchMapExt};
pub use take_until_signal::{TakeUntilSignal, TakeUntilSignalExt};
pub use tap::TapExt;
pub use trigger_aggregate::{trigger_aggregate, TriggerAggregate};
pub use where_type::WhereTypeExt;
