// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-stop import for every operator extension trait.

pub use crate::buffer_when::BufferWhenExt;
pub use crate::combine_latest::CombineLatestExt;
pub use crate::combine_latest_all::CombineLatestAllExt;
pub use crate::distinct_when::DistinctWhenExt;
pub use crate::expand_concurrent::ExpandConcurrentExt;
pub use crate::expand_sequential::ExpandSequentialExt;
pub use crate::filter_async::FilterAsyncExt;
pub use crate::followed_by::FollowedByExt;
pub use crate::handle_events::{EventHandlers, HandleEventsExt};
pub use crate::map_batched::MapBatchedExt;
pub use crate::map_concurrent::MapConcurrentExt;
pub use crate::map_latest::MapLatestExt;
pub use crate::merge::MergeExt;
pub use crate::sample_when::SampleWhenExt;
pub use crate::scan_with::ScanWithExt;
pub use crate::share::ShareExt;
pub use crate::start_with::StartWithExt;
pub use crate::switch_latest::{SwitchLatestExt, SwitchMapExt};
pub use crate::take_until_signal::TakeUntilSignalExt;
pub use crate::tap::TapExt;
pub use crate::where_type::WhereTypeExt;

pub use rill_core::{Event, StreamError};
