// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
pub mod helpers;
pub mod test_data;

// Re-export commonly used test utilities
pub use helpers::{
    assert_no_element_emitted, collect_values, test_channel, test_channel_with_errors,
    trigger_channel, unwrap_stream, unwrap_value,
};
pub use test_data::Reading;
