// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-stop import for the timer operator extension traits.

pub use crate::audit::AuditExt;
pub use crate::debounce::DebounceExt;
pub use crate::throttle::ThrottleExt;

pub use rill_core::{Event, StreamError};
