// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{IntoStreamError, ResultExt, StreamError};

#[derive(Debug, thiserror::Error)]
#[error("sensor offline: {id}")]
struct SensorError {
    id: u32,
}

#[test]
fn processing_error_carries_context() {
    let error = StreamError::processing("decoder stalled");
    assert_eq!(error.to_string(), "stream processing error: decoder stalled");
}

#[test]
fn user_error_wraps_source() {
    let error = StreamError::user_error(SensorError { id: 4 });
    assert_eq!(error.to_string(), "user callback error: sensor offline: 4");
    assert!(matches!(error, StreamError::User(_)));
}

#[test]
fn aggregate_counts_all_failures() {
    let errors = vec![SensorError { id: 1 }, SensorError { id: 2 }];
    let folded = StreamError::from_user_errors(errors);
    match folded {
        StreamError::Aggregate { count, errors } => {
            assert_eq!(count, 2);
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[test]
fn clone_degrades_user_errors_to_processing() {
    let error = StreamError::user_error(SensorError { id: 9 });
    let cloned = error.clone();
    assert!(matches!(cloned, StreamError::Processing { .. }));
    assert!(cloned.to_string().contains("sensor offline: 9"));
}

#[test]
fn into_stream_error_converts_arbitrary_errors() {
    let error = SensorError { id: 3 }.into_stream_error();
    assert!(matches!(error, StreamError::User(_)));
}

#[test]
fn context_rewraps_user_errors() {
    let result: Result<(), StreamError> = Err(StreamError::user_error(SensorError { id: 7 }));
    let with_context = result.context("while polling");
    let error = with_context.unwrap_err();
    assert!(error.to_string().contains("while polling"));
    assert!(error.to_string().contains("sensor offline: 7"));
}
