// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{Event, StreamError};

#[test]
fn value_accessors() {
    let event = Event::Value(42);
    assert!(event.is_value());
    assert!(!event.is_error());
    assert_eq!(event.value(), Some(&42));
    assert_eq!(event.ok(), Some(42));
}

#[test]
fn error_accessors() {
    let event: Event<i32> = Event::Error(StreamError::processing("boom"));
    assert!(event.is_error());
    assert!(!event.is_value());
    assert!(event.clone().ok().is_none());
    assert!(event.err().is_some());
}

#[test]
fn map_transforms_values_and_forwards_errors() {
    let doubled = Event::Value(21).map(|v| v * 2);
    assert_eq!(doubled, Event::Value(42));

    let error: Event<i32> = Event::Error(StreamError::processing("boom"));
    let mapped = error.map(|v| v * 2);
    assert!(mapped.is_error());
}

#[test]
fn and_then_chains() {
    let event = Event::Value(10).and_then(|v| {
        if v > 5 {
            Event::Value(v + 1)
        } else {
            Event::Error(StreamError::processing("too small"))
        }
    });
    assert_eq!(event, Event::Value(11));

    let rejected = Event::Value(1).and_then(|_: i32| -> Event<i32> {
        Event::Error(StreamError::processing("too small"))
    });
    assert!(rejected.is_error());
}

#[test]
fn errors_are_never_equal() {
    let a: Event<i32> = Event::Error(StreamError::processing("same"));
    let b: Event<i32> = Event::Error(StreamError::processing("same"));
    assert_ne!(a, b);
}

#[test]
fn round_trips_through_result() {
    let ok: Event<i32> = Ok(7).into();
    assert_eq!(ok, Event::Value(7));

    let result: Result<i32, StreamError> = Event::Value(7).into();
    assert_eq!(result.unwrap(), 7);

    let err: Result<i32, StreamError> = Event::Error(StreamError::processing("x")).into();
    assert!(err.is_err());
}

#[test]
#[should_panic(expected = "called `Event::unwrap()` on an `Error` event")]
fn unwrap_panics_on_error() {
    let event: Event<i32> = Event::Error(StreamError::processing("boom"));
    event.unwrap();
}
