// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::StreamError;

/// A single occurrence on a stream: a data value or an in-band error.
///
/// Every stream in this library yields `Event<T>` items. Errors travel
/// alongside values and are non-terminal; termination is expressed by the
/// stream itself ending (`poll_next` returning `None`), which happens at most
/// once.
#[derive(Debug, Clone)]
pub enum Event<T> {
    /// A data value.
    Value(T),
    /// An error forwarded from upstream or raised by a user callback.
    Error(StreamError),
}

impl<T: PartialEq> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Event::Value(a), Event::Value(b)) => a == b,
            // Errors are never equal
            _ => false,
        }
    }
}

impl<T> Event<T> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, Event::Value(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, Event::Error(_))
    }

    /// Converts into `Option<T>`, discarding errors.
    pub fn ok(self) -> Option<T> {
        match self {
            Event::Value(v) => Some(v),
            Event::Error(_) => None,
        }
    }

    /// Converts into `Option<StreamError>`, discarding values.
    pub fn err(self) -> Option<StreamError> {
        match self {
            Event::Value(_) => None,
            Event::Error(e) => Some(e),
        }
    }

    /// Maps the contained value, forwarding errors unchanged.
    pub fn map<U, F>(self, f: F) -> Event<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Event::Value(v) => Event::Value(f(v)),
            Event::Error(e) => Event::Error(e),
        }
    }

    /// Chains a fallible transformation, forwarding errors unchanged.
    pub fn and_then<U, F>(self, f: F) -> Event<U>
    where
        F: FnOnce(T) -> Event<U>,
    {
        match self {
            Event::Value(v) => f(v),
            Event::Error(e) => Event::Error(e),
        }
    }

    /// Returns a reference to the contained value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Event::Value(v) => Some(v),
            Event::Error(_) => None,
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the event is an `Error`.
    pub fn unwrap(self) -> T {
        match self {
            Event::Value(v) => v,
            Event::Error(e) => panic!("called `Event::unwrap()` on an `Error` event: {e:?}"),
        }
    }

    /// Returns the contained value, panicking with `msg` on an error event.
    ///
    /// # Panics
    ///
    /// Panics with the provided message if the event is an `Error`.
    pub fn expect(self, msg: &str) -> T {
        match self {
            Event::Value(v) => v,
            Event::Error(e) => panic!("{msg}: {e:?}"),
        }
    }
}

impl<T> From<std::result::Result<T, StreamError>> for Event<T> {
    fn from(result: std::result::Result<T, StreamError>) -> Self {
        match result {
            Ok(v) => Event::Value(v),
            Err(e) => Event::Error(e),
        }
    }
}

impl<T> From<Event<T>> for std::result::Result<T, StreamError> {
    fn from(event: Event<T>) -> Self {
        match event {
            Event::Value(v) => Ok(v),
            Event::Error(e) => Err(e),
        }
    }
}
