// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A small telemetry domain shared by operator tests.

/// A heterogeneous sensor reading, used where tests need a stream of mixed
/// variants (type-filtering, projection).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reading {
    /// Temperature in whole degrees Celsius.
    Temperature(i32),
    /// Relative humidity in percent.
    Humidity(u32),
    /// Free-form device status line.
    Status(String),
}

impl Reading {
    /// Projects out the temperature, if this is a temperature reading.
    pub fn temperature(self) -> Option<i32> {
        match self {
            Reading::Temperature(c) => Some(c),
            _ => None,
        }
    }

    /// Projects out the humidity, if this is a humidity reading.
    pub fn humidity(self) -> Option<u32> {
        match self {
            Reading::Humidity(p) => Some(p),
            _ => None,
        }
    }

    /// Projects out the status line, if this is a status reading.
    pub fn status(self) -> Option<String> {
        match self {
            Reading::Status(s) => Some(s),
            _ => None,
        }
    }
}

/// Convenience constructor for a temperature reading.
pub fn temperature(celsius: i32) -> Reading {
    Reading::Temperature(celsius)
}

/// Convenience constructor for a humidity reading.
pub fn humidity(percent: u32) -> Reading {
    Reading::Humidity(percent)
}

/// Convenience constructor for a status reading.
pub fn status(line: &str) -> Reading {
    Reading::Status(line.to_string())
}
