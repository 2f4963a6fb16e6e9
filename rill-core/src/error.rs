// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types shared across the rill workspace.
//!
//! Errors are in-band stream events, not terminal conditions: an operator
//! that receives or produces a [`StreamError`] forwards it downstream and
//! keeps processing subsequent events.

/// Root error type carried by [`Event::Error`](crate::Event::Error).
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// An operator-internal failure with a human-readable context.
    #[error("stream processing error: {context}")]
    Processing {
        /// Description of what went wrong.
        context: String,
    },

    /// A failure raised by a user-supplied callback (convert, predicate,
    /// combine). The operator forwards it and continues.
    #[error("user callback error: {0}")]
    User(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Several failures folded into one event.
    #[error("{count} errors occurred")]
    Aggregate {
        /// Number of aggregated errors.
        count: usize,
        /// The individual errors.
        errors: Vec<StreamError>,
    },
}

impl StreamError {
    /// Create a processing error with the given context.
    pub fn processing(context: impl Into<String>) -> Self {
        Self::Processing {
            context: context.into(),
        }
    }

    /// Wrap an error raised by user code.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::User(Box::new(error))
    }

    /// Fold a batch of user errors into a single `Aggregate` event.
    pub fn from_user_errors<E>(errors: Vec<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let count = errors.len();
        let errors = errors.into_iter().map(Self::user_error).collect();
        Self::Aggregate { count, errors }
    }
}

impl Clone for StreamError {
    fn clone(&self) -> Self {
        match self {
            Self::Processing { context } => Self::Processing {
                context: context.clone(),
            },
            // Boxed user errors are not clonable; degrade to their message
            Self::User(e) => Self::Processing {
                context: format!("user callback error: {e}"),
            },
            Self::Aggregate { count, errors } => Self::Aggregate {
                count: *count,
                errors: errors.clone(),
            },
        }
    }
}

/// Specialized `Result` for rill operations.
pub type Result<T> = std::result::Result<T, StreamError>;

/// Conversion of arbitrary errors into [`StreamError`].
pub trait IntoStreamError {
    /// Convert this error into a [`StreamError`].
    fn into_stream_error(self) -> StreamError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoStreamError for E {
    fn into_stream_error(self) -> StreamError {
        StreamError::user_error(self)
    }
}

/// Fluent context attachment for `Result`s.
pub trait ResultExt<T> {
    /// Replace the error with a `Processing` error carrying `context` and the
    /// original message.
    ///
    /// # Errors
    /// Returns `Err(StreamError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<StreamError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let context = context.into();
            match e.into() {
                StreamError::User(inner) => StreamError::Processing {
                    context: format!("{context}: {inner}"),
                },
                other => other,
            }
        })
    }
}
