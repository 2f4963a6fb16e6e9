// Copyright 2025 The rill authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::handle_events::{EventHandlers, HandleEventsExt, HandledStream};
use futures::Stream;
use rill_core::Event;

/// Extension trait providing the [`where_type`](WhereTypeExt::where_type)
/// operator.
pub trait WhereTypeExt<T>: Stream<Item = Event<T>> + Sized {
    /// Keeps only the values a projection recognizes, narrowing the stream to
    /// the projected type.
    ///
    /// The caller encodes the type test in `select`: return `Some(narrowed)`
    /// for values that belong to the target type, `None` for everything else.
    /// Errors pass through unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use futures::StreamExt;
    /// use rill_stream::WhereTypeExt;
    /// use rill_test_utils::test_channel;
    /// use rill_test_utils::test_data::{humidity, temperature, Reading};
    ///
    /// # async fn example() {
    /// let (tx, stream) = test_channel::<Reading>();
    /// let mut temperatures = stream.where_type(Reading::temperature);
    ///
    /// tx.send(temperature(21)).unwrap();
    /// tx.send(humidity(40)).unwrap();
    /// tx.send(temperature(22)).unwrap();
    ///
    /// assert_eq!(temperatures.next().await.unwrap().unwrap(), 21);
    /// assert_eq!(temperatures.next().await.unwrap().unwrap(), 22);
    /// # }
    /// ```
    fn where_type<U: 'static, F>(self, select: F) -> HandledStream<Self, T, U>
    where
        F: FnMut(T) -> Option<U> + Send + 'static;
}

impl<S, T> WhereTypeExt<T> for S
where
    S: Stream<Item = Event<T>> + Sized,
{
    fn where_type<U: 'static, F>(self, mut select: F) -> HandledStream<Self, T, U>
    where
        F: FnMut(T) -> Option<U> + Send + 'static,
    {
        self.handle_events(EventHandlers::new(move |value, sink| {
            if let Some(narrowed) = select(value) {
                sink.emit(narrowed);
            }
        }))
    }
}
