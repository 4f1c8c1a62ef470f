use std::io;

/// Errors that can occur when building a [`CalendarDate`](crate::CalendarDate).
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum DateError {
    /// None of the seven date grammars recognized the text.
    #[error("Date text `{text}` does not match any supported date format")]
    UnparseableDate {
        /// The text that was given.
        text: String,
    },

    /// Explicit year, month and day values do not make a valid date between years 1 and 9999.
    #[error("Explicit year ({year}), month ({month}), and day ({day}) arguments cannot be made into a valid date")]
    InvalidDateArguments {
        /// The year given.
        year: i64,
        /// The month given.
        month: u32,
        /// The day given.
        day: u32,
    },
}

/// Errors that can occur when reading an [`Event`](crate::Event) back from its delimited form.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum EventError {
    /// The text did not split into exactly three delimited fields.
    #[error("Event text `{text}` should have exactly 3 delimited fields, found {fields}")]
    InvalidEventFormat {
        /// The text that was given.
        text: String,
        /// The number of fields it split into.
        fields: usize,
    },
}

/// Errors raised by an [`EventCollection`](crate::EventCollection).
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum CollectionError {
    /// An insert was attempted when the collection already held `capacity` events.
    #[error("Event collection is already full (capacity {capacity})")]
    CollectionFull {
        /// The fixed capacity of the collection.
        capacity: usize,
    },

    /// A value could not be turned into one of the four iteration modes.
    #[error("Unknown iteration mode `{mode}`, expected one of 1 (insertion), 2 (date), 3 (principal), 4 (description)")]
    InvalidIterationMode {
        /// The rejected value, as written.
        mode: String,
    },

    /// `next_event` was called with no iteration in progress (never reset, or an insert happened
    /// since the last reset).
    #[error("No iteration is in progress; reset the collection first")]
    IterationInactive,

    /// `next_event` was called after every event had already been returned.
    #[error("Iteration is exhausted; every event has been returned")]
    IteratorExhausted,
}

/// Errors from loading or saving an event file.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Reading or writing failed.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// A line could not be read as an event.
    #[error("Line {line}: {source}")]
    Event {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        source: EventError,
    },

    /// The event on a line could not be inserted.
    #[error("Line {line}: {source}")]
    Collection {
        /// 1-based line number.
        line: usize,
        /// Why the insert failed.
        source: CollectionError,
    },
}
