//! # datebook
//!
//! A library for reading calendar dates written in many everyday notations, and for keeping a
//! small log of dated events that can be walked in several orders.
//!
//! ## Examples
//!
//! Read a date in whatever notation it comes in:
//!
//! ```
//! use datebook::prelude::*;
//!
//! let (date, format) = CalendarDate::parse_with_format("4-Jul-1826").unwrap();
//! assert_eq!(DateFormat::DayMonYear, format);
//! assert_eq!("18260704", date.to_string());
//! assert_eq!("JULY 4, 1826", date.format(DateFormat::MonthDayYear));
//!
//! let later: CalendarDate = "1826-7-14".parse().unwrap();
//! assert_eq!(10, later.days_since(&date));
//! ```
//!
//! Keep events and walk them in date order:
//!
//! ```
//! use datebook::prelude::*;
//!
//! let mut events = EventCollection::new();
//! events.insert("8 May 1945,Great Britain,VE Day".parse().unwrap()).unwrap();
//! events.insert("6/23/1912,Alan Turing,Birth".parse().unwrap()).unwrap();
//!
//! let descriptions: Vec<&str> = events
//!     .ordered(IterationMode::Date)
//!     .map(Event::description)
//!     .collect();
//! assert_eq!(vec!["Birth", "VE Day"], descriptions);
//! ```
//!
//! ## Date Formats
//!
//! Text is tried against each grammar in this order, and the first one that reads a valid date
//! wins. `y`, `m` and `d` are numerals of one or more digits, `Month` is a full month name and
//! `Mon` a three-letter abbreviation, both matched without regard to case.
//!
//! | Format | Example |
//! |---|---|
//! | `YYYYMMDD` | `19781225` |
//! | `yMMDD` | `1230401` |
//! | `Month d, y` | `December 25, 1978` |
//! | `d Month y` | `25 December 1978` |
//! | `m/d/y` | `12/25/1978` |
//! | `d-Mon-y` | `25-Dec-1978` |
//! | `y-m-d` | `1978-12-25` |
//!
//! Only years 1 through 9999 of the proleptic Gregorian calendar are supported.
//!
//! ## Prelude
//!
//! datebook provides a prelude module for convenience. Use it with:
//!
//! ```
//! use datebook::prelude::*;
//! ```
#![warn(missing_docs)]

pub mod calendar;
mod collection;
mod date;
mod error;
mod event;
mod format;
pub mod store;

pub use crate::collection::{EventCollection, IterationMode, Ordered};
pub use crate::date::CalendarDate;
pub use crate::error::{CollectionError, DateError, EventError, StoreError};
pub use crate::event::{Event, DELIMITER, REPLACEMENT};
pub use crate::format::DateFormat;

/// A convenience module appropriate for glob imports (`use datebook::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::CalendarDate;
    #[doc(no_inline)]
    pub use crate::CollectionError;
    #[doc(no_inline)]
    pub use crate::DateError;
    #[doc(no_inline)]
    pub use crate::DateFormat;
    #[doc(no_inline)]
    pub use crate::Event;
    #[doc(no_inline)]
    pub use crate::EventCollection;
    #[doc(no_inline)]
    pub use crate::EventError;
    #[doc(no_inline)]
    pub use crate::IterationMode;
    #[doc(no_inline)]
    pub use crate::StoreError;
}
