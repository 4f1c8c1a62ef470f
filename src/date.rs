use crate::{
    calendar::{self, MONTHS_IN_YEAR, MONTH_NAMES},
    error::DateError,
    format::DateFormat,
};
use chrono::{Datelike, Local, NaiveDate};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use tracing::{debug, trace};

/// A calendar date between January 1 of year 1 and December 31 of year 9999, with no time of
/// day or time zone.
///
/// A `CalendarDate` is always valid: the only ways to get one check the year, month and day
/// first. Dates are created from free-form text in any of the seven [`DateFormat`]s, or from
/// explicit numbers with [`CalendarDate::new`].
///
/// Ordering is chronological, so `<`, `>` and `==` work as expected.
///
/// # Examples
///
/// ```
/// use datebook::prelude::*;
///
/// let christmas: CalendarDate = "December 25, 1978".parse().unwrap();
/// assert_eq!((1978, 12, 25), (christmas.year(), christmas.month(), christmas.day()));
/// assert_eq!("19781225", christmas.to_string());
/// assert_eq!("25-DEC-1978", christmas.format(DateFormat::DayMonYear));
///
/// let new_year = CalendarDate::parse("1/1/1979").unwrap();
/// assert!(christmas < new_year);
/// assert_eq!(-7, christmas.days_since(&new_year));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    // field order matters: the derived ordering is (year, month, day)
    year: u32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// January 1 of year 1. Unparseable text becomes this date under
    /// [`CalendarDate::parse_or_default`].
    pub const DEFAULT: CalendarDate = CalendarDate {
        year: 1,
        month: 1,
        day: 1,
    };

    /// Returns a date from explicit year, month and day numbers, or
    /// [`DateError::InvalidDateArguments`] if they do not describe a date in years 1 to 9999.
    ///
    /// The signed year matches chrono's constructors. Use [`CalendarDate::from_ymd`] to go back
    /// from the unsigned [`year`](CalendarDate::year) accessor without a cast.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        Self::checked(i64::from(year), month, day)
    }

    /// Like [`CalendarDate::new`], but with the year unsigned as returned by
    /// [`year`](CalendarDate::year).
    ///
    /// ```
    /// use datebook::CalendarDate;
    ///
    /// let date = CalendarDate::parse("1978-12-25").unwrap();
    /// let first = CalendarDate::from_ymd(date.year(), date.month(), 1).unwrap();
    /// assert_eq!("19781201", first.to_string());
    /// ```
    pub fn from_ymd(year: u32, month: u32, day: u32) -> Result<Self, DateError> {
        Self::checked(i64::from(year), month, day)
    }

    fn checked(year: i64, month: u32, day: u32) -> Result<Self, DateError> {
        u32::try_from(year)
            .ok()
            .filter(|&year| calendar::is_valid_date(month, day, year))
            .map(|year| Self { year, month, day })
            .ok_or(DateError::InvalidDateArguments { year, month, day })
    }

    /// Parses free-form date text, trying each [`DateFormat`] in the order of
    /// [`DateFormat::ALL`]. The first format to produce a valid date wins, and is returned
    /// alongside it.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::UnparseableDate`] if no format recognizes the text.
    pub fn parse_with_format(text: &str) -> Result<(Self, DateFormat), DateError> {
        DateFormat::ALL
            .iter()
            .find_map(|format| format.recognize(text).map(|date| (date, *format)))
            .map(|(date, format)| {
                trace!(text, %format, "recognized date");
                (date, format)
            })
            .ok_or_else(|| DateError::UnparseableDate {
                text: text.to_owned(),
            })
    }

    /// Parses free-form date text. See [`CalendarDate::parse_with_format`].
    ///
    /// # Errors
    ///
    /// Returns [`DateError::UnparseableDate`] if no format recognizes the text.
    pub fn parse(text: &str) -> Result<Self, DateError> {
        Self::parse_with_format(text).map(|(date, _)| date)
    }

    /// Parses free-form date text, silently substituting [`CalendarDate::DEFAULT`] (January 1,
    /// year 1) when no format recognizes it.
    ///
    /// Use [`CalendarDate::parse`] unless you need this lenient behavior.
    ///
    /// ```
    /// use datebook::CalendarDate;
    ///
    /// assert_eq!(CalendarDate::DEFAULT, CalendarDate::parse_or_default("not a date"));
    /// ```
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            debug!(%err, "substituting default date");
            Self::DEFAULT
        })
    }

    /// Returns the current date in the system's local time zone.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDateArguments`] if the clock is set outside years 1 to 9999.
    pub fn today() -> Result<Self, DateError> {
        Self::try_from(Local::now().date_naive())
    }

    /// The year, from 1 to 9999.
    pub fn year(&self) -> u32 {
        self.year
    }

    /// The month, from 1 (January) to 12 (December).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The day of the month, from 1.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// The upper-case English name of the month, e.g. `"NOVEMBER"`.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month_index()].name
    }

    /// The three-letter upper-case abbreviation of the month, e.g. `"NOV"`.
    pub fn month_abbreviation(&self) -> &'static str {
        MONTH_NAMES[self.month_index()].abbreviation
    }

    fn month_index(&self) -> usize {
        self.month as usize - 1
    }

    /// Renders this date in `format`. See [`DateFormat::render`].
    pub fn format(&self, format: DateFormat) -> String {
        format.render(self)
    }

    /// The canonical `YYYYMMDD` form, zero-padded to eight digits. Same as [`ToString`].
    pub fn to_canonical(&self) -> String {
        DateFormat::YyyyMmDd.render(self)
    }

    /// Renders this date as `DD-MON-YYYY`, with the day zero-padded to two digits and the year to
    /// four, e.g. `"04-AUG-2010"`.
    pub fn to_padded_d_mon_y(&self) -> String {
        format!(
            "{:02}-{}-{:04}",
            self.day,
            self.month_abbreviation(),
            self.year
        )
    }

    /// Returns true if this date comes before `other`.
    pub fn is_earlier_than(&self, other: &CalendarDate) -> bool {
        self < other
    }

    /// Returns true if this date comes after `other`.
    pub fn is_later_than(&self, other: &CalendarDate) -> bool {
        self > other
    }

    /// Returns the number of days from `other` to this date.
    ///
    /// The magnitude is the number of single-day steps separating the two dates. The result is
    /// negative when this date is earlier than `other`, positive when it is later, and zero when
    /// they are equal.
    ///
    /// ```
    /// use datebook::CalendarDate;
    ///
    /// let later = CalendarDate::parse("2002-04-10").unwrap();
    /// let earlier = CalendarDate::parse("2001-03-31").unwrap();
    /// assert_eq!(375, later.days_since(&earlier));
    /// assert_eq!(-375, earlier.days_since(&later));
    /// ```
    pub fn days_since(&self, other: &CalendarDate) -> i64 {
        self.day_number() - other.day_number()
    }

    /// Returns the date one day after this one, or `None` for December 31, 9999.
    pub fn next_day(&self) -> Option<Self> {
        let Self { year, month, day } = *self;
        let next = if day < calendar::days_in_month(month, year) {
            Self {
                day: day + 1,
                ..*self
            }
        } else if month < MONTHS_IN_YEAR {
            Self {
                month: month + 1,
                day: 1,
                ..*self
            }
        } else {
            Self {
                year: year + 1,
                month: 1,
                day: 1,
            }
        };
        calendar::is_valid_date(next.month, next.day, next.year).then_some(next)
    }

    /// Ordinal day in the proleptic Gregorian calendar, with January 1 of year 1 as day 1.
    fn day_number(&self) -> i64 {
        calendar::days_before_year(self.year)
            + i64::from(calendar::days_before_month(self.month, self.year))
            + i64::from(self.day)
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Parses a date in any of the seven [`DateFormat`]s. See [`CalendarDate::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for CalendarDate {
    /// Writes the canonical `YYYYMMDD` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        // years 1..=9999 fit comfortably inside chrono's range
        match NaiveDate::from_ymd_opt(date.year as i32, date.month, date.day) {
            Some(naive) => naive,
            None => unreachable!("{date} should be representable as a NaiveDate"),
        }
    }
}
