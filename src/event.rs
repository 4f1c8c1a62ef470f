use crate::{
    date::CalendarDate,
    error::{DateError, EventError},
};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// Separates the date, principal and description fields of a serialized [`Event`].
pub const DELIMITER: char = ',';

/// Written in place of every [`DELIMITER`] inside the principal and description of a serialized
/// [`Event`], and turned back into a [`DELIMITER`] when one is read.
pub const REPLACEMENT: char = '_';

/// Something that happened on a particular day and involved some particular principal (a person,
/// an organization, ...). Events are immutable.
///
/// # Serialization
///
/// An event is written as three fields joined by [`DELIMITER`]: the date in canonical `YYYYMMDD`
/// form, the principal, and the description. Delimiters inside the principal or description are
/// written as [`REPLACEMENT`], and every [`REPLACEMENT`] is read back as a [`DELIMITER`]. The
/// translation is lossy: text that contained a [`REPLACEMENT`] to begin with does not come back
/// unchanged.
///
/// ```
/// use datebook::prelude::*;
///
/// let event = Event::from_parts("6/23/1912", "Turing, Alan", "Birth").unwrap();
/// assert_eq!("19120623,Turing_ Alan,Birth", event.to_string());
///
/// let read_back: Event = "19120623,Turing_ Alan,Birth".parse().unwrap();
/// assert_eq!("Turing, Alan", read_back.principal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    date: CalendarDate,
    principal: String,
    description: String,
}

impl Event {
    /// Returns a new event.
    pub fn new(
        date: CalendarDate,
        principal: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            principal: principal.into(),
            description: description.into(),
        }
    }

    /// Returns a new event from three raw strings, as typed by a user. The date text is trimmed
    /// and may be in any supported date format.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::UnparseableDate`] if the date text is not recognized.
    pub fn from_parts(
        date_text: &str,
        principal: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DateError> {
        let date = CalendarDate::parse(date_text.trim())?;
        Ok(Self::new(date, principal, description))
    }

    /// The day the event happened.
    pub fn date(&self) -> &CalendarDate {
        &self.date
    }

    /// Who or what the event involved.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// What happened, e.g. `"Birth"`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Serializes this event like [`ToString`] does, but writes `replacement` in place of
    /// delimiters inside the principal and description.
    ///
    /// Only the default [`REPLACEMENT`] is translated back when the result is parsed.
    pub fn to_delimited_with(&self, replacement: char) -> String {
        let mut out = String::with_capacity(10 + self.principal.len() + self.description.len());
        out.push_str(&self.date.to_canonical());
        out.push(DELIMITER);
        out.extend(replace_delimiters(&self.principal, replacement));
        out.push(DELIMITER);
        out.extend(replace_delimiters(&self.description, replacement));
        out
    }
}

fn replace_delimiters(text: &str, replacement: char) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .map(move |c| if c == DELIMITER { replacement } else { c })
}

impl Display for Event {
    /// Writes the delimited form, using [`REPLACEMENT`] for delimiters inside the text fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_delimited_with(REPLACEMENT))
    }
}

impl FromStr for Event {
    type Err = EventError;

    /// Reads an event from its delimited form.
    ///
    /// The date field may be in any supported date format. If it is not recognized at all, the
    /// event gets [`CalendarDate::DEFAULT`] rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventFormat`] if the text does not split into exactly three
    /// fields.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(DELIMITER).collect();
        let &[date, principal, description] = fields.as_slice() else {
            return Err(EventError::InvalidEventFormat {
                text: s.to_owned(),
                fields: fields.len(),
            });
        };
        let restore = |text: &str| text.replace(REPLACEMENT, &DELIMITER.to_string());
        Ok(Self::new(
            CalendarDate::parse_or_default(date),
            restore(principal),
            restore(description),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn event(date: &str, principal: &str, description: &str) -> Event {
        Event::from_parts(date, principal, description).unwrap()
    }

    #[test]
    fn test_accessors() {
        let e = event(" 8 May 1945 ", "Great Britain", "VE Day");
        assert_eq!(&CalendarDate::new(1945, 5, 8).unwrap(), e.date());
        assert_eq!("Great Britain", e.principal());
        assert_eq!("VE Day", e.description());
    }

    #[test]
    fn test_from_parts_bad_date() {
        assert!(matches!(
            Event::from_parts("the fifth of November", "Guy Fawkes", "Plot"),
            Err(DateError::UnparseableDate { .. })
        ));
    }

    #[rstest]
    #[case(event("1967-1-15", "Green Bay Packers", "Superbowl I"), "19670115,Green Bay Packers,Superbowl I")]
    #[case(event("4-Jul-1826", "Thomas Jefferson", "Death"), "18260704,Thomas Jefferson,Death")]
    #[case(event("1/2/3", "", ""), "00030102,,")]
    fn test_display(#[case] e: Event, #[case] expected: &str) {
        assert_eq!(expected, e.to_string());
        assert_eq!(Ok(e), expected.parse::<Event>());
    }

    #[test]
    fn test_embedded_delimiter_is_replaced() {
        let e = event("1/1/2000", "Smith, Jr.", "born, raised");
        let serialized = e.to_string();
        assert_eq!("20000101,Smith_ Jr.,born_ raised", serialized);
        assert_eq!(3, serialized.split(DELIMITER).count());
    }

    #[test]
    fn test_replacement_is_lossy() {
        // an original underscore cannot be told apart from a replaced delimiter
        let e = event("1/1/2000", "snake_case, etc", "x");
        let serialized = e.to_string();
        assert_eq!("20000101,snake_case_ etc,x", serialized);
        let read_back: Event = serialized.parse().unwrap();
        assert_eq!("snake,case, etc", read_back.principal());
        assert_ne!(e, read_back);
    }

    #[test]
    fn test_custom_replacement_stays_substituted() {
        let e = event("1/1/2000", "Smith, Jr.", "Birth");
        let serialized = e.to_delimited_with(';');
        assert_eq!("20000101,Smith; Jr.,Birth", serialized);
        let read_back: Event = serialized.parse().unwrap();
        assert_eq!("Smith; Jr.", read_back.principal());
    }

    #[rstest]
    #[case("20000101,Smith", 2)]
    #[case("20000101", 1)]
    #[case("", 1)]
    #[case("20000101,Smith,Jr.,Birth", 4)]
    #[case("20000101,a,b,", 4)]
    fn test_invalid_format(#[case] text: &str, #[case] fields: usize) {
        assert_eq!(
            Err(EventError::InvalidEventFormat {
                text: text.to_owned(),
                fields
            }),
            text.parse::<Event>()
        );
    }

    #[test]
    fn test_any_date_format_is_read() {
        let e: Event = "8 May 1945,Great Britain,VE Day".parse().unwrap();
        assert_eq!("19450508", e.date().to_string());
    }

    #[test]
    fn test_unparseable_date_field_is_coerced() {
        let e: Event = "someday,Nobody,Nothing".parse().unwrap();
        assert_eq!(&CalendarDate::DEFAULT, e.date());
        assert_eq!("00010101,Nobody,Nothing", e.to_string());
    }
}
