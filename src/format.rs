use crate::{calendar, date::CalendarDate};
use core::fmt::{self, Display};

const SPACE: char = ' ';
const COMMA: char = ',';
const SLASH: char = '/';
const DASH: char = '-';

/// One of the seven textual date grammars.
///
/// In the table below, `y`, `m` and `d` are numerals of one or more digits (leading zeros
/// allowed), each `Y`, `M` and `D` is exactly one digit, `Month` is a full month name and `Mon` a
/// three-letter month abbreviation. Month names are matched without regard to case.
///
/// | Variant               | Form          | Example             |
/// |-----------------------|---------------|---------------------|
/// | [`YyyyMmDd`]          | `YYYYMMDD`    | `19781225`          |
/// | [`YMmDd`]             | `yMMDD`       | `1230401`           |
/// | [`MonthDayYear`]      | `Month d, y`  | `December 25, 1978` |
/// | [`DayMonthYear`]      | `d Month y`   | `25 December 1978`  |
/// | [`SlashedMonthFirst`] | `m/d/y`       | `12/25/1978`        |
/// | [`DayMonYear`]        | `d-Mon-y`     | `25-Dec-1978`       |
/// | [`DashedYearFirst`]   | `y-m-d`       | `1978-12-25`        |
///
/// [`YyyyMmDd`]: DateFormat::YyyyMmDd
/// [`YMmDd`]: DateFormat::YMmDd
/// [`MonthDayYear`]: DateFormat::MonthDayYear
/// [`DayMonthYear`]: DateFormat::DayMonthYear
/// [`SlashedMonthFirst`]: DateFormat::SlashedMonthFirst
/// [`DayMonYear`]: DateFormat::DayMonYear
/// [`DashedYearFirst`]: DateFormat::DashedYearFirst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// Exactly eight digits, split 4/2/2. This is also the canonical form.
    YyyyMmDd,
    /// Five or more digits. The last four are the month and day, everything before is the year.
    YMmDd,
    /// `<Month> <d>, <y>`. The text after the comma is trimmed.
    MonthDayYear,
    /// `<d> <Month> <y>`, split on the first and last space.
    DayMonthYear,
    /// `<m>/<d>/<y>`, split on the first and last slash.
    SlashedMonthFirst,
    /// `<d>-<Mon>-<y>`, split on the first and last dash.
    DayMonYear,
    /// `<y>-<m>-<d>`, split on the first and last dash.
    DashedYearFirst,
}

impl DateFormat {
    /// Every format, in the order they are tried when a date is parsed from free-form text.
    pub const ALL: [DateFormat; 7] = [
        DateFormat::YyyyMmDd,
        DateFormat::YMmDd,
        DateFormat::MonthDayYear,
        DateFormat::DayMonthYear,
        DateFormat::SlashedMonthFirst,
        DateFormat::DayMonYear,
        DateFormat::DashedYearFirst,
    ];

    /// Short identifier of the grammar, e.g. `"Month_d_y"`.
    pub fn name(&self) -> &'static str {
        match self {
            DateFormat::YyyyMmDd => "YYYYMMDD",
            DateFormat::YMmDd => "yMMDD",
            DateFormat::MonthDayYear => "Month_d_y",
            DateFormat::DayMonthYear => "d_Month_y",
            DateFormat::SlashedMonthFirst => "m_d_y",
            DateFormat::DayMonYear => "d_Mon_y",
            DateFormat::DashedYearFirst => "y_m_d",
        }
    }

    /// Parses `text` in this format and returns the date in canonical `YYYYMMDD` form, or `None`
    /// if the text is not in this format or does not describe a valid date.
    ///
    /// ```
    /// use datebook::DateFormat;
    ///
    /// assert_eq!(Some("19620413".to_string()), DateFormat::MonthDayYear.parse("April 13, 1962"));
    /// assert_eq!(Some("08960308".to_string()), DateFormat::DayMonthYear.parse("8 March 896"));
    /// assert_eq!(None, DateFormat::YyyyMmDd.parse("12340230")); // no February 30th
    /// ```
    pub fn parse(self, text: &str) -> Option<String> {
        self.recognize(text).map(|date| date.to_canonical())
    }

    /// Like [`DateFormat::parse`], but returns the date itself.
    pub(crate) fn recognize(self, text: &str) -> Option<CalendarDate> {
        let (year, month, day) = self.extract(text)?;
        CalendarDate::from_ymd(year, month, day).ok()
    }

    /// Syntactic step: pulls `(year, month, day)` numbers out of `text` without checking that
    /// they make a real date.
    fn extract(self, text: &str) -> Option<(u32, u32, u32)> {
        match self {
            DateFormat::YyyyMmDd => {
                if text.len() != 8 || !all_digits(text) {
                    return None;
                }
                Some((numeral(&text[..4])?, numeral(&text[4..6])?, numeral(&text[6..])?))
            }
            DateFormat::YMmDd => {
                if text.len() < 5 || !all_digits(text) {
                    return None;
                }
                let (year, month_day) = text.split_at(text.len() - 4);
                Some((numeral(year)?, numeral(&month_day[..2])?, numeral(&month_day[2..])?))
            }
            DateFormat::MonthDayYear => {
                let space = text.find(SPACE)?;
                let comma = text.find(COMMA)?;
                if space > comma {
                    return None;
                }
                let month = month_of_name(&text[..space])?;
                let day = numeral(&text[space + 1..comma])?;
                let year = numeral(text[comma + 1..].trim())?;
                Some((year, month, day))
            }
            DateFormat::DayMonthYear => {
                let (day, month, year) = split_first_last(text, SPACE)?;
                Some((numeral(year)?, month_of_name(month)?, numeral(day)?))
            }
            DateFormat::SlashedMonthFirst => {
                let (month, day, year) = split_first_last(text, SLASH)?;
                Some((numeral(year)?, numeral(month)?, numeral(day)?))
            }
            DateFormat::DayMonYear => {
                let (day, month, year) = split_first_last(text, DASH)?;
                Some((numeral(year)?, month_of_abbreviation(month)?, numeral(day)?))
            }
            DateFormat::DashedYearFirst => {
                let (year, month, day) = split_first_last(text, DASH)?;
                Some((numeral(year)?, numeral(month)?, numeral(day)?))
            }
        }
    }

    /// Renders `date` in this format. Numerals other than those in the two digit-only formats are
    /// written without padding, and month names in upper case.
    ///
    /// ```
    /// use datebook::{CalendarDate, DateFormat};
    ///
    /// let date = CalendarDate::new(123, 4, 1).unwrap();
    /// assert_eq!("01230401", DateFormat::YyyyMmDd.render(&date));
    /// assert_eq!("1230401", DateFormat::YMmDd.render(&date));
    /// assert_eq!("APRIL 1, 123", DateFormat::MonthDayYear.render(&date));
    /// assert_eq!("1-APR-123", DateFormat::DayMonYear.render(&date));
    /// ```
    pub fn render(self, date: &CalendarDate) -> String {
        let (year, month, day) = (date.year(), date.month(), date.day());
        match self {
            DateFormat::YyyyMmDd => format!("{year:04}{month:02}{day:02}"),
            DateFormat::YMmDd => format!("{year}{month:02}{day:02}"),
            DateFormat::MonthDayYear => format!("{} {day}, {year}", date.month_name()),
            DateFormat::DayMonthYear => format!("{day} {} {year}", date.month_name()),
            DateFormat::SlashedMonthFirst => format!("{month}/{day}/{year}"),
            DateFormat::DayMonYear => format!("{day}-{}-{year}", date.month_abbreviation()),
            DateFormat::DashedYearFirst => format!("{year}-{month}-{day}"),
        }
    }
}

impl Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// A non-empty run of ASCII digits, as a number. Runs too large for a `u32` are rejected too,
/// which is fine since no valid year, month or day gets anywhere near that.
fn numeral(text: &str) -> Option<u32> {
    if text.is_empty() || !all_digits(text) {
        return None;
    }
    text.parse().ok()
}

fn month_of_name(text: &str) -> Option<u32> {
    match calendar::month_number_of_name(text) {
        0 => None,
        month => Some(month),
    }
}

fn month_of_abbreviation(text: &str) -> Option<u32> {
    match calendar::month_number_of_abbreviation(text) {
        0 => None,
        month => Some(month),
    }
}

/// Splits `text` around the first and the last occurrence of `separator`. The middle part may
/// itself contain the separator. Returns `None` unless the separator occurs at least twice.
fn split_first_last(text: &str, separator: char) -> Option<(&str, &str, &str)> {
    let first = text.find(separator)?;
    let last = text.rfind(separator)?;
    if first == last {
        return None;
    }
    let width = separator.len_utf8();
    Some((&text[..first], &text[first + width..last], &text[last + width..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("19620413", Some("19620413"))]
    #[case("18561207", Some("18561207"))]
    #[case("01230401", Some("01230401"))]
    #[case("12340230", None)] // no February 30th
    #[case("00001225", None)] // no year 0
    #[case("1978122", None)] // too short
    #[case("197812255", None)] // too long
    #[case("1978-225", None)]
    #[case("+9781225", None)]
    #[case("1978 225", None)]
    fn test_yyyymmdd(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected.map(String::from), DateFormat::YyyyMmDd.parse(text));
    }

    #[rstest]
    #[case("19781105", Some("19781105"))]
    #[case("5470317", Some("05470317"))]
    #[case("10101", Some("00010101"))]
    #[case("00000019781105", Some("19781105"))] // leading zeros on the year
    #[case("1231", None)] // no digits left for the year
    #[case("99991231", Some("99991231"))]
    #[case("100001231", None)] // year out of range
    #[case("123456789012345678901225", None)] // year overflows
    #[case("2023a1225", None)]
    #[case("20231325", None)]
    fn test_ymmdd(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected.map(String::from), DateFormat::YMmDd.parse(text));
    }

    #[rstest]
    #[case("April 13, 1962", Some("19620413"))]
    #[case("December 7,1856", Some("18561207"))]
    #[case("June 06,1942", Some("19420606"))]
    #[case("april 01, 123", Some("01230401"))]
    #[case("DECEMBER 25,   1978  ", Some("19781225"))]
    #[case("February 29, 2023", None)]
    #[case("Feb 28, 2023", None)] // abbreviation is not a full name
    #[case("April 13 1962", None)] // comma required
    #[case("April,13 1962", None)] // comma before space
    #[case("April 13,", None)]
    #[case("April  13, 1962", None)] // day field would be " 13"
    #[case("April -13, 1962", None)]
    fn test_month_d_y(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected.map(String::from), DateFormat::MonthDayYear.parse(text));
    }

    #[rstest]
    #[case("15 April 2013", Some("20130415"))]
    #[case("8 March 896", Some("08960308"))]
    #[case("06 june 1942", Some("19420606"))]
    #[case("5 November 10213", None)]
    #[case("5 November", None)]
    #[case("5 Nov 2013", None)]
    #[case("5  November 2013", None)] // month field would be " November"
    #[case("31 April 2013", None)]
    fn test_d_month_y(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected.map(String::from), DateFormat::DayMonthYear.parse(text));
    }

    #[rstest]
    #[case("04/15/2013", Some("20130415"))]
    #[case("4/8/896", Some("08960408"))]
    #[case("11/5/213", Some("02131105"))]
    #[case("2/29/2000", Some("20000229"))]
    #[case("2/29/1900", None)]
    #[case("13/1/2000", None)]
    #[case("1/2/3/4", None)] // middle field would be "2/3"
    #[case("1/2", None)]
    #[case("/1/2000", None)]
    fn test_m_d_y(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected.map(String::from), DateFormat::SlashedMonthFirst.parse(text));
    }

    #[rstest]
    #[case("13-Apr-1962", Some("19620413"))]
    #[case("7-Dec-1856", Some("18561207"))]
    #[case("04-JUL-1776", Some("17760704"))]
    #[case("4-jul-1776", Some("17760704"))]
    #[case("4-July-1776", None)]
    #[case("4-Ju-1776", None)]
    #[case("1776-07-04", None)]
    #[case("32-Jan-2000", None)]
    fn test_d_mon_y(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected.map(String::from), DateFormat::DayMonYear.parse(text));
    }

    #[rstest]
    #[case("1978-11-05", Some("19781105"))]
    #[case("2013-3-7", Some("20130307"))]
    #[case("123-04-01", Some("01230401"))]
    #[case("0001-1-1", Some("00010101"))]
    #[case("2013-3", None)]
    #[case("2013--3-7", None)] // middle field would be "-3"
    #[case("2013-3-7 ", None)]
    #[case("4-Jul-1776", None)]
    #[case("2013-02-29", None)]
    fn test_y_m_d(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected.map(String::from), DateFormat::DashedYearFirst.parse(text));
    }

    /// Non-ASCII text must be rejected without slicing inside a character.
    #[rstest]
    fn test_non_ascii_rejected(#[values("１９７８１２２５", "1978年1225", "ü1978122", "25 Déc 1978", "25-Déc-1978")] text: &str) {
        for format in DateFormat::ALL {
            assert_eq!(None, format.parse(text), "{format} accepted {text:?}");
        }
    }

    #[test]
    fn test_each_format_reads_its_own_rendering() {
        let dates = [(1, 1, 1), (123, 4, 1), (1978, 12, 25), (2000, 2, 29), (9999, 12, 31)];
        for (year, month, day) in dates {
            let date = CalendarDate::new(year, month, day).unwrap();
            for format in DateFormat::ALL {
                let rendered = format.render(&date);
                assert_eq!(
                    Some(date.to_canonical()),
                    format.parse(&rendered),
                    "{format} could not read back {rendered:?}"
                );
            }
        }
    }

    #[test]
    fn test_names() {
        let names: Vec<String> = DateFormat::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            vec!["YYYYMMDD", "yMMDD", "Month_d_y", "d_Month_y", "m_d_y", "d_Mon_y", "y_m_d"],
            names
        );
    }
}
