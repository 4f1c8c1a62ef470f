//! Pure functions over `(month, day, year)` values: validity, month lengths, leap years, and
//! month-name lookups.
//!
//! None of these functions fail. Out-of-range inputs produce `false`, `0`, or `None`, and callers
//! are expected to check validity before relying on a computed value.

/// The smallest supported year.
pub const MIN_YEAR: u32 = 1;

/// The largest supported year.
pub const MAX_YEAR: u32 = 9999;

/// Number of months in a year.
pub const MONTHS_IN_YEAR: u32 = 12;

/// A month's full (upper-case) English name and its three-letter abbreviation.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MonthName {
    pub(crate) name: &'static str,
    pub(crate) abbreviation: &'static str,
}

/// Indexed by `month - 1`.
pub(crate) static MONTH_NAMES: [MonthName; MONTHS_IN_YEAR as usize] = [
    MonthName { name: "JANUARY", abbreviation: "JAN" },
    MonthName { name: "FEBRUARY", abbreviation: "FEB" },
    MonthName { name: "MARCH", abbreviation: "MAR" },
    MonthName { name: "APRIL", abbreviation: "APR" },
    MonthName { name: "MAY", abbreviation: "MAY" },
    MonthName { name: "JUNE", abbreviation: "JUN" },
    MonthName { name: "JULY", abbreviation: "JUL" },
    MonthName { name: "AUGUST", abbreviation: "AUG" },
    MonthName { name: "SEPTEMBER", abbreviation: "SEP" },
    MonthName { name: "OCTOBER", abbreviation: "OCT" },
    MonthName { name: "NOVEMBER", abbreviation: "NOV" },
    MonthName { name: "DECEMBER", abbreviation: "DEC" },
];

/// Days elapsed in a common year before the first of each month, indexed by month (slot 0 unused).
const CUMULATIVE_DAYS: [u32; 13] = [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Returns true if `month` is in `1..=12` and `year` is in `1..=9999`.
pub fn is_valid_month_year(month: u32, year: u32) -> bool {
    (1..=MONTHS_IN_YEAR).contains(&month) && (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Returns true if `month`, `day` and `year` describe a real calendar date in the supported range.
///
/// ```
/// use datebook::calendar::is_valid_date;
///
/// assert!(is_valid_date(2, 29, 2024));
/// assert!(!is_valid_date(2, 29, 2023));
/// assert!(!is_valid_date(4, 31, 2024));
/// ```
pub fn is_valid_date(month: u32, day: u32, year: u32) -> bool {
    is_valid_month_year(month, year) && (1..=days_in_month(month, year)).contains(&day)
}

/// Returns the number of days in the given month of the given year, or 0 if the month or year is
/// out of range.
pub fn days_in_month(month: u32, year: u32) -> u32 {
    if !is_valid_month_year(month, year) {
        return 0;
    }
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns true if `year` is a Gregorian leap year: divisible by 400, or divisible by 4 but not
/// by 100.
pub fn is_leap_year(year: u32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Days in `year` before the first day of `month`. Assumes a valid month.
pub(crate) fn days_before_month(month: u32, year: u32) -> u32 {
    let leap_day = u32::from(month > 2 && is_leap_year(year));
    CUMULATIVE_DAYS[month as usize] + leap_day
}

/// Days in all whole years before `year`.
pub(crate) fn days_before_year(year: u32) -> i64 {
    let y = i64::from(year) - 1;
    y * 365 + y / 4 - y / 100 + y / 400
}

fn month_name_entry(month: u32) -> Option<&'static MonthName> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index)
}

/// Returns the upper-case English name of `month` (e.g. `"NOVEMBER"` for 11).
pub fn month_name(month: u32) -> Option<&'static str> {
    month_name_entry(month).map(|entry| entry.name)
}

/// Returns the three-letter upper-case abbreviation of `month` (e.g. `"NOV"` for 11).
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    month_name_entry(month).map(|entry| entry.abbreviation)
}

/// Returns the month number whose full name matches `name`, ignoring ASCII case, or 0 if no month
/// has that name.
///
/// ```
/// use datebook::calendar::month_number_of_name;
///
/// assert_eq!(month_number_of_name("december"), 12);
/// assert_eq!(month_number_of_name("Dec"), 0);
/// ```
pub fn month_number_of_name(name: &str) -> u32 {
    month_number_by(|entry| entry.name.eq_ignore_ascii_case(name))
}

/// Returns the month number whose abbreviation matches `abbreviation`, ignoring ASCII case, or 0
/// if none does.
pub fn month_number_of_abbreviation(abbreviation: &str) -> u32 {
    month_number_by(|entry| entry.abbreviation.eq_ignore_ascii_case(abbreviation))
}

fn month_number_by(mut matches: impl FnMut(&MonthName) -> bool) -> u32 {
    MONTH_NAMES
        .iter()
        .zip(1..)
        .find_map(|(entry, number)| matches(entry).then_some(number))
        .unwrap_or(0)
}

/// Returns true if `name` is the full name of a month, ignoring ASCII case.
pub fn is_valid_month_name(name: &str) -> bool {
    month_number_of_name(name) != 0
}

/// Returns true if `abbreviation` is the three-letter abbreviation of a month, ignoring ASCII
/// case.
pub fn is_valid_month_abbreviation(abbreviation: &str) -> bool {
    month_number_of_abbreviation(abbreviation) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2000, true)]
    #[case(2004, true)]
    #[case(2400, true)]
    #[case(1900, false)]
    #[case(2100, false)]
    #[case(2023, false)]
    #[case(1, false)]
    #[case(4, true)]
    fn test_is_leap_year(#[case] year: u32, #[case] leap: bool) {
        assert_eq!(leap, is_leap_year(year));
    }

    #[test]
    fn test_february_agrees_with_leap_year() {
        for year in MIN_YEAR..=MAX_YEAR {
            let expected = if is_leap_year(year) { 29 } else { 28 };
            assert_eq!(expected, days_in_month(2, year), "year {year}");
        }
    }

    #[rstest]
    #[case(1, 31)]
    #[case(3, 31)]
    #[case(4, 30)]
    #[case(6, 30)]
    #[case(7, 31)]
    #[case(8, 31)]
    #[case(9, 30)]
    #[case(11, 30)]
    #[case(12, 31)]
    fn test_days_in_month(#[case] month: u32, #[case] days: u32) {
        assert_eq!(days, days_in_month(month, 2023));
    }

    #[rstest]
    #[case(0, 2023)]
    #[case(13, 2023)]
    #[case(1, 0)]
    #[case(1, 10000)]
    fn test_days_in_month_out_of_range(#[case] month: u32, #[case] year: u32) {
        assert_eq!(0, days_in_month(month, year));
        assert!(!is_valid_month_year(month, year));
    }

    #[rstest]
    #[case(1, 1, 1, true)]
    #[case(12, 31, 9999, true)]
    #[case(2, 29, 2000, true)]
    #[case(2, 29, 1900, false)]
    #[case(4, 31, 2023, false)]
    #[case(1, 0, 2023, false)]
    #[case(0, 1, 2023, false)]
    #[case(1, 1, 0, false)]
    #[case(1, 1, 10000, false)]
    fn test_is_valid_date(#[case] month: u32, #[case] day: u32, #[case] year: u32, #[case] valid: bool) {
        assert_eq!(valid, is_valid_date(month, day, year));
    }

    #[test]
    fn test_month_names_both_ways() {
        for month in 1..=MONTHS_IN_YEAR {
            let name = month_name(month).unwrap();
            let abbreviation = month_abbreviation(month).unwrap();
            assert_eq!(&name[..3], abbreviation);
            assert_eq!(month, month_number_of_name(name));
            assert_eq!(month, month_number_of_name(&name.to_lowercase()));
            assert_eq!(month, month_number_of_abbreviation(abbreviation));
            assert_eq!(month, month_number_of_abbreviation(&abbreviation.to_lowercase()));
        }
        assert_eq!(None, month_name(0));
        assert_eq!(None, month_abbreviation(13));
    }

    #[rstest]
    #[case("")]
    #[case("Decem")]
    #[case("Dece")]
    #[case("D")]
    #[case("DECEMBERS")]
    #[case(" DECEMBER")]
    #[case("JANUARY FEBRUARY")]
    fn test_unknown_month_names(#[case] text: &str) {
        assert_eq!(0, month_number_of_name(text));
        assert!(!is_valid_month_name(text));
    }

    #[rstest]
    #[case("Sept")]
    #[case("DE")]
    #[case("December")]
    #[case("")]
    fn test_unknown_month_abbreviations(#[case] text: &str) {
        assert_eq!(0, month_number_of_abbreviation(text));
        assert!(!is_valid_month_abbreviation(text));
    }

    #[test]
    fn test_days_before_month() {
        assert_eq!(0, days_before_month(1, 2023));
        assert_eq!(59, days_before_month(3, 2023));
        assert_eq!(60, days_before_month(3, 2024));
        assert_eq!(334, days_before_month(12, 2023));
        assert_eq!(335, days_before_month(12, 2024));
    }
}
