//! Report date parsing.
//!
//! Lab reports print dates day-first with `.`, `/` or `-` separators and
//! either two- or four-digit years. Birth dates are sometimes reduced to a
//! bare year ("1980 г.р."). Both forms render as `DD.MM.YYYY`; a bare year
//! renders as `00.00.YYYY`.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DAY_FIRST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})(?:\D|$)")
        .expect("Invalid date regex")
});

static BARE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)((?:19|20)\d{2})(?:\D|$)").expect("Invalid year regex"));

/// Two-digit years up to this value are read as 20xx, later ones as 19xx.
const TWO_DIGIT_YEAR_PIVOT: i32 = 30;

/// How much of a date was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    Year,
    Day,
}

/// A parsed report date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDate {
    Day(NaiveDate),
    Year(i32),
}

impl ReportDate {
    pub fn precision(&self) -> DatePrecision {
        match self {
            Self::Day(_) => DatePrecision::Day,
            Self::Year(_) => DatePrecision::Year,
        }
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%d.%m.%Y")),
            Self::Year(year) => write!(f, "00.00.{year:04}"),
        }
    }
}

fn expand_year(digits: &str) -> Option<i32> {
    let year: i32 = digits.parse().ok()?;
    if digits.len() == 4 {
        return Some(year);
    }
    Some(if year <= TWO_DIGIT_YEAR_PIVOT {
        2000 + year
    } else {
        1900 + year
    })
}

fn parse_day_first(text: &str) -> Option<NaiveDate> {
    DAY_FIRST_DATE.captures_iter(text).find_map(|caps| {
        let day = caps.get(1)?.as_str().parse().ok()?;
        let month = caps.get(2)?.as_str().parse().ok()?;
        let year = expand_year(caps.get(3)?.as_str())?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// First valid day-first date in `text`, else the first bare year.
pub fn parse_report_date(text: &str) -> Option<ReportDate> {
    if let Some(date) = parse_day_first(text) {
        return Some(ReportDate::Day(date));
    }
    BARE_YEAR
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .map(ReportDate::Year)
}

/// [`parse_report_date`] rendered as `DD.MM.YYYY` / `00.00.YYYY`.
pub fn normalize_date(text: &str) -> Option<String> {
    parse_report_date(text).map(|date| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_first_dates() {
        assert_eq!(normalize_date("12.03.1985").as_deref(), Some("12.03.1985"));
        assert_eq!(normalize_date("1/2/2024").as_deref(), Some("01.02.2024"));
        assert_eq!(normalize_date("07-11-1990 г.").as_deref(), Some("07.11.1990"));
    }

    #[test]
    fn two_digit_years_pivot() {
        assert_eq!(normalize_date("01.02.24").as_deref(), Some("01.02.2024"));
        assert_eq!(normalize_date("01.02.80").as_deref(), Some("01.02.1980"));
    }

    #[test]
    fn bare_year_fallback() {
        let date = parse_report_date("1980г.р.").unwrap();
        assert_eq!(date.precision(), DatePrecision::Year);
        assert_eq!(date.to_string(), "00.00.1980");
    }

    #[test]
    fn impossible_dates_fall_back_to_year() {
        assert_eq!(normalize_date("31.02.2020").as_deref(), Some("00.00.2020"));
    }

    #[test]
    fn no_date() {
        assert_eq!(normalize_date("Иванов"), None);
        assert_eq!(normalize_date("12345"), None);
    }
}
