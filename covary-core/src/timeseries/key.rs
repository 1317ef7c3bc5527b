//! Canonical time keys and lookback ranges.
//!
//! A time key is a fixed-length digit string, `YYYYMM` (monthly) or
//! `YYYYMMDD` (daily), whose lexicographic order equals chronological
//! order. All range helpers anchor on the *last full month* so that an
//! in-progress month never leaks into a series.
//!
//! None of these functions clamp `months_back`; callers are responsible for
//! keeping it inside `MIN_MONTHS_BACK..=MAX_MONTHS_BACK` before calling.

use chrono::{Datelike, Months, NaiveDate};

use crate::types::Granularity;

/// Rendered key bounds of a lookback window, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    /// First key of the window.
    pub start: String,
    /// Last key of the window.
    pub end: String,
}

/// Calendar-date bounds of a lookback window, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window (last day of the last full month).
    pub end: NaiveDate,
}

/// 6-digit `YYYYMM` key for a date's calendar month.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}{:02}", date.year(), date.month())
}

/// 8-digit `YYYYMMDD` key for a calendar date.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// 8-digit day key from an ISO `YYYY-MM-DD` date string.
#[must_use]
pub fn day_key_from_iso(iso: &str) -> String {
    iso.replace('-', "")
}

/// Shift a date by whole calendar months, clamping the day-of-month into
/// the target month (Jan 31 + 1 month = Feb 28/29).
#[must_use]
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// First day of the calendar month preceding `today`'s month.
///
/// This is the default end-of-range anchor: the month containing `today` is
/// still accumulating and must never be included.
#[must_use]
pub fn last_full_month(today: NaiveDate) -> NaiveDate {
    add_months(first_of_month(today), -1)
}

/// Inclusive key bounds for a `months_back`-month window ending at the last
/// full month.
///
/// Monthly windows force both bounds to day 1; daily windows keep the
/// anchor's day-of-month. Both render as 8-digit keys, which is what the
/// key-ranged upstream endpoints expect.
#[must_use]
pub fn key_range(today: NaiveDate, months_back: u32, granularity: Granularity) -> KeyRange {
    let end = last_full_month(today);
    let start = add_months(end, 1 - i32::try_from(months_back).unwrap_or(i32::MAX));
    match granularity {
        Granularity::Monthly => KeyRange {
            start: format!("{}01", month_key(first_of_month(start))),
            end: format!("{}01", month_key(end)),
        },
        Granularity::Daily => KeyRange {
            start: day_key(start),
            end: day_key(end),
        },
    }
}

/// Inclusive calendar-date bounds for a `months_back`-month window: day 1 of
/// the first month through the last day of the last full month. Used by
/// adapters whose upstreams take ISO date parameters.
#[must_use]
pub fn date_range(today: NaiveDate, months_back: u32) -> DateRange {
    let end_month = last_full_month(today);
    let start = first_of_month(add_months(
        end_month,
        1 - i32::try_from(months_back).unwrap_or(i32::MAX),
    ));
    let end = add_months(end_month, 1).pred_opt().unwrap_or(end_month);
    DateRange { start, end }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn keys_are_zero_padded() {
        assert_eq!(month_key(d(2024, 3, 15)), "202403");
        assert_eq!(day_key(d(2024, 3, 5)), "20240305");
        assert_eq!(day_key_from_iso("2024-03-05"), "20240305");
    }

    #[test]
    fn last_full_month_skips_the_current_month() {
        assert_eq!(last_full_month(d(2024, 3, 15)), d(2024, 2, 1));
        // Year boundary.
        assert_eq!(last_full_month(d(2024, 1, 1)), d(2023, 12, 1));
    }

    #[test]
    fn add_months_clamps_short_months() {
        assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(add_months(d(2023, 3, 31), -1), d(2023, 2, 28));
        assert_eq!(add_months(d(2024, 6, 15), -18), d(2022, 12, 15));
    }

    #[test]
    fn monthly_key_range_spans_months_back_months() {
        let r = key_range(d(2024, 3, 15), 6, Granularity::Monthly);
        // Last full month is 2024-02; six months back starts at 2023-09.
        assert_eq!(r.start, "20230901");
        assert_eq!(r.end, "20240201");
    }

    #[test]
    fn daily_key_range_keeps_day_of_month() {
        let r = key_range(d(2024, 3, 15), 12, Granularity::Daily);
        assert_eq!(r.start, "20230301");
        assert_eq!(r.end, "20240201");
    }

    #[test]
    fn date_range_ends_on_the_last_day_of_the_last_full_month() {
        let r = date_range(d(2024, 3, 15), 6);
        assert_eq!(r.start, d(2023, 9, 1));
        assert_eq!(r.end, d(2024, 2, 29));
        let r = date_range(d(2024, 5, 2), 12);
        assert_eq!(r.start, d(2023, 5, 1));
        assert_eq!(r.end, d(2024, 4, 30));
    }
}
