//! Calendar primitives for the entry log.
//!
//! Dates travel through the system as 8-character `YYYYMMDD` keys in the
//! local calendar. All week arithmetic lives here:
//!
//! - `iso_week_of_year` picks the virtue for a week (ISO-8601, Thursday
//!   anchored, zero-indexed, clamped to 51 so the rotation period stays
//!   fixed across 53-week years)
//! - `sundays_elapsed` / `absolute_week_index` order the history view
//!   (Sunday anchored, consistent year to year)
//!
//! Both week epochs are needed and deliberately different.

use chrono::{Datelike, Local, NaiveDate};

/// Number of ISO week slots per year after clamping (0..=51).
pub const WEEKS_PER_YEAR: u32 = 52;

/// Encode a date as an 8-character `YYYYMMDD` key.
pub fn encode_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Decode a `YYYYMMDD` key back into a date.
///
/// # Panics
///
/// Panics on malformed input. Date keys are produced exclusively by
/// [`encode_date`] and the persisted log, so a bad key is a programming
/// error rather than a recoverable condition.
pub fn decode_date(key: &str) -> NaiveDate {
    assert!(
        key.len() == 8 && key.bytes().all(|b| b.is_ascii_digit()),
        "invalid date key: {key:?}"
    );
    let year: i32 = key[0..4].parse().unwrap();
    let month: u32 = key[4..6].parse().unwrap();
    let day: u32 = key[6..8].parse().unwrap();
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid date key: {key:?}"))
}

/// Today's local date as a `YYYYMMDD` key.
pub fn today_key() -> String {
    encode_date(Local::now().date_naive())
}

/// Weekday index with Monday = 0 .. Sunday = 6.
pub fn weekday_index(key: &str) -> u32 {
    decode_date(key).weekday().num_days_from_monday()
}

/// Absolute difference between two dates in whole weeks.
///
/// Raw elapsed time only -- week alignment is not considered. Symmetric
/// in its arguments.
pub fn weeks_between(a: &str, b: &str) -> i64 {
    let days = (decode_date(a) - decode_date(b)).num_days().abs();
    days / 7
}

/// ISO-8601 week of year, zero-indexed and clamped to 51.
///
/// Years with a 53rd ISO week fold that week into index 51, repeating the
/// prior week's virtue. 52 is divisible by the rotation length, so the
/// clamp keeps the rotation realigned to the same virtue on the same ISO
/// week every year.
pub fn iso_week_of_year(date: NaiveDate) -> u32 {
    (date.iso_week().week() - 1).min(WEEKS_PER_YEAR - 1)
}

/// Count of Sundays from Jan 1 of `date`'s year through `date` inclusive.
pub fn sundays_elapsed(date: NaiveDate) -> i64 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).expect("Jan 1 always exists");
    // Days from Jan 1 until the year's first Sunday.
    let to_first_sunday = (6 - jan1.weekday().num_days_from_monday() as i64).rem_euclid(7);
    let offset = (date - jan1).num_days();
    if offset < to_first_sunday {
        0
    } else {
        (offset - to_first_sunday) / 7 + 1
    }
}

/// Cross-year week sequence number for the history view.
///
/// Sunday anchored, unlike [`iso_week_of_year`]: the ISO week picks the
/// virtue, this index orders (and labels) the rendered history.
pub fn absolute_week_index(date: NaiveDate) -> i64 {
    date.year() as i64 * WEEKS_PER_YEAR as i64 + sundays_elapsed(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let key = encode_date(date);
        assert_eq!(key, "20240108");
        assert_eq!(decode_date(&key), date);
    }

    #[test]
    fn encode_zero_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(encode_date(date), "20240305");
    }

    #[test]
    #[should_panic(expected = "invalid date key")]
    fn decode_rejects_short_key() {
        decode_date("2024");
    }

    #[test]
    #[should_panic(expected = "invalid date key")]
    fn decode_rejects_non_numeric_key() {
        decode_date("2024010a");
    }

    #[test]
    #[should_panic(expected = "invalid date key")]
    fn decode_rejects_impossible_date() {
        decode_date("20240230");
    }

    #[test]
    fn weekday_index_monday_based() {
        assert_eq!(weekday_index("20240101"), 0); // Monday
        assert_eq!(weekday_index("20240102"), 1); // Tuesday
        assert_eq!(weekday_index("20240106"), 5); // Saturday
        assert_eq!(weekday_index("20240107"), 6); // Sunday
    }

    #[test]
    fn weeks_between_floors_and_is_symmetric() {
        assert_eq!(weeks_between("20240101", "20240101"), 0);
        assert_eq!(weeks_between("20240101", "20240107"), 0); // 6 days
        assert_eq!(weeks_between("20240101", "20240108"), 1); // 7 days
        assert_eq!(weeks_between("20240101", "20240115"), 2); // 14 days
        assert_eq!(weeks_between("20240115", "20240101"), 2);
    }

    #[test]
    fn iso_week_is_zero_indexed() {
        // 2024-01-01 is a Monday, ISO week 1.
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(iso_week_of_year(date), 0);
    }

    #[test]
    fn iso_week_53_clamps_to_51() {
        // 2020 has 53 ISO weeks; Dec 31 2020 falls in week 53.
        let date = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        assert_eq!(date.iso_week().week(), 53);
        assert_eq!(iso_week_of_year(date), 51);
    }

    #[test]
    fn iso_week_late_december_can_belong_to_next_year() {
        // 2024-12-30 is a Monday in ISO week 1 of 2025.
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(iso_week_of_year(date), 0);
    }

    #[test]
    fn sundays_elapsed_counts_inclusive() {
        // 2024-01-01 is a Monday; the first Sunday of 2024 is Jan 7.
        assert_eq!(sundays_elapsed(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 0);
        assert_eq!(sundays_elapsed(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()), 0);
        assert_eq!(sundays_elapsed(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()), 1);
        assert_eq!(sundays_elapsed(NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()), 2);
    }

    #[test]
    fn sundays_elapsed_when_jan_1_is_sunday() {
        // 2023-01-01 is a Sunday and counts immediately.
        assert_eq!(sundays_elapsed(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()), 1);
        assert_eq!(sundays_elapsed(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()), 53);
    }

    #[test]
    fn absolute_week_index_is_monotonic_across_year_boundary() {
        let dec = absolute_week_index(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        let jan = absolute_week_index(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(jan >= dec - 1);
        let later = absolute_week_index(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(later > jan);
    }
}
