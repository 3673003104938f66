//! Calendar math: pure slot generation and operating-hours checks.
//!
//! Every function here is deterministic and free of I/O. Local wall-clock
//! times are interpreted in the salon's fixed UTC offset.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_entity::interval::TimeRange;
use salon_entity::salon::DayHours;

/// The UTC instant of a local wall-clock time.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(time);
    (local - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

/// The local calendar date of an instant.
pub fn local_date(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    at.with_timezone(&offset).date_naive()
}

/// UTC instants covered by a local calendar day, `[00:00, next 00:00)`.
pub fn day_window(date: NaiveDate, offset: FixedOffset) -> TimeRange {
    let start = local_to_utc(date, NaiveTime::MIN, offset);
    TimeRange::new(start, start + Duration::days(1))
}

/// The opening windows of `date` in start order; empty when closed.
pub fn opening_windows(hours: &DayHours, date: NaiveDate, offset: FixedOffset) -> Vec<TimeRange> {
    hours
        .open_windows()
        .into_iter()
        .map(|(open, close)| {
            TimeRange::new(
                local_to_utc(date, open, offset),
                local_to_utc(date, close, offset),
            )
        })
        .collect()
}

/// Candidate slot starts for a day.
///
/// Each window yields slots from its opening time, stepping by
/// `granularity_minutes` while `start + duration_minutes` stays inside the
/// window. Closed days, and zero durations or steps, yield nothing.
pub fn generate_slots(
    hours: &DayHours,
    duration_minutes: u32,
    granularity_minutes: u32,
    date: NaiveDate,
    offset: FixedOffset,
) -> Vec<DateTime<Utc>> {
    if duration_minutes == 0 || granularity_minutes == 0 {
        return Vec::new();
    }

    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(i64::from(granularity_minutes));
    let mut slots = Vec::new();
    for window in opening_windows(hours, date, offset) {
        let mut start = window.start;
        while start + duration <= window.end {
            slots.push(start);
            start += step;
        }
    }
    slots
}

/// Reject an interval that does not fit inside one of `date`'s windows.
///
/// The local day is the day `requested.start` falls on; an interval ending
/// on a later local day is rejected even if the salon never closes.
pub fn ensure_within_hours(
    hours: &DayHours,
    requested: &TimeRange,
    offset: FixedOffset,
) -> AppResult<()> {
    let date = local_date(requested.start, offset);
    let day = day_window(date, offset);
    if requested.end > day.end {
        return Err(AppError::out_of_hours("Appointments cannot span midnight"));
    }

    let windows = opening_windows(hours, date, offset);
    if windows.is_empty() {
        return Err(AppError::out_of_hours(format!("Closed on {}", date.weekday())));
    }
    if windows.iter().any(|w| w.start <= requested.start && requested.end <= w.end) {
        return Ok(());
    }
    if windows.iter().all(|w| requested.start < w.start) {
        return Err(AppError::out_of_hours("Requested time starts before opening"));
    }
    if windows.iter().all(|w| requested.end > w.end) {
        return Err(AppError::out_of_hours("Requested time ends after closing"));
    }
    Err(AppError::out_of_hours("Requested time falls outside opening hours"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use salon_core::error::ErrorKind;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 3).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_nine_to_five_in_half_hours() {
        let hours = DayHours::open(hm(9, 0), hm(17, 0));
        let slots = generate_slots(&hours, 30, 30, monday(), utc());
        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0], Utc.with_ymd_and_hms(2030, 6, 3, 9, 0, 0).unwrap());
        assert_eq!(slots[15], Utc.with_ymd_and_hms(2030, 6, 3, 16, 30, 0).unwrap());
    }

    #[test]
    fn test_last_slot_must_end_by_close() {
        let hours = DayHours::open(hm(9, 0), hm(10, 0));
        let slots = generate_slots(&hours, 45, 15, monday(), utc());
        let expected: Vec<_> = [(9, 0), (9, 15)]
            .iter()
            .map(|&(h, m)| Utc.with_ymd_and_hms(2030, 6, 3, h, m, 0).unwrap())
            .collect();
        assert_eq!(slots, expected);
    }

    #[test]
    fn test_closed_day_has_no_slots() {
        assert!(generate_slots(&DayHours::closed(), 30, 30, monday(), utc()).is_empty());
        let hours = DayHours::open(hm(9, 0), hm(17, 0));
        assert!(generate_slots(&hours, 30, 0, monday(), utc()).is_empty());
        assert!(generate_slots(&hours, 600, 30, monday(), utc()).is_empty());
    }

    #[test]
    fn test_offset_shifts_slots() {
        let kigali = FixedOffset::east_opt(2 * 3600).unwrap();
        let hours = DayHours::open(hm(9, 0), hm(17, 0));
        let slots = generate_slots(&hours, 60, 60, monday(), kigali);
        assert_eq!(slots[0], Utc.with_ymd_and_hms(2030, 6, 3, 7, 0, 0).unwrap());
        assert_eq!(local_date(slots[0], kigali), monday());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let hours = DayHours::open(hm(8, 0), hm(18, 0));
        assert_eq!(
            generate_slots(&hours, 40, 20, monday(), utc()),
            generate_slots(&hours, 40, 20, monday(), utc())
        );
    }

    #[test]
    fn test_ends_after_close_is_out_of_hours() {
        let hours = DayHours::open(hm(9, 0), hm(17, 0));
        let start = Utc.with_ymd_and_hms(2030, 6, 3, 16, 45, 0).unwrap();
        let err = ensure_within_hours(&hours, &TimeRange::from_minutes(start, 30), utc())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfHours);

        let start = Utc.with_ymd_and_hms(2030, 6, 3, 16, 30, 0).unwrap();
        assert!(ensure_within_hours(&hours, &TimeRange::from_minutes(start, 30), utc()).is_ok());
    }

    #[test]
    fn test_before_open_and_closed_days() {
        let hours = DayHours::open(hm(9, 0), hm(17, 0));
        let early = Utc.with_ymd_and_hms(2030, 6, 3, 8, 30, 0).unwrap();
        assert!(ensure_within_hours(&hours, &TimeRange::from_minutes(early, 30), utc()).is_err());

        let noon = Utc.with_ymd_and_hms(2030, 6, 3, 12, 0, 0).unwrap();
        let closed = DayHours::closed();
        let err = ensure_within_hours(&closed, &TimeRange::from_minutes(noon, 30), utc())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfHours);
    }

    #[test]
    fn test_midnight_crossing_rejected() {
        let hours = DayHours::open(hm(0, 0), hm(23, 59));
        let late = Utc.with_ymd_and_hms(2030, 6, 3, 23, 45, 0).unwrap();
        let err = ensure_within_hours(&hours, &TimeRange::from_minutes(late, 30), utc())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfHours);
        assert!(err.message.contains("midnight"));
    }

    #[test]
    fn test_split_shift_skips_the_gap() {
        let hours = DayHours::from_windows([(hm(14, 0), hm(16, 0)), (hm(9, 0), hm(11, 0))]);
        let slots = generate_slots(&hours, 60, 30, monday(), utc());
        let expected: Vec<_> = [(9, 0), (9, 30), (10, 0), (14, 0), (14, 30), (15, 0)]
            .iter()
            .map(|&(h, m)| Utc.with_ymd_and_hms(2030, 6, 3, h, m, 0).unwrap())
            .collect();
        assert_eq!(slots, expected);
    }

    #[test]
    fn test_request_must_fit_one_window() {
        let hours = DayHours::from_windows([(hm(9, 0), hm(12, 0)), (hm(13, 0), hm(17, 0))]);
        let check = |h, m, minutes| {
            let start = Utc.with_ymd_and_hms(2030, 6, 3, h, m, 0).unwrap();
            ensure_within_hours(&hours, &TimeRange::from_minutes(start, minutes), utc())
        };

        assert!(check(11, 0, 60).is_ok());
        assert!(check(13, 0, 60).is_ok());
        assert_eq!(check(11, 30, 60).unwrap_err().kind, ErrorKind::OutOfHours);
        assert_eq!(check(12, 15, 30).unwrap_err().kind, ErrorKind::OutOfHours);
    }

    #[test]
    fn test_unavailable_window_is_skipped() {
        let mut hours = DayHours::from_windows([(hm(9, 0), hm(10, 0)), (hm(10, 0), hm(11, 0))]);
        hours.windows[1].available = false;
        assert_eq!(generate_slots(&hours, 30, 30, monday(), utc()).len(), 2);

        let late = Utc.with_ymd_and_hms(2030, 6, 3, 10, 0, 0).unwrap();
        assert!(ensure_within_hours(&hours, &TimeRange::from_minutes(late, 30), utc()).is_err());
    }
}
