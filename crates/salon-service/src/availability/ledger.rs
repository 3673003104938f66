//! Availability ledger: the busy partition of a barber-day.

use chrono::{DateTime, Duration, Utc};

use salon_entity::block::BlockedRange;
use salon_entity::booking::Booking;
use salon_entity::interval::TimeRange;

/// Sort and coalesce ranges into maximal disjoint ranges.
///
/// Overlapping and touching ranges (`a.end == b.start`) merge; empty ranges
/// are dropped.
pub fn merge_intervals(mut ranges: Vec<TimeRange>) -> Vec<TimeRange> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<TimeRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Busy ranges from pending/confirmed bookings and blocks, merged.
pub fn busy_intervals(bookings: &[Booking], blocks: &[BlockedRange]) -> Vec<TimeRange> {
    let ranges = bookings
        .iter()
        .filter(|b| b.is_active())
        .map(Booking::range)
        .chain(blocks.iter().map(BlockedRange::range))
        .collect();
    merge_intervals(ranges)
}

/// Whether `candidate` misses every range in a merged busy set.
pub fn is_free(busy: &[TimeRange], candidate: &TimeRange) -> bool {
    // First busy range that ends after the candidate starts.
    let idx = busy.partition_point(|b| b.end <= candidate.start);
    busy.get(idx).is_none_or(|b| !b.overlaps(candidate))
}

/// Keep the slot starts whose `[start, start + duration)` is free.
pub fn free_slots(
    candidates: Vec<DateTime<Utc>>,
    duration_minutes: u32,
    busy: &[TimeRange],
) -> Vec<DateTime<Utc>> {
    let duration = Duration::minutes(i64::from(duration_minutes));
    candidates
        .into_iter()
        .filter(|&start| is_free(busy, &TimeRange::new(start, start + duration)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 3, h, m, 0).unwrap()
    }

    fn range(a: (u32, u32), b: (u32, u32)) -> TimeRange {
        TimeRange::new(at(a.0, a.1), at(b.0, b.1))
    }

    #[test]
    fn test_merge_overlapping_and_adjacent() {
        let merged = merge_intervals(vec![
            range((11, 0), (11, 30)),
            range((9, 0), (9, 30)),
            range((9, 30), (10, 0)),
            range((9, 45), (10, 15)),
            range((12, 0), (12, 0)),
        ]);
        assert_eq!(merged, vec![range((9, 0), (10, 15)), range((11, 0), (11, 30))]);
    }

    #[test]
    fn test_merge_contained_range() {
        let merged = merge_intervals(vec![range((9, 0), (12, 0)), range((10, 0), (10, 30))]);
        assert_eq!(merged, vec![range((9, 0), (12, 0))]);
    }

    #[test]
    fn test_gaps_survive_merge() {
        let merged = merge_intervals(vec![range((9, 0), (9, 30)), range((9, 31), (10, 0))]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_is_free_respects_half_open_bounds() {
        let busy = vec![range((10, 0), (10, 30)), range((12, 0), (13, 0))];
        assert!(is_free(&busy, &range((9, 30), (10, 0))));
        assert!(is_free(&busy, &range((10, 30), (11, 0))));
        assert!(!is_free(&busy, &range((10, 15), (10, 45))));
        assert!(!is_free(&busy, &range((11, 30), (12, 30))));
        assert!(!is_free(&busy, &range((9, 0), (14, 0))));
        assert!(is_free(&busy, &range((13, 0), (14, 0))));
        assert!(is_free(&[], &range((13, 0), (14, 0))));
    }

    #[test]
    fn test_free_slots_never_touch_busy() {
        let busy = vec![range((10, 0), (10, 30))];
        let candidates: Vec<_> = (0..16).map(|i| at(9, 0) + Duration::minutes(30 * i)).collect();
        let free = free_slots(candidates, 30, &busy);
        assert_eq!(free.len(), 15);
        assert!(free.contains(&at(9, 30)));
        assert!(free.contains(&at(10, 30)));
        assert!(!free.contains(&at(10, 0)));
        for start in free {
            let slot = TimeRange::from_minutes(start, 30);
            assert!(busy.iter().all(|b| !b.overlaps(&slot)));
        }
    }

    #[test]
    fn test_blocks_count_as_busy() {
        let barber = Uuid::new_v4();
        let block = BlockedRange::new(barber, range((14, 0), (14, 30)), barber);
        let busy = busy_intervals(&[], &[block]);
        assert_eq!(busy, vec![range((14, 0), (14, 30))]);
    }
}
