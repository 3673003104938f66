//! Cache key builders.
//!
//! Keys nest from coarse to fine (`barber`, `date`, `service`) so each
//! invalidation scope is a single trailing-wildcard pattern.

use chrono::NaiveDate;
use uuid::Uuid;

const PREFIX: &str = "salon";

/// Computed slots for one barber, day and service.
pub fn slots(barber_id: Uuid, date: NaiveDate, service_id: Uuid) -> String {
    format!("{PREFIX}:slots:{barber_id}:{date}:{service_id}")
}

/// Every slot list of a barber-day. Cleared by booking and block writes.
pub fn slots_for_day(barber_id: Uuid, date: NaiveDate) -> String {
    format!("{PREFIX}:slots:{barber_id}:{date}:*")
}

/// Every slot list of a barber. Cleared when the barber's hours change.
pub fn slots_for_barber(barber_id: Uuid) -> String {
    format!("{PREFIX}:slots:{barber_id}:*")
}

/// Every slot list. Cleared when a service or salon changes.
pub fn all_slots() -> String {
    format!("{PREFIX}:slots:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_cover_their_keys() {
        let barber = Uuid::new_v4();
        let service = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2030, 6, 3).unwrap();
        let key = slots(barber, date, service);

        assert_eq!(key, format!("salon:slots:{barber}:2030-06-03:{service}"));
        for pattern in [slots_for_day(barber, date), slots_for_barber(barber), all_slots()] {
            assert!(key.starts_with(pattern.trim_end_matches('*')), "{pattern}");
        }

        let next_day = date.succ_opt().unwrap();
        let day_prefix = slots_for_day(barber, next_day);
        assert!(!key.starts_with(day_prefix.trim_end_matches('*')));
    }
}
