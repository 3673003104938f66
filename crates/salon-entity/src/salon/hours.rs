//! Weekly operating hours.
//!
//! A day is a list of bookable windows, so split shifts and lunch breaks
//! need no standing blocks. The single `{open, close}` form is still
//! accepted on input and becomes a one-window day.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use salon_core::error::AppError;

/// One bookable stretch of a day, `[start, end)` in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    /// Switched-off windows are kept but never bookable.
    #[serde(default = "default_available")]
    pub available: bool,
}

impl HoursWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            available: true,
        }
    }
}

/// Opening windows for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DayHoursInput")]
pub struct DayHours {
    pub windows: Vec<HoursWindow>,
    /// Whether the day is closed entirely, whatever its windows say.
    #[serde(default)]
    pub closed: bool,
}

impl DayHours {
    /// A day with a single window from `open` to `close`.
    pub fn open(open: NaiveTime, close: NaiveTime) -> Self {
        Self::from_windows([(open, close)])
    }

    /// A day with several windows, e.g. a morning and an afternoon shift.
    pub fn from_windows(windows: impl IntoIterator<Item = (NaiveTime, NaiveTime)>) -> Self {
        Self {
            windows: windows
                .into_iter()
                .map(|(start, end)| HoursWindow::new(start, end))
                .collect(),
            closed: false,
        }
    }

    /// A closed day.
    pub fn closed() -> Self {
        Self {
            windows: Vec::new(),
            closed: true,
        }
    }

    /// Bookable windows in start order; empty when closed.
    pub fn open_windows(&self) -> Vec<(NaiveTime, NaiveTime)> {
        if self.closed {
            return Vec::new();
        }
        let mut open: Vec<_> = self
            .windows
            .iter()
            .filter(|w| w.available && w.start < w.end)
            .map(|w| (w.start, w.end))
            .collect();
        open.sort();
        open
    }

    /// Every window closes after it opens and no two windows overlap.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(bad) = self.windows.iter().find(|w| w.end <= w.start) {
            return Err(AppError::validation(format!(
                "window {}-{} must end after it starts",
                bad.start.format("%H:%M"),
                bad.end.format("%H:%M")
            )));
        }
        let mut sorted: Vec<_> = self.windows.iter().map(|w| (w.start, w.end)).collect();
        sorted.sort();
        if sorted.windows(2).any(|pair| pair[1].0 < pair[0].1) {
            return Err(AppError::validation("opening windows must not overlap"));
        }
        Ok(())
    }
}

impl Default for DayHours {
    fn default() -> Self {
        Self::open(default_open(), default_close())
    }
}

/// Accepted JSON shapes for a day.
#[derive(Deserialize)]
#[serde(untagged)]
enum DayHoursInput {
    Single {
        #[serde(with = "hhmm")]
        open: NaiveTime,
        #[serde(with = "hhmm")]
        close: NaiveTime,
        #[serde(default)]
        closed: bool,
    },
    Windows {
        #[serde(default)]
        windows: Vec<HoursWindow>,
        #[serde(default)]
        closed: bool,
    },
}

impl From<DayHoursInput> for DayHours {
    fn from(input: DayHoursInput) -> Self {
        match input {
            DayHoursInput::Single {
                open,
                close,
                closed,
            } => Self {
                windows: vec![HoursWindow::new(open, close)],
                closed,
            },
            DayHoursInput::Windows { windows, closed } => Self { windows, closed },
        }
    }
}

/// Opening windows for a whole week.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(default)]
    pub monday: DayHours,
    #[serde(default)]
    pub tuesday: DayHours,
    #[serde(default)]
    pub wednesday: DayHours,
    #[serde(default)]
    pub thursday: DayHours,
    #[serde(default)]
    pub friday: DayHours,
    #[serde(default)]
    pub saturday: DayHours,
    #[serde(default)]
    pub sunday: DayHours,
}

impl WeeklyHours {
    /// The same hours every day of the week.
    pub fn uniform(day: DayHours) -> Self {
        Self {
            monday: day.clone(),
            tuesday: day.clone(),
            wednesday: day.clone(),
            thursday: day.clone(),
            friday: day.clone(),
            saturday: day.clone(),
            sunday: day,
        }
    }

    /// Hours for the given weekday.
    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        const DAYS: [Weekday; 7] = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for day in DAYS {
            self.for_weekday(day)
                .validate()
                .map_err(|e| AppError::validation(format!("{day}: {}", e.message)))?;
        }
        Ok(())
    }
}

fn default_available() -> bool {
    true
}

fn default_open() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_close() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// `HH:MM` serde format for [`NaiveTime`].
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_defaults_match_salon_defaults() {
        let week = WeeklyHours::default();
        let monday = week.for_weekday(Weekday::Mon);
        assert_eq!(monday.open_windows(), vec![(hm(8, 0), hm(18, 0))]);
        assert!(!monday.closed);
    }

    #[test]
    fn test_single_window_form_is_accepted() {
        let json = r#"{"open":"09:00","close":"17:30"}"#;
        let day: DayHours = serde_json::from_str(json).unwrap();
        assert_eq!(day, DayHours::open(hm(9, 0), hm(17, 30)));

        let out = serde_json::to_value(&day).unwrap();
        assert_eq!(out["windows"][0]["start"], "09:00");
        assert_eq!(out["windows"][0]["end"], "17:30");
        assert_eq!(out["closed"], false);
    }

    #[test]
    fn test_window_list_form() {
        let json = r#"{"windows":[
            {"start":"14:00","end":"18:00"},
            {"start":"09:00","end":"12:00"},
            {"start":"19:00","end":"20:00","available":false}
        ]}"#;
        let day: DayHours = serde_json::from_str(json).unwrap();
        assert_eq!(
            day.open_windows(),
            vec![(hm(9, 0), hm(12, 0)), (hm(14, 0), hm(18, 0))]
        );

        let back: DayHours = serde_json::from_value(serde_json::to_value(&day).unwrap()).unwrap();
        assert_eq!(back, day);
    }

    #[test]
    fn test_closed_day_has_no_windows() {
        let day: DayHours =
            serde_json::from_str(r#"{"open":"09:00","close":"17:00","closed":true}"#).unwrap();
        assert!(day.open_windows().is_empty());
        let day: DayHours = serde_json::from_str(r#"{"closed":true}"#).unwrap();
        assert!(day.open_windows().is_empty());
    }

    #[test]
    fn test_validate_rejects_inverted_and_overlapping_windows() {
        let mut week = WeeklyHours::default();
        week.friday = DayHours::open(hm(9, 0), hm(7, 0));
        assert!(week.validate().is_err());

        week.friday = DayHours::from_windows([(hm(9, 0), hm(13, 0)), (hm(12, 0), hm(17, 0))]);
        let err = week.validate().unwrap_err();
        assert!(err.message.starts_with("Fri"));

        week.friday = DayHours::from_windows([(hm(9, 0), hm(12, 0)), (hm(12, 0), hm(17, 0))]);
        assert!(week.validate().is_ok());
    }
}
