//! Clock formatting for agenda walkthroughs.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A time of day in 24-hour `HH:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    /// Build from hour and minute; `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Shift by whole minutes, wrapping around midnight in either direction.
    pub fn add_minutes(&self, minutes: i64) -> Self {
        let offset = minutes.rem_euclid(MINUTES_PER_DAY);
        let (time, _) = self.0.overflowing_add_signed(Duration::minutes(offset));
        Self(time)
    }
}

impl Default for ClockTime {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| ValidationError::InvalidClockTime(s.to_string()))?;
        let hour: u32 = h
            .parse()
            .map_err(|_| ValidationError::InvalidClockTime(s.to_string()))?;
        let minute: u32 = m
            .parse()
            .map_err(|_| ValidationError::InvalidClockTime(s.to_string()))?;
        if m.len() != 2 {
            return Err(ValidationError::InvalidClockTime(s.to_string()));
        }
        Self::from_hm(hour, minute).ok_or_else(|| ValidationError::InvalidClockTime(s.to_string()))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Format an elapsed-minutes offset as a `HH:MM` clock reading.
///
/// Minutes are rounded to the nearest integer, added to `start`
/// (midnight when `None`) and wrapped modulo 24 hours. Offsets beyond the
/// `i64` range saturate; NaN counts as zero.
pub fn format_minutes_to_time(minutes: f64, start: Option<ClockTime>) -> String {
    let offset = minutes.round() as i64;
    start.unwrap_or_default().add_minutes(offset).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Option<ClockTime> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn adds_offset_to_start() {
        assert_eq!(format_minutes_to_time(90.0, at("09:00")), "10:30");
    }

    #[test]
    fn wraps_past_midnight() {
        assert_eq!(format_minutes_to_time(120.0, at("23:00")), "01:00");
        assert_eq!(format_minutes_to_time(3.0 * 1440.0 + 5.0, None), "00:05");
    }

    #[test]
    fn zero_without_start_is_midnight() {
        assert_eq!(format_minutes_to_time(0.0, None), "00:00");
    }

    #[test]
    fn rounds_fractional_minutes() {
        assert_eq!(format_minutes_to_time(23.2, at("09:00")), "09:23");
        assert_eq!(format_minutes_to_time(23.5, at("09:00")), "09:24");
    }

    #[test]
    fn negative_offset_wraps_backwards() {
        assert_eq!(format_minutes_to_time(-30.0, at("00:10")), "23:40");
    }

    #[test]
    fn huge_offsets_do_not_overflow() {
        // 1e15 min is 640 min past a whole number of days
        assert_eq!(format_minutes_to_time(1e15, None), "10:40");
        assert_eq!(format_minutes_to_time(-1e15, None), "13:20");
        assert_eq!(ClockTime::MIDNIGHT.add_minutes(i64::MAX).to_string(), "18:07");
    }

    #[test]
    fn non_finite_offsets_still_format() {
        let inf = format_minutes_to_time(f64::INFINITY, at("09:00"));
        assert_eq!(inf, ClockTime::from_hm(9, 0).unwrap().add_minutes(i64::MAX).to_string());
        let neg_inf = format_minutes_to_time(f64::NEG_INFINITY, None);
        assert_eq!(neg_inf, ClockTime::MIDNIGHT.add_minutes(i64::MIN).to_string());
        assert_eq!(format_minutes_to_time(f64::NAN, at("09:00")), "09:00");
    }

    #[test]
    fn parse_rejects_malformed_times() {
        for bad in ["", "9", "24:00", "09:60", "ab:cd", "09:5", "09-00"] {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {bad:?}");
        }
        assert_eq!("9:05".parse::<ClockTime>().unwrap().to_string(), "09:05");
    }

    #[test]
    fn serde_uses_clock_string() {
        let t: ClockTime = serde_json::from_str("\"08:45\"").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"08:45\"");
        assert!(serde_json::from_str::<ClockTime>("\"8h45\"").is_err());
    }
}
