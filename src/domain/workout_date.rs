//! Parsing of user-supplied workout dates

use crate::error::{GymRatError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};

/// A date as typed by the user, resolved against "now" when needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutDate {
    /// The current instant
    Now,
    /// Same time of day, one day back
    Yesterday,
    /// Most recent occurrence of a weekday (today if it matches)
    Weekday(Weekday),
    /// Occurrence of a weekday strictly before today
    LastWeekday(Weekday),
    /// Fixed instant (UTC)
    Exact(DateTime<Utc>),
}

impl WorkoutDate {
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "now" | "today" => Ok(WorkoutDate::Now),
            "yesterday" => Ok(WorkoutDate::Yesterday),
            _ if normalized.starts_with("last ") => parse_weekday(&normalized[5..])
                .map(WorkoutDate::LastWeekday)
                .ok_or_else(|| GymRatError::InvalidDate(input.to_string())),
            _ => {
                if let Some(day) = parse_weekday(&normalized) {
                    return Ok(WorkoutDate::Weekday(day));
                }
                parse_exact(input.trim())
                    .map(WorkoutDate::Exact)
                    .ok_or_else(|| GymRatError::InvalidDate(input.to_string()))
            }
        }
    }

    /// Resolve to an instant. Relative forms keep the time of day of `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            WorkoutDate::Now => now,
            WorkoutDate::Yesterday => now - Duration::days(1),
            WorkoutDate::Weekday(target) => {
                let back = days_back(now.weekday(), *target);
                now - Duration::days(back)
            }
            WorkoutDate::LastWeekday(target) => {
                let back = match days_back(now.weekday(), *target) {
                    0 => 7,
                    n => n,
                };
                now - Duration::days(back)
            }
            WorkoutDate::Exact(at) => *at,
        }
    }
}

fn days_back(current: Weekday, target: Weekday) -> i64 {
    ((current.num_days_from_monday() + 7 - target.num_days_from_monday()) % 7) as i64
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_exact(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}
