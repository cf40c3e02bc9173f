//! Calendar context for a single run.
//!
//! A [`DateContext`] is built once per invocation from the wall clock and is
//! immutable afterward. Day-of-week validity is enforced by the [`DayOfWeek`]
//! enum — there is no runtime range check to get wrong downstream.
//!
//! Holy-day detection requires the Thai lunar calendar, which is out of scope;
//! the constructor always reports `is_holy_day = false`. The fields exist so
//! the content selector's holiday handling has a stable shape.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateError {
    #[error("day of week must be 1..=7 (ISO, Monday=1), got {0}")]
    DayOutOfRange(u8),
}

/// ISO day of week, Monday = 1 through Sunday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days in ISO order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Parse an ISO index (1..=7). Used at the CLI boundary; everywhere else
    /// the enum itself is the proof of validity.
    pub fn from_iso(index: u8) -> Result<Self, DateError> {
        match index {
            1..=7 => Ok(Self::ALL[(index - 1) as usize]),
            other => Err(DateError::DayOutOfRange(other)),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        // number_from_monday is 1..=7 by construction
        Self::ALL[(date.weekday().number_from_monday() - 1) as usize]
    }

    pub fn iso_index(self) -> u8 {
        match self {
            DayOfWeek::Monday => 1,
            DayOfWeek::Tuesday => 2,
            DayOfWeek::Wednesday => 3,
            DayOfWeek::Thursday => 4,
            DayOfWeek::Friday => 5,
            DayOfWeek::Saturday => 6,
            DayOfWeek::Sunday => 7,
        }
    }
}

/// Everything the pipeline needs to know about "today".
#[derive(Debug, Clone)]
pub struct DateContext {
    pub day_of_week: DayOfWeek,
    /// Buddhist observance day. Requires lunar-calendar computation, which is
    /// out of scope — always `false` for now.
    pub is_holy_day: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
}

impl DateContext {
    /// Context for the current local date.
    pub fn today() -> Self {
        Self::for_date(chrono::Local::now().date_naive())
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_day(DayOfWeek::from_date(date))
    }

    pub fn for_day(day_of_week: DayOfWeek) -> Self {
        Self {
            day_of_week,
            is_holy_day: false,
            is_holiday: false,
            holiday_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_roundtrip() {
        for index in 1..=7u8 {
            let day = DayOfWeek::from_iso(index).unwrap();
            assert_eq!(day.iso_index(), index);
        }
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert!(DayOfWeek::from_iso(0).is_err());
        assert!(DayOfWeek::from_iso(8).is_err());
    }

    #[test]
    fn weekday_from_date() {
        // 2026-08-23 is a Sunday
        let date = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(DayOfWeek::from_date(date), DayOfWeek::Sunday);

        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(DayOfWeek::from_date(monday), DayOfWeek::Monday);
    }

    #[test]
    fn context_defaults_to_ordinary_day() {
        let ctx = DateContext::for_day(DayOfWeek::Wednesday);
        assert!(!ctx.is_holy_day);
        assert!(!ctx.is_holiday);
        assert!(ctx.holiday_name.is_none());
    }
}
