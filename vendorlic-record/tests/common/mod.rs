//! Shared fixtures for normalizer tests.

#![allow(dead_code)]

use chrono::{
    FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike,
};
use std::fmt;

pub const HOUR: i32 = 3600;

/// A zone with a single daylight-saving window, bounded by UTC instants.
///
/// Folds are reported standard-time reading first, the way `chrono::Local`
/// reports them on Linux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstZone {
    standard: i32,
    daylight: i32,
    dst_start: i64,
    dst_end: i64,
}

impl DstZone {
    /// America/New_York for 2024. Clocks change at 02:00 local.
    pub fn new_york_2024() -> Self {
        Self {
            standard: -5 * HOUR,
            daylight: -4 * HOUR,
            dst_start: 1_710_054_000,
            dst_end: 1_730_613_600,
        }
    }

    /// America/Havana for 2024. Clocks skip midnight in March and fall back
    /// from 01:00 to midnight in November.
    pub fn havana_2024() -> Self {
        Self {
            standard: -5 * HOUR,
            daylight: -4 * HOUR,
            dst_start: 1_710_046_800,
            dst_end: 1_730_610_000,
        }
    }

    /// America/Santiago from September 2024. Clocks skip midnight when
    /// daylight time begins.
    pub fn santiago_2024() -> Self {
        Self {
            standard: -4 * HOUR,
            daylight: -3 * HOUR,
            dst_start: 1_725_768_000,
            dst_end: 1_743_908_400,
        }
    }

    fn offset_at(&self, utc: i64) -> i32 {
        if (self.dst_start..self.dst_end).contains(&utc) {
            self.daylight
        } else {
            self.standard
        }
    }

    fn offset(&self, secs: i32) -> DstOffset {
        DstOffset {
            zone: *self,
            fixed: FixedOffset::east_opt(secs).unwrap(),
        }
    }

    /// Local (hour, minute, second) of `t`.
    pub fn hms(&self, t: i64) -> (u32, u32, u32) {
        let local = self.timestamp_opt(t, 0).unwrap();
        (local.hour(), local.minute(), local.second())
    }

    /// Local calendar date of `t`.
    pub fn date(&self, t: i64) -> NaiveDate {
        self.timestamp_opt(t, 0).unwrap().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstOffset {
    zone: DstZone,
    fixed: FixedOffset,
}

impl Offset for DstOffset {
    fn fix(&self) -> FixedOffset {
        self.fixed
    }
}

impl fmt::Display for DstOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fixed, f)
    }
}

impl TimeZone for DstZone {
    type Offset = DstOffset;

    fn from_offset(offset: &DstOffset) -> Self {
        offset.zone
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<DstOffset> {
        self.offset_from_local_datetime(&local.and_time(NaiveTime::default()))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<DstOffset> {
        let wall = local.and_utc().timestamp();
        let fits = |secs: i32| self.offset_at(wall - i64::from(secs)) == secs;
        match (fits(self.standard), fits(self.daylight)) {
            (true, true) => {
                LocalResult::Ambiguous(self.offset(self.standard), self.offset(self.daylight))
            }
            (true, false) => LocalResult::Single(self.offset(self.standard)),
            (false, true) => LocalResult::Single(self.offset(self.daylight)),
            (false, false) => LocalResult::None,
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> DstOffset {
        self.offset_from_utc_datetime(&utc.and_time(NaiveTime::default()))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> DstOffset {
        self.offset(self.offset_at(utc.and_utc().timestamp()))
    }
}
