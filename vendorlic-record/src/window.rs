//! Validity window normalization.
//!
//! License expiry is read at day granularity: whatever instant a license was
//! minted with, consumers see the last second of that instant's local
//! calendar day. The offset in force at the instant picks its local day; the
//! day ends one second before the first instant whose wall clock reads the
//! following midnight, so days lengthened or shortened by a DST transition
//! still end at 23:59:59 local.

use crate::error::{RecordError, RecordResult};
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};

/// Seconds in one calendar day.
pub const SECONDS_IN_DAY: i64 = 24 * 60 * 60;

/// Sentinel for "no expiry".
pub const UNLIMITED: i64 = 0;

/// Breaks an epoch timestamp down into UTC calendar fields.
///
/// # Errors
///
/// Returns [`RecordError::DateOverflow`] if `epoch` is outside the
/// representable calendar range.
pub fn utc_breakdown(epoch: i64) -> RecordResult<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp(epoch, 0)
        .map(|dt| dt.naive_utc())
        .ok_or(RecordError::DateOverflow(epoch))
}

/// Rounds `t` up to the last second of its day in the process-local zone.
///
/// `0` (unlimited) is returned unchanged.
///
/// # Errors
///
/// Returns [`RecordError::DateOverflow`] if `t` cannot be represented as a
/// calendar date or the boundary overflows.
pub fn end_of_local_day(t: i64) -> RecordResult<i64> {
    end_of_day_in(t, &Local)
}

/// Rounds `t` up to the last second of its day in `tz`.
///
/// An instant exactly on local midnight belongs to the day that starts
/// there, so it maps to the last second of the preceding day.
pub fn end_of_day_in<Tz: TimeZone>(t: i64, tz: &Tz) -> RecordResult<i64> {
    if t == UNLIMITED {
        return Ok(UNLIMITED);
    }

    let overflow = || RecordError::DateOverflow(t);

    let local = wall_clock(t, tz).ok_or_else(overflow)?;
    let next_midnight = round_up(local, SECONDS_IN_DAY).ok_or_else(overflow)?;
    first_instant_at(next_midnight, tz)
        .and_then(|boundary| boundary.checked_sub(1))
        .ok_or_else(overflow)
}

/// Wall-clock reading of `t` in `tz`, as seconds since the local epoch.
fn wall_clock<Tz: TimeZone>(t: i64, tz: &Tz) -> Option<i64> {
    let utc = utc_breakdown(t).ok()?;
    let offset = tz.offset_from_utc_datetime(&utc).fix().local_minus_utc();
    t.checked_add(i64::from(offset))
}

/// First instant whose wall clock in `tz` reads `wall` or later.
fn first_instant_at<Tz: TimeZone>(wall: i64, tz: &Tz) -> Option<i64> {
    let naive = utc_breakdown(wall).ok()?;
    // Keep a day of headroom so offset arithmetic stays inside chrono's range.
    utc_breakdown(wall.checked_sub(SECONDS_IN_DAY)?).ok()?;
    utc_breakdown(wall.checked_add(SECONDS_IN_DAY)?).ok()?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp()),
        // DST fold: the order of the two readings is zone-specific.
        LocalResult::Ambiguous(a, b) => Some(a.timestamp().min(b.timestamp())),
        // DST gap: the wall clock skips `wall`; the day starts when it resumes.
        LocalResult::None => end_of_gap(wall, tz),
    }
}

/// Searches the day either side of `wall` for the instant the clock first
/// reads `wall` or later. Offsets never exceed a day, so the answer lies in
/// that window.
fn end_of_gap<Tz: TimeZone>(wall: i64, tz: &Tz) -> Option<i64> {
    let mut lo = wall.checked_sub(SECONDS_IN_DAY)?;
    let mut hi = wall.checked_add(SECONDS_IN_DAY)?;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if wall_clock(mid, tz)? >= wall {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(lo)
}

fn round_up(value: i64, step: i64) -> Option<i64> {
    match value.rem_euclid(step) {
        0 => Some(value),
        rem => value.checked_add(step - rem),
    }
}
