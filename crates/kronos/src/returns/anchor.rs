//! Nearest-return search.
//!
//! Two strategies, dispatched on [`ReturnCycle`]:
//! - calendar anniversary: the birth month/day, so leap years never shift it;
//! - fixed period: `birth + k * period` for whole cycles `k >= 0`.
//!
//! All distances are computed on epoch milliseconds; a calendar date is only
//! built for the candidate anchor instants.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::cycles::ReturnCycle;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A concrete return instant relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub at: DateTime<Utc>,
    /// `at - reference` in days; positive when the return is still ahead
    pub days_from_reference: f64,
    /// Whole cycles completed at `at` (0 is the natal position itself)
    pub return_number: u64,
}

/// Signed day distance from `from` to `to`.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to.timestamp_millis() - from.timestamp_millis()) as f64 / MILLIS_PER_DAY
}

/// The return anchor closest to `reference`, past or future.
pub fn find_nearest_anchor(
    cycle: &ReturnCycle,
    birth: DateTime<Utc>,
    reference: DateTime<Utc>,
) -> Anchor {
    match *cycle {
        ReturnCycle::CalendarYear => nearest_anniversary(birth, reference),
        ReturnCycle::FixedPeriod { period_days } => nearest_periodic(birth, reference, period_days),
    }
}

/// The first return anchor strictly after `reference`.
pub fn find_next_anchor(
    cycle: &ReturnCycle,
    birth: DateTime<Utc>,
    reference: DateTime<Utc>,
) -> Anchor {
    match *cycle {
        ReturnCycle::CalendarYear => next_anniversary(birth, reference),
        ReturnCycle::FixedPeriod { period_days } => next_periodic(birth, reference, period_days),
    }
}

fn natal_anchor(birth: DateTime<Utc>, reference: DateTime<Utc>) -> Anchor {
    Anchor {
        at: birth,
        days_from_reference: days_between(reference, birth),
        return_number: 0,
    }
}

/// Keep the candidate with the smaller absolute distance; earlier candidates win ties.
fn closer(best: Option<Anchor>, candidate: Anchor) -> Option<Anchor> {
    match best {
        Some(b) if b.days_from_reference.abs() <= candidate.days_from_reference.abs() => Some(b),
        _ => Some(candidate),
    }
}

// ---------------------------
// Calendar anniversary
// ---------------------------

/// Birth month/day in `year` at the birth time of day. Feb 29 falls back to Feb 28.
fn anniversary_in(birth: DateTime<Utc>, year: i32) -> Option<DateTime<Utc>> {
    let (month, day) = (birth.month(), birth.day());
    let date = NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })?;
    Some(Utc.from_utc_datetime(&date.and_time(birth.time())))
}

fn anniversary_anchor(birth: DateTime<Utc>, reference: DateTime<Utc>, year: i32) -> Option<Anchor> {
    if year < birth.year() {
        return None;
    }
    let at = anniversary_in(birth, year)?;
    Some(Anchor {
        at,
        days_from_reference: days_between(reference, at),
        return_number: (year - birth.year()) as u64,
    })
}

fn nearest_anniversary(birth: DateTime<Utc>, reference: DateTime<Utc>) -> Anchor {
    let year = reference.year();
    [year - 1, year, year + 1]
        .into_iter()
        .filter_map(|y| anniversary_anchor(birth, reference, y))
        .fold(None, closer)
        .unwrap_or_else(|| natal_anchor(birth, reference))
}

fn next_anniversary(birth: DateTime<Utc>, reference: DateTime<Utc>) -> Anchor {
    let start = reference.year().max(birth.year());
    (start..=start + 1)
        .filter_map(|y| anniversary_anchor(birth, reference, y))
        .find(|anchor| anchor.at > reference)
        .unwrap_or_else(|| natal_anchor(birth, reference))
}

// ---------------------------
// Fixed period
// ---------------------------

fn periodic_anchor(
    birth: DateTime<Utc>,
    reference: DateTime<Utc>,
    period_days: f64,
    k: u64,
) -> Option<Anchor> {
    let offset_ms = (k as f64 * period_days * MILLIS_PER_DAY).round() as i64;
    let at = birth.checked_add_signed(Duration::milliseconds(offset_ms))?;
    Some(Anchor {
        at,
        days_from_reference: days_between(reference, at),
        return_number: k,
    })
}

fn nearest_periodic(birth: DateTime<Utc>, reference: DateTime<Utc>, period_days: f64) -> Anchor {
    // No return can precede birth.
    let elapsed = days_between(birth, reference).max(0.0);
    let cycles = elapsed / period_days;
    let (lower, upper) = (cycles.floor() as u64, cycles.ceil() as u64);

    [lower, upper]
        .into_iter()
        .filter_map(|k| periodic_anchor(birth, reference, period_days, k))
        .fold(None, closer)
        .unwrap_or_else(|| natal_anchor(birth, reference))
}

fn next_periodic(birth: DateTime<Utc>, reference: DateTime<Utc>, period_days: f64) -> Anchor {
    let elapsed_ms = (reference.timestamp_millis() - birth.timestamp_millis()) as f64;
    let period_ms = period_days * MILLIS_PER_DAY;
    let first_after = |ms: f64| ((ms / period_ms).floor() as u64).saturating_add(1);

    // Anchors land on whole milliseconds, so the first guess can round onto the
    // reference itself; the second is the first cycle a full millisecond past it.
    let candidates = if elapsed_ms < 0.0 {
        [0, 0]
    } else {
        [first_after(elapsed_ms), first_after(elapsed_ms + 1.0)]
    };

    candidates
        .into_iter()
        .filter_map(|k| periodic_anchor(birth, reference, period_days, k))
        .find(|anchor| anchor.at > reference)
        .unwrap_or_else(|| natal_anchor(birth, reference))
}
