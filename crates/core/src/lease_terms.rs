//! Lease dates and the monthly payment schedule.

use chrono::{Datelike, Months};

use crate::types::Timestamp;

/// Length of a lease created from an application.
pub const LEASE_TERM_MONTHS: u32 = 12;

/// End date for a lease starting at `start`: one calendar year later.
///
/// Returns `None` only when the date falls outside chrono's range.
pub fn lease_end(start: Timestamp) -> Option<Timestamp> {
    start.checked_add_months(Months::new(LEASE_TERM_MONTHS))
}

/// First monthly anniversary of `start` strictly after `now`.
///
/// Anniversaries are always computed from `start`, so a lease starting on
/// Jan 31 is due Feb 28 (or 29) and then Mar 31 rather than drifting to the
/// 28th. If the lease has not started yet, `start` itself is returned.
pub fn next_payment_date(start: Timestamp, now: Timestamp) -> Option<Timestamp> {
    if start > now {
        return Some(start);
    }

    let months_between = (month_index(&now) - month_index(&start)).max(0) as u32;
    // Step back one month so a same-month anniversary later than `now` is found.
    let mut months = months_between.saturating_sub(1);
    loop {
        let candidate = start.checked_add_months(Months::new(months))?;
        if candidate > now {
            return Some(candidate);
        }
        months += 1;
    }
}

fn month_index(ts: &Timestamp) -> i64 {
    i64::from(ts.year()) * 12 + i64::from(ts.month0())
}
