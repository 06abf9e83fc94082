use crate::domain::entities::{Calendar, MILLIS_PER_DAY};
use chrono::{NaiveDateTime, NaiveTime};

/// Business milliseconds between two instants of the calendar's zone.
///
/// Walks each calendar day touched by `[from, to)` once and sums the
/// intersection of every range with the part of the span falling on that day,
/// so the cost is `O(days × ranges)` whatever the span length. Holidays
/// contribute nothing. Returns 0 when `to <= from`.
pub fn business_millis_between(calendar: &Calendar, from: NaiveDateTime, to: NaiveDateTime) -> u64 {
    if to <= from {
        return 0;
    }

    let last = to.date();
    let mut day = from.date();
    let mut total = 0u64;

    loop {
        if calendar.is_business_day(day) {
            let midnight = day.and_time(NaiveTime::MIN);
            let lo = offset_in_day(midnight, from);
            let hi = offset_in_day(midnight, to);
            if lo < hi {
                total += calendar
                    .ranges()
                    .iter()
                    .map(|range| range.intersection_len(lo, hi))
                    .sum::<u64>();
            }
        }

        if day >= last {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    total
}

/// Offset of `instant` from `midnight`, clamped to `[0, MILLIS_PER_DAY]`.
fn offset_in_day(midnight: NaiveDateTime, instant: NaiveDateTime) -> u64 {
    let millis = (instant - midnight).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis as u64).min(MILLIS_PER_DAY)
    }
}
