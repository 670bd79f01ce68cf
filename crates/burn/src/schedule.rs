//! Next-occurrence computation and the due-check gate.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

use crate::{
    error::{Error, Result},
    types::{BurnSchedule, TimeOfDay},
};

/// Tolerance after a scheduled occurrence during which it is still fireable.
/// Must stay ≥ the poll interval (60 s) and far below the 7-day gap between
/// occurrences.
pub const EXECUTION_WINDOW_MS: u64 = 5 * 60 * 1000;

/// Compute the next occurrence (epoch millis) of a weekly
/// (day-of-week, time-of-day) pair, relative to `now_ms`.
///
/// The candidate is placed on the current date in the resolved timezone with
/// seconds zeroed. If the target weekday already passed this week, or it is
/// today but the candidate is strictly in the past, the occurrence moves one
/// week out. A candidate equal to `now_ms` to the millisecond fires today.
pub fn next_occurrence_ms(
    day_of_week: u8,
    time: TimeOfDay,
    tz: Option<&str>,
    now_ms: u64,
) -> Result<u64> {
    if day_of_week > 6 {
        return Err(Error::invalid_schedule(format!(
            "day of week out of range: {day_of_week}"
        )));
    }
    match tz {
        None => next_in_tz(Utc, day_of_week, time, now_ms),
        Some(name) => {
            let tz: chrono_tz::Tz = name
                .parse()
                .map_err(|_| Error::unknown_timezone(name))?;
            next_in_tz(tz, day_of_week, time, now_ms)
        },
    }
}

fn next_in_tz<Z: TimeZone>(tz: Z, day_of_week: u8, time: TimeOfDay, now_ms: u64) -> Result<u64> {
    let now = DateTime::from_timestamp_millis(now_ms as i64)
        .ok_or_else(|| Error::invalid_schedule(format!("timestamp out of range: {now_ms}")))?
        .with_timezone(&tz);
    let today = now.date_naive();

    let candidate_ms = wall_clock_ms(&tz, today, time)?;
    let current_dow = i64::from(now.weekday().num_days_from_sunday());
    let mut days_until = i64::from(day_of_week) - current_dow;

    if days_until < 0 || (days_until == 0 && candidate_ms < now_ms) {
        days_until += 7;
    }
    if days_until == 0 {
        return Ok(candidate_ms);
    }

    let target = today
        .checked_add_days(Days::new(days_until as u64))
        .ok_or_else(|| Error::invalid_schedule("date overflow"))?;
    wall_clock_ms(&tz, target, time)
}

/// Resolve a (date, time-of-day) pair in `tz` to epoch millis.
fn wall_clock_ms<Z: TimeZone>(tz: &Z, date: NaiveDate, time: TimeOfDay) -> Result<u64> {
    let naive = date
        .and_hms_opt(u32::from(time.hour), u32::from(time.minute), 0)
        .ok_or_else(|| Error::invalid_schedule(format!("invalid time of day: {time}")))?;

    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Ok(dt.timestamp_millis() as u64);
    }
    // DST gap: the wall-clock minute never happens that day; shift one hour
    // forward.
    let shifted = naive + chrono::Duration::hours(1);
    tz.from_local_datetime(&shifted)
        .earliest()
        .map(|dt| dt.timestamp_millis() as u64)
        .ok_or_else(|| Error::invalid_schedule(format!("unresolvable local time: {naive}")))
}

/// Whether the schedule's next occurrence falls within the execution window
/// of `now_ms`. Always false when the schedule is disabled.
#[must_use]
pub fn is_due(schedule: &BurnSchedule, now_ms: u64) -> bool {
    if !schedule.enabled {
        return false;
    }
    match now_ms.checked_sub(schedule.next_scheduled_ms) {
        Some(delta) => delta < EXECUTION_WINDOW_MS,
        None => false,
    }
}

/// Milliseconds until the next occurrence (zero once it has arrived).
#[must_use]
pub fn ms_until_next(schedule: &BurnSchedule, now_ms: u64) -> u64 {
    schedule.next_scheduled_ms.saturating_sub(now_ms)
}

/// Human-readable countdown, coarsest two units.
#[must_use]
pub fn format_until(ms: u64) -> String {
    let minutes = ms / 60_000;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{days}d {}h", hours % 24)
    } else if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "less than a minute".to_string()
    }
}

/// English weekday name for a 0 = Sunday index.
#[must_use]
pub fn day_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}
