use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Reminders are offered for hearings at most this many days out.
pub const REMINDER_WINDOW_DAYS: i64 = 7;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{label} cannot be in the past")]
pub struct PastDate {
    pub label: &'static str,
    pub date: NaiveDate,
}

/// Rejects dates before `today`; today itself is allowed.
pub fn ensure_not_past(
    label: &'static str,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), PastDate> {
    if date < today {
        return Err(PastDate { label, date });
    }
    Ok(())
}

/// A hearing is due a reminder once it is still ahead of `now` and no more
/// than [`REMINDER_WINDOW_DAYS`] whole days away.
pub fn reminder_due(hearing_date: NaiveDate, now: NaiveDateTime) -> bool {
    let hearing_starts = hearing_date.and_time(NaiveTime::default());
    hearing_starts > now && (hearing_starts - now).num_days() <= REMINDER_WINDOW_DAYS
}
