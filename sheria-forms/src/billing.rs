use chrono::NaiveTime;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Hours between two times of day. An end before the start is an overnight
/// shift and wraps into the next day; equal times are zero hours, never 24.
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut millis = end.signed_duration_since(start).num_milliseconds();
    if millis < 0 {
        millis += MILLIS_PER_DAY;
    }
    millis as f64 / MILLIS_PER_HOUR
}

/// `hours × billing_rate` for billable entries, zero otherwise or when either
/// operand is missing or zero.
pub fn total_amount(hours: Option<f64>, billing_rate: Option<f64>, billable: bool) -> f64 {
    match (hours, billing_rate) {
        (Some(hours), Some(rate)) if billable && truthy(hours) && truthy(rate) => hours * rate,
        _ => 0.0,
    }
}

fn truthy(n: f64) -> bool {
    n != 0.0 && !n.is_nan()
}
