use chrono::{DateTime, Local, Offset};

/// Wall-clock stamp used for second headers and session markers,
/// e.g. `2026/08/07 14:03:21 UTC+330mins`.
pub fn wall_stamp() -> String {
    stamp_at(Local::now())
}

pub(crate) fn stamp_at(now: DateTime<Local>) -> String {
    let offset_secs = now.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { '+' } else { '-' };
    let offset_mins = (offset_secs / 60).abs();
    format!(
        "{} UTC{}{}mins",
        now.format("%Y/%m/%d %H:%M:%S"),
        sign,
        offset_mins
    )
}
