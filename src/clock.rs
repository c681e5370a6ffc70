use chrono::{Local, NaiveTime, Timelike};

/// Zero-padded 24-hour `HH:MM:SS`.
pub fn format_clock(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

pub fn mission_time() -> String {
    format_clock(Local::now().time())
}
