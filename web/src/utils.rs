use chrono::prelude::*;
use memorito_core::TimeOfDay;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Hour of the day in the browser's time zone.
pub(crate) fn local_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}

/// Zero-based month in the browser's time zone.
pub(crate) fn local_month() -> u32 {
    js_sys::Date::new_0().get_month()
}

pub(crate) fn local_time_of_day() -> TimeOfDay {
    TimeOfDay::from_hour(local_hour())
}
