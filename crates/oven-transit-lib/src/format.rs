//! Locale-independent duration formatting from raw seconds.
//!
//! Seconds are floored to whole seconds once, then split with floor
//! division so the same input always yields the same text.

/// Floor raw seconds to whole seconds, clamping negatives and non-finite input to zero.
pub fn whole_seconds(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    seconds.floor() as u64
}

/// Format as `H:MM:SS`.
///
/// ```
/// use oven_transit_lib::format::fmt_hms;
/// assert_eq!(fmt_hms(3820.44), "1:03:40");
/// assert_eq!(fmt_hms(0.0), "0:00:00");
/// ```
pub fn fmt_hms(seconds: f64) -> String {
    let s = whole_seconds(seconds);
    format!("{}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Format as `M:SS`, with minutes allowed to exceed 59.
///
/// ```
/// use oven_transit_lib::format::fmt_ms;
/// assert_eq!(fmt_ms(2142.52), "35:42");
/// assert_eq!(fmt_ms(6561.0), "109:21");
/// ```
pub fn fmt_ms(seconds: f64) -> String {
    let s = whole_seconds(seconds);
    format!("{}:{:02}", s / 60, s % 60)
}

/// Long operator form: `3h 28min 43s`, or `35min 42s` under an hour.
pub fn fmt_long(seconds: f64) -> String {
    let s = whole_seconds(seconds);
    let (h, m, sec) = (s / 3600, (s % 3600) / 60, s % 60);
    if h > 0 {
        format!("{h}h {m:02}min {sec:02}s")
    } else {
        format!("{m}min {sec:02}s")
    }
}
