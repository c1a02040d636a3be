use std::time::Duration;

const TIME_UNITS: [(&str, f64); 3] = [("s", 1.0), ("ms", 1e-3), ("µs", 1e-6)];

/// Formats `duration` in the largest unit it fills, e.g. `12.50ms`. Durations below a
/// microsecond are printed as whole nanoseconds.
pub fn human_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    TIME_UNITS
        .iter()
        .find(|(_, scale)| secs >= *scale)
        .map(|(unit, scale)| format!("{:.2}{}", secs / scale, unit))
        .unwrap_or_else(|| format!("{}ns", duration.as_nanos()))
}

#[macro_export]
macro_rules! measure_time {
    ($block:block) => {{
        let start = std::time::Instant::now();
        let result = { $block };
        (result, start.elapsed())
    }};
}
