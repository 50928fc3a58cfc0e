use regex::Regex;
use std::sync::LazyLock;

// ISO-8601 duration as used by video APIs: PT1H2M3S, P1DT2H, PT45S
static RE_ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$").unwrap()
});

/// Whole minutes in an ISO-8601 duration, rounded up to the next minute.
/// Zero-length (live streams report `P0D`) and malformed durations give `None`.
pub fn iso8601_minutes(raw: &str) -> Option<u32> {
    let caps = RE_ISO_DURATION.captures(raw.trim())?;
    let part = |i: usize| -> Option<u64> {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
    };

    let days = part(1)?;
    let hours = part(2)?;
    let minutes = part(3)?;
    let seconds: f64 = caps
        .get(4)
        .map_or(Ok(0.0), |m| m.as_str().parse::<f64>())
        .ok()?;

    let whole_minutes = days
        .checked_mul(24 * 60)?
        .checked_add(hours.checked_mul(60)?)?
        .checked_add(minutes)?;
    let total_seconds = whole_minutes as f64 * 60.0 + seconds;
    let total = (total_seconds / 60.0).ceil() as u64;

    if total == 0 {
        return None;
    }
    u32::try_from(total).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_minutes_are_kept() {
        assert_eq!(iso8601_minutes("PT3M"), Some(3));
        assert_eq!(iso8601_minutes("PT3M0S"), Some(3));
        assert_eq!(iso8601_minutes("PT2H"), Some(120));
    }

    #[test]
    fn leftover_seconds_round_up_by_one_minute() {
        assert_eq!(iso8601_minutes("PT3M33S"), Some(4));
        assert_eq!(iso8601_minutes("PT3M1S"), Some(4));
        assert_eq!(iso8601_minutes("PT3M59S"), Some(4));
        assert_eq!(iso8601_minutes("PT45S"), Some(1));
        assert_eq!(iso8601_minutes("PT1H2M3S"), Some(63));
    }

    #[test]
    fn seconds_past_a_minute_carry_over() {
        assert_eq!(iso8601_minutes("PT125S"), Some(3));
        assert_eq!(iso8601_minutes("PT120S"), Some(2));
        assert_eq!(iso8601_minutes("PT1M90S"), Some(3));
        assert_eq!(iso8601_minutes("PT0.5S"), Some(1));
    }

    #[test]
    fn days_are_counted() {
        assert_eq!(iso8601_minutes("P1DT1M"), Some(24 * 60 + 1));
    }

    #[test]
    fn zero_and_garbage_are_none() {
        assert_eq!(iso8601_minutes("P0D"), None);
        assert_eq!(iso8601_minutes("PT0S"), None);
        assert_eq!(iso8601_minutes(""), None);
        assert_eq!(iso8601_minutes("3:33"), None);
        assert_eq!(iso8601_minutes("PT3X"), None);
    }
}
