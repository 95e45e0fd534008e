//! Timestamp value generators.

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use rand::Rng;

/// Output format for every generated timestamp (second precision, no zone).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the window timestamps are drawn from, ending at the anchor.
pub const WINDOW_DAYS: i64 = 365;

/// Current local time truncated to whole seconds.
pub fn anchor_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Generate a random instant in `[anchor - WINDOW_DAYS, anchor]`.
pub fn generate_in_window<R: Rng>(rng: &mut R, anchor: NaiveDateTime) -> NaiveDateTime {
    generate_between(rng, anchor - Duration::days(WINDOW_DAYS), anchor)
}

/// Generate a random instant in `[start, end]`, at whole-second resolution.
pub fn generate_between<R: Rng>(
    rng: &mut R,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> NaiveDateTime {
    let span = (end - start).num_seconds();
    if span <= 0 {
        return start;
    }
    start + Duration::seconds(rng.random_range(0..=span))
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_generate_in_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let anchor = anchor();
        let start = anchor - Duration::days(WINDOW_DAYS);

        for _ in 0..500 {
            let ts = generate_in_window(&mut rng, anchor);
            assert!(ts >= start && ts <= anchor, "{ts} out of window");
            assert_eq!(ts.nanosecond(), 0);
        }
    }

    #[test]
    fn test_generate_between_empty_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let anchor = anchor();
        assert_eq!(generate_between(&mut rng, anchor, anchor), anchor);
        assert_eq!(
            generate_between(&mut rng, anchor, anchor - Duration::hours(1)),
            anchor
        );
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(anchor()), "2024-06-15 12:30:00");
        let parsed =
            NaiveDateTime::parse_from_str(&format_timestamp(anchor()), TIMESTAMP_FORMAT).unwrap();
        assert_eq!(parsed, anchor());
    }

    #[test]
    fn test_deterministic_generation() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        assert_eq!(
            generate_in_window(&mut rng1, anchor()),
            generate_in_window(&mut rng2, anchor())
        );
    }
}
