//! Trip date parsing.

use chrono::{Days, NaiveDate};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Days between today and the default trip start.
pub const DEFAULT_LEAD_DAYS: u64 = 7;

/// Length of the default trip in nights.
pub const DEFAULT_NIGHTS: u64 = 2;

/// Parses a date in any accepted format.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Start and end of the trip.
///
/// Both dates must parse and be in order; otherwise the trip starts a week
/// after `today` and lasts three days.
pub fn resolve_dates(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    match (start.and_then(parse_date), end.and_then(parse_date)) {
        (Some(s), Some(e)) if e >= s => (s, e),
        _ => {
            let s = today + Days::new(DEFAULT_LEAD_DAYS);
            (s, s + Days::new(DEFAULT_NIGHTS))
        }
    }
}

/// Every date from `start` to `end` inclusive.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        let expected = Some(date(2026, 5, 3));
        assert_eq!(parse_date("2026-05-03"), expected);
        assert_eq!(parse_date("03-05-2026"), expected);
        assert_eq!(parse_date("03/05/2026"), expected);
        assert_eq!(parse_date("2026/05/03"), expected);
        assert_eq!(parse_date(" 2026-05-03 "), expected);
        assert_eq!(parse_date("May 3rd"), None);
        assert_eq!(parse_date("2026-02-30"), None);
    }

    #[test]
    fn test_resolve_valid_range() {
        let today = date(2026, 1, 1);
        let (s, e) = resolve_dates(Some("2026-05-03"), Some("04/05/2026"), today);
        assert_eq!((s, e), (date(2026, 5, 3), date(2026, 5, 4)));
    }

    #[test]
    fn test_resolve_defaults() {
        let today = date(2026, 12, 28);
        let fallback = (date(2027, 1, 4), date(2027, 1, 6));
        assert_eq!(resolve_dates(None, None, today), fallback);
        assert_eq!(resolve_dates(Some("2026-05-03"), None, today), fallback);
        assert_eq!(resolve_dates(Some("2026-05-03"), Some("garbage"), today), fallback);
        assert_eq!(
            resolve_dates(Some("2026-05-04"), Some("2026-05-03"), today),
            fallback
        );
    }

    #[test]
    fn test_single_day_range() {
        let d = date(2026, 5, 3);
        assert_eq!(resolve_dates(Some("2026-05-03"), Some("2026-05-03"), d), (d, d));
        assert_eq!(date_range(d, d), vec![d]);
    }

    #[test]
    fn test_date_range_crosses_month() {
        let days = date_range(date(2026, 1, 30), date(2026, 2, 2));
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], date(2026, 2, 2));
    }
}
