//! Friendly display strings for the hand-written dates in the projects file.
//!
//! [`format_date`] recognizes a fixed family of notations ("Nov 23, 2024",
//! "Aug 8-11, 2025", "April 2024 - June 2nd 2025", ...) and rewrites them with
//! abbreviated months and ordinal days. Anything it doesn't recognize is handed
//! to a generic calendar-date parser and, failing that, echoed back. It never
//! fails.

use chrono::{DateTime, NaiveDate};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Month names paired with the abbreviation they display as.
const MONTHS: [(&str, &str); 12] = [
    ("january", "Jan"),
    ("february", "Feb"),
    ("march", "Mar"),
    ("april", "Apr"),
    ("may", "May"),
    ("june", "Jun"),
    ("july", "Jul"),
    ("august", "Aug"),
    ("september", "Sep"),
    ("october", "Oct"),
    ("november", "Nov"),
    ("december", "Dec"),
];

/// The recognized shapes, tried in declaration order. Hyphens are collapsed
/// to a bare `-` before any of these run.
struct Shapes {
    dash: Regex,
    month_range_comma: Regex,
    month_range: Regex,
    full_range: Regex,
    month_year_range: Regex,
    month_year_to_full: Regex,
    day_range: Regex,
    single: Regex,
    month_comma_year: Regex,
    month_year: Regex,
    year: Regex,
}

impl Shapes {
    fn new() -> Shapes {
        // The patterns are literals; compiling them can't fail.
        let re = |pattern: &str| Regex::new(pattern).unwrap();
        const DAY: &str = r"([0-9]{1,2})(?:st|nd|rd|th)?";
        Shapes {
            dash: re(r"\s*-\s*"),
            month_range_comma: re(r"^([A-Za-z]+)\s*-\s*([A-Za-z]+),\s*([0-9]{4})$"),
            month_range: re(r"^([A-Za-z]+)\s*-\s*([A-Za-z]+)\s+([0-9]{4})$"),
            full_range: re(&format!(
                r"^([A-Za-z]+)\s+{day}\s*,?\s+([0-9]{{4}})\s*-\s*([A-Za-z]+)\s+{day}\s*,?\s+([0-9]{{4}})$",
                day = DAY
            )),
            month_year_range: re(r"^([A-Za-z]+)\s+([0-9]{4})\s*-\s*([A-Za-z]+)\s+([0-9]{4})$"),
            month_year_to_full: re(&format!(
                r"^([A-Za-z]+)\s+([0-9]{{4}})\s*-\s*([A-Za-z]+)\s+{day}\s*,?\s+([0-9]{{4}})$",
                day = DAY
            )),
            day_range: re(r"^([A-Za-z]+)\s+([0-9]{1,2})\s*-\s*([0-9]{1,2}),\s*([0-9]{4})$"),
            single: re(r"^([A-Za-z]+)\s+([0-9]{1,2}),?\s+([0-9]{4})$"),
            month_comma_year: re(r"^([A-Za-z]+),\s*([0-9]{4})$"),
            month_year: re(r"^([A-Za-z]+)\s+([0-9]{4})$"),
            year: re(r"^[0-9]{4}$"),
        }
    }
}

static SHAPES: LazyLock<Shapes> = LazyLock::new(Shapes::new);

/// Formats a date or date range for display. Empty or missing input yields an
/// empty string; unrecognized input is returned trimmed but otherwise as-is.
///
/// ```
/// use showcase::date::format_date;
///
/// assert_eq!(format_date("Nov 23, 2024"), "Nov 23rd 2024");
/// assert_eq!(format_date("Aug 8-11, 2025"), "Aug 8-11th 2025");
/// assert_eq!(format_date(None), "");
/// ```
pub fn format_date<'a>(input: impl Into<Option<&'a str>>) -> String {
    let raw = input.into().unwrap_or_default().trim();
    if raw.is_empty() {
        return String::new();
    }

    let shapes = &*SHAPES;
    let normalized = shapes.dash.replace_all(raw, "-");
    let s: &str = &normalized;

    if let Some(c) = shapes
        .month_range_comma
        .captures(s)
        .or_else(|| shapes.month_range.captures(s))
    {
        return format!("{}-{} {}", month(&c[1]), month(&c[2]), &c[3]);
    }

    if let Some(c) = shapes.full_range.captures(s) {
        return format!(
            "{} {} {} - {} {} {}",
            month(&c[1]),
            ordinal(day(&c, 2)),
            &c[3],
            month(&c[4]),
            ordinal(day(&c, 5)),
            &c[6],
        );
    }

    if let Some(c) = shapes.month_year_range.captures(s) {
        return format!("{} {} - {} {}", month(&c[1]), &c[2], month(&c[3]), &c[4]);
    }

    if let Some(c) = shapes.month_year_to_full.captures(s) {
        return format!(
            "{} {} - {} {} {}",
            month(&c[1]),
            &c[2],
            month(&c[3]),
            ordinal(day(&c, 4)),
            &c[5],
        );
    }

    // Only the end of a same-month range gets a suffix: "Aug 8-11th 2025".
    if let Some(c) = shapes.day_range.captures(s) {
        return format!("{} {}-{} {}", month(&c[1]), &c[2], ordinal(day(&c, 3)), &c[4]);
    }

    if let Some(c) = shapes.single.captures(s) {
        return format!("{} {} {}", month(&c[1]), ordinal(day(&c, 2)), &c[3]);
    }

    if let Some(c) = shapes
        .month_comma_year
        .captures(s)
        .or_else(|| shapes.month_year.captures(s))
    {
        return format!("{} {}", month(&c[1]), &c[2]);
    }

    if shapes.year.is_match(s) {
        return s.to_owned();
    }

    match parse_calendar_date(s) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_owned(),
    }
}

/// Appends the English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th,
/// 21st, ...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, rem) if rem != 11 => "st",
        (2, rem) if rem != 12 => "nd",
        (3, rem) if rem != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Abbreviates a month token ("november", "Sept", "NOV" all become "Nov").
/// Tokens that aren't a prefix of some month name of at least three letters
/// are returned unchanged.
fn month(token: &str) -> &str {
    let lower = token.to_ascii_lowercase();
    if lower.len() < 3 {
        return token;
    }
    MONTHS
        .iter()
        .find(|(name, _)| name.starts_with(lower.as_str()))
        .map_or(token, |&(_, abbreviation)| abbreviation)
}

fn day(captures: &Captures, group: usize) -> u32 {
    // The pattern only admits one or two ASCII digits here.
    captures[group].parse().unwrap_or_default()
}

/// Best-effort interpretation of everything the shapes above don't cover.
fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%B %d %Y"];

    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|timestamp| timestamp.naive_local().date())
        })
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCase {
        input: &'static str,
        wanted: &'static str,
    }

    fn run(cases: &[TestCase]) {
        for case in cases {
            let found = format_date(case.input);
            assert_eq!(
                case.wanted, found,
                "input \"{}\": wanted \"{}\"; found \"{}\"",
                case.input, case.wanted, found
            );
        }
    }

    #[test]
    fn test_empty_and_missing() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_documented_cases() {
        run(&[
            TestCase { input: "May 2024", wanted: "May 2024" },
            TestCase { input: "2024", wanted: "2024" },
            TestCase { input: "Nov 23, 2024", wanted: "Nov 23rd 2024" },
            TestCase { input: "Aug 8-11, 2025", wanted: "Aug 8-11th 2025" },
            TestCase { input: "not a date", wanted: "not a date" },
        ]);
    }

    #[test]
    fn test_month_ranges() {
        run(&[
            TestCase { input: "Sep - Nov, 2024", wanted: "Sep-Nov 2024" },
            TestCase { input: "April-June 2024", wanted: "Apr-Jun 2024" },
            TestCase { input: "april - JUNE 2024", wanted: "Apr-Jun 2024" },
        ]);
    }

    #[test]
    fn test_full_ranges() {
        run(&[
            TestCase {
                input: "April 6th 2024 - June 3rd 2025",
                wanted: "Apr 6th 2024 - Jun 3rd 2025",
            },
            TestCase {
                input: "April 6, 2024 - June 3, 2025",
                wanted: "Apr 6th 2024 - Jun 3rd 2025",
            },
            TestCase {
                input: "April 2024 - June 2025",
                wanted: "Apr 2024 - Jun 2025",
            },
            TestCase {
                input: "April 2024 - June 2nd 2025",
                wanted: "Apr 2024 - Jun 2nd 2025",
            },
        ]);
    }

    #[test]
    fn test_day_range_keeps_start_day_bare() {
        run(&[
            TestCase { input: "Jul 12 - 19, 2024", wanted: "Jul 12-19th 2024" },
            TestCase { input: "Jul 01-02, 2024", wanted: "Jul 01-2nd 2024" },
        ]);
    }

    #[test]
    fn test_single_dates() {
        run(&[
            TestCase { input: "Nov 23 2024", wanted: "Nov 23rd 2024" },
            TestCase { input: "september 1, 2023", wanted: "Sep 1st 2023" },
            TestCase { input: "May, 2024", wanted: "May 2024" },
            TestCase { input: "  March 2021 ", wanted: "Mar 2021" },
        ]);
    }

    #[test]
    fn test_unrecognized_month_tokens_pass_through() {
        run(&[
            TestCase { input: "Summer 2024", wanted: "Summer 2024" },
            TestCase { input: "Sept 2024", wanted: "Sep 2024" },
            TestCase { input: "Ma 2024", wanted: "Ma 2024" },
        ]);
    }

    #[test]
    fn test_generic_fallback() {
        run(&[
            TestCase { input: "2024-05-03", wanted: "May 3, 2024" },
            TestCase { input: "2024/12/25", wanted: "Dec 25, 2024" },
            TestCase { input: "2024-05", wanted: "May 1, 2024" },
            TestCase { input: "2024-05-03T10:00:00Z", wanted: "May 3, 2024" },
            TestCase { input: "sometime soon", wanted: "sometime soon" },
        ]);
    }

    #[test]
    fn test_ordinal_boundaries() {
        for (n, wanted) in [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (31, "31st"),
        ] {
            assert_eq!(ordinal(n), wanted);
        }
    }

    #[test]
    fn test_ordinal_suffix_rule() {
        for n in 1..=31 {
            let found = ordinal(n);
            let wanted = match (n % 10, n % 100) {
                (1, r) if r != 11 => "st",
                (2, r) if r != 12 => "nd",
                (3, r) if r != 13 => "rd",
                _ => "th",
            };
            assert!(found.ends_with(wanted), "{} -> {}", n, found);
            assert!(found.starts_with(&n.to_string()));
        }
    }
}
