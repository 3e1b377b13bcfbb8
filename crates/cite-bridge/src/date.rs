//! Parsing of free-form date strings into year, month and day.
//!
//! Months are 0-based here, matching how the record store keeps them. Any
//! text left over once the numeric parts and the month name are removed is
//! reported as `part` (e.g. "Spring", "BC", "n.d.").

use once_cell::sync::Lazy;
use regex::Regex;

/// A date string broken into its components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDate {
    pub year: Option<i32>,
    /// 0-based month (January = 0).
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Leftover non-date text.
    pub part: Option<String>,
}

static YEAR_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})[-/.](\d{1,2})(?:[-/.](\d{1,2}))?(?:$|[T\s](.*)$)").unwrap()
});

static YEAR_LAST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})([-/.])(\d{1,2})[-/.](\d{4})(?:$|\s(.*)$)").unwrap()
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{3,4})\b").unwrap());

static MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\b\.?").unwrap()
});

static DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\b").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parse a date string.
///
/// Recognizes `YYYY-MM-DD` (and `/` or `.` separators), `MM/DD/YYYY`,
/// `DD.MM.YYYY` and textual dates such as "May 3, 2020" or "3rd May 2020".
pub fn parse_date(value: &str) -> ParsedDate {
    let value = value.trim();
    if value.is_empty() {
        return ParsedDate::default();
    }

    if let Some(date) = parse_numeric(value) {
        return date;
    }

    parse_textual(value)
}

fn parse_numeric(value: &str) -> Option<ParsedDate> {
    if let Some(caps) = YEAR_FIRST_RE.captures(value) {
        let year = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day = caps.get(3).and_then(|d| d.as_str().parse::<u32>().ok());
        if !(1..=12).contains(&month) {
            return None;
        }
        return Some(ParsedDate {
            year: Some(year),
            month: Some(month - 1),
            day: day.filter(|d| (1..=31).contains(d)),
            part: leftover(caps.get(4).map_or("", |m| m.as_str())),
        });
    }

    if let Some(caps) = YEAR_LAST_RE.captures(value) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[3].parse().ok()?;
        let year = caps[4].parse().ok()?;
        // Slashes and dashes read month first; dots read day first. A month
        // slot that cannot be a month swaps the order.
        let (mut month, mut day) = if &caps[2] == "." {
            (second, first)
        } else {
            (first, second)
        };
        if month > 12 && day <= 12 {
            std::mem::swap(&mut month, &mut day);
        }
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        return Some(ParsedDate {
            year: Some(year),
            month: Some(month - 1),
            day: Some(day),
            part: leftover(caps.get(5).map_or("", |m| m.as_str())),
        });
    }

    None
}

fn parse_textual(value: &str) -> ParsedDate {
    let mut rest = value.to_string();
    let mut date = ParsedDate::default();

    if let Some(m) = YEAR_RE.find(&rest) {
        date.year = m.as_str().parse().ok();
        let range = m.range();
        rest.replace_range(range, " ");
    }

    if let Some(caps) = MONTH_RE.captures(&rest) {
        let prefix = caps[1].to_lowercase();
        date.month = MONTH_PREFIXES
            .iter()
            .position(|p| *p == prefix)
            .map(|i| i as u32);
        if let Some(range) = caps.get(0).map(|m| m.range()) {
            rest.replace_range(range, " ");
        }
    }

    if date.month.is_some() {
        let day = DAY_RE.captures(&rest).and_then(|caps| {
            let day: u32 = caps[1].parse().ok()?;
            (1..=31).contains(&day).then(|| (day, caps.get(0).map(|m| m.range())))
        });
        if let Some((day, Some(range))) = day {
            date.day = Some(day);
            rest.replace_range(range, " ");
        }
    }

    date.part = leftover(&rest);
    date
}

fn leftover(text: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    let trimmed = collapsed.trim_matches(|c: char| c.is_whitespace() || c == ',');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
