//! Date-range recognition for entry bodies.
//!
//! A date line is `<date> - <date>` (also `–`, `—` or `to`) where the end
//! may be `Present`. Lines may be wrapped in `*`/`_` emphasis. The regex
//! decides whether a line *is* a date line; `chrono` then decides whether
//! each token is a real calendar month or year. A token that looks like a
//! date but is not one (`Foo 2020`, `13/2021`, `Jan 21`) keeps its raw
//! text and is reported back as malformed.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use folio_shared::{DateRange, PRESENT};

/// Years outside this window are treated as typos.
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// A date line split into its range plus any tokens that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRange {
    pub range: DateRange,
    pub malformed: Vec<String>,
}

/// Recognise a date-range line. Returns `None` when the line is not shaped
/// like a range at all.
pub fn parse_date_range(line: &str) -> Option<ParsedRange> {
    static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
        let token = r"[A-Za-z]{3,9}\.?\s+\d{2,4}|\d{1,2}/\d{4}|\d{4}(?:[-/]\d{1,2})?";
        Regex::new(&format!(
            r"(?i)^(?P<start>{token})\s*(?:-|–|—|\s+to\s+)\s*(?P<end>{token}|present|current|now|today)$"
        ))
        .expect("valid regex")
    });

    let text = line.trim().trim_matches(['*', '_']).trim();
    let caps = RANGE_RE.captures(text)?;

    let start = caps["start"].trim().to_string();
    let end = normalize_end(caps["end"].trim());

    let malformed = [start.as_str(), end.as_str()]
        .into_iter()
        .filter(|tok| *tok != PRESENT && !is_valid_date(tok))
        .map(str::to_string)
        .collect();

    Some(ParsedRange {
        range: DateRange { start, end },
        malformed,
    })
}

/// Map the open-ended synonyms onto [`PRESENT`].
fn normalize_end(token: &str) -> String {
    match token.to_lowercase().as_str() {
        "present" | "current" | "now" | "today" => PRESENT.to_string(),
        _ => token.to_string(),
    }
}

/// Whether `token` names a real year or month.
///
/// Accepted: `2020`, `Jan 2020`, `January 2020`, `Sept. 2020`, `2020-01`,
/// `2020/1`, `01/2020`.
pub fn is_valid_date(token: &str) -> bool {
    let token = token.trim();

    if let Some((a, b)) = token.split_once(['-', '/']) {
        let (year, month) = if a.len() == 4 { (a, b) } else { (b, a) };
        return match (year.parse::<i32>(), month.parse::<u32>()) {
            (Ok(y), Ok(m)) => year_in_range(y) && NaiveDate::from_ymd_opt(y, m, 1).is_some(),
            _ => false,
        };
    }

    if let Some((month, year)) = token.split_once(char::is_whitespace) {
        let month = month.trim_end_matches('.');
        let month = if month.eq_ignore_ascii_case("sept") { "sep" } else { month };
        let year = year.trim();
        if year.len() != 4 {
            return false;
        }
        return NaiveDate::parse_from_str(&format!("1 {month} {year}"), "%d %B %Y")
            .is_ok_and(|d| year_in_range(chrono::Datelike::year(&d)));
    }

    token.len() == 4 && token.parse::<i32>().is_ok_and(year_in_range)
}

fn year_in_range(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}
