//! Line classification for experience, project and education entries.
//!
//! Every body line of an entry is classified on its own by walking
//! [`ENTRY_RULES`] in order; the first rule that recognises the line wins.
//! The only state carried between lines is whether a bare `Tags:` label
//! has opened a nested tag list.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use folio_markdown::syntax::{indent_width, strip_bullet};
use folio_shared::Link;

use crate::dates::{ParsedRange, parse_date_range};

/// Labels whose value is a tag list.
const TAG_LABELS: &[&str] = &[
    "tags",
    "skills",
    "tech",
    "stack",
    "tech stack",
    "technologies",
    "built with",
];

/// Labels whose value is a URL.
const LINK_LABELS: &[&str] = &[
    "link",
    "links",
    "url",
    "repo",
    "repository",
    "github",
    "source",
    "demo",
    "live",
    "website",
    "site",
];

/// Labels whose value names the employer or institution.
const ORGANIZATION_LABELS: &[&str] = &[
    "company",
    "organization",
    "organisation",
    "employer",
    "school",
    "institution",
    "university",
];

/// What a single entry body line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLine<'a> {
    /// A date range; may carry malformed tokens.
    Dates(ParsedRange),
    /// A bullet under an open bare `Tags:` label.
    NestedTag(&'a str),
    /// A list item; marker removed.
    Bullet(&'a str),
    /// A tag label. An empty list opens a nested tag list.
    Tags(Vec<String>),
    /// A link label with a valid absolute URL.
    Link(Link),
    /// A link label whose value is not a usable URL.
    BadLink(&'a str),
    /// An employer / institution label.
    Organization(&'a str),
    /// Anything else, trimmed.
    Description(&'a str),
}

/// State threaded between lines of one entry.
#[derive(Debug, Default, Clone)]
pub struct ClassifyState {
    /// Indentation of the bare `Tags:` line whose nested list is open.
    open_tag_list: Option<usize>,
}

type Matcher = for<'a> fn(&'a str, &ClassifyState) -> Option<EntryLine<'a>>;

/// Classification rules in priority order. The last rule always matches.
pub const ENTRY_RULES: &[(&str, Matcher)] = &[
    ("date-range", match_date_range),
    ("nested-tag", match_nested_tag),
    ("bullet", match_bullet),
    ("tag-label", match_tag_label),
    ("link-label", match_link_label),
    ("organization-label", match_organization_label),
    ("description", match_description),
];

/// Classify one line against [`ENTRY_RULES`] without touching state.
pub fn classify<'a>(line: &'a str, state: &ClassifyState) -> EntryLine<'a> {
    ENTRY_RULES
        .iter()
        .find_map(|(_, rule)| rule(line, state))
        .unwrap_or_else(|| EntryLine::Description(line.trim()))
}

/// Walks an entry's body lines, classifying each and tracking nested tag lists.
#[derive(Debug, Default)]
pub struct EntryClassifier {
    state: ClassifyState,
}

impl EntryClassifier {
    /// Classify the next line. Blank lines return `None` and close any open
    /// nested tag list.
    pub fn next_line<'a>(&mut self, line: &'a str) -> Option<EntryLine<'a>> {
        if line.trim().is_empty() {
            self.state.open_tag_list = None;
            return None;
        }

        let class = classify(line, &self.state);
        self.state.open_tag_list = match &class {
            EntryLine::NestedTag(_) => self.state.open_tag_list,
            EntryLine::Tags(tags) if tags.is_empty() => Some(indent_width(line)),
            _ => None,
        };
        Some(class)
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn match_date_range<'a>(line: &'a str, _: &ClassifyState) -> Option<EntryLine<'a>> {
    parse_date_range(line).map(EntryLine::Dates)
}

fn match_nested_tag<'a>(line: &'a str, state: &ClassifyState) -> Option<EntryLine<'a>> {
    let indent = state.open_tag_list?;
    if indent_width(line) < indent {
        return None;
    }
    strip_bullet(line).map(|tag| EntryLine::NestedTag(tag.trim()))
}

fn match_bullet<'a>(line: &'a str, _: &ClassifyState) -> Option<EntryLine<'a>> {
    strip_bullet(line).map(|item| EntryLine::Bullet(item.trim()))
}

fn match_tag_label<'a>(line: &'a str, _: &ClassifyState) -> Option<EntryLine<'a>> {
    let (label, value) = split_label(line)?;
    is_label(label, TAG_LABELS).then(|| EntryLine::Tags(split_list(value)))
}

fn match_link_label<'a>(line: &'a str, _: &ClassifyState) -> Option<EntryLine<'a>> {
    let (label, value) = split_label(line)?;
    if !is_label(label, LINK_LABELS) {
        return None;
    }
    Some(match parse_link(label, value) {
        Some(link) => EntryLine::Link(link),
        None => EntryLine::BadLink(line.trim()),
    })
}

fn match_organization_label<'a>(line: &'a str, _: &ClassifyState) -> Option<EntryLine<'a>> {
    let (label, value) = split_label(line)?;
    (is_label(label, ORGANIZATION_LABELS) && !value.is_empty())
        .then_some(EntryLine::Organization(value))
}

fn match_description<'a>(line: &'a str, _: &ClassifyState) -> Option<EntryLine<'a>> {
    Some(EntryLine::Description(line.trim()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_label(label: &str, known: &[&str]) -> bool {
    let label = label.to_lowercase();
    known.contains(&label.as_str())
}

/// Split `Label: value`, tolerating bold labels (`**Tags:** a, b`).
/// Labels are short and start with a letter.
pub fn split_label(line: &str) -> Option<(&str, &str)> {
    static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^\s*(?:\*\*|__)?\s*([A-Za-z][A-Za-z &/-]{0,39}?)\s*(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(.*?)\s*$",
        )
        .expect("valid regex")
    });

    let caps = LABEL_RE.captures(line)?;
    let label = caps.get(1)?.as_str();
    let value = caps.get(2).map_or("", |m| m.as_str());
    Some((label, value))
}

/// Split a comma- or pipe-delimited list; trims items and drops empties.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a URL from a label value: bare, `<url>`, or `[text](url)`.
/// Only absolute http(s) and mailto URLs are accepted.
pub fn parse_link(label: &str, value: &str) -> Option<Link> {
    static MD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\[([^\]]*)\]\(\s*([^)\s]+)\s*\)$").expect("valid regex")
    });

    let value = value.trim();
    let (text, raw) = match MD_LINK_RE.captures(value) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()).trim(),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => ("", value.trim_start_matches('<').trim_end_matches('>')),
    };

    let url = absolute_url(raw)?;
    Some(Link {
        label: if text.is_empty() { label.trim().to_string() } else { text.to_string() },
        url,
    })
}

/// Normalized absolute URL if `raw` is one.
pub fn absolute_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Some(url.to_string()),
        "mailto" => Some(url.to_string()),
        _ => None,
    }
}
