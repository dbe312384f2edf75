//! Line-level markdown recognisers.
//!
//! Each helper looks at one line in isolation. The sectionizer and the
//! content builder only ever need these few constructs: ATX headings, code
//! fences, and list bullets.

use std::sync::LazyLock;

use regex::Regex;

/// A recognised ATX heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1–6.
    pub level: u8,
    /// Heading text with the closing `#` sequence removed, trimmed.
    pub text: String,
}

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

/// Parse an ATX heading (`## Title`). Returns `None` for body text,
/// including `#tag` (no space) and runs of seven or more `#`.
pub fn parse_heading(line: &str) -> Option<Heading> {
    static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?[ \t]*$").expect("valid regex")
    });

    let caps = HEADING_RE.captures(line)?;
    let level = u8::try_from(caps[1].len()).ok()?;
    let text = caps.get(2).map_or("", |m| m.as_str());

    Some(Heading {
        level,
        text: strip_closing_sequence(text).to_string(),
    })
}

/// Remove an optional closing `#` run (`## Title ##` → `Title`).
fn strip_closing_sequence(text: &str) -> &str {
    let trimmed = text.trim_end();
    let without = trimmed.trim_end_matches('#');

    if without.is_empty() {
        return "";
    }
    if without.len() != trimmed.len() && without.ends_with([' ', '\t']) {
        return without.trim_end();
    }
    trimmed
}

// ---------------------------------------------------------------------------
// Code fences
// ---------------------------------------------------------------------------

/// Tracks whether the scan is inside a fenced code block.
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Feed the next line. Returns `true` when the line is a fence marker or
    /// part of a fenced block, i.e. it must not be read as markdown structure.
    pub fn observe(&mut self, line: &str) -> bool {
        let marker = fence_marker(line);

        match (self.open, marker) {
            (None, Some(m)) => {
                self.open = Some(m);
                true
            }
            (None, None) => false,
            (Some((ch, len)), Some((m_ch, m_len)))
                if ch == m_ch && m_len >= len && is_bare_fence(line) =>
            {
                self.open = None;
                true
            }
            (Some(_), _) => true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

/// A closing fence carries no info string: nothing but the run and trailing spaces.
fn is_bare_fence(line: &str) -> bool {
    line.trim_start_matches(' ')
        .trim_start_matches(['`', '~'])
        .trim()
        .is_empty()
}

/// Fence character and run length if `line` opens or closes a code fence.
fn fence_marker(line: &str) -> Option<(char, usize)> {
    static FENCE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("valid regex"));

    let caps = FENCE_RE.captures(line)?;
    let run = &caps[1];
    let ch = run.chars().next()?;
    Some((ch, run.len()))
}

// ---------------------------------------------------------------------------
// List items
// ---------------------------------------------------------------------------

/// If `line` is a list item (`-`, `*`, `+`, `1.` or `1)`), return its content
/// with the marker removed.
pub fn strip_bullet(line: &str) -> Option<&str> {
    static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\s*(?:[-*+]|\d{1,9}[.)])(?:\s+(.*))?$").expect("valid regex")
    });

    let caps = BULLET_RE.captures(line)?;
    Some(caps.get(1).map_or("", |m| m.as_str().trim_end()))
}

/// Leading indentation in columns (tab = 4).
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}
