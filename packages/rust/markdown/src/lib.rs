//! Markdown sectionizer.
//!
//! Splits a markdown document into a tree of [`Section`]s keyed by ATX
//! heading level. The tree is built with an explicit stack of owned nodes:
//! a heading pops every open section at the same or a deeper level (each
//! popped node is moved into its parent's `children`), then pushes itself.
//! Parents own their children by value, so no back references are needed.
//!
//! The sectionizer never fails. Text it cannot place simply becomes body
//! text of whatever section is open, ultimately the synthetic root.

pub mod syntax;

use serde::Serialize;
use tracing::{debug, instrument};

use syntax::{FenceTracker, parse_heading};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One heading and everything under it up to the next heading at the same
/// or a shallower level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Heading text without markup. Empty for the root.
    pub heading: String,
    /// 0 for the synthetic root, otherwise 1–6. Always less than every child's level.
    pub level: u8,
    /// 1-based source line of the heading (0 for the root).
    pub line: usize,
    /// Lines directly under this heading and before its first child, verbatim.
    pub body_lines: Vec<String>,
    /// Nested sections in document order.
    pub children: Vec<Section>,
}

impl Section {
    fn new(heading: String, level: u8, line: usize) -> Self {
        Self {
            heading,
            level,
            line,
            body_lines: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Pre-order `(level, heading)` sequence of every section below this one.
    pub fn flatten(&self) -> Vec<(u8, &str)> {
        self.descendants()
            .map(|s| (s.level, s.heading.as_str()))
            .collect()
    }

    /// Pre-order iterator over every section below this one (self excluded).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// This section's body followed by the bodies of all descendants, in
    /// document order. Nested heading text is not included.
    pub fn all_body_lines(&self) -> impl Iterator<Item = &str> {
        self.body_lines
            .iter()
            .chain(self.descendants().flat_map(|s| s.body_lines.iter()))
            .map(String::as_str)
    }

    /// True when the body holds nothing but whitespace.
    pub fn body_is_blank(&self) -> bool {
        self.body_lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Iterator returned by [`Section::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Section>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

// ---------------------------------------------------------------------------
// Sectionizer
// ---------------------------------------------------------------------------

/// Split `markdown` into a section tree under a synthetic level-0 root.
///
/// Lines before the first heading belong to the root. Skipped levels are
/// tolerated: `# A` followed by `### B` makes `B` a direct child of `A`.
/// Lines inside fenced code blocks are never treated as headings.
#[instrument(skip_all, fields(len = markdown.len()))]
pub fn sectionize(markdown: &str) -> Section {
    let mut stack: Vec<Section> = vec![Section::default()];
    let mut fences = FenceTracker::default();
    let mut count = 0usize;

    for (idx, line) in markdown.lines().enumerate() {
        let heading = if fences.observe(line) {
            None
        } else {
            parse_heading(line)
        };

        let Some(heading) = heading else {
            if let Some(top) = stack.last_mut() {
                top.body_lines.push(line.to_string());
            }
            continue;
        };

        // Close every open section at the same or a deeper level.
        while stack.len() > 1 && stack.last().is_some_and(|s| s.level >= heading.level) {
            close_top(&mut stack);
        }

        stack.push(Section::new(heading.text, heading.level, idx + 1));
        count += 1;
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }

    if fences.is_open() {
        debug!("code fence still open at end of document");
    }
    debug!(sections = count, "sectionized document");

    stack.pop().unwrap_or_default()
}

/// Pop the top section and attach it to the new top.
fn close_top(stack: &mut Vec<Section>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(done);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
