//! Read-only projections of [`PortfolioContent`] for the chat tool.
//!
//! A [`ViewRequest`] mirrors the tool's input: which bucket to show, an
//! optional free-text filter, and an optional entry ID to highlight. The
//! resulting [`PortfolioView`] borrows from the content and never mutates it.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use folio_shared::{Bucket, Entry, PortfolioContent, Profile, SkillGroup};

/// Parameters of a portfolio render request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRequest {
    pub view_type: Bucket,
    /// Case-insensitive substring filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Exact entry ID to highlight (e.g. `proj-1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_id: Option<String>,
}

impl ViewRequest {
    pub fn new(view_type: Bucket) -> Self {
        Self {
            view_type,
            filter: None,
            highlight_id: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_highlight(mut self, id: impl Into<String>) -> Self {
        self.highlight_id = Some(id.into());
        self
    }

    /// Lowercased filter, `None` when absent or blank.
    fn needle(&self) -> Option<String> {
        self.filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase)
    }
}

/// Items selected by a view, shaped by bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewItems<'a> {
    Profile(Option<&'a Profile>),
    Entries(Vec<&'a Entry>),
    Skills(Vec<Cow<'a, SkillGroup>>),
}

/// A filtered, read-only slice of the content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView<'a> {
    pub view_type: Bucket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Set only when a visible entry carries the requested ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_id: Option<&'a str>,
    pub data: ViewItems<'a>,
}

impl<'a> PortfolioView<'a> {
    /// Visible entries (empty for non-entry views).
    pub fn entries(&self) -> &[&'a Entry] {
        match &self.data {
            ViewItems::Entries(entries) => entries,
            _ => &[],
        }
    }

    /// Number of visible records.
    pub fn len(&self) -> usize {
        match &self.data {
            ViewItems::Profile(profile) => usize::from(profile.is_some()),
            ViewItems::Entries(entries) => entries.len(),
            ViewItems::Skills(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Project `content` through `request`.
///
/// Entries are kept when their title or any tag contains the filter; for
/// experience the organization and subtitle are searched too, so a company
/// name works as a filter. Skill groups are kept whole when the category
/// matches, otherwise narrowed to the matching skills. Bio and contact are
/// single records and ignore the filter. Relative order is preserved.
pub fn project<'a>(content: &'a PortfolioContent, request: &ViewRequest) -> PortfolioView<'a> {
    let needle = request.needle();
    let bucket = request.view_type;

    let data = match bucket {
        Bucket::Bio => ViewItems::Profile(content.bio.as_ref()),
        Bucket::Contact => ViewItems::Profile(content.contact.as_ref()),
        Bucket::Skills => ViewItems::Skills(filter_skills(&content.skills, needle.as_deref())),
        Bucket::Experience | Bucket::Projects | Bucket::Education => ViewItems::Entries(
            content
                .entries(bucket)
                .iter()
                .filter(|e| needle.as_deref().is_none_or(|n| entry_matches(e, bucket, n)))
                .collect(),
        ),
    };

    let highlight_id = request.highlight_id.as_deref().and_then(|wanted| {
        let found = match &data {
            ViewItems::Entries(entries) => entries.iter().copied().find(|e| e.id == wanted),
            _ => None,
        };
        if found.is_none() {
            debug!(%bucket, wanted, "highlight id not among visible entries");
        }
        found.map(|e| e.id.as_str())
    });

    PortfolioView {
        view_type: bucket,
        filter: needle,
        highlight_id,
        data,
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn entry_matches(entry: &Entry, bucket: Bucket, needle: &str) -> bool {
    if contains(&entry.title, needle) || entry.tags.iter().any(|t| contains(t, needle)) {
        return true;
    }
    bucket == Bucket::Experience
        && [&entry.organization, &entry.subtitle]
            .into_iter()
            .flatten()
            .any(|s| contains(s, needle))
}

fn filter_skills<'a>(groups: &'a [SkillGroup], needle: Option<&str>) -> Vec<Cow<'a, SkillGroup>> {
    let Some(needle) = needle else {
        return groups.iter().map(Cow::Borrowed).collect();
    };

    groups
        .iter()
        .filter_map(|group| {
            if contains(&group.category, needle) {
                return Some(Cow::Borrowed(group));
            }
            let skills: Vec<String> = group
                .skills
                .iter()
                .filter(|s| contains(s, needle))
                .cloned()
                .collect();
            (!skills.is_empty()).then(|| {
                Cow::Owned(SkillGroup {
                    category: group.category.clone(),
                    skills,
                })
            })
        })
        .collect()
}
