//! Core domain types for the portfolio content model.
//!
//! Everything here serializes with camelCase keys because the generated
//! asset is loaded by a TypeScript front end.

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// The literal token used for an open-ended date range.
pub const PRESENT: &str = "Present";

// ---------------------------------------------------------------------------
// Bucket
// ---------------------------------------------------------------------------

/// One of the six fixed top-level portfolio categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Bio,
    Experience,
    Projects,
    Education,
    Skills,
    Contact,
}

impl Bucket {
    /// All buckets in canonical output order.
    pub const ALL: [Bucket; 6] = [
        Bucket::Bio,
        Bucket::Experience,
        Bucket::Projects,
        Bucket::Education,
        Bucket::Skills,
        Bucket::Contact,
    ];

    /// Lowercase canonical name (also the `viewType` value).
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Bio => "bio",
            Bucket::Experience => "experience",
            Bucket::Projects => "projects",
            Bucket::Education => "education",
            Bucket::Skills => "skills",
            Bucket::Contact => "contact",
        }
    }

    /// ID prefix for entry buckets, `None` for the others.
    pub fn id_prefix(self) -> Option<&'static str> {
        match self {
            Bucket::Experience => Some("exp"),
            Bucket::Projects => Some("proj"),
            Bucket::Education => Some("edu"),
            Bucket::Bio | Bucket::Skills | Bucket::Contact => None,
        }
    }

    /// Whether this bucket holds a list of [`Entry`] records.
    pub fn has_entries(self) -> bool {
        self.id_prefix().is_some()
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Bucket {
    type Err = FolioError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Bucket::ALL
            .into_iter()
            .find(|b| b.as_str() == wanted)
            .ok_or_else(|| {
                FolioError::validation(format!(
                    "unknown view type '{s}' (expected one of: bio, experience, projects, education, skills, contact)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// PortfolioContent
// ---------------------------------------------------------------------------

/// Root of the typed portfolio model.
///
/// Built once per parse and never mutated afterwards; a re-parse produces a
/// new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<Profile>,
    #[serde(default)]
    pub experience: Vec<Entry>,
    #[serde(default)]
    pub projects: Vec<Entry>,
    #[serde(default)]
    pub education: Vec<Entry>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Profile>,
}

impl PortfolioContent {
    /// True when no bucket carries any content.
    pub fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.contact.is_none()
    }

    /// Entries of an entry bucket; empty for bio, skills and contact.
    pub fn entries(&self, bucket: Bucket) -> &[Entry] {
        match bucket {
            Bucket::Experience => &self.experience,
            Bucket::Projects => &self.projects,
            Bucket::Education => &self.education,
            Bucket::Bio | Bucket::Skills | Bucket::Contact => &[],
        }
    }

    /// Number of records held by a bucket (0 or 1 for bio/contact).
    pub fn count(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Bio => usize::from(self.bio.is_some()),
            Bucket::Contact => usize::from(self.contact.is_some()),
            Bucket::Skills => self.skills.len(),
            Bucket::Experience | Bucket::Projects | Bucket::Education => {
                self.entries(bucket).len()
            }
        }
    }

    /// Find an entry by its exact ID across all entry buckets.
    pub fn find_entry(&self, id: &str) -> Option<&Entry> {
        self.experience
            .iter()
            .chain(&self.projects)
            .chain(&self.education)
            .find(|e| e.id == id)
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A single experience, project or education record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// `<prefix>-<n>`, 1-based within the bucket (e.g. `proj-1`).
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// A start/end pair as written by the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: String,
    /// [`PRESENT`] for an ongoing range.
    pub end: String,
}

impl DateRange {
    pub fn is_ongoing(&self) -> bool {
        self.end == PRESENT
    }
}

/// A labelled absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// SkillGroup / Profile
// ---------------------------------------------------------------------------

/// Named group of skills. Duplicates are preserved in authoring order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

/// Flat key/value record used for the bio and contact buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Lines that could not be read as `key: value`, kept verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Profile {
    /// Case-insensitive lookup of the first field with this key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(key))
            .map(|f| f.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.notes.is_empty()
    }

    /// Append another record's fields and notes (repeated bucket headings).
    pub fn merge(&mut self, other: Profile) {
        self.fields.extend(other.fields);
        self.notes.extend(other.notes);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// ParseWarning
// ---------------------------------------------------------------------------

/// Category of a recoverable parse problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    UnrecognizedHeading,
    MissingField,
    MalformedDate,
    MalformedLink,
}

/// A non-fatal diagnostic produced while building the content model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub kind: WarningKind,
    /// The offending heading text or source line.
    pub context: String,
    /// 1-based source line, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ParseWarning {
    pub fn new(kind: WarningKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        // Line 0 is the synthetic root, which has no source position.
        self.line = (line > 0).then_some(line);
        self
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            WarningKind::UnrecognizedHeading => "unrecognized heading",
            WarningKind::MissingField => "missing field",
            WarningKind::MalformedDate => "malformed date",
            WarningKind::MalformedLink => "malformed link",
        };
        match self.line {
            Some(line) => write!(f, "line {line}: {what}: {}", self.context),
            None => write!(f, "{what}: {}", self.context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str) -> Entry {
        Entry {
            id: id.into(),
            title: title.into(),
            ..Entry::default()
        }
    }

    #[test]
    fn bucket_parses_case_insensitively() {
        assert_eq!("Projects".parse::<Bucket>().unwrap(), Bucket::Projects);
        assert_eq!(" bio ".parse::<Bucket>().unwrap(), Bucket::Bio);
        let err = "hobbies".parse::<Bucket>().unwrap_err();
        assert!(err.to_string().contains("hobbies"));
    }

    #[test]
    fn bucket_id_prefixes() {
        assert_eq!(Bucket::Experience.id_prefix(), Some("exp"));
        assert_eq!(Bucket::Projects.id_prefix(), Some("proj"));
        assert_eq!(Bucket::Education.id_prefix(), Some("edu"));
        assert!(!Bucket::Skills.has_entries());
    }

    #[test]
    fn content_serializes_camel_case_and_skips_empty() {
        let content = PortfolioContent {
            projects: vec![Entry {
                dates: Some(DateRange {
                    start: "2021".into(),
                    end: PRESENT.into(),
                }),
                ..entry("proj-1", "Alpha")
            }],
            ..PortfolioContent::default()
        };

        let json = serde_json::to_value(&content).expect("serialize");
        assert!(json.get("bio").is_none());
        assert_eq!(json["projects"][0]["id"], "proj-1");
        assert_eq!(json["projects"][0]["dates"]["end"], "Present");
        assert!(json["projects"][0].get("tags").is_none());

        let parsed: PortfolioContent = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, content);
    }

    #[test]
    fn find_entry_searches_all_entry_buckets() {
        let content = PortfolioContent {
            experience: vec![entry("exp-1", "Engineer")],
            education: vec![entry("edu-1", "BSc")],
            ..PortfolioContent::default()
        };
        assert_eq!(content.find_entry("edu-1").unwrap().title, "BSc");
        assert!(content.find_entry("proj-1").is_none());
        assert_eq!(content.count(Bucket::Experience), 1);
        assert_eq!(content.count(Bucket::Bio), 0);
    }

    #[test]
    fn profile_lookup_ignores_case() {
        let profile = Profile {
            fields: vec![Field {
                key: "Email".into(),
                value: "jane@example.com".into(),
            }],
            notes: vec![],
        };
        assert_eq!(profile.get("email"), Some("jane@example.com"));
        assert_eq!(profile.get("phone"), None);
    }

    #[test]
    fn warning_display_includes_line() {
        let w = ParseWarning::new(WarningKind::UnrecognizedHeading, "Hobbies").at_line(12);
        assert_eq!(w.to_string(), "line 12: unrecognized heading: Hobbies");

        let w = ParseWarning::new(WarningKind::MissingField, "dates").at_line(0);
        assert_eq!(w.line, None);
    }
}
