//! Portfolio content builder.
//!
//! Maps a sectionized document onto [`PortfolioContent`]. The mapping is a
//! single pass over the top-level sections and never fails: anything it
//! cannot place is recorded as a [`ParseWarning`] and skipped.

use tracing::{debug, instrument};

use folio_markdown::syntax::strip_bullet;
use folio_markdown::{Section, sectionize};
use folio_shared::{
    Bucket, Entry, Field, ParseWarning, PortfolioContent, Profile, SkillGroup, WarningKind,
};

use crate::classify::{EntryClassifier, EntryLine, absolute_url, parse_link, split_label, split_list};
use crate::vocabulary::Vocabulary;

/// Category used for skills listed directly under the skills heading.
pub const GENERAL_SKILLS: &str = "General";

/// Longest key accepted in a bio/contact `key: value` line.
const MAX_FIELD_KEY_LEN: usize = 40;

/// Contact keys whose values must be absolute URLs.
const CONTACT_LINK_KEYS: &[&str] = &[
    "website", "site", "github", "gitlab", "linkedin", "twitter", "x", "mastodon", "url",
    "portfolio", "blog",
];

/// Separators between an entry title and its subtitle, in preference order.
const TITLE_SEPARATORS: &[&str] = &[" | ", " — ", " – ", " @ "];

/// Output of a build: the best-effort content plus everything worth flagging.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub content: PortfolioContent,
    pub warnings: Vec<ParseWarning>,
}

/// Sectionize and build in one step with the built-in vocabulary.
pub fn parse(markdown: &str) -> Parsed {
    build(&sectionize(markdown))
}

/// Sectionize and build in one step.
pub fn parse_with(markdown: &str, vocabulary: &Vocabulary) -> Parsed {
    build_with(&sectionize(markdown), vocabulary)
}

/// Build content from a section tree with the built-in vocabulary.
pub fn build(root: &Section) -> Parsed {
    build_with(root, &Vocabulary::default())
}

/// Build content from a section tree.
///
/// Each top-level section is matched against `vocabulary`. A level-1
/// heading whose children name other buckets is treated as the document
/// title and looked through, even when its own text is a synonym such as
/// `# Portfolio`. Any other unrecognized heading yields one warning. Repeated
/// buckets are merged in document order, and entry IDs are assigned per
/// bucket once everything has been collected.
#[instrument(skip_all, fields(sections = root.children.len()))]
pub fn build_with(root: &Section, vocabulary: &Vocabulary) -> Parsed {
    let mut builder = Builder::default();

    for section in &root.children {
        let bucket = vocabulary.classify(&section.heading);

        if is_title_container(section, bucket, vocabulary) {
            debug!(heading = %section.heading, "treating heading as document title");
            for child in &section.children {
                match vocabulary.classify(&child.heading) {
                    Some(bucket) => builder.add(bucket, child),
                    None => builder.unrecognized(child),
                }
            }
            continue;
        }

        match bucket {
            Some(bucket) => builder.add(bucket, section),
            None => builder.unrecognized(section),
        }
    }

    builder.finish()
}

/// Level 1 with at least one child naming a bucket other than `own`.
fn is_title_container(section: &Section, own: Option<Bucket>, vocabulary: &Vocabulary) -> bool {
    section.level == 1
        && section.children.iter().any(|c| {
            vocabulary
                .classify(&c.heading)
                .is_some_and(|child| Some(child) != own)
        })
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Builder {
    bio: Option<Profile>,
    experience: Vec<Entry>,
    projects: Vec<Entry>,
    education: Vec<Entry>,
    skills: Vec<SkillGroup>,
    contact: Option<Profile>,
    warnings: Vec<ParseWarning>,
}

impl Builder {
    fn add(&mut self, bucket: Bucket, section: &Section) {
        debug!(%bucket, heading = %section.heading, line = section.line, "collecting bucket");

        match bucket {
            Bucket::Bio => {
                let profile = extract_profile(section, bucket, &mut self.warnings);
                merge_profile(&mut self.bio, profile);
            }
            Bucket::Contact => {
                let profile = extract_profile(section, bucket, &mut self.warnings);
                merge_profile(&mut self.contact, profile);
            }
            Bucket::Experience | Bucket::Projects | Bucket::Education => {
                let entries = extract_entries(section, bucket, &mut self.warnings);
                self.entries_mut(bucket).extend(entries);
            }
            Bucket::Skills => {
                let groups = extract_skills(section, &mut self.warnings);
                self.skills.extend(groups);
            }
        }
    }

    fn entries_mut(&mut self, bucket: Bucket) -> &mut Vec<Entry> {
        match bucket {
            Bucket::Experience => &mut self.experience,
            Bucket::Education => &mut self.education,
            _ => &mut self.projects,
        }
    }

    fn unrecognized(&mut self, section: &Section) {
        debug!(heading = %section.heading, "skipping unrecognized heading");
        self.warnings.push(
            ParseWarning::new(WarningKind::UnrecognizedHeading, section.heading.clone())
                .at_line(section.line),
        );
    }

    fn finish(mut self) -> Parsed {
        for bucket in [Bucket::Experience, Bucket::Projects, Bucket::Education] {
            if let Some(prefix) = bucket.id_prefix() {
                assign_ids(self.entries_mut(bucket), prefix);
            }
        }

        if self.bio.as_ref().is_some_and(Profile::is_empty) {
            self.bio = None;
            self.warnings
                .push(ParseWarning::new(WarningKind::MissingField, "bio: no content"));
        }
        if self.contact.as_ref().is_some_and(Profile::is_empty) {
            self.contact = None;
            self.warnings
                .push(ParseWarning::new(WarningKind::MissingField, "contact: no content"));
        }

        let content = PortfolioContent {
            bio: self.bio,
            experience: self.experience,
            projects: self.projects,
            education: self.education,
            skills: self.skills,
            contact: self.contact,
        };

        debug!(
            experience = content.experience.len(),
            projects = content.projects.len(),
            education = content.education.len(),
            skill_groups = content.skills.len(),
            warnings = self.warnings.len(),
            "content built"
        );

        Parsed {
            content,
            warnings: self.warnings,
        }
    }
}

fn merge_profile(slot: &mut Option<Profile>, profile: Profile) {
    match slot {
        Some(existing) => existing.merge(profile),
        None => *slot = Some(profile),
    }
}

/// `<prefix>-<n>` in final order, 1-based.
fn assign_ids(entries: &mut [Entry], prefix: &str) {
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.id = format!("{prefix}-{}", i + 1);
    }
}

// ---------------------------------------------------------------------------
// bio / contact
// ---------------------------------------------------------------------------

/// Read every body line (including nested sections) as `key: value`;
/// lines that do not split cleanly become notes.
fn extract_profile(section: &Section, bucket: Bucket, warnings: &mut Vec<ParseWarning>) -> Profile {
    let mut profile = Profile::default();

    for line in section.all_body_lines() {
        let text = strip_bullet(line).unwrap_or(line).trim();
        if text.is_empty() {
            continue;
        }

        match split_field(text) {
            Some((key, value)) => {
                if bucket == Bucket::Contact && is_contact_link(key) && !is_linkish(value) {
                    warnings.push(ParseWarning::new(
                        WarningKind::MalformedLink,
                        format!("{key}: {value}"),
                    ));
                }
                profile.fields.push(Field {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
            None => profile.notes.push(text.to_string()),
        }
    }

    profile
}

/// Split on the first colon. Rejects empty parts, over-long keys, and bare
/// URLs (`https://…` would otherwise split into `https` / `//…`).
fn split_field(text: &str) -> Option<(&str, &str)> {
    let (key, value) = text.split_once(':')?;
    let key = key.trim().trim_matches(['*', '_']).trim();
    let value = value.trim().trim_start_matches(['*', '_']).trim();

    if key.is_empty() || value.is_empty() || key.len() > MAX_FIELD_KEY_LEN {
        return None;
    }
    if value.starts_with("//") {
        return None;
    }
    Some((key, value))
}

fn is_contact_link(key: &str) -> bool {
    let key = key.to_lowercase();
    CONTACT_LINK_KEYS.contains(&key.as_str())
}

fn is_linkish(value: &str) -> bool {
    parse_link("", value).is_some()
}

// ---------------------------------------------------------------------------
// experience / projects / education
// ---------------------------------------------------------------------------

fn extract_entries(section: &Section, bucket: Bucket, warnings: &mut Vec<ParseWarning>) -> Vec<Entry> {
    if !section.body_is_blank() {
        debug!(%bucket, "ignoring text before the first entry heading");
    }

    section
        .children
        .iter()
        .map(|child| extract_entry(child, bucket, warnings))
        .collect()
}

fn extract_entry(section: &Section, bucket: Bucket, warnings: &mut Vec<ParseWarning>) -> Entry {
    let mut entry = Entry::default();
    apply_heading(&mut entry, &section.heading);

    if entry.title.is_empty() {
        warnings.push(
            ParseWarning::new(WarningKind::MissingField, format!("{bucket} entry title"))
                .at_line(section.line),
        );
    }

    let mut classifier = EntryClassifier::default();
    for line in section.all_body_lines() {
        let Some(class) = classifier.next_line(line) else {
            continue;
        };

        match class {
            EntryLine::Dates(parsed) => {
                for token in &parsed.malformed {
                    warnings.push(
                        ParseWarning::new(
                            WarningKind::MalformedDate,
                            format!("{}: '{token}' in '{}'", entry.title, line.trim()),
                        )
                        .at_line(section.line),
                    );
                }
                if entry.dates.is_none() {
                    entry.dates = Some(parsed.range);
                } else {
                    debug!(title = %entry.title, line = line.trim(), "keeping first date range");
                }
            }
            EntryLine::NestedTag(tag) => {
                if !tag.is_empty() {
                    entry.tags.push(tag.to_string());
                }
            }
            EntryLine::Bullet(item) => {
                if !item.is_empty() {
                    entry.description.push(item.to_string());
                }
            }
            EntryLine::Tags(tags) => entry.tags.extend(tags),
            EntryLine::Link(link) => entry.links.push(link),
            EntryLine::BadLink(text) => {
                warnings.push(
                    ParseWarning::new(WarningKind::MalformedLink, text).at_line(section.line),
                );
                entry.description.push(text.to_string());
            }
            EntryLine::Organization(org) => {
                if entry.organization.is_none() {
                    entry.organization = Some(org.to_string());
                }
            }
            EntryLine::Description(text) => entry.description.push(text.to_string()),
        }
    }

    if bucket != Bucket::Projects && entry.dates.is_none() {
        warnings.push(
            ParseWarning::new(WarningKind::MissingField, format!("{}: dates", entry.title))
                .at_line(section.line),
        );
    }

    entry
}

/// Fill title, subtitle and (for `[Title](url)` headings) a link.
fn apply_heading(entry: &mut Entry, heading: &str) {
    let heading = heading.trim();
    let split = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| heading.find(sep).map(|at| (at, sep.len())))
        .min_by_key(|(at, _)| *at);

    let (title, subtitle) = match split {
        Some((at, len)) => (heading[..at].trim(), Some(heading[at + len..].trim())),
        None => (heading, None),
    };

    match split_heading_link(title) {
        Some((text, url)) => {
            entry.title = text.to_string();
            entry.links.push(folio_shared::Link {
                label: text.to_string(),
                url,
            });
        }
        None => entry.title = title.to_string(),
    }
    entry.subtitle = subtitle.filter(|s| !s.is_empty()).map(str::to_string);
}

/// `[Text](https://…)` → (`Text`, url).
fn split_heading_link(title: &str) -> Option<(&str, String)> {
    let rest = title.strip_prefix('[')?;
    let (text, rest) = rest.split_once("](")?;
    let raw = rest.strip_suffix(')')?;
    let url = absolute_url(raw)?;
    Some((text.trim(), url))
}

// ---------------------------------------------------------------------------
// skills
// ---------------------------------------------------------------------------

/// Body lines under the skills heading itself: `Category: a, b` lines become
/// groups, anything else lands in [`GENERAL_SKILLS`]. Each child heading is
/// a group of its own.
fn extract_skills(section: &Section, warnings: &mut Vec<ParseWarning>) -> Vec<SkillGroup> {
    let mut groups = Vec::new();
    let mut general = Vec::new();

    for line in section.body_lines.iter().map(String::as_str) {
        let bullet = strip_bullet(line);
        let text = bullet.unwrap_or(line).trim();
        if text.is_empty() {
            continue;
        }

        match split_label(text).filter(|(_, value)| !value.is_empty()) {
            Some((category, value)) => groups.push(SkillGroup {
                category: category.to_string(),
                skills: split_list(value),
            }),
            None if bullet.is_some() => general.push(text.to_string()),
            None => general.extend(split_list(text)),
        }
    }

    if !general.is_empty() {
        groups.push(SkillGroup {
            category: GENERAL_SKILLS.to_string(),
            skills: general,
        });
    }

    for child in &section.children {
        let skills = collect_skills(child.all_body_lines());
        if skills.is_empty() {
            warnings.push(
                ParseWarning::new(WarningKind::MissingField, format!("{}: skills", child.heading))
                    .at_line(child.line),
            );
            continue;
        }
        groups.push(SkillGroup {
            category: child.heading.clone(),
            skills,
        });
    }

    groups
}

/// Bullets are one skill each; other lines are comma/pipe lists. A leading
/// `Label:` on a list line is dropped, the group already has its category.
fn collect_skills<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut skills = Vec::new();
    for line in lines {
        match strip_bullet(line) {
            Some(item) => {
                let item = item.trim();
                if !item.is_empty() {
                    skills.push(item.to_string());
                }
            }
            None => {
                let list = split_label(line)
                    .map(|(_, value)| value)
                    .filter(|value| !value.is_empty())
                    .unwrap_or(line);
                skills.extend(split_list(list));
            }
        }
    }
    skills
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    fn titles(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    // --- Core properties ---

    #[test]
    fn empty_input_builds_empty_content() {
        let parsed = parse("");
        assert!(parsed.content.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn preamble_only_input_is_empty_without_warnings() {
        let parsed = parse("Some words before any heading.\n- a list\n");
        assert!(parsed.content.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn ids_follow_order_within_bucket() {
        let md = "\
## Experience
### Engineer | Acme
2019 - 2021
### Lead | Globex
2021 - Present
## Projects
### Alpha
### Beta
";
        let parsed = parse(md);
        let ids: Vec<&str> = parsed.content.projects.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["proj-1", "proj-2"]);
        assert_eq!(titles(&parsed.content.projects), vec!["Alpha", "Beta"]);
        assert_eq!(parsed.content.experience[1].id, "exp-2");
    }

    #[test]
    fn tags_line_is_not_description() {
        let md = "## Projects\n### Alpha\nA chatbot.\nTags: ai, nlp\n";
        let parsed = parse(md);
        let alpha = &parsed.content.projects[0];
        assert_eq!(alpha.tags, vec!["ai", "nlp"]);
        assert_eq!(alpha.description, vec!["A chatbot."]);
    }

    #[test]
    fn unrecognized_heading_warns_once() {
        let md = "## Hobbies\n- chess\n### Openings\n## Projects\n### Alpha\n";
        let parsed = parse(md);

        assert_eq!(parsed.warnings.len(), 1);
        let warning = &parsed.warnings[0];
        assert_eq!(warning.kind, WarningKind::UnrecognizedHeading);
        assert!(warning.context.contains("Hobbies"));
        assert_eq!(warning.line, Some(1));
        assert_eq!(parsed.content.projects.len(), 1);
    }

    #[test]
    fn title_heading_is_looked_through() {
        let md = "# Jane Doe\nHi!\n## About\nName: Jane\n## Projects\n### Alpha\n## Hobbies\n";
        let parsed = parse(md);

        assert_eq!(parsed.content.bio.as_ref().unwrap().get("name"), Some("Jane"));
        assert_eq!(parsed.content.projects.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].context.contains("Hobbies"));
    }

    #[test]
    fn title_that_is_also_a_synonym_is_looked_through() {
        let md = "\
# Portfolio
## About
Name: Jane
## Experience
### Eng | Acme
2020 - 2021
## Projects
### Alpha
Tags: ai
";
        let parsed = parse(md);
        let content = &parsed.content;
        assert_eq!(content.bio.as_ref().unwrap().get("name"), Some("Jane"));
        assert_eq!(titles(&content.experience), vec!["Eng"]);
        assert_eq!(titles(&content.projects), vec!["Alpha"]);
        assert_eq!(content.projects[0].tags, vec!["ai"]);
        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    }

    #[test]
    fn level_one_bucket_with_entry_children_stays_a_bucket() {
        let parsed = parse("# Projects
## Alpha
## Beta
");
        assert_eq!(titles(&parsed.content.projects), vec!["Alpha", "Beta"]);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn level_one_heading_without_buckets_is_unrecognized() {
        let parsed = parse("# Hobbies\n## Chess\n");
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].context, "Hobbies");
    }

    #[test]
    fn heading_matching_is_case_and_punctuation_insensitive() {
        let md = "## WORK EXPERIENCE:\n### Dev\n2020 - 2021\n## projects!\n### X\n";
        let parsed = parse(md);
        assert_eq!(parsed.content.experience.len(), 1);
        assert_eq!(parsed.content.projects.len(), 1);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn repeated_buckets_merge_and_number_continuously() {
        let md = "## Projects\n### A\n## Experience\n### E\n2020 - 2021\n## Projects\n### B\n";
        let parsed = parse(md);
        assert_eq!(titles(&parsed.content.projects), vec!["A", "B"]);
        assert_eq!(parsed.content.projects[1].id, "proj-2");
    }

    // --- Entries ---

    #[test]
    fn entry_fields_are_classified() {
        let md = "\
## Experience
### Senior Engineer | Acme Corp
*Jan 2020 – Present*
Company: Acme Corporation
Worked on the platform team.
- Shipped the billing rewrite
- Mentored two engineers
Tags: rust, kafka
Link: https://acme.example.com
";
        let parsed = parse(md);
        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

        let e = &parsed.content.experience[0];
        assert_eq!(e.id, "exp-1");
        assert_eq!(e.title, "Senior Engineer");
        assert_eq!(e.subtitle.as_deref(), Some("Acme Corp"));
        assert_eq!(e.organization.as_deref(), Some("Acme Corporation"));
        let dates = e.dates.as_ref().unwrap();
        assert_eq!(dates.start, "Jan 2020");
        assert!(dates.is_ongoing());
        assert_eq!(
            e.description,
            vec![
                "Worked on the platform team.",
                "Shipped the billing rewrite",
                "Mentored two engineers"
            ]
        );
        assert_eq!(e.tags, vec!["rust", "kafka"]);
        assert_eq!(e.links[0].url, "https://acme.example.com/");
    }

    #[test]
    fn nested_tag_list_is_collected() {
        let md = "## Projects\n### Alpha\nTags:\n- ai\n- nlp\n\n- a real bullet\n";
        let parsed = parse(md);
        let alpha = &parsed.content.projects[0];
        assert_eq!(alpha.tags, vec!["ai", "nlp"]);
        assert_eq!(alpha.description, vec!["a real bullet"]);
    }

    #[test]
    fn malformed_date_is_kept_with_warning() {
        let md = "## Education\n### BSc Computer Science\nFoo 2015 - 2019\n";
        let parsed = parse(md);
        let edu = &parsed.content.education[0];
        assert_eq!(edu.dates.as_ref().unwrap().start, "Foo 2015");
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].kind, WarningKind::MalformedDate);
        assert!(parsed.warnings[0].context.contains("Foo 2015"));
    }

    #[test]
    fn missing_dates_warn_for_experience_not_projects() {
        let md = "## Experience\n### Intern\n## Projects\n### Alpha\n";
        let parsed = parse(md);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].kind, WarningKind::MissingField);
        assert_eq!(parsed.warnings[0].context, "Intern: dates");
        assert_eq!(parsed.warnings[0].line, Some(2));
    }

    #[test]
    fn bad_link_falls_back_to_description() {
        let md = "## Projects\n### Alpha\nRepo: github.com/jane/alpha\n";
        let parsed = parse(md);
        let alpha = &parsed.content.projects[0];
        assert!(alpha.links.is_empty());
        assert_eq!(alpha.description, vec!["Repo: github.com/jane/alpha"]);
        assert_eq!(parsed.warnings[0].kind, WarningKind::MalformedLink);
    }

    #[test]
    fn heading_link_becomes_title_and_link() {
        let md = "## Projects\n### [Alpha](https://alpha.dev) — LLM playground\n";
        let parsed = parse(md);
        let alpha = &parsed.content.projects[0];
        assert_eq!(alpha.title, "Alpha");
        assert_eq!(alpha.subtitle.as_deref(), Some("LLM playground"));
        assert_eq!(alpha.links[0].url, "https://alpha.dev/");
    }

    #[test]
    fn nested_headings_feed_their_entry() {
        let md = "## Projects\n### Alpha\nIntro\n#### Highlights\n- Fast\n### Beta\n";
        let parsed = parse(md);
        assert_eq!(parsed.content.projects.len(), 2);
        assert_eq!(parsed.content.projects[0].description, vec!["Intro", "Fast"]);
    }

    #[test]
    fn empty_entry_title_warns() {
        let md = "## Projects\n###\nsomething\n";
        let parsed = parse(md);
        assert_eq!(parsed.content.projects.len(), 1);
        assert_eq!(parsed.warnings[0].kind, WarningKind::MissingField);
        assert_eq!(parsed.warnings[0].context, "projects entry title");
    }

    // --- bio / contact ---

    #[test]
    fn profile_fields_and_notes() {
        let md = "\
## Bio
Name: Jane Doe
- **Title:** Staff Engineer
I like building tools.
https://jane.dev
";
        let parsed = parse(md);
        let bio = parsed.content.bio.unwrap();
        assert_eq!(bio.get("name"), Some("Jane Doe"));
        assert_eq!(bio.get("title"), Some("Staff Engineer"));
        assert_eq!(bio.notes, vec!["I like building tools.", "https://jane.dev"]);
    }

    #[test]
    fn contact_link_keys_are_checked() {
        let md = "## Contact\n- Email: jane@example.com\n- GitHub: https://github.com/jane\n- Website: jane dot dev\n";
        let parsed = parse(md);
        let contact = parsed.content.contact.unwrap();
        assert_eq!(contact.fields.len(), 3);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].kind, WarningKind::MalformedLink);
        assert!(parsed.warnings[0].context.starts_with("Website"));
    }

    #[test]
    fn empty_bio_is_dropped_with_warning() {
        let parsed = parse("## About Me\n\n");
        assert!(parsed.content.bio.is_none());
        assert_eq!(parsed.warnings[0].kind, WarningKind::MissingField);
    }

    // --- skills ---

    #[test]
    fn skill_groups_from_child_headings() {
        let md = "\
## Skills
### Languages
- Rust
- TypeScript
- Rust
### Tools
Docker, Kubernetes, , Terraform
### Empty
";
        let parsed = parse(md);
        let skills = &parsed.content.skills;
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].category, "Languages");
        assert_eq!(skills[0].skills, vec!["Rust", "TypeScript", "Rust"]);
        assert_eq!(skills[1].skills, vec!["Docker", "Kubernetes", "Terraform"]);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].context, "Empty: skills");
    }

    #[test]
    fn labelled_list_under_skill_heading_drops_label() {
        let md = "## Skills
### Programming
Languages: Rust, Go
SQL
";
        let parsed = parse(md);
        let group = &parsed.content.skills[0];
        assert_eq!(group.category, "Programming");
        assert_eq!(group.skills, vec!["Rust", "Go", "SQL"]);
    }

    #[test]
    fn skill_labels_and_general_group_in_bucket_body() {
        let md = "## Tech Stack\n- Languages: Rust, Go\n- Git\nSQL, GraphQL\n";
        let parsed = parse(md);
        let skills = &parsed.content.skills;
        assert_eq!(skills[0].category, "Languages");
        assert_eq!(skills[0].skills, vec!["Rust", "Go"]);
        assert_eq!(skills[1].category, GENERAL_SKILLS);
        assert_eq!(skills[1].skills, vec!["Git", "SQL", "GraphQL"]);
    }

    // --- Fixture ---

    #[test]
    fn fixture_portfolio_parses() {
        let parsed = parse(&fixture("portfolio.md"));
        let content = &parsed.content;

        assert_eq!(content.bio.as_ref().unwrap().get("name"), Some("Jane Doe"));
        assert_eq!(titles(&content.experience), vec!["Staff Engineer", "Software Engineer"]);
        assert_eq!(content.projects.len(), 3);
        assert_eq!(content.projects[0].id, "proj-1");
        assert_eq!(content.projects[0].tags, vec!["ai", "nlp", "rust"]);
        assert_eq!(content.education.len(), 1);
        assert_eq!(content.skills.len(), 3);
        assert_eq!(content.contact.as_ref().unwrap().get("email"), Some("jane@example.com"));

        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].context.contains("Hobbies"));
    }
}
