//! Heading vocabulary: which top-level headings name which bucket.

use std::collections::HashMap;

use folio_shared::{AliasesConfig, Bucket};

/// Built-in heading names, already normalized.
const BUILTIN: &[(&str, Bucket)] = &[
    ("bio", Bucket::Bio),
    ("biography", Bucket::Bio),
    ("about", Bucket::Bio),
    ("about me", Bucket::Bio),
    ("profile", Bucket::Bio),
    ("summary", Bucket::Bio),
    ("introduction", Bucket::Bio),
    ("intro", Bucket::Bio),
    ("experience", Bucket::Experience),
    ("work experience", Bucket::Experience),
    ("professional experience", Bucket::Experience),
    ("work history", Bucket::Experience),
    ("employment", Bucket::Experience),
    ("employment history", Bucket::Experience),
    ("work", Bucket::Experience),
    ("career", Bucket::Experience),
    ("projects", Bucket::Projects),
    ("project", Bucket::Projects),
    ("selected projects", Bucket::Projects),
    ("personal projects", Bucket::Projects),
    ("side projects", Bucket::Projects),
    ("portfolio", Bucket::Projects),
    ("education", Bucket::Education),
    ("academic background", Bucket::Education),
    ("academics", Bucket::Education),
    ("schooling", Bucket::Education),
    ("skills", Bucket::Skills),
    ("technical skills", Bucket::Skills),
    ("skill set", Bucket::Skills),
    ("skillset", Bucket::Skills),
    ("technologies", Bucket::Skills),
    ("tech stack", Bucket::Skills),
    ("expertise", Bucket::Skills),
    ("contact", Bucket::Contact),
    ("contact me", Bucket::Contact),
    ("contact info", Bucket::Contact),
    ("contact information", Bucket::Contact),
    ("get in touch", Bucket::Contact),
    ("links", Bucket::Contact),
    ("socials", Bucket::Contact),
];

/// Maps normalized heading text to a bucket.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    names: HashMap<String, Bucket>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            names: BUILTIN
                .iter()
                .map(|(name, bucket)| ((*name).to_string(), *bucket))
                .collect(),
        }
    }
}

impl Vocabulary {
    /// Built-in names plus the configured aliases. Aliases win on conflict.
    pub fn with_aliases(aliases: &AliasesConfig) -> Self {
        let mut vocab = Self::default();
        for bucket in Bucket::ALL {
            for alias in aliases.for_bucket(bucket) {
                vocab.insert(alias, bucket);
            }
        }
        vocab
    }

    /// Register one more heading name.
    pub fn insert(&mut self, heading: &str, bucket: Bucket) {
        let key = normalize_heading(heading);
        if !key.is_empty() {
            self.names.insert(key, bucket);
        }
    }

    /// Bucket named by `heading`, if any.
    pub fn classify(&self, heading: &str) -> Option<Bucket> {
        self.names.get(&normalize_heading(heading)).copied()
    }
}

/// Lowercase, drop apostrophes, turn other punctuation into spaces, and
/// collapse whitespace: `"  Work-Experience! "` → `"work experience"`.
pub fn normalize_heading(text: &str) -> String {
    let spaced: String = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '’'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
