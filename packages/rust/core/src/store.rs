//! Caller-owned handle to the current [`PortfolioContent`].
//!
//! Readers take an `Arc` snapshot and keep using it for as long as they
//! like. A reload parses the new document completely before swapping the
//! pointer, so nobody ever sees a half-built value.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, instrument};

use folio_shared::{Bucket, FolioError, ParseWarning, PortfolioContent, Result};

use crate::builder::parse_with;
use crate::view::{ViewRequest, project};
use crate::vocabulary::Vocabulary;

#[derive(Debug)]
pub struct PortfolioStore {
    current: RwLock<Arc<PortfolioContent>>,
    vocabulary: Vocabulary,
}

impl PortfolioStore {
    pub fn new(content: PortfolioContent) -> Self {
        Self {
            current: RwLock::new(Arc::new(content)),
            vocabulary: Vocabulary::default(),
        }
    }

    /// Parse `markdown` into a fresh store, returning the warnings alongside.
    pub fn from_markdown(markdown: &str) -> (Self, Vec<ParseWarning>) {
        Self::from_markdown_with(markdown, Vocabulary::default())
    }

    /// Like [`from_markdown`](Self::from_markdown) with a custom vocabulary
    /// that later reloads keep using.
    pub fn from_markdown_with(markdown: &str, vocabulary: Vocabulary) -> (Self, Vec<ParseWarning>) {
        let parsed = parse_with(markdown, &vocabulary);
        let store = Self {
            current: RwLock::new(Arc::new(parsed.content)),
            vocabulary,
        };
        (store, parsed.warnings)
    }

    /// The content as of now.
    pub fn snapshot(&self) -> Arc<PortfolioContent> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Re-parse and swap in the result.
    #[instrument(skip_all, fields(bytes = markdown.len()))]
    pub fn reload(&self, markdown: &str) -> Vec<ParseWarning> {
        let parsed = parse_with(markdown, &self.vocabulary);
        let counts: Vec<_> = Bucket::ALL
            .iter()
            .map(|b| format!("{b}={}", parsed.content.count(*b)))
            .collect();
        self.replace(parsed.content);
        info!(counts = %counts.join(" "), warnings = parsed.warnings.len(), "reloaded content");
        parsed.warnings
    }

    /// Swap in already-built content.
    pub fn replace(&self, content: PortfolioContent) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(content);
    }

    /// Project the current content and serialize the view for the chat tool.
    pub fn render_view(&self, request: &ViewRequest) -> Result<serde_json::Value> {
        let content = self.snapshot();
        let view = project(&content, request);
        serde_json::to_value(&view).map_err(FolioError::from)
    }
}
