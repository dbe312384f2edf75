//! Shared types, error model, and configuration for folio.
//!
//! This crate is the foundation depended on by all other folio crates.
//! It provides:
//! - [`FolioError`], the unified error type
//! - The content model ([`PortfolioContent`], [`Entry`], [`SkillGroup`], [`Profile`])
//!   and [`ParseWarning`] diagnostics
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AliasesConfig, AppConfig, CONFIG_FILE_NAME, OutputConfig, OutputFormat, PathsConfig,
    init_config, load_config, load_config_from,
};
pub use error::{FolioError, Result};
pub use types::{
    Bucket, DateRange, Entry, Field, Link, PRESENT, ParseWarning, PortfolioContent, Profile,
    SkillGroup, WarningKind,
};
