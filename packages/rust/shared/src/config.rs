//! Project configuration for folio.
//!
//! The config lives next to the project as `folio.toml`. Every section is
//! optional; a missing file means defaults. Relative paths resolve against
//! the directory the config file was loaded from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::types::Bucket;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "folio.toml";

// ---------------------------------------------------------------------------
// Config structs (matching folio.toml schema)
// ---------------------------------------------------------------------------

/// Top-level project config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Generated asset settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Extra heading synonyms per bucket.
    #[serde(default)]
    pub aliases: AliasesConfig,

    /// File this config was read from (`None` for defaults).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Portfolio markdown source.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Generated asset location.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("src/content/portfolio.md")
}
fn default_output() -> PathBuf {
    PathBuf::from("src/lib/portfolio/data.ts")
}

/// Serialization target for the generated asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A TypeScript module exporting a typed constant.
    #[default]
    Typescript,
    /// Plain pretty-printed JSON.
    Json,
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Name of the exported constant (TypeScript output only).
    #[serde(default = "default_export_name")]
    pub export_name: String,

    /// Module the `PortfolioContent` type is imported from (TypeScript output only).
    #[serde(default = "default_type_import")]
    pub type_import: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            export_name: default_export_name(),
            type_import: default_type_import(),
        }
    }
}

fn default_export_name() -> String {
    "portfolioContent".into()
}
fn default_type_import() -> String {
    "./types".into()
}

/// `[aliases]` section: additional heading names per bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasesConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bio: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<String>,
}

impl AliasesConfig {
    /// Aliases configured for one bucket.
    pub fn for_bucket(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Bio => &self.bio,
            Bucket::Experience => &self.experience,
            Bucket::Projects => &self.projects,
            Bucket::Education => &self.education,
            Bucket::Skills => &self.skills,
            Bucket::Contact => &self.contact,
        }
    }
}

impl AppConfig {
    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Absolute-or-base-relative input path.
    pub fn input_path(&self) -> PathBuf {
        self.base_dir().join(&self.paths.input)
    }

    /// Absolute-or-base-relative output path.
    pub fn output_path(&self) -> PathBuf {
        self.base_dir().join(&self.paths.output)
    }

    /// Reject settings that would produce an unusable asset.
    pub fn validate(&self) -> Result<()> {
        if self.output.format == OutputFormat::Typescript
            && !is_js_identifier(&self.output.export_name)
        {
            return Err(FolioError::validation(format!(
                "export_name '{}' is not a valid identifier",
                self.output.export_name
            )));
        }
        if self.paths.input.as_os_str().is_empty() || self.paths.output.as_os_str().is_empty() {
            return Err(FolioError::config("paths.input and paths.output must not be empty"));
        }
        Ok(())
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load `folio.toml` from the current directory. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the project config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FolioError::io(path, e))?;

    let mut config: AppConfig = toml::from_str(&content).map_err(|e| {
        FolioError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.source = Some(path.to_path_buf());
    config.validate()?;

    tracing::debug!(?path, "loaded config");
    Ok(config)
}

/// Write a default `folio.toml` into `dir`. Refuses to overwrite an existing file.
/// Returns the path to the created file.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(FolioError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    std::fs::create_dir_all(dir).map_err(|e| FolioError::io(dir, e))?;
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| FolioError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| FolioError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
