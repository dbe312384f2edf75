//! Build-time generator: portfolio markdown in, typed content asset out.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use folio_shared::{AppConfig, Bucket, FolioError, OutputFormat, ParseWarning, PortfolioContent, Result};

use crate::builder::parse_with;
use crate::vocabulary::Vocabulary;

/// First line of every generated TypeScript module.
pub const GENERATED_HEADER: &str = "// AUTO-GENERATED FILE - DO NOT EDIT MANUALLY";

/// Inputs for one generator run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Markdown source.
    pub input: PathBuf,
    /// Input path as written in the config, used in the generated header.
    pub source_label: String,
    /// Asset to write.
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Exported constant name (TypeScript only).
    pub export_name: String,
    /// Module specifier for `import type { PortfolioContent }` (TypeScript only).
    pub type_import: String,
    pub vocabulary: Vocabulary,
}

impl From<&AppConfig> for GenerateConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input: config.input_path(),
            source_label: config.paths.input.display().to_string(),
            output: config.output_path(),
            format: config.output.format,
            export_name: config.output.export_name.clone(),
            type_import: config.output.type_import.clone(),
            vocabulary: Vocabulary::with_aliases(&config.aliases),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output: PathBuf,
    /// Records per bucket, in [`Bucket::ALL`] order.
    pub counts: Vec<(Bucket, usize)>,
    pub warnings: Vec<ParseWarning>,
    /// False when the existing file already had identical contents.
    pub written: bool,
}

/// Read, parse, render and write.
///
/// Only I/O and serialization failures are errors. Parse problems are
/// logged and returned in the report.
#[instrument(skip_all, fields(input = %config.input.display(), output = %config.output.display()))]
pub fn generate(config: &GenerateConfig) -> Result<GenerateReport> {
    let markdown =
        std::fs::read_to_string(&config.input).map_err(|e| FolioError::io(&config.input, e))?;

    let parsed = parse_with(&markdown, &config.vocabulary);
    for warning in &parsed.warnings {
        warn!(kind = ?warning.kind, line = ?warning.line, "{}", warning.context);
    }

    let rendered = render(&parsed.content, config)?;
    let written = write_if_changed(&config.output, &rendered)?;

    let counts: Vec<(Bucket, usize)> = Bucket::ALL
        .iter()
        .map(|b| (*b, parsed.content.count(*b)))
        .collect();

    info!(
        written,
        warnings = parsed.warnings.len(),
        entries = counts.iter().map(|(_, n)| n).sum::<usize>(),
        "generated portfolio content"
    );

    Ok(GenerateReport {
        output: config.output.clone(),
        counts,
        warnings: parsed.warnings,
        written,
    })
}

/// Serialize content in the configured format.
pub fn render(content: &PortfolioContent, config: &GenerateConfig) -> Result<String> {
    let json = serde_json::to_string_pretty(content)?;
    Ok(match config.format {
        OutputFormat::Json => format!("{json}\n"),
        OutputFormat::Typescript => format!(
            "{GENERATED_HEADER}\n\
             // Source: {source}\n\
             \n\
             import type {{ PortfolioContent }} from \"{import}\";\n\
             \n\
             export const {name}: PortfolioContent = {json};\n",
            source = config.source_label,
            import = config.type_import,
            name = config.export_name,
        ),
    })
}

/// Write `contents` unless the file already holds exactly that.
fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if std::fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        debug!(path = %path.display(), "output unchanged, skipping write");
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FolioError::io(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| FolioError::io(path, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Jane
## About
Name: Jane
## Projects
### Alpha
Tags: ai, nlp
## Hobbies
Knitting
";

    fn config_in(dir: &Path, format: OutputFormat) -> GenerateConfig {
        GenerateConfig {
            input: dir.join("portfolio.md"),
            source_label: "portfolio.md".into(),
            output: dir.join("out/lib/data.ts"),
            format,
            export_name: "portfolioContent".into(),
            type_import: "./types".into(),
            vocabulary: Vocabulary::default(),
        }
    }

    #[test]
    fn writes_typescript_module() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), OutputFormat::Typescript);
        std::fs::write(&config.input, DOC).unwrap();

        let report = generate(&config).unwrap();
        assert!(report.written);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.counts.contains(&(Bucket::Projects, 1)));

        let out = std::fs::read_to_string(&config.output).unwrap();
        assert!(out.starts_with(GENERATED_HEADER));
        assert!(out.contains("import type { PortfolioContent } from \"./types\";"));
        assert!(out.contains("export const portfolioContent: PortfolioContent = {"));
        assert!(out.contains("\"id\": \"proj-1\""));
        assert!(out.trim_end().ends_with("};"));
    }

    #[test]
    fn header_names_configured_input_not_resolved_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = AppConfig::default();
        app.source = Some(dir.path().join("folio.toml"));

        let config = GenerateConfig::from(&app);
        assert!(config.input.is_absolute());
        let out = render(&PortfolioContent::default(), &config).unwrap();
        assert!(out.contains("// Source: src/content/portfolio.md\n"));
        assert!(!out.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn json_output_round_trips_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), OutputFormat::Json);
        config.output = dir.path().join("data.json");
        std::fs::write(&config.input, DOC).unwrap();

        generate(&config).unwrap();
        let out = std::fs::read_to_string(&config.output).unwrap();
        let content: PortfolioContent = serde_json::from_str(&out).unwrap();
        assert_eq!(content.projects[0].tags, vec!["ai", "nlp"]);
        assert_eq!(content.bio.and_then(|b| b.get("name").map(String::from)).as_deref(), Some("Jane"));
    }

    #[test]
    fn unchanged_output_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), OutputFormat::Typescript);
        std::fs::write(&config.input, DOC).unwrap();

        assert!(generate(&config).unwrap().written);
        assert!(!generate(&config).unwrap().written);

        std::fs::write(&config.input, format!("{DOC}## Skills\n- Rust\n")).unwrap();
        assert!(generate(&config).unwrap().written);
    }

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), OutputFormat::Json);

        let err = generate(&config).unwrap_err();
        assert!(matches!(err, FolioError::Io { .. }), "{err}");
        assert!(!config.output.exists());
    }

    #[test]
    fn config_paths_resolve_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = AppConfig::default();
        app.source = Some(dir.path().join("folio.toml"));
        app.output.format = OutputFormat::Json;
        app.aliases.projects = vec!["Open Source".into()];

        let config = GenerateConfig::from(&app);
        assert_eq!(config.input, dir.path().join("src/content/portfolio.md"));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.vocabulary.classify("open source"), Some(Bucket::Projects));
    }
}
