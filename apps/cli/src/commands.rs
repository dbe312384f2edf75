//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use folio_core::{GenerateConfig, PortfolioStore, ViewRequest, Vocabulary, generate};
use folio_shared::{
    AppConfig, Bucket, ParseWarning, PortfolioContent, init_config, load_config, load_config_from,
};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// folio: portfolio markdown to typed content.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Parse a portfolio markdown file into typed content for the site and chat tool.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./folio.toml when present).
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Defaults to `generate`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Parse the portfolio and write the generated content asset.
    Generate,

    /// Parse the portfolio and report warnings without writing anything.
    Check,

    /// Print a filtered view of one bucket as JSON.
    View {
        /// bio, experience, projects, education, skills or contact.
        view_type: Bucket,

        /// Case-insensitive substring filter.
        #[arg(short, long)]
        filter: Option<String>,

        /// Entry ID to highlight (e.g. proj-1).
        #[arg(long)]
        highlight: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write folio.toml with defaults into the current directory.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "folio=info",
        1 => "folio=debug",
        _ => "folio=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => cmd_generate(config_path),
        Command::Check => cmd_check(config_path),
        Command::View {
            view_type,
            filter,
            highlight,
        } => cmd_view(config_path, view_type, filter, highlight),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(&path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Read the configured input and load it into a store.
fn load_store(config: &AppConfig) -> Result<(PortfolioStore, Vec<ParseWarning>)> {
    let input = config.input_path();
    let markdown = std::fs::read_to_string(&input)
        .wrap_err_with(|| format!("failed to read {}", input.display()))?;
    Ok(PortfolioStore::from_markdown_with(
        &markdown,
        Vocabulary::with_aliases(&config.aliases),
    ))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_generate(config_path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let report = generate(&GenerateConfig::from(&config))?;

    let counts: Vec<String> = report
        .counts
        .iter()
        .map(|(bucket, n)| format!("{bucket}: {n}"))
        .collect();

    println!();
    if report.written {
        println!("  Wrote {}", report.output.display());
    } else {
        println!("  {} is up to date", report.output.display());
    }
    println!("  {}", counts.join(", "));
    if !report.warnings.is_empty() {
        println!("  {} warning(s), see log output", report.warnings.len());
    }
    println!();

    Ok(())
}

fn cmd_check(config_path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let (store, warnings) = load_store(&config)?;
    let content = store.snapshot();

    println!();
    println!("  Source: {}", config.input_path().display());
    for bucket in Bucket::ALL {
        println!("  {:<11} {}", bucket.as_str(), content.count(bucket));
    }
    println!();

    if warnings.is_empty() {
        println!("  No warnings.");
    } else {
        println!("  Warnings ({}):", warnings.len());
        for warning in &warnings {
            println!("    {warning}");
        }
    }
    println!();

    Ok(())
}

fn cmd_view(
    config_path: Option<PathBuf>,
    view_type: Bucket,
    filter: Option<String>,
    highlight: Option<String>,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let (store, warnings) = load_store(&config)?;
    info!(view = %view_type, warnings = warnings.len(), "rendering view");

    if let Some(id) = highlight.as_deref() {
        if let Some(reason) = highlight_problem(&store.snapshot(), view_type, id) {
            warn!(view = %view_type, id, reason, "highlight ignored");
        }
    }

    let request = ViewRequest {
        view_type,
        filter,
        highlight_id: highlight,
    };
    let json = store.render_view(&request)?;
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}

/// Why a requested highlight cannot show, if it cannot.
fn highlight_problem(content: &PortfolioContent, view_type: Bucket, id: &str) -> Option<&'static str> {
    if !view_type.has_entries() {
        return Some("view has no entries");
    }
    match content.find_entry(id) {
        None => Some("no entry with this id"),
        Some(_) if content.entries(view_type).iter().all(|e| e.id != id) => {
            Some("entry belongs to another bucket")
        }
        Some(_) => None,
    }
}

fn cmd_config_init() -> Result<()> {
    let cwd = std::env::current_dir().wrap_err("cannot determine working directory")?;
    let path = init_config(&cwd)?;
    println!("Created {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;

    match &config.source {
        Some(path) => println!("# {}", path.display()),
        None => println!("# defaults (no {} found)", folio_shared::CONFIG_FILE_NAME),
    }
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_generate() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn view_parses_bucket_and_flags() {
        let cli =
            Cli::try_parse_from(["folio", "-vv", "view", "projects", "--filter", "ai"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::View {
                view_type, filter, ..
            }) => {
                assert_eq!(view_type, Bucket::Projects);
                assert_eq!(filter.as_deref(), Some("ai"));
            }
            _ => panic!("expected view command"),
        }
    }

    #[test]
    fn view_rejects_unknown_bucket() {
        assert!(Cli::try_parse_from(["folio", "view", "hobbies"]).is_err());
    }

    #[test]
    fn highlight_problems_are_explained() {
        let content = folio_core::parse(
            "## Experience\n### Eng\n2020 - 2021\n## Projects\n### Alpha\n",
        )
        .content;

        assert_eq!(highlight_problem(&content, Bucket::Projects, "proj-1"), None);
        assert_eq!(
            highlight_problem(&content, Bucket::Projects, "proj-9"),
            Some("no entry with this id")
        );
        assert_eq!(
            highlight_problem(&content, Bucket::Projects, "exp-1"),
            Some("entry belongs to another bucket")
        );
        assert_eq!(
            highlight_problem(&content, Bucket::Skills, "proj-1"),
            Some("view has no entries")
        );
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["folio", "check", "--config", "site/folio.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site/folio.toml")));
    }
}
