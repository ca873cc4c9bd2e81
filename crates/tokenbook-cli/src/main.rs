//! tokenbook: browse multi-brand design tokens from the terminal.
//!
//! ```bash
//! # All primitive and alias tokens of the default brand
//! tokenbook list
//!
//! # Alias tokens of one brand, filtered
//! tokenbook --brand "Daily Post" list --set alias --filter color
//!
//! # Resolve a reference
//! tokenbook resolve "{color.blue.500}"
//!
//! # Copy a token's resolved value to the clipboard
//! tokenbook copy brand.primary
//! ```

mod clipboard;
mod commands;
mod logging;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use tokenbook_core::config::{AppConfig, ResolverKind};
use tokenbook_core::table::TokenSet;

#[derive(Parser)]
#[command(name = "tokenbook")]
#[command(version)]
#[command(about = "Browse, resolve, and copy multi-brand design tokens")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Token document URL or path (overrides the config file)
    #[arg(long, short, global = true)]
    source: Option<String>,

    /// Brand whose alias set is used (defaults to display.default_brand,
    /// then to the first brand in the document)
    #[arg(long, short, global = true)]
    brand: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "table", value_enum)]
    format: OutputFormat,

    /// Reference resolution mode (overrides the config file)
    #[arg(long, global = true, value_enum)]
    mode: Option<ModeArg>,

    /// Read configuration from this file instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Single,
    Chained,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SetArg {
    Primitives,
    Alias,
    All,
}

impl From<SetArg> for TokenSet {
    fn from(set: SetArg) -> Self {
        match set {
            SetArg::Primitives => TokenSet::Primitives,
            SetArg::Alias => TokenSet::Alias,
            SetArg::All => TokenSet::All,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List flattened tokens with their resolved values
    List {
        /// Which token sets to show
        #[arg(long, default_value = "all", value_enum)]
        set: SetArg,

        /// Only rows whose path or type contains this text
        #[arg(long, short)]
        filter: Option<String>,

        /// Hide colour swatches
        #[arg(long)]
        no_swatches: bool,
    },

    /// Resolve a raw value or `{dotted.path}` reference
    Resolve {
        /// The raw value, e.g. "{color.blue.500}"
        raw: String,
    },

    /// List brands that have an alias set
    Brands,

    /// Copy a token's value to the clipboard
    Copy {
        /// Dotted token path, e.g. brand.primary
        path: String,

        /// Copy the authored value instead of the resolved one
        #[arg(long)]
        raw: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            return ExitCode::from(2);
        }
    };

    let _log_guard = logging::init(&config.logging, cli.verbose);

    match commands::run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}: {e}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Load the config file and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<AppConfig, tokenbook_core::error::TokenbookError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    if let Some(source) = &cli.source {
        config.source.url = source.clone();
    }
    if let Some(brand) = &cli.brand {
        config.display.default_brand = brand.clone();
    }
    if let Some(mode) = cli.mode {
        config.resolver.mode = match mode {
            ModeArg::Single => ResolverKind::Single,
            ModeArg::Chained => ResolverKind::Chained,
        };
    }
    Ok(config)
}
