use std::io::IsTerminal;
use std::time::Duration;

use colored::Colorize;
use serde::Serialize;
use thiserror::Error;

use tokenbook_api::{FetchError, Source, TokenSource};
use tokenbook_core::config::AppConfig;
use tokenbook_core::models::TokenData;
use tokenbook_core::table::{TokenRow, TokenSet, TokenTable};

use crate::{clipboard, render, Cli, Command, OutputFormat};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Source(#[from] FetchError),

    #[error("failed to load tokens: {0}")]
    Fetch(String),

    #[error("no token at path '{0}'")]
    UnknownToken(String),

    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result of `tokenbook resolve`, as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub input: String,
    pub value: String,
    pub origin: Option<&'static str>,
    pub hops: usize,
    pub error: Option<String>,
}

pub(crate) async fn run(cli: &Cli, config: &AppConfig) -> Result<(), CliError> {
    let data = load(config).await?;
    let brand = data.brand_or_first(&config.display.default_brand);
    let mode = config.resolver.resolve_mode();

    match &cli.command {
        Command::List {
            set,
            filter,
            no_swatches,
        } => {
            let table = TokenTable::build(&data, brand, TokenSet::from(*set), mode);
            let rows = table.filter(filter.as_deref().unwrap_or_default());
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
                OutputFormat::Table => {
                    let swatches = config.display.swatches && !no_swatches;
                    print!("{}", render::token_rows(&rows, swatches));
                }
            }
        }
        Command::Resolve { raw } => {
            let resolver = data.resolver(brand).with_mode(mode);
            let output = match resolver.try_resolve(raw) {
                Ok(resolution) => ResolveOutput {
                    input: raw.clone(),
                    value: resolution.value,
                    origin: Some(resolution.origin.as_str()),
                    hops: resolution.hops,
                    error: None,
                },
                Err(e) => ResolveOutput {
                    input: raw.clone(),
                    value: raw.clone(),
                    origin: None,
                    hops: 0,
                    error: Some(e.to_string()),
                },
            };
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
                OutputFormat::Table => print!("{}", render::resolution(&output)),
            }
        }
        Command::Brands => {
            let brands = data.brands();
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&brands)?),
                OutputFormat::Table => print!("{}", render::brands(&brands, brand)),
            }
        }
        Command::Copy { path, raw } => {
            let table = TokenTable::build(&data, brand, TokenSet::All, mode);
            let row = table
                .find(path)
                .ok_or_else(|| CliError::UnknownToken(path.clone()))?;
            let text = copy_text(row, *raw);
            clipboard::copy(text);
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "path": row.path,
                        "value": text,
                    }))?
                ),
                OutputFormat::Table => println!("Copied {} {}", row.path.bold(), text),
            }
        }
    }

    Ok(())
}

/// The authored value with `--raw`, the resolved one otherwise.
fn copy_text(row: &TokenRow, raw: bool) -> &str {
    if raw {
        &row.raw
    } else {
        &row.resolved
    }
}

/// Fetch the token document once. A failed fetch carries its message verbatim.
async fn load(config: &AppConfig) -> Result<TokenData, CliError> {
    let timeout = (config.source.timeout_secs > 0)
        .then(|| Duration::from_secs(config.source.timeout_secs));
    let source = Source::parse(&config.source.url, timeout)?;

    if std::io::stderr().is_terminal() {
        eprintln!("{}", format!("Loading tokens from {}", source.describe()).dimmed());
    }

    let data = source
        .fetch()
        .await
        .map_err(|e| CliError::Fetch(e.to_string()))?;
    tracing::debug!(groups = data.group_names().len(), "tokens loaded");
    Ok(data)
}
