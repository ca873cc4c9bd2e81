//! Plain-terminal rendering of token tables.

use std::fmt::Write;

use colored::Colorize;

use tokenbook_core::swatch::Swatch;
use tokenbook_core::table::TokenRow;

use crate::commands::ResolveOutput;

/// Width of the swatch column, including its trailing gap.
const SWATCH_WIDTH: usize = 3;

pub fn token_rows(rows: &[&TokenRow], swatches: bool) -> String {
    if rows.is_empty() {
        return "No tokens match.\n".to_string();
    }

    let path_w = column_width("PATH", rows.iter().map(|r| r.path.as_str()));
    let type_w = column_width("TYPE", rows.iter().map(|r| r.token_type.as_str()));
    let raw_w = column_width("VALUE", rows.iter().map(|r| r.raw.as_str()));

    let mut out = String::new();
    if swatches {
        out.push_str(&" ".repeat(SWATCH_WIDTH));
    }
    let header = format!(
        "{:<path_w$}  {:<type_w$}  {:<raw_w$}  {}",
        "PATH", "TYPE", "VALUE", "RESOLVED"
    );
    let _ = writeln!(out, "{}", header.bold());

    for row in rows {
        if swatches {
            out.push_str(&swatch_cell(&row.swatch));
        }
        let resolved = if row.resolved == row.raw {
            row.resolved.normal()
        } else {
            row.resolved.cyan()
        };
        let _ = writeln!(
            out,
            "{:<path_w$}  {:<type_w$}  {:<raw_w$}  {}",
            row.path,
            row.token_type.dimmed(),
            row.raw,
            resolved
        );
    }
    out
}

pub fn resolution(output: &ResolveOutput) -> String {
    match &output.error {
        None => {
            let hops = match output.hops {
                0 => String::new(),
                1 => ", 1 hop".to_string(),
                n => format!(", {n} hops"),
            };
            format!(
                "{} -> {}  ({}{hops})\n",
                output.input,
                output.value.bold(),
                output.origin.unwrap_or("literal")
            )
        }
        Some(error) => format!(
            "{} -> {}  ({})\n",
            output.input,
            output.value,
            error.yellow()
        ),
    }
}

pub fn brands(brands: &[&str], current: &str) -> String {
    if brands.is_empty() {
        return "No brands found.\n".to_string();
    }
    let mut out = String::new();
    for brand in brands {
        if *brand == current {
            let _ = writeln!(out, "* {}", brand.bold());
        } else {
            let _ = writeln!(out, "  {brand}");
        }
    }
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

fn swatch_cell(swatch: &Swatch) -> String {
    match swatch {
        Swatch::Color { color } => {
            format!("{} ", "  ".on_truecolor(color.r, color.g, color.b))
        }
        _ => " ".repeat(SWATCH_WIDTH),
    }
}
