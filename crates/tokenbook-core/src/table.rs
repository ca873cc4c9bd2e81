//! Flattened, resolved token rows for display.

use serde::Serialize;

use crate::flatten::flatten;
use crate::models::{TokenData, TokenTree};
use crate::resolve::{ResolveMode, Resolver};
use crate::swatch::Swatch;

/// Which token sets a table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenSet {
    Primitives,
    Alias,
    #[default]
    All,
}

/// The set a single row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSource {
    Primitive,
    Alias,
}

impl RowSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Alias => "alias",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRow {
    pub source: RowSource,
    pub path: String,
    pub token_type: String,
    /// The value as authored, e.g. `{color.blue.500}`.
    pub raw: String,
    pub resolved: String,
    pub swatch: Swatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenTable {
    pub brand: String,
    pub rows: Vec<TokenRow>,
}

impl TokenTable {
    /// Flatten and resolve the selected sets of a brand.
    ///
    /// A brand without an alias set resolves against primitives only.
    pub fn build(data: &TokenData, brand: &str, set: TokenSet, mode: ResolveMode) -> Self {
        let primitives = data.primitive_tree();
        let alias = data.alias_tree(brand);

        let resolver = Resolver::new(primitives, alias).with_mode(mode);
        let mut rows = Vec::new();

        if matches!(set, TokenSet::Primitives | TokenSet::All) {
            push_rows(&mut rows, &resolver, primitives, RowSource::Primitive);
        }
        if matches!(set, TokenSet::Alias | TokenSet::All) {
            push_rows(&mut rows, &resolver, alias, RowSource::Alias);
        }

        tracing::debug!(brand, rows = rows.len(), "built token table");
        Self {
            brand: brand.to_string(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose path or type contains `query` (case-insensitive).
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&TokenRow> {
        let query = query.trim().to_lowercase();
        self.rows
            .iter()
            .filter(|row| {
                query.is_empty()
                    || row.path.to_lowercase().contains(&query)
                    || row.token_type.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Find a row by exact path. Alias rows shadow primitive rows.
    pub fn find(&self, path: &str) -> Option<&TokenRow> {
        self.rows
            .iter()
            .filter(|row| row.path == path)
            .max_by_key(|row| row.source)
    }
}

fn push_rows(
    rows: &mut Vec<TokenRow>,
    resolver: &Resolver<'_>,
    tree: &TokenTree,
    source: RowSource,
) {
    for (path, token) in flatten(tree) {
        let resolved = resolver.resolve_token(&token);
        let swatch = Swatch::classify(&token.token_type, &resolved);
        rows.push(TokenRow {
            source,
            path,
            raw: token.display_value(),
            resolved,
            token_type: token.token_type,
            swatch,
        });
    }
}
