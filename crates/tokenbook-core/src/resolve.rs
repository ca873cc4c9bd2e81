//! Token reference resolution.
//!
//! A raw token value is either a literal (`#0A84FF`, `16px`, `Georgia`) or a
//! reference of the form `{color.blue.500}`. References are looked up in the
//! primitive tree first, then in the brand's alias tree.
//!
//! [`ResolveMode::SingleHop`] follows exactly one reference: if the target is
//! itself a reference, that reference string is returned as-is.
//! [`ResolveMode::Chained`] keeps following until it reaches a literal and
//! reports cycles.

use std::fmt;

use thiserror::Error;

use crate::models::{TokenNode, TokenTree, TokenValue};

/// A dotted token path, split into segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenPath(Vec<String>);

impl TokenPath {
    pub fn parse(dotted: &str) -> Self {
        Self(dotted.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Characters that end a line; a reference never spans one.
const LINE_TERMINATORS: &[char] = &['\n', '\r', '\u{2028}', '\u{2029}'];

/// A parsed raw token value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenExpr {
    Literal(String),
    Reference(TokenPath),
}

impl TokenExpr {
    /// Anything of the form `{...}` on a single line is a reference;
    /// everything else is a literal.
    pub fn parse(raw: &str) -> Self {
        match raw
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .filter(|inner| !inner.contains(LINE_TERMINATORS))
        {
            Some(inner) => Self::Reference(TokenPath::parse(inner)),
            None => Self::Literal(raw.to_string()),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    #[default]
    SingleHop,
    Chained {
        max_depth: usize,
    },
}

/// Which tree a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The input was not a reference.
    Literal,
    Primitive,
    Alias,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Primitive => "primitive",
            Self::Alias => "alias",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    pub origin: Origin,
    /// References followed to reach `value`.
    pub hops: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unresolved reference {{{0}}}")]
    Unresolved(String),

    #[error("{{{0}}} names a token group, not a token")]
    NotALeaf(String),

    #[error("reference cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    #[error("reference {{{path}}} exceeds {max_depth} hops")]
    TooDeep { path: String, max_depth: usize },
}

/// Resolves raw values against a primitive tree and an alias tree.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    primitives: &'a TokenTree,
    alias: &'a TokenTree,
    mode: ResolveMode,
}

impl<'a> Resolver<'a> {
    pub fn new(primitives: &'a TokenTree, alias: &'a TokenTree) -> Self {
        Self {
            primitives,
            alias,
            mode: ResolveMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Resolve a raw value for display.
    ///
    /// Literals pass through. When a lookup fails, the last reference
    /// reached comes back as written, braces included: the input itself
    /// on the first hop, or the broken link of a chain. Cycles and chains
    /// over the depth limit return the input.
    pub fn resolve(&self, raw: &str) -> String {
        match self.try_resolve(raw) {
            Ok(resolution) => resolution.value,
            Err(e) => {
                tracing::debug!(raw, error = %e, "token reference left unresolved");
                match e {
                    ResolveError::Unresolved(path) | ResolveError::NotALeaf(path) => {
                        format!("{{{path}}}")
                    }
                    ResolveError::Cycle(_) | ResolveError::TooDeep { .. } => raw.to_string(),
                }
            }
        }
    }

    /// Resolve a token leaf. Composite values are rendered as compact JSON.
    pub fn resolve_token(&self, token: &TokenValue) -> String {
        match token.as_str() {
            Some(raw) => self.resolve(raw),
            None => token.display_value(),
        }
    }

    pub fn try_resolve(&self, raw: &str) -> Result<Resolution, ResolveError> {
        let path = match TokenExpr::parse(raw) {
            TokenExpr::Literal(value) => {
                return Ok(Resolution {
                    value,
                    origin: Origin::Literal,
                    hops: 0,
                })
            }
            TokenExpr::Reference(path) => path,
        };

        match self.mode {
            ResolveMode::SingleHop => {
                let (leaf, origin) = self.lookup(&path)?;
                Ok(Resolution {
                    value: leaf.display_value(),
                    origin,
                    hops: 1,
                })
            }
            ResolveMode::Chained { max_depth } => self.follow(path, max_depth),
        }
    }

    fn follow(&self, start: TokenPath, max_depth: usize) -> Result<Resolution, ResolveError> {
        let mut chain = vec![start.to_string()];
        let mut current = start;
        let mut hops = 0;

        loop {
            if hops >= max_depth {
                return Err(ResolveError::TooDeep {
                    path: chain[0].clone(),
                    max_depth,
                });
            }
            let (leaf, origin) = self.lookup(&current)?;
            hops += 1;

            match leaf.as_str().map(TokenExpr::parse) {
                Some(TokenExpr::Reference(next)) => {
                    let key = next.to_string();
                    let seen = chain.contains(&key);
                    chain.push(key);
                    if seen {
                        return Err(ResolveError::Cycle(chain));
                    }
                    current = next;
                }
                _ => {
                    return Ok(Resolution {
                        value: leaf.display_value(),
                        origin,
                        hops,
                    })
                }
            }
        }
    }

    /// Find the leaf at `path`, primitives first, then alias.
    pub fn lookup(&self, path: &TokenPath) -> Result<(&'a TokenValue, Origin), ResolveError> {
        let mut found_group = false;
        for (tree, origin) in [
            (self.primitives, Origin::Primitive),
            (self.alias, Origin::Alias),
        ] {
            match tree.get_path(path.segments()) {
                Some(TokenNode::Leaf(leaf)) => return Ok((leaf, origin)),
                Some(TokenNode::Group(_)) => found_group = true,
                _ => {}
            }
        }

        if found_group {
            Err(ResolveError::NotALeaf(path.to_string()))
        } else {
            Err(ResolveError::Unresolved(path.to_string()))
        }
    }
}
