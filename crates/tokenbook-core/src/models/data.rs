use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::token::{TokenNode, TokenTree};
use crate::error::TokenbookError;
use crate::resolve::Resolver;

/// Group-name prefix of primitive (literal) token sets.
pub const PRIMITIVES_PREFIX: &str = "Primitives/";

/// Group-name prefix of per-brand alias token sets.
pub const ALIAS_PREFIX: &str = "Alias/";

/// A full token document: named groups such as `"Primitives/White Label"`
/// or `"Alias/Daily Post"`, each holding a token tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenData(BTreeMap<String, TokenNode>);

impl TokenData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self, TokenbookError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TokenbookError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn insert_group(&mut self, name: impl Into<String>, tree: TokenTree) {
        self.0.insert(name.into(), TokenNode::Group(tree));
    }

    /// Builder form of [`insert_group`](Self::insert_group).
    pub fn with_group(mut self, name: impl Into<String>, tree: TokenTree) -> Self {
        self.insert_group(name, tree);
        self
    }

    /// Names of all groups that hold a token tree.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups().map(|(name, _)| name).collect()
    }

    pub fn group(&self, name: &str) -> Option<&TokenTree> {
        self.0.get(name).and_then(TokenNode::as_group)
    }

    fn groups(&self) -> impl Iterator<Item = (&str, &TokenTree)> {
        self.0
            .iter()
            .filter_map(|(name, node)| node.as_group().map(|tree| (name.as_str(), tree)))
    }

    /// The primitive token set: the first `Primitives/*` group.
    pub fn primitives(&self) -> Option<(&str, &TokenTree)> {
        self.groups()
            .find(|(name, _)| name.starts_with(PRIMITIVES_PREFIX))
    }

    /// The alias token set of a brand (`Alias/<brand>`).
    pub fn alias(&self, brand: &str) -> Option<&TokenTree> {
        self.group(&format!("{ALIAS_PREFIX}{brand}"))
    }

    /// The primitive tree, or an empty tree when the document has none.
    pub fn primitive_tree(&self) -> &TokenTree {
        match self.primitives() {
            Some((name, tree)) => {
                tracing::debug!(group = name, "using primitive set");
                tree
            }
            None => {
                tracing::warn!("token data has no Primitives/* group");
                TokenTree::empty()
            }
        }
    }

    /// The brand's alias tree, or an empty tree when the brand is unknown.
    pub fn alias_tree(&self, brand: &str) -> &TokenTree {
        self.alias(brand).unwrap_or_else(|| {
            tracing::warn!(brand, "no alias set for brand");
            TokenTree::empty()
        })
    }

    /// A single-hop resolver over the primitives and the brand's alias set.
    pub fn resolver(&self, brand: &str) -> Resolver<'_> {
        Resolver::new(self.primitive_tree(), self.alias_tree(brand))
    }

    /// `brand`, or the first brand of the document when `brand` is empty.
    pub fn brand_or_first<'a>(&'a self, brand: &'a str) -> &'a str {
        if !brand.is_empty() {
            return brand;
        }
        self.brands().first().copied().unwrap_or_default()
    }

    /// Brand names that have an alias set, in group order.
    pub fn brands(&self) -> Vec<&str> {
        self.groups()
            .filter_map(|(name, _)| name.strip_prefix(ALIAS_PREFIX))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "Primitives/White Label": {
            "color": { "blue": { "500": { "value": "#0A84FF", "type": "color" } } }
        },
        "Alias/Daily Post": {
            "brand": { "primary": { "value": "{color.blue.500}", "type": "color" } }
        },
        "Alias/Evening Herald": {},
        "$metadata": { "tokenSetOrder": ["Primitives/White Label"] },
        "$themes": []
    }"##;

    #[test]
    fn test_parse_groups() {
        let data = TokenData::from_json_str(SAMPLE).unwrap();
        let (name, prims) = data.primitives().unwrap();
        assert_eq!(name, "Primitives/White Label");
        assert!(prims.get("color").is_some());

        let alias = data.alias("Daily Post").unwrap();
        assert!(alias.get_path(&["brand", "primary"]).is_some());
        assert!(data.alias("Unknown").is_none());
    }

    #[test]
    fn test_brands() {
        let data = TokenData::from_json_str(SAMPLE).unwrap();
        assert_eq!(data.brands(), vec!["Daily Post", "Evening Herald"]);
    }

    #[test]
    fn test_brand_or_first() {
        let data = TokenData::from_json_str(SAMPLE).unwrap();
        assert_eq!(data.brand_or_first(""), "Daily Post");
        assert_eq!(data.brand_or_first("Evening Herald"), "Evening Herald");
        assert_eq!(data.brand_or_first("Unknown"), "Unknown");
        assert_eq!(TokenData::new().brand_or_first(""), "");
    }

    #[test]
    fn test_metadata_groups_are_listed_but_arrays_are_not() {
        let data = TokenData::from_json_str(SAMPLE).unwrap();
        let names = data.group_names();
        assert!(names.contains(&"$metadata"));
        assert!(!names.contains(&"$themes"));
    }

    #[test]
    fn test_missing_groups_resolve_against_empty_trees() {
        let data = TokenData::from_json_str(SAMPLE).unwrap();
        assert!(data.alias_tree("Unknown").is_empty());
        assert_eq!(
            data.resolver("Daily Post").resolve("{color.blue.500}"),
            "#0A84FF"
        );
        assert_eq!(
            TokenData::new().resolver("Daily Post").resolve("{color.blue.500}"),
            "{color.blue.500}"
        );
    }

    #[test]
    fn test_invalid_json_is_data_error() {
        let err = TokenData::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TokenbookError::Data(_)));
    }

    #[test]
    fn test_builder() {
        let data = TokenData::new()
            .with_group("Primitives/Core", TokenTree::new().with("a.b", "#fff", "color"));
        assert_eq!(data.primitives().map(|(n, _)| n), Some("Primitives/Core"));
        assert!(data.brands().is_empty());
    }
}
