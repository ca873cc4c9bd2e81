use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A leaf design token.
///
/// `value` is usually a string (hex colour, pixel size, font name, or a
/// `{dotted.path}` reference) but composite tokens such as typography
/// carry an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenValue {
    pub value: Value,
    #[serde(rename = "type", default)]
    pub token_type: String,
}

impl TokenValue {
    pub fn new(value: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            value: Value::String(value.into()),
            token_type: token_type.into(),
        }
    }

    /// The value when it is a plain string.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Text suitable for display: the string itself, or compact JSON for
    /// composite values.
    pub fn display_value(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A node in a token tree: a leaf token or a nested group.
///
/// An object with a `value` field is a leaf, any other object is a group.
/// Anything else (stray strings, arrays, malformed leaves) is kept as
/// `Other` so a hand-edited file still loads; the flattener skips it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenNode {
    Leaf(TokenValue),
    Group(TokenTree),
    Other(Value),
}

impl<'de> Deserialize<'de> for TokenNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

impl TokenNode {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) if map.contains_key("value") => {
                let value = Value::Object(map);
                match TokenValue::deserialize(&value) {
                    Ok(leaf) => Self::Leaf(leaf),
                    Err(_) => Self::Other(value),
                }
            }
            Value::Object(map) => Self::Group(TokenTree(
                map.into_iter()
                    .map(|(key, child)| (key, Self::from_value(child)))
                    .collect(),
            )),
            other => Self::Other(other),
        }
    }

    pub fn as_leaf(&self) -> Option<&TokenValue> {
        match self {
            Self::Leaf(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenTree> {
        match self {
            Self::Group(g) => Some(g),
            _ => None,
        }
    }
}

/// A nested mapping of keys to token nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTree(BTreeMap<String, TokenNode>);

static EMPTY_TREE: TokenTree = TokenTree(BTreeMap::new());

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared empty tree, for lookups against a missing group.
    pub fn empty() -> &'static TokenTree {
        &EMPTY_TREE
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenNode)> {
        self.0.iter()
    }

    pub fn insert(&mut self, key: impl Into<String>, node: TokenNode) -> Option<TokenNode> {
        self.0.insert(key.into(), node)
    }

    /// Walk `segments` through nested groups.
    pub fn get_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<&TokenNode> {
        let (first, rest) = segments.split_first()?;
        let mut node = self.0.get(first.as_ref())?;
        for seg in rest {
            node = node.as_group()?.0.get(seg.as_ref())?;
        }
        Some(node)
    }

    /// Insert a leaf at a dotted path, creating intermediate groups.
    ///
    /// An existing leaf on the way is replaced by a group.
    pub fn insert_path(&mut self, path: &str, leaf: TokenValue) {
        let segments: Vec<&str> = path.split('.').collect();
        self.insert_segments(&segments, leaf);
    }

    fn insert_segments(&mut self, segments: &[&str], leaf: TokenValue) {
        match segments {
            [] => {}
            [last] => {
                self.0.insert(last.to_string(), TokenNode::Leaf(leaf));
            }
            [first, rest @ ..] => {
                let node = self
                    .0
                    .entry(first.to_string())
                    .or_insert_with(|| TokenNode::Group(TokenTree::new()));
                match node {
                    TokenNode::Group(group) => group.insert_segments(rest, leaf),
                    other => {
                        let mut group = TokenTree::new();
                        group.insert_segments(rest, leaf);
                        *other = TokenNode::Group(group);
                    }
                }
            }
        }
    }

    /// Builder form of [`insert_path`](Self::insert_path).
    pub fn with(mut self, path: &str, value: &str, token_type: &str) -> Self {
        self.insert_path(path, TokenValue::new(value, token_type));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_detected_by_value_field() {
        let tree: TokenTree = serde_json::from_str(
            r##"{
                "white": { "value": "#ffffff", "type": "color" },
                "font": { "size": { "sm": { "value": "12px", "type": "dimension" } } }
            }"##,
        )
        .unwrap();

        assert!(matches!(tree.get("white"), Some(TokenNode::Leaf(_))));
        assert!(matches!(tree.get("font"), Some(TokenNode::Group(_))));

        let sm = tree.get_path(&["font", "size", "sm"]).unwrap().as_leaf().unwrap();
        assert_eq!(sm.as_str(), Some("12px"));
        assert_eq!(sm.token_type, "dimension");
    }

    #[test]
    fn test_missing_type_defaults_to_empty() {
        let tree: TokenTree = serde_json::from_str(r#"{ "gap": { "value": "4px" } }"#).unwrap();
        let gap = tree.get("gap").unwrap().as_leaf().unwrap();
        assert_eq!(gap.token_type, "");
    }

    #[test]
    fn test_composite_value_display() {
        let tree: TokenTree = serde_json::from_str(
            r#"{ "heading": { "value": { "fontFamily": "Inter", "fontWeight": 700 }, "type": "typography" } }"#,
        )
        .unwrap();
        let heading = tree.get("heading").unwrap().as_leaf().unwrap();
        assert_eq!(heading.as_str(), None);
        assert_eq!(
            heading.display_value(),
            r#"{"fontFamily":"Inter","fontWeight":700}"#
        );
    }

    #[test]
    fn test_stray_values_are_kept_as_other() {
        let tree: TokenTree =
            serde_json::from_str(r#"{ "$schema": "v1", "order": ["a"], "a": {} }"#).unwrap();
        assert!(matches!(tree.get("$schema"), Some(TokenNode::Other(_))));
        assert!(matches!(tree.get("order"), Some(TokenNode::Other(_))));
        assert!(matches!(tree.get("a"), Some(TokenNode::Group(g)) if g.is_empty()));
    }

    #[test]
    fn test_malformed_leaf_is_other() {
        let tree: TokenTree =
            serde_json::from_str(r#"{ "gap": { "value": "4px", "type": 4 } }"#).unwrap();
        assert!(matches!(tree.get("gap"), Some(TokenNode::Other(_))));
    }

    #[test]
    fn test_get_path_through_leaf_is_none() {
        let tree = TokenTree::new().with("a.b", "#fff", "color");
        assert!(tree.get_path(&["a", "b", "c"]).is_none());
        assert!(tree.get_path::<&str>(&[]).is_none());
        assert!(tree.get_path(&["a"]).unwrap().as_group().is_some());
    }

    #[test]
    fn test_insert_path_replaces_leaf_with_group() {
        let mut tree = TokenTree::new().with("a", "1px", "dimension");
        tree.insert_path("a.b", TokenValue::new("2px", "dimension"));
        let b = tree.get_path(&["a", "b"]).unwrap().as_leaf().unwrap();
        assert_eq!(b.as_str(), Some("2px"));
    }
}
