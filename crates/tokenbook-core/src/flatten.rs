//! Flatten nested token trees into dotted-path mappings.
//!
//! `{"font": {"size": {"sm": {value, type}}}}` becomes
//! `{"font.size.sm": {value, type}}`. Keys that collide after joining
//! overwrite silently; the last one visited wins.

use std::collections::BTreeMap;

use crate::models::{TokenNode, TokenTree, TokenValue};

/// Dotted path → leaf token.
pub type FlatTokens = BTreeMap<String, TokenValue>;

/// Flatten a typed token tree with a single depth-first walk.
pub fn flatten(tree: &TokenTree) -> FlatTokens {
    let mut out = FlatTokens::new();
    walk(tree, "", &mut out);
    out
}

fn walk(tree: &TokenTree, prefix: &str, out: &mut FlatTokens) {
    for (key, node) in tree.iter() {
        let path = join(prefix, key);
        match node {
            TokenNode::Leaf(leaf) => {
                out.insert(path, leaf.clone());
            }
            TokenNode::Group(group) => walk(group, &path, out),
            TokenNode::Other(_) => {}
        }
    }
}

/// Flatten raw JSON. Objects with a `value` field are leaves; other
/// objects are groups; everything else is skipped.
pub fn flatten_json(value: &serde_json::Value) -> FlatTokens {
    let mut out = FlatTokens::new();
    walk_json(value, "", &mut out);
    out
}

fn walk_json(value: &serde_json::Value, prefix: &str, out: &mut FlatTokens) {
    let Some(map) = value.as_object() else {
        return;
    };
    for (key, child) in map {
        let Some(obj) = child.as_object() else {
            continue;
        };
        let path = join(prefix, key);
        match obj.get("value") {
            Some(leaf_value) => {
                let token_type = obj
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or_default()
                    .to_string();
                out.insert(
                    path,
                    TokenValue {
                        value: leaf_value.clone(),
                        token_type,
                    },
                );
            }
            None => walk_json(child, &path, out),
        }
    }
}

/// Number of leaf tokens in a tree.
pub fn leaf_count(tree: &TokenTree) -> usize {
    tree.iter()
        .map(|(_, node)| match node {
            TokenNode::Leaf(_) => 1,
            TokenNode::Group(group) => leaf_count(group),
            TokenNode::Other(_) => 0,
        })
        .sum()
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> TokenTree {
        serde_json::from_str(
            r##"{
                "color": {
                    "white": { "value": "#ffffff", "type": "color" },
                    "blue": {
                        "100": { "value": "#D6E9FF", "type": "color" },
                        "500": { "value": "#0A84FF", "type": "color" }
                    }
                },
                "font": {
                    "size": {
                        "sm": { "value": "12px", "type": "dimension" },
                        "md": { "value": "16px", "type": "dimension" }
                    },
                    "family": { "serif": { "value": "Georgia", "type": "fontFamily" } }
                },
                "radius": { "value": "4px", "type": "borderRadius" }
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_tree() {
        assert!(flatten(&TokenTree::new()).is_empty());
        assert_eq!(leaf_count(&TokenTree::new()), 0);
    }

    #[test]
    fn test_every_leaf_appears_once_at_its_path() {
        let tree = sample_tree();
        let flat = flatten(&tree);

        for (path, leaf) in &flat {
            let segments: Vec<&str> = path.split('.').collect();
            let node = tree.get_path(&segments).unwrap();
            assert_eq!(node.as_leaf(), Some(leaf), "mismatch at {path}");
        }
        assert_eq!(flat["font.size.sm"], TokenValue::new("12px", "dimension"));
        assert_eq!(flat["color.blue.500"].as_str(), Some("#0A84FF"));
        assert_eq!(flat["radius"].as_str(), Some("4px"));
    }

    #[test]
    fn test_no_leaves_dropped_or_duplicated() {
        let tree = sample_tree();
        assert_eq!(leaf_count(&tree), 7);
        assert_eq!(flatten(&tree).len(), leaf_count(&tree));
    }

    #[test]
    fn test_other_nodes_skipped() {
        let tree: TokenTree = serde_json::from_str(
            r#"{ "$description": "core", "a": { "value": "1px", "type": "dimension" } }"#,
        )
        .unwrap();
        let flat = flatten(&tree);
        assert_eq!(flat.len(), 1);
        assert_eq!(leaf_count(&tree), 1);
    }

    #[test]
    fn test_colliding_paths_last_wins() {
        // "a" → "b" is visited before the literal "a.b" key.
        let tree: TokenTree = serde_json::from_str(
            r#"{
                "a": { "b": { "value": "nested", "type": "" } },
                "a.b": { "value": "dotted", "type": "" }
            }"#,
        )
        .unwrap();
        let flat = flatten(&tree);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["a.b"].as_str(), Some("dotted"));
        assert_eq!(leaf_count(&tree), 2);
    }

    #[test]
    fn test_flatten_json_matches_typed() {
        let raw: serde_json::Value = serde_json::to_value(sample_tree()).unwrap();
        assert_eq!(flatten_json(&raw), flatten(&sample_tree()));
    }

    #[test]
    fn test_flatten_json_non_object_root() {
        assert!(flatten_json(&serde_json::json!([1, 2, 3])).is_empty());
        assert!(flatten_json(&serde_json::json!("text")).is_empty());
    }
}
