//! Conversion between core tree nodes and the jsTree JSON shape the
//! presentation host renders.

use serde::{Deserialize, Serialize};
use sitenav_core::config::PresentationConfig;
use sitenav_core::TreeNode;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsTreeNode {
    pub attr: NodeAttr,
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<NodeState>,
    pub children: Vec<JsTreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAttr {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub title: String,
    pub attr: LinkAttr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAttr {
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Open,
    Closed,
}

/// Rendered id of a node; nodes without a page keep an empty id
pub fn node_id(id: &str, presentation: &PresentationConfig) -> String {
    if id.is_empty() {
        String::new()
    } else {
        format!("{}{}", presentation.node_id_prefix, id)
    }
}

/// Page identifier behind a rendered node id
///
/// Accepts selector form ("#nav_about") as well as the bare id.
pub fn strip_node_prefix<'a>(raw: &'a str, presentation: &PresentationConfig) -> &'a str {
    let raw = raw.trim_start_matches('#');
    raw.strip_prefix(presentation.node_id_prefix.as_str())
        .unwrap_or(raw)
}

/// Convert a core forest, marking parents open when their page is expanded
pub fn forest_to_jstree(
    forest: &[TreeNode],
    presentation: &PresentationConfig,
    expanded: &HashSet<String>,
) -> Vec<JsTreeNode> {
    forest
        .iter()
        .map(|node| tree_node_to_jstree(node, presentation, expanded))
        .collect()
}

pub fn tree_node_to_jstree(
    node: &TreeNode,
    presentation: &PresentationConfig,
    expanded: &HashSet<String>,
) -> JsTreeNode {
    let state = if node.children.is_empty() {
        None
    } else if expanded.contains(&node.id) {
        Some(NodeState::Open)
    } else {
        Some(NodeState::Closed)
    };

    JsTreeNode {
        attr: NodeAttr {
            id: node_id(&node.id, presentation),
        },
        data: NodeData {
            title: node.title.clone(),
            attr: LinkAttr {
                href: presentation.href.clone(),
            },
        },
        state,
        children: forest_to_jstree(&node.children, presentation, expanded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, title: &str) -> TreeNode {
        TreeNode {
            id: id.to_string(),
            title: title.to_string(),
            path: format!("/s/{}", id),
            position: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_jstree_shape() {
        let mut parent = leaf("news", "News");
        parent.children.push(leaf("archive", "Archive"));
        let presentation = PresentationConfig::default();

        let tree = forest_to_jstree(&[parent, leaf("", "")], &presentation, &HashSet::new());

        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {
                    "attr": {"id": "nav_news"},
                    "data": {"title": "News", "attr": {"href": "javascript:;"}},
                    "state": "closed",
                    "children": [{
                        "attr": {"id": "nav_archive"},
                        "data": {"title": "Archive", "attr": {"href": "javascript:;"}},
                        "children": []
                    }]
                },
                {
                    "attr": {"id": ""},
                    "data": {"title": "", "attr": {"href": "javascript:;"}},
                    "children": []
                }
            ])
        );
    }

    #[test]
    fn test_expanded_parent_is_open() {
        let mut parent = leaf("news", "News");
        parent.children.push(leaf("archive", "Archive"));
        let expanded: HashSet<String> = ["news".to_string()].into_iter().collect();

        let tree = forest_to_jstree(&[parent], &PresentationConfig::default(), &expanded);

        assert_eq!(tree[0].state, Some(NodeState::Open));
    }

    #[test]
    fn test_strip_node_prefix() {
        let presentation = PresentationConfig::default();
        assert_eq!(strip_node_prefix("nav_about", &presentation), "about");
        assert_eq!(strip_node_prefix("#nav_about", &presentation), "about");
        assert_eq!(strip_node_prefix("about", &presentation), "about");
        assert_eq!(node_id("about", &presentation), "nav_about");
        assert_eq!(node_id("", &presentation), "");
    }
}
