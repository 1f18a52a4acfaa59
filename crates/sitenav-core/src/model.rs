use serde::{Deserialize, Serialize};

use crate::position::SortPosition;

/// Opaque listing key (the page's URL name in most listings)
pub type PageKey = String;

/// A full cumulative path prefix, e.g. "/site/a/_pages/b"
pub type PathPrefix = String;

/// One page as delivered by the page listing
/// Field names follow the listing's wire format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    #[serde(rename = "jcr:path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "pageTitle", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "pageURLName", default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "pagePosition", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SortPosition>,
}

impl PathRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<SortPosition>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Path if present and non-empty
    pub fn hierarchical_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    pub fn numeric_position(&self) -> Option<f64> {
        self.position.as_ref().and_then(SortPosition::as_f64)
    }
}

/// One navigation menu entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Record identifier, empty when no record matched the prefix
    pub id: String,
    /// Display title, already HTML-escaped
    pub title: String,
    /// The prefix this node stands for
    pub path: PathPrefix,
    /// Parsed sort position, None when missing or non-numeric
    pub position: Option<f64>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Depth-first walk over this node and all descendants
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a TreeNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(path))
    }
}

pub type Forest = Vec<TreeNode>;

/// Find a node anywhere in the forest by its prefix
pub fn find_in_forest<'a>(forest: &'a [TreeNode], path: &str) -> Option<&'a TreeNode> {
    forest.iter().find_map(|root| root.find(path))
}

/// Total number of nodes in the forest
pub fn forest_len(forest: &[TreeNode]) -> usize {
    let mut count = 0;
    for root in forest {
        root.walk(&mut |_| count += 1);
    }
    count
}
