use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::config::{NavigationConfig, SortConfig};
use crate::error::NavError;
use crate::hierarchy::{PagesResolver, PathResolver};
use crate::model::{Forest, PathPrefix, TreeNode};
use crate::sort::sort_forest;
use crate::store::PageStore;
use crate::utils::sanitize_html;

#[cfg(test)]
mod tests;

/// Arena index of a prefix node
pub type NodeIdx = usize;

#[derive(Debug, Clone)]
pub(crate) struct ArenaNode {
    pub(crate) prefix: PathPrefix,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) children: Vec<NodeIdx>,
}

/// Index-addressed hierarchy of path prefixes
///
/// Nodes and edges keep first-registration order, which is what gives the
/// rendered forest its order before position sorting.
#[derive(Debug, Clone, Default)]
pub struct PrefixArena {
    pub(crate) nodes: Vec<ArenaNode>,
    pub(crate) index: HashMap<PathPrefix, NodeIdx>,
}

impl PrefixArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `prefix` as a known node and return its index
    pub fn intern(&mut self, prefix: &str) -> NodeIdx {
        if let Some(&idx) = self.index.get(prefix) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(ArenaNode {
            prefix: prefix.to_string(),
            parent: None,
            children: Vec::new(),
        });
        self.index.insert(prefix.to_string(), idx);
        idx
    }

    /// Register `child` under `parent`
    ///
    /// Re-registering an existing edge is a no-op. Edges that would close a
    /// cycle or give a node a second parent are refused with a diagnostic.
    pub fn link(&mut self, parent: NodeIdx, child: NodeIdx) -> Result<(), NavError> {
        match self.nodes[child].parent {
            Some(existing) if existing == parent => return Ok(()),
            Some(existing) => {
                return Err(NavError::ConflictingParent {
                    child: self.nodes[child].prefix.clone(),
                    existing: self.nodes[existing].prefix.clone(),
                    parent: self.nodes[parent].prefix.clone(),
                })
            }
            None => {}
        }

        if self.is_ancestor_or_self(child, parent) {
            return Err(NavError::CycleDetected {
                parent: self.nodes[parent].prefix.clone(),
                child: self.nodes[child].prefix.clone(),
            });
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Whether `candidate` is `node` or one of its ancestors
    fn is_ancestor_or_self(&self, candidate: NodeIdx, node: NodeIdx) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(node);
        while let Some(idx) = current {
            if idx == candidate {
                return true;
            }
            if !visited.insert(idx) {
                break;
            }
            current = self.nodes[idx].parent;
        }
        false
    }

    /// Nodes that never received a parent, in registration order
    pub fn roots(&self) -> Vec<NodeIdx> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn lookup(&self, prefix: &str) -> Option<NodeIdx> {
        self.index.get(prefix).copied()
    }

    pub fn prefix(&self, idx: NodeIdx) -> &str {
        &self.nodes[idx].prefix
    }

    pub fn children(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.nodes[idx].children
    }

    pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.nodes[idx].parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Forest plus everything that went wrong while building it
#[derive(Debug, Default)]
pub struct BuildReport {
    pub forest: Forest,
    pub diagnostics: Vec<NavError>,
}

/// Converts a page listing into a navigation forest
pub struct ForestBuilder<'a> {
    resolver: &'a dyn PathResolver,
    sort: SortConfig,
    report_diagnostics: bool,
}

impl<'a> ForestBuilder<'a> {
    pub fn new(resolver: &'a dyn PathResolver, sort: SortConfig) -> Self {
        Self {
            resolver,
            sort,
            report_diagnostics: true,
        }
    }

    pub fn from_config(resolver: &'a dyn PathResolver, config: &NavigationConfig) -> Self {
        Self {
            resolver,
            sort: config.sort,
            report_diagnostics: config.logging.report_diagnostics,
        }
    }

    /// Collect every page's prefix sequence, sorted by joined string form
    pub fn prefix_sequences(&self, store: &PageStore) -> Vec<Vec<PathPrefix>> {
        let mut sequences: Vec<Vec<PathPrefix>> = store
            .iter()
            .filter_map(|(_, record)| record.hierarchical_path())
            .map(|path| self.resolver.node_prefixes(path))
            .collect();
        sequences.sort_by_cached_key(|seq| seq.join(","));
        sequences
    }

    /// Register all prefixes and parent/child pairs in a fresh arena
    pub fn arena(&self, sequences: &[Vec<PathPrefix>]) -> (PrefixArena, Vec<NavError>) {
        let mut arena = PrefixArena::new();
        let mut diagnostics = Vec::new();

        for sequence in sequences {
            let mut parent: Option<NodeIdx> = None;
            for prefix in sequence {
                let idx = arena.intern(prefix);
                if let Some(parent_idx) = parent {
                    if let Err(e) = arena.link(parent_idx, idx) {
                        diagnostics.push(e);
                    }
                }
                parent = Some(idx);
            }
        }

        (arena, diagnostics)
    }

    pub fn build(&self, store: &PageStore) -> BuildReport {
        let sequences = self.prefix_sequences(store);
        let (arena, diagnostics) = self.arena(&sequences);

        let mut forest: Forest = arena
            .roots()
            .into_iter()
            .map(|root| materialize(&arena, root, store))
            .collect();

        sort_forest(&mut forest, self.sort.scope, self.sort.unpositioned);

        debug!(
            "built navigation forest: {} pages, {} nodes, {} roots",
            store.len(),
            arena.len(),
            forest.len()
        );
        if self.report_diagnostics {
            for diagnostic in &diagnostics {
                warn!("{}", diagnostic);
            }
        }

        BuildReport {
            forest,
            diagnostics,
        }
    }
}

/// Build the forest with default settings and the given start depth
pub fn build_forest(store: &PageStore, start_depth: usize) -> Forest {
    let config = NavigationConfig::default().with_start_depth(start_depth);
    let resolver = PagesResolver::from_config(&config.hierarchy);
    let report = ForestBuilder::from_config(&resolver, &config).build(store);
    report.forest
}

/// Build the subtree under `root` with an explicit stack, children first
fn materialize(arena: &PrefixArena, root: NodeIdx, store: &PageStore) -> TreeNode {
    let mut order = Vec::new();
    let mut pending = vec![root];
    while let Some(idx) = pending.pop() {
        order.push(idx);
        pending.extend_from_slice(arena.children(idx));
    }

    let mut built: HashMap<NodeIdx, TreeNode> = HashMap::new();
    for &idx in order.iter().rev() {
        let children = arena
            .children(idx)
            .iter()
            .filter_map(|child| built.remove(child))
            .collect();
        built.insert(idx, entry(arena.prefix(idx), store, children));
    }
    built.remove(&root).unwrap_or_default()
}

fn entry(prefix: &str, store: &PageStore, children: Vec<TreeNode>) -> TreeNode {
    let record = store.record_by_path(prefix);

    TreeNode {
        id: record
            .and_then(|r| r.identifier.clone())
            .unwrap_or_default(),
        title: record
            .and_then(|r| r.title.as_deref())
            .map(sanitize_html)
            .unwrap_or_default(),
        path: prefix.to_string(),
        position: record.and_then(|r| r.numeric_position()),
        children,
    }
}
