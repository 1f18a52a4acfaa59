use crate::{
    config::HierarchyConfig,
    hierarchy::PathResolver,
    model::PathPrefix,
};

/// Resolver for content-repository page paths
///
/// Segment 0 (before the leading slash) is the anchor and never a node.
/// The next `start_depth` segments are kept in every prefix but skipped as
/// nodes, as are empty segments and the reserved container segment.
#[derive(Debug, Clone)]
pub struct PagesResolver {
    start_depth: usize,
    reserved: String,
}

impl PagesResolver {
    pub fn new(start_depth: usize, reserved: impl Into<String>) -> Self {
        Self {
            start_depth,
            reserved: reserved.into(),
        }
    }

    pub fn from_config(config: &HierarchyConfig) -> Self {
        Self::new(config.start_depth, config.reserved_segment.clone())
    }

    pub fn start_depth(&self) -> usize {
        self.start_depth
    }
}

impl Default for PagesResolver {
    fn default() -> Self {
        Self::from_config(&HierarchyConfig::default())
    }
}

impl PathResolver for PagesResolver {
    fn node_prefixes(&self, path: &str) -> Vec<PathPrefix> {
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() <= self.start_depth + 1 {
            return Vec::new();
        }

        let mut prefix = String::new();
        for segment in &segments[1..=self.start_depth] {
            prefix.push('/');
            prefix.push_str(segment);
        }

        let mut prefixes = Vec::new();
        for segment in &segments[self.start_depth + 1..] {
            prefix.push('/');
            prefix.push_str(segment);
            if !segment.is_empty() && *segment != self.reserved {
                prefixes.push(prefix.clone());
            }
        }
        prefixes
    }

    fn reserved_segment(&self) -> &str {
        &self.reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_skip_reserved_and_empty_segments() {
        let resolver = PagesResolver::new(0, "_pages");
        assert_eq!(
            resolver.node_prefixes("/site/_pages/a//b"),
            vec!["/site", "/site/_pages/a", "/site/_pages/a//b"]
        );
    }

    #[test]
    fn test_start_depth_drops_leading_nodes_but_keeps_full_prefix() {
        let resolver = PagesResolver::new(1, "_pages");
        assert_eq!(resolver.node_prefixes("/s/a"), vec!["/s/a"]);
        assert_eq!(resolver.node_prefixes("/s/a/b"), vec!["/s/a", "/s/a/b"]);
    }

    #[test]
    fn test_start_depth_beyond_path_yields_nothing() {
        let resolver = PagesResolver::new(3, "_pages");
        assert!(resolver.node_prefixes("/s/a").is_empty());
        assert!(resolver.node_prefixes("/s/a/b").is_empty());
        assert!(resolver.node_prefixes("").is_empty());
    }

    #[test]
    fn test_relative_path_drops_first_segment() {
        let resolver = PagesResolver::default();
        assert_eq!(resolver.node_prefixes("a/b"), vec!["/b"]);
    }

    #[test]
    fn test_resolve_parent() {
        let resolver = PagesResolver::new(1, "_pages");
        assert_eq!(
            resolver.resolve_parent("/s/a/_pages/b"),
            Some("/s/a".to_string())
        );
        assert_eq!(resolver.resolve_parent("/s/a"), None);
        assert!(resolver.is_node("/s/a/_pages/b"));
        assert!(!resolver.is_node("/s/a/_pages"));
    }
}
