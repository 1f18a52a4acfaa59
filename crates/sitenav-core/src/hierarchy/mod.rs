use crate::model::PathPrefix;

mod pages;

pub use pages::PagesResolver;

/// Defines how page paths are cut into navigation levels
pub trait PathResolver: Send + Sync {
    /// Ordered cumulative prefixes of `path` that become tree nodes
    /// "/site/a/_pages/b" -> ["/site", "/site/a", "/site/a/_pages/b"]
    fn node_prefixes(&self, path: &str) -> Vec<PathPrefix>;

    /// Container segment that is never shown as a node
    fn reserved_segment(&self) -> &str;

    /// Node prefix of the parent of `path`, None when `path` is a root
    fn resolve_parent(&self, path: &str) -> Option<PathPrefix> {
        let mut prefixes = self.node_prefixes(path);
        prefixes.pop()?;
        prefixes.pop()
    }

    /// Whether `path` itself maps to a node
    fn is_node(&self, path: &str) -> bool {
        self.node_prefixes(path).last().map(String::as_str) == Some(path)
    }
}
