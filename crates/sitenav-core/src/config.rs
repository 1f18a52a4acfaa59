use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Top-level configuration for the navigation engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub sort: SortConfig,
    #[serde(default)]
    pub reorder: ReorderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How page paths map onto the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Number of leading path segments (after the root slash) that never become nodes
    #[serde(default)]
    pub start_depth: usize,
    /// Container segment excluded from the displayed hierarchy
    #[serde(default = "default_reserved_segment")]
    pub reserved_segment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Prefix prepended to node ids in the rendered tree
    #[serde(default = "default_node_id_prefix")]
    pub node_id_prefix: String,
    /// Link target written on every rendered node
    #[serde(default = "default_href")]
    pub href: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub scope: SortScope,
    #[serde(default)]
    pub unpositioned: UnpositionedOrder,
}

/// Which sibling levels get ordered by position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortScope {
    /// Only the top-level roots
    #[default]
    RootOnly,
    /// Every sibling level of the forest
    Recursive,
}

/// Placement of siblings whose position is missing or non-numeric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnpositionedOrder {
    /// Unpositioned entries keep their slot; numeric runs between them are sorted
    #[default]
    Anchored,
    /// Unpositioned entries follow all numeric ones, in input order
    Last,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderConfig {
    /// Gap used when no free value exists between two neighbours
    #[serde(default = "default_position_step")]
    pub position_step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether build diagnostics are logged at warn level
    #[serde(default = "default_true")]
    pub report_diagnostics: bool,
}

fn default_reserved_segment() -> String {
    "_pages".to_string()
}

fn default_node_id_prefix() -> String {
    "nav_".to_string()
}

fn default_href() -> String {
    "javascript:;".to_string()
}

fn default_position_step() -> f64 {
    200000.0
}

fn default_true() -> bool {
    true
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            start_depth: 0,
            reserved_segment: default_reserved_segment(),
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            node_id_prefix: default_node_id_prefix(),
            href: default_href(),
        }
    }
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            position_step: default_position_step(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            report_diagnostics: true,
        }
    }
}

impl NavigationConfig {
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    pub fn with_start_depth(mut self, depth: usize) -> Self {
        self.hierarchy.start_depth = depth;
        self
    }

    pub fn with_sort(mut self, scope: SortScope, unpositioned: UnpositionedOrder) -> Self {
        self.sort = SortConfig {
            scope,
            unpositioned,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = NavigationConfig::from_yaml("hierarchy:\n  start_depth: 2\n").unwrap();
        assert_eq!(config.hierarchy.start_depth, 2);
        assert_eq!(config.hierarchy.reserved_segment, "_pages");
        assert_eq!(config.presentation.node_id_prefix, "nav_");
        assert_eq!(config.sort.scope, SortScope::RootOnly);
        assert_eq!(config.reorder.position_step, 200000.0);
    }

    #[test]
    fn test_sort_options_parse_snake_case() {
        let yaml = "sort:\n  scope: recursive\n  unpositioned: last\n";
        let config = NavigationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.sort.scope, SortScope::Recursive);
        assert_eq!(config.sort.unpositioned, UnpositionedOrder::Last);
    }

    #[test]
    fn test_yaml_round_trip_rejects_unknown_variant() {
        let config = NavigationConfig::default().with_start_depth(3);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(NavigationConfig::from_yaml(&yaml).unwrap(), config);

        assert!(NavigationConfig::from_yaml("sort:\n  scope: sideways\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reorder:\n  position_step: 1000").unwrap();

        let config = NavigationConfig::load(file.path()).unwrap();
        assert_eq!(config.reorder.position_step, 1000.0);

        let missing = file.path().with_extension("missing");
        assert!(NavigationConfig::load(&missing).is_err());
    }
}
