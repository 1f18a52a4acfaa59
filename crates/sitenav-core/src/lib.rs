//! Sitenav Core Library
//!
//! Turns a flat page listing into a navigation forest and plans reorders.
//! No IO dependencies beyond reading a config file.
//!

pub mod config;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod mutation;
pub mod position;
pub mod sort;
pub mod store;
pub mod tree;
pub mod utils;

pub use config::NavigationConfig;
pub use engine::NavigationEngine;
pub use error::NavError;
pub use hierarchy::{PagesResolver, PathResolver};
pub use model::{Forest, PathRecord, TreeNode};
pub use store::PageStore;
pub use tree::{build_forest, BuildReport, ForestBuilder};
pub use utils::sanitize_html;
