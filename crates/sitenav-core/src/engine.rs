use log::{debug, warn};

use crate::config::NavigationConfig;
use crate::error::{NavError, Result};
use crate::hierarchy::{PagesResolver, PathResolver};
use crate::mutation::{plan_reorder, Placement, ReorderPlan};
use crate::store::PageStore;
use crate::tree::{BuildReport, ForestBuilder};

/// The NavigationEngine is the high-level facade of the core.
///
/// Actions that change the listing (replacing it, reordering pages) go
/// through methods on the engine. Read-only access uses `store()` and
/// `config()` directly. The forest is never cached: every `render` builds
/// it again from the current listing.
pub struct NavigationEngine {
    config: NavigationConfig,
    resolver: Box<dyn PathResolver>,
    store: PageStore,
}

impl NavigationEngine {
    pub fn new(config: NavigationConfig) -> Self {
        let resolver = Box::new(PagesResolver::from_config(&config.hierarchy));
        Self::with_resolver(config, resolver)
    }

    pub fn with_resolver(config: NavigationConfig, resolver: Box<dyn PathResolver>) -> Self {
        Self {
            config,
            resolver,
            store: PageStore::new(),
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn resolver(&self) -> &dyn PathResolver {
        &*self.resolver
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn replace_store(&mut self, store: PageStore) {
        self.store = store;
    }

    /// Replace the listing from its JSON form and return ingestion diagnostics
    pub fn load_listing(&mut self, listing: serde_json::Value) -> Result<Vec<NavError>> {
        let ingested = PageStore::from_json(listing)?;
        if self.config.logging.report_diagnostics {
            for diagnostic in &ingested.diagnostics {
                warn!("{}", diagnostic);
            }
        }
        debug!("loaded {} pages", ingested.store.len());
        self.store = ingested.store;
        Ok(ingested.diagnostics)
    }

    pub fn render(&self) -> BuildReport {
        ForestBuilder::from_config(&*self.resolver, &self.config).build(&self.store)
    }

    pub fn plan_reorder(
        &self,
        moved: &str,
        reference: &str,
        placement: Placement,
    ) -> Result<ReorderPlan> {
        plan_reorder(
            &self.store,
            &*self.resolver,
            moved,
            reference,
            placement,
            self.config.reorder.position_step,
        )
    }

    /// Plan a drop and write it into the listing
    pub fn reorder(
        &mut self,
        moved: &str,
        reference: &str,
        placement: Placement,
    ) -> Result<ReorderPlan> {
        let plan = self.plan_reorder(moved, reference, placement)?;
        plan.apply(&mut self.store)?;
        debug!(
            "reordered '{}' {:?} '{}': {} batch operations",
            moved,
            placement,
            reference,
            plan.batch_operations().len()
        );
        Ok(plan)
    }
}
