use std::collections::HashSet;
use std::sync::Arc;

use sitenav_core::NavigationEngine;
use tokio::sync::RwLock;

use crate::config::WidgetSettings;
use crate::presenter::Presenter;
use crate::transport::Transport;

/// Everything one navigation widget instance knows
pub struct WidgetContext {
    pub engine: NavigationEngine,
    pub settings: WidgetSettings,
    /// URL name of the page currently loaded
    pub selected_page: Option<String>,
    /// Page identifiers whose children are shown
    pub expanded: HashSet<String>,
}

impl WidgetContext {
    pub fn new(settings: WidgetSettings) -> Self {
        Self {
            engine: NavigationEngine::new(settings.navigation.clone()),
            settings,
            selected_page: None,
            expanded: HashSet::new(),
        }
    }
}

/// Global state for the server
/// Must be Send + Sync
#[derive(Clone)]
pub struct GlobalState {
    /// RwLock-protected widget context, None until initialize
    pub widget: Arc<RwLock<Option<WidgetContext>>>,
    pub presenter: Arc<dyn Presenter>,
    pub transport: Arc<dyn Transport>,
}

impl GlobalState {
    pub fn new(presenter: Arc<dyn Presenter>, transport: Arc<dyn Transport>) -> Self {
        Self {
            widget: Arc::new(RwLock::new(None)),
            presenter,
            transport,
        }
    }
}
