use crate::conversion::{forest_to_jstree, node_id};
use crate::protocol::{RenderNavigationParams, RenderNavigationResult};
use crate::state::GlobalState;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::MessageType;

use super::not_initialized;

/// Handle "sitenav/renderNavigation" request
/// Replaces the listing and returns the rebuilt tree
pub async fn handle_render_navigation(
    state: &GlobalState,
    params: RenderNavigationParams,
) -> Result<RenderNavigationResult> {
    let mut widget_lock = state.widget.write().await;
    let widget = widget_lock.as_mut().ok_or_else(not_initialized)?;

    let mut diagnostics: Vec<String> = widget
        .engine
        .load_listing(params.pages)
        .map_err(|e| Error::invalid_params(e.to_string()))?
        .iter()
        .map(ToString::to_string)
        .collect();

    let report = widget.engine.render();
    diagnostics.extend(report.diagnostics.iter().map(ToString::to_string));

    widget.selected_page = params.selected_page;
    let presentation = &widget.engine.config().presentation;
    let tree = forest_to_jstree(&report.forest, presentation, &widget.expanded);
    let initially_select = widget
        .selected_page
        .as_deref()
        .map(|page| vec![node_id(page, presentation)])
        .unwrap_or_default();
    let show_settings = widget.settings.show_settings;

    let summary = format!(
        "Rendered {} root pages ({} diagnostics)",
        tree.len(),
        diagnostics.len()
    );
    drop(widget_lock);
    state.presenter.log(MessageType::INFO, summary).await;

    Ok(RenderNavigationResult {
        tree,
        initially_select,
        show_settings,
        diagnostics,
    })
}
