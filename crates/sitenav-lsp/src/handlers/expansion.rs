use crate::conversion::strip_node_prefix;
use crate::protocol::{ToggleNodeParams, ToggleNodeResult};
use crate::state::GlobalState;
use tower_lsp::jsonrpc::Result;

use super::not_initialized;

/// Handle "sitenav/toggleNode" request
/// Flips whether a node's children are shown
pub async fn handle_toggle_node(
    state: &GlobalState,
    params: ToggleNodeParams,
) -> Result<ToggleNodeResult> {
    let mut widget_lock = state.widget.write().await;
    let widget = widget_lock.as_mut().ok_or_else(not_initialized)?;

    let page = strip_node_prefix(&params.node_id, &widget.engine.config().presentation).to_string();
    let expanded = if widget.expanded.remove(&page) {
        false
    } else {
        widget.expanded.insert(page);
        true
    };

    Ok(ToggleNodeResult {
        node_id: params.node_id,
        expanded,
    })
}
