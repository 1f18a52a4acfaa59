use crate::conversion::strip_node_prefix;
use crate::protocol::{SelectNodeParams, SelectNodeResult};
use crate::state::GlobalState;
use tower_lsp::jsonrpc::{Error, Result};

use super::not_initialized;

/// Handle "sitenav/selectNode" request
/// Navigates only when the node is not the page already loaded
pub async fn handle_select_node(
    state: &GlobalState,
    params: SelectNodeParams,
) -> Result<SelectNodeResult> {
    let page = {
        let mut widget_lock = state.widget.write().await;
        let widget = widget_lock.as_mut().ok_or_else(not_initialized)?;

        let page = strip_node_prefix(&params.node_id, &widget.engine.config().presentation);
        if page.is_empty() {
            return Err(Error::invalid_params("Node has no page"));
        }
        if widget.selected_page.as_deref() == Some(page) {
            return Ok(SelectNodeResult {
                page: page.to_string(),
                navigated: false,
            });
        }

        let page = page.to_string();
        widget.selected_page = Some(page.clone());
        page
    };

    log::debug!("navigating to page '{}'", page);
    state.presenter.navigate(&page).await;

    Ok(SelectNodeResult {
        page,
        navigated: true,
    })
}
