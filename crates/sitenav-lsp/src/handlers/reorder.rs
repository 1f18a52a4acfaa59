use std::sync::Arc;

use sitenav_core::mutation::BatchSubmission;
use tokio::task::JoinHandle;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::MessageType;

use crate::conversion::{forest_to_jstree, strip_node_prefix};
use crate::presenter::Presenter;
use crate::protocol::{MovePageParams, MovePageResult, PersistOutcomeParams};
use crate::state::GlobalState;
use crate::transport::Transport;

use super::not_initialized;

/// Handle "sitenav/movePage" request
/// Persistence runs in the background; its outcome is reported separately
pub async fn handle_move_page(
    state: &GlobalState,
    params: MovePageParams,
) -> Result<MovePageResult> {
    let (result, _persist) = move_page(state, params).await?;
    Ok(result)
}

/// Apply a drop to the listing and start persisting it
///
/// Returns the handle of the persistence task alongside the response.
pub async fn move_page(
    state: &GlobalState,
    params: MovePageParams,
) -> Result<(MovePageResult, JoinHandle<()>)> {
    let mut widget_lock = state.widget.write().await;
    let widget = widget_lock.as_mut().ok_or_else(not_initialized)?;

    if !widget.settings.edit_mode {
        return Err(Error {
            code: ErrorCode::InvalidRequest,
            message: "Editing is disabled for this widget".into(),
            data: None,
        });
    }

    let presentation = widget.engine.config().presentation.clone();
    let store = widget.engine.store();
    let moved = resolve_page_key(store, &params.moved, &presentation)?;
    let reference = resolve_page_key(store, &params.reference, &presentation)?;

    let plan = widget
        .engine
        .reorder(&moved, &reference, params.placement)
        .map_err(|e| Error::invalid_params(e.to_string()))?;

    let batch = BatchSubmission::new(
        widget.settings.batch_endpoint.clone(),
        plan.batch_operations(),
    );
    let tree = forest_to_jstree(&widget.engine.render().forest, &presentation, &widget.expanded);
    drop(widget_lock);

    let persist = spawn_persist(
        state.transport.clone(),
        state.presenter.clone(),
        moved,
        batch.clone(),
    );

    Ok((MovePageResult { plan, batch, tree }, persist))
}

/// Submit the batch and report the outcome; no retry, no rollback
pub fn spawn_persist(
    transport: Arc<dyn Transport>,
    presenter: Arc<dyn Presenter>,
    moved: String,
    batch: BatchSubmission,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = match transport.submit(batch).await {
            Ok(()) => PersistOutcomeParams {
                moved,
                ok: true,
                error: None,
            },
            Err(e) => {
                log::warn!("persisting reorder of '{}' failed: {}", moved, e);
                presenter
                    .log(MessageType::WARNING, format!("Page order not saved: {}", e))
                    .await;
                PersistOutcomeParams {
                    moved,
                    ok: false,
                    error: Some(e.to_string()),
                }
            }
        };
        presenter.persist_outcome(outcome).await;
    })
}

fn resolve_page_key(
    store: &sitenav_core::PageStore,
    node_id: &str,
    presentation: &sitenav_core::config::PresentationConfig,
) -> Result<String> {
    let identifier = strip_node_prefix(node_id, presentation);
    store
        .key_by_identifier(identifier)
        .cloned()
        .ok_or_else(|| Error::invalid_params(format!("Unknown page node '{}'", node_id)))
}
