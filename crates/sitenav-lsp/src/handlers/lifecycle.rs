use crate::config::WidgetSettings;
use crate::state::{GlobalState, WidgetContext};
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;

/// Handle "initialize" request
/// `initializationOptions` carries the widget settings
pub async fn handle_initialize(
    state: &GlobalState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    let settings = match params.initialization_options {
        Some(options) => serde_json::from_value::<WidgetSettings>(options)
            .map_err(|e| Error::invalid_params(format!("Invalid widget settings: {}", e)))?,
        None => WidgetSettings::default(),
    };

    log::set_max_level(settings.log_level.to_filter());
    state
        .presenter
        .log(
            MessageType::INFO,
            format!(
                "Initializing navigation widget (start depth {}, edit mode {})",
                settings.navigation.hierarchy.start_depth, settings.edit_mode
            ),
        )
        .await;

    let mut widget = state.widget.write().await;
    *widget = Some(WidgetContext::new(settings));

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![
                    "sitenav/renderNavigation".to_string(),
                    "sitenav/selectNode".to_string(),
                    "sitenav/movePage".to_string(),
                    "sitenav/toggleNode".to_string(),
                ],
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "sitenav".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handle "shutdown" request: drop the widget context
pub async fn handle_shutdown(state: &GlobalState) -> Result<()> {
    let mut widget = state.widget.write().await;
    *widget = None;
    Ok(())
}
