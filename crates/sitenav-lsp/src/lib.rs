//! Sitenav LSP Library
//!
//! JSON-RPC layer over stdio, converts host requests to Core library calls.
//! The host renders the tree, keeps the page history and performs the
//! batched HTTP update; this crate owns everything in between.

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LspService};

use crate::presenter::{ClientPresenter, Presenter};
use crate::protocol::*;
use crate::state::GlobalState;
use crate::transport::{ClientTransport, Transport};

pub mod config;
pub mod conversion;
pub mod handlers;
pub mod presenter;
pub mod protocol;
pub mod state;
pub mod transport;


/// Server backend implementation
pub struct Backend {
    client: Client,
    state: GlobalState,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        let presenter = Arc::new(ClientPresenter::new(client.clone()));
        let transport = Arc::new(ClientTransport::new(client.clone()));
        Self::with_collaborators(client, presenter, transport)
    }

    pub fn with_collaborators(
        client: Client,
        presenter: Arc<dyn Presenter>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            client,
            state: GlobalState::new(presenter, transport),
        }
    }

    async fn render_navigation(
        &self,
        params: RenderNavigationParams,
    ) -> Result<RenderNavigationResult> {
        handlers::handle_render_navigation(&self.state, params).await
    }

    async fn select_node(&self, params: SelectNodeParams) -> Result<SelectNodeResult> {
        handlers::handle_select_node(&self.state, params).await
    }

    async fn move_page(&self, params: MovePageParams) -> Result<MovePageResult> {
        handlers::handle_move_page(&self.state, params).await
    }

    async fn toggle_node(&self, params: ToggleNodeParams) -> Result<ToggleNodeResult> {
        handlers::handle_toggle_node(&self.state, params).await
    }
}

#[tower_lsp::async_trait]
impl tower_lsp::LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Navigation widget ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        log::info!("shutdown requested");
        handlers::handle_shutdown(&self.state).await
    }
}

/// Create and return the service and client socket
pub fn create_lsp_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::build(Backend::new)
        .custom_method("sitenav/renderNavigation", Backend::render_navigation)
        .custom_method("sitenav/selectNode", Backend::select_node)
        .custom_method("sitenav/movePage", Backend::move_page)
        .custom_method("sitenav/toggleNode", Backend::toggle_node)
        .finish()
}
