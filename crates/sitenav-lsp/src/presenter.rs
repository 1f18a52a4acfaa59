use tower_lsp::lsp_types::MessageType;
use tower_lsp::Client;

use crate::protocol::{Navigate, NavigateParams, PersistOutcome, PersistOutcomeParams};

/// The host that renders the navigation and owns the page history
#[tower_lsp::async_trait]
pub trait Presenter: Send + Sync {
    /// Push a history entry and load `page`
    async fn navigate(&self, page: &str);

    async fn persist_outcome(&self, outcome: PersistOutcomeParams);

    async fn log(&self, level: MessageType, message: String);
}

pub struct ClientPresenter {
    client: Client,
}

impl ClientPresenter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[tower_lsp::async_trait]
impl Presenter for ClientPresenter {
    async fn navigate(&self, page: &str) {
        self.client
            .send_notification::<Navigate>(NavigateParams {
                page: page.to_string(),
            })
            .await;
    }

    async fn persist_outcome(&self, outcome: PersistOutcomeParams) {
        if let Some(error) = &outcome.error {
            self.client
                .show_message(
                    MessageType::ERROR,
                    format!("Could not save page order: {}", error),
                )
                .await;
        }
        self.client
            .send_notification::<PersistOutcome>(outcome)
            .await;
    }

    async fn log(&self, level: MessageType, message: String) {
        self.client.log_message(level, message).await;
    }
}
