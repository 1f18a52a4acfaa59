use serde::{Deserialize, Serialize};
use sitenav_core::mutation::{BatchSubmission, Placement, ReorderPlan};
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::request::Request;

use crate::conversion::JsTreeNode;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNavigationParams {
    /// Page to select initially, by URL name
    pub selected_page: Option<String>,
    /// Raw page listing keyed by page
    pub pages: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNavigationResult {
    pub tree: Vec<JsTreeNode>,
    pub initially_select: Vec<String>,
    /// Whether the host should open its settings view
    pub show_settings: bool,
    /// Human-readable ingestion and build diagnostics
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectNodeParams {
    /// Node id as rendered, e.g. "nav_about" or "#nav_about"
    pub node_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectNodeResult {
    pub page: String,
    /// Whether a navigation notification was sent
    pub navigated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePageParams {
    /// Node id of the dragged page
    pub moved: String,
    /// Node id of the page it was dropped on or beside
    pub reference: String,
    pub placement: Placement,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePageResult {
    pub plan: ReorderPlan,
    /// The batch handed to the transport
    pub batch: BatchSubmission,
    pub tree: Vec<JsTreeNode>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleNodeParams {
    pub node_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleNodeResult {
    pub node_id: String,
    pub expanded: bool,
}

/// Server -> client: load another page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigateParams {
    pub page: String,
}

pub enum Navigate {}

impl Notification for Navigate {
    type Params = NavigateParams;
    const METHOD: &'static str = "sitenav/navigate";
}

/// Server -> client: result of persisting a reorder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistOutcomeParams {
    pub moved: String,
    pub ok: bool,
    pub error: Option<String>,
}

pub enum PersistOutcome {}

impl Notification for PersistOutcome {
    type Params = PersistOutcomeParams;
    const METHOD: &'static str = "sitenav/persistOutcome";
}

/// Server -> client: POST this batch to the content repository
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBatchParams {
    pub endpoint: String,
    /// Form-urlencoded request body
    pub body: String,
    pub submission: BatchSubmission,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitBatchResult {
    /// HTTP status reported by the host
    pub status: u16,
}

pub enum SubmitBatch {}

impl Request for SubmitBatch {
    type Params = SubmitBatchParams;
    type Result = SubmitBatchResult;
    const METHOD: &'static str = "sitenav/submitBatch";
}
