use crate::error::Result;
use crate::model::PageKey;
use crate::store::PageStore;
use serde::{Deserialize, Serialize};

/// Where a dragged page lands relative to the reference page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Before,
    After,
    Inside,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub key: PageKey,
    /// Page path, the target of the persisted update
    pub path: String,
    pub old: Option<f64>,
    pub new: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReorderPlan {
    /// Sibling reorder: new positions for the moved page and any shifted siblings
    Reposition {
        moved: PageKey,
        updates: Vec<PositionUpdate>,
    },
    /// The page leaves its parent and is re-homed under `to`
    Move {
        key: PageKey,
        from: String,
        to: String,
    },
}

impl ReorderPlan {
    /// Write the plan into the local listing
    pub fn apply(&self, store: &mut PageStore) -> Result<()> {
        match self {
            ReorderPlan::Reposition { updates, .. } => {
                for update in updates {
                    store.set_position(&update.key, update.new)?;
                }
            }
            ReorderPlan::Move { key, from, to } => {
                let nested = format!("{}/", from);
                let descendants: Vec<(PageKey, String)> = store
                    .iter()
                    .filter_map(|(k, r)| {
                        let path = r.hierarchical_path()?;
                        path.strip_prefix(&nested)
                            .map(|rest| (k.clone(), format!("{}/{}", to, rest)))
                    })
                    .collect();
                store.set_path(key, to.clone())?;
                for (k, path) in descendants {
                    store.set_path(&k, path)?;
                }
            }
        }
        Ok(())
    }

    /// Operations for one batched persistence request
    pub fn batch_operations(&self) -> Vec<BatchOperation> {
        match self {
            ReorderPlan::Reposition { updates, .. } => updates
                .iter()
                .map(|u| BatchOperation::post(&u.path).with("pagePosition", u.new))
                .collect(),
            ReorderPlan::Move { from, to, .. } => vec![BatchOperation::post(from)
                .with(":operation", "move")
                .with(":dest", to.as_str())],
        }
    }
}

/// One request inside a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOperation {
    pub url: String,
    pub method: String,
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

impl BatchOperation {
    pub fn post(url: &str) -> Self {
        Self {
            url: url.to_string(),
            method: "POST".to_string(),
            parameters: serde_json::Map::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }
}

/// A whole batch, sent as a single form POST with replace semantics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSubmission {
    pub endpoint: String,
    pub requests: Vec<BatchOperation>,
    pub replace: bool,
    pub replace_properties: bool,
}

impl BatchSubmission {
    pub fn new(endpoint: impl Into<String>, requests: Vec<BatchOperation>) -> Self {
        Self {
            endpoint: endpoint.into(),
            requests,
            replace: true,
            replace_properties: true,
        }
    }

    /// `application/x-www-form-urlencoded` body for the batch endpoint
    pub fn to_form_body(&self) -> Result<String> {
        let requests = serde_json::to_string(&self.requests)?;
        Ok(url::form_urlencoded::Serializer::new(String::new())
            .append_pair("requests", &requests)
            .append_pair(":replace", bool_str(self.replace))
            .append_pair(":replaceProperties", bool_str(self.replace_properties))
            .finish())
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
