use crate::error::{NavError, Result};
use crate::model::{PageKey, PathRecord};
use crate::position::SortPosition;
use std::collections::{BTreeMap, HashMap};

// In memory
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pub(crate) records: BTreeMap<PageKey, PathRecord>,
    pub(crate) path_map: HashMap<String, PageKey>,
}

/// Result of lenient listing ingestion
#[derive(Debug, Default)]
pub struct Ingested {
    pub store: PageStore,
    pub diagnostics: Vec<NavError>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a page listing object
    ///
    /// Records without a string path are skipped. Other badly typed fields
    /// are dropped on their own and reported.
    pub fn from_json(value: serde_json::Value) -> Result<Ingested> {
        let serde_json::Value::Object(entries) = value else {
            return Err(NavError::InvalidListing);
        };

        let mut ingested = Ingested::default();
        for (key, raw) in entries {
            if !raw.is_object() {
                // Listings also carry scalar metadata next to the pages
                continue;
            }
            if let Some(path) = raw.get("jcr:path") {
                if !path.is_string() {
                    ingested.diagnostics.push(NavError::MalformedRecord {
                        key,
                        reason: "jcr:path is not a string".to_string(),
                    });
                    continue;
                }
            }
            let record = record_from_fields(&key, &raw, &mut ingested.diagnostics);
            if record.hierarchical_path().is_none() {
                ingested.diagnostics.push(NavError::MalformedRecord {
                    key: key.clone(),
                    reason: "missing jcr:path".to_string(),
                });
            }
            ingested.store.upsert(key, record);
        }
        Ok(ingested)
    }

    pub fn from_json_str(content: &str) -> Result<Ingested> {
        Self::from_json(serde_json::from_str(content)?)
    }

    pub fn upsert(&mut self, key: impl Into<PageKey>, record: PathRecord) {
        let key = key.into();
        let new_path = record.hierarchical_path().map(str::to_string);
        let old = self.records.insert(key.clone(), record);

        if let Some(old_path) = old.as_ref().and_then(PathRecord::hierarchical_path) {
            if new_path.as_deref() != Some(old_path) {
                self.release_path(old_path, &key);
            }
        }
        if let Some(path) = new_path {
            self.claim_path(path, key);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<PathRecord> {
        let record = self.records.remove(key)?;
        if let Some(path) = record.hierarchical_path() {
            self.release_path(path, key);
        }
        Some(record)
    }

    /// `key` now carries `path`; the greatest key carrying a path owns it
    fn claim_path(&mut self, path: String, key: PageKey) {
        match self.path_map.get(&path) {
            Some(owner) if *owner > key => {}
            _ => {
                self.path_map.insert(path, key);
            }
        }
    }

    /// `key` no longer carries `path`
    fn release_path(&mut self, path: &str, key: &str) {
        if self.path_map.get(path).map(String::as_str) != Some(key) {
            return;
        }
        let owner = self
            .records
            .iter()
            .rev()
            .find(|(_, r)| r.hierarchical_path() == Some(path))
            .map(|(k, _)| k.clone());
        match owner {
            Some(owner) => {
                self.path_map.insert(path.to_string(), owner);
            }
            None => {
                self.path_map.remove(path);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&PathRecord> {
        self.records.get(key)
    }

    pub fn key_by_path(&self, path: &str) -> Option<&PageKey> {
        self.path_map.get(path)
    }

    pub fn record_by_path(&self, path: &str) -> Option<&PathRecord> {
        self.key_by_path(path).and_then(|key| self.records.get(key))
    }

    /// Key of the page whose identifier matches, falling back to the listing key
    pub fn key_by_identifier(&self, identifier: &str) -> Option<&PageKey> {
        self.records
            .iter()
            .find(|(_, r)| r.identifier.as_deref() == Some(identifier))
            .map(|(k, _)| k)
            .or_else(|| self.records.get_key_value(identifier).map(|(k, _)| k))
    }

    pub fn set_position(&mut self, key: &str, position: f64) -> Result<()> {
        let record = self
            .records
            .get_mut(key)
            .ok_or_else(|| NavError::UnknownPage(key.to_string()))?;
        record.position = Some(SortPosition::Number(position));
        Ok(())
    }

    pub fn set_path(&mut self, key: &str, path: String) -> Result<()> {
        let mut record = self
            .records
            .get(key)
            .cloned()
            .ok_or_else(|| NavError::UnknownPage(key.to_string()))?;
        record.path = Some(path);
        self.upsert(key.to_string(), record);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PageKey, &PathRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read one record field by field; a field of the wrong type is dropped
/// with a diagnostic and the rest of the record is kept
fn record_from_fields(
    key: &str,
    raw: &serde_json::Value,
    diagnostics: &mut Vec<NavError>,
) -> PathRecord {
    let mut malformed = |field: &str, reason: String| {
        diagnostics.push(NavError::MalformedRecord {
            key: key.to_string(),
            reason: format!("{}: {}", field, reason),
        });
    };

    let mut text = |field: &str| match raw.get(field) {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(_) => {
            malformed(field, "not a string".to_string());
            None
        }
    };
    let path = text("jcr:path");
    let title = text("pageTitle");
    let identifier = text("pageURLName");

    let position = match raw.get("pagePosition") {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => match serde_json::from_value::<SortPosition>(value.clone()) {
            Ok(position) => Some(position),
            Err(e) => {
                malformed("pagePosition", e.to_string());
                None
            }
        },
    };

    PathRecord {
        path,
        title,
        identifier,
        position,
    }
}

impl FromIterator<(PageKey, PathRecord)> for PageStore {
    fn from_iter<T: IntoIterator<Item = (PageKey, PathRecord)>>(iter: T) -> Self {
        let mut store = PageStore::new();
        for (key, record) in iter {
            store.upsert(key, record);
        }
        store
    }
}
