//! UI state persistence.
//!
//! Stores the category selection and the per-item interaction statuses
//! between runs. Counters are not stored: they come from the catalog and
//! persisted statuses are replayed onto them after loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::catalog::{CatalogError, CatalogSession, Category, InteractionStatus, ItemId, Result};

const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedUiState {
    pub version: u32,
    #[serde(default)]
    pub selected_categories: Vec<Category>,
    #[serde(default)]
    pub interactions: BTreeMap<ItemId, InteractionStatus>,
}

impl Default for PersistedUiState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            selected_categories: Vec::new(),
            interactions: BTreeMap::new(),
        }
    }
}

impl PersistedUiState {
    pub fn capture(session: &CatalogSession) -> Self {
        Self {
            version: STATE_VERSION,
            selected_categories: session.selection().selected().iter().cloned().collect(),
            interactions: session.ledger().iter().collect(),
        }
    }

    /// Apply onto a session whose catalog has already been loaded.
    /// Categories and items that no longer exist are skipped.
    pub fn restore_into(&self, session: &mut CatalogSession) {
        if self.version != STATE_VERSION {
            tracing::warn!(
                found = self.version,
                expected = STATE_VERSION,
                "Ignoring UI state with unknown version"
            );
            return;
        }
        session.restore_selection(&self.selected_categories);
        for (&id, &status) in &self.interactions {
            session.restore_interaction(id, status);
        }
        tracing::debug!(
            categories = self.selected_categories.len(),
            interactions = self.interactions.len(),
            "Restored UI state"
        );
    }
}

/// JSON file store for [`PersistedUiState`].
#[derive(Debug, Clone)]
pub struct UiStateStore {
    path: PathBuf,
}

impl UiStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored state. A missing file is `Ok(None)`.
    pub async fn load(&self) -> Result<Option<PersistedUiState>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CatalogError::io(&self.path, e)),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write the state, replacing the previous file atomically.
    pub async fn save(&self, state: &PersistedUiState) -> Result<()> {
        let content = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CatalogError::io(parent, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| CatalogError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| CatalogError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), "Saved UI state");
        Ok(())
    }
}
