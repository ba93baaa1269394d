//! Search types shared by the matcher, the session and the UI boundary.

use serde::{Deserialize, Serialize};

/// One selectable tool in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(rename = "navigationTarget")]
    pub navigation_target: String,
    #[serde(rename = "iconRef", default)]
    pub icon_ref: String,
    #[serde(default)]
    pub category: String,
}

/// A single keystroke's worth of query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    normalized: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().to_lowercase();
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed, lower-cased text used for matching.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Length in characters after trimming.
    pub fn char_len(&self) -> usize {
        self.normalized.chars().count()
    }
}

/// Items matching a settled query, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResultSet {
    items: Vec<CatalogItem>,
}

impl SearchResultSet {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Keep only the first `limit` items.
    pub fn capped(mut self, limit: usize) -> Self {
        self.items.truncate(limit);
        self
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Visible state of a search session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SessionState {
    #[default]
    Idle,
    /// Debounce in flight for `query`.
    PendingQuery { query: String },
    ShowingResults {
        query: String,
        results: SearchResultSet,
    },
    ShowingEmpty { query: String },
}

impl SessionState {
    /// Whether the result panel should be on screen.
    pub fn is_panel_visible(&self) -> bool {
        matches!(
            self,
            SessionState::ShowingResults { .. } | SessionState::ShowingEmpty { .. }
        )
    }

    pub fn results(&self) -> Option<&SearchResultSet> {
        match self {
            SessionState::ShowingResults { results, .. } => Some(results),
            _ => None,
        }
    }
}
