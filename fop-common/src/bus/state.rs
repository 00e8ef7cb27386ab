//! View state shared between fragments

use serde::{Deserialize, Serialize};

/// Filter value meaning "no filtering"
pub const FILTER_ALL: &str = "All";

/// Ownership scope of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Every record
    #[default]
    All,
    /// Only records owned by the current user
    Mine,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::All => write!(f, "all"),
            ViewMode::Mine => write!(f, "mine"),
        }
    }
}

/// Fully resolved view state (slot contents merged over defaults)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub query: String,
    pub status_filter: String,
    pub view_mode: ViewMode,
    pub secondary_filter: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            status_filter: FILTER_ALL.to_string(),
            view_mode: ViewMode::All,
            secondary_filter: FILTER_ALL.to_string(),
        }
    }
}

impl ViewState {
    /// Overlay the keys present in `patch`
    pub fn with(mut self, patch: &ViewStatePatch) -> Self {
        if let Some(query) = &patch.query {
            self.query = query.clone();
        }
        if let Some(status) = &patch.status_filter {
            self.status_filter = status.clone();
        }
        if let Some(mode) = patch.view_mode {
            self.view_mode = mode;
        }
        if let Some(secondary) = &patch.secondary_filter {
            self.secondary_filter = secondary.clone();
        }
        self
    }
}

impl From<ViewStatePatch> for ViewState {
    fn from(patch: ViewStatePatch) -> Self {
        ViewState::default().with(&patch)
    }
}

/// True if a filter value means "no filtering" (blank or "All")
pub fn is_filter_all(filter: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || filter.eq_ignore_ascii_case(FILTER_ALL)
}

/// Partial view state as written by one control
///
/// Absent keys leave the slot untouched. Serialized with camelCase keys and
/// absent keys skipped, so `{"query":"x"}` is a valid patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewStatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_filter: Option<String>,
}

impl ViewStatePatch {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status_filter: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn view_mode(mode: ViewMode) -> Self {
        Self {
            view_mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn secondary(secondary: impl Into<String>) -> Self {
        Self {
            secondary_filter: Some(secondary.into()),
            ..Self::default()
        }
    }

    /// Shallow merge, last write wins per key
    pub fn merge(&mut self, newer: &ViewStatePatch) {
        if newer.query.is_some() {
            self.query = newer.query.clone();
        }
        if newer.status_filter.is_some() {
            self.status_filter = newer.status_filter.clone();
        }
        if newer.view_mode.is_some() {
            self.view_mode = newer.view_mode;
        }
        if newer.secondary_filter.is_some() {
            self.secondary_filter = newer.secondary_filter.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.status_filter.is_none()
            && self.view_mode.is_none()
            && self.secondary_filter.is_none()
    }
}
