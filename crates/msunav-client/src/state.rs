//! Per-interaction state: the current text selection and the last search.
//!
//! An [`Interaction`] is owned by whoever drives one user interaction cycle
//! and is passed to the handlers explicitly. The last search can be saved to
//! disk and restored while it is still fresh.

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NavigatorError, StateError};
use crate::types::SearchRecord;

/// How long a stored search may be shown again without re-running it.
pub const SEARCH_FRESHNESS_SECS: i64 = 5 * 60;

/// Outcome of the most recent search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSearch {
    pub keyword: String,
    /// `None` when the search failed.
    pub items: Option<Vec<SearchRecord>>,
    pub searched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LastSearch {
    pub fn succeeded(
        keyword: impl Into<String>,
        items: Vec<SearchRecord>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            items: Some(items),
            searched_at: at,
            error: None,
        }
    }

    pub fn failed(keyword: impl Into<String>, error: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            keyword: keyword.into(),
            items: None,
            searched_at: at,
            error: Some(error.into()),
        }
    }

    /// `true` while the search is younger than [`SEARCH_FRESHNESS_SECS`].
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.searched_at);
        age >= TimeDelta::zero() && age < TimeDelta::seconds(SEARCH_FRESHNESS_SECS)
    }
}

/// State for one user interaction cycle.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    selection: Option<String>,
    last_search: Option<LastSearch>,
}

impl Interaction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a previously stored search.
    #[must_use]
    pub fn with_last_search(last_search: Option<LastSearch>) -> Self {
        Self {
            selection: None,
            last_search,
        }
    }

    /// Records selected text. Blank text clears the selection.
    pub fn select_text(&mut self, text: &str) {
        let trimmed = text.trim();
        self.selection = (!trimmed.is_empty()).then(|| trimmed.to_owned());
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Returns the selection and clears it, as happens when a search starts.
    pub fn take_selection(&mut self) -> Option<String> {
        self.selection.take()
    }

    /// Stores the outcome of a search run at `at`.
    pub fn record_search(
        &mut self,
        keyword: &str,
        outcome: &Result<Vec<SearchRecord>, NavigatorError>,
        at: DateTime<Utc>,
    ) {
        let last = match outcome {
            Ok(items) => LastSearch::succeeded(keyword, items.clone(), at),
            Err(e) => LastSearch::failed(keyword, e.to_string(), at),
        };
        self.last_search = Some(last);
    }

    #[must_use]
    pub fn last_search(&self) -> Option<&LastSearch> {
        self.last_search.as_ref()
    }

    /// The last search, if it succeeded and is still fresh at `now`.
    #[must_use]
    pub fn restorable_search(&self, now: DateTime<Utc>) -> Option<&LastSearch> {
        self.last_search
            .as_ref()
            .filter(|s| s.items.is_some() && s.is_fresh(now))
    }
}

/// Reads a stored search from `path`. A missing file is `Ok(None)`.
///
/// # Errors
///
/// Returns [`StateError::Io`] if the file exists but cannot be read, or
/// [`StateError::Json`] if it does not hold a [`LastSearch`].
pub fn load_last_search(path: &Path) -> Result<Option<LastSearch>, StateError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StateError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StateError::Json {
            path: path.display().to_string(),
            source: e,
        })
}

/// Writes `search` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`StateError::Io`] if the directory or file cannot be written.
pub fn save_last_search(path: &Path, search: &LastSearch) -> Result<(), StateError> {
    let io_err = |source| StateError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(search).map_err(|e| StateError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    fs::write(path, json).map_err(io_err)
}
