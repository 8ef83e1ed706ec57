//! # Artwork Metadata
//!
//! The catalog of descriptive records shown on information cards, loaded
//! once at startup from a JSON document keyed by artwork identifier:
//!
//! ```json
//! {
//!     "starry-night": {
//!         "title": "The Starry Night",
//!         "artist": "Vincent van Gogh",
//!         "year": "1889",
//!         "description": "A swirling night sky over a quiet village."
//!     }
//! }
//! ```
//!
//! The fetch is the system's only asynchronous boundary: the catalog starts
//! `Pending`, and the host delivers the fetch outcome exactly once through
//! [`ArtworkCatalog::resolve`]. Consumers check [`ArtworkCatalog::is_ready`]
//! before lookup; a missing key is a miss, not an error.

use std::collections::HashMap;
use std::path::Path;

use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Descriptive fields for one artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub title: String,
    pub artist: String,
    pub year: String,
    pub description: String,
}

/// Errors raised while loading the catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read artwork catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed artwork catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    /// Fetch not finished; lookups are refused
    Pending,
    Ready,
    /// Fetch rejected; permanent for the process lifetime
    Failed,
}

/// The artwork metadata catalog.
///
/// Immutable once loaded. A catalog that failed to load stays failed; the
/// components treat both `Pending` and `Failed` as "not ready" and degrade
/// to a logged no-op.
#[derive(Debug)]
pub struct ArtworkCatalog {
    records: HashMap<String, ArtworkRecord>,
    state: LoadState,
}

impl ArtworkCatalog {
    /// Creates a catalog awaiting its one-time fetch.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            state: LoadState::Pending,
        }
    }

    /// Parses a catalog directly from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: HashMap<String, ArtworkRecord> = serde_json::from_str(json)?;
        info!("artwork catalog loaded ({} records)", records.len());
        Ok(Self {
            records,
            state: LoadState::Ready,
        })
    }

    /// Reads and parses a catalog document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Delivers the outcome of the host's one-time fetch.
    ///
    /// `Ok` makes the catalog ready; `Err` is logged and leaves it failed
    /// for the rest of the process lifetime. Calls after the first outcome
    /// are ignored.
    pub fn resolve(&mut self, outcome: Result<HashMap<String, ArtworkRecord>, CatalogError>) {
        if self.state != LoadState::Pending {
            return;
        }
        match outcome {
            Ok(records) => {
                info!("artwork catalog loaded ({} records)", records.len());
                self.records = records;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                error!("error loading artwork catalog: {err}");
                self.state = LoadState::Failed;
            }
        }
    }

    /// Whether the fetch completed successfully.
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Looks up a record. Only meaningful once [`is_ready`](Self::is_ready)
    /// reports true.
    pub fn get(&self, artwork_id: &str) -> Option<&ArtworkRecord> {
        self.records.get(artwork_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ArtworkCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "starry-night": {
            "title": "The Starry Night",
            "artist": "Vincent van Gogh",
            "year": "1889",
            "description": "A swirling night sky over a quiet village."
        }
    }"#;

    #[test]
    fn test_from_json() {
        let catalog = ArtworkCatalog::from_json(DOC).unwrap();
        assert!(catalog.is_ready());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("starry-night").unwrap().year, "1889");
        assert!(catalog.get("unknown").is_none());
    }

    #[test]
    fn test_malformed_document() {
        let err = ArtworkCatalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_pending_until_resolved() {
        let mut catalog = ArtworkCatalog::new();
        assert!(!catalog.is_ready());

        let records = serde_json::from_str(DOC).unwrap();
        catalog.resolve(Ok(records));
        assert!(catalog.is_ready());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_failed_fetch_is_permanent() {
        let mut catalog = ArtworkCatalog::new();
        let parse_err = serde_json::from_str::<HashMap<String, ArtworkRecord>>("nope")
            .map_err(CatalogError::from)
            .unwrap_err();
        catalog.resolve(Err(parse_err));
        assert!(!catalog.is_ready());

        // A later outcome must not resurrect a failed catalog
        let records = serde_json::from_str(DOC).unwrap();
        catalog.resolve(Ok(records));
        assert!(!catalog.is_ready());
        assert!(catalog.is_empty());
    }
}
