//! Mock feed for testing without API access.
//!
//! Serves canned XML documents, either registered in memory or loaded from a
//! directory of files named after [`FeedRequest::file_stem`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use super::error::FeedError;
use super::request::{FeedRequest, FeedSource};

/// Mock feed that serves canned XML documents.
#[derive(Debug, Default)]
pub struct MockFeed {
    /// Documents keyed by request file stem.
    documents: HashMap<String, String>,
    /// Every request served, in order.
    requests: Mutex<Vec<FeedRequest>>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the document returned for `request`.
    pub fn with_document(mut self, request: FeedRequest, xml: impl Into<String>) -> Self {
        self.documents.insert(request.file_stem(), xml.into());
        self
    }

    /// Load every `.xml` file in `data_dir`.
    ///
    /// Expects files named `{file_stem}.xml`, e.g. `stopsbyroute_Orange.xml`.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let data_dir = data_dir.as_ref();
        let mut documents = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| FeedError::ApiError {
            status: 0,
            message: format!("Failed to read mock feed directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| FeedError::ApiError {
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("xml") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| FeedError::ApiError {
                    status: 0,
                    message: format!("Invalid filename: {:?}", path),
                })?
                .to_string();

            let xml = std::fs::read_to_string(&path).map_err(|e| FeedError::ApiError {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            documents.insert(stem, xml);
        }

        if documents.is_empty() {
            return Err(FeedError::ApiError {
                status: 0,
                message: format!("No mock feed files found in {:?}", data_dir),
            });
        }

        Ok(Self {
            documents,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests served so far, in order.
    pub fn requests(&self) -> Vec<FeedRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl FeedSource for MockFeed {
    async fn fetch(&self, request: &FeedRequest) -> Result<String, FeedError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }

        let stem = request.file_stem();
        self.documents
            .get(&stem)
            .cloned()
            .ok_or_else(|| FeedError::ApiError {
                status: 404,
                message: format!("No mock document for {}", stem),
            })
    }
}
