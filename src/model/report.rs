use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{ApiEndpoint, ProjectType};

/// Outcome of scanning a single workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootReport {
    pub path: PathBuf,
    pub project_type: ProjectType,
    pub endpoint_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One generation of the endpoint collection.
///
/// A report is built completely before it is published and is never
/// modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub scan_time: DateTime<Utc>,
    pub roots: Vec<RootReport>,
    pub endpoints: Vec<ApiEndpoint>,
}

impl ScanReport {
    pub fn new(roots: Vec<RootReport>, endpoints: Vec<ApiEndpoint>) -> Self {
        Self {
            scan_time: Utc::now(),
            roots,
            endpoints,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Endpoints matching `query` in collection order.
    pub fn search(&self, query: &str) -> Vec<ApiEndpoint> {
        let needle = query.to_lowercase();
        self.endpoints
            .iter()
            .filter(|e| e.matches(&needle))
            .cloned()
            .collect()
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::empty()
    }
}
