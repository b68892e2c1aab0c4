//! Admin dashboard counters.

use serde::{Deserialize, Serialize};

/// Snapshot of the article store for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total: usize,
    /// Number of distinct categories in use
    pub categories: usize,
    /// Articles still showing a placeholder image
    pub pending_images: usize,
    pub revision_id: i64,
}
