//! Admin session and image-acquisition payloads.

use serde::{Deserialize, Serialize};

/// Login prompt submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRequest {
    pub passphrase: String,
}

/// Outcome of a successful login check.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// Image URL produced from an upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub image_url: String,
    /// Size of the uploaded body in bytes
    pub size: usize,
}

/// Query for the external image-search link.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageSearchQuery {
    #[serde(default)]
    pub q: String,
}

/// External image-search page to open in a new tab.
#[derive(Debug, Clone, Serialize)]
pub struct ImageSearchLink {
    pub url: String,
}
