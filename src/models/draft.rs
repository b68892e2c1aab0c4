//! Records produced by the content-generation gateway.

use serde::{Deserialize, Serialize};

use super::Category;

/// A validated article-shaped record with no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDraft {
    pub title: String,
    pub summary: String,
    pub category: Category,
    pub source: Option<String>,
    /// English prompt for the image generator
    pub image_prompt: String,
}

/// A citation attached to a grounded search answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSource {
    pub title: String,
    pub uri: String,
}

/// Grounded free-text search answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSummary {
    pub text: String,
    pub sources: Vec<SearchSource>,
}

/// Structured review suggested from admin notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewDraft {
    pub title: String,
    pub summary: String,
    /// 0-10, one decimal
    pub rating: f64,
}

/// Where generated articles take their image from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// Image-generation endpoint built from the draft's prompt
    #[default]
    Ai,
    /// Placeholder; the admin supplies an image later
    Manual,
}

/// Request body for generating a news batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNewsRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub image_mode: ImageMode,
}

/// Request body for a grounded search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchLatestRequest {
    pub query: String,
}

/// Request body for a social feed import.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportFeedRequest {
    /// Feed handle, with or without a leading `@`
    #[serde(default)]
    pub handle: Option<String>,
}

/// Request body for review assistance.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewAssistRequest {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
}
