//! Admin-side article authoring: manual entry, the inline edit buffer and image acquisition.
//!
//! Everything here validates before the store is touched; a rejected form leaves
//! the collection exactly as it was.

use crate::errors::AppError;
use crate::gateway::{data_uri, DEFAULT_ARTICLE_IMAGE};
use crate::models::{
    display_date, new_article_id, round_tenths, Article, Category, CreateArticleRequest,
    UpdateArticleRequest,
};

/// MIME type assumed for uploads sent without a Content-Type.
pub const FALLBACK_UPLOAD_MIME: &str = "application/octet-stream";

/// Highest rating a review can carry.
pub const MAX_RATING: f64 = 10.0;

/// A manually written article as submitted by the add form.
#[derive(Debug, Clone)]
pub struct ManualEntry {
    request: CreateArticleRequest,
}

impl From<CreateArticleRequest> for ManualEntry {
    fn from(request: CreateArticleRequest) -> Self {
        Self { request }
    }
}

impl ManualEntry {
    /// Validate the form and build the article to insert.
    pub fn into_article(self, source_label: &str, date_format: &str) -> Result<Article, AppError> {
        let request = self.request;
        let title = require_text("Title", &request.title)?;
        let summary = require_text("Summary", &request.summary)?;

        let rating = match request.category {
            Category::Reviews => request.rating.as_deref().and_then(parse_rating),
            _ => None,
        };

        let image_url = request
            .image_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_ARTICLE_IMAGE.to_string());

        Ok(Article {
            id: new_article_id(),
            title,
            summary,
            category: request.category,
            source: source_label.to_string(),
            image_url,
            date: display_date(date_format),
            url: None,
            rating,
            needs_image: false,
        })
    }
}

/// Parse a free-text rating. Non-numeric input means "no rating".
fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .map(|r| round_tenths(r.clamp(0.0, MAX_RATING)))
}

fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Working copy of one article while it is being edited inline.
///
/// Saving yields the partial update to merge over the stored record. Cancelling
/// is dropping the buffer; over HTTP it means the PUT is never sent.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    id: String,
    fields: UpdateArticleRequest,
}

impl EditBuffer {
    /// Start editing from the stored article.
    pub fn load(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            fields: UpdateArticleRequest {
                title: Some(article.title.clone()),
                summary: Some(article.summary.clone()),
                category: Some(article.category),
                source: Some(article.source.clone()),
                image_url: Some(article.image_url.clone()),
                url: article.url.clone(),
                rating: article.rating,
            },
        }
    }

    /// Overlay the fields a client submitted onto the buffer.
    pub fn apply(&mut self, changes: UpdateArticleRequest) {
        let fields = &mut self.fields;
        if changes.title.is_some() {
            fields.title = changes.title;
        }
        if changes.summary.is_some() {
            fields.summary = changes.summary;
        }
        if changes.category.is_some() {
            fields.category = changes.category;
        }
        if changes.source.is_some() {
            fields.source = changes.source;
        }
        if changes.image_url.is_some() {
            fields.image_url = changes.image_url;
        }
        if changes.url.is_some() {
            fields.url = changes.url;
        }
        if changes.rating.is_some() {
            fields.rating = changes.rating;
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Validate the buffer and hand back the changes to merge.
    pub fn save(self) -> Result<(String, UpdateArticleRequest), AppError> {
        let mut fields = self.fields;

        if let Some(title) = &fields.title {
            fields.title = Some(require_text("Title", title)?);
        }
        if let Some(summary) = &fields.summary {
            fields.summary = Some(require_text("Summary", summary)?);
        }
        if let Some(rating) = fields.rating {
            if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                return Err(AppError::Validation(format!(
                    "Rating must be between 0 and {}, got {}",
                    MAX_RATING, rating
                )));
            }
            fields.rating = Some(round_tenths(rating));
        }

        Ok((self.id, fields))
    }
}

/// Inline an uploaded image file. The bytes are taken as-is.
pub fn uploaded_image(content_type: Option<&str>, bytes: &[u8]) -> String {
    let mime = content_type
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(FALLBACK_UPLOAD_MIME);
    data_uri(mime, bytes)
}
