//! Article model matching the front-end Article interface.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::Category;

/// Fallback when a configured date format does not parse.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single news or review item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: Category,
    pub source: String,
    pub image_url: String,
    /// Display date stamped at creation
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Image is a placeholder awaiting an admin upload
    #[serde(default)]
    pub needs_image: bool,
}

impl Article {
    /// Merge partial changes over this record. `id` and `date` never change.
    pub fn merge(&mut self, changes: &UpdateArticleRequest) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(summary) = &changes.summary {
            self.summary = summary.clone();
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(source) = &changes.source {
            self.source = source.clone();
        }
        if let Some(image_url) = &changes.image_url {
            if *image_url != self.image_url {
                self.needs_image = false;
            }
            self.image_url = image_url.clone();
        }
        if let Some(url) = &changes.url {
            self.url = Some(url.clone());
        }
        if let Some(rating) = changes.rating {
            self.rating = Some(rating);
        }
    }
}

/// New article id.
pub fn new_article_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Today's date rendered with `format`.
pub fn display_date(format: &str) -> String {
    let valid = StrftimeItems::new(format).all(|item| !matches!(item, Item::Error));
    let format = if valid { format } else { DEFAULT_DATE_FORMAT };
    Local::now().format(format).to_string()
}

/// Query string of the public article listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleQuery {
    /// Category key or label; empty or "all" lists every category
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text search term
    #[serde(default)]
    pub q: Option<String>,
}

/// Request body for the manual add form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: String,
    pub summary: String,
    pub category: Category,
    /// Raw rating input, only used for reviews
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update; also the saved contents of an edit buffer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}
