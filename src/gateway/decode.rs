//! Parse-and-validate boundary for model output.
//!
//! Model text never reaches the domain model directly: it is decoded into raw
//! shapes, then each field is checked and normalized into a draft.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{round_tenths, ArticleDraft, Category, ReviewDraft};

/// Why a model payload was rejected.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON array")]
    NotAnArray,

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing or blank field `{0}`")]
    MissingField(&'static str),

    #[error("unknown category `{0}`")]
    UnknownCategory(String),

    #[error("rating {0} is outside 0-10")]
    RatingOutOfRange(f64),

    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDraft {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default, alias = "imageUrlKeyword")]
    image_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
}

/// Remove markdown code fences a model may wrap around JSON.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Decode a JSON array of article drafts. Any invalid item rejects the whole batch.
pub fn decode_drafts(text: &str) -> Result<Vec<ArticleDraft>, DecodeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(DecodeError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            draft_from_value(item).map_err(|e| DecodeError::Item {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

fn draft_from_value(item: Value) -> Result<ArticleDraft, DecodeError> {
    if !item.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let raw: RawDraft =
        serde_json::from_value(item).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

    let title = required(raw.title, "title")?;
    let summary = required(raw.summary, "summary")?;
    let category_text = required(raw.category, "category")?;
    let category =
        Category::parse(&category_text).ok_or(DecodeError::UnknownCategory(category_text))?;
    let image_prompt = required(raw.image_prompt, "imagePrompt")?;
    let source = raw
        .source
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(ArticleDraft {
        title,
        summary,
        category,
        source,
        image_prompt,
    })
}

/// Decode a `{title, summary, rating}` review object.
pub fn decode_review(text: &str) -> Result<ReviewDraft, DecodeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let raw: RawReview =
        serde_json::from_value(value).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

    let title = required(raw.title, "title")?;
    let summary = required(raw.summary, "summary")?;
    let rating = raw.rating.ok_or(DecodeError::MissingField("rating"))?;
    if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
        return Err(DecodeError::RatingOutOfRange(rating));
    }

    Ok(ReviewDraft {
        title,
        summary,
        rating: round_tenths(rating),
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DecodeError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(DecodeError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_BATCH: &str = r#"[
        {"title": "GTA VI trailer", "summary": "Record views", "category": "general",
         "source": "IGN", "imagePrompt": "Miami neon city"},
        {"title": "Zelda remake", "summary": "Rumoured", "category": "Nintendo",
         "imageUrlKeyword": "Hyrule castle"}
    ]"#;

    #[test]
    fn test_decode_valid_batch() {
        let drafts = decode_drafts(VALID_BATCH).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].category, Category::General);
        assert_eq!(drafts[0].source.as_deref(), Some("IGN"));
        assert_eq!(drafts[1].category, Category::Nintendo);
        assert_eq!(drafts[1].image_prompt, "Hyrule castle");
        assert!(drafts[1].source.is_none());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            decode_drafts(r#"{"title": "x"}"#),
            Err(DecodeError::NotAnArray)
        ));
        assert!(matches!(
            decode_drafts("not json"),
            Err(DecodeError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_category() {
        let text = r#"[{"title": "t", "summary": "s", "category": "Action", "imagePrompt": "p"}]"#;
        match decode_drafts(text) {
            Err(DecodeError::Item { index, source }) => {
                assert_eq!(index, 0);
                assert!(matches!(*source, DecodeError::UnknownCategory(ref c) if c == "Action"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_blank_title() {
        let text = r#"[{"title": "  ", "summary": "s", "category": "pc", "imagePrompt": "p"}]"#;
        assert!(matches!(
            decode_drafts(text),
            Err(DecodeError::Item { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        let text = r#"[{"title": 42, "summary": "s", "category": "pc", "imagePrompt": "p"}]"#;
        assert!(decode_drafts(text).is_err());
        assert!(matches!(
            decode_drafts(r#"["just a string"]"#),
            Err(DecodeError::Item { .. })
        ));
    }

    #[test]
    fn test_strip_code_fences() {
        let fenced = "```json\n[{\"a\": 1}]\n```";
        assert_eq!(strip_code_fences(fenced), "[{\"a\": 1}]");
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
    }

    #[test]
    fn test_decode_review() {
        let review =
            decode_review(r#"{"title": "Elden Ring", "summary": "Great", "rating": 9.25}"#)
                .unwrap();
        assert_eq!(review.title, "Elden Ring");
        assert_eq!(review.rating, 9.3);
    }

    #[test]
    fn test_decode_review_rejects_out_of_range_rating() {
        assert!(matches!(
            decode_review(r#"{"title": "t", "summary": "s", "rating": 11}"#),
            Err(DecodeError::RatingOutOfRange(_))
        ));
        assert!(matches!(
            decode_review(r#"{"title": "t", "summary": "s"}"#),
            Err(DecodeError::MissingField("rating"))
        ));
        assert!(matches!(
            decode_review("[]"),
            Err(DecodeError::NotAnObject)
        ));
    }
}
