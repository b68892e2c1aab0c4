//! Content-generation gateway.
//!
//! [`GenerativeModel`] is the wire boundary to the external text service;
//! [`ContentGateway`] turns its replies into domain records. The four operations
//! keep two failure contracts: news generation and feed import degrade to an
//! empty batch, while search and review structuring return the error.

mod decode;
mod gemini;
mod images;

pub use decode::*;
pub use gemini::*;
pub use images::*;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::{
    display_date, new_article_id, Article, ArticleDraft, Category, ImageMode, ReviewDraft,
    SearchSource, SearchSummary,
};

/// Drafts requested per generation call.
pub const NEWS_BATCH_SIZE: usize = 4;

/// Feed posts requested per import.
pub const FEED_BATCH_SIZE: usize = 3;

/// Topic used when the admin leaves the field empty.
pub const DEFAULT_TOPIC: &str = "the latest video game news";

/// Text returned when a grounded search yields no prose.
pub const NO_TEXT_RESULTS: &str = "No text results.";

/// Gateway error type.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No usable credentials or endpoint
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    /// Network or protocol failure
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Reply carried no candidates
    #[error("Service returned an empty response")]
    EmptyResponse,

    /// Reply did not have the expected shape
    #[error("Malformed response: {0}")]
    Decode(#[from] DecodeError),
}

/// One call to the generative model.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub instruction: String,
    /// JSON schema the reply must follow
    pub response_schema: Option<Value>,
    /// Ground the answer in live web search
    pub grounded_search: bool,
}

/// Raw grounding citation as returned by the model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Citation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// Model reply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationResponse {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// External generative text service.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationResponse, GatewayError>;
}

/// Stand-in used when no API key is configured; every call fails.
#[derive(Debug, Default)]
pub struct UnconfiguredModel;

#[async_trait]
impl GenerativeModel for UnconfiguredModel {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResponse, GatewayError> {
        Err(GatewayError::NotConfigured(
            "NEWSDESK_GEMINI_API_KEY is not set".to_string(),
        ))
    }
}

/// Normalizes model output into articles, search summaries and reviews.
pub struct ContentGateway {
    model: Arc<dyn GenerativeModel>,
    images: ImageEndpoint,
    /// Attribution for generated drafts that name no source
    source_label: String,
    date_format: String,
}

impl ContentGateway {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        images: ImageEndpoint,
        source_label: impl Into<String>,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            model,
            images,
            source_label: source_label.into(),
            date_format: date_format.into(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Generate a batch of news articles about `topic`.
    ///
    /// Failures of any kind yield an empty batch.
    pub async fn generate_news(&self, topic: &str, image_mode: ImageMode) -> Vec<Article> {
        match self.try_generate_news(topic, image_mode).await {
            Ok(articles) => {
                tracing::info!("Generated {} articles", articles.len());
                articles
            }
            Err(e) => {
                tracing::warn!("News generation produced no articles: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_generate_news(
        &self,
        topic: &str,
        image_mode: ImageMode,
    ) -> Result<Vec<Article>, GatewayError> {
        let topic = match topic.trim() {
            "" => DEFAULT_TOPIC,
            t => t,
        };

        let instruction = format!(
            "Generate {count} realistic news articles about {topic}.\n\
             Write the title and summary in Arabic, exciting for gamers.\n\
             Pick the most suitable category for each article strictly from: [{categories}].\n\
             For imagePrompt give a specific English prompt for an image generator, \
             e.g. 'Cyberpunk city neon', 'Mario running', 'PlayStation 5 console'.",
            count = NEWS_BATCH_SIZE,
            topic = topic,
            categories = category_keys(),
        );

        let response = self
            .model
            .generate(GenerationRequest {
                instruction,
                response_schema: Some(draft_list_schema()),
                grounded_search: false,
            })
            .await?;

        let drafts = decode_drafts(&response.text)?;
        let date = display_date(&self.date_format);

        Ok(drafts
            .into_iter()
            .map(|draft| {
                let source = draft
                    .source
                    .clone()
                    .unwrap_or_else(|| self.source_label.clone());
                self.article_from_draft(
                    draft,
                    "gaming high quality 4k",
                    image_mode,
                    source,
                    None,
                    &date,
                )
            })
            .collect())
    }

    /// Grounded live search returning prose and its citations.
    pub async fn search_latest(&self, query: &str) -> Result<SearchSummary, GatewayError> {
        let instruction = format!(
            "Search for today's latest news about {}. Summarize the most important events in Arabic.",
            query.trim()
        );

        let response = self
            .model
            .generate(GenerationRequest {
                instruction,
                response_schema: None,
                grounded_search: true,
            })
            .await?;

        let text = match response.text.trim() {
            "" => NO_TEXT_RESULTS.to_string(),
            t => t.to_string(),
        };

        let sources = response
            .citations
            .into_iter()
            .filter_map(|c| {
                let uri = c.uri.filter(|u| !u.trim().is_empty())?;
                let title = c
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| uri.clone());
                Some(SearchSource { title, uri })
            })
            .collect();

        Ok(SearchSummary { text, sources })
    }

    /// Convert the latest posts of a social feed into articles.
    ///
    /// Failures yield an empty batch. Deduplication against the store is the caller's job.
    pub async fn import_from_feed(&self, handle: &str) -> Vec<Article> {
        match self.try_import_from_feed(handle).await {
            Ok(articles) => {
                tracing::info!(
                    "Imported {} posts from @{}",
                    articles.len(),
                    handle.trim().trim_start_matches('@')
                );
                articles
            }
            Err(e) => {
                tracing::warn!("Feed import produced no articles: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_import_from_feed(&self, handle: &str) -> Result<Vec<Article>, GatewayError> {
        let handle = handle.trim().trim_start_matches('@');
        if handle.is_empty() {
            return Err(GatewayError::NotConfigured("Feed handle is empty".to_string()));
        }

        let instruction = format!(
            "Find the latest posts from the user @{handle} on X (Twitter).\n\
             Select the {count} most recent posts relevant to gaming or news updates and convert them into news articles.\n\
             Translate or summarize each post into Arabic for 'summary' and write a catchy 'title'.\n\
             Pick 'category' strictly from: [{categories}].\n\
             For 'imagePrompt' give a descriptive English prompt for an image generator based on the post.\n\
             Return the result strictly as a valid JSON array of objects with the keys \
             title, summary, category, imagePrompt. Do not wrap it in markdown code blocks.",
            handle = handle,
            count = FEED_BATCH_SIZE,
            categories = category_keys(),
        );

        let response = self
            .model
            .generate(GenerationRequest {
                instruction,
                response_schema: None,
                grounded_search: true,
            })
            .await?;

        let drafts = decode_drafts(&strip_code_fences(&response.text))?;
        let date = display_date(&self.date_format);
        let source = format!("@{}", handle);
        let profile = format!("https://x.com/{}", handle);

        Ok(drafts
            .into_iter()
            .map(|draft| {
                self.article_from_draft(
                    draft,
                    "video game aesthetic",
                    ImageMode::Ai,
                    source.clone(),
                    Some(profile.clone()),
                    &date,
                )
            })
            .collect())
    }

    /// Turn a game title and free-form notes into a review with a 0-10 rating.
    pub async fn structure_review(
        &self,
        title: &str,
        notes: &str,
    ) -> Result<ReviewDraft, GatewayError> {
        let instruction = format!(
            "Act as a professional gaming journalist writing in Arabic.\n\
             Given a game title and raw notes (possibly empty):\n\
             1. Write a concise professional review summary in Arabic based on the notes, \
             or on general knowledge if the notes are sparse.\n\
             2. Suggest a fair rating out of 10 from the sentiment of the notes.\n\
             3. Suggest a catchy title for the review.\n\n\
             Game title: {}\nNotes: {}",
            title.trim(),
            notes.trim()
        );

        let response = self
            .model
            .generate(GenerationRequest {
                instruction,
                response_schema: Some(review_schema()),
                grounded_search: false,
            })
            .await?;

        Ok(decode_review(&response.text)?)
    }

    fn article_from_draft(
        &self,
        draft: ArticleDraft,
        prompt_suffix: &str,
        image_mode: ImageMode,
        source: String,
        url: Option<String>,
        date: &str,
    ) -> Article {
        let (image_url, needs_image) = match image_mode {
            ImageMode::Ai => (
                self.images
                    .random_render_url(&format!("{} {}", draft.image_prompt, prompt_suffix)),
                false,
            ),
            ImageMode::Manual => (NEEDS_IMAGE_PLACEHOLDER.to_string(), true),
        };

        Article {
            id: new_article_id(),
            title: draft.title,
            summary: draft.summary,
            category: draft.category,
            source,
            image_url,
            date: date.to_string(),
            url,
            rating: None,
            needs_image,
        }
    }
}

fn category_keys() -> String {
    Category::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn draft_list_schema() -> Value {
    let keys: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "category": { "type": "STRING", "enum": keys },
                "source": { "type": "STRING" },
                "imagePrompt": {
                    "type": "STRING",
                    "description": "A specific English prompt for an image generator"
                }
            },
            "required": ["title", "summary", "category", "source", "imagePrompt"]
        }
    })
}

fn review_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "rating": { "type": "NUMBER" }
        },
        "required": ["title", "summary", "rating"]
    })
}


#[cfg(test)]
mod tests {
    use super::testing::{gateway, ScriptedModel};
    use super::*;

    const NEWS_REPLY: &str = r#"[
        {"title": "New PS5 model", "summary": "Slimmer console", "category": "playstation",
         "source": "Sony Blog", "imagePrompt": "PlayStation 5 console"},
        {"title": "Halo returns", "summary": "Remaster announced", "category": "xbox",
         "imagePrompt": "Master Chief"}
    ]"#;

    #[tokio::test]
    async fn test_generate_news_builds_articles() {
        let model = Arc::new(ScriptedModel::new().reply_text(NEWS_REPLY));
        let gw = gateway(model.clone());

        let articles = gw.generate_news("consoles", ImageMode::Ai).await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].category, Category::PlayStation);
        assert_eq!(articles[0].source, "Sony Blog");
        assert_eq!(articles[1].source, "GAMES STATLON");
        assert!(articles[0]
            .image_url
            .starts_with("https://image.pollinations.ai/prompt/PlayStation%205%20console%20gaming%20high%20quality%204k?"));
        assert!(articles[0].image_url.contains("seed="));
        assert!(!articles[0].needs_image);
        assert_ne!(articles[0].id, articles[1].id);
        assert!(articles.iter().all(|a| a.url.is_none() && a.rating.is_none()));
        assert_eq!(articles[0].date, articles[1].date);

        let requests = model.requests.lock().unwrap();
        assert!(requests[0].instruction.contains("consoles"));
        assert!(requests[0].response_schema.is_some());
        assert!(!requests[0].grounded_search);
    }

    #[tokio::test]
    async fn test_generate_news_uses_default_topic() {
        let model = Arc::new(ScriptedModel::new().reply_text("[]"));
        let gw = gateway(model.clone());

        assert!(gw.generate_news("   ", ImageMode::Ai).await.is_empty());
        let requests = model.requests.lock().unwrap();
        assert!(requests[0].instruction.contains(DEFAULT_TOPIC));
    }

    #[tokio::test]
    async fn test_generate_news_manual_images_use_placeholder() {
        let model = Arc::new(ScriptedModel::new().reply_text(NEWS_REPLY));
        let articles = gateway(model).generate_news("", ImageMode::Manual).await;

        assert!(articles
            .iter()
            .all(|a| a.image_url == NEEDS_IMAGE_PLACEHOLDER && a.needs_image));
    }

    #[tokio::test]
    async fn test_generate_news_failure_is_empty() {
        let model = Arc::new(ScriptedModel::new().fail());
        assert!(gateway(model).generate_news("x", ImageMode::Ai).await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_news_schema_violation_is_empty() {
        let reply = r#"[
            {"title": "ok", "summary": "ok", "category": "pc", "imagePrompt": "p"},
            {"title": "bad", "summary": "bad", "category": "Action", "imagePrompt": "p"}
        ]"#;
        let model = Arc::new(ScriptedModel::new().reply_text(reply));
        assert!(gateway(model).generate_news("x", ImageMode::Ai).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_latest_collects_sources() {
        let model = Arc::new(ScriptedModel::new().reply(Ok(GenerationResponse {
            text: "Big week for Nintendo.".to_string(),
            citations: vec![
                Citation {
                    title: Some("Nintendo Life".to_string()),
                    uri: Some("https://nintendolife.com/a".to_string()),
                },
                Citation {
                    title: Some("No link".to_string()),
                    uri: None,
                },
                Citation {
                    title: None,
                    uri: Some("https://example.com/b".to_string()),
                },
            ],
        })));
        let gw = gateway(model.clone());

        let summary = gw.search_latest("Nintendo").await.unwrap();
        assert_eq!(summary.text, "Big week for Nintendo.");
        assert_eq!(
            summary.sources,
            vec![
                SearchSource {
                    title: "Nintendo Life".to_string(),
                    uri: "https://nintendolife.com/a".to_string()
                },
                SearchSource {
                    title: "https://example.com/b".to_string(),
                    uri: "https://example.com/b".to_string()
                },
            ]
        );
        assert!(model.requests.lock().unwrap()[0].grounded_search);
    }

    #[tokio::test]
    async fn test_search_latest_empty_text() {
        let model = Arc::new(ScriptedModel::new().reply_text("  "));
        let summary = gateway(model).search_latest("x").await.unwrap();
        assert_eq!(summary.text, NO_TEXT_RESULTS);
        assert!(summary.sources.is_empty());
    }

    #[tokio::test]
    async fn test_search_latest_propagates_failure() {
        let model = Arc::new(ScriptedModel::new().fail());
        assert!(matches!(
            gateway(model).search_latest("x").await,
            Err(GatewayError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_import_from_feed_strips_fences_and_tags_source() {
        let reply = "```json\n[{\"title\": \"Patch notes\", \"summary\": \"Balance changes\", \
                     \"category\": \"esports\", \"imagePrompt\": \"arena\"}]\n```";
        let model = Arc::new(ScriptedModel::new().reply_text(reply));
        let gw = gateway(model.clone());

        let articles = gw.import_from_feed("@games_statlon").await;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "@games_statlon");
        assert_eq!(articles[0].url.as_deref(), Some("https://x.com/games_statlon"));
        assert_eq!(articles[0].category, Category::Esports);
        assert!(articles[0]
            .image_url
            .contains("arena%20video%20game%20aesthetic"));
        let requests = model.requests.lock().unwrap();
        assert!(requests[0].instruction.contains("@games_statlon"));
        assert!(requests[0].response_schema.is_none());
    }

    #[tokio::test]
    async fn test_import_from_feed_failures_are_empty() {
        let model = Arc::new(
            ScriptedModel::new()
                .reply_text("Sorry, I cannot browse X.")
                .fail(),
        );
        let gw = gateway(model.clone());

        assert!(gw.import_from_feed("games_statlon").await.is_empty());
        assert!(gw.import_from_feed("games_statlon").await.is_empty());
        // Blank handle never reaches the model
        assert!(gw.import_from_feed(" @ ").await.is_empty());
        assert_eq!(model.request_count(), 2);
    }

    #[tokio::test]
    async fn test_structure_review() {
        let model = Arc::new(
            ScriptedModel::new()
                .reply_text(r#"{"title": "Elden Ring: a triumph", "summary": "Vast", "rating": 9.5}"#),
        );
        let gw = gateway(model.clone());

        let review = gw.structure_review("Elden Ring", "huge world, hard bosses").await.unwrap();
        assert_eq!(review.title, "Elden Ring: a triumph");
        assert_eq!(review.rating, 9.5);

        let requests = model.requests.lock().unwrap();
        assert!(requests[0].instruction.contains("huge world, hard bosses"));
        assert!(requests[0].response_schema.is_some());
    }

    #[tokio::test]
    async fn test_structure_review_propagates_errors() {
        let model = Arc::new(
            ScriptedModel::new()
                .fail()
                .reply_text(r#"{"title": "t", "summary": "s", "rating": 42}"#),
        );
        let gw = gateway(model);

        assert!(gw.structure_review("t", "").await.is_err());
        assert!(matches!(
            gw.structure_review("t", "").await,
            Err(GatewayError::Decode(DecodeError::RatingOutOfRange(_)))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_model() {
        let gw = ContentGateway::new(
            Arc::new(UnconfiguredModel),
            ImageEndpoint::new(crate::config::DEFAULT_IMAGE_ENDPOINT).unwrap(),
            "GAMES STATLON",
            "%Y-%m-%d",
        );
        assert!(gw.generate_news("", ImageMode::Ai).await.is_empty());
        assert!(matches!(
            gw.structure_review("t", "n").await,
            Err(GatewayError::NotConfigured(_))
        ));
    }
}
