//! Admin endpoints: authoring, generation and image acquisition.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    Json,
};

use super::{error, success, ApiResult};
use crate::admin::{uploaded_image, EditBuffer, ManualEntry};
use crate::auth::verify_passphrase;
use crate::errors::AppError;
use crate::gateway::image_search_url;
use crate::models::{
    Article, CreateArticleRequest, GenerateNewsRequest, ImageSearchLink, ImageSearchQuery,
    ImportFeedRequest, ReviewAssistRequest, ReviewDraft, SearchLatestRequest, SearchSummary,
    SessionRequest, SessionStatus, StoreStats, UpdateArticleRequest, UploadedImage,
};
use crate::AppState;

/// POST /api/admin/session - Check a passphrase from the login prompt.
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> ApiResult<SessionStatus> {
    let revision_id = state.repo.get_revision_id().await;

    if verify_passphrase(state.config.admin_passphrase.as_deref(), &request.passphrase) {
        success(SessionStatus { authenticated: true }, revision_id)
    } else {
        tracing::warn!("Rejected admin login attempt");
        error(
            AppError::Unauthorized("Invalid admin passphrase".to_string()),
            revision_id,
        )
    }
}

/// GET /api/admin/stats - Dashboard counters.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<StoreStats> {
    let stats = state.repo.stats().await;
    let revision_id = stats.revision_id;
    success(stats, revision_id)
}

/// POST /api/admin/articles - Add a manually written article at the front.
pub async fn create_article(
    State(state): State<AppState>,
    Json(request): Json<CreateArticleRequest>,
) -> ApiResult<Article> {
    let revision_id = state.repo.get_revision_id().await;

    let article = match ManualEntry::from(request)
        .into_article(&state.config.source_label, &state.config.date_format)
    {
        Ok(article) => article,
        Err(e) => return error(e, revision_id),
    };

    let new_revision = state.repo.insert_many(vec![article.clone()], true).await;
    tracing::info!("Added article {} ({})", article.id, article.category.as_str());
    success(article, new_revision)
}

/// PUT /api/admin/articles/:id - Save an edit buffer over the stored article.
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateArticleRequest>,
) -> ApiResult<Article> {
    let revision_id = state.repo.get_revision_id().await;

    let Some(article) = state.repo.get_article(&id).await else {
        return error(
            AppError::NotFound(format!("Article {} not found", id)),
            revision_id,
        );
    };

    let mut buffer = EditBuffer::load(&article);
    buffer.apply(request);
    tracing::debug!("Saving edits for article {}", buffer.id());

    let (id, changes) = match buffer.save() {
        Ok(saved) => saved,
        Err(e) => return error(e, revision_id),
    };

    match state.repo.update_by_id(&id, &changes).await {
        Some(article) => {
            let new_revision = state.repo.get_revision_id().await;
            success(article, new_revision)
        }
        // Deleted between load and save
        None => error(
            AppError::NotFound(format!("Article {} not found", id)),
            revision_id,
        ),
    }
}

/// DELETE /api/admin/articles/:id - Delete an article.
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await;

    if state.repo.delete_by_id(&id).await {
        tracing::info!("Deleted article {}", id);
        let new_revision = state.repo.get_revision_id().await;
        success((), new_revision)
    } else {
        error(
            AppError::NotFound(format!("Article {} not found", id)),
            revision_id,
        )
    }
}

/// POST /api/admin/generate - Generate a news batch and prepend it.
///
/// A failed generation answers with an empty list and leaves the store alone.
pub async fn generate_news(
    State(state): State<AppState>,
    Json(request): Json<GenerateNewsRequest>,
) -> ApiResult<Vec<Article>> {
    let topic = request.topic.unwrap_or_default();
    let articles = state.gateway.generate_news(&topic, request.image_mode).await;

    let revision_id = state.repo.insert_many(articles.clone(), true).await;
    success(articles, revision_id)
}

/// POST /api/admin/search - Grounded live search.
pub async fn search_latest(
    State(state): State<AppState>,
    Json(request): Json<SearchLatestRequest>,
) -> ApiResult<SearchSummary> {
    let revision_id = state.repo.get_revision_id().await;

    if request.query.trim().is_empty() {
        return error(
            AppError::Validation("Query is required".to_string()),
            revision_id,
        );
    }

    match state.gateway.search_latest(&request.query).await {
        Ok(summary) => success(summary, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// POST /api/admin/import - Import the latest feed posts, skipping titles already present.
pub async fn import_feed(
    State(state): State<AppState>,
    Json(request): Json<ImportFeedRequest>,
) -> ApiResult<Vec<Article>> {
    let handle = request
        .handle
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| state.config.feed_handle.clone());

    let fetched = state.gateway.import_from_feed(&handle).await;
    let fetched_count = fetched.len();
    let inserted = state.repo.insert_unique_titles(fetched).await;

    if inserted.len() < fetched_count {
        tracing::info!(
            "Skipped {} duplicate posts from @{}",
            fetched_count - inserted.len(),
            handle.trim_start_matches('@')
        );
    }

    let revision_id = state.repo.get_revision_id().await;
    success(inserted, revision_id)
}

/// POST /api/admin/review-assist - Structure free-form notes into a review.
///
/// Nothing is stored; the client fills its form from the result.
pub async fn review_assist(
    State(state): State<AppState>,
    Json(request): Json<ReviewAssistRequest>,
) -> ApiResult<ReviewDraft> {
    let revision_id = state.repo.get_revision_id().await;

    if request.title.trim().is_empty() {
        return error(
            AppError::Validation("Game title is required".to_string()),
            revision_id,
        );
    }

    let notes = request.notes.unwrap_or_default();
    match state.gateway.structure_review(&request.title, &notes).await {
        Ok(review) => success(review, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// POST /api/admin/images - Turn an uploaded file into an inline image URL.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<UploadedImage> {
    let revision_id = state.repo.get_revision_id().await;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    success(
        UploadedImage {
            image_url: uploaded_image(content_type, &body),
            size: body.len(),
        },
        revision_id,
    )
}

/// GET /api/admin/image-search - Link to an external image search.
pub async fn image_search(
    State(state): State<AppState>,
    Query(query): Query<ImageSearchQuery>,
) -> ApiResult<ImageSearchLink> {
    let revision_id = state.repo.get_revision_id().await;

    if query.q.trim().is_empty() {
        return error(
            AppError::Validation("Search query is required".to_string()),
            revision_id,
        );
    }

    success(
        ImageSearchLink {
            url: image_search_url(&query.q),
        },
        revision_id,
    )
}
