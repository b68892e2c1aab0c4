//! Public reading endpoints.

use axum::extract::{Path, Query, State};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Article, ArticleQuery, Category, CategoryFilter, CategoryInfo};
use crate::search::ArticleFilter;
use crate::AppState;

/// GET /api/articles - List articles, optionally filtered by category and search term.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> ApiResult<Vec<Article>> {
    let revision_id = state.repo.get_revision_id().await;

    let raw_category = query.category.unwrap_or_default();
    let Some(category) = CategoryFilter::parse(&raw_category) else {
        return error(
            AppError::BadRequest(format!("Unknown category: {}", raw_category)),
            revision_id,
        );
    };

    let filter = ArticleFilter::new(category, query.q.unwrap_or_default());
    let articles = if filter.is_unfiltered() {
        state.repo.list_articles().await
    } else {
        state.repo.filter_articles(&filter).await
    };
    success(articles, revision_id)
}

/// GET /api/articles/:id - Get a single article.
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Article> {
    let revision_id = state.repo.get_revision_id().await;

    match state.repo.get_article(&id).await {
        Some(article) => success(article, revision_id),
        None => error(
            AppError::NotFound(format!("Article {} not found", id)),
            revision_id,
        ),
    }
}

/// GET /api/categories - Category keys with their display labels.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<CategoryInfo>> {
    let revision_id = state.repo.get_revision_id().await;
    let categories = Category::ALL.iter().copied().map(CategoryInfo::from).collect();
    success(categories, revision_id)
}
