//! Repository for article and community-game operations.
//!
//! Every operation takes its lock once, so a mutation is never observed half-applied.

use std::collections::HashSet;

use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::{Article, CommunityGame, StoreStats, UpdateArticleRequest};
use crate::search::ArticleFilter;

/// Ordered articles plus the revision counter they share a lock with.
#[derive(Debug, Default)]
struct ArticleTable {
    /// Most recent first
    articles: Vec<Article>,
    revision_id: i64,
}

impl ArticleTable {
    fn bump(&mut self) -> i64 {
        self.revision_id += 1;
        self.revision_id
    }
}

/// In-memory repository for all data operations.
#[derive(Debug)]
pub struct Repository {
    table: RwLock<ArticleTable>,
    games: RwLock<Vec<CommunityGame>>,
}

impl Repository {
    pub fn new(articles: Vec<Article>, games: Vec<CommunityGame>) -> Self {
        Self {
            table: RwLock::new(ArticleTable {
                articles,
                revision_id: 0,
            }),
            games: RwLock::new(games),
        }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> i64 {
        self.table.read().await.revision_id
    }

    // ==================== ARTICLE OPERATIONS ====================

    /// List all articles, most recent first.
    pub async fn list_articles(&self) -> Vec<Article> {
        self.table.read().await.articles.clone()
    }

    /// List the articles passing `filter`, in store order.
    pub async fn filter_articles(&self, filter: &ArticleFilter) -> Vec<Article> {
        filter.apply(&self.table.read().await.articles)
    }

    /// Get an article by ID.
    pub async fn get_article(&self, id: &str) -> Option<Article> {
        self.table
            .read()
            .await
            .articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Insert a batch at the front (or back) of the collection. Records are not validated here.
    pub async fn insert_many(&self, new_articles: Vec<Article>, at_front: bool) -> i64 {
        let mut table = self.table.write().await;
        if new_articles.is_empty() {
            return table.revision_id;
        }

        let count = new_articles.len();
        if at_front {
            table.articles.splice(0..0, new_articles);
        } else {
            table.articles.extend(new_articles);
        }

        let revision_id = table.bump();
        tracing::debug!("Inserted {} articles (revision {})", count, revision_id);
        revision_id
    }

    /// Insert at the front only the articles whose title is not already present.
    ///
    /// Returns the articles actually inserted, in their original order.
    pub async fn insert_unique_titles(&self, new_articles: Vec<Article>) -> Vec<Article> {
        let mut table = self.table.write().await;
        let mut seen: HashSet<String> = table.articles.iter().map(|a| a.title.clone()).collect();

        let unique: Vec<Article> = new_articles
            .into_iter()
            .filter(|a| seen.insert(a.title.clone()))
            .collect();

        if !unique.is_empty() {
            table.articles.splice(0..0, unique.iter().cloned());
            table.bump();
        }

        unique
    }

    /// Merge partial fields into the article with `id`. Silent no-op when absent.
    pub async fn update_by_id(&self, id: &str, changes: &UpdateArticleRequest) -> Option<Article> {
        let mut table = self.table.write().await;
        let article = table.articles.iter_mut().find(|a| a.id == id)?;
        article.merge(changes);
        let updated = article.clone();
        table.bump();
        Some(updated)
    }

    /// Remove the article with `id`. Returns whether anything was removed.
    pub async fn delete_by_id(&self, id: &str) -> bool {
        let mut table = self.table.write().await;
        let before = table.articles.len();
        table.articles.retain(|a| a.id != id);

        if table.articles.len() == before {
            return false;
        }
        table.bump();
        true
    }

    /// Counters for the admin dashboard.
    pub async fn stats(&self) -> StoreStats {
        let table = self.table.read().await;
        let categories: HashSet<_> = table.articles.iter().map(|a| a.category).collect();

        StoreStats {
            total: table.articles.len(),
            categories: categories.len(),
            pending_images: table.articles.iter().filter(|a| a.needs_image).count(),
            revision_id: table.revision_id,
        }
    }

    // ==================== COMMUNITY OPERATIONS ====================

    /// List the community games.
    pub async fn list_games(&self) -> Vec<CommunityGame> {
        self.games.read().await.clone()
    }

    /// Cast a 1-5 star vote on a game.
    pub async fn cast_vote(&self, game_id: &str, stars: u8) -> Result<CommunityGame, AppError> {
        if !(1..=5).contains(&stars) {
            return Err(AppError::Validation(format!(
                "Vote must be between 1 and 5 stars, got {}",
                stars
            )));
        }

        let mut games = self.games.write().await;
        let game = games
            .iter_mut()
            .find(|g| g.id == game_id)
            .ok_or_else(|| AppError::NotFound(format!("Game {} not found", game_id)))?;

        game.record_vote(stars);
        Ok(game.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryFilter};

    fn article(id: &str, title: &str, category: Category) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            summary: format!("{} summary", title),
            category,
            source: "Test".to_string(),
            image_url: "https://example.com/a.png".to_string(),
            date: "2024-01-01".to_string(),
            url: None,
            rating: None,
            needs_image: false,
        }
    }

    fn repo() -> Repository {
        Repository::new(
            vec![
                article("a", "Alpha", Category::Pc),
                article("b", "Beta", Category::Xbox),
            ],
            crate::store::demo_games(),
        )
    }

    fn ids(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_many_prepends_in_batch_order() {
        let repo = repo();
        let revision = repo
            .insert_many(
                vec![
                    article("x", "X", Category::General),
                    article("y", "Y", Category::General),
                ],
                true,
            )
            .await;

        assert_eq!(revision, 1);
        assert_eq!(ids(&repo.list_articles().await), vec!["x", "y", "a", "b"]);
    }

    #[tokio::test]
    async fn test_insert_many_at_back() {
        let repo = repo();
        repo.insert_many(vec![article("z", "Z", Category::General)], false)
            .await;
        assert_eq!(ids(&repo.list_articles().await), vec!["a", "b", "z"]);
    }

    #[tokio::test]
    async fn test_insert_empty_batch_keeps_revision() {
        let repo = repo();
        assert_eq!(repo.insert_many(Vec::new(), true).await, 0);
    }

    #[tokio::test]
    async fn test_insert_then_delete_restores_prior_contents() {
        let repo = repo();
        let before = repo.list_articles().await;

        let batch = vec![
            article("x", "X", Category::General),
            article("y", "Y", Category::Reviews),
        ];
        let batch_ids: Vec<String> = batch.iter().map(|a| a.id.clone()).collect();
        repo.insert_many(batch, true).await;

        for id in &batch_ids {
            assert!(repo.delete_by_id(id).await);
        }

        assert_eq!(repo.list_articles().await, before);
    }

    #[tokio::test]
    async fn test_update_missing_id_leaves_store_unchanged() {
        let repo = repo();
        let before = repo.list_articles().await;
        let revision_before = repo.get_revision_id().await;

        let changes = UpdateArticleRequest {
            title: Some("Changed".to_string()),
            ..Default::default()
        };
        assert!(repo.update_by_id("missing", &changes).await.is_none());

        assert_eq!(repo.list_articles().await, before);
        assert_eq!(repo.get_revision_id().await, revision_before);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = repo();
        let changes = UpdateArticleRequest {
            summary: Some("Fresh summary".to_string()),
            rating: Some(7.5),
            ..Default::default()
        };

        let updated = repo.update_by_id("b", &changes).await.unwrap();
        assert_eq!(updated.title, "Beta");
        assert_eq!(updated.summary, "Fresh summary");
        assert_eq!(updated.rating, Some(7.5));
        assert_eq!(repo.get_article("b").await.unwrap(), updated);
        assert_eq!(repo.get_revision_id().await, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let repo = repo();
        assert!(!repo.delete_by_id("missing").await);
        assert_eq!(repo.list_articles().await.len(), 2);
        assert_eq!(repo.get_revision_id().await, 0);
    }

    #[tokio::test]
    async fn test_insert_unique_titles_skips_existing() {
        let repo = repo();
        let inserted = repo
            .insert_unique_titles(vec![
                article("n1", "Alpha", Category::General),
                article("n2", "Gamma", Category::General),
            ])
            .await;

        assert_eq!(ids(&inserted), vec!["n2"]);
        assert_eq!(ids(&repo.list_articles().await), vec!["n2", "a", "b"]);
    }

    #[tokio::test]
    async fn test_insert_unique_titles_all_duplicates() {
        let repo = repo();
        let inserted = repo
            .insert_unique_titles(vec![article("n1", "Beta", Category::General)])
            .await;

        assert!(inserted.is_empty());
        assert_eq!(repo.get_revision_id().await, 0);
    }

    #[tokio::test]
    async fn test_filter_articles_uses_store_order() {
        let repo = repo();
        let filter = ArticleFilter::new(CategoryFilter::Only(Category::Xbox), "");
        assert_eq!(ids(&repo.filter_articles(&filter).await), vec!["b"]);
    }

    #[tokio::test]
    async fn test_stats() {
        let repo = repo();
        let mut pending = article("p", "Pending", Category::Pc);
        pending.needs_image = true;
        repo.insert_many(vec![pending], true).await;

        let stats = repo.stats().await;
        assert_eq!(stats.total, 3);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.pending_images, 1);
        assert_eq!(stats.revision_id, 1);
    }

    #[tokio::test]
    async fn test_cast_vote() {
        let repo = repo();
        let game = repo.cast_vote("1", 5).await.unwrap();
        assert_eq!(game.total_votes, 12_501);
        assert_eq!(game.community_score, 96.1);
        assert_eq!(game.user_rating, Some(5));
    }

    #[tokio::test]
    async fn test_cast_vote_rejects_out_of_range() {
        let repo = repo();
        assert!(matches!(
            repo.cast_vote("1", 0).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            repo.cast_vote("1", 6).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_cast_vote_unknown_game() {
        let repo = repo();
        assert!(matches!(
            repo.cast_vote("nope", 4).await,
            Err(AppError::NotFound(_))
        ));
    }
}
