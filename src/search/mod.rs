//! Article filtering for the public listing.
//!
//! Category equality plus case-insensitive substring match over title and summary.
//! Results keep the store order; there is no relevance scoring.

use crate::models::{Article, CategoryFilter};

/// Listing criteria.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub category: CategoryFilter,
    pub term: String,
}

impl ArticleFilter {
    pub fn new(category: CategoryFilter, term: impl Into<String>) -> Self {
        Self {
            category,
            term: term.into(),
        }
    }

    /// True when every article passes: all categories and no term.
    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All && self.term.is_empty()
    }

    /// Whether a single article passes the filter.
    pub fn matches(&self, article: &Article) -> bool {
        if !self.category.matches(article.category) {
            return false;
        }
        if self.term.is_empty() {
            return true;
        }
        let needle = self.term.to_lowercase();
        article.title.to_lowercase().contains(&needle)
            || article.summary.to_lowercase().contains(&needle)
    }

    /// Ordered subsequence of `articles` passing the filter.
    pub fn apply(&self, articles: &[Article]) -> Vec<Article> {
        articles
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn article(id: &str, title: &str, summary: &str, category: Category) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            category,
            source: "Test".to_string(),
            image_url: "https://example.com/a.png".to_string(),
            date: "2024-01-01".to_string(),
            url: None,
            rating: None,
            needs_image: false,
        }
    }

    fn fixture() -> Vec<Article> {
        let mut review = article(
            "a",
            "Spider-Man 2 Review",
            "A masterpiece worth playing",
            Category::Reviews,
        );
        review.rating = Some(9.5);
        vec![
            review,
            article("b", "New GPU drivers", "Performance boost for shooters", Category::Pc),
            article("c", "Switch successor rumours", "Nintendo hardware talk", Category::Nintendo),
        ]
    }

    #[test]
    fn test_all_and_empty_term_returns_everything_in_order() {
        let articles = fixture();
        let result = ArticleFilter::default().apply(&articles);
        assert_eq!(result, articles);
    }

    #[test]
    fn test_is_unfiltered() {
        assert!(ArticleFilter::default().is_unfiltered());
        assert!(ArticleFilter::new(CategoryFilter::All, "").is_unfiltered());
        assert!(!ArticleFilter::new(CategoryFilter::All, "spider").is_unfiltered());
        assert!(!ArticleFilter::new(CategoryFilter::Only(Category::Pc), "").is_unfiltered());
    }

    #[test]
    fn test_category_filter() {
        let articles = fixture();
        let result =
            ArticleFilter::new(CategoryFilter::Only(Category::Reviews), "").apply(&articles);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn test_term_is_case_insensitive_substring() {
        let articles = fixture();
        let result = ArticleFilter::new(CategoryFilter::All, "spider").apply(&articles);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");

        // Matches inside the summary as well
        let result = ArticleFilter::new(CategoryFilter::All, "SHOOT").apply(&articles);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn test_no_tokenizing_or_fuzzy_matching() {
        let articles = fixture();
        assert!(ArticleFilter::new(CategoryFilter::All, "spiderman")
            .apply(&articles)
            .is_empty());
        assert!(ArticleFilter::new(CategoryFilter::All, "review spider")
            .apply(&articles)
            .is_empty());
    }

    #[test]
    fn test_category_and_term_combine() {
        let articles = fixture();
        let result =
            ArticleFilter::new(CategoryFilter::Only(Category::Pc), "spider").apply(&articles);
        assert!(result.is_empty());
    }

    #[test]
    fn test_every_result_satisfies_predicate() {
        let articles = fixture();
        let filters = [
            ArticleFilter::new(CategoryFilter::All, "e"),
            ArticleFilter::new(CategoryFilter::Only(Category::Nintendo), "n"),
            ArticleFilter::new(CategoryFilter::Only(Category::Xbox), ""),
            ArticleFilter::new(CategoryFilter::All, "talk"),
        ];
        for filter in filters {
            let result = filter.apply(&articles);
            assert!(result.iter().all(|a| filter.matches(a)));
            let expected = articles.iter().filter(|a| filter.matches(a)).count();
            assert_eq!(result.len(), expected);
        }
    }

    #[test]
    fn test_non_ascii_terms() {
        let articles = vec![article(
            "ar",
            "مراجعة Spider-Man 2",
            "تحفة فنية",
            Category::Reviews,
        )];
        let result = ArticleFilter::new(CategoryFilter::All, "تحفة").apply(&articles);
        assert_eq!(result.len(), 1);
    }
}
