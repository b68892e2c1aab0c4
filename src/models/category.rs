//! Closed category set with display-label lookup.

use serde::{Deserialize, Serialize};

/// Display language for category labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

/// Topical category of an article.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    PlayStation,
    Xbox,
    Pc,
    Nintendo,
    Reviews,
    Esports,
}

/// Label table: (category, wire key, Arabic label, English label).
static LABELS: [(Category, &str, &str, &str); 7] = [
    (Category::General, "general", "أخبار عامة", "General News"),
    (Category::PlayStation, "playstation", "PlayStation", "PlayStation"),
    (Category::Xbox, "xbox", "Xbox", "Xbox"),
    (Category::Pc, "pc", "PC", "PC"),
    (Category::Nintendo, "nintendo", "Nintendo", "Nintendo"),
    (Category::Reviews, "reviews", "مراجعات", "Reviews"),
    (Category::Esports, "esports", "رياضة إلكترونية", "Esports"),
];

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::PlayStation,
        Category::Xbox,
        Category::Pc,
        Category::Nintendo,
        Category::Reviews,
        Category::Esports,
    ];

    fn entry(&self) -> &'static (Category, &'static str, &'static str, &'static str) {
        LABELS
            .iter()
            .find(|(c, ..)| c == self)
            .unwrap_or(&LABELS[0])
    }

    /// Stable wire key.
    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    /// Human-facing label in the given language.
    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::Ar => self.entry().2,
            Language::En => self.entry().3,
        }
    }

    /// Resolve a wire key or any display label, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        LABELS
            .iter()
            .find(|(_, key, ar, en)| {
                *key == needle || ar.to_lowercase() == needle || en.to_lowercase() == needle
            })
            .map(|(c, ..)| *c)
    }
}

/// Category selection used by the public listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a filter value; empty, `all` and the Arabic "all" label select everything.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "" | "الكل" => Some(CategoryFilter::All),
            other if other.eq_ignore_ascii_case("all") => Some(CategoryFilter::All),
            other => Category::parse(other).map(CategoryFilter::Only),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

/// Category table entry exposed to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub key: Category,
    pub label_ar: &'static str,
    pub label_en: &'static str,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        Self {
            key: category,
            label_ar: category.label(Language::Ar),
            label_en: category.label(Language::En),
        }
    }
}
