//! In-memory article store.
//!
//! The store is the only owner of articles and community games; nothing is persisted.

mod repository;

pub use repository::*;

use crate::models::{Article, Category, CommunityGame};

/// Build the repository, optionally pre-loaded with the demo content.
pub fn init_repository(seed_demo: bool) -> Repository {
    if seed_demo {
        let articles = demo_articles();
        let games = demo_games();
        tracing::info!(
            "Seeded store with {} articles and {} community games",
            articles.len(),
            games.len()
        );
        Repository::new(articles, games)
    } else {
        Repository::new(Vec::new(), demo_games())
    }
}

/// Front-page content shown before any admin activity.
pub fn demo_articles() -> Vec<Article> {
    vec![
        Article {
            id: "1".to_string(),
            title: "إطلاق عرض تشويقي جديد للعبة GTA VI يحطم الأرقام القياسية".to_string(),
            summary: "كشفت روكستار عن عرض جديد يستعرض عالم اللعبة المذهل، محققاً ملايين المشاهدات في ساعات قليلة.".to_string(),
            category: Category::General,
            source: "IGN Middle East".to_string(),
            image_url: "https://image.pollinations.ai/prompt/GTA%20VI%20screenshot%20miami?width=800&height=600&nologo=true".to_string(),
            date: "2023-10-24".to_string(),
            url: None,
            rating: None,
            needs_image: false,
        },
        Article {
            id: "2".to_string(),
            title: "مراجعة Spider-Man 2: تحفة فنية تستحق التجربة".to_string(),
            summary: "تستمر إنسومنياك في إبهار اللاعبين بتقديم تجربة قصصية وبصرية لا مثيل لها في أحدث إصداراتها.".to_string(),
            category: Category::Reviews,
            source: "Saudi Gamer".to_string(),
            image_url: "https://image.pollinations.ai/prompt/Spiderman%202%20ps5%20gameplay?width=800&height=600&nologo=true".to_string(),
            date: "2023-10-22".to_string(),
            url: None,
            rating: Some(9.5),
            needs_image: false,
        },
        Article {
            id: "3".to_string(),
            title: "نينتندو تعلن عن جهازها الجديد في مؤتمر سري".to_string(),
            summary: "شائعات قوية تشير إلى أن الجهاز القادم سيتم الكشف عنه رسمياً أوائل العام القادم مع دعم لتقنيات 4K.".to_string(),
            category: Category::Nintendo,
            source: "TrueGaming".to_string(),
            image_url: "https://image.pollinations.ai/prompt/Nintendo%20switch%202%20concept?width=800&height=600&nologo=true".to_string(),
            date: "2023-10-21".to_string(),
            url: None,
            rating: None,
            needs_image: false,
        },
    ]
}

/// Games listed in the community ratings widget.
pub fn demo_games() -> Vec<CommunityGame> {
    let game = |id: &str, title: &str, prompt: &str, score: f64, votes: u64| CommunityGame {
        id: id.to_string(),
        title: title.to_string(),
        cover_url: format!(
            "https://image.pollinations.ai/prompt/{}?width=200&height=200&nologo=true",
            prompt
        ),
        community_score: score,
        total_votes: votes,
        user_rating: None,
    };

    vec![
        game("1", "Elden Ring", "Elden%20Ring%20cover%20art%20minimal", 96.0, 12_500),
        game("2", "Baldur's Gate 3", "Baldurs%20Gate%203%20logo%20art", 98.0, 15_420),
        game("3", "EA FC 24", "soccer%20game%20cover%20art", 72.0, 8_900),
        game("4", "Cyberpunk 2077", "cyberpunk%202077%20character", 88.0, 11_200),
    ]
}
