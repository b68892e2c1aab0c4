//! Community voting widget model.

use serde::{Deserialize, Serialize};

use super::round_tenths;

/// Score change applied by a single vote.
const VOTE_NUDGE: f64 = 0.1;

/// A game shown in the community ratings widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommunityGame {
    pub id: String,
    pub title: String,
    pub cover_url: String,
    /// Cosmetic popularity percentage, 0-100
    pub community_score: f64,
    pub total_votes: u64,
    /// Last vote cast, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
}

impl CommunityGame {
    /// Apply one star vote. Callers validate `stars` is within 1..=5.
    pub fn record_vote(&mut self, stars: u8) {
        let impact = if stars >= 4 {
            VOTE_NUDGE
        } else if stars <= 2 {
            -VOTE_NUDGE
        } else {
            0.0
        };

        self.total_votes += 1;
        self.community_score = round_tenths((self.community_score + impact).clamp(0.0, 100.0));
        self.user_rating = Some(stars);
    }
}

/// Request body for casting a vote.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub stars: u8,
}
