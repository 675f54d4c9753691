//! Basket ranking

use tracing::debug;

use crate::models::analysis::{Analysis, RankedEntry, RankingMethod};
use crate::ranking::scoring;

pub struct RankingEngine {
    method: RankingMethod,
}

impl RankingEngine {
    pub fn new(method: RankingMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> RankingMethod {
        self.method
    }

    /// Score every analysis independently, then sort and assign ranks.
    pub fn rank(&self, analyses: Vec<Analysis>) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = analyses
            .into_iter()
            .map(|analysis| {
                let score = scoring::score(&analysis, self.method);
                debug!(
                    ticker = %analysis.ticker,
                    method = %self.method,
                    score,
                    "scored instrument"
                );
                RankedEntry {
                    ticker: analysis.ticker.clone(),
                    analysis,
                    score,
                    rank: 0,
                }
            })
            .collect();
        rerank(&mut entries);
        entries
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(RankingMethod::default())
    }
}

/// Sort descending by score and renumber ranks from 1.
///
/// The sort is stable: equal scores keep their current relative order, so a
/// freshly scored basket breaks ties by input order. Scores are never touched.
pub fn rerank(entries: &mut [RankedEntry]) {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }
}
