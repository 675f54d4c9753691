//! Projection of a ranked basket into the rows a presentation layer reads.
//!
//! Only ticker, price, score, RSI value, MACD signal and action are exposed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::analysis::{BasketResult, RankedEntry, RankingMethod};
use crate::models::indicators::MacdSignal;
use crate::models::signal::{SignalAction, SignalConfidence};
use crate::services::universe::{StockUniverse, UNKNOWN_NAME};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Position within the row's column, 1-based.
    pub position: usize,
    /// Rank within the whole basket.
    pub rank: usize,
    pub ticker: String,
    pub name: String,
    pub current_price: f64,
    pub score: f64,
    pub rsi: Option<f64>,
    pub macd_signal: Option<MacdSignal>,
    pub action: SignalAction,
    pub confidence: SignalConfidence,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarketOverview {
    pub total: usize,
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
}

impl MarketOverview {
    pub fn from_entries(entries: &[RankedEntry]) -> Self {
        entries.iter().fold(
            Self {
                total: entries.len(),
                ..Self::default()
            },
            |mut overview, entry| {
                match entry.analysis.signal.action {
                    SignalAction::Buy => overview.buy += 1,
                    SignalAction::Sell => overview.sell += 1,
                    SignalAction::Hold => overview.hold += 1,
                }
                overview
            },
        )
    }

    /// Share of the basket with `action`, in percent. Zero for an empty basket.
    pub fn percentage(&self, action: SignalAction) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = match action {
            SignalAction::Buy => self.buy,
            SignalAction::Sell => self.sell,
            SignalAction::Hold => self.hold,
        };
        count as f64 / self.total as f64 * 100.0
    }
}

/// Two-column view: SELL on one side, BUY on the other, each in rank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub sell: Vec<ReportRow>,
    pub buy: Vec<ReportRow>,
    pub high_confidence_buy: Vec<ReportRow>,
    pub overview: MarketOverview,
    pub ranking_method: RankingMethod,
    pub generated_at: DateTime<Utc>,
}

impl ReportView {
    pub fn from_basket(basket: &BasketResult, universe: Option<&StockUniverse>) -> Self {
        let rows_for = |action: SignalAction| -> Vec<ReportRow> {
            basket
                .ranked_stocks
                .iter()
                .filter(|entry| entry.analysis.signal.action == action)
                .enumerate()
                .map(|(idx, entry)| report_row(idx + 1, entry, universe))
                .collect()
        };

        let buy = rows_for(SignalAction::Buy);
        let high_confidence_buy = buy
            .iter()
            .filter(|row| row.confidence == SignalConfidence::High)
            .cloned()
            .collect();

        Self {
            sell: rows_for(SignalAction::Sell),
            buy,
            high_confidence_buy,
            overview: MarketOverview::from_entries(&basket.ranked_stocks),
            ranking_method: basket.ranking_method,
            generated_at: Utc::now(),
        }
    }
}

fn report_row(position: usize, entry: &RankedEntry, universe: Option<&StockUniverse>) -> ReportRow {
    let analysis = &entry.analysis;
    let name = universe
        .map(|u| u.name(&entry.ticker))
        .unwrap_or(UNKNOWN_NAME)
        .to_string();

    ReportRow {
        position,
        rank: entry.rank,
        ticker: entry.ticker.clone(),
        name,
        current_price: analysis.current_price,
        score: entry.score,
        rsi: analysis.indicators.rsi().map(|r| r.value),
        macd_signal: analysis.indicators.macd().map(|m| m.signal),
        action: analysis.signal.action,
        confidence: analysis.signal.confidence,
    }
}
