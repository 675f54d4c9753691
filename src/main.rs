//! Stock Analyzer
//!
//! Analyzes one instrument, ranks a basket and registers a standing alert.

use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use stock_analyzer::config::{get_environment, AnalyzerConfig};
use stock_analyzer::core::StockAnalyzer;
use stock_analyzer::indicators::requests_for;
use stock_analyzer::logging;
use stock_analyzer::models::{Analysis, RankingMethod, SignalAction};
use stock_analyzer::report::{ReportRow, ReportView};
use stock_analyzer::services::{StockUniverse, YahooMarketDataProvider};
use tracing::{info, warn};

const DEFAULT_BASKET: [&str; 3] = ["AAPL", "MSFT", "GOOGL"];
const UNIVERSE_SAMPLE_SIZE: usize = 20;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let env = get_environment();
    info!("Starting Stock Analyzer");
    info!(environment = %env, "Environment");

    let config = AnalyzerConfig::from_env();
    config.validate()?;

    let provider = Arc::new(YahooMarketDataProvider::new(&config.data_source)?);
    let analyzer = StockAnalyzer::new(provider, config);

    let analysis = analyzer.analyze_default("AAPL").await?;
    print_analysis(&analysis);

    let universe = match env::var("STOCK_UNIVERSE_PATH") {
        Ok(path) => match StockUniverse::load(&path) {
            Ok(universe) => {
                info!(path = %path, instruments = universe.len(), "Loaded stock universe");
                Some(universe)
            }
            Err(e) => {
                warn!(
                    path = %path,
                    error = %e,
                    "Failed to load stock universe, using default basket"
                );
                None
            }
        },
        Err(_) => None,
    };

    let basket: Vec<String> = match &universe {
        Some(universe) if !universe.is_empty() => universe.top(UNIVERSE_SAMPLE_SIZE),
        _ => DEFAULT_BASKET.iter().map(|s| s.to_string()).collect(),
    };

    let requests = requests_for(&analyzer.config().analysis.indicators);
    let result = analyzer
        .compare(&basket[..], RankingMethod::Momentum, &requests)
        .await;

    println!();
    println!("Ranking ({}):", result.ranking_method);
    for entry in &result.ranked_stocks {
        println!(
            "  {:>2}. {:<10} score {:>7.2}  {}",
            entry.rank, entry.ticker, entry.score, entry.analysis.signal.action
        );
    }
    for failure in &result.failures {
        println!("  --  {:<10} {}", failure.ticker, failure.error);
    }

    let report = ReportView::from_basket(&result, universe.as_ref());
    println!();
    println!(
        "Overview: {} analyzed, BUY {} ({:.1}%), SELL {} ({:.1}%), HOLD {}",
        report.overview.total,
        report.overview.buy,
        report.overview.percentage(SignalAction::Buy),
        report.overview.sell,
        report.overview.percentage(SignalAction::Sell),
        report.overview.hold,
    );
    print_column("BUY", &report.buy);
    print_column("SELL", &report.sell);

    let alert = analyzer.monitor("TSLA", "RSI < 30", "notify");
    println!();
    println!("{}", serde_json::to_string_pretty(&alert)?);

    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    println!("{} @ {:.2} ({})", analysis.ticker, analysis.current_price, analysis.period);
    for (name, outcome) in analysis.indicators.iter() {
        match outcome.result() {
            Some(result) => println!("  {}: {}", name, result.interpretation()),
            None => println!("  {}: unavailable", name),
        }
    }
    println!(
        "  Signal: {} ({}, score {})",
        analysis.signal.action, analysis.signal.confidence, analysis.signal.score
    );
    for reason in &analysis.signal.reasoning {
        println!("    - {}", reason);
    }
}

fn print_column(title: &str, rows: &[ReportRow]) {
    println!();
    println!("{}:", title);
    for row in rows {
        let rsi = row
            .rsi
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string());
        let macd = row.macd_signal.map(|s| s.as_str()).unwrap_or("-");
        println!(
            "  {:>2}. {:<10} {:<20} {:>10.2}  RSI {:>5}  MACD {:<8} {}",
            row.position, row.ticker, row.name, row.current_price, rsi, macd, row.confidence
        );
    }
}
