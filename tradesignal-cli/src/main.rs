//! tradesignal CLI: score, replay and batch commands over local data files.
//!
//! Commands:
//! - `score`: evaluate one symbol at its latest bar (or `--as-of` a date)
//! - `replay`: day-by-day decisions as JSON lines
//! - `batch`: score many symbols in parallel, print a table
//! - `check-config`: validate a strategy file and print its fingerprint

mod logging;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tradesignal_core::domain::Bar;
use tradesignal_core::{evaluate, Evaluation};
use tradesignal_runner::{
    replay, score_symbols, write_jsonl, CsvPriceHistory, JsonSentimentFile, NoSentiment,
    PriceHistory, ReplaySummary, SentimentSource, StrategyDefinition,
};

#[derive(Parser)]
#[command(
    name = "tradesignal",
    about = "tradesignal: deterministic technical + sentiment signal scoring"
)]
struct Cli {
    /// Emit logs as JSON (stderr).
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one symbol and print technical, sentiment and combined results.
    Score {
        /// Strategy TOML file.
        #[arg(long)]
        strategy: PathBuf,

        /// Directory holding <SYMBOL>.csv price files.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        #[arg(long)]
        symbol: String,

        /// Sentiment JSON file. Without it the sentiment category is excluded.
        #[arg(long)]
        sentiment: Option<PathBuf>,

        /// Score as of this date (YYYY-MM-DD), ignoring later bars.
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Print the full evaluation as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Replay a strategy bar by bar and write one JSON decision per line.
    Replay {
        #[arg(long)]
        strategy: PathBuf,

        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        #[arg(long)]
        symbol: String,

        #[arg(long)]
        sentiment: Option<PathBuf>,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Score many symbols in parallel at their latest bar.
    Batch {
        #[arg(long)]
        strategy: PathBuf,

        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        #[arg(long)]
        sentiment: Option<PathBuf>,

        /// Symbols to score. Defaults to every CSV in the data directory.
        symbols: Vec<String>,
    },
    /// Validate a strategy file and print its fingerprint.
    CheckConfig {
        #[arg(long)]
        strategy: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json);

    match cli.command {
        Commands::Score {
            strategy,
            data_dir,
            symbol,
            sentiment,
            as_of,
            json,
        } => run_score(&strategy, &data_dir, &symbol, sentiment.as_deref(), as_of, json),
        Commands::Replay {
            strategy,
            data_dir,
            symbol,
            sentiment,
            output,
        } => run_replay(&strategy, &data_dir, &symbol, sentiment.as_deref(), output.as_deref()),
        Commands::Batch {
            strategy,
            data_dir,
            sentiment,
            symbols,
        } => run_batch(&strategy, &data_dir, sentiment.as_deref(), symbols),
        Commands::CheckConfig { strategy } => run_check_config(&strategy),
    }
}

fn load_strategy(path: &Path) -> Result<StrategyDefinition> {
    StrategyDefinition::from_file(path)
        .with_context(|| format!("loading strategy {}", path.display()))
}

fn load_sentiment(path: Option<&Path>) -> Result<Box<dyn SentimentSource>> {
    match path {
        Some(p) => {
            let file = JsonSentimentFile::from_path(p)
                .with_context(|| format!("loading sentiment {}", p.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(NoSentiment)),
    }
}

fn run_score(
    strategy_path: &Path,
    data_dir: &Path,
    symbol: &str,
    sentiment_path: Option<&Path>,
    as_of: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let strategy = load_strategy(strategy_path)?;
    let sentiment = load_sentiment(sentiment_path)?;
    let mut bars = CsvPriceHistory::new(data_dir).bars(symbol)?;
    if let Some(date) = as_of {
        bars.retain(|b| b.date <= date);
        if bars.is_empty() {
            bail!("no bars for {symbol} on or before {date}");
        }
    }

    let last = bars.last();
    let news = match last {
        Some(bar) => sentiment.sentiment(symbol, bar.date)?,
        None => None,
    };
    let eval = evaluate(&bars, news.as_ref(), &[], &strategy.scoring);

    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
    } else {
        print_evaluation(symbol, last, &strategy, &eval);
    }
    Ok(())
}

fn run_replay(
    strategy_path: &Path,
    data_dir: &Path,
    symbol: &str,
    sentiment_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let strategy = load_strategy(strategy_path)?;
    let sentiment = load_sentiment(sentiment_path)?;
    let bars = CsvPriceHistory::new(data_dir).bars(symbol)?;

    let records = replay(symbol, &bars, sentiment.as_ref(), &strategy)?;
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            write_jsonl(&records, BufWriter::new(file))?;
            println!("Wrote {} decisions to {}", records.len(), path.display());
        }
        None => write_jsonl(&records, io::stdout().lock())?,
    }

    let summary = ReplaySummary::from_records(&records);
    eprintln!(
        "{symbol}: {} bars, {} buy / {} sell / {} hold",
        summary.total(),
        summary.buys,
        summary.sells,
        summary.holds
    );
    Ok(())
}

fn run_batch(
    strategy_path: &Path,
    data_dir: &Path,
    sentiment_path: Option<&Path>,
    symbols: Vec<String>,
) -> Result<()> {
    let strategy = load_strategy(strategy_path)?;
    let sentiment = load_sentiment(sentiment_path)?;
    let prices = CsvPriceHistory::new(data_dir);
    let symbols = if symbols.is_empty() {
        prices.symbols()?
    } else {
        symbols
    };
    if symbols.is_empty() {
        bail!("no symbols given and no CSV files in {}", data_dir.display());
    }

    let report = score_symbols(&symbols, &prices, sentiment.as_ref(), &strategy);

    println!(
        "{:<8} {:<12} {:>10} {:<6} {:>7} {:>7} {:>7}",
        "Symbol", "Date", "Close", "Action", "Score", "Tech", "News"
    );
    println!("{}", "-".repeat(63));
    for s in &report.scores {
        let date = s.date.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        let close = s.close.map(|c| format!("{c:.2}")).unwrap_or_else(|| "-".into());
        let eval = &s.evaluation;
        println!(
            "{:<8} {:<12} {:>10} {:<6} {:>7.1} {:>7.1} {:>7.1}",
            s.symbol,
            date,
            close,
            eval.combined.action,
            eval.combined.score,
            eval.technical.score,
            eval.sentiment.score
        );
    }
    for f in &report.failures {
        eprintln!("Error for {}: {}", f.symbol, f.error);
    }
    Ok(())
}

fn run_check_config(strategy_path: &Path) -> Result<()> {
    let strategy = load_strategy(strategy_path)?;
    let signal = &strategy.scoring.signal;
    let weights = &strategy.scoring.weights;

    println!("Strategy:    {}", strategy.name);
    println!("Fingerprint: {}", strategy.fingerprint());
    println!(
        "RSI:         period {} ({} / {})",
        signal.rsi_period, signal.rsi_oversold, signal.rsi_overbought
    );
    match signal.sma_trend_period {
        Some(trend) => println!(
            "SMA:         {} / {} (trend {trend})",
            signal.sma_short_period, signal.sma_long_period
        ),
        None => println!(
            "SMA:         {} / {}",
            signal.sma_short_period, signal.sma_long_period
        ),
    }
    println!(
        "News:        buy >= {} / sell <= {}",
        signal.news_score_threshold,
        signal.news_sell_threshold()
    );
    println!(
        "Weights:     technical {} / sentiment {} / fundamental {}",
        weights.technical, weights.sentiment, weights.fundamental
    );
    Ok(())
}

fn print_evaluation(symbol: &str, last: Option<&Bar>, strategy: &StrategyDefinition, eval: &Evaluation) {
    println!();
    println!("=== {symbol} ===");
    match last {
        Some(bar) => println!("As of:     {} (close {:.2})", bar.date, bar.close),
        None => println!("As of:     no bars"),
    }
    println!("Strategy:  {}", strategy.name);
    println!();

    let t = &eval.technical;
    println!("--- Technical ---");
    println!(
        "{} (score {:.1}, {} buy / {} sell)",
        t.action, t.score, t.buy_signals, t.sell_signals
    );
    if let Some(rsi) = t.snapshot.rsi {
        println!("  RSI {rsi:.1}");
    }
    for reason in &t.reasons {
        println!("  - {reason}");
    }
    println!();

    let s = &eval.sentiment;
    println!("--- Sentiment ---");
    println!("{} (score {:.1})", s.action, s.score);
    for reason in &s.reasons {
        println!("  - {reason}");
    }
    println!();

    let c = &eval.combined;
    println!("--- Combined ---");
    println!("{} (score {:.1})", c.action.as_str().to_uppercase(), c.score);
    for reason in &c.reasons {
        println!("  - {reason}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_score_with_as_of() {
        let cli = Cli::try_parse_from([
            "tradesignal",
            "--log-json",
            "score",
            "--strategy",
            "swing.toml",
            "--symbol",
            "AAPL",
            "--as-of",
            "2024-03-01",
        ])
        .unwrap();
        assert!(cli.log_json);
        match cli.command {
            Commands::Score { symbol, as_of, .. } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(as_of, NaiveDate::from_ymd_opt(2024, 3, 1));
            }
            _ => panic!("expected score"),
        }
    }
}
