//! QuantBot CLI — backtest, optimize, and signal commands.
//!
//! Commands:
//! - `backtest` — replay a strategy over a CSV candle file, print the result JSON
//! - `optimize` — grid-search ema-rsi parameters over the same data
//! - `signal` — print the latest trend signal for a candle file
//!
//! Candle CSVs carry a `timestamp,open,high,low,close,volume` header with
//! unix-second timestamps. Strategy parameters load from a TOML file; any
//! field left out keeps its default.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use quantbot_backtest::{grid_search, run_backtest, BacktestConfig, ParamGrid};
use quantbot_core::data::CsvDataSource;
use quantbot_core::domain::Market;
use quantbot_core::strategy::{detect_trend, StrategyParams};

#[derive(Parser)]
#[command(name = "quantbot", about = "QuantBot CLI — strategy backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a strategy over historical candles and print the result.
    Backtest {
        /// Path to the candle CSV file.
        #[arg(long)]
        data: PathBuf,

        /// Symbol the file covers (e.g. BTC-USDT).
        #[arg(long)]
        symbol: String,

        /// Market the symbol trades on.
        #[arg(long, value_enum, default_value = "crypto")]
        market: MarketArg,

        /// Strategy parameter TOML file. Defaults apply when omitted.
        #[arg(long)]
        params: Option<PathBuf>,

        /// First day of the simulated range (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the simulated range (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,

        /// Starting capital.
        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,

        /// Write the result JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Grid-search ema-rsi parameters and print the best run.
    Optimize {
        /// Path to the candle CSV file.
        #[arg(long)]
        data: PathBuf,

        /// Symbol the file covers.
        #[arg(long)]
        symbol: String,

        /// Market the symbol trades on.
        #[arg(long, value_enum, default_value = "crypto")]
        market: MarketArg,

        /// First day of the simulated range (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the simulated range (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,

        /// Starting capital.
        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,

        /// Run grid cells sequentially instead of on the thread pool.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Write the best result JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the latest trend signal for a candle file.
    Signal {
        /// Path to the candle CSV file.
        #[arg(long)]
        data: PathBuf,

        /// Symbol the file covers.
        #[arg(long)]
        symbol: String,

        /// Strategy parameter TOML file. Defaults apply when omitted.
        #[arg(long)]
        params: Option<PathBuf>,
    },
}

/// Market choice on the command line.
#[derive(Clone, Copy, clap::ValueEnum)]
enum MarketArg {
    Crypto,
    Forex,
}

impl From<MarketArg> for Market {
    fn from(arg: MarketArg) -> Self {
        match arg {
            MarketArg::Crypto => Market::Crypto,
            MarketArg::Forex => Market::Forex,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Backtest {
            data,
            symbol,
            market,
            params,
            start,
            end,
            capital,
            output,
        } => {
            let source = CsvDataSource::from_path(&symbol, &data)
                .with_context(|| format!("loading candles from {}", data.display()))?;
            let config = BacktestConfig {
                market: market.into(),
                symbol,
                params: load_params(params.as_deref())?,
                start_date: start,
                end_date: end,
                initial_capital: capital,
            };

            let result = run_backtest(source.all_candles(), &config);
            emit_json(&result, output.as_deref())
        }
        Commands::Optimize {
            data,
            symbol,
            market,
            start,
            end,
            capital,
            sequential,
            output,
        } => {
            let source = CsvDataSource::from_path(&symbol, &data)
                .with_context(|| format!("loading candles from {}", data.display()))?;
            let base = BacktestConfig {
                market: market.into(),
                symbol,
                params: StrategyParams::default(),
                start_date: start,
                end_date: end,
                initial_capital: capital,
            };

            let outcome = grid_search(
                source.all_candles(),
                &base,
                &ParamGrid::default(),
                !sequential,
            );
            let best = outcome
                .best()
                .context("grid search produced no results")?;
            eprintln!(
                "evaluated {} combinations; best score {:.4}",
                outcome.len(),
                best.score
            );
            emit_json(&best.result, output.as_deref())
        }
        Commands::Signal {
            data,
            symbol,
            params,
        } => {
            let source = CsvDataSource::from_path(&symbol, &data)
                .with_context(|| format!("loading candles from {}", data.display()))?;
            let params = load_params(params.as_deref())?;
            let signal = detect_trend(source.all_candles(), &params);
            println!("{}", serde_json::to_string(&signal)?);
            Ok(())
        }
    }
}

/// Load strategy parameters from TOML, or fall back to the defaults.
fn load_params(path: Option<&std::path::Path>) -> Result<StrategyParams> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading params file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("parsing params file {}", path.display()))
        }
        None => Ok(StrategyParams::default()),
    }
}

/// Pretty-print a result to stdout, or write it to `output`.
fn emit_json(
    result: &quantbot_backtest::BacktestResult,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
