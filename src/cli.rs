//! CLI definition and dispatch.
//!
//! The engine is a library; everything the driver owns lives here:
//! argument parsing, configuration, strategy construction, universe
//! filtering policy, and output formatting.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig, BacktestReport, DEFAULT_WORKERS};
use crate::domain::error::QuantscanError;
use crate::domain::metrics::ProfitBuckets;
use crate::domain::strategy::{FirstLimitUpParams, Strategy, TrendMomentumParams};
use crate::domain::universe::{filter_universe, standard_exclusions, SymbolInfo};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "quantscan", about = "Rule-based trading-signal backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over the symbol universe
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the trade ledger as CSV
        #[arg(long)]
        ledger: Option<PathBuf>,
        /// Write the full report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Restrict the run to a single symbol
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        workers: Option<usize>,
        /// Skip the conventional universe exclusions
        #[arg(long)]
        no_exclusions: bool,
    },
    /// List instruments in the registry
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the stored data range for a symbol
    Info {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            ledger,
            output,
            symbol,
            workers,
            no_exclusions,
        } => run_backtest_command(
            &config,
            ledger.as_deref(),
            output.as_deref(),
            symbol.as_deref(),
            workers,
            no_exclusions,
        ),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { symbol, config } => run_info(&symbol, &config),
    }
}

pub fn load_config(path: &std::path::Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = QuantscanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build the strategy from the `[strategy]` section; every threshold falls
/// back to the variant's default.
pub fn build_strategy(config: &dyn ConfigPort) -> Result<Strategy, QuantscanError> {
    let kind = config
        .get_string("strategy", "kind")
        .unwrap_or_else(|| "trend-momentum".to_string());

    match kind.as_str() {
        "trend-momentum" => {
            let d = TrendMomentumParams::default();
            Ok(Strategy::TrendMomentum(TrendMomentumParams {
                volume_surge: config.get_double("strategy", "volume_surge", d.volume_surge),
                max_pct_chg: config.get_double("strategy", "max_pct_chg", d.max_pct_chg),
                stop_loss: config.get_double("strategy", "stop_loss", d.stop_loss),
                take_profit: config.get_double("strategy", "take_profit", d.take_profit),
                max_drawdown: config.get_double("strategy", "max_drawdown", d.max_drawdown),
            }))
        }
        "first-limit-up" => {
            let d = FirstLimitUpParams::default();
            Ok(Strategy::FirstLimitUp(FirstLimitUpParams {
                limit_threshold: config.get_double("strategy", "limit_threshold", d.limit_threshold),
                min_gap_pct: config.get_double("strategy", "min_gap_pct", d.min_gap_pct),
                max_gap_pct: config.get_double("strategy", "max_gap_pct", d.max_gap_pct),
            }))
        }
        other => Err(QuantscanError::ConfigInvalid {
            section: "strategy".into(),
            key: "kind".into(),
            reason: format!("unknown strategy kind '{other}'"),
        }),
    }
}

pub fn build_backtest_config(
    config: &dyn ConfigPort,
    workers_override: Option<usize>,
) -> Result<BacktestConfig, QuantscanError> {
    let strategy = build_strategy(config)?;
    let workers = workers_override
        .unwrap_or_else(|| config.get_int("backtest", "workers", DEFAULT_WORKERS as i64) as usize);

    Ok(BacktestConfig::new(strategy).with_workers(workers.max(1)))
}

fn run_backtest_command(
    config_path: &std::path::Path,
    ledger_path: Option<&std::path::Path>,
    output_path: Option<&std::path::Path>,
    symbol_override: Option<&str>,
    workers_override: Option<usize>,
    no_exclusions: bool,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let bt_config = match build_backtest_config(&adapter, workers_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    #[cfg(feature = "sqlite")]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;
        use crate::ports::data_port::DataPort;

        let data_port = match SqliteAdapter::from_config(&adapter) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let universe = match data_port.list_symbols() {
            Ok(symbols) => symbols,
            Err(e) => {
                // The one fatal failure: without a universe there is no run.
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let universe = resolve_universe(universe, symbol_override, no_exclusions);
        if universe.is_empty() {
            eprintln!("error: no symbols selected");
            return ExitCode::from(5);
        }

        let cancel = AtomicBool::new(false);
        let report = run_backtest(&data_port, &universe, &bt_config, &cancel);

        print_summary(&report);

        if let Some(path) = ledger_path {
            if let Err(e) = CsvReportAdapter.write_report(&report, path) {
                eprintln!("error: {e}");
                return (&e).into();
            }
            eprintln!("Trade ledger written to {}", path.display());
        }

        if let Some(path) = output_path {
            if let Err(e) = JsonReportAdapter.write_report(&report, path) {
                eprintln!("error: {e}");
                return (&e).into();
            }
            eprintln!("Report written to {}", path.display());
        }

        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "sqlite"))]
    {
        let _ = (bt_config, ledger_path, output_path, symbol_override, no_exclusions);
        eprintln!("error: sqlite feature is required for backtest");
        ExitCode::from(1)
    }
}

/// Apply the driver's universe policy: optional single-symbol restriction,
/// then the conventional exclusions unless disabled.
pub fn resolve_universe(
    universe: Vec<SymbolInfo>,
    symbol_override: Option<&str>,
    no_exclusions: bool,
) -> Vec<SymbolInfo> {
    let universe = match symbol_override {
        Some(symbol) => universe
            .into_iter()
            .filter(|s| s.symbol == symbol)
            .collect(),
        None => universe,
    };

    if no_exclusions {
        universe
    } else {
        filter_universe(universe, standard_exclusions)
    }
}

fn format_buckets(buckets: &ProfitBuckets) -> String {
    format!(
        "    0%~3%: {}   3%~5%: {}   5%~10%: {}   >10%: {}\n   -0%~-3%: {}  -3%~-5%: {}  -5%~-10%: {}  <-10%: {}",
        buckets.gain_0_3,
        buckets.gain_3_5,
        buckets.gain_5_10,
        buckets.gain_10_plus,
        buckets.loss_0_3,
        buckets.loss_3_5,
        buckets.loss_5_10,
        buckets.loss_10_plus,
    )
}

fn print_summary(report: &BacktestReport) {
    for result in &report.symbols {
        if result.total_trades == 0 {
            continue;
        }
        println!(
            "{} ({}): {} trades, win rate {:.2}%, ratio {}",
            result.symbol,
            result.name,
            result.total_trades,
            result.win_rate * 100.0,
            result.profit_loss_ratio,
        );
        println!("{}", format_buckets(&result.buckets));
    }

    println!("\n=== Overall ===");
    println!("Total trades:      {}", report.overall.total_trades);
    println!("Win rate:          {:.2}%", report.overall.win_rate * 100.0);
    println!("Profit/loss ratio: {}", report.overall.profit_loss_ratio);
    println!("Profit buckets:");
    println!("{}", format_buckets(&report.overall.buckets));
    println!(
        "Symbols: {} completed, {} skipped",
        report.overall.symbols_completed, report.overall.symbols_failed
    );
}

fn run_list_symbols(config_path: &std::path::Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    #[cfg(feature = "sqlite")]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;
        use crate::ports::data_port::DataPort;

        let adapter = match SqliteAdapter::from_config(&config) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let symbols = match adapter.list_symbols() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        if symbols.is_empty() {
            eprintln!("No instruments found");
        } else {
            for info in &symbols {
                println!("{}\t{}", info.symbol, info.name);
            }
            eprintln!("{} instruments", symbols.len());
        }
        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "sqlite"))]
    {
        let _ = config;
        eprintln!("error: sqlite feature is required for list-symbols");
        ExitCode::from(1)
    }
}

fn run_info(symbol: &str, config_path: &std::path::Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    #[cfg(feature = "sqlite")]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;
        use crate::ports::data_port::DataPort;

        let adapter = match SqliteAdapter::from_config(&config) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        match adapter.get_data_range(symbol) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} bars, {} to {}", symbol, count, min_date, max_date);
                ExitCode::SUCCESS
            }
            Ok(None) => {
                eprintln!("{}: no data found", symbol);
                ExitCode::from(5)
            }
            Err(e) => {
                eprintln!("error querying {}: {}", symbol, e);
                (&e).into()
            }
        }
    }

    #[cfg(not(feature = "sqlite"))]
    {
        let _ = (symbol, config);
        eprintln!("error: sqlite feature is required for info");
        ExitCode::from(1)
    }
}
