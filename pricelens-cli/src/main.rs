//! PriceLens CLI: fetch, export, grade and interactive session commands.
//!
//! Commands:
//! - `fetch`: fetch a daily series and print the table and chart summary
//! - `export`: fetch, preview the last rows and write CSV after confirmation
//! - `grade`: five subject marks to a grade report
//! - `suggest`: company name to ticker symbol
//! - `session`: interactive shell holding one cached series

mod render;
mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pricelens_core::data::{DataProvider, SyntheticProvider, SystemClock, YahooProvider};
use pricelens_core::grade::{parse_marks, GradeReport};
use pricelens_core::{Viewer, ViewerConfig, ViewerError};

#[derive(Parser)]
#[command(name = "pricelens", about = "PriceLens: daily stock price viewer")]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Offline mode: use deterministic synthetic prices instead of Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    /// Debug-level logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a daily series and print it.
    Fetch {
        /// Ticker symbol (e.g., AAPL).
        symbol: String,

        /// Lookback in calendar days. Defaults to the configured lookback.
        #[arg(long)]
        days: Option<i64>,

        /// Include the SMA curve in the chart.
        #[arg(long, default_value_t = false)]
        sma: bool,

        /// Print the chart spec as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch a series and export it to CSV.
    Export {
        /// Ticker symbol (e.g., AAPL).
        symbol: String,

        /// Destination CSV path.
        #[arg(long)]
        out: PathBuf,

        /// Lookback in calendar days. Defaults to the configured lookback.
        #[arg(long)]
        days: Option<i64>,

        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Compute a grade report from five subject marks.
    Grade {
        /// Marks for Math, Physics, Chemistry, English, Computer.
        #[arg(required = true, num_args = 5, allow_hyphen_values = true)]
        marks: Vec<String>,

        /// Also write the report to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Suggest a ticker symbol for a company name.
    Suggest {
        /// Company name (e.g., Apple).
        name: String,
    },
    /// Interactive session.
    Session,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Fetch {
            symbol,
            days,
            sma,
            json,
        } => run_fetch(&config, cli.offline, &symbol, days, sma, json),
        Commands::Export {
            symbol,
            out,
            days,
            yes,
        } => run_export(&config, cli.offline, &symbol, &out, days, yes),
        Commands::Grade { marks, out } => run_grade(&marks, out.as_deref()),
        Commands::Suggest { name } => run_suggest(&config, cli.offline, &name),
        Commands::Session => run_session(&config, cli.offline),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "pricelens=debug,pricelens_core=debug"
    } else {
        "pricelens=info,pricelens_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let config = match path {
        Some(p) => ViewerConfig::from_file(p)
            .with_context(|| format!("loading config from {}", p.display()))?,
        None => ViewerConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn make_provider(config: &ViewerConfig, offline: bool) -> Result<Box<dyn DataProvider>> {
    if offline {
        tracing::info!("offline mode: using synthetic prices");
        Ok(Box::new(SyntheticProvider::default()))
    } else {
        Ok(Box::new(YahooProvider::new(&config.provider)?))
    }
}

/// Print a pipeline error the way the dialogs would and exit non-zero.
fn fail(err: &ViewerError) -> ! {
    eprintln!("{}", render::error(err));
    std::process::exit(1);
}

fn run_fetch(
    config: &ViewerConfig,
    offline: bool,
    symbol: &str,
    days: Option<i64>,
    sma: bool,
    json: bool,
) -> Result<()> {
    let provider = make_provider(config, offline)?;
    let clock = SystemClock;
    let mut viewer = Viewer::new(provider.as_ref(), &clock, config)?;
    let days = days.unwrap_or(i64::from(config.fetch.default_lookback_days));

    if let Err(e) = viewer.fetch(symbol, days) {
        fail(&e);
    }
    viewer.set_signal_visible(sma);

    let (Some(rows), Some(chart)) = (viewer.table(), viewer.chart()) else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        print!("{}", render::table(&rows));
        println!();
        print!("{}", render::chart(&chart));
    }
    Ok(())
}

fn run_export(
    config: &ViewerConfig,
    offline: bool,
    symbol: &str,
    out: &Path,
    days: Option<i64>,
    yes: bool,
) -> Result<()> {
    let provider = make_provider(config, offline)?;
    let clock = SystemClock;
    let mut viewer = Viewer::new(provider.as_ref(), &clock, config)?;
    let days = days.unwrap_or(i64::from(config.fetch.default_lookback_days));

    if let Err(e) = viewer.fetch(symbol, days) {
        fail(&e);
    }
    let pending = match viewer.prepare_export() {
        Ok(p) => p,
        Err(e) => fail(&e),
    };

    println!("Export the following data?");
    print!("{}", render::preview(pending.preview()));

    if !yes {
        print!("Write {} rows to {}? [y/N] ", pending.row_count(), out.display());
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Export cancelled.");
            return Ok(());
        }
    }

    match pending.confirm_to_path(out) {
        Ok(rows) => println!("Exported {rows} rows to {}", out.display()),
        Err(e) => fail(&e),
    }
    Ok(())
}

fn run_grade(marks: &[String], out: Option<&Path>) -> Result<()> {
    let marks = match parse_marks(marks) {
        Ok(m) => m,
        Err(e) => fail(&e),
    };
    let report = GradeReport::calculate(marks);
    report.write_report(io::stdout().lock())?;

    if let Some(path) = out {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating report file {}", path.display()))?;
        report.write_report(io::BufWriter::new(file))?;
        println!("Report saved to: {}", path.display());
    }
    Ok(())
}

fn run_suggest(config: &ViewerConfig, offline: bool, name: &str) -> Result<()> {
    let provider = make_provider(config, offline)?;
    let clock = SystemClock;
    let viewer = Viewer::new(provider.as_ref(), &clock, config)?;
    match viewer.suggest(name) {
        Some(sym) => println!("{name} -> {sym}"),
        None => println!("no suggestion for '{name}'"),
    }
    Ok(())
}

fn run_session(config: &ViewerConfig, offline: bool) -> Result<()> {
    let provider = make_provider(config, offline)?;
    let clock = SystemClock;
    let mut viewer = Viewer::new(provider.as_ref(), &clock, config)?;
    let mut shell = shell::Shell::new(
        &mut viewer,
        config.fetch.default_lookback_days,
        config.fetch.lookback_choices.clone(),
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)
}
