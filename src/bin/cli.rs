use anyhow::{Context, Result};
use clap::Parser;
use espn_spreads::config::Config;
use espn_spreads::report::ReportSink;
use espn_spreads::{run, EventQuery, RunOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};

/// Weekly NFL and college football point spreads from ESPN
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory the report file is written to (default: Desktop)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Do not write the report file
    #[arg(long)]
    no_file: bool,

    /// Do not print the report to stdout
    #[arg(long)]
    quiet: bool,

    /// Season year for a specific-week query
    #[arg(long)]
    season: Option<u16>,

    /// Season type for a specific-week query (1 pre, 2 regular, 3 post)
    #[arg(long, default_value_t = 2)]
    season_type: u8,

    /// NFL week to fetch instead of the current one
    #[arg(long, requires = "season")]
    nfl_week: Option<u8>,

    /// College week to fetch instead of the current one
    #[arg(long, requires = "season")]
    college_week: Option<u8>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn query(&self, week: Option<u8>) -> EventQuery {
        match (self.season, week) {
            (Some(season), Some(week)) => EventQuery::Week {
                season,
                season_type: self.season_type,
                week,
            },
            _ => EventQuery::Current,
        }
    }

    fn sinks(&self, output_dir: PathBuf) -> Vec<ReportSink> {
        let mut sinks = Vec::new();
        if !self.quiet {
            sinks.push(ReportSink::Console);
        }
        if !self.no_file {
            sinks.push(ReportSink::File(output_dir));
        }
        sinks
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so the report on stdout stays verbatim
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(secs) = args.timeout_secs {
        anyhow::ensure!(secs > 0, "--timeout-secs must be greater than zero");
        config.http_timeout = Duration::from_secs(secs);
    }

    let options = RunOptions {
        pro_query: args.query(args.nfl_week),
        college_query: args.query(args.college_week),
        sinks: args.sinks(config.output_dir.clone()),
    };

    for path in run(&config, &options).await? {
        info!("Saved report to {}", path.display());
    }

    Ok(())
}
