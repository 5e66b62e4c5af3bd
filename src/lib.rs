pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use api::*;
pub use models::*;
pub use utils::*;

use anyhow::{Context, Result};
use config::Config;
use std::path::PathBuf;
use tracing::{info, warn};
use utils::aggregator::build_report_rows;
use utils::report::{emit_report, render_report, ReportSink};

/// Both sections of a weekly report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub pro: ReportSection,
    pub college: ReportSection,
}

impl Report {
    pub fn render(&self) -> String {
        render_report(&self.pro, &self.college)
    }
}

/// What to fetch and where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub pro_query: EventQuery,
    pub college_query: EventQuery,
    pub sinks: Vec<ReportSink>,
}

/// Fetch one competition's week and reduce it to report rows.
///
/// Only a failed week listing is fatal. A game whose detail or odds cannot
/// be fetched is logged and left out of the report.
pub async fn fetch_section(
    client: &EspnClient,
    competition: Competition,
    query: &EventQuery,
) -> Result<ReportSection> {
    let event = client
        .fetch_event(competition, query)
        .await
        .with_context(|| format!("Failed to fetch {} events", competition.label()))?;

    info!(
        competition = competition.label(),
        week = %event.week,
        games = event.game_refs.len(),
        "Fetched event listing"
    );

    let mut games = Vec::with_capacity(event.game_refs.len());
    for game_ref in &event.game_refs {
        match client.fetch_game(game_ref, competition).await {
            Ok(game) => games.push(game),
            Err(e) => warn!(game_ref = %game_ref, error = %e, "Skipping game, failed to fetch details"),
        }
    }

    let mut games_with_odds = Vec::with_capacity(games.len());
    for game in games {
        match client.fetch_odds(&game).await {
            Ok(odds) => games_with_odds.push((game, odds)),
            Err(e) => warn!(
                game = %game.short_name,
                odds_url = %game.odds_url,
                error = %e,
                "Skipping game, failed to fetch odds"
            ),
        }
    }

    let rows = build_report_rows(&games_with_odds)
        .with_context(|| format!("Failed to format {} week {}", competition.label(), event.week))?;

    info!(
        competition = competition.label(),
        week = %event.week,
        rows = rows.len(),
        "Built report section"
    );

    Ok(ReportSection {
        competition,
        week: event.week,
        rows,
    })
}

/// Fetch both competitions, NFL first
pub async fn build_report(
    client: &EspnClient,
    pro_query: &EventQuery,
    college_query: &EventQuery,
) -> Result<Report> {
    let pro = fetch_section(client, Competition::Pro, pro_query).await?;
    let college = fetch_section(client, Competition::College, college_query).await?;
    Ok(Report { pro, college })
}

/// Fetch, render and emit the report. Returns the paths of files written.
pub async fn run(config: &Config, options: &RunOptions) -> Result<Vec<PathBuf>> {
    let client = EspnClient::new(config.api_base_url.clone(), config.http_timeout)
        .context("Failed to build HTTP client")?;

    let report = build_report(&client, &options.pro_query, &options.college_query).await?;
    let text = report.render();

    emit_report(&text, &report.pro.week, &options.sinks)
}
