use crate::error::KickoffFormatError;
use crate::models::{GameRecord, OddsSnapshot, ReportRow};
use crate::utils::time_format::format_kickoff;
use tracing::info;

/// Turn fetched games and their odds into report rows.
///
/// Games with no posted spread are left out. Input order is kept, so the
/// result is always an order-preserving subsequence of `games`. A malformed
/// kickoff time aborts the whole batch.
pub fn build_report_rows(
    games: &[(GameRecord, OddsSnapshot)],
) -> Result<Vec<ReportRow>, KickoffFormatError> {
    let mut rows = Vec::with_capacity(games.len());

    for (game, odds) in games {
        let Some(spread) = odds.spread_text() else {
            info!(
                game = %game.short_name,
                odds_url = %game.odds_url,
                "No odds posted yet, skipping game"
            );
            continue;
        };

        rows.push(ReportRow {
            display_date: format_kickoff(&game.kickoff_utc)?,
            short_name: game.short_name.clone(),
            full_name: game.full_name.clone(),
            spread_text: spread.to_string(),
        });
    }

    Ok(rows)
}
