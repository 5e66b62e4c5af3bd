use serde::{Deserialize, Serialize};

/// Competition whose schedule and spreads are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competition {
    /// NFL
    Pro,
    /// College football, FBS division
    College,
}

impl Competition {
    /// League segment in the ESPN core API paths
    pub fn league(&self) -> &'static str {
        match self {
            Competition::Pro => "nfl",
            Competition::College => "college-football",
        }
    }

    /// Label used in report headers and log lines
    pub fn label(&self) -> &'static str {
        match self {
            Competition::Pro => "NFL",
            Competition::College => "College",
        }
    }

    /// Query string appended to event listings. College listings are
    /// restricted to FBS (group 80) and capped at 500 to avoid pagination.
    fn listing_filter(&self) -> &'static str {
        match self {
            Competition::Pro => "",
            Competition::College => "?groups=80&limit=500",
        }
    }

    fn league_url(&self, base_url: &str) -> String {
        format!(
            "{}/v2/sports/football/leagues/{}",
            base_url.trim_end_matches('/'),
            self.league()
        )
    }

    /// URL of the event listing for the given query
    pub fn events_url(&self, base_url: &str, query: &EventQuery) -> String {
        let league_url = self.league_url(base_url);
        match query {
            EventQuery::Current => format!("{}/events{}", league_url, self.listing_filter()),
            EventQuery::Week {
                season,
                season_type,
                week,
            } => format!(
                "{}/seasons/{}/types/{}/weeks/{}/events{}",
                league_url,
                season,
                season_type,
                week,
                self.listing_filter()
            ),
        }
    }

    /// URL of the odds resource for a game. Event and competition ids are
    /// the same for football games.
    pub fn odds_url(&self, base_url: &str, game_id: &str) -> String {
        format!(
            "{}/events/{}/competitions/{}/odds?lang=en&region=us",
            self.league_url(base_url),
            game_id,
            game_id
        )
    }
}

/// Which slice of the schedule to fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventQuery {
    /// Whatever the API considers the current week
    #[default]
    Current,
    /// A specific week of a season (season type 2 is the regular season)
    Week {
        season: u16,
        season_type: u8,
        week: u8,
    },
}

impl EventQuery {
    pub fn requested_week(&self) -> Option<String> {
        match self {
            EventQuery::Current => None,
            EventQuery::Week { week, .. } => Some(week.to_string()),
        }
    }
}

/// Week listing for one competition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub competition: Competition,
    pub week: String,
    pub season: Option<String>,
    pub season_type: Option<String>,
    /// Links to per-game detail resources, in listing order
    pub game_refs: Vec<String>,
}

/// A single game resolved from an event listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    /// Kickoff as published upstream, e.g. `2022-10-10T17:00Z`
    pub kickoff_utc: String,
    pub full_name: String,
    pub short_name: String,
    pub odds_url: String,
}

/// Odds entries published for a game; empty until lines are posted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsSnapshot {
    #[serde(default)]
    pub items: Vec<OddsEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsEntry {
    #[serde(default)]
    pub details: Option<String>,
}

impl OddsSnapshot {
    /// Spread text from the first entry, if one is posted and non-blank
    pub fn spread_text(&self) -> Option<&str> {
        self.items
            .first()
            .and_then(|entry| entry.details.as_deref())
            .map(str::trim)
            .filter(|details| !details.is_empty())
    }
}

/// One rendered game line group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub display_date: String,
    pub short_name: String,
    pub full_name: String,
    pub spread_text: String,
}

/// Rows for one competition, titled by its week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub competition: Competition,
    pub week: String,
    pub rows: Vec<ReportRow>,
}
