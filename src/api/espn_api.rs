use crate::error::FetchError;
use crate::models::{Competition, Event, EventQuery, GameRecord, OddsSnapshot};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const ESPN_CORE_API_BASE: &str = "https://sports.core.api.espn.com";

/// Event listing response from the ESPN core API
#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(rename = "$meta", default)]
    meta: EventsMeta,
    #[serde(default)]
    items: Vec<RefItem>,
}

#[derive(Debug, Default, Deserialize)]
struct EventsMeta {
    #[serde(default)]
    parameters: EventsParameters,
}

/// Query echo; every parameter comes back as a list of strings
#[derive(Debug, Default, Deserialize)]
struct EventsParameters {
    #[serde(default)]
    week: Vec<String>,
    #[serde(default)]
    season: Vec<String>,
    #[serde(default)]
    seasontypes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RefItem {
    #[serde(rename = "$ref")]
    reference: String,
}

/// Per-game detail resource
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameResponse {
    id: String,
    date: String,
    name: String,
    short_name: String,
}

pub struct EspnClient {
    base_url: String,
    client: reqwest::Client,
}

impl EspnClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { base_url, client })
    }

    /// Fetch the week listing for a competition
    pub async fn fetch_event(
        &self,
        competition: Competition,
        query: &EventQuery,
    ) -> Result<Event, FetchError> {
        let url = competition.events_url(&self.base_url, query);
        let response: EventsResponse = self.get_json(&url).await?;
        let parameters = response.meta.parameters;

        let week = parameters
            .week
            .into_iter()
            .next()
            .filter(|week| !week.is_empty())
            .or_else(|| query.requested_week())
            .ok_or(FetchError::MissingField {
                url,
                field: "$meta.parameters.week",
            })?;

        Ok(Event {
            competition,
            week,
            season: parameters.season.into_iter().next(),
            season_type: parameters.seasontypes.into_iter().next(),
            game_refs: response
                .items
                .into_iter()
                .map(|item| item.reference)
                .collect(),
        })
    }

    /// Resolve one game reference from an event listing
    pub async fn fetch_game(
        &self,
        game_ref: &str,
        competition: Competition,
    ) -> Result<GameRecord, FetchError> {
        let game: GameResponse = self.get_json(game_ref).await?;
        let odds_url = competition.odds_url(&self.base_url, &game.id);

        Ok(GameRecord {
            id: game.id,
            kickoff_utc: game.date,
            full_name: game.name,
            short_name: game.short_name,
            odds_url,
        })
    }

    /// Fetch posted odds for a game. An empty snapshot is not an error.
    pub async fn fetch_odds(&self, game: &GameRecord) -> Result<OddsSnapshot, FetchError> {
        self.get_json(&game.odds_url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> EspnClient {
        EspnClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_event_extracts_week_and_refs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/sports/football/leagues/nfl/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "$meta": {
                    "parameters": {
                        "week": ["6"],
                        "season": ["2022"],
                        "seasontypes": ["2"]
                    }
                },
                "count": 2,
                "items": [
                    { "$ref": "http://example.test/events/1" },
                    { "$ref": "http://example.test/events/2" }
                ]
            })))
            .mount(&server)
            .await;

        let event = client_for(&server)
            .fetch_event(Competition::Pro, &EventQuery::Current)
            .await
            .unwrap();

        assert_eq!(event.week, "6");
        assert_eq!(event.season.as_deref(), Some("2022"));
        assert_eq!(event.season_type.as_deref(), Some("2"));
        assert_eq!(
            event.game_refs,
            vec![
                "http://example.test/events/1".to_string(),
                "http://example.test/events/2".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_college_event_sends_group_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/sports/football/leagues/college-football/events"))
            .and(query_param("groups", "80"))
            .and(query_param("limit", "500"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "$meta": { "parameters": { "week": ["7"] } },
                "items": []
            })))
            .mount(&server)
            .await;

        let event = client_for(&server)
            .fetch_event(Competition::College, &EventQuery::Current)
            .await
            .unwrap();

        assert_eq!(event.week, "7");
        assert!(event.game_refs.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_event_without_week() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "items": [] })),
            )
            .mount(&server)
            .await;
        let client = client_for(&server);

        let err = client
            .fetch_event(Competition::Pro, &EventQuery::Current)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingField { .. }));

        // A specific-week query falls back to the requested week
        let query = EventQuery::Week {
            season: 2022,
            season_type: 2,
            week: 6,
        };
        let event = client.fetch_event(Competition::Pro, &query).await.unwrap();
        assert_eq!(event.week, "6");
    }

    #[tokio::test]
    async fn test_fetch_event_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/sports/football/leagues/nfl/events"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/sports/football/leagues/college-football/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let err = client
            .fetch_event(Competition::Pro, &EventQuery::Current)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, FetchError::Status { .. }));

        let err = client
            .fetch_event(Competition::College, &EventQuery::Current)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_game_derives_odds_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/sports/football/leagues/nfl/events/401547439"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "401547439",
                "date": "2023-09-08T00:20Z",
                "name": "Detroit Lions at Kansas City Chiefs",
                "shortName": "DET @ KC"
            })))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let game_ref = format!(
            "{}/v2/sports/football/leagues/nfl/events/401547439?lang=en&region=us",
            server.uri()
        );
        let game = client.fetch_game(&game_ref, Competition::Pro).await.unwrap();

        assert_eq!(game.id, "401547439");
        assert_eq!(game.kickoff_utc, "2023-09-08T00:20Z");
        assert_eq!(game.full_name, "Detroit Lions at Kansas City Chiefs");
        assert_eq!(game.short_name, "DET @ KC");
        assert_eq!(
            game.odds_url,
            Competition::Pro.odds_url(&server.uri(), "401547439")
        );
    }

    #[tokio::test]
    async fn test_fetch_odds_empty_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/sports/football/leagues/nfl/events/1/competitions/1/odds"))
            .and(query_param("lang", "en"))
            .and(query_param("region", "us"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "count": 0, "items": [] })),
            )
            .mount(&server)
            .await;
        let client = client_for(&server);

        let game = GameRecord {
            id: "1".to_string(),
            kickoff_utc: "2022-10-10T17:00Z".to_string(),
            full_name: "A at B".to_string(),
            short_name: "A @ B".to_string(),
            odds_url: Competition::Pro.odds_url(&server.uri(), "1"),
        };
        let snapshot = client.fetch_odds(&game).await.unwrap();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.spread_text(), None);
    }

    #[tokio::test]
    async fn test_request_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "items": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;
        let client = EspnClient::new(server.uri(), Duration::from_millis(200)).unwrap();

        let err = client
            .fetch_event(Competition::Pro, &EventQuery::Current)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    #[ignore] // Ignore by default since it requires network access
    async fn test_fetch_live_nfl_event() {
        let client = EspnClient::new(ESPN_CORE_API_BASE, Duration::from_secs(30)).unwrap();
        let event = client
            .fetch_event(Competition::Pro, &EventQuery::Current)
            .await
            .unwrap();
        println!("NFL week {} with {} games", event.week, event.game_refs.len());
        assert!(!event.week.is_empty());
    }
}
