//! Sport scoring: today's schedule or the reduced boxscore of one game.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::America::New_York;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::GAME_LIST;
use crate::api::Function;
use crate::core::config::SportsConfig;
use crate::core::models::{Invocation, Outcome};
use crate::errors::FunctionError;

/// `toLocaleString('en-US')` style, e.g. `10/14/2026, 7:05:00 PM`.
const SCHEDULED_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Deserialize)]
pub struct Team {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduledGame {
    pub id: String,
    pub status: String,
    pub scheduled: String,
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Deserialize)]
pub struct Schedule {
    pub games: Vec<ScheduledGame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameListing {
    pub id: String,
    pub game: String,
    pub status: String,
    pub scheduled: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Boxscore {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    pub home: TeamScore,
    pub away: TeamScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    pub home: TeamScore,
    pub away: TeamScore,
}

impl From<Boxscore> for GameScore {
    fn from(boxscore: Boxscore) -> Self {
        Self {
            game_id: boxscore.id,
            status: boxscore.status,
            home: boxscore.home,
            away: boxscore.away,
        }
    }
}

/// Calendar date in U.S. Eastern time at `now`.
#[must_use]
pub fn eastern_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&New_York).date_naive()
}

/// Render an RFC 3339 start time in Eastern time.
///
/// # Errors
///
/// Returns `Upstream` when the timestamp does not parse.
pub fn format_scheduled(scheduled: &str) -> Result<String, FunctionError> {
    let at = DateTime::parse_from_rfc3339(scheduled)
        .map_err(|e| FunctionError::Upstream(format!("Invalid scheduled time {scheduled}: {e}")))?;
    Ok(at.with_timezone(&New_York).format(SCHEDULED_FORMAT).to_string())
}

/// Map the upstream schedule to the listing returned to callers.
///
/// # Errors
///
/// Returns `Upstream` when a game's start time does not parse.
pub fn list_games(schedule: Schedule) -> Result<Vec<GameListing>, FunctionError> {
    schedule
        .games
        .into_iter()
        .map(|game| -> Result<GameListing, FunctionError> {
            Ok(GameListing {
                scheduled: format_scheduled(&game.scheduled)?,
                game: format!("{} vs {}", game.home.name, game.away.name),
                id: game.id,
                status: game.status,
            })
        })
        .collect()
}

pub struct SportsFunction {
    config: SportsConfig,
    http: HttpClient,
}

impl SportsFunction {
    pub fn new(config: SportsConfig, http: HttpClient) -> Self {
        Self { config, http }
    }

    #[must_use]
    pub fn schedule_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/{}/{}/{}/schedule.json",
            self.config.api_url,
            date.year(),
            date.month(),
            date.day()
        )
    }

    #[must_use]
    pub fn boxscore_url(&self, game_id: &str) -> String {
        format!("{}/{}/boxscore.json", self.config.api_url, game_id)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FunctionError> {
        let body = self
            .http
            .get(url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        #[cfg(feature = "debug-logs")]
        tracing::debug!(url = %url, body = %body, "Sports API response");

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Function for SportsFunction {
    fn name(&self) -> &'static str {
        "sport-scoring"
    }

    fn expiration_time(&self) -> Option<&str> {
        self.config.expiration_time.as_deref()
    }

    async fn call(&self, invocation: &Invocation) -> Result<Outcome, FunctionError> {
        let game_id = invocation.resource_id();

        if game_id == GAME_LIST {
            let date = eastern_date(Utc::now());
            info!(date = %date, "Fetching schedule");
            let schedule: Schedule = self.fetch(&self.schedule_url(date)).await?;
            let games = list_games(schedule)?;
            return Ok(Outcome::Json(serde_json::to_value(games)?));
        }

        info!(game_id = %game_id, "Fetching boxscore");
        let boxscore: Boxscore = self.fetch(&self.boxscore_url(game_id)).await?;
        Ok(Outcome::Json(serde_json::to_value(GameScore::from(boxscore))?))
    }
}
