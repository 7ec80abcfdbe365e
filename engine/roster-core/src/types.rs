use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Roster position for a fantasy football player.
///
/// Unknown position strings deserialize to `Other` rather than failing, so
/// imported data with exotic slots (K, DST, ...) stays loadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    Flex,
    Other,
}

impl Position {
    /// Canonical uppercase label for this position.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
            Position::Flex => "FLEX",
            Position::Other => "OTHER",
        }
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "QB" => Position::Qb,
            "RB" => Position::Rb,
            "WR" => Position::Wr,
            "TE" => Position::Te,
            "FLEX" => Position::Flex,
            _ => Position::Other,
        }
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Player availability as reported by the league feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InjuryStatus {
    #[default]
    Active,
    Questionable,
    Doubtful,
    Out,
}

/// Where a roster spot currently sits: in the starting lineup, on the
/// bench, or stashed on injured reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Start,
    Bench,
    Ir,
}

impl SpotStatus {
    /// Uppercase label, used as a fallback key into replacement tables.
    pub fn as_upper(&self) -> &'static str {
        match self {
            SpotStatus::Start => "START",
            SpotStatus::Bench => "BENCH",
            SpotStatus::Ir => "IR",
        }
    }
}

/// An NFL player as seen by the engine. Immutable snapshot per read; the
/// engine never owns player identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Position,
    /// Team abbreviation (e.g. "BAL", "BUF").
    #[serde(default)]
    pub team: String,
    /// Bye week, 0 = none scheduled.
    #[serde(default)]
    pub bye_week: u16,
    #[serde(default)]
    pub injury_status: InjuryStatus,
}

/// One source's weekly projection for a player. Several rows exist per
/// player-week (one per source); the engine synthesizes an extra row under
/// its blended source tag. The floor <= points <= ceiling contract is the
/// intent for trustworthy sources but is not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub player_id: String,
    pub week: u16,
    pub source: String,
    pub projected_points: f64,
    pub floor: f64,
    pub ceiling: f64,
}

/// One slot on a weekly roster, joined with the player occupying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSpot {
    pub player: Player,
    /// Slot label ("QB", "RB", "FLEX", ...). Free-form: unrecognized labels
    /// fall back to status-based replacement values downstream.
    pub slot: String,
    pub status: SpotStatus,
    /// Point estimate stored when the lineup was last set.
    pub projected_points: f64,
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub notes: String,
}

/// A team's roster for one scoring week. Rosters are versioned by week: a
/// new record is created per week rather than mutating the prior one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub id: String,
    pub league_id: String,
    pub team_id: String,
    pub week: u16,
    #[serde(default)]
    pub spots: Vec<RosterSpot>,
}

/// A fantasy team within a league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub league_id: String,
    pub name: String,
    #[serde(default)]
    pub wins: u16,
    #[serde(default)]
    pub losses: u16,
    #[serde(default)]
    pub ties: u16,
    #[serde(default)]
    pub points_for: f64,
    #[serde(default)]
    pub points_against: f64,
    #[serde(default)]
    pub playoff_odds: f64,
}

/// A fantasy league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub name: String,
    pub season: u16,
    pub scoring_type: String,
    #[serde(default)]
    pub is_active: bool,
}

/// A scheduled head-to-head pairing for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: String,
    pub league_id: String,
    pub week: u16,
    pub home_team_id: String,
    pub away_team_id: String,
    #[serde(default)]
    pub home_score: f64,
    #[serde(default)]
    pub away_score: f64,
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
}

/// Aggregated outcome of a Monte Carlo matchup simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub league_id: String,
    pub week: u16,
    pub runs: u32,
    pub win_probability: f64,
    pub playoff_odds: f64,
    pub median_score: f64,
    /// Named percentiles of the requesting team's score ("p10"/"p50"/"p90").
    pub percentiles: BTreeMap<String, f64>,
}

/// Persisted envelope for the latest simulation of a team pairing. Keyed
/// by a composite of (league, team, opponent) and written as an upsert:
/// last write wins, since the record is a recomputable cache and never a
/// source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: String,
    pub league_id: String,
    pub week: u16,
    pub computed_at: DateTime<Utc>,
    pub summary: SimulationResult,
}

impl SimulationRecord {
    /// Create a record for a team pairing, stamping the current time.
    pub fn new(
        league_id: &str,
        team_id: &str,
        opponent_team_id: &str,
        summary: SimulationResult,
    ) -> Self {
        Self {
            id: Self::pair_key(league_id, team_id, opponent_team_id),
            league_id: league_id.to_string(),
            week: summary.week,
            computed_at: Utc::now(),
            summary,
        }
    }

    /// Composite cache key for a simulated pairing.
    pub fn pair_key(league_id: &str, team_id: &str, opponent_team_id: &str) -> String {
        format!("sim-{league_id}-{team_id}-{opponent_team_id}")
    }
}
