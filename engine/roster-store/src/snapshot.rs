//! Flat JSON snapshot document used to seed a store with league content.

use roster_core::{League, Matchup, Player, Projection, Roster, Team};
use serde::{Deserialize, Serialize};

/// Everything needed to seed a store in one document: leagues, teams,
/// players, weekly rosters (with embedded spots), raw projections, and the
/// matchup schedule. All sections are optional so partial fixtures stay
/// loadable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub rosters: Vec<Roster>,
    #[serde(default)]
    pub projections: Vec<Projection>,
    #[serde(default)]
    pub matchups: Vec<Matchup>,
}

impl StoreSnapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
