//! The `RosterStore` trait and the in-memory reference implementation.

use crate::error::Result;
use crate::snapshot::StoreSnapshot;
use roster_core::{
    League, Matchup, Player, Projection, Roster, RosterSpot, SimulationRecord, Team,
};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

/// Read/write contract between the engine and whatever persists league
/// data. Reads are shaped after the queries the engine actually issues;
/// the only write paths are the projection upsert (blended-row refresh)
/// and the simulation-summary upsert. Unknown identifiers yield empty
/// collections, never errors.
#[async_trait::async_trait]
pub trait RosterStore: Send + Sync {
    /// All projection rows for a (player, week) pair, every source,
    /// ordered by source for deterministic iteration.
    async fn projections_for(&self, player_id: &str, week: u16) -> Result<Vec<Projection>>;

    /// Insert or replace a projection row, keyed (player, week, source).
    async fn upsert_projection(&self, projection: Projection) -> Result<()>;

    /// Distinct (player, week) pairs present in the projection table.
    async fn projection_keys(&self) -> Result<Vec<(String, u16)>>;

    /// Spots on a roster, joined with player data.
    async fn roster_spots(&self, roster_id: &str) -> Result<Vec<RosterSpot>>;

    /// Every player NOT held on the given team within the given league
    /// (the waiver universe), ordered by player id.
    async fn players_not_on_team(&self, league_id: &str, team_id: &str) -> Result<Vec<Player>>;

    /// Distinct players across a team's rosters, ordered by player id.
    async fn team_players(&self, team_id: &str) -> Result<Vec<Player>>;

    /// Teams belonging to a league, ordered by team id.
    async fn league_teams(&self, league_id: &str) -> Result<Vec<Team>>;

    /// Matchup pairings for a league, ordered by week then id.
    async fn league_matchups(&self, league_id: &str) -> Result<Vec<Matchup>>;

    /// Insert or replace the cached simulation summary for a team pairing.
    /// Concurrent writers resolve last-write-wins.
    async fn upsert_simulation(&self, record: SimulationRecord) -> Result<()>;

    /// The cached simulation summary for a pairing, if one exists.
    async fn latest_simulation(
        &self,
        league_id: &str,
        team_id: &str,
        opponent_team_id: &str,
    ) -> Result<Option<SimulationRecord>>;
}

#[derive(Default)]
struct StoreState {
    leagues: HashMap<String, League>,
    teams: HashMap<String, Team>,
    players: HashMap<String, Player>,
    rosters: HashMap<String, Roster>,
    projections: HashMap<(String, u16, String), Projection>,
    matchups: Vec<Matchup>,
    simulations: HashMap<String, SimulationRecord>,
}

/// In-memory store, seedable from a [`StoreSnapshot`]. Backs tests, demos,
/// and any embedding that keeps league data in process. A single RwLock
/// guards the state; reads clone out snapshots so callers never hold the
/// lock across engine computation.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a parsed snapshot document. Existing rows with
    /// matching keys are replaced.
    pub async fn apply_snapshot(&self, snapshot: StoreSnapshot) {
        let mut state = self.state.write().await;
        for league in snapshot.leagues {
            state.leagues.insert(league.id.clone(), league);
        }
        for team in snapshot.teams {
            state.teams.insert(team.id.clone(), team);
        }
        for player in snapshot.players {
            state.players.insert(player.id.clone(), player);
        }
        for roster in snapshot.rosters {
            state.rosters.insert(roster.id.clone(), roster);
        }
        for projection in snapshot.projections {
            let key =
                (projection.player_id.clone(), projection.week, projection.source.clone());
            state.projections.insert(key, projection);
        }
        for matchup in snapshot.matchups {
            state.matchups.retain(|m| m.id != matchup.id);
            state.matchups.push(matchup);
        }
    }

    /// Load and apply a snapshot JSON file.
    pub async fn load_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        info!("Loading store snapshot from: {:?}", path.as_ref());
        let json = tokio::fs::read_to_string(&path).await?;
        let snapshot = StoreSnapshot::from_json(&json)?;
        let counts = (
            snapshot.leagues.len(),
            snapshot.teams.len(),
            snapshot.players.len(),
            snapshot.rosters.len(),
            snapshot.projections.len(),
        );
        self.apply_snapshot(snapshot).await;
        info!(
            "Seeded {} leagues, {} teams, {} players, {} rosters, {} projections",
            counts.0, counts.1, counts.2, counts.3, counts.4
        );
        Ok(())
    }

    /// Insert or replace a single player.
    pub async fn insert_player(&self, player: Player) {
        let mut state = self.state.write().await;
        state.players.insert(player.id.clone(), player);
    }

    /// Insert or replace a single team.
    pub async fn insert_team(&self, team: Team) {
        let mut state = self.state.write().await;
        state.teams.insert(team.id.clone(), team);
    }

    /// Insert or replace a single weekly roster.
    pub async fn insert_roster(&self, roster: Roster) {
        let mut state = self.state.write().await;
        state.rosters.insert(roster.id.clone(), roster);
    }

    /// Insert or replace a single matchup pairing.
    pub async fn insert_matchup(&self, matchup: Matchup) {
        let mut state = self.state.write().await;
        state.matchups.retain(|m| m.id != matchup.id);
        state.matchups.push(matchup);
    }

    /// A league by id, if known. Calling layers use this for display
    /// context; the engine itself never validates league references.
    pub async fn league(&self, league_id: &str) -> Option<League> {
        let state = self.state.read().await;
        state.leagues.get(league_id).cloned()
    }
}

#[async_trait::async_trait]
impl RosterStore for InMemoryStore {
    async fn projections_for(&self, player_id: &str, week: u16) -> Result<Vec<Projection>> {
        let state = self.state.read().await;
        let mut rows: Vec<Projection> = state
            .projections
            .values()
            .filter(|p| p.player_id == player_id && p.week == week)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.source.cmp(&b.source));
        Ok(rows)
    }

    async fn upsert_projection(&self, projection: Projection) -> Result<()> {
        let mut state = self.state.write().await;
        let key = (projection.player_id.clone(), projection.week, projection.source.clone());
        state.projections.insert(key, projection);
        Ok(())
    }

    async fn projection_keys(&self) -> Result<Vec<(String, u16)>> {
        let state = self.state.read().await;
        let keys: BTreeSet<(String, u16)> = state
            .projections
            .values()
            .map(|p| (p.player_id.clone(), p.week))
            .collect();
        Ok(keys.into_iter().collect())
    }

    async fn roster_spots(&self, roster_id: &str) -> Result<Vec<RosterSpot>> {
        let state = self.state.read().await;
        Ok(state.rosters.get(roster_id).map(|r| r.spots.clone()).unwrap_or_default())
    }

    async fn players_not_on_team(&self, league_id: &str, team_id: &str) -> Result<Vec<Player>> {
        let state = self.state.read().await;
        let held: HashSet<&str> = state
            .rosters
            .values()
            .filter(|r| r.league_id == league_id && r.team_id == team_id)
            .flat_map(|r| r.spots.iter().map(|s| s.player.id.as_str()))
            .collect();
        let mut players: Vec<Player> = state
            .players
            .values()
            .filter(|p| !held.contains(p.id.as_str()))
            .cloned()
            .collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(players)
    }

    async fn team_players(&self, team_id: &str) -> Result<Vec<Player>> {
        let state = self.state.read().await;
        let mut by_id: HashMap<&str, &Player> = HashMap::new();
        for roster in state.rosters.values().filter(|r| r.team_id == team_id) {
            for spot in &roster.spots {
                by_id.insert(spot.player.id.as_str(), &spot.player);
            }
        }
        let mut players: Vec<Player> = by_id.values().map(|p| (*p).clone()).collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(players)
    }

    async fn league_teams(&self, league_id: &str) -> Result<Vec<Team>> {
        let state = self.state.read().await;
        let mut teams: Vec<Team> =
            state.teams.values().filter(|t| t.league_id == league_id).cloned().collect();
        teams.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(teams)
    }

    async fn league_matchups(&self, league_id: &str) -> Result<Vec<Matchup>> {
        let state = self.state.read().await;
        let mut matchups: Vec<Matchup> =
            state.matchups.iter().filter(|m| m.league_id == league_id).cloned().collect();
        matchups.sort_by(|a, b| a.week.cmp(&b.week).then_with(|| a.id.cmp(&b.id)));
        Ok(matchups)
    }

    async fn upsert_simulation(&self, record: SimulationRecord) -> Result<()> {
        let mut state = self.state.write().await;
        state.simulations.insert(record.id.clone(), record);
        Ok(())
    }

    async fn latest_simulation(
        &self,
        league_id: &str,
        team_id: &str,
        opponent_team_id: &str,
    ) -> Result<Option<SimulationRecord>> {
        let state = self.state.read().await;
        let key = SimulationRecord::pair_key(league_id, team_id, opponent_team_id);
        Ok(state.simulations.get(&key).cloned())
    }
}
