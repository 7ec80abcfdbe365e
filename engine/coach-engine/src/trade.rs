//! Trade proposal generation.
//!
//! Bounded exhaustive search: for every opposing team, every 1- and
//! 2-player package from the requesting roster is paired with every 1- and
//! 2-player package from theirs. With roster size R that is
//! (C(R,1)+C(R,2))² pairs per opponent, so cost grows with the square of
//! each roster's combination count times the number of opposing teams.
//! That holds up fine for league-sized rosters over a season; it is a
//! small-roster heuristic, not a scalable matching algorithm. Cap the
//! package size before reusing it at a larger scale. The search is pure
//! in-memory CPU work with no partial results: it runs to completion or
//! not at all.

use crate::models::TradeProposal;
use crate::util::{round2, round3};
use crate::{CoachEngine, Result};
use roster_core::Player;
use std::collections::HashMap;
use tracing::debug;

impl CoachEngine {
    /// Enumerate small trades against every other team in the league and
    /// keep the best few that strictly improve the requesting side.
    ///
    /// Each side of a pair is valued as the sum of its players' blended
    /// point estimates; pairs whose lineup delta is zero or negative are
    /// discarded. Survivors across all opposing teams are ranked by
    /// lineup delta and truncated to the configured cap. Proposals from
    /// different opposing teams are never merged.
    pub async fn trade_proposals(
        &self,
        league_id: &str,
        team_id: &str,
    ) -> Result<Vec<TradeProposal>> {
        let params = &self.config.trade;
        let own_players = self.store.team_players(team_id).await?;
        let own_values = self.blended_values(&own_players).await?;
        let teams = self.store.league_teams(league_id).await?;

        let mut proposals = Vec::new();
        for other in teams.iter().filter(|t| t.id != team_id) {
            let their_players = self.store.team_players(&other.id).await?;
            let their_values = self.blended_values(&their_players).await?;

            for give_count in 1..=params.max_package_size {
                for receive_count in 1..=params.max_package_size {
                    for give in combinations(own_players.len(), give_count) {
                        for receive in combinations(their_players.len(), receive_count) {
                            let offer_value: f64 = give
                                .iter()
                                .map(|&i| value_of(&own_values, &own_players[i]))
                                .sum();
                            let request_value: f64 = receive
                                .iter()
                                .map(|&i| value_of(&their_values, &their_players[i]))
                                .sum();
                            let lineup_delta = round2(request_value - offer_value);
                            if lineup_delta <= 0.0 {
                                continue;
                            }
                            proposals.push(TradeProposal {
                                offer_players: give
                                    .iter()
                                    .map(|&i| own_players[i].clone())
                                    .collect(),
                                request_players: receive
                                    .iter()
                                    .map(|&i| their_players[i].clone())
                                    .collect(),
                                offer_value: round2(offer_value),
                                request_value: round2(request_value),
                                lineup_delta,
                                playoff_odds_delta: round3(
                                    lineup_delta * params.playoff_delta_rate,
                                ),
                                notes: "Improves starting lineup with higher floor".to_string(),
                            });
                        }
                    }
                }
            }
        }

        proposals.sort_by(|a, b| {
            b.lineup_delta.partial_cmp(&a.lineup_delta).unwrap_or(std::cmp::Ordering::Equal)
        });
        proposals.truncate(params.max_proposals);
        debug!(
            "Trade search for team {} in league {}: keeping {} proposals",
            team_id,
            league_id,
            proposals.len()
        );
        Ok(proposals)
    }

    /// Blend each player once and index the point estimates by id, so the
    /// combination loop never re-blends.
    async fn blended_values(&self, players: &[Player]) -> Result<HashMap<String, f64>> {
        let mut values = HashMap::with_capacity(players.len());
        for player in players {
            let projection =
                self.blend_projections(&player.id, self.config.current_week).await?;
            values.insert(player.id.clone(), projection.projected_points);
        }
        Ok(values)
    }
}

fn value_of(values: &HashMap<String, f64>, player: &Player) -> f64 {
    values.get(&player.id).copied().unwrap_or(0.0)
}

/// All index combinations of the given size, in lexicographic order.
fn combinations(count: usize, size: usize) -> Vec<Vec<usize>> {
    fn recurse(start: usize, count: usize, size: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for i in start..count {
            current.push(i);
            recurse(i + 1, count, size, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if size == 0 || size > count {
        return out;
    }
    let mut current = Vec::with_capacity(size);
    recurse(0, count, size, &mut current, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::combinations;
    use crate::{CoachEngine, EngineConfig};
    use roster_core::{InjuryStatus, Player, Position, Projection, Roster, RosterSpot, SpotStatus, Team};
    use roster_store::{InMemoryStore, RosterStore};
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn combinations_enumerate_lexicographically() {
        assert_eq!(combinations(3, 1), vec![vec![0], vec![1], vec![2]]);
        assert_eq!(
            combinations(4, 2),
            vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]
        );
        assert!(combinations(2, 3).is_empty());
        assert!(combinations(0, 1).is_empty());
    }

    fn player(id: &str) -> Player {
        Player {
            id: id.to_string(),
            name: format!("Player {id}"),
            position: Position::Rb,
            team: "BAL".to_string(),
            bye_week: 7,
            injury_status: InjuryStatus::Active,
        }
    }

    fn team(id: &str) -> Team {
        Team {
            id: id.to_string(),
            league_id: "league-001".to_string(),
            name: format!("Team {id}"),
            wins: 4,
            losses: 3,
            ties: 0,
            points_for: 800.0,
            points_against: 760.0,
            playoff_odds: 0.5,
        }
    }

    async fn seed_team(store: &InMemoryStore, team_id: &str, players: &[(&str, f64)]) {
        store.insert_team(team(team_id)).await;
        let spots: Vec<RosterSpot> = players
            .iter()
            .map(|(id, _)| RosterSpot {
                player: player(id),
                slot: "RB".to_string(),
                status: SpotStatus::Start,
                projected_points: 10.0,
                opponent: String::new(),
                notes: String::new(),
            })
            .collect();
        store
            .insert_roster(Roster {
                id: format!("roster-{team_id}"),
                league_id: "league-001".to_string(),
                team_id: team_id.to_string(),
                week: 8,
                spots,
            })
            .await;
        for (id, points) in players {
            store.insert_player(player(id)).await;
            store
                .upsert_projection(Projection {
                    player_id: id.to_string(),
                    week: 8,
                    source: "fantasycalc".to_string(),
                    projected_points: *points,
                    floor: points - 3.0,
                    ceiling: points + 5.0,
                })
                .await
                .unwrap();
        }
    }

    async fn two_team_engine() -> CoachEngine {
        let store = Arc::new(InMemoryStore::new());
        seed_team(&store, "team-001", &[("player-001", 8.0), ("player-002", 6.0)]).await;
        seed_team(&store, "team-002", &[("player-101", 14.0), ("player-102", 11.0)]).await;
        CoachEngine::new(store, EngineConfig::default())
    }

    #[tokio::test]
    async fn every_proposal_strictly_improves_the_requester() {
        let engine = two_team_engine().await;
        let proposals = engine.trade_proposals("league-001", "team-001").await.unwrap();

        assert!(!proposals.is_empty());
        for proposal in &proposals {
            assert!(proposal.lineup_delta > 0.0);
            assert!(!proposal.offer_players.is_empty());
            assert!(!proposal.request_players.is_empty());
            assert!(proposal.offer_players.len() <= 2);
            assert!(proposal.request_players.len() <= 2);
        }
    }

    #[tokio::test]
    async fn at_most_three_proposals_sorted_by_delta() {
        let engine = two_team_engine().await;
        let proposals = engine.trade_proposals("league-001", "team-001").await.unwrap();

        assert!(proposals.len() <= 3);
        assert!(proposals.windows(2).all(|w| w[0].lineup_delta >= w[1].lineup_delta));
        // Best available swap: give the weakest player, take both of theirs
        // (6.0 out, 25.0 in = 19.0 delta).
        assert_eq!(proposals[0].lineup_delta, 19.0);
        assert_eq!(proposals[0].playoff_odds_delta, 0.38);
    }

    #[tokio::test]
    async fn offer_and_request_sides_are_disjoint() {
        let engine = two_team_engine().await;
        let proposals = engine.trade_proposals("league-001", "team-001").await.unwrap();

        for proposal in &proposals {
            let offered: HashSet<&str> =
                proposal.offer_players.iter().map(|p| p.id.as_str()).collect();
            assert!(proposal
                .request_players
                .iter()
                .all(|p| !offered.contains(p.id.as_str())));
        }
    }

    #[tokio::test]
    async fn losing_trades_are_discarded() {
        let store = Arc::new(InMemoryStore::new());
        // The requester's players are strictly better than the rival's:
        // no pair can improve the requester.
        seed_team(&store, "team-001", &[("player-001", 20.0), ("player-002", 18.0)]).await;
        seed_team(&store, "team-002", &[("player-101", 4.0), ("player-102", 3.0)]).await;
        let engine = CoachEngine::new(store, EngineConfig::default());

        let proposals = engine.trade_proposals("league-001", "team-001").await.unwrap();
        assert!(proposals.is_empty());
    }

    #[tokio::test]
    async fn league_without_opponents_yields_no_proposals() {
        let store = Arc::new(InMemoryStore::new());
        seed_team(&store, "team-001", &[("player-001", 8.0)]).await;
        let engine = CoachEngine::new(store, EngineConfig::default());

        let proposals = engine.trade_proposals("league-001", "team-001").await.unwrap();
        assert!(proposals.is_empty());
    }
}
