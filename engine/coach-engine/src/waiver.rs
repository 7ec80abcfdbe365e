//! Waiver-wire candidate ranking.

use crate::models::WaiverCandidate;
use crate::util::round2;
use crate::{CoachEngine, Result};
use tracing::debug;

impl CoachEngine {
    /// Score every rosterable player not held by the given team and return
    /// the top candidates, best first.
    ///
    /// Rest-of-season value leans on the blended point estimate with a
    /// small upside credit from the ceiling; scarcity and bye-coverage
    /// multipliers adjust it, and the schedule multiplier is a structural
    /// no-op reserved for future strength-of-schedule modeling. Ties keep
    /// the store's iteration order (stable sort).
    pub async fn waiver_candidates(
        &self,
        league_id: &str,
        team_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<WaiverCandidate>> {
        let params = &self.config.waiver;
        let limit = limit.unwrap_or(params.default_limit);

        let mut candidates = Vec::new();
        for player in self.store.players_not_on_team(league_id, team_id).await? {
            let projection =
                self.blend_projections(&player.id, self.config.current_week).await?;
            let ros_value = projection.projected_points * params.ros_point_weight
                + projection.ceiling * params.ros_ceiling_weight;
            let scarcity = params.scarcity_for(player.position);
            let bye_bonus = params.bye_coverage_for(player.bye_week);
            let schedule = params.schedule_multiplier;
            let total = round2(ros_value * scarcity * bye_bonus * schedule);

            let explanation = format!(
                "Blended proj {}, scarcity {}",
                projection.projected_points, scarcity
            );
            candidates.push(WaiverCandidate {
                player,
                ros_value: round2(ros_value),
                scarcity_score: scarcity,
                team_fit_score: round2(bye_bonus),
                bye_coverage_score: round2(bye_bonus),
                schedule_score: round2(schedule),
                total_score: total,
                explanation,
            });
        }

        candidates.sort_by(|a, b| {
            b.total_score.partial_cmp(&a.total_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(limit);
        debug!(
            "Ranked waiver candidates for team {} in league {}: returning {}",
            team_id,
            league_id,
            candidates.len()
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use crate::util::round2;
    use crate::{CoachEngine, EngineConfig};
    use roster_core::{InjuryStatus, Player, Position, Projection, Roster, RosterSpot, SpotStatus};
    use roster_store::{InMemoryStore, RosterStore};
    use std::sync::Arc;

    fn player(id: &str, position: Position, bye_week: u16) -> Player {
        Player {
            id: id.to_string(),
            name: format!("Player {id}"),
            position,
            team: "BAL".to_string(),
            bye_week,
            injury_status: InjuryStatus::Active,
        }
    }

    fn projection(player_id: &str, points: f64, ceiling: f64) -> Projection {
        Projection {
            player_id: player_id.to_string(),
            week: 8,
            source: "fantasycalc".to_string(),
            projected_points: points,
            floor: points - 4.0,
            ceiling,
        }
    }

    async fn engine_with_pool(
        free_agents: Vec<(Player, Projection)>,
        held: Vec<Player>,
    ) -> CoachEngine {
        let store = Arc::new(InMemoryStore::new());
        for (player, row) in free_agents {
            store.insert_player(player).await;
            store.upsert_projection(row).await.unwrap();
        }
        let spots: Vec<RosterSpot> = held
            .iter()
            .map(|p| RosterSpot {
                player: p.clone(),
                slot: p.position.to_string(),
                status: SpotStatus::Start,
                projected_points: 10.0,
                opponent: String::new(),
                notes: String::new(),
            })
            .collect();
        for p in held {
            store.insert_player(p).await;
        }
        store
            .insert_roster(Roster {
                id: "roster-001".to_string(),
                league_id: "league-001".to_string(),
                team_id: "team-001".to_string(),
                week: 8,
                spots,
            })
            .await;
        CoachEngine::new(store, EngineConfig::default())
    }

    #[tokio::test]
    async fn total_score_follows_the_stated_formula() {
        let rb = player("player-101", Position::Rb, 7);
        let engine =
            engine_with_pool(vec![(rb, projection("player-101", 12.0, 20.0))], Vec::new()).await;

        let candidates =
            engine.waiver_candidates("league-001", "team-001", None).await.unwrap();
        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];

        // ros = 12*0.9 + 20*0.1 = 12.8; total = round2(12.8 * 1.2 * 1.1 * 1.0)
        assert_eq!(candidate.ros_value, 12.8);
        assert_eq!(candidate.scarcity_score, 1.2);
        assert_eq!(candidate.bye_coverage_score, 1.1);
        assert_eq!(candidate.schedule_score, 1.0);
        assert_eq!(candidate.total_score, round2(12.8 * 1.2 * 1.1));
    }

    #[tokio::test]
    async fn crowded_bye_week_is_penalized() {
        let engine = engine_with_pool(
            vec![
                (player("player-101", Position::Te, 5), projection("player-101", 10.0, 15.0)),
                (player("player-102", Position::Te, 7), projection("player-102", 10.0, 15.0)),
            ],
            Vec::new(),
        )
        .await;

        let candidates =
            engine.waiver_candidates("league-001", "team-001", None).await.unwrap();
        let crowded = candidates.iter().find(|c| c.player.id == "player-101").unwrap();
        let clear = candidates.iter().find(|c| c.player.id == "player-102").unwrap();
        assert_eq!(crowded.bye_coverage_score, 0.9);
        assert_eq!(clear.bye_coverage_score, 1.1);
        assert!(clear.total_score > crowded.total_score);
    }

    #[tokio::test]
    async fn results_are_sorted_descending_and_limited() {
        let pool: Vec<(Player, Projection)> = (1..=8)
            .map(|i| {
                let id = format!("player-10{i}");
                let points = 6.0 + i as f64;
                (player(&id, Position::Wr, 7), projection(&id, points, points + 6.0))
            })
            .collect();
        let engine = engine_with_pool(pool, Vec::new()).await;

        let candidates =
            engine.waiver_candidates("league-001", "team-001", Some(3)).await.unwrap();
        assert_eq!(candidates.len(), 3);
        assert!(candidates.windows(2).all(|w| w[0].total_score >= w[1].total_score));
        // Best projection wins
        assert_eq!(candidates[0].player.id, "player-108");
    }

    #[tokio::test]
    async fn held_players_are_excluded_from_the_universe() {
        let held = player("player-001", Position::Rb, 7);
        let engine = engine_with_pool(
            vec![(player("player-101", Position::Rb, 7), projection("player-101", 9.0, 14.0))],
            vec![held],
        )
        .await;

        let candidates =
            engine.waiver_candidates("league-001", "team-001", None).await.unwrap();
        assert!(candidates.iter().all(|c| c.player.id != "player-001"));
    }

    #[tokio::test]
    async fn empty_pool_yields_empty_ranking() {
        let engine = engine_with_pool(Vec::new(), Vec::new()).await;
        let candidates =
            engine.waiver_candidates("league-001", "team-001", None).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn zero_data_players_rank_with_zero_score() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_player(player("player-101", Position::Qb, 7)).await;
        let engine = CoachEngine::new(store, EngineConfig::default());

        let candidates =
            engine.waiver_candidates("league-001", "team-001", None).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].total_score, 0.0);
    }
}
