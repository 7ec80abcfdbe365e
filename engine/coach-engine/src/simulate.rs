//! Monte Carlo matchup simulation.
//!
//! Determinism is a required property, not an accident: every invocation
//! builds a fresh ChaCha stream from a hash of the three identifiers, so
//! identical inputs reproduce bit-identical outputs and concurrent
//! simulations never share generator state.

use crate::util::{round2, round3};
use crate::{CoachEngine, EngineError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use roster_core::{SimulationRecord, SimulationResult};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::info;

impl CoachEngine {
    /// Simulate a head-to-head weekly matchup and cache the summary.
    ///
    /// Each trial samples every player with a nonzero blended projection
    /// from a normal distribution centered on the blend with a floored
    /// spread, clamps draws at zero, and sums per roster. Zero-blend
    /// players are skipped entirely (no data, not zero-variance noise).
    /// Ties count as non-wins for the requesting team.
    ///
    /// The playoff-odds figure is a linear transform of win probability
    /// clamped to the configured band. It is a placeholder heuristic kept
    /// for compatibility, not a calibrated model.
    ///
    /// The summary is upserted under the league/team-pair key so dashboard
    /// reads can reuse the latest result; whether to reuse is the
    /// caller's decision, never this component's.
    pub async fn simulate_matchup(
        &self,
        league_id: &str,
        team_id: &str,
        opponent_team_id: &str,
        runs: Option<u32>,
    ) -> Result<SimulationResult> {
        let params = &self.config.sim;
        let runs = runs.unwrap_or(params.default_runs);
        if runs == 0 {
            return Err(EngineError::InvalidTrialCount(runs));
        }

        let mut rng = ChaCha8Rng::from_seed(derive_seed(league_id, team_id, opponent_team_id));
        let team_profile = self.score_profile(team_id).await?;
        let opponent_profile = self.score_profile(opponent_team_id).await?;

        let mut team_scores = Vec::with_capacity(runs as usize);
        let mut opponent_scores = Vec::with_capacity(runs as usize);
        for _ in 0..runs {
            team_scores.push(sample_team_score(&mut rng, &team_profile));
            opponent_scores.push(sample_team_score(&mut rng, &opponent_profile));
        }

        let wins = team_scores
            .iter()
            .zip(&opponent_scores)
            .filter(|(team, opponent)| team > opponent)
            .count();
        let win_probability = wins as f64 / runs as f64;
        let playoff_odds = (0.5 + (win_probability - 0.5) * params.playoff_odds_slope)
            .clamp(params.playoff_odds_floor, params.playoff_odds_ceiling);

        let mut sorted = team_scores;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let percentiles = BTreeMap::from([
            ("p10".to_string(), round2(percentile(&sorted, 10.0))),
            ("p50".to_string(), round2(percentile(&sorted, 50.0))),
            ("p90".to_string(), round2(percentile(&sorted, 90.0))),
        ]);
        let median_score = percentiles["p50"];

        let summary = SimulationResult {
            league_id: league_id.to_string(),
            week: self.config.current_week,
            runs,
            win_probability: round3(win_probability),
            playoff_odds: round3(playoff_odds),
            median_score,
            percentiles,
        };
        self.store
            .upsert_simulation(SimulationRecord::new(
                league_id,
                team_id,
                opponent_team_id,
                summary.clone(),
            ))
            .await?;
        info!(
            "Simulated {} vs {} in {} over {} trials: win probability {}",
            team_id, opponent_team_id, league_id, runs, summary.win_probability
        );
        Ok(summary)
    }

    /// Resolve the default opponent for a team: the away side of the first
    /// matchup where the team hosts. Used by calling layers that let the
    /// opponent argument default.
    pub async fn default_opponent(&self, league_id: &str, team_id: &str) -> Result<String> {
        let matchups = self.store.league_matchups(league_id).await?;
        matchups
            .iter()
            .find(|m| m.home_team_id == team_id)
            .map(|m| m.away_team_id.clone())
            .ok_or_else(|| EngineError::OpponentNotFound {
                league_id: league_id.to_string(),
                team_id: team_id.to_string(),
            })
    }

    /// Per-player sampling distributions for a roster. Players with a
    /// zero blended projection are skipped; everyone else gets a normal
    /// centered on the blend with std-dev max(floor, spread/divisor).
    async fn score_profile(&self, team_id: &str) -> Result<Vec<Normal<f64>>> {
        let params = &self.config.sim;
        let mut profile = Vec::new();
        for player in self.store.team_players(team_id).await? {
            let projection =
                self.blend_projections(&player.id, self.config.current_week).await?;
            if projection.projected_points == 0.0 {
                continue;
            }
            let std_dev = params
                .min_std_dev
                .max((projection.ceiling - projection.floor) / params.spread_divisor);
            let normal = Normal::new(projection.projected_points, std_dev)
                .map_err(|e| EngineError::Sampling(e.to_string()))?;
            profile.push(normal);
        }
        Ok(profile)
    }
}

/// One trial: sample every player, clamp negative draws at zero, sum, and
/// round to the score precision the league uses.
fn sample_team_score(rng: &mut ChaCha8Rng, profile: &[Normal<f64>]) -> f64 {
    let total: f64 = profile.iter().map(|normal| normal.sample(rng).max(0.0)).sum();
    round2(total)
}

/// Stable 256-bit seed from the three identifiers.
fn derive_seed(league_id: &str, team_id: &str, opponent_team_id: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(league_id.as_bytes());
    hasher.update(b"-");
    hasher.update(team_id.as_bytes());
    hasher.update(b"-");
    hasher.update(opponent_team_id.as_bytes());
    hasher.finalize().into()
}

/// Percentile by linear interpolation between order statistics. Expects a
/// sorted slice; an empty one yields 0.0.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (sorted.len() - 1) as f64 * pct / 100.0;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    sorted[lower] * (upper as f64 - rank) + sorted[upper] * (rank - lower as f64)
}

#[cfg(test)]
mod tests {
    use super::{derive_seed, percentile};
    use crate::{CoachEngine, EngineConfig, EngineError};
    use roster_core::{InjuryStatus, Matchup, Player, Position, Projection, Roster, RosterSpot, SpotStatus};
    use roster_store::{InMemoryStore, RosterStore};
    use std::sync::Arc;

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let values = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&values, 0.0), 10.0);
        assert_eq!(percentile(&values, 100.0), 40.0);
        assert_eq!(percentile(&values, 50.0), 25.0);
        // rank 0.3: 10*0.7 + 20*0.3
        assert!((percentile(&values, 10.0) - 13.0).abs() < 1e-9);
    }

    #[test]
    fn percentile_of_empty_and_single() {
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(percentile(&[7.5], 10.0), 7.5);
        assert_eq!(percentile(&[7.5], 90.0), 7.5);
    }

    #[test]
    fn seed_depends_on_pair_order() {
        let forward = derive_seed("league-001", "team-001", "team-002");
        let reverse = derive_seed("league-001", "team-002", "team-001");
        assert_ne!(forward, reverse);
        assert_eq!(forward, derive_seed("league-001", "team-001", "team-002"));
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

    async fn seed_team(store: &InMemoryStore, team_id: &str, players: &[(&str, f64)]) {
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
            if *points > 0.0 {
                store
                    .upsert_projection(Projection {
                        player_id: id.to_string(),
                        week: 8,
                        source: "fantasycalc".to_string(),
                        projected_points: *points,
                        floor: points - 5.0,
                        ceiling: points + 8.0,
                    })
                    .await
                    .unwrap();
            }
        }
    }

    async fn matchup_engine() -> (CoachEngine, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        seed_team(&store, "team-001", &[("player-001", 22.0), ("player-002", 14.0)]).await;
        seed_team(&store, "team-002", &[("player-101", 12.0), ("player-102", 9.0)]).await;
        (CoachEngine::new(store.clone(), EngineConfig::default()), store)
    }

    #[tokio::test]
    async fn identical_inputs_reproduce_identical_results() {
        let (engine, _) = matchup_engine().await;

        let first = engine
            .simulate_matchup("league-001", "team-001", "team-002", Some(200))
            .await
            .unwrap();
        let second = engine
            .simulate_matchup("league-001", "team-001", "team-002", Some(200))
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn win_probability_and_percentiles_are_well_formed() {
        let (engine, _) = matchup_engine().await;

        let result = engine
            .simulate_matchup("league-001", "team-001", "team-002", Some(300))
            .await
            .unwrap();
        assert!((0.0..=1.0).contains(&result.win_probability));
        assert!((0.01..=0.99).contains(&result.playoff_odds));
        let p10 = result.percentiles["p10"];
        let p50 = result.percentiles["p50"];
        let p90 = result.percentiles["p90"];
        assert!(p10 <= p50 && p50 <= p90);
        assert_eq!(result.median_score, p50);
        assert_eq!(result.runs, 300);
    }

    #[tokio::test]
    async fn stronger_roster_usually_wins() {
        let (engine, _) = matchup_engine().await;

        let result = engine
            .simulate_matchup("league-001", "team-001", "team-002", Some(400))
            .await
            .unwrap();
        // 36 points of projection vs 21 with ~3-4 std-dev per player:
        // the favorite should win the large majority of trials.
        assert!(result.win_probability > 0.8);
    }

    #[tokio::test]
    async fn summary_is_cached_under_the_pair_key() {
        let (engine, store) = matchup_engine().await;

        let result = engine
            .simulate_matchup("league-001", "team-001", "team-002", Some(50))
            .await
            .unwrap();
        let cached = store
            .latest_simulation("league-001", "team-001", "team-002")
            .await
            .unwrap()
            .expect("cache row should exist");
        assert_eq!(cached.summary, result);
        assert_eq!(cached.id, "sim-league-001-team-001-team-002");
    }

    #[tokio::test]
    async fn rosters_without_data_produce_zero_scores() {
        let store = Arc::new(InMemoryStore::new());
        seed_team(&store, "team-001", &[("player-001", 0.0)]).await;
        seed_team(&store, "team-002", &[("player-101", 0.0)]).await;
        let engine = CoachEngine::new(store, EngineConfig::default());

        let result = engine
            .simulate_matchup("league-001", "team-001", "team-002", Some(50))
            .await
            .unwrap();
        // Every trial ties 0.0 to 0.0; ties are non-wins.
        assert_eq!(result.win_probability, 0.0);
        assert_eq!(result.median_score, 0.0);
        // Raw odds would be -0.25; the explicit floor holds.
        assert_eq!(result.playoff_odds, 0.01);
    }

    #[tokio::test]
    async fn zero_trials_is_a_precondition_violation() {
        let (engine, _) = matchup_engine().await;

        let err = engine
            .simulate_matchup("league-001", "team-001", "team-002", Some(0))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTrialCount(0)));
    }

    #[tokio::test]
    async fn default_opponent_comes_from_the_matchup_schedule() {
        let (engine, store) = matchup_engine().await;
        store
            .insert_matchup(Matchup {
                id: "matchup-001".to_string(),
                league_id: "league-001".to_string(),
                week: 8,
                home_team_id: "team-001".to_string(),
                away_team_id: "team-002".to_string(),
                home_score: 0.0,
                away_score: 0.0,
                kickoff: None,
            })
            .await;

        let opponent = engine.default_opponent("league-001", "team-001").await.unwrap();
        assert_eq!(opponent, "team-002");

        let err = engine.default_opponent("league-001", "team-099").await.unwrap_err();
        assert!(matches!(err, EngineError::OpponentNotFound { .. }));
    }
}
