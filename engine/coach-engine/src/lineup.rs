//! Start/bench lineup optimization for one roster.

use crate::models::{LineupEntry, OptimizedLineup, Recommendation};
use crate::util::round2;
use crate::{CoachEngine, Result};
use roster_core::SpotStatus;
use tracing::debug;

impl CoachEngine {
    /// Produce start/bench calls for every spot on a roster plus the
    /// aggregate value delta versus the currently started lineup.
    ///
    /// Each spot's start score is its blended projection plus a share of
    /// the excess over replacement level, so players who clear replacement
    /// by a wide margin are preferred over ones who barely do. Spots not
    /// already started carry a flat risk penalty before the comparison.
    /// The optimizer never values a slot below replacement: benched spots
    /// contribute replacement level to the optimized total.
    ///
    /// A roster with no spots yields an empty lineup with zero totals and
    /// zero delta, not an error.
    pub async fn optimize_lineup(&self, roster_id: &str) -> Result<OptimizedLineup> {
        let params = &self.config.lineup;
        let spots = self.store.roster_spots(roster_id).await?;

        let mut lineup = Vec::with_capacity(spots.len());
        let mut rationale_lines = Vec::with_capacity(spots.len());
        let mut baseline = 0.0;
        let mut optimized_total = 0.0;

        for spot in &spots {
            let projection =
                self.blend_projections(&spot.player.id, self.config.current_week).await?;
            let replacement = params.replacement_for(&spot.slot, spot.status);
            let start_score = projection.projected_points
                + (projection.projected_points - replacement) * params.excess_weight;
            let risk_modifier = if spot.status == SpotStatus::Start {
                0.0
            } else {
                -params.bench_risk_penalty
            };
            let recommendation = if start_score + risk_modifier >= replacement {
                Recommendation::Start
            } else {
                Recommendation::Bench
            };

            lineup.push(LineupEntry {
                player_id: spot.player.id.clone(),
                name: spot.player.name.clone(),
                slot: spot.slot.clone(),
                status: spot.status,
                projected_points: projection.projected_points,
                recommendation,
                rationale: format!(
                    "Proj {} vs replacement {}",
                    projection.projected_points, replacement
                ),
            });

            if spot.status == SpotStatus::Start {
                baseline += spot.projected_points;
            }
            optimized_total += match recommendation {
                Recommendation::Start => projection.projected_points.max(replacement),
                Recommendation::Bench => replacement,
            };
            rationale_lines.push(format!(
                "{}: {} (blend {} / floor {})",
                spot.player.name,
                recommendation.as_upper(),
                projection.projected_points,
                projection.floor
            ));
        }

        let delta = round2(optimized_total - baseline);
        debug!(
            "Optimized roster {}: {} spots, delta {}",
            roster_id,
            lineup.len(),
            delta
        );
        Ok(OptimizedLineup {
            lineup,
            total_projection: round2(optimized_total),
            delta,
            rationale: rationale_lines.join("; "),
        })
    }
}
