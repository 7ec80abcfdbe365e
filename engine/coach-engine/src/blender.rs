//! Projection blending: one consensus estimate per player-week.

use crate::util::round2;
use crate::{CoachEngine, Result};
use roster_core::Projection;
use tracing::info;

impl CoachEngine {
    /// Blend every source's projection for a (player, week) pair into a
    /// single consensus row tagged with the synthetic blended source.
    ///
    /// Known sources use their table weight, unknown sources the uniform
    /// default, and the result is normalized by the weights actually
    /// present, so the blend is insensitive to which sources happen to
    /// report. Previously written blended rows are ignored as inputs.
    ///
    /// No rows at all yields a zero-valued placeholder under the fallback
    /// source tag: downstream consumers treat zero-point players as
    /// "no data", never as an error. Negative projections pass through
    /// unclamped.
    pub async fn blend_projections(&self, player_id: &str, week: u16) -> Result<Projection> {
        let params = &self.config.blend;
        let rows: Vec<Projection> = self
            .store
            .projections_for(player_id, week)
            .await?
            .into_iter()
            .filter(|row| row.source != params.blended_source)
            .collect();

        if rows.is_empty() {
            return Ok(Projection {
                player_id: player_id.to_string(),
                week,
                source: params.fallback_source.clone(),
                projected_points: 0.0,
                floor: 0.0,
                ceiling: 0.0,
            });
        }

        let mut total_weight = 0.0;
        let mut points = 0.0;
        let mut floor = 0.0;
        let mut ceiling = 0.0;
        for row in &rows {
            let weight = params.weight_for(&row.source);
            total_weight += weight;
            points += row.projected_points * weight;
            floor += row.floor * weight;
            ceiling += row.ceiling * weight;
        }
        let scale = if total_weight > 0.0 { 1.0 / total_weight } else { 1.0 };

        Ok(Projection {
            player_id: player_id.to_string(),
            week,
            source: params.blended_source.clone(),
            projected_points: round2(points * scale),
            floor: round2(floor * scale),
            ceiling: round2(ceiling * scale),
        })
    }

    /// Batch recompute: blend every raw (player, week) pair in the store
    /// and upsert the synthetic blended row for it. Returns the number of
    /// rows written. Pairs whose only row is a stale blended one are
    /// skipped, which keeps the sweep idempotent.
    pub async fn refresh_blended_projections(&self) -> Result<usize> {
        let keys = self.store.projection_keys().await?;
        let mut written = 0;
        for (player_id, week) in keys {
            let blended = self.blend_projections(&player_id, week).await?;
            if blended.source == self.config.blend.fallback_source {
                continue;
            }
            self.store.upsert_projection(blended).await?;
            written += 1;
        }
        info!("Refreshed {} blended projection rows", written);
        Ok(written)
    }
}
