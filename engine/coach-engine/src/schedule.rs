//! League-wide scoring pace aggregation.

use crate::models::WeekPace;
use crate::util::round2;
use crate::{CoachEngine, Result};
use std::collections::BTreeMap;

impl CoachEngine {
    /// Total points scored across a league's matchups, per week, ascending.
    /// Feeds schedule heatmap views; an unknown or empty league yields an
    /// empty list.
    pub async fn schedule_heatmap(&self, league_id: &str) -> Result<Vec<WeekPace>> {
        let matchups = self.store.league_matchups(league_id).await?;
        let mut pace_by_week: BTreeMap<u16, f64> = BTreeMap::new();
        for matchup in &matchups {
            *pace_by_week.entry(matchup.week).or_insert(0.0) +=
                matchup.home_score + matchup.away_score;
        }
        Ok(pace_by_week
            .into_iter()
            .map(|(week, pace)| WeekPace { week, pace: round2(pace) })
            .collect())
    }
}
