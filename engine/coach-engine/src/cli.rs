//! # Command Line Interface
//!
//! CLI for running the engine against a snapshot file. This is a calling
//! layer for demos and manual inspection: it loads a JSON snapshot into
//! the in-memory store, invokes one engine operation, and prints the
//! result as JSON.

use crate::{CoachEngine, EngineConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use roster_store::InMemoryStore;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Coach CLI for lineup, waiver, trade, and matchup analysis
#[derive(Parser)]
#[command(name = "coach-cli")]
#[command(about = "Fantasy roster analysis from a league snapshot")]
pub struct Cli {
    /// Path to the league snapshot JSON
    #[arg(short, long, default_value = "data/demo_snapshot.json")]
    pub snapshot: PathBuf,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend start/bench calls for a roster
    Lineup {
        /// Roster to optimize
        roster_id: String,
    },
    /// Rank available waiver pickups for a team
    Waivers {
        /// League to search
        league_id: String,
        /// Team whose roster defines the exclusion set
        team_id: String,
        /// Number of candidates to return
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Propose lineup-improving trades with other teams
    Trades {
        /// League to search
        league_id: String,
        /// Requesting team
        team_id: String,
    },
    /// Simulate a head-to-head weekly matchup
    Simulate {
        /// League containing both teams
        league_id: String,
        /// Requesting team
        team_id: String,
        /// Opponent team; defaults to the scheduled matchup opponent
        #[arg(long)]
        opponent: Option<String>,
        /// Monte Carlo trial count
        #[arg(long)]
        runs: Option<u32>,
    },
    /// Show league scoring pace per week
    Heatmap {
        /// League to aggregate
        league_id: String,
    },
    /// Recompute and store blended projection rows
    Refresh,
}

/// CLI handler
pub struct CliHandler {
    engine: CoachEngine,
}

impl CliHandler {
    /// Load the snapshot and build an engine over it.
    pub async fn new(snapshot_path: &PathBuf) -> Result<Self> {
        let store = InMemoryStore::new();
        store.load_snapshot(snapshot_path).await?;
        let engine = CoachEngine::new(Arc::new(store), EngineConfig::from_env());
        Ok(Self { engine })
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Lineup { roster_id } => {
                let lineup = self.engine.optimize_lineup(&roster_id).await?;
                print_json(&lineup)?;
            }
            Commands::Waivers { league_id, team_id, limit } => {
                let candidates =
                    self.engine.waiver_candidates(&league_id, &team_id, limit).await?;
                print_json(&candidates)?;
            }
            Commands::Trades { league_id, team_id } => {
                let proposals = self.engine.trade_proposals(&league_id, &team_id).await?;
                print_json(&proposals)?;
            }
            Commands::Simulate { league_id, team_id, opponent, runs } => {
                let opponent = match opponent {
                    Some(opponent) => opponent,
                    None => self.engine.default_opponent(&league_id, &team_id).await?,
                };
                let result = self
                    .engine
                    .simulate_matchup(&league_id, &team_id, &opponent, runs)
                    .await?;
                print_json(&result)?;
            }
            Commands::Heatmap { league_id } => {
                let heatmap = self.engine.schedule_heatmap(&league_id).await?;
                print_json(&heatmap)?;
            }
            Commands::Refresh => {
                let written = self.engine.refresh_blended_projections().await?;
                println!("Refreshed {written} blended projection rows");
            }
        }
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
