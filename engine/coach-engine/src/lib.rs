//! # coach-engine
//!
//! Decision-support engine for weekly fantasy football management. Given a
//! roster/league snapshot and noisy multi-source projections, it produces
//! consensus projections, start/bench recommendations, ranked waiver
//! pickups, mutually-beneficial trade proposals, and a Monte Carlo
//! forecast of a head-to-head matchup.
//!
//! The engine is logically stateless: every entry point reads a snapshot
//! through the [`RosterStore`] collaborator and returns a freshly computed
//! value. Its one persisted side effect is the simulation-summary upsert.
//! All entry points are independently invocable and safe to call
//! concurrently.

pub mod blender;
pub mod cli;
pub mod config;
pub mod error;
pub mod lineup;
pub mod models;
pub mod schedule;
pub mod simulate;
pub mod trade;
pub mod waiver;

mod util;


pub use config::{
    EngineConfig, DEFAULT_CURRENT_WEEK, DEFAULT_SIMULATION_RUNS, DEFAULT_WAIVER_LIMIT,
};
pub use error::{EngineError, Result};
pub use models::{
    LineupEntry, OptimizedLineup, Recommendation, TradeProposal, WaiverCandidate, WeekPace,
};

use roster_store::RosterStore;
use std::sync::Arc;

/// Current version of the coach engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The recommendation/simulation engine. Holds the storage collaborator
/// and the weight tables; all computation happens per call against the
/// snapshot the store returns.
pub struct CoachEngine {
    pub(crate) store: Arc<dyn RosterStore>,
    pub(crate) config: EngineConfig,
}

impl CoachEngine {
    /// Create an engine over a storage collaborator with the given
    /// configuration.
    pub fn new(store: Arc<dyn RosterStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Create an engine with the default configuration.
    pub fn with_default_config(store: Arc<dyn RosterStore>) -> Self {
        Self::new(store, EngineConfig::default())
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
