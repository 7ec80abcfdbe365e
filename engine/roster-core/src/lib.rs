//! # roster-core
//!
//! Shared domain model for the roster coach engine: players, projections,
//! roster spots, teams, leagues, matchups, and the persisted simulation
//! record. Pure data: every type is serde-serializable and carries no
//! behavior beyond key derivation and display.

pub mod types;

pub use types::{
    InjuryStatus, League, Matchup, Player, Position, Projection, Roster, RosterSpot,
    SimulationRecord, SimulationResult, SpotStatus, Team,
};

/// Current version of the roster-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
