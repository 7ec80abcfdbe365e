//! Error types for the coach engine

use roster_store::StoreError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur in the coach engine.
///
/// Missing data never surfaces here: absent projections, empty rosters,
/// and leagues with no opposing teams all degrade to zero/empty results.
/// These variants cover storage failures and the few unrecoverable
/// precondition violations the contract defines.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("no opponent found for team {team_id} in league {league_id}")]
    OpponentNotFound { league_id: String, team_id: String },

    #[error("simulation requires at least one trial, got {0}")]
    InvalidTrialCount(u32),

    #[error("simulation sampling failed: {0}")]
    Sampling(String),
}
