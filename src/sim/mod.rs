//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `RunController::tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, speech or platform dependencies beyond the traits in
//!   `crate::platform`

pub mod autopilot;
pub mod command;
pub mod controller;
pub mod difficulty;
pub mod obstacle;
pub mod resolver;
pub mod scheduler;
pub mod score;
pub mod state;

pub use autopilot::Autopilot;
pub use command::Command;
pub use controller::RunController;
pub use difficulty::{DifficultyCurve, curve_for};
pub use obstacle::{GroupId, Obstacle, ObstacleGroup, ObstacleId};
pub use resolver::{Outcome, Precision, resolve};
pub use scheduler::ObstacleScheduler;
pub use score::{ScoreTracker, multiplier_for};
pub use state::{
    GameOverReason, GameOverReport, HudSnapshot, LastCommand, RewardTicket, RunState, RunStatus,
};
