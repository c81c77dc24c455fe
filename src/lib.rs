//! Voice Runner - a voice-commanded obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic game core (scheduling, command resolution, scoring, run state machine)
//! - `platform`: Collaborator traits (storage, ads, UI) and null implementations
//! - `persistence`: Best-score record on disk
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{PlatformError, TuningError};
pub use platform::Collaborators;
pub use sim::{Command, RunController, RunStatus};
pub use tuning::GameTuning;

/// Driver constants
pub mod consts {
    /// Frame step for headless runs (~60 Hz)
    pub const FRAME_MS: u32 = 16;
    /// Seed used when none is given
    pub const DEFAULT_SEED: u64 = 0x5EED;
    /// Headless runs stop after this many frames (10 minutes)
    pub const MAX_FRAMES: u32 = 60 * 60 * 10;
}
