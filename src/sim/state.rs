//! Run state and the snapshots handed to collaborators
//!
//! `RunState` is owned by the controller alone; collaborators only ever see
//! the immutable snapshot types below.

use serde::{Deserialize, Serialize};

use super::resolver::Precision;
use super::scheduler::ObstacleScheduler;
use super::score::ScoreTracker;

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Constructed, nothing loaded
    Idle,
    /// Best score loaded, waiting for a run to start
    Ready,
    /// Tick loop active
    Playing,
    /// Tick loop suspended, countdowns frozen
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverReason {
    /// An obstacle went past its grace period unanswered
    NoCommand,
    /// The nearest obstacle got the wrong command
    WrongCommand,
}

/// Identifies one rewarded-continue offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTicket {
    /// Run counter at the time of the offer
    pub run: u32,
    /// Continues already granted in that run
    pub continues: u32,
}

/// HUD data, sent every tick while playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub best_score: u64,
    pub streak: u32,
    pub multiplier: u32,
}

/// Last utterance heard, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastCommand {
    pub text: String,
    pub recognized: bool,
}

/// End-of-run summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub reason: GameOverReason,
    pub score: u64,
    pub best_score: u64,
    pub is_new_record: bool,
    /// Already reset to 0 by the failure
    pub streak: u32,
    pub best_streak: u32,
    /// Already reset to 1 by the failure
    pub multiplier: u32,
    pub max_multiplier: u32,
    pub accuracy: f32,
    pub precision_percent: u32,
    pub feedback_text: String,
    pub can_continue_with_reward: bool,
}

/// Everything that belongs to the current run
#[derive(Debug, Clone)]
pub struct RunState {
    pub status: RunStatus,
    pub tracker: ScoreTracker,
    pub precision: Precision,
    pub scheduler: ObstacleScheduler,
    /// Best score when this run started (new-record detection)
    pub best_at_run_start: u64,
    /// Runs started since construction
    pub run_number: u32,
    /// Rewarded continues granted this run (`max_per_run` caps it)
    pub rewarded_continues_in_run: u32,
    /// Offer made for the current game over and not yet answered
    pub pending_reward: Option<RewardTicket>,
    /// An offer was already made for the current game over
    pub reward_offered: bool,
    pub last_report: Option<GameOverReport>,
}

impl RunState {
    pub fn new(seed: u64) -> Self {
        Self {
            status: RunStatus::Idle,
            tracker: ScoreTracker::new(0),
            precision: Precision::default(),
            scheduler: ObstacleScheduler::new(seed),
            best_at_run_start: 0,
            run_number: 0,
            rewarded_continues_in_run: 0,
            pending_reward: None,
            reward_offered: false,
            last_report: None,
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.tracker.score,
            best_score: self.tracker.best_score,
            streak: self.tracker.streak,
            multiplier: self.tracker.multiplier,
        }
    }
}
