//! Command resolution against the pending obstacles

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleGroup, ObstacleId};
use super::Command;
use crate::tuning::TimingTuning;

/// Voice accuracy counters for the current run.
///
/// Invariant: `useful_correct_commands <= recognized_commands`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precision {
    pub recognized_commands: u32,
    pub useful_correct_commands: u32,
}

impl Precision {
    /// Useful share of recognized commands, 0 when nothing was recognized
    pub fn accuracy(&self) -> f32 {
        if self.recognized_commands == 0 {
            0.0
        } else {
            self.useful_correct_commands as f32 / self.recognized_commands as f32
        }
    }

    /// Accuracy as a rounded percentage
    pub fn percent(&self) -> u32 {
        (self.accuracy() * 100.0).round() as u32
    }
}

/// What a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing in window; no penalty, no bonus
    NoTarget,
    /// The target was resolved
    Correct {
        obstacle: ObstacleId,
        group: ObstacleGroup,
    },
    /// The target wanted something else; it is now failed
    Incorrect {
        obstacle: ObstacleId,
        expected: Command,
    },
}

/// Apply a recognized command to the nearest-to-impact obstacle in window.
///
/// The window is `[-grace_period_ms, early_window_ms]`. At most one obstacle
/// is touched per call.
pub fn resolve(
    command: Command,
    obstacles: &mut [Obstacle],
    timing: &TimingTuning,
    precision: &mut Precision,
) -> Outcome {
    precision.recognized_commands += 1;

    let earliest = -i64::from(timing.grace_period_ms);
    let latest = i64::from(timing.early_window_ms);
    let Some(target) = obstacles
        .iter_mut()
        .filter(|o| o.is_pending() && (earliest..=latest).contains(&o.time_to_impact_ms))
        .min_by_key(|o| o.time_to_impact_ms)
    else {
        return Outcome::NoTarget;
    };

    if target.required_command == command {
        target.resolved = true;
        precision.useful_correct_commands += 1;
        Outcome::Correct {
            obstacle: target.id,
            group: target.group(),
        }
    } else {
        target.failed = true;
        Outcome::Incorrect {
            obstacle: target.id,
            expected: target.required_command,
        }
    }
}
