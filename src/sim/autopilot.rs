//! Demo player
//!
//! Stands in for the speech collaborator in headless runs: watches the
//! board and "says" a command for the nearest obstacle once it is close
//! enough, getting it right with a fixed probability.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Command, Obstacle};

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Probability of saying the right command
    pub accuracy: f32,
    /// Speak once the target is this close to impact
    pub reaction_ms: i64,
}

impl Autopilot {
    pub fn new(seed: u64, accuracy: f32, reaction_ms: i64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
            reaction_ms,
        }
    }

    /// Command to say this frame, if any
    pub fn decide(&mut self, obstacles: &[Obstacle]) -> Option<Command> {
        let target = obstacles
            .iter()
            .filter(|o| o.is_pending())
            .min_by_key(|o| o.time_to_impact_ms)?;
        if target.time_to_impact_ms > self.reaction_ms {
            return None;
        }

        if self.rng.random::<f32>() < self.accuracy {
            return Some(target.required_command);
        }
        let wrong: Vec<Command> = Command::ALL
            .into_iter()
            .filter(|c| *c != target.required_command)
            .collect();
        Some(wrong[self.rng.random_range(0..wrong.len())])
    }
}
