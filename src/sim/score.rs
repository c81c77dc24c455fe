//! Score, streak and multiplier bookkeeping

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleGroup};
use crate::tuning::StreakTuning;

/// Base points per cleared group. A combo pair counts once.
pub const POINTS_PER_GROUP: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub score: u64,
    /// Survives run resets
    pub best_score: u64,
    pub streak: u32,
    pub best_streak_in_run: u32,
    /// Always in `[1, cap]`
    pub multiplier: u32,
    pub max_multiplier_in_run: u32,
}

impl ScoreTracker {
    pub fn new(best_score: u64) -> Self {
        Self {
            score: 0,
            best_score,
            streak: 0,
            best_streak_in_run: 0,
            multiplier: 1,
            max_multiplier_in_run: 1,
        }
    }

    /// Zero everything except the best score
    pub fn reset_for_run(&mut self) {
        *self = Self::new(self.best_score);
    }

    /// Score one cleared group, at most once.
    ///
    /// Returns the points gained, or `None` when the group has no members,
    /// is not fully resolved, or was already scored.
    pub fn register_cleared_group(
        &mut self,
        group: ObstacleGroup,
        obstacles: &mut [Obstacle],
        tuning: &StreakTuning,
    ) -> Option<u64> {
        let members: Vec<&mut Obstacle> =
            obstacles.iter_mut().filter(|o| group.contains(o)).collect();
        if members.is_empty() || members.iter().any(|o| o.scored || !o.resolved) {
            return None;
        }
        for obstacle in members {
            obstacle.scored = true;
        }

        let gained = POINTS_PER_GROUP * u64::from(self.multiplier);
        self.score += gained;
        self.streak += 1;
        self.multiplier = multiplier_for(self.streak, tuning);

        self.best_streak_in_run = self.best_streak_in_run.max(self.streak);
        self.max_multiplier_in_run = self.max_multiplier_in_run.max(self.multiplier);
        self.best_score = self.best_score.max(self.score);

        log::debug!(
            "Cleared {group:?}: +{gained} (score {}, streak {}, x{})",
            self.score,
            self.streak,
            self.multiplier
        );
        Some(gained)
    }

    /// A game-over trigger happened
    pub fn break_streak(&mut self) {
        self.streak = 0;
        self.multiplier = 1;
    }
}

/// `min(cap, 1 + streak / step)`
pub fn multiplier_for(streak: u32, tuning: &StreakTuning) -> u32 {
    let step = tuning.streak_step.max(1);
    let cap = tuning.max_multiplier.max(1);
    (1 + streak / step).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Command;
    use proptest::prelude::*;

    fn resolved(id: u32, group_id: Option<u32>) -> Obstacle {
        let mut obstacle = Obstacle::new(id, group_id, Command::Jump, 0);
        obstacle.resolved = true;
        obstacle
    }

    #[test]
    fn test_simple_group_scores_once() {
        let tuning = StreakTuning::default();
        let mut tracker = ScoreTracker::new(0);
        let mut obstacles = vec![resolved(1, None)];

        let gained = tracker.register_cleared_group(ObstacleGroup::Single(1), &mut obstacles, &tuning);
        assert_eq!(gained, Some(1));
        assert_eq!(tracker.score, 1);
        assert_eq!(tracker.streak, 1);
        assert!(obstacles[0].scored);

        let again = tracker.register_cleared_group(ObstacleGroup::Single(1), &mut obstacles, &tuning);
        assert_eq!(again, None);
        assert_eq!(tracker.score, 1);
        assert_eq!(tracker.streak, 1);
    }

    #[test]
    fn test_combo_counts_as_one_point() {
        let tuning = StreakTuning::default();
        let mut tracker = ScoreTracker::new(0);
        let mut obstacles = vec![resolved(1, Some(9)), resolved(2, Some(9))];

        let gained = tracker.register_cleared_group(ObstacleGroup::Combo(9), &mut obstacles, &tuning);
        assert_eq!(gained, Some(1));
        assert_eq!(tracker.score, 1);
        assert_eq!(tracker.streak, 1);
        assert!(obstacles.iter().all(|o| o.scored));
    }

    #[test]
    fn test_partially_resolved_combo_not_scored() {
        let tuning = StreakTuning::default();
        let mut tracker = ScoreTracker::new(0);
        let mut obstacles = vec![resolved(1, Some(9)), Obstacle::new(2, Some(9), Command::Duck, 0)];

        assert_eq!(
            tracker.register_cleared_group(ObstacleGroup::Combo(9), &mut obstacles, &tuning),
            None
        );
        assert!(!obstacles[0].scored);
        assert_eq!(tracker.score, 0);
    }

    #[test]
    fn test_unknown_group_not_scored() {
        let mut tracker = ScoreTracker::new(0);
        let mut obstacles = vec![resolved(1, None)];
        assert_eq!(
            tracker.register_cleared_group(ObstacleGroup::Combo(3), &mut obstacles, &StreakTuning::default()),
            None
        );
    }

    #[test]
    fn test_multiplier_applies_before_streak_update() {
        let tuning = StreakTuning {
            streak_step: 2,
            max_multiplier: 3,
        };
        let mut tracker = ScoreTracker::new(0);
        let mut gains = Vec::new();
        let mut obstacles: Vec<Obstacle> = (1..=6).map(|id| resolved(id, None)).collect();
        for id in 1..=6 {
            gains.push(
                tracker
                    .register_cleared_group(ObstacleGroup::Single(id), &mut obstacles, &tuning)
                    .unwrap(),
            );
        }
        // streak 0,1 -> x1; 2,3 -> x2; 4,5 -> x3
        assert_eq!(gains, vec![1, 1, 2, 2, 3, 3]);
        assert_eq!(tracker.score, 12);
        assert_eq!(tracker.multiplier, 3);
        assert_eq!(tracker.max_multiplier_in_run, 3);
        assert_eq!(tracker.best_score, 12);
    }

    #[test]
    fn test_break_streak_keeps_run_bests() {
        let tuning = StreakTuning {
            streak_step: 1,
            max_multiplier: 5,
        };
        let mut tracker = ScoreTracker::new(40);
        let mut obstacles: Vec<Obstacle> = (1..=3).map(|id| resolved(id, None)).collect();
        for id in 1..=3 {
            tracker.register_cleared_group(ObstacleGroup::Single(id), &mut obstacles, &tuning);
        }
        tracker.break_streak();
        assert_eq!(tracker.streak, 0);
        assert_eq!(tracker.multiplier, 1);
        assert_eq!(tracker.best_streak_in_run, 3);
        assert_eq!(tracker.max_multiplier_in_run, 4);
        assert_eq!(tracker.best_score, 40);
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let mut tracker = ScoreTracker::new(0);
        tracker.score = 25;
        tracker.best_score = 25;
        tracker.streak = 4;
        tracker.reset_for_run();
        assert_eq!(tracker, ScoreTracker::new(25));
    }

    proptest! {
        #[test]
        fn prop_multiplier_in_bounds(streak in 0u32..10_000, step in 0u32..50, cap in 0u32..20) {
            let tuning = StreakTuning { streak_step: step, max_multiplier: cap };
            let multiplier = multiplier_for(streak, &tuning);
            prop_assert!(multiplier >= 1);
            prop_assert!(multiplier <= cap.max(1));
        }
    }
}
