//! Obstacle scheduling
//!
//! Owns the pending-obstacle list: spawns simple obstacles and combo pairs
//! according to the difficulty curve, counts them down, reports the ones
//! that ran out of time, and drops stale ones. It never ends the run itself.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::curve_for;
use super::obstacle::{GroupId, Obstacle, ObstacleGroup, ObstacleId};
use super::Command;
use crate::tuning::GameTuning;

#[derive(Debug, Clone)]
pub struct ObstacleScheduler {
    /// Spawn order
    obstacles: Vec<Obstacle>,
    /// Countdown to the next spawn
    time_to_next_spawn_ms: i64,
    next_id: ObstacleId,
    next_group_id: GroupId,
    rng: Pcg32,
}

impl ObstacleScheduler {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            time_to_next_spawn_ms: 0,
            next_id: 1,
            next_group_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn time_to_next_spawn_ms(&self) -> i64 {
        self.time_to_next_spawn_ms
    }

    /// Clear the board and roll the first spawn delay for a fresh run.
    /// Ids keep increasing across runs.
    pub fn reset(&mut self, score: u64, tuning: &GameTuning) {
        self.obstacles.clear();
        self.reroll_spawn_delay(score, tuning);
    }

    /// Drop every group with a pending or failed member and re-roll the
    /// spawn delay. Used when a finished run is continued.
    pub fn clear_unresolved(&mut self, score: u64, tuning: &GameTuning) {
        let broken: Vec<ObstacleGroup> = self
            .obstacles
            .iter()
            .filter(|o| !o.resolved || o.failed)
            .map(Obstacle::group)
            .collect();
        self.obstacles.retain(|o| !broken.contains(&o.group()));
        self.reroll_spawn_delay(score, tuning);
    }

    /// Push an obstacle directly (scripted setups and tests)
    pub fn insert(
        &mut self,
        group_id: Option<GroupId>,
        required_command: Command,
        time_to_impact_ms: i64,
    ) -> ObstacleId {
        let id = self.allocate_id();
        self.obstacles
            .push(Obstacle::new(id, group_id, required_command, time_to_impact_ms));
        id
    }

    /// Count every non-failed obstacle and the spawn timer down by `delta_ms`
    pub fn advance(&mut self, delta_ms: i64) {
        for obstacle in self.obstacles.iter_mut().filter(|o| !o.failed) {
            obstacle.time_to_impact_ms -= delta_ms;
        }
        self.time_to_next_spawn_ms -= delta_ms;
    }

    /// The spawn countdown has run out
    pub fn spawn_due(&self) -> bool {
        self.time_to_next_spawn_ms <= 0
    }

    /// Spawn a simple obstacle or a combo pair and re-roll the spawn delay
    pub fn spawn_tick(&mut self, score: u64, tuning: &GameTuning) {
        let curve = curve_for(score, &tuning.difficulty);
        let approach = i64::from(tuning.timing.approach_ms);

        let combo = curve.combos_enabled
            && curve.combo_percent > 0.0
            && self.rng.random::<f32>() < curve.combo_percent;

        if combo {
            let patterns = &tuning.difficulty.combos.patterns;
            let [first, second] = if patterns.is_empty() {
                [Command::Jump, Command::Duck]
            } else {
                patterns[self.rng.random_range(0..patterns.len())]
            };
            let group_id = self.next_group_id;
            self.next_group_id += 1;
            let gap = i64::from(tuning.timing.combo_gap_ms);
            self.insert(Some(group_id), first, approach);
            self.insert(Some(group_id), second, approach + gap);
            log::debug!("Spawned combo {group_id}: {first} then {second} (score {score})");
        } else {
            let command = Command::ALL[self.rng.random_range(0..Command::ALL.len())];
            let id = self.insert(None, command, approach);
            log::debug!("Spawned obstacle {id}: {command} (score {score})");
        }

        self.reroll_spawn_delay(score, tuning);
    }

    /// Unresolved, non-failed obstacles that fell past the grace period
    pub fn sweep_expired(&self, grace_period_ms: u32) -> Vec<ObstacleId> {
        let deadline = -i64::from(grace_period_ms);
        self.obstacles
            .iter()
            .filter(|o| o.is_pending() && o.time_to_impact_ms < deadline)
            .map(|o| o.id)
            .collect()
    }

    /// Groups whose every member is resolved and has reached impact,
    /// and which have not been scored yet. Spawn order, no duplicates.
    pub fn cleared_groups(&self) -> Vec<ObstacleGroup> {
        let mut groups: Vec<ObstacleGroup> = Vec::new();
        for obstacle in &self.obstacles {
            if obstacle.scored || !obstacle.resolved || !obstacle.has_reached_impact() {
                continue;
            }
            let group = obstacle.group();
            if groups.contains(&group) {
                continue;
            }
            let cleared = group
                .members(&self.obstacles)
                .all(|o| o.resolved && !o.failed && o.has_reached_impact());
            if cleared {
                groups.push(group);
            }
        }
        groups
    }

    /// Mark an obstacle as the cause of game over
    pub fn mark_failed(&mut self, id: ObstacleId) {
        if let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.id == id) {
            obstacle.failed = true;
        }
    }

    /// Drop scored obstacles once they are `cleanup_after_ms` past impact
    pub fn cleanup(&mut self, cleanup_after_ms: u32) {
        let horizon = -i64::from(cleanup_after_ms);
        self.obstacles
            .retain(|o| !(o.scored && o.time_to_impact_ms < horizon));
    }

    fn reroll_spawn_delay(&mut self, score: u64, tuning: &GameTuning) {
        let curve = curve_for(score, &tuning.difficulty);
        let delay = self
            .rng
            .random_range(curve.min_interval_ms..=curve.max_interval_ms);
        self.time_to_next_spawn_ms = i64::from(delay);
    }

    fn allocate_id(&mut self) -> ObstacleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
