//! Run controller: the top-level state machine
//!
//! IDLE -> READY -> PLAYING <-> PAUSED -> GAMEOVER, driven once per frame
//! through `tick`. Owns the run state exclusively; collaborators only receive
//! snapshots. Collaborator failures are logged and replaced with a neutral
//! outcome, so nothing here returns an error.

use super::resolver::{self, Outcome};
use super::state::{
    GameOverReason, GameOverReport, HudSnapshot, LastCommand, RewardTicket, RunState, RunStatus,
};
use super::{Command, Obstacle};
use crate::platform::Collaborators;
use crate::tuning::GameTuning;

pub struct RunController {
    tuning: GameTuning,
    state: RunState,
    collaborators: Collaborators,
}

impl RunController {
    /// Tuning defects are repaired here, once
    pub fn new(tuning: GameTuning, seed: u64, collaborators: Collaborators) -> Self {
        Self {
            tuning: tuning.sanitized(),
            state: RunState::new(seed),
            collaborators,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }

    pub fn hud(&self) -> HudSnapshot {
        self.state.hud()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.state.scheduler.obstacles()
    }

    pub fn last_report(&self) -> Option<&GameOverReport> {
        self.state.last_report.as_ref()
    }

    pub fn precision(&self) -> super::Precision {
        self.state.precision
    }

    /// Whether a rewarded continue may still be offered this run
    pub fn can_continue_with_reward(&self) -> bool {
        let rewarded = &self.tuning.rewarded;
        rewarded.enabled && self.state.rewarded_continues_in_run < rewarded.max_per_run
    }

    /// IDLE -> READY, loading the persisted best score
    pub fn init(&mut self) {
        if self.state.status != RunStatus::Idle {
            log::debug!("init ignored in {:?}", self.state.status);
            return;
        }
        let best_score = match self.collaborators.store.load_best_score() {
            Ok(score) => score,
            Err(err) => {
                log::warn!("Failed to load best score, using 0: {err}");
                0
            }
        };
        self.state.tracker.best_score = best_score;
        self.state.status = RunStatus::Ready;
        log::info!("Ready (best score {best_score})");
    }

    /// READY | GAMEOVER -> PLAYING with a fresh run
    pub fn start_run(&mut self) {
        match self.state.status {
            RunStatus::Ready => {}
            RunStatus::GameOver => {
                self.state.status = RunStatus::Ready;
            }
            status => {
                log::debug!("start_run ignored in {status:?}");
                return;
            }
        }

        let state = &mut self.state;
        state.tracker.reset_for_run();
        state.precision = Default::default();
        state.scheduler.reset(0, &self.tuning);
        state.best_at_run_start = state.tracker.best_score;
        state.run_number += 1;
        state.rewarded_continues_in_run = 0;
        state.pending_reward = None;
        state.reward_offered = false;
        state.last_report = None;
        state.status = RunStatus::Playing;

        log::info!(
            "Run {} started, first spawn in {} ms",
            state.run_number,
            state.scheduler.time_to_next_spawn_ms()
        );
        let hud = self.state.hud();
        self.collaborators.ui.on_hud_update(&hud);
    }

    /// PLAYING -> PAUSED
    pub fn pause(&mut self) {
        if self.state.status == RunStatus::Playing {
            self.state.status = RunStatus::Paused;
            log::info!("Paused");
        }
    }

    /// PAUSED -> PLAYING. Countdowns resume where they froze.
    pub fn resume(&mut self) {
        if self.state.status == RunStatus::Paused {
            self.state.status = RunStatus::Playing;
            log::info!("Resumed");
        }
    }

    /// PAUSED | GAMEOVER -> READY. Abandons a paused run without a report.
    pub fn quit_to_menu(&mut self) {
        match self.state.status {
            RunStatus::Paused => {
                // A live run may already have moved the best score
                if self.state.tracker.best_score > self.state.best_at_run_start {
                    self.persist_best_score();
                }
            }
            RunStatus::GameOver => {}
            status => {
                log::debug!("quit_to_menu ignored in {status:?}");
                return;
            }
        }
        self.state.pending_reward = None;
        self.state.status = RunStatus::Ready;
        log::info!("Back to menu");
    }

    /// Advance the run by one frame. Inert unless PLAYING.
    pub fn tick(&mut self, delta_ms: u32) {
        if self.state.status != RunStatus::Playing {
            return;
        }
        let timing = &self.tuning.timing;
        let delta = i64::from(delta_ms.min(timing.max_frame_delta_ms));
        let state = &mut self.state;

        state.scheduler.advance(delta);
        if state.scheduler.spawn_due() {
            state.scheduler.spawn_tick(state.tracker.score, &self.tuning);
        }

        let expired = state.scheduler.sweep_expired(timing.grace_period_ms);
        if !expired.is_empty() {
            for id in expired {
                state.scheduler.mark_failed(id);
            }
            self.finish_run(GameOverReason::NoCommand);
            return;
        }

        for group in state.scheduler.cleared_groups() {
            state.tracker.register_cleared_group(
                group,
                state.scheduler.obstacles_mut(),
                &self.tuning.streak,
            );
        }
        state.scheduler.cleanup(timing.cleanup_after_ms);

        let hud = self.state.hud();
        self.collaborators.ui.on_hud_update(&hud);
    }

    /// Deliver one finalized utterance.
    ///
    /// Tokens outside the command alphabet count as unrecognized. Only a
    /// recognized command while PLAYING reaches the resolver; the outcome is
    /// returned in that case.
    pub fn apply_command(&mut self, text: &str, recognized: bool) -> Option<Outcome> {
        let command = if recognized { Command::parse(text) } else { None };
        self.collaborators.ui.on_last_command(&LastCommand {
            text: text.trim().to_string(),
            recognized: command.is_some(),
        });

        if self.state.status != RunStatus::Playing {
            log::debug!("Heard {text:?} while {:?}, ignored", self.state.status);
            return None;
        }
        let command = command?;

        let state = &mut self.state;
        let outcome = resolver::resolve(
            command,
            state.scheduler.obstacles_mut(),
            &self.tuning.timing,
            &mut state.precision,
        );
        match outcome {
            Outcome::NoTarget => log::debug!("{command}: nothing in window"),
            Outcome::Correct { obstacle, .. } => log::debug!("{command}: resolved obstacle {obstacle}"),
            Outcome::Incorrect { obstacle, expected } => {
                log::debug!("{command}: obstacle {obstacle} wanted {expected}");
                self.finish_run(GameOverReason::WrongCommand);
            }
        }
        Some(outcome)
    }

    /// Ask the ads collaborator for a rewarded continue.
    ///
    /// Only in GAMEOVER, only while the run has continues left, and only
    /// once per game over. Returns whether an offer was made.
    pub fn request_rewarded_continue(&mut self) -> bool {
        if self.state.status != RunStatus::GameOver {
            log::debug!("Rewarded continue ignored in {:?}", self.state.status);
            return false;
        }
        if !self.can_continue_with_reward() || self.state.reward_offered {
            log::debug!("Rewarded continue not available");
            return false;
        }

        self.state.reward_offered = true;
        let ticket = RewardTicket {
            run: self.state.run_number,
            continues: self.state.rewarded_continues_in_run,
        };
        match self.collaborators.ads.offer_rewarded_continuation(ticket) {
            Ok(()) => {
                self.state.pending_reward = Some(ticket);
                log::info!("Rewarded continue offered");
                true
            }
            Err(err) => {
                log::warn!("Rewarded continue failed, treated as declined: {err}");
                false
            }
        }
    }

    /// The ad for `ticket` completed: GAMEOVER -> PLAYING, keeping the score.
    ///
    /// Stale or duplicate tickets are ignored. Returns whether the run
    /// continued.
    pub fn grant_reward(&mut self, ticket: RewardTicket) -> bool {
        if self.state.status != RunStatus::GameOver || self.state.pending_reward != Some(ticket) {
            log::debug!("Ignoring stale reward {ticket:?}");
            return false;
        }

        let state = &mut self.state;
        state.pending_reward = None;
        state.rewarded_continues_in_run += 1;
        state
            .scheduler
            .clear_unresolved(state.tracker.score, &self.tuning);
        state.status = RunStatus::Playing;
        log::info!("Run {} continued at score {}", state.run_number, state.tracker.score);

        let hud = self.state.hud();
        self.collaborators.ui.on_hud_update(&hud);
        true
    }

    /// PLAYING -> GAMEOVER. The streak is broken before the report is built.
    fn finish_run(&mut self, reason: GameOverReason) {
        let state = &mut self.state;
        state.tracker.break_streak();
        state.tracker.best_score = state.tracker.best_score.max(state.tracker.score);
        state.status = RunStatus::GameOver;
        state.pending_reward = None;
        state.reward_offered = false;
        self.persist_best_score();

        let tracker = &self.state.tracker;
        let precision = self.state.precision;
        let report = GameOverReport {
            reason,
            score: tracker.score,
            best_score: tracker.best_score,
            is_new_record: tracker.score > 0 && tracker.score > self.state.best_at_run_start,
            streak: tracker.streak,
            best_streak: tracker.best_streak_in_run,
            multiplier: tracker.multiplier,
            max_multiplier: tracker.max_multiplier_in_run,
            accuracy: precision.accuracy(),
            precision_percent: precision.percent(),
            feedback_text: self.tuning.feedback_for(tracker.score).to_string(),
            can_continue_with_reward: self.can_continue_with_reward(),
        };
        log::info!(
            "Run {} over ({reason:?}): score {}, best {}",
            self.state.run_number,
            report.score,
            report.best_score
        );

        self.collaborators.ui.on_game_over(&report);
        self.state.last_report = Some(report);
    }

    /// Write-through; a failed write is logged and otherwise ignored
    fn persist_best_score(&mut self) {
        let best = self.state.tracker.best_score;
        if let Err(err) = self.collaborators.store.save_best_score(best) {
            log::warn!("Failed to save best score {best}: {err}");
        }
    }
}

impl std::fmt::Debug for RunController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunController")
            .field("status", &self.state.status)
            .field("hud", &self.state.hud())
            .finish_non_exhaustive()
    }
}
