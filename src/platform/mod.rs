//! Platform abstraction layer
//!
//! Capabilities the game core drives but does not implement:
//! - Best-score storage
//! - Rewarded ads
//! - UI (HUD, last heard command, game over screen)
//!
//! Every capability is required; environments without one plug in the
//! null implementations below.

use crate::error::PlatformError;
use crate::sim::{GameOverReport, HudSnapshot, LastCommand, RewardTicket};

/// Persistent best score (key/value read-modify-write)
pub trait ScoreStore {
    /// Must return `Ok(0)` when nothing was stored yet
    fn load_best_score(&mut self) -> Result<u64, PlatformError>;
    fn save_best_score(&mut self, score: u64) -> Result<(), PlatformError>;
}

/// Rewarded "continue" ads
pub trait RewardedAds {
    /// Show an offer. On success the host calls
    /// `RunController::grant_reward(ticket)`; never calling it means declined.
    fn offer_rewarded_continuation(&mut self, ticket: RewardTicket) -> Result<(), PlatformError>;
}

/// Outbound UI events
pub trait GameUi {
    fn on_hud_update(&mut self, hud: &HudSnapshot);
    fn on_last_command(&mut self, command: &LastCommand);
    fn on_game_over(&mut self, report: &GameOverReport);
}

/// Everything the controller talks to
pub struct Collaborators {
    pub store: Box<dyn ScoreStore>,
    pub ads: Box<dyn RewardedAds>,
    pub ui: Box<dyn GameUi>,
}

impl Collaborators {
    pub fn new(
        store: impl ScoreStore + 'static,
        ads: impl RewardedAds + 'static,
        ui: impl GameUi + 'static,
    ) -> Self {
        Self {
            store: Box::new(store),
            ads: Box::new(ads),
            ui: Box::new(ui),
        }
    }

    /// In-memory store, no ads, silent UI
    pub fn headless() -> Self {
        Self::new(MemoryStore::default(), NoAds, NullUi)
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best_score: u64,
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&mut self) -> Result<u64, PlatformError> {
        Ok(self.best_score)
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), PlatformError> {
        self.best_score = score;
        Ok(())
    }
}

/// Ads unavailable: every offer is declined
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAds;

impl RewardedAds for NoAds {
    fn offer_rewarded_continuation(&mut self, ticket: RewardTicket) -> Result<(), PlatformError> {
        log::debug!("No ads available, {ticket:?} declined");
        Err(PlatformError::Ads("no ads provider".into()))
    }
}

/// Discards every UI event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUi;

impl GameUi for NullUi {
    fn on_hud_update(&mut self, _hud: &HudSnapshot) {}
    fn on_last_command(&mut self, _command: &LastCommand) {}
    fn on_game_over(&mut self, _report: &GameOverReport) {}
}

/// Writes UI events to the log (headless runs)
#[derive(Debug, Clone, Default)]
pub struct LogUi {
    last_hud: Option<HudSnapshot>,
}

impl GameUi for LogUi {
    fn on_hud_update(&mut self, hud: &HudSnapshot) {
        // Only log changes; this fires every frame
        if self.last_hud.as_ref() != Some(hud) {
            log::info!(
                "Score {} (best {}) streak {} x{}",
                hud.score,
                hud.best_score,
                hud.streak,
                hud.multiplier
            );
            self.last_hud = Some(hud.clone());
        }
    }

    fn on_last_command(&mut self, command: &LastCommand) {
        log::info!(
            "Heard \"{}\" ({})",
            command.text,
            if command.recognized { "recognized" } else { "not recognized" }
        );
    }

    fn on_game_over(&mut self, report: &GameOverReport) {
        log::info!(
            "Game over ({:?}): score {}, best {}, precision {}% - {}",
            report.reason,
            report.score,
            report.best_score,
            report.precision_percent,
            report.feedback_text
        );
    }
}
