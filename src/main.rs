//! Voice Runner headless entry point
//!
//! Runs one session with the autopilot standing in for the speech
//! collaborator, then prints the game over report as JSON.
//!
//! Usage: `voice-runner [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::Cell;
    use std::rc::Rc;

    use voice_runner::consts::*;
    use voice_runner::persistence::JsonFileStore;
    use voice_runner::platform::{LogUi, RewardedAds};
    use voice_runner::sim::{Autopilot, RewardTicket};
    use voice_runner::{Collaborators, GameTuning, PlatformError, RunController, RunStatus};

    /// Best score file in the working directory
    const BEST_SCORE_PATH: &str = "voice_runner_best.json";

    /// Autopilot hit rate
    const PILOT_ACCURACY: f32 = 0.97;
    const PILOT_REACTION_MS: i64 = 350;

    /// Debug ads: every offer is "watched" on the next frame
    struct DebugAds {
        granted: Rc<Cell<Option<RewardTicket>>>,
    }

    impl RewardedAds for DebugAds {
        fn offer_rewarded_continuation(&mut self, ticket: RewardTicket) -> Result<(), PlatformError> {
            log::info!("Simulating rewarded ad (debug)...");
            self.granted.set(Some(ticket));
            Ok(())
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEED);
        let tuning = match args.next() {
            Some(path) => GameTuning::load(&path).unwrap_or_else(|err| {
                log::warn!("{err}; using default tuning");
                GameTuning::default()
            }),
            None => GameTuning::default(),
        };

        let granted = Rc::new(Cell::new(None));
        let collaborators = Collaborators::new(
            JsonFileStore::new(BEST_SCORE_PATH),
            DebugAds {
                granted: granted.clone(),
            },
            LogUi::default(),
        );
        let mut controller = RunController::new(tuning, seed, collaborators);
        let mut pilot = Autopilot::new(seed, PILOT_ACCURACY, PILOT_REACTION_MS);

        controller.init();
        controller.start_run();
        log::info!("Run started with seed: {seed}");

        for _ in 0..MAX_FRAMES {
            controller.tick(FRAME_MS);
            if controller.status() == RunStatus::Playing {
                if let Some(command) = pilot.decide(controller.obstacles()) {
                    controller.apply_command(command.as_str(), true);
                }
            }

            if controller.status() == RunStatus::GameOver {
                if let Some(ticket) = granted.take() {
                    controller.grant_reward(ticket);
                } else if !controller.request_rewarded_continue() && granted.get().is_none() {
                    break;
                }
            }
        }

        match controller.last_report() {
            Some(report) => match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{json}"),
                Err(err) => log::error!("Failed to encode report: {err}"),
            },
            None => println!("Survived {MAX_FRAMES} frames: {:?}", controller.hud()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Voice Runner (headless) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build embeds the library; there is no standalone binary
}
