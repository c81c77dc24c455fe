//! Data-driven game balance
//!
//! Every tunable number lives here. Defaults reproduce the shipped balance
//! table; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::sim::Command;

/// One score band of the difficulty table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBand {
    /// Inclusive lower bound
    pub min_score: u64,
    /// Exclusive upper bound (`None` = unbounded)
    pub max_score: Option<u64>,
    pub min_interval_ms: u32,
    pub max_interval_ms: u32,
    pub combos_enabled: bool,
}

impl DifficultyBand {
    pub fn contains(&self, score: u64) -> bool {
        score >= self.min_score && self.max_score.is_none_or(|max| score < max)
    }

    /// An inverted range cannot be sampled
    pub fn is_well_formed(&self) -> bool {
        self.min_interval_ms <= self.max_interval_ms
    }
}

/// Combo percentage step: applies from `score` upward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboStep {
    pub score: u64,
    pub combo_percent: f32,
}

/// Combo (paired obstacle) tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboTuning {
    /// No combos below this score, whatever the band says
    pub start_score: u64,
    /// Percentage in effect from `start_score` until the first step
    pub initial_percent: f32,
    /// Ordered by ascending score
    pub steps: Vec<ComboStep>,
    /// Ordered command pairs a combo may require
    pub patterns: Vec<[Command; 2]>,
}

impl Default for ComboTuning {
    fn default() -> Self {
        Self {
            start_score: 50,
            initial_percent: 0.12,
            steps: vec![
                ComboStep {
                    score: 150,
                    combo_percent: 0.20,
                },
                ComboStep {
                    score: 250,
                    combo_percent: 0.30,
                },
                ComboStep {
                    score: 350,
                    combo_percent: 0.40,
                },
            ],
            patterns: vec![
                [Command::Jump, Command::Duck],
                [Command::Duck, Command::Jump],
                [Command::Left, Command::Right],
                [Command::Right, Command::Left],
            ],
        }
    }
}

/// Spawn pacing by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub bands: Vec<DifficultyBand>,
    pub combos: ComboTuning,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            bands: vec![
                DifficultyBand {
                    min_score: 0,
                    max_score: Some(20),
                    min_interval_ms: 1800,
                    max_interval_ms: 2400,
                    combos_enabled: false,
                },
                DifficultyBand {
                    min_score: 20,
                    max_score: Some(50),
                    min_interval_ms: 1200,
                    max_interval_ms: 2000,
                    combos_enabled: false,
                },
                DifficultyBand {
                    min_score: 50,
                    max_score: Some(100),
                    min_interval_ms: 900,
                    max_interval_ms: 1600,
                    combos_enabled: true,
                },
                DifficultyBand {
                    min_score: 100,
                    max_score: None,
                    min_interval_ms: 700,
                    max_interval_ms: 1400,
                    combos_enabled: true,
                },
            ],
            combos: ComboTuning::default(),
        }
    }
}

/// Timing windows, all in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingTuning {
    /// Time from spawn to nominal impact
    pub approach_ms: u32,
    /// How long before impact a command may already apply
    pub early_window_ms: u32,
    /// How long after impact a command is still accepted
    pub grace_period_ms: u32,
    /// Offset of the second obstacle of a combo
    pub combo_gap_ms: u32,
    /// Frame delta clamp (stalled frames do not catch up)
    pub max_frame_delta_ms: u32,
    /// Scored obstacles are dropped this long after impact
    pub cleanup_after_ms: u32,
}

impl Default for TimingTuning {
    fn default() -> Self {
        Self {
            approach_ms: 2200,
            early_window_ms: 900,
            grace_period_ms: 300,
            combo_gap_ms: 450,
            max_frame_delta_ms: 100,
            cleanup_after_ms: 1000,
        }
    }
}

/// Streak -> multiplier rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakTuning {
    /// Cleared groups per multiplier level
    pub streak_step: u32,
    pub max_multiplier: u32,
}

impl Default for StreakTuning {
    fn default() -> Self {
        Self {
            streak_step: 10,
            max_multiplier: 5,
        }
    }
}

/// End-of-run feedback line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackBand {
    /// Inclusive ceiling (`None` = unbounded)
    pub score_ceiling: Option<u64>,
    pub message: String,
}

fn default_feedback() -> Vec<FeedbackBand> {
    [
        (Some(10), "We can barely hear you... get closer to the mic."),
        (Some(30), "Not bad! You're starting to make yourself understood."),
        (Some(60), "Well played! You're getting the hang of the commands."),
        (Some(100), "Very good! You speak, the game almost always obeys."),
        (None, "Excellent! You rule the game, your voice is law."),
    ]
    .into_iter()
    .map(|(score_ceiling, message)| FeedbackBand {
        score_ceiling,
        message: message.to_string(),
    })
    .collect()
}

/// Rewarded "continue" offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardedTuning {
    pub enabled: bool,
    pub max_per_run: u32,
}

impl Default for RewardedTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            max_per_run: 1,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub difficulty: DifficultyTuning,
    pub timing: TimingTuning,
    pub streak: StreakTuning,
    #[serde(default = "default_feedback")]
    pub feedback: Vec<FeedbackBand>,
    pub rewarded: RewardedTuning,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            difficulty: DifficultyTuning::default(),
            timing: TimingTuning::default(),
            streak: StreakTuning::default(),
            feedback: default_feedback(),
            rewarded: RewardedTuning::default(),
        }
    }
}

impl GameTuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Report the first invariant violation, if any
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.difficulty.bands.is_empty() {
            return Err(TuningError::NoBands);
        }
        for (index, band) in self.difficulty.bands.iter().enumerate() {
            if !band.is_well_formed() {
                return Err(TuningError::InvertedBand {
                    index,
                    min: band.min_interval_ms,
                    max: band.max_interval_ms,
                });
            }
        }
        let combos = &self.difficulty.combos;
        let percents =
            std::iter::once(combos.initial_percent).chain(combos.steps.iter().map(|s| s.combo_percent));
        for value in percents {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::ComboPercent { value });
            }
        }
        if combos.patterns.is_empty() {
            return Err(TuningError::NoComboPatterns);
        }
        if self.streak.streak_step == 0 {
            return Err(TuningError::ZeroStreakStep);
        }
        if self.streak.max_multiplier == 0 {
            return Err(TuningError::ZeroMultiplierCap);
        }
        if self.feedback.is_empty() {
            return Err(TuningError::NoFeedback);
        }
        Ok(())
    }

    /// Repair defects in place so gameplay can always proceed.
    ///
    /// Empty or inverted difficulty bands are left alone: `curve_for`
    /// substitutes its own fallback range for those.
    pub fn sanitized(mut self) -> Self {
        if let Err(err) = self.validate() {
            log::warn!("Tuning needs repair: {err}");
        }

        let combos = &mut self.difficulty.combos;
        combos.initial_percent = clamp_percent(combos.initial_percent);
        for step in &mut combos.steps {
            step.combo_percent = clamp_percent(step.combo_percent);
        }
        combos.steps.sort_by_key(|s| s.score);
        if combos.patterns.is_empty() {
            combos.patterns = ComboTuning::default().patterns;
        }

        self.streak.streak_step = self.streak.streak_step.max(1);
        self.streak.max_multiplier = self.streak.max_multiplier.max(1);
        if self.feedback.is_empty() {
            self.feedback = default_feedback();
        }
        self
    }

    /// Feedback message for a final score: first band whose ceiling covers it
    pub fn feedback_for(&self, score: u64) -> &str {
        self.feedback
            .iter()
            .find(|band| band.score_ceiling.is_none_or(|ceiling| ceiling >= score))
            .or(self.feedback.last())
            .map(|band| band.message.as_str())
            .unwrap_or("")
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
