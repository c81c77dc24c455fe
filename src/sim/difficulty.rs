//! Difficulty curve: score -> spawn pacing and combo rate

use crate::tuning::DifficultyTuning;

/// Interval used when the band table is empty or the matched band is inverted
pub const FALLBACK_MIN_INTERVAL_MS: u32 = 1800;
pub const FALLBACK_MAX_INTERVAL_MS: u32 = 2400;

/// Spawn pacing in effect at a given score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyCurve {
    pub min_interval_ms: u32,
    pub max_interval_ms: u32,
    pub combos_enabled: bool,
    /// Probability in [0, 1] that a spawn is a combo (when enabled)
    pub combo_percent: f32,
}

impl DifficultyCurve {
    pub const FALLBACK: DifficultyCurve = DifficultyCurve {
        min_interval_ms: FALLBACK_MIN_INTERVAL_MS,
        max_interval_ms: FALLBACK_MAX_INTERVAL_MS,
        combos_enabled: false,
        combo_percent: 0.0,
    };
}

/// Look up the pacing for `score`.
///
/// First band containing the score wins; past every band the last one
/// applies.
pub fn curve_for(score: u64, tuning: &DifficultyTuning) -> DifficultyCurve {
    let Some(band) = tuning
        .bands
        .iter()
        .find(|band| band.contains(score))
        .or(tuning.bands.last())
    else {
        return DifficultyCurve::FALLBACK;
    };

    let (min_interval_ms, max_interval_ms) = if band.is_well_formed() {
        (band.min_interval_ms, band.max_interval_ms)
    } else {
        (FALLBACK_MIN_INTERVAL_MS, FALLBACK_MAX_INTERVAL_MS)
    };

    DifficultyCurve {
        min_interval_ms,
        max_interval_ms,
        combos_enabled: band.combos_enabled,
        combo_percent: combo_percent_for(score, tuning),
    }
}

/// Highest step not exceeding the score, zero below the start score
fn combo_percent_for(score: u64, tuning: &DifficultyTuning) -> f32 {
    let combos = &tuning.combos;
    if score < combos.start_score {
        return 0.0;
    }
    let percent = combos
        .steps
        .iter()
        .filter(|step| step.score <= score)
        .max_by_key(|step| step.score)
        .map_or(combos.initial_percent, |step| step.combo_percent);
    if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 1.0) }
}
