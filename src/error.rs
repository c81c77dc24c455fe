//! Error types
//!
//! None of these cross the `RunController` surface: tuning errors are
//! repaired by `GameTuning::sanitized`, platform errors are logged and
//! replaced by a neutral outcome at the call site.

use thiserror::Error;

/// Problems with a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("difficulty table has no bands")]
    NoBands,
    #[error("difficulty band {index} interval inverted (min {min} ms > max {max} ms)")]
    InvertedBand { index: usize, min: u32, max: u32 },
    #[error("combo percent must be between 0 and 1 (got {value:.2})")]
    ComboPercent { value: f32 },
    #[error("combo pattern list is empty")]
    NoComboPatterns,
    #[error("streak step must be at least 1")]
    ZeroStreakStep,
    #[error("multiplier cap must be at least 1")]
    ZeroMultiplierCap,
    #[error("feedback table is empty")]
    NoFeedback,
}

/// Failures reported by external collaborators
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("storage I/O failed: {0}")]
    StorageIo(#[from] std::io::Error),
    #[error("stored record is corrupt: {0}")]
    StorageFormat(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("rewarded ad failed: {0}")]
    Ads(String),
}
