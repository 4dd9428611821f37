//! Alignment errors.

use std::io;

use thiserror::Error;

/// Result type for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;

/// Errors that can occur while aligning the deserializer channels.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum AlignError {
    /// No rotation of the captured word equals the training pattern.
    ///
    /// The caller promised that the training pattern is on the line, so this is a broken precondition: there is no
    /// offset to fall back to.
    #[error("no rotation of captured word {captured} matches training pattern {target}")]
    NoMatchingRotation { captured: String, target: String },

    /// The channel exhausted its bitslip budget without matching its training pattern.
    #[error("channel {channel} cannot be aligned to its training pattern")]
    Unalignable { channel: usize },

    /// Clock lock was lost while the campaign was running.
    #[error("clock lock lost during alignment")]
    LockLost,

    /// The campaign did not finish in time.
    #[error("alignment did not finish within {ticks} cycles")]
    Timeout { ticks: u64 },

    /// The sticky word alignment error is set. Only a reset clears it.
    #[error("word alignment error pending, reset required")]
    ErrorPending,

    /// Parameters rejected by validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Parameters could not be parsed.
    #[error("failed to parse parameters: {0}")]
    ParamsFormat(#[from] serde_json::Error),

    /// File system error.
    #[error("file system error: {0}")]
    Fs(#[from] io::Error),
}

impl AlignError {
    /// Check if the campaign may succeed when simply restarted.
    ///
    /// Lock loss and timeouts are transient. An unalignable channel needs a reset first.
    pub fn is_transient(&self) -> bool { matches!(self, AlignError::LockLost | AlignError::Timeout { .. }) }
}
