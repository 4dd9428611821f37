//! Run-time parameters of the alignment core.

use serde::{Deserialize, Serialize};
use wordalign::*;

use crate::constants::{channel_align, training};
use crate::error::{AlignError, AlignResult};
use crate::types::*;

/// Run-time parameters of the alignment core.
///
/// Word width and channel count are fixed by the type parameters of the modules; everything else lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Cycles to wait after a bitslip before the word is compared again.
    pub settle_delay: u32,

    /// Bitslip counter wraps observed before a channel is declared unalignable.
    pub max_wraps: u32,

    /// Training pattern of the data channels.
    pub data_pattern: u32,

    /// Training pattern of the control channel.
    pub control_pattern: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            settle_delay: channel_align::SETTLE_DELAY,
            max_wraps: channel_align::MAX_WRAPS,
            data_pattern: training::DATA_PATTERN,
            control_pattern: training::CONTROL_PATTERN,
        }
    }
}

impl Params {
    /// Parses parameters from JSON. Missing fields keep their default.
    pub fn from_json(json: &str) -> AlignResult<Self> { Ok(serde_json::from_str(json)?) }

    /// Checks the parameters against word width `W`.
    pub fn validate<const W: usize>(&self) -> AlignResult<()> {
        if self.settle_delay == 0 {
            return Err(AlignError::InvalidParams("settle delay must be at least one cycle".to_string()));
        }
        if self.max_wraps == 0 {
            return Err(AlignError::InvalidParams("at least one bitslip counter wrap must be tolerated".to_string()));
        }
        for (name, pattern) in [("data", self.data_pattern), ("control", self.control_pattern)] {
            if pattern & !mask(W) != 0 {
                return Err(AlignError::InvalidParams(format!("{} pattern {:#b} is wider than {} bits", name, pattern, W)));
            }
            if !rotations_distinct(pattern, W) {
                return Err(AlignError::InvalidParams(format!(
                    "{} pattern {} has repeated rotations",
                    name,
                    Bits::<W>::new(pattern)
                )));
            }
        }
        Ok(())
    }

    /// Training pattern of every channel.
    pub fn patterns<const N: usize, const W: usize>(&self) -> Words<N, W> {
        Lanes::from_fn(|i| Bits::new(if i == N { self.control_pattern } else { self.data_pattern }))
    }

    /// Bitslips a channel may issue before it fails even without observed wraps.
    pub fn bitslip_budget<const W: usize>(&self) -> u32 {
        let width = u32::try_from(W).unwrap_or(u32::MAX);
        self.max_wraps.saturating_add(1).saturating_mul(width)
    }
}
