//! One-shot offset search.
//!
//! Instead of bitslipping and re-checking one bit at a time, the captured word is compared against every rotation of
//! the training pattern at once, and the bitslips for the matching offset are issued in consecutive cycles.

use wordalign::*;

use crate::error::{AlignError, AlignResult};
use crate::params::Params;
use crate::primitive::Primitive;
use crate::strategy::{Alignment, FindAlignment};
use crate::types::*;

/// Returns the smallest `k` in `0..W` such that `captured.rotate_right(k) == target`.
///
/// Fails if no rotation matches: the target is not on the line, and any offset would corrupt the framing.
pub fn find_offset<const W: usize>(captured: Bits<W>, target: Bits<W>) -> AlignResult<usize> {
    (0..W).find(|k| captured.rotate_right(*k) == target).ok_or_else(|| {
        tracing::error!(%captured, %target, "no rotation matches the training pattern");
        AlignError::NoMatchingRotation { captured: captured.to_string(), target: target.to_string() }
    })
}

/// One-shot alignment strategy.
#[derive(Debug, Clone)]
pub struct OffsetSearch<const N: usize, const W: usize> {
    patterns: Words<N, W>,
    settle_delay: u32,
}

impl<const N: usize, const W: usize> OffsetSearch<N, W> {
    /// Creates the strategy after validating `params`.
    pub fn new(params: Params) -> AlignResult<Self> {
        params.validate::<W>()?;
        Ok(Self { patterns: params.patterns(), settle_delay: params.settle_delay })
    }
}

impl<const N: usize, const W: usize> FindAlignment<N, W> for OffsetSearch<N, W> {
    fn align<P: Primitive<W>>(&mut self, lanes: &mut Lanes<P, N>) -> AlignResult<Alignment<N>> {
        let mut ticks = 0;
        let mut bitslips = Lanes::splat(0);

        for channel in 0..Lanes::<P, N>::COUNT {
            if !lanes.iter().all(|p| p.locked()) {
                tracing::warn!(channel, "clock lock lost, alignment aborted");
                return Err(AlignError::LockLost);
            }

            let pattern = self.patterns[channel];
            let primitive = &mut lanes[channel];
            let captured = primitive.sample();
            ticks += 1;

            // One bitslip per cycle, the first one in the capture cycle.
            let offset = find_offset(captured, pattern)?;
            for slip in 0..offset {
                if slip > 0 {
                    primitive.sample();
                    ticks += 1;
                }
                primitive.correct();
            }
            bitslips[channel] = u32::try_from(offset).unwrap_or(u32::MAX);

            for _ in 0..self.settle_delay {
                primitive.sample();
                ticks += 1;
            }
            let settled = primitive.sample();
            ticks += 1;
            if settled != pattern {
                tracing::error!(channel, %settled, %pattern, "channel did not settle on its training pattern");
                return Err(AlignError::Unalignable { channel });
            }
            tracing::debug!(channel, offset, "channel aligned");
        }

        Ok(Alignment { ticks, bitslips })
    }
}
