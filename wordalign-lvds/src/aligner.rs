//! Iterative bitslip alignment over deserializer primitives.

use crate::align_core::{self, AlignCore};
use crate::error::{AlignError, AlignResult};
use crate::params::Params;
use crate::primitive::Primitive;
use crate::strategy::{Alignment, FindAlignment};
use crate::types::*;

/// Alignment core wired to a set of primitives.
#[derive(Debug)]
pub struct Aligner<const N: usize, const W: usize> {
    core: AlignCore<N, W>,
    params: Params,
    ticks: u64,
    bitslips: Lanes<u32, N>,
}

impl<const N: usize, const W: usize> Aligner<N, W> {
    /// Creates the aligner after validating `params`.
    pub fn new(params: Params) -> AlignResult<Self> {
        Ok(Self { core: AlignCore::new(params)?, params, ticks: 0, bitslips: Lanes::splat(0) })
    }

    /// Returns the core.
    pub fn core(&self) -> &AlignCore<N, W> { &self.core }

    /// Cycles run since creation.
    pub fn ticks(&self) -> u64 { self.ticks }

    /// Bitslips issued per channel since the last start or reset.
    pub fn bitslips(&self) -> &Lanes<u32, N> { &self.bitslips }

    /// Upper bound on the cycles of one campaign, failures included.
    pub fn campaign_bound(&self) -> u64 {
        let channels = Lanes::<u32, N>::COUNT as u64;
        let attempts = u64::from(self.params.bitslip_budget::<W>()) + 2;
        channels * attempts * (u64::from(self.params.settle_delay) + 1) + 1
    }

    /// Runs one cycle: samples every primitive, ticks the core, and applies the bitslip.
    pub fn tick<P: Primitive<W>>(
        &mut self, lanes: &mut Lanes<P, N>, start: bool, reset: bool,
    ) -> align_core::O<N, W> {
        let words = Lanes::from_fn(|i| lanes[i].sample());
        let wrapped = lanes.map(|p| p.wrapped());
        let locked = lanes.map(|p| p.locked());

        let out = self.core.tick(&align_core::I { reset, start, words, wrapped, locked });

        if reset || (start && !out.error) {
            self.bitslips = Lanes::splat(0);
        }
        for (index, (primitive, bitslip)) in lanes.iter_mut().zip(out.bitslip.iter()).enumerate() {
            if *bitslip {
                primitive.correct();
                self.bitslips[index] += 1;
            }
        }
        self.ticks += 1;
        out
    }

    /// Issues a start command and runs until the campaign ends or `max_ticks` cycles have passed.
    pub fn run<P: Primitive<W>>(&mut self, lanes: &mut Lanes<P, N>, max_ticks: u64) -> AlignResult<Alignment<N>> {
        if self.core.error() {
            return Err(AlignError::ErrorPending);
        }

        let first = self.ticks;
        for cycle in 0..max_ticks {
            let out = self.tick(lanes, cycle == 0, false);
            if out.done {
                return Ok(Alignment { ticks: self.ticks - first, bitslips: self.bitslips });
            }
            if let Some(channel) = out.failed {
                return Err(AlignError::Unalignable { channel });
            }
            if out.aborted {
                return Err(AlignError::LockLost);
            }
        }
        Err(AlignError::Timeout { ticks: max_ticks })
    }

    /// Forces every module to its initial state, clearing the word alignment error.
    pub fn reset<P: Primitive<W>>(&mut self, lanes: &mut Lanes<P, N>) { self.tick(lanes, false, true); }
}

impl<const N: usize, const W: usize> FindAlignment<N, W> for Aligner<N, W> {
    fn align<P: Primitive<W>>(&mut self, lanes: &mut Lanes<P, N>) -> AlignResult<Alignment<N>> {
        let bound = self.campaign_bound();
        self.run(lanes, bound)
    }
}
