//! Alignment core.
//!
//! Wires the per-channel alignment, the sequencer, the lock-loss monitor and the output gate. All of them are clocked
//! by the recovered parallel clock; one [`AlignCore::tick`] is one cycle of it.

use wordalign::*;

use crate::channel_align::{self, ChannelAlign};
use crate::error::AlignResult;
use crate::lock_monitor::{self, LockMonitor};
use crate::output_gate::{self, OutputGate};
use crate::params::Params;
use crate::sequencer::{self, Sequencer};
use crate::types::*;

/// Input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I<const N: usize, const W: usize> {
    /// Master reset. Wins over everything else.
    pub reset: bool,

    /// Start alignment command.
    pub start: bool,

    /// Words of every channel.
    pub words: Words<N, W>,

    /// Bitslip counter wrap of every channel.
    pub wrapped: Lanes<bool, N>,

    /// Clock lock of every channel.
    pub locked: Lanes<bool, N>,
}

/// Output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct O<const N: usize, const W: usize> {
    /// Bitslip requests. At most one channel is set.
    pub bitslip: Lanes<bool, N>,

    /// Channel that completed in this cycle.
    pub channel_done: Option<usize>,

    /// Channel declared unalignable in this cycle.
    pub failed: Option<usize>,

    /// The campaign was aborted by lock loss in this cycle.
    pub aborted: bool,

    /// Alignment done.
    pub done: bool,

    /// Sticky word alignment error.
    pub error: bool,

    /// A campaign is running.
    pub busy: bool,

    /// Every channel is locked.
    pub lock_good: bool,

    /// Gated words.
    pub output: Valid<Words<N, W>>,
}

impl<const N: usize, const W: usize> O<N, W> {
    fn idle(lock_good: bool) -> Self {
        Self {
            bitslip: Lanes::splat(false),
            channel_done: None,
            failed: None,
            aborted: false,
            done: false,
            error: false,
            busy: false,
            lock_good,
            output: output_gate::blank(),
        }
    }

    /// The output gate forwards the words.
    pub fn aligned(&self) -> bool { self.output.valid }
}

/// Alignment core over `N` data channels and the control channel, with `W`-bit words.
#[derive(Debug)]
pub struct AlignCore<const N: usize, const W: usize> {
    patterns: Words<N, W>,
    channel_align: Module<ChannelAlign<W>>,
    sequencer: Module<Sequencer<N>>,
    lock_monitor: Module<LockMonitor<N>>,
    output_gate: Module<OutputGate<N, W>>,
}

impl<const N: usize, const W: usize> AlignCore<N, W> {
    /// Creates the core after validating `params`.
    pub fn new(params: Params) -> AlignResult<Self> {
        params.validate::<W>()?;
        Ok(Self {
            patterns: params.patterns(),
            channel_align: Module::new("channel_align", ChannelAlign::new(&params)),
            sequencer: Module::new("sequencer", Sequencer::<N>),
            lock_monitor: Module::new("lock_monitor", lock_monitor::m()),
            output_gate: Module::new("output_gate", output_gate::m()),
        })
    }

    /// Training pattern of every channel.
    pub fn patterns(&self) -> &Words<N, W> { &self.patterns }

    /// The output gate forwards the words.
    pub fn aligned(&self) -> bool { *self.output_gate.state() == output_gate::S::Aligned }

    /// Sticky word alignment error.
    pub fn error(&self) -> bool { self.channel_align.state().error }

    /// A campaign is running.
    pub fn busy(&self) -> bool { self.sequencer.state().active() }

    /// Channel being aligned, if any.
    pub fn channel(&self) -> Option<usize> { self.sequencer.state().selected() }

    /// Runs one cycle.
    pub fn tick(&mut self, input: &I<N, W>) -> O<N, W> {
        if input.reset {
            self.channel_align.reset();
            self.sequencer.reset();
            self.lock_monitor.reset();
            self.output_gate.reset();
            return O::idle(input.locked.all());
        }

        let seq = *self.sequencer.state();
        let channel = seq.channel;

        let lock = self.lock_monitor.tick(lock_monitor::I { active: seq.active(), locked: input.locked });

        let align = self.channel_align.tick(channel_align::I {
            start: seq.request().is_some(),
            abort: input.start || lock.lost,
            word: input.words[channel],
            pattern: self.patterns[channel],
            wrapped: input.wrapped[channel],
        });

        let seq_out = self.sequencer.tick(sequencer::I {
            start: input.start,
            done: align.done,
            failed: align.failed,
            error: align.error,
            lost_lock: lock.lost,
        });

        let output =
            self.output_gate.tick(output_gate::I { start: input.start, done: seq_out.done, words: input.words });

        if input.start {
            if seq_out.refused {
                tracing::warn!("start ignored, word alignment error pending");
            } else if seq.active() {
                tracing::info!(interrupted = channel, "alignment campaign restarted");
            } else {
                tracing::info!(channels = N + 1, "alignment campaign started");
            }
        }
        if align.bitslip {
            tracing::debug!(channel, "bitslip");
        }
        if let Some(channel) = seq_out.channel_done {
            tracing::debug!(channel, "channel aligned");
        }
        if align.failed {
            tracing::error!(channel, pattern = %self.patterns[channel], "channel cannot be aligned");
        }
        if seq_out.aborted {
            tracing::warn!(channel, "clock lock lost, alignment aborted");
        }
        if seq_out.done {
            tracing::info!("all channels aligned");
        }

        O {
            bitslip: if align.bitslip { Lanes::one_hot(channel) } else { Lanes::splat(false) },
            channel_done: seq_out.channel_done,
            failed: align.failed.then_some(channel),
            aborted: seq_out.aborted,
            done: seq_out.done,
            error: align.error,
            busy: self.sequencer.state().active(),
            lock_good: lock.lock_good,
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 2;
    const W: usize = 10;

    fn core() -> AlignCore<N, W> { AlignCore::new(Params::default()).unwrap() }

    fn input(core: &AlignCore<N, W>) -> I<N, W> {
        I {
            reset: false,
            start: false,
            words: *core.patterns(),
            wrapped: Lanes::splat(false),
            locked: Lanes::splat(true),
        }
    }

    #[test]
    fn rejects_invalid_params() {
        assert!(AlignCore::<N, W>::new(Params { settle_delay: 0, ..Params::default() }).is_err());
    }

    #[test]
    fn aligned_words_pass_through() {
        let mut core = core();
        let idle = input(&core);
        core.tick(&I { start: true, ..idle });

        let mut completed = vec![];
        let mut done_cycle = None;
        for cycle in 0..20 {
            let out = core.tick(&idle);
            assert_eq!(out.bitslip.first(), None);
            completed.extend(out.channel_done);
            if out.done {
                assert_eq!(out.output, Valid::valid(idle.words));
                done_cycle = Some(cycle);
                break;
            }
            assert!(!out.output.valid);
        }
        assert_eq!(completed, vec![0, 1, 2]);
        // Two cycles per channel: request, then compare.
        assert_eq!(done_cycle, Some(2 * (N + 1) - 1));
        assert!(core.aligned());
        assert!(!core.busy());
    }

    #[test]
    fn bitslip_goes_to_selected_channel() {
        let mut core = core();
        let mut idle = input(&core);
        idle.words.data[1] = idle.words.data[1].rotate_left(1);
        core.tick(&I { start: true, ..idle });

        let mut bitslips = vec![];
        for _ in 0..10 {
            let out = core.tick(&idle);
            bitslips.extend(out.bitslip.first());
        }
        assert!(!bitslips.is_empty());
        assert!(bitslips.iter().all(|channel| *channel == 1));
    }

    #[test]
    fn reset_forces_idle() {
        let mut core = core();
        let mut idle = input(&core);
        idle.words.control = Bits::zero();
        core.tick(&I { start: true, ..idle });
        for _ in 0..8 {
            core.tick(&idle);
        }
        assert!(core.busy());

        let out = core.tick(&I { reset: true, ..idle });
        assert_eq!(out, O::idle(true));
        assert!(!core.busy());
        assert!(!core.aligned());
        assert_eq!(core.channel(), None);
    }

    #[test]
    fn lock_good_reflects_all_channels() {
        let mut core = core();
        let mut idle = input(&core);
        assert!(core.tick(&idle).lock_good);
        idle.locked.control = false;
        assert!(!core.tick(&idle).lock_good);
    }
}
