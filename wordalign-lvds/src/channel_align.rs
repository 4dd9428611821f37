//! Per-channel word alignment.
//!
//! Drives the bitslip of the selected channel until its word equals the training pattern. After every bitslip the
//! deserializer output is given `settle_delay` cycles to become valid again. While waiting, the bitslip counter wraps
//! of the primitive are credited, at most one per bitslip; once `max_wraps` wraps were credited without a match, and
//! at least `W` bitslips were issued, the channel is unalignable and the sticky word alignment error is raised.

use wordalign::*;
use wordalign_std::*;

use crate::params::Params;

/// Input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I<const W: usize> {
    /// Starts aligning the selected channel.
    pub start: bool,

    /// Returns to idle without reporting success or failure. Wins over everything else but keeps the error.
    pub abort: bool,

    /// Word of the selected channel.
    pub word: Bits<W>,

    /// Training pattern of the selected channel.
    pub pattern: Bits<W>,

    /// Bitslip counter of the selected channel wrapped.
    pub wrapped: bool,
}

/// Output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct O {
    /// Bitslip request for the selected channel.
    pub bitslip: bool,

    /// The selected channel matches its training pattern.
    pub done: bool,

    /// The selected channel was declared unalignable in this cycle.
    pub failed: bool,

    /// Sticky word alignment error.
    pub error: bool,
}

/// Phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a start.
    #[default]
    Idle,

    /// Comparing the word against the training pattern.
    Checking,

    /// Waiting for the deserializer output to settle after a bitslip.
    Waiting,
}

/// State.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct S {
    /// Phase.
    pub phase: Phase,

    /// Settle cycles remaining.
    pub settle: u32,

    /// Bitslip counter wraps credited since the start.
    pub wraps: u32,

    /// The last bitslip has not been credited with a wrap yet.
    pub wrap_armed: bool,

    /// Bitslips issued since the start.
    pub bitslips: u32,

    /// Sticky word alignment error.
    pub error: bool,
}

impl S {
    fn output(&self) -> O { O { error: self.error, ..O::default() } }
}

/// Per-channel alignment FSM.
#[derive(Debug, Clone)]
pub struct ChannelAlign<const W: usize> {
    settle_delay: u32,
    timer: Countdown,
    wraps: SaturatingCounter,
    bitslips: SaturatingCounter,
    error: Sticky,
}

impl<const W: usize> ChannelAlign<W> {
    /// Creates the FSM. `params` are expected to be validated.
    pub fn new(params: &Params) -> Self {
        Self {
            settle_delay: params.settle_delay,
            timer: Countdown,
            wraps: SaturatingCounter::new(params.max_wraps),
            bitslips: SaturatingCounter::new(params.bitslip_budget::<W>()),
            error: Sticky,
        }
    }

    /// Bitslips that try every rotation once.
    fn sweep(&self) -> u32 { u32::try_from(W).unwrap_or(u32::MAX) }

    fn fail(&self, s: S) -> (O, S) {
        let (error, _) = self.error.step(StickyI { set: true, clear: false }, s.error);
        (O { failed: true, error, ..O::default() }, S { phase: Phase::Idle, error, ..s })
    }
}

impl<const W: usize> Fsm for ChannelAlign<W> {
    type I = I<W>;
    type O = O;
    type S = S;

    fn init(&self) -> S { S::default() }

    fn step(&self, input: I<W>, s: S) -> (O, S) {
        if input.abort {
            return (s.output(), S { phase: Phase::Idle, ..s });
        }

        match s.phase {
            Phase::Idle => {
                if input.start && !s.error {
                    (s.output(), S { phase: Phase::Checking, error: s.error, ..S::default() })
                } else {
                    (s.output(), s)
                }
            }
            Phase::Checking => {
                if input.word == input.pattern {
                    return (O { done: true, ..s.output() }, S { phase: Phase::Idle, ..s });
                }

                let bitslips = self.bitslips.step(CounterI { clear: false, up: true }, s.bitslips).0;
                if bitslips.count >= self.bitslips.max() {
                    // The primitive never reported enough wraps; give up anyway.
                    return self.fail(s);
                }

                let (_, settle) = self.timer.step(Some(self.settle_delay), s.settle);
                let s_next = S { phase: Phase::Waiting, settle, wrap_armed: true, bitslips: bitslips.next, ..s };
                (O { bitslip: true, ..s.output() }, s_next)
            }
            Phase::Waiting => {
                let credit = input.wrapped && s.wrap_armed;
                let wraps = self.wraps.step(CounterI { clear: false, up: credit }, s.wraps).0;
                // A counter that starts mid-sweep wraps early; every rotation must still be tried once.
                if credit && wraps.saturated && s.bitslips >= self.sweep() {
                    return self.fail(S { wraps: wraps.next, wrap_armed: false, ..s });
                }

                let (expired, settle) = self.timer.step(None, s.settle);
                let phase = if expired { Phase::Checking } else { Phase::Waiting };
                let s_next = S { phase, settle, wraps: wraps.next, wrap_armed: s.wrap_armed && !credit, ..s };
                (s_next.output(), s_next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: Bits<10> = Bits::new(0b0001010101);
    const WRONG: Bits<10> = Bits::new(0b0000000000);

    fn params() -> Params { Params { settle_delay: 3, max_wraps: 2, ..Params::default() } }

    fn module() -> Module<ChannelAlign<10>> { Module::new("channel_align", ChannelAlign::new(&params())) }

    fn input(word: Bits<10>) -> I<10> { I { start: false, abort: false, word, pattern: PATTERN, wrapped: false } }

    fn start(m: &mut Module<ChannelAlign<10>>) {
        let out = m.tick(I { start: true, ..input(WRONG) });
        assert_eq!(out, O::default());
        assert_eq!(m.state().phase, Phase::Checking);
    }

    #[test]
    fn match_without_bitslip() {
        let mut m = module();
        start(&mut m);
        let out = m.tick(input(PATTERN));
        assert!(out.done);
        assert!(!out.bitslip);
        assert_eq!(m.state().phase, Phase::Idle);
    }

    #[test]
    fn idle_ignores_words() {
        let mut m = module();
        for _ in 0..5 {
            assert_eq!(m.tick(input(WRONG)), O::default());
        }
        assert_eq!(m.state().phase, Phase::Idle);
    }

    #[test]
    fn bitslip_then_settle() {
        let mut m = module();
        start(&mut m);

        let out = m.tick(input(WRONG));
        assert!(out.bitslip);
        assert!(!out.done);

        // Exactly `settle_delay` cycles without a bitslip, whatever the word.
        for _ in 0..3 {
            assert_eq!(m.state().phase, Phase::Waiting);
            assert_eq!(m.tick(input(PATTERN)), O::default());
        }
        assert_eq!(m.state().phase, Phase::Checking);
        assert!(m.tick(input(PATTERN)).done);
        assert_eq!(m.state().bitslips, 1);
    }

    #[test]
    fn held_wrap_is_credited_once() {
        let mut m = module();
        start(&mut m);
        m.tick(input(WRONG));
        for _ in 0..3 {
            m.tick(I { wrapped: true, ..input(WRONG) });
        }
        assert_eq!(m.state().wraps, 1);
        assert!(!m.state().error);
    }

    #[test]
    fn wrap_outside_waiting_is_ignored() {
        let mut m = module();
        m.tick(I { wrapped: true, ..input(WRONG) });
        start(&mut m);
        m.tick(I { wrapped: true, ..input(WRONG) });
        assert_eq!(m.state().wraps, 0);
    }

    #[test]
    fn wraps_fail_only_after_full_sweep() {
        let mut m = module();
        start(&mut m);

        // Every bitslip reports a wrap: the wraps saturate at once, the failure waits for `W` bitslips.
        let mut failures = 0;
        let mut bitslips = 0;
        for _ in 0..200 {
            let waiting = m.state().phase == Phase::Waiting;
            let out = m.tick(I { wrapped: waiting, ..input(WRONG) });
            bitslips += u32::from(out.bitslip);
            if out.failed {
                failures += 1;
                assert!(out.error);
                assert_eq!(m.state().phase, Phase::Idle);
            }
        }
        assert_eq!(failures, 1);
        assert_eq!(bitslips, 10);
        assert!(m.state().error);
    }

    #[test]
    fn early_wrap_with_single_wrap_tolerance() {
        let params = Params { max_wraps: 1, ..params() };
        let mut m = Module::new("channel_align", ChannelAlign::<10>::new(&params));
        start(&mut m);

        // The first bitslip wraps the counter; the pattern shows up after the third.
        let mut bitslips = 0;
        let mut word = WRONG;
        loop {
            let waiting = m.state().phase == Phase::Waiting;
            let out = m.tick(I { wrapped: waiting && bitslips == 1, ..input(word) });
            assert!(!out.failed);
            if out.done {
                break;
            }
            bitslips += u32::from(out.bitslip);
            if bitslips == 3 {
                word = PATTERN;
            }
        }
        assert_eq!(m.state().wraps, 1);
        assert!(!m.state().error);
    }

    #[test]
    fn budget_bounds_bitslips_without_wraps() {
        let mut m = module();
        start(&mut m);

        let mut bitslips = 0;
        let mut failed = false;
        for _ in 0..1000 {
            let out = m.tick(input(WRONG));
            bitslips += u32::from(out.bitslip);
            if out.failed {
                failed = true;
                break;
            }
        }
        assert!(failed);
        assert_eq!(bitslips, params().bitslip_budget::<10>());
    }

    #[test]
    fn error_is_sticky() {
        let mut m = module();
        start(&mut m);
        while !m.tick(I { wrapped: true, ..input(WRONG) }).failed {}

        // Neither a new start nor an abort clears the error.
        assert!(m.tick(I { start: true, ..input(PATTERN) }).error);
        assert_eq!(m.state().phase, Phase::Idle);
        assert!(m.tick(I { abort: true, ..input(PATTERN) }).error);

        m.reset();
        assert!(!m.state().error);
        start(&mut m);
    }

    #[test]
    fn abort_reports_nothing() {
        let mut m = module();
        start(&mut m);
        m.tick(input(WRONG));
        let out = m.tick(I { abort: true, ..input(PATTERN) });
        assert_eq!(out, O::default());
        assert_eq!(m.state().phase, Phase::Idle);
    }

    #[test]
    fn start_clears_wrap_tracking() {
        let mut m = module();
        start(&mut m);
        m.tick(input(WRONG));
        m.tick(I { wrapped: true, ..input(WRONG) });
        assert_eq!(m.state().wraps, 1);
        m.tick(I { abort: true, ..input(WRONG) });
        start(&mut m);
        assert_eq!(m.state().wraps, 0);
        assert!(!m.state().wrap_armed);
    }
}
