//! Alignment sequencer.
//!
//! Runs the per-channel alignment over every channel, one at a time, data channels first and the control channel
//! last. Channels share nothing but the sequencer, so serializing them keeps their bitslips from interfering.

use wordalign::*;

/// Input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct I {
    /// Start alignment command. Restarts a running campaign from channel 0.
    pub start: bool,

    /// The selected channel is aligned.
    pub done: bool,

    /// The selected channel was declared unalignable.
    pub failed: bool,

    /// Sticky word alignment error.
    pub error: bool,

    /// Clock lock was lost.
    pub lost_lock: bool,
}

/// Output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct O {
    /// Channel that completed in this cycle.
    pub channel_done: Option<usize>,

    /// Alignment done: every channel completed.
    pub done: bool,

    /// The campaign was aborted because lock was lost.
    pub aborted: bool,

    /// A start command was refused because the word alignment error is pending.
    pub refused: bool,
}

/// Phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No campaign.
    #[default]
    Idle,

    /// Requests the selected channel to be aligned.
    StartAlign,

    /// Waits for the selected channel.
    AlignChannel,
}

/// State.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct S {
    /// Phase.
    pub phase: Phase,

    /// Selected channel.
    pub channel: usize,
}

impl S {
    /// A campaign is running.
    pub fn active(&self) -> bool { self.phase != Phase::Idle }

    /// Channel whose alignment is requested in this cycle.
    pub fn request(&self) -> Option<usize> { (self.phase == Phase::StartAlign).then_some(self.channel) }

    /// Channel being aligned, if any.
    pub fn selected(&self) -> Option<usize> { self.active().then_some(self.channel) }
}

/// Sequencer over `N` data channels and the control channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sequencer<const N: usize>;

impl<const N: usize> Fsm for Sequencer<N> {
    type I = I;
    type O = O;
    type S = S;

    fn init(&self) -> S { S::default() }

    fn step(&self, input: I, s: S) -> (O, S) {
        if input.start {
            if input.error {
                return (O { refused: true, ..O::default() }, S::default());
            }
            return (O::default(), S { phase: Phase::StartAlign, channel: 0 });
        }

        match s.phase {
            Phase::Idle => (O::default(), s),
            _ if input.lost_lock => (O { aborted: true, ..O::default() }, S::default()),
            Phase::StartAlign => (O::default(), S { phase: Phase::AlignChannel, ..s }),
            Phase::AlignChannel if input.failed || input.error => (O::default(), S::default()),
            Phase::AlignChannel if input.done => {
                let last = s.channel == N;
                let s_next = if last { S::default() } else { S { phase: Phase::StartAlign, channel: s.channel + 1 } };
                (O { channel_done: Some(s.channel), done: last, ..O::default() }, s_next)
            }
            Phase::AlignChannel => (O::default(), s),
        }
    }
}
