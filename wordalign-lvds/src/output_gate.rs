//! Output gate.
//!
//! Blanks the exported words until the campaign completes. The gate opens in the very cycle the sequencer reports
//! alignment done and forwards the words of that same cycle.

use wordalign::*;

use crate::types::*;

/// Input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I<const N: usize, const W: usize> {
    /// Start alignment command.
    pub start: bool,

    /// Alignment done.
    pub done: bool,

    /// Words of every channel.
    pub words: Words<N, W>,
}

/// Gate state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum S {
    /// Output blanked.
    #[default]
    Unaligned,

    /// Output forwarded.
    Aligned,
}

/// Output gate.
pub type OutputGate<const N: usize, const W: usize> =
    FnFsm<I<N, W>, Valid<Words<N, W>>, S, fn(I<N, W>, S) -> (Valid<Words<N, W>>, S)>;

/// Creates the output gate.
pub fn m<const N: usize, const W: usize>() -> OutputGate<N, W> {
    fsm(S::Unaligned, logic::<N, W> as fn(I<N, W>, S) -> (Valid<Words<N, W>>, S))
}

/// Blank output: all-zero words, valid cleared.
pub fn blank<const N: usize, const W: usize>() -> Valid<Words<N, W>> { Valid::new(false, Lanes::splat(Bits::zero())) }

fn logic<const N: usize, const W: usize>(input: I<N, W>, state: S) -> (Valid<Words<N, W>>, S) {
    let state_next = if input.start {
        S::Unaligned
    } else if input.done {
        S::Aligned
    } else {
        state
    };

    let output = match state_next {
        S::Aligned => Valid::valid(input.words),
        S::Unaligned => blank(),
    };
    (output, state_next)
}
