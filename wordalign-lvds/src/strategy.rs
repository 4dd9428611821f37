//! Alignment strategies.

use crate::error::AlignResult;
use crate::primitive::Primitive;
use crate::types::*;

/// Outcome of a successful alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment<const N: usize> {
    /// Cycles spent.
    pub ticks: u64,

    /// Bitslips issued per channel.
    pub bitslips: Lanes<u32, N>,
}

/// Finds and applies the word alignment of every channel.
///
/// On success, every primitive samples its training pattern.
pub trait FindAlignment<const N: usize, const W: usize> {
    /// Aligns `lanes`.
    fn align<P: Primitive<W>>(&mut self, lanes: &mut Lanes<P, N>) -> AlignResult<Alignment<N>>;
}
