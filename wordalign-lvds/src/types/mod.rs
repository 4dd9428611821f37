//! Types shared by the alignment modules.

mod lanes;

pub use lanes::*;

use wordalign::Bits;

/// Parallel word of every channel in one cycle.
pub type Words<const N: usize, const W: usize> = Lanes<Bits<W>, N>;
