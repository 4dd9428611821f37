//! Sticky flag.

use wordalign::*;

/// Input of [`Sticky`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StickyI {
    /// Sets the flag.
    pub set: bool,

    /// Clears the flag. Wins over `set`.
    pub clear: bool,
}

/// Flag that stays set until explicitly cleared.
///
/// The output is the next value, so a set is visible in the same cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sticky;

impl Fsm for Sticky {
    type I = StickyI;
    type O = bool;
    type S = bool;

    fn init(&self) -> bool { false }

    fn step(&self, input: StickyI, flag: bool) -> (bool, bool) {
        let next = !input.clear && (input.set || flag);
        (next, next)
    }
}
