//! Counter modules.

use wordalign::*;

/// Input of [`SaturatingCounter`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CounterI {
    /// Clears the counter. Wins over `up`.
    pub clear: bool,

    /// Counts up by one.
    pub up: bool,
}

/// Output of [`SaturatingCounter`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CounterO {
    /// Current count.
    pub count: u32,

    /// Next count.
    pub next: u32,

    /// The next count has reached the maximum.
    pub saturated: bool,
}

/// Up-counter that saturates at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaturatingCounter {
    max: u32,
}

impl SaturatingCounter {
    /// Creates a counter saturating at `max`.
    pub fn new(max: u32) -> Self { Self { max } }

    /// Returns the saturation value.
    pub fn max(&self) -> u32 { self.max }
}

impl Fsm for SaturatingCounter {
    type I = CounterI;
    type O = CounterO;
    type S = u32;

    fn init(&self) -> u32 { 0 }

    fn step(&self, input: CounterI, count: u32) -> (CounterO, u32) {
        let next = if input.clear {
            0
        } else if input.up {
            count.saturating_add(1).min(self.max)
        } else {
            count
        };
        (CounterO { count, next, saturated: next >= self.max }, next)
    }
}

/// Countdown timer.
///
/// Loading `n` yields exactly `n` following unloaded cycles; the last of them reports expiry. Loading zero makes the
/// next unloaded cycle expire at once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Countdown;

impl Fsm for Countdown {
    /// Value to load, if any.
    type I = Option<u32>;
    /// The countdown expires in this cycle.
    type O = bool;
    type S = u32;

    fn init(&self) -> u32 { 0 }

    fn step(&self, load: Option<u32>, remaining: u32) -> (bool, u32) {
        match load {
            Some(value) => (false, value),
            None => (remaining <= 1, remaining.saturating_sub(1)),
        }
    }
}
