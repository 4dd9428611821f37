//! Bit-representable values.

use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::utils::*;

/// Bit-representable values.
pub trait Signal: 'static + fmt::Debug + Clone {
    /// Signal's bit width.
    ///
    /// # Note
    ///
    /// `Self::WIDTH` and `self.transl().len()` should be equal.
    const WIDTH: usize;

    /// Returns the bits of the value, LSB first.
    fn transl(&self) -> Vec<bool>;
}

impl Signal for () {
    const WIDTH: usize = 0;

    fn transl(&self) -> Vec<bool> { vec![] }
}

impl Signal for bool {
    const WIDTH: usize = 1;

    fn transl(&self) -> Vec<bool> { vec![*self] }
}

impl<V: Signal, const N: usize> Signal for [V; N] {
    const WIDTH: usize = V::WIDTH * N;

    fn transl(&self) -> Vec<bool> { self.iter().flat_map(Signal::transl).collect() }
}

impl<V1: Signal, V2: Signal> Signal for (V1, V2) {
    const WIDTH: usize = V1::WIDTH + V2::WIDTH;

    fn transl(&self) -> Vec<bool> {
        let mut bits = self.0.transl();
        bits.extend(self.1.transl());
        bits
    }
}

/// Fixed-width unsigned word.
///
/// The width `W` must be in `1..=MAX_WIDTH`; other widths are rejected when the type is used.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bits<const W: usize> {
    value: u32,
}

impl<const W: usize> Bits<W> {
    const WIDTH_OK: () = assert!(W >= 1 && W <= MAX_WIDTH, "width of `Bits` must be in 1..=32");

    /// Mask of the valid bits.
    pub const MASK: u32 = mask(W);

    /// Creates a word from the low `W` bits of `value`.
    pub const fn new(value: u32) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WIDTH_OK;
        Self { value: value & Self::MASK }
    }

    /// All-zero word.
    pub const fn zero() -> Self { Self::new(0) }

    /// Returns the value.
    pub const fn value(self) -> u32 { self.value }

    /// Returns the `index`-th bit (LSB is index 0).
    pub const fn bit(self, index: usize) -> bool { index < W && (self.value >> index) & 1 == 1 }

    /// Rotates left by `amount` (modulo `W`).
    #[must_use]
    pub const fn rotate_left(self, amount: usize) -> Self { Self::new(rotl(self.value, W, amount)) }

    /// Rotates right by `amount` (modulo `W`).
    #[must_use]
    pub const fn rotate_right(self, amount: usize) -> Self { Self::new(rotl(self.value, W, W - amount % W)) }

    /// Returns the bits, LSB first.
    pub fn bits(self) -> ArrayVec<bool, MAX_WIDTH> { (0..W).map(|i| self.bit(i)).collect() }
}

impl<const W: usize> Default for Bits<W> {
    fn default() -> Self { Self::zero() }
}

impl<const W: usize> From<Bits<W>> for u32 {
    fn from(bits: Bits<W>) -> Self { bits.value }
}

impl<const W: usize> Signal for Bits<W> {
    const WIDTH: usize = W;

    fn transl(&self) -> Vec<bool> { self.bits().to_vec() }
}

impl<const W: usize> fmt::Debug for Bits<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Bits<{}>(0b{})", W, self) }
}

impl<const W: usize> fmt::Display for Bits<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:0width$b}", self.value, width = W) }
}

impl<const W: usize> fmt::Binary for Bits<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(self, f) }
}

#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseBitsError {
    #[error("expected {expected} binary digits, found {found}")]
    Width { expected: usize, found: usize },

    #[error("invalid binary digit {0:?}")]
    Digit(char),
}

impl<const W: usize> FromStr for Bits<W> {
    type Err = ParseBitsError;

    /// Parses exactly `W` binary digits, MSB first. A `0b` prefix and `_` separators are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0b").unwrap_or(s);
        let mut value = 0u32;
        let mut found = 0;
        for c in s.chars().filter(|c| *c != '_') {
            let digit = match c {
                '0' => 0,
                '1' => 1,
                c => return Err(ParseBitsError::Digit(c)),
            };
            found += 1;
            if found <= MAX_WIDTH {
                value = (value << 1) | digit;
            }
        }
        if found != W {
            return Err(ParseBitsError::Width { expected: W, found });
        }
        Ok(Self::new(value))
    }
}

/// Valid signal.
///
/// The inner value is meaningful only while `valid` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Valid<V> {
    /// Valid bit.
    pub valid: bool,

    /// Inner value.
    pub inner: V,
}

impl<V> Valid<V> {
    /// Creates a new valid signal.
    pub fn new(valid: bool, inner: V) -> Self { Self { valid, inner } }

    /// Creates a valid signal carrying `inner`.
    pub fn valid(inner: V) -> Self { Self::new(true, inner) }

    /// Converts into `Some(inner)` if valid.
    pub fn into_option(self) -> Option<V> { self.valid.then_some(self.inner) }
}

impl<V: Default> Valid<V> {
    /// Invalid signal with a default inner value.
    pub fn invalid() -> Self { Self::new(false, V::default()) }
}

impl<V: Signal> Signal for Valid<V> {
    const WIDTH: usize = V::WIDTH + 1;

    fn transl(&self) -> Vec<bool> {
        let mut bits = self.inner.transl();
        bits.push(self.valid);
        bits
    }
}
