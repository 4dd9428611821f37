//! Per-channel values.

use std::array;
use std::fmt;
use std::iter;
use std::ops::{Index, IndexMut};

use itertools::Itertools;
use wordalign::*;

/// One value per channel: `N` data channels plus the control channel.
///
/// Channels are addressed by index in `0..=N`; index `N` is the control channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lanes<T, const N: usize> {
    /// Data channels.
    pub data: [T; N],

    /// Control channel.
    pub control: T,
}

impl<T, const N: usize> Lanes<T, N> {
    /// Index of the control channel.
    pub const CONTROL: usize = N;

    /// Number of channels, control channel included.
    pub const COUNT: usize = N + 1;

    /// Creates new lanes.
    pub fn new(data: [T; N], control: T) -> Self { Self { data, control } }

    /// Creates lanes by calling `f` with each channel index in order.
    pub fn from_fn<F: FnMut(usize) -> T>(mut f: F) -> Self {
        let data = array::from_fn(&mut f);
        let control = f(N);
        Self { data, control }
    }

    /// Returns the value of channel `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        match index {
            i if i < N => Some(&self.data[i]),
            i if i == N => Some(&self.control),
            _ => None,
        }
    }

    /// Returns the value of channel `index` mutably, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match index {
            i if i < N => Some(&mut self.data[i]),
            i if i == N => Some(&mut self.control),
            _ => None,
        }
    }

    /// Iterates in channel order, control channel last.
    pub fn iter(&self) -> impl Iterator<Item = &T> { self.data.iter().chain(iter::once(&self.control)) }

    /// Iterates mutably in channel order, control channel last.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut().chain(iter::once(&mut self.control))
    }

    /// Maps every channel.
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> Lanes<U, N> { Lanes::from_fn(|i| f(&self[i])) }
}

impl<T: Copy, const N: usize> Lanes<T, N> {
    /// Same value on every channel.
    pub fn splat(value: T) -> Self { Self { data: [value; N], control: value } }
}

impl<const N: usize> Lanes<bool, N> {
    /// Only channel `index` is set.
    pub fn one_hot(index: usize) -> Self { Self::from_fn(|i| i == index) }

    /// All channels are set.
    pub fn all(&self) -> bool { self.iter().all(|b| *b) }

    /// Index of the first set channel.
    pub fn first(&self) -> Option<usize> { self.iter().position(|b| *b) }
}

impl<T, const N: usize> Index<usize> for Lanes<T, N> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index > N`.
    fn index(&self, index: usize) -> &T {
        self.get(index).unwrap_or_else(|| panic!("channel index {} out of range 0..={}", index, N))
    }
}

impl<T, const N: usize> IndexMut<usize> for Lanes<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).unwrap_or_else(|| panic!("channel index {} out of range 0..={}", index, N))
    }
}

/// Concatenation of all channels: data channels in the low bits in index order, the control channel on top.
impl<V: Signal, const N: usize> Signal for Lanes<V, N> {
    const WIDTH: usize = V::WIDTH * (N + 1);

    fn transl(&self) -> Vec<bool> { self.iter().flat_map(Signal::transl).collect() }
}

impl<T: fmt::Display, const N: usize> fmt::Display for Lanes<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctrl={} data=[{}]", self.control, self.data.iter().join(", "))
    }
}
