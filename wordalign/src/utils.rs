//! Utilities.

use static_assertions::const_assert;

/// Maximum bit width of a [`Bits`](crate::Bits) word.
pub const MAX_WIDTH: usize = 32;

const_assert!(MAX_WIDTH <= u32::BITS as usize);

/// Returns the mask covering the low `width` bits.
pub const fn mask(width: usize) -> u32 {
    if width >= MAX_WIDTH {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// Rotates the low `width` bits of `value` left by `amount`.
pub const fn rotl(value: u32, width: usize, amount: usize) -> u32 {
    let value = value & mask(width);
    let amount = amount % width;
    if amount == 0 {
        value
    } else {
        ((value << amount) | (value >> (width - amount))) & mask(width)
    }
}

/// Returns `true` if the `width` rotations of `value` are pairwise distinct.
///
/// Only such values can serve as a training pattern: any rotation symmetry makes the word boundary ambiguous.
pub const fn rotations_distinct(value: u32, width: usize) -> bool {
    if width == 0 || width > MAX_WIDTH {
        return false;
    }
    let value = value & mask(width);
    // The smallest period of a cyclic word divides its width, so checking every non-trivial amount is enough.
    let mut amount = 1;
    while amount < width {
        if rotl(value, width, amount) == value {
            return false;
        }
        amount += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_widths() {
        assert_eq!(mask(1), 0b1);
        assert_eq!(mask(10), 0x3ff);
        assert_eq!(mask(32), u32::MAX);
    }

    #[test]
    fn rotl_wraps_amount() {
        assert_eq!(rotl(0b1000000000, 10, 1), 0b0000000001);
        assert_eq!(rotl(0b0000000011, 10, 9), 0b1000000001);
        assert_eq!(rotl(0b0000000011, 10, 11), rotl(0b0000000011, 10, 1));
    }

    #[test]
    fn distinct_rotations() {
        assert!(rotations_distinct(0b0001010101, 10));
        assert!(rotations_distinct(0b1000000000, 10));
        assert!(!rotations_distinct(0, 10));
        assert!(!rotations_distinct(0x3ff, 10));
        // Period 5.
        assert!(!rotations_distinct(0b0001100011, 10));
        // Period 2.
        assert!(!rotations_distinct(0b0101010101, 10));
    }
}
