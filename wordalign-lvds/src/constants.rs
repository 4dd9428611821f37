//! Constants for the LVDS alignment modules.

use static_assertions::const_assert;
use wordalign::{rotations_distinct, MAX_WIDTH};

/// Constants for the deserializer interface.
pub mod deser {
    /// Parallel word width.
    pub const WORD_WIDTH: usize = 10;

    /// Number of data channels. The control channel comes on top of them.
    pub const DATA_CHANNELS: usize = 16;
}

/// Constants for `channel_align`.
pub mod channel_align {
    /// Cycles the deserializer output is not valid after a bitslip.
    pub const SETTLE_DELAY: u32 = 3;

    /// Bitslip counter wraps tolerated before a channel is declared unalignable.
    ///
    /// One full wrap tries every rotation once; the second one absorbs a wrap falsely seen right after reset.
    // TODO: validate against measured reset-to-bitslip skew on hardware before lowering to 1.
    pub const MAX_WRAPS: u32 = 2;
}

/// Training patterns sent while the link is idle.
pub mod training {
    /// Training pattern of the data channels.
    pub const DATA_PATTERN: u32 = 0b0001010101;

    /// Training pattern of the control channel.
    pub const CONTROL_PATTERN: u32 = 0b1000000000;
}

const_assert!(deser::WORD_WIDTH >= 2 && deser::WORD_WIDTH <= MAX_WIDTH);
const_assert!(deser::DATA_CHANNELS >= 1);
const_assert!(channel_align::SETTLE_DELAY >= 1);
const_assert!(channel_align::MAX_WRAPS >= 1);
const_assert!(rotations_distinct(training::DATA_PATTERN, deser::WORD_WIDTH));
const_assert!(rotations_distinct(training::CONTROL_PATTERN, deser::WORD_WIDTH));
