//! Word alignment controller for multi-channel LVDS receivers.
//!
//! Each deserializer channel starts at an arbitrary bit offset. During training, the transmitter repeats a known
//! pattern on every channel; the controller visits the data channels and then the control channel, bitslipping the
//! selected one until its word equals its pattern, and opens the output once all of them match.

// # Tries to deny all lints (`rustc -W help`).
#![deny(absolute_paths_not_starting_with_crate)]
#![deny(anonymous_parameters)]
#![deny(deprecated_in_future)]
#![deny(explicit_outlives_requirements)]
#![deny(keyword_idents)]
#![deny(macro_use_extern_crate)]
#![deny(missing_debug_implementations)]
#![deny(non_ascii_idents)]
#![deny(rust_2018_idioms)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(unused_extern_crates)]
#![deny(unused_import_braces)]
//
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_html_tags)]
#![deny(rustdoc::bare_urls)]
//
#![allow(clippy::type_complexity)]
#![allow(elided_lifetimes_in_paths)]

pub mod align_core;
pub mod aligner;
pub mod channel_align;
pub mod constants;
pub mod error;
pub mod lock_monitor;
pub mod offset_search;
pub mod output_gate;
pub mod params;
pub mod primitive;
pub mod sequencer;
pub mod strategy;
pub mod types;

pub use align_core::AlignCore;
pub use aligner::Aligner;
pub use error::{AlignError, AlignResult};
pub use offset_search::{find_offset, OffsetSearch};
pub use params::Params;
pub use primitive::{Primitive, SoftPrimitive};
pub use strategy::{Alignment, FindAlignment};
pub use types::*;
