//! Fob - adaptive block-inversion file scrambler
//!
//! Reversibly scrambles a file by flipping every bit of it. The buffer is
//! swept in blocks as wide as the CPU allows, narrowing near the end so no
//! block runs past the buffer. Inversion is its own inverse: scrambling a
//! file twice gives back the original. There is no key; this is
//! obfuscation, not encryption.
//!
//! ## Block Widths
//!
//! ```text
//! 32 (AVX2) → 16 (SSE2 / NEON) → 8 → 4 → 2 → 1
//! ```
//!
//! The sweep starts at the widest width the [`Capabilities`] descriptor
//! permits and halves whenever the remaining span is too short.
//!
//! ## Example
//!
//! ```
//! use fob::{invert, Capabilities};
//!
//! let caps = Capabilities::detect();
//! let mut data = b"hello, world".to_vec();
//!
//! invert(&mut data, &caps);
//! assert_ne!(&data[..], b"hello, world");
//!
//! invert(&mut data, &caps);
//! assert_eq!(&data[..], b"hello, world");
//! ```

#[cfg(target_endian = "big")]
compile_error!("Big endian machines not supported yet");

pub mod caps;
pub mod cli;
pub mod engine;
pub mod error;
pub mod file;

pub use caps::Capabilities;
pub use engine::{invert, plan, Block, BlockPlan, BlockWidth, PlanSummary};
pub use error::{FobError, Result};
pub use file::{read_file, write_file};
