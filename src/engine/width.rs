use crate::error::{FobError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of a single inverted block, in bytes
/// Always a power of two between 1 and 32
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub enum BlockWidth {
    W1,
    W2,
    W4,
    W8,
    W16,
    W32,
}

impl BlockWidth {
    /// Every width, narrowest first
    pub const ALL: [BlockWidth; 6] = [
        BlockWidth::W1,
        BlockWidth::W2,
        BlockWidth::W4,
        BlockWidth::W8,
        BlockWidth::W16,
        BlockWidth::W32,
    ];

    /// Widest width served by a plain integer register
    pub const SCALAR_MAX: BlockWidth = BlockWidth::W8;

    pub const fn bytes(self) -> usize {
        match self {
            BlockWidth::W1 => 1,
            BlockWidth::W2 => 2,
            BlockWidth::W4 => 4,
            BlockWidth::W8 => 8,
            BlockWidth::W16 => 16,
            BlockWidth::W32 => 32,
        }
    }

    /// Next narrower width, or `None` at one byte
    pub const fn halve(self) -> Option<BlockWidth> {
        match self {
            BlockWidth::W1 => None,
            BlockWidth::W2 => Some(BlockWidth::W1),
            BlockWidth::W4 => Some(BlockWidth::W2),
            BlockWidth::W8 => Some(BlockWidth::W4),
            BlockWidth::W16 => Some(BlockWidth::W8),
            BlockWidth::W32 => Some(BlockWidth::W16),
        }
    }

    pub fn from_bytes(bytes: usize) -> Option<BlockWidth> {
        Self::ALL.into_iter().find(|w| w.bytes() == bytes)
    }

    /// True for widths that need a vector register (or the portable fallback)
    pub const fn is_vector(self) -> bool {
        matches!(self, BlockWidth::W16 | BlockWidth::W32)
    }
}

impl fmt::Display for BlockWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

impl std::str::FromStr for BlockWidth {
    type Err = FobError;
    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(BlockWidth::from_bytes)
            .ok_or_else(|| FobError::InvalidWidth(s.to_string()))
    }
}

impl From<BlockWidth> for usize {
    fn from(width: BlockWidth) -> usize {
        width.bytes()
    }
}

impl TryFrom<usize> for BlockWidth {
    type Error = FobError;
    fn try_from(bytes: usize) -> Result<Self> {
        BlockWidth::from_bytes(bytes).ok_or_else(|| FobError::InvalidWidth(bytes.to_string()))
    }
}
