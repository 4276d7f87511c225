use super::width::BlockWidth;
use crate::caps::Capabilities;
use serde::Serialize;
use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::ops::Range;

/// One block of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Block {
    pub offset: usize,
    pub width: BlockWidth,
}

impl Block {
    pub fn end(&self) -> usize {
        self.offset + self.width.bytes()
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Cursor over the blocks of a sweep
///
/// The sequence depends only on the length and the starting width, never
/// on buffer contents. Before each block the step is halved until it fits
/// in the remaining span, so every block is the largest power of two that
/// fits and is no wider than the one before it. The step never grows back.
#[derive(Debug, Clone)]
pub struct BlockPlan {
    position: usize,
    length: usize,
    step: BlockWidth,
}

impl BlockPlan {
    pub fn new(length: usize, start: BlockWidth) -> Self {
        Self {
            position: 0,
            length,
            step: start,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Consume the plan into per-width block counts
    pub fn summary(self) -> PlanSummary {
        let mut summary = PlanSummary {
            length: self.length,
            start_width: self.step,
            blocks: 0,
            per_width: BTreeMap::new(),
        };
        for block in self {
            summary.blocks += 1;
            *summary.per_width.entry(block.width.bytes()).or_insert(0) += 1;
        }
        summary
    }
}

impl Iterator for BlockPlan {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.position >= self.length {
            return None;
        }

        let remaining = self.length - self.position;
        while self.step.bytes() > remaining {
            match self.step.halve() {
                Some(narrower) => self.step = narrower,
                None => break,
            }
        }

        let block = Block {
            offset: self.position,
            width: self.step,
        };
        self.position += self.step.bytes();
        Some(block)
    }
}

impl FusedIterator for BlockPlan {}

/// Sweep plan for `length` bytes under `caps`
pub fn plan(length: usize, caps: &Capabilities) -> BlockPlan {
    BlockPlan::new(length, caps.max_width())
}

/// Block counts of a whole plan, keyed by width in bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub length: usize,
    pub start_width: BlockWidth,
    pub blocks: usize,
    pub per_width: BTreeMap<usize, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(length: usize, caps: &Capabilities) -> Vec<usize> {
        plan(length, caps).map(|b| b.width.bytes()).collect()
    }

    #[test]
    fn test_empty_plan() {
        assert_eq!(plan(0, &Capabilities::scalar()).count(), 0);
    }

    #[test]
    fn test_single_scalar_block() {
        assert_eq!(widths(8, &Capabilities::scalar()), vec![8]);
    }

    #[test]
    fn test_ten_bytes_scalar() {
        let blocks: Vec<Block> = plan(10, &Capabilities::scalar()).collect();
        assert_eq!(
            blocks,
            vec![
                Block { offset: 0, width: BlockWidth::W8 },
                Block { offset: 8, width: BlockWidth::W2 },
            ]
        );
    }

    #[test]
    fn test_three_bytes_scalar() {
        let blocks: Vec<Block> = plan(3, &Capabilities::scalar()).collect();
        assert_eq!(
            blocks,
            vec![
                Block { offset: 0, width: BlockWidth::W2 },
                Block { offset: 2, width: BlockWidth::W1 },
            ]
        );
    }

    #[test]
    fn test_single_wide_block() {
        assert_eq!(widths(32, &Capabilities::new(true, true)), vec![32]);
    }

    #[test]
    fn test_exact_remaining_span_keeps_width() {
        // 16 bytes left under a 32 byte start lands on 16, not 8
        assert_eq!(widths(16, &Capabilities::new(true, true)), vec![16]);
        assert_eq!(widths(48, &Capabilities::new(true, true)), vec![32, 16]);
    }

    #[test]
    fn test_boundary_lengths() {
        let wide = Capabilities::new(true, true);
        assert_eq!(widths(1, &wide), vec![1]);
        assert_eq!(widths(7, &wide), vec![4, 2, 1]);
        assert_eq!(widths(33, &wide), vec![32, 1]);
        assert_eq!(widths(63, &wide), vec![32, 16, 8, 4, 2, 1]);

        let scalar = Capabilities::scalar();
        assert_eq!(widths(17, &scalar), vec![8, 8, 1]);
        assert_eq!(widths(31, &scalar), vec![8, 8, 8, 4, 2, 1]);
    }

    #[test]
    fn test_step_never_grows_back() {
        let caps = Capabilities::new(true, true);
        let trace = widths(1000, &caps);
        assert!(trace.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_blocks_tile_the_buffer() {
        for length in 0..200 {
            let mut next = 0;
            for block in plan(length, &Capabilities::new(true, true)) {
                assert_eq!(block.offset, next);
                assert!(block.end() <= length);
                next = block.end();
            }
            assert_eq!(next, length);
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = plan(100, &Capabilities::new(true, true)).summary();
        // 32 * 3 + 4
        assert_eq!(summary.length, 100);
        assert_eq!(summary.start_width, BlockWidth::W32);
        assert_eq!(summary.blocks, 4);
        assert_eq!(summary.per_width.get(&32), Some(&3));
        assert_eq!(summary.per_width.get(&4), Some(&1));
        assert_eq!(summary.per_width.get(&16), None);
    }

    #[test]
    fn test_restricted_plan() {
        let caps = Capabilities::new(true, true).restrict(BlockWidth::W2);
        assert_eq!(widths(5, &caps), vec![2, 2, 1]);
    }
}
