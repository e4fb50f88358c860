//! Diff provider contract.
//!
//! The core never computes diffs. It asks a [`DiffProvider`] where the next changed block
//! starts and moves the cursor there.

use std::ops::Range;

/// Source of diff-block boundaries.
pub trait DiffProvider {
    /// First line of the next block after `from_line` (`forward`) or of the last block starting
    /// before it. `None` when there is no such block.
    fn next_diff_line(&self, from_line: usize, forward: bool) -> Option<usize>;
}

/// Diff blocks as sorted, non-overlapping line ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffBlocks {
    blocks: Vec<Range<usize>>,
}

impl DiffBlocks {
    /// Build from arbitrary ranges. Empty ranges are dropped.
    pub fn new(mut blocks: Vec<Range<usize>>) -> Self {
        blocks.retain(|b| !b.is_empty());
        blocks.sort_by_key(|b| b.start);
        Self { blocks }
    }

    /// The blocks in line order.
    pub fn blocks(&self) -> &[Range<usize>] {
        &self.blocks
    }
}

impl DiffProvider for DiffBlocks {
    fn next_diff_line(&self, from_line: usize, forward: bool) -> Option<usize> {
        if forward {
            self.blocks
                .iter()
                .map(|b| b.start)
                .find(|&start| start > from_line)
        } else {
            self.blocks
                .iter()
                .rev()
                .map(|b| b.start)
                .find(|&start| start < from_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous() {
        let diff = DiffBlocks::new(vec![10..12, 2..4, 7..7]);
        assert_eq!(diff.blocks(), &[2..4, 10..12]);
        assert_eq!(diff.next_diff_line(0, true), Some(2));
        assert_eq!(diff.next_diff_line(2, true), Some(10));
        assert_eq!(diff.next_diff_line(10, true), None);
        assert_eq!(diff.next_diff_line(11, false), Some(10));
        assert_eq!(diff.next_diff_line(10, false), Some(2));
        assert_eq!(diff.next_diff_line(2, false), None);
    }
}
