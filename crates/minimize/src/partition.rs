#![forbid(unsafe_code)]

use std::fmt;

use itertools::Itertools;
use refa_automata::StateIndex;
use refa_utilities::TagIndex;

/// A zero sized tag for the block.
pub struct BlockTag {}

/// The index for blocks.
pub type BlockIndex = TagIndex<usize, BlockTag>;

/// A trait for partitions of the states of an automaton that expose the block
/// number of every state. Can be used to compute the quotient automaton.
///
/// The invariants are that the union of all blocks is the original set of
/// states, and that each block contains distinct elements.
pub trait Partition {
    /// Returns the block number for the given state.
    fn block_number(&self, state_index: StateIndex) -> BlockIndex;

    /// Returns the number of blocks in the partition.
    fn num_of_blocks(&self) -> usize;

    /// Returns the number of elements in the partition.
    fn len(&self) -> usize;

    /// Returns whether the partition is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Defines a partition based on an explicit indexing of elements to their block
/// number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedPartition {
    partition: Vec<BlockIndex>,

    num_of_blocks: usize,
}

impl IndexedPartition {
    /// Create a new partition where all elements are in a single block.
    pub fn new(num_of_elements: usize) -> IndexedPartition {
        IndexedPartition {
            partition: vec![BlockIndex::new(0); num_of_elements],
            num_of_blocks: usize::from(num_of_elements > 0),
        }
    }

    /// Create a new partition with the given partitioning, the block numbers must be dense.
    pub fn with_partition(partition: Vec<BlockIndex>, num_of_blocks: usize) -> IndexedPartition {
        debug_assert!(
            partition.iter().all(|block| **block < num_of_blocks),
            "Block numbers must be smaller than the number of blocks"
        );

        IndexedPartition {
            partition,
            num_of_blocks,
        }
    }

    /// Iterates over the block numbers of all elements.
    pub fn iter(&self) -> impl Iterator<Item = BlockIndex> + '_ {
        self.partition.iter().copied()
    }

    /// Returns the members of every block, in increasing order of block number
    /// and element index.
    pub fn blocks(&self) -> Vec<Vec<StateIndex>> {
        let mut blocks = vec![Vec::new(); self.num_of_blocks];
        for (element_index, block) in self.iter().enumerate() {
            blocks[block].push(StateIndex::new(element_index));
        }

        blocks
    }
}

impl fmt::Display for IndexedPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ {} }}",
            self.blocks()
                .iter()
                .format_with(", ", |block, f| f(&format_args!("{{{}}}", block.iter().format(", "))))
        )
    }
}

impl Partition for IndexedPartition {
    fn block_number(&self, state_index: StateIndex) -> BlockIndex {
        self.partition[state_index.value()]
    }

    fn num_of_blocks(&self) -> usize {
        self.num_of_blocks
    }

    fn len(&self) -> usize {
        self.partition.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_indexed_partition_blocks() {
        let partition = IndexedPartition::with_partition(
            [1, 0, 1, 2].into_iter().map(BlockIndex::new).collect(),
            3,
        );

        assert_eq!(partition.num_of_blocks(), 3);
        assert_eq!(partition.len(), 4);
        assert_eq!(partition.block_number(StateIndex::new(2)), BlockIndex::new(1));
        assert_eq!(partition.to_string(), "{ {1}, {0, 2}, {3} }");
    }

    #[test]
    fn test_indexed_partition_empty() {
        let partition = IndexedPartition::new(0);

        assert!(partition.is_empty());
        assert_eq!(partition.num_of_blocks(), 0);
        assert_eq!(partition.to_string(), "{  }");
    }
}
