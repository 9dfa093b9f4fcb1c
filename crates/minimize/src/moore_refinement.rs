#![forbid(unsafe_code)]

use log::debug;
use log::info;
use log::trace;
use refa_automata::Dfa;
use refa_automata::FiniteAutomaton;
use refa_automata::StateIndex;
use rustc_hash::FxHashMap;

use crate::BlockIndex;
use crate::IndexedPartition;
use crate::Partition;

/// The signature of a state: for every character of the alphabet, in sorted
/// order, the block of its successor or `None` when there is no transition.
pub type Signature = Vec<Option<BlockIndex>>;

/// Computes the coarsest partition of the states of the given DFA in which
/// equivalent states share a block, following Moore's algorithm.
///
/// The initial partition consists of the accepting states followed by the
/// non-accepting states, omitting empty blocks. Every refinement pass splits
/// each block into the groups of states with equal signatures with respect to
/// the partition of the previous pass, and the blocks are numbered in the order
/// of their first member. Passes are repeated until no block splits.
pub fn moore_refinement(dfa: &Dfa) -> IndexedPartition {
    info!("Refining the partition of a DFA with {} states...", dfa.num_of_states());

    let mut partition = initial_partition(dfa);
    let mut builder = Signature::new();
    let mut iteration = 0;

    loop {
        debug!("Iteration {iteration}, found {} blocks...", partition.num_of_blocks());

        let mut next_partition = vec![BlockIndex::new(0); dfa.num_of_states()];
        let mut num_of_blocks = 0;

        for block in partition.blocks() {
            if block.len() <= 1 {
                for state_index in block {
                    next_partition[state_index] = BlockIndex::new(num_of_blocks);
                }
                num_of_blocks += 1;
                continue;
            }

            // Group the states of this block by their signature.
            let mut id: FxHashMap<Signature, BlockIndex> = FxHashMap::default();
            for state_index in block {
                signature(dfa, &partition, state_index, &mut builder);
                trace!("State {state_index} signature {builder:?}");

                let new_block = match id.get(&builder) {
                    Some(new_block) => *new_block,
                    None => {
                        let new_block = BlockIndex::new(num_of_blocks);
                        num_of_blocks += 1;
                        id.insert(builder.clone(), new_block);
                        new_block
                    }
                };

                next_partition[state_index] = new_block;
            }
        }

        iteration += 1;
        let stable = num_of_blocks == partition.num_of_blocks();
        partition = IndexedPartition::with_partition(next_partition, num_of_blocks);

        if stable {
            break;
        }
    }

    debug!(
        "Refinement finished after {iteration} iterations with {} blocks",
        partition.num_of_blocks()
    );
    partition
}

/// Returns the partition of the accepting states followed by the non-accepting states.
fn initial_partition(dfa: &Dfa) -> IndexedPartition {
    let num_of_accepting = dfa.accepting_states().count();
    let accepting_block = BlockIndex::new(0);
    let rejecting_block = BlockIndex::new(usize::from(num_of_accepting > 0));

    let partition = dfa
        .iter_states()
        .map(|state_index| {
            if dfa.is_accepting(state_index) {
                accepting_block
            } else {
                rejecting_block
            }
        })
        .collect();

    let num_of_blocks =
        usize::from(num_of_accepting > 0) + usize::from(num_of_accepting < dfa.num_of_states());
    IndexedPartition::with_partition(partition, num_of_blocks)
}

/// Computes the signature of the given state into the builder.
fn signature(dfa: &Dfa, partition: &IndexedPartition, state_index: StateIndex, builder: &mut Signature) {
    builder.clear();
    builder.extend(dfa.alphabet().iter().map(|c| {
        dfa.next_state(state_index, *c)
            .map(|to| partition.block_number(to))
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    use refa_automata::DfaBuilder;
    use test_log::test;

    #[test]
    fn test_initial_partition_accepting_first() {
        let mut builder = DfaBuilder::new(vec!['a']);
        let s0 = builder.add_state(false);
        let s1 = builder.add_state(true);
        builder.add_transition(s0, 'a', s1);
        let dfa = builder.finish(Some(s0));

        let partition = initial_partition(&dfa);

        assert_eq!(partition.num_of_blocks(), 2);
        assert_eq!(partition.block_number(s1), BlockIndex::new(0));
        assert_eq!(partition.block_number(s0), BlockIndex::new(1));
    }

    #[test]
    fn test_initial_partition_single_block() {
        let mut builder = DfaBuilder::new(vec!['a']);
        builder.add_state(false);
        builder.add_state(false);
        let dfa = builder.finish(Some(StateIndex::new(0)));

        assert_eq!(initial_partition(&dfa).num_of_blocks(), 1);
    }

    #[test]
    fn test_moore_refinement_splits_on_missing_transition() {
        // s0 and s1 are non-accepting, but only s0 can reach the accepting s2.
        let mut builder = DfaBuilder::new(vec!['a', 'b']);
        let s0 = builder.add_state(false);
        let s1 = builder.add_state(false);
        let s2 = builder.add_state(true);
        let s3 = builder.add_state(true);
        builder.add_transition(s0, 'a', s2);
        builder.add_transition(s0, 'b', s1);
        builder.add_transition(s1, 'b', s1);
        builder.add_transition(s2, 'a', s3);
        builder.add_transition(s3, 'a', s2);
        let dfa = builder.finish(Some(s0));

        let partition = moore_refinement(&dfa);

        assert_eq!(partition.num_of_blocks(), 3);
        assert_eq!(partition.block_number(s2), partition.block_number(s3));
        assert_ne!(partition.block_number(s0), partition.block_number(s1));
        assert_eq!(partition.to_string(), "{ {2, 3}, {0}, {1} }");
    }

    #[test]
    fn test_moore_refinement_empty() {
        let dfa = DfaBuilder::new(Vec::new()).finish(None);

        let partition = moore_refinement(&dfa);

        assert!(partition.is_empty());
        assert_eq!(partition.num_of_blocks(), 0);
    }
}
