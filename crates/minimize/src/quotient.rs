#![forbid(unsafe_code)]

use refa_automata::Dfa;
use refa_automata::DfaBuilder;
use refa_automata::FiniteAutomaton;
use refa_automata::StateIndex;

use crate::Partition;

/// Returns the quotient of the DFA with respect to the given partition, with
/// one state per block.
///
/// A block is accepting iff any of its members is, and the start state is the
/// block of the original start state. The partition must be a congruence: all
/// members of a block have transitions on the same characters into the same
/// blocks. The transitions of each block are therefore taken from its first
/// member.
pub fn quotient_dfa(dfa: &Dfa, partition: &impl Partition) -> Dfa {
    debug_assert_eq!(
        partition.len(),
        dfa.num_of_states(),
        "The partition must contain every state of the automaton"
    );

    let mut accepting = vec![false; partition.num_of_blocks()];
    let mut representative: Vec<Option<StateIndex>> = vec![None; partition.num_of_blocks()];
    for state_index in dfa.iter_states() {
        let block = partition.block_number(state_index);
        accepting[block] |= dfa.is_accepting(state_index);
        representative[block].get_or_insert(state_index);
    }

    let mut builder = DfaBuilder::new(dfa.alphabet().to_vec());
    for block_accepting in accepting {
        builder.add_state(block_accepting);
    }

    for (block, state_index) in representative.iter().enumerate() {
        let Some(state_index) = state_index else {
            continue;
        };

        for transition in dfa.outgoing_transitions(*state_index) {
            if let Some(c) = transition.symbol.as_char() {
                builder.add_transition(
                    StateIndex::new(block),
                    c,
                    StateIndex::new(*partition.block_number(transition.to)),
                );
            }
        }
    }

    debug_assert!(
        dfa.iter_states().all(|state_index| {
            let block = partition.block_number(state_index);
            dfa.alphabet().iter().all(|c| {
                dfa.next_state(state_index, *c).map(|to| partition.block_number(to))
                    == representative[block]
                        .and_then(|representative| dfa.next_state(representative, *c))
                        .map(|to| partition.block_number(to))
            })
        }),
        "The partition is not a congruence of the transition function"
    );

    builder.finish(
        dfa.initial_state_index()
            .map(|initial| StateIndex::new(*partition.block_number(initial))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use refa_automata::Acceptor;
    use test_log::test;

    use crate::BlockIndex;
    use crate::IndexedPartition;

    #[test]
    fn test_quotient_dfa() {
        let mut builder = DfaBuilder::new(vec!['a']);
        let s0 = builder.add_state(false);
        let s1 = builder.add_state(true);
        let s2 = builder.add_state(true);
        builder.add_transition(s0, 'a', s1);
        builder.add_transition(s1, 'a', s2);
        builder.add_transition(s2, 'a', s1);
        let dfa = builder.finish(Some(s0));

        let partition = IndexedPartition::with_partition(
            [1, 0, 0].into_iter().map(BlockIndex::new).collect(),
            2,
        );
        let quotient = quotient_dfa(&dfa, &partition);

        assert_eq!(quotient.num_of_states(), 2);
        assert_eq!(quotient.initial_state_index(), Some(StateIndex::new(1)));
        assert!(quotient.is_accepting(StateIndex::new(0)));
        assert_eq!(quotient.next_state(StateIndex::new(0), 'a'), Some(StateIndex::new(0)));
        assert_eq!(quotient.accepts("aaaa"), Ok(true));
        assert_eq!(quotient.accepts(""), Ok(false));
    }
}
