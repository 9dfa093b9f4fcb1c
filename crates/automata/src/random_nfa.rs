#![forbid(unsafe_code)]

use rand::Rng;

use crate::Nfa;
use crate::NfaBuilder;
use crate::StateIndex;
use crate::Symbol;

/// Generates an NFA with the desired number of states, alphabet size and out
/// degree. The alphabet consists of the first `num_of_symbols` lower case
/// letters, and a transition is labelled with epsilon with the same
/// probability as any one letter. State zero is the start state.
pub fn random_nfa(rng: &mut impl Rng, num_of_states: usize, num_of_symbols: u8, outdegree: usize) -> Nfa {
    assert!(
        num_of_symbols <= 26,
        "Too many symbols requested, we only support alphabetic symbols."
    );

    // Ensure there is at least one state, which is the start state.
    let num_of_states = num_of_states.max(1);
    let mut builder = NfaBuilder::with_capacity(num_of_states);
    for _ in 0..num_of_states {
        builder.add_state(rng.random_bool(0.3));
    }

    for from in 0..num_of_states {
        for _ in 0..rng.random_range(0..=outdegree) {
            let symbol = match rng.random_range(0..=num_of_symbols) {
                0 => Symbol::Epsilon,
                i => Symbol::Char(char::from(b'a' + i - 1)),
            };
            let to = rng.random_range(0..num_of_states);

            builder.add_transition(StateIndex::new(from), symbol, StateIndex::new(to));
        }
    }

    builder.finish(Some(StateIndex::new(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use refa_utilities::random_test;
    use test_log::test;

    use crate::FiniteAutomaton;

    #[test]
    fn test_random_nfa() {
        random_test(100, |rng| {
            let nfa = random_nfa(rng, 10, 3, 3);

            assert_eq!(nfa.num_of_states(), 10);
            assert_eq!(nfa.initial_state_index(), Some(StateIndex::new(0)));
            assert!(nfa.alphabet().iter().all(|c| ('a'..='c').contains(c)));
        });
    }
}
