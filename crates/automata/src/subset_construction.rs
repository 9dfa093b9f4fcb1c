#![forbid(unsafe_code)]

use std::collections::VecDeque;

use log::debug;
use log::info;
use log::trace;
use rustc_hash::FxHashMap;

use crate::AutomatonError;
use crate::Dfa;
use crate::DfaBuilder;
use crate::FiniteAutomaton;
use crate::Nfa;
use crate::StateIndex;
use crate::StateSet;

/// Converts the given NFA into an equivalent DFA using the powerset construction.
///
/// Every DFA state corresponds to a unique non-empty set of NFA states that is
/// closed under epsilon transitions. The DFA states are numbered in the order
/// in which they are discovered, processing the unexplored subsets in first
/// in first out order and the alphabet in sorted order, so the result is
/// deterministic.
pub fn subset_construction(nfa: &Nfa) -> Result<Dfa, AutomatonError> {
    let initial = nfa.initial_state_index().ok_or(AutomatonError::UndefinedStart)?;
    let alphabet = nfa.alphabet();

    info!(
        "Determinizing NFA with {} states and {} transitions over {} symbols...",
        nfa.num_of_states(),
        nfa.num_of_transitions(),
        alphabet.len()
    );

    let mut builder = DfaBuilder::new(alphabet.clone());
    let mut subsets: FxHashMap<StateSet, StateIndex> = FxHashMap::default();
    let mut queue = VecDeque::new();

    let initial_subset = nfa.epsilon_closure([initial]);
    let initial_state = builder.add_state(nfa.contains_accepting(&initial_subset));
    trace!("DFA state {initial_state} is {initial_subset}");
    subsets.insert(initial_subset.clone(), initial_state);
    queue.push_back((initial_subset, initial_state));

    while let Some((subset, from)) = queue.pop_front() {
        for &c in &alphabet {
            let target = nfa.move_on_symbol(&subset, c);
            if target.is_empty() {
                continue;
            }

            let to = match subsets.get(&target) {
                Some(to) => *to,
                None => {
                    let to = builder.add_state(nfa.contains_accepting(&target));
                    trace!("DFA state {to} is {target}");
                    subsets.insert(target.clone(), to);
                    queue.push_back((target, to));
                    to
                }
            };

            builder.add_transition(from, c, to);
        }
    }

    let dfa = builder.finish(Some(initial_state));
    debug!(
        "Determinized DFA has {} states and {} transitions",
        dfa.num_of_states(),
        dfa.num_of_transitions()
    );

    Ok(dfa)
}
