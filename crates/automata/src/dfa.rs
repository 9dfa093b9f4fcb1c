#![forbid(unsafe_code)]

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;

use crate::FiniteAutomaton;
use crate::StateIndex;
use crate::Symbol;
use crate::Transition;
use crate::write_automaton;

/// A deterministic finite automaton with a partial transition function.
///
/// Every state has at most one outgoing transition per character of the
/// alphabet, kept sorted by character. A missing transition means that the
/// input is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    transitions: Vec<Vec<(char, StateIndex)>>,
    accepting: Vec<bool>,
    alphabet: Vec<char>,
    initial_state: Option<StateIndex>,
}

impl Dfa {
    /// Returns the sorted alphabet of the automaton.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Returns the target of the transition from `state_index` on `c`, if it exists.
    pub fn next_state(&self, state_index: StateIndex, c: char) -> Option<StateIndex> {
        let transitions = &self.transitions[state_index];
        transitions
            .binary_search_by_key(&c, |(symbol, _)| *symbol)
            .ok()
            .map(|position| transitions[position].1)
    }
}

impl FiniteAutomaton for Dfa {
    fn initial_state_index(&self) -> Option<StateIndex> {
        self.initial_state
    }

    fn outgoing_transitions(&self, state_index: StateIndex) -> impl Iterator<Item = Transition> + '_ {
        self.transitions[state_index]
            .iter()
            .map(|(c, to)| Transition::new(Symbol::Char(*c), *to))
    }

    fn num_of_states(&self) -> usize {
        self.transitions.len()
    }

    fn num_of_transitions(&self) -> usize {
        self.transitions.iter().map(Vec::len).sum()
    }

    fn is_accepting(&self, state_index: StateIndex) -> bool {
        self.accepting[state_index]
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Alphabet: {{{}}}", self.alphabet.iter().format(", "))?;
        write_automaton(f, self, "s")
    }
}

/// Builds a [Dfa] over a fixed alphabet.
pub struct DfaBuilder {
    transitions: Vec<Vec<(char, StateIndex)>>,
    accepting: Vec<bool>,
    alphabet: Vec<char>,
}

impl DfaBuilder {
    /// Initializes a new empty builder, the alphabet is sorted and deduplicated.
    pub fn new(mut alphabet: Vec<char>) -> Self {
        alphabet.sort_unstable();
        alphabet.dedup();

        Self {
            transitions: Vec::new(),
            accepting: Vec::new(),
            alphabet,
        }
    }

    /// Allocates a fresh state and returns its index.
    pub fn add_state(&mut self, accepting: bool) -> StateIndex {
        self.transitions.push(Vec::new());
        self.accepting.push(accepting);
        StateIndex::new(self.transitions.len() - 1)
    }

    /// Adds the transition `from --c--> to`. Every pair of state and character
    /// may be given a transition at most once.
    pub fn add_transition(&mut self, from: StateIndex, c: char, to: StateIndex) {
        debug_assert!(
            self.alphabet.binary_search(&c).is_ok(),
            "Character {c} is not part of the alphabet"
        );
        debug_assert!(
            *to < self.num_of_states(),
            "Transition {from} --{c}--> {to} refers to a state that does not exist"
        );
        debug_assert!(
            self.transitions[from].iter().all(|(symbol, _)| *symbol != c),
            "State {from} already has a transition on {c}"
        );

        self.transitions[from].push((c, to));
    }

    pub fn num_of_states(&self) -> usize {
        self.transitions.len()
    }

    /// Finalizes the automaton with the given start state.
    pub fn finish(mut self, initial_state: Option<StateIndex>) -> Dfa {
        debug_assert!(
            initial_state.is_none_or(|initial| *initial < self.num_of_states()),
            "The start state must be one of the allocated states"
        );

        for transitions in &mut self.transitions {
            transitions.sort_unstable_by_key(|(c, _)| *c);
        }

        Dfa {
            transitions: self.transitions,
            accepting: self.accepting,
            alphabet: self.alphabet,
            initial_state,
        }
    }
}

/// Returns true iff there is a bijection between the states of both automata
/// that preserves the start state, the accepting states and every transition.
///
/// Both automata are explored simultaneously from their start states, so
/// states that are unreachable in either automaton make the check fail.
pub fn is_isomorphic(left: &Dfa, right: &Dfa) -> bool {
    if left.num_of_states() != right.num_of_states() || left.alphabet() != right.alphabet() {
        return false;
    }

    let (left_initial, right_initial) = match (left.initial_state_index(), right.initial_state_index()) {
        (Some(left_initial), Some(right_initial)) => (left_initial, right_initial),
        (None, None) => return left.num_of_states() == 0,
        _ => return false,
    };

    let mut left_to_right: Vec<Option<StateIndex>> = vec![None; left.num_of_states()];
    let mut right_to_left: Vec<Option<StateIndex>> = vec![None; right.num_of_states()];
    let mut queue = VecDeque::new();

    left_to_right[left_initial] = Some(right_initial);
    right_to_left[right_initial] = Some(left_initial);
    queue.push_back((left_initial, right_initial));
    let mut num_of_mapped = 1;

    while let Some((left_state, right_state)) = queue.pop_front() {
        if left.is_accepting(left_state) != right.is_accepting(right_state) {
            return false;
        }

        let left_transitions = &left.transitions[left_state];
        let right_transitions = &right.transitions[right_state];
        if left_transitions.len() != right_transitions.len() {
            return false;
        }

        for ((left_c, left_to), (right_c, right_to)) in left_transitions.iter().zip(right_transitions) {
            if left_c != right_c {
                return false;
            }

            match (left_to_right[*left_to], right_to_left[*right_to]) {
                (None, None) => {
                    left_to_right[*left_to] = Some(*right_to);
                    right_to_left[*right_to] = Some(*left_to);
                    queue.push_back((*left_to, *right_to));
                    num_of_mapped += 1;
                }
                (Some(mapped_right), Some(mapped_left)) => {
                    if mapped_right != *right_to || mapped_left != *left_to {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    num_of_mapped == left.num_of_states()
}
