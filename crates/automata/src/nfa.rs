#![forbid(unsafe_code)]

use std::fmt;

use bitvec::bitvec;
use bitvec::order::Lsb0;

use crate::FiniteAutomaton;
use crate::StateIndex;
use crate::StateSet;
use crate::Symbol;
use crate::Transition;
use crate::write_automaton;

/// A nondeterministic finite automaton with epsilon transitions.
///
/// The states form an arena indexed by `StateIndex`, and the outgoing
/// transitions of every state are kept sorted by symbol and target without
/// duplicates. An `Nfa` is immutable once constructed by [NfaBuilder::finish].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    transitions: Vec<Vec<Transition>>,
    accepting: Vec<bool>,
    initial_state: Option<StateIndex>,
}

impl Nfa {
    /// Returns the targets of the transitions from `state_index` labelled with `symbol`.
    pub fn successors(&self, state_index: StateIndex, symbol: Symbol) -> impl Iterator<Item = StateIndex> + '_ {
        let transitions = &self.transitions[state_index];
        let begin = transitions.partition_point(|transition| transition.symbol < symbol);
        transitions[begin..]
            .iter()
            .take_while(move |transition| transition.symbol == symbol)
            .map(|transition| transition.to)
    }

    /// Returns the sorted set of characters that occur on any transition.
    pub fn alphabet(&self) -> Vec<char> {
        let mut alphabet: Vec<char> = self
            .transitions
            .iter()
            .flatten()
            .filter_map(|transition| transition.symbol.as_char())
            .collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        alphabet
    }

    /// Returns the set of states reachable from the given states using only
    /// epsilon transitions, including the given states themselves.
    pub fn epsilon_closure(&self, states: impl IntoIterator<Item = StateIndex>) -> StateSet {
        let mut visited = bitvec![usize, Lsb0; 0; self.num_of_states()];
        let mut stack = Vec::new();

        for state_index in states {
            if !visited[*state_index] {
                visited.set(*state_index, true);
                stack.push(state_index);
            }
        }

        let mut closure = Vec::new();
        while let Some(state_index) = stack.pop() {
            closure.push(state_index);

            for to in self.successors(state_index, Symbol::Epsilon) {
                if !visited[*to] {
                    visited.set(*to, true);
                    stack.push(to);
                }
            }
        }

        StateSet::from_unsorted(closure)
    }

    /// Returns the epsilon closure of all states reachable by one `c` transition
    /// from the epsilon closure of the given states.
    pub fn move_on_symbol(&self, states: &StateSet, c: char) -> StateSet {
        let closure = self.epsilon_closure(states.iter());
        let targets: Vec<StateIndex> = closure
            .iter()
            .flat_map(|state_index| self.successors(state_index, Symbol::Char(c)))
            .collect();

        self.epsilon_closure(targets)
    }

    /// Returns true iff the given set contains an accepting state.
    pub fn contains_accepting(&self, states: &StateSet) -> bool {
        states.iter().any(|state_index| self.accepting[state_index])
    }
}

impl FiniteAutomaton for Nfa {
    fn initial_state_index(&self) -> Option<StateIndex> {
        self.initial_state
    }

    fn outgoing_transitions(&self, state_index: StateIndex) -> impl Iterator<Item = Transition> + '_ {
        self.transitions[state_index].iter().copied()
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

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_automaton(f, self, "q")
    }
}

/// Builds an [Nfa] by allocating states one at a time and adding transitions
/// between them.
#[derive(Default)]
pub struct NfaBuilder {
    transitions: Vec<Vec<Transition>>,
    accepting: Vec<bool>,
}

/// The result of copying an automaton into a builder: the copied start state
/// and accepting states in the index space of the builder.
pub struct Embedding {
    pub initial_state: Option<StateIndex>,
    pub accepting_states: Vec<StateIndex>,
}

impl NfaBuilder {
    /// Initializes a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes the builder with pre-allocated capacity for states.
    pub fn with_capacity(num_of_states: usize) -> Self {
        Self {
            transitions: Vec::with_capacity(num_of_states),
            accepting: Vec::with_capacity(num_of_states),
        }
    }

    /// Allocates a fresh state and returns its index.
    pub fn add_state(&mut self, accepting: bool) -> StateIndex {
        self.transitions.push(Vec::new());
        self.accepting.push(accepting);
        StateIndex::new(self.transitions.len() - 1)
    }

    /// Adds a transition between two existing states.
    pub fn add_transition(&mut self, from: StateIndex, symbol: Symbol, to: StateIndex) {
        debug_assert!(
            *from < self.num_of_states() && *to < self.num_of_states(),
            "Transition {from} --{symbol}--> {to} refers to a state that does not exist"
        );
        self.transitions[from].push(Transition::new(symbol, to));
    }

    pub fn set_accepting(&mut self, state_index: StateIndex, accepting: bool) {
        self.accepting[state_index] = accepting;
    }

    /// Copies all states and transitions of the given automaton into this
    /// builder, shifting every state index by the current number of states.
    pub fn embed(&mut self, nfa: &Nfa) -> Embedding {
        let offset = self.num_of_states();
        let shift = |state_index: StateIndex| StateIndex::new(*state_index + offset);

        for (transitions, accepting) in nfa.transitions.iter().zip(&nfa.accepting) {
            self.transitions.push(
                transitions
                    .iter()
                    .map(|transition| Transition::new(transition.symbol, shift(transition.to)))
                    .collect(),
            );
            self.accepting.push(*accepting);
        }

        Embedding {
            initial_state: nfa.initial_state.map(shift),
            accepting_states: nfa.accepting_states().map(shift).collect(),
        }
    }

    /// Returns the number of states allocated so far.
    pub fn num_of_states(&self) -> usize {
        self.transitions.len()
    }

    /// Finalizes the automaton with the given start state.
    pub fn finish(mut self, initial_state: Option<StateIndex>) -> Nfa {
        debug_assert!(
            initial_state.is_none_or(|initial| *initial < self.num_of_states()),
            "The start state must be one of the allocated states"
        );

        for transitions in &mut self.transitions {
            transitions.sort_unstable();
            transitions.dedup();
        }

        Nfa {
            transitions: self.transitions,
            accepting: self.accepting,
            initial_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    /// The automaton q0 --ε--> q1 --a--> q2 --ε--> q3, q2 --ε--> q0 with q3 accepting.
    fn example_nfa() -> Nfa {
        let mut builder = NfaBuilder::new();
        let states: Vec<StateIndex> = (0..4).map(|i| builder.add_state(i == 3)).collect();
        builder.add_transition(states[0], Symbol::Epsilon, states[1]);
        builder.add_transition(states[1], Symbol::Char('a'), states[2]);
        builder.add_transition(states[2], Symbol::Epsilon, states[3]);
        builder.add_transition(states[2], Symbol::Epsilon, states[0]);
        builder.finish(Some(states[0]))
    }

    fn set(states: &[usize]) -> StateSet {
        states.iter().copied().map(StateIndex::new).collect()
    }

    #[test]
    fn test_epsilon_closure() {
        let nfa = example_nfa();

        assert_eq!(nfa.epsilon_closure([StateIndex::new(0)]), set(&[0, 1]));
        assert_eq!(nfa.epsilon_closure([StateIndex::new(2)]), set(&[0, 1, 2, 3]));
        assert_eq!(nfa.epsilon_closure([StateIndex::new(3)]), set(&[3]));
        assert!(nfa.epsilon_closure([]).is_empty());
    }

    #[test]
    fn test_move_on_symbol() {
        let nfa = example_nfa();

        assert_eq!(nfa.move_on_symbol(&set(&[0]), 'a'), set(&[0, 1, 2, 3]));
        assert!(nfa.move_on_symbol(&set(&[0]), 'b').is_empty());
        assert!(nfa.move_on_symbol(&set(&[3]), 'a').is_empty());
        assert!(nfa.contains_accepting(&set(&[0, 1, 2, 3])));
        assert!(!nfa.contains_accepting(&set(&[0, 1])));
    }

    #[test]
    fn test_builder_deduplicates_transitions() {
        let mut builder = NfaBuilder::new();
        let s0 = builder.add_state(false);
        let s1 = builder.add_state(true);
        builder.add_transition(s0, Symbol::Char('b'), s1);
        builder.add_transition(s0, Symbol::Char('a'), s1);
        builder.add_transition(s0, Symbol::Char('b'), s1);
        let nfa = builder.finish(Some(s0));

        assert_eq!(nfa.num_of_transitions(), 2);
        assert_eq!(nfa.alphabet(), vec!['a', 'b']);
        assert_eq!(
            nfa.outgoing_transitions(s0).map(|t| t.symbol).collect::<Vec<_>>(),
            vec![Symbol::Char('a'), Symbol::Char('b')]
        );
    }

    #[test]
    fn test_embed_shifts_indices() {
        let inner = example_nfa();

        let mut builder = NfaBuilder::new();
        let fresh = builder.add_state(false);
        let embedding = builder.embed(&inner);

        assert_eq!(embedding.initial_state, Some(StateIndex::new(1)));
        assert_eq!(embedding.accepting_states, vec![StateIndex::new(4)]);

        builder.add_transition(fresh, Symbol::Epsilon, StateIndex::new(1));
        let nfa = builder.finish(Some(fresh));

        assert_eq!(nfa.num_of_states(), 5);
        assert_eq!(nfa.num_of_transitions(), inner.num_of_transitions() + 1);
        assert_eq!(nfa.epsilon_closure([fresh]), set(&[0, 1, 2]));
    }

    #[test]
    fn test_display_lists_transitions() {
        let text = example_nfa().to_string();

        assert!(text.contains("Number of states: 4"));
        assert!(text.contains("Start state: q0"));
        assert!(text.contains("Accepting states: {q3}"));
        assert!(text.contains("  q1 --a--> q2"));
        assert!(text.contains("  q2 --ε--> q0"));
    }
}
