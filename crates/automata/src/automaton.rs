#![forbid(unsafe_code)]

//! The finite automaton trait and the associated state and symbol types.

use std::fmt;

use itertools::Itertools;
use refa_utilities::TagIndex;
use thiserror::Error;

/// A unique type for the states.
pub struct StateTag;

/// The index for a state.
pub type StateIndex = TagIndex<usize, StateTag>;

/// The symbol on a transition: either a concrete input character or epsilon.
///
/// Epsilon orders before every character, so sorted transition lists start
/// with the epsilon transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl Symbol {
    /// Returns true iff this is the epsilon symbol.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Returns the character of a non-epsilon symbol.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(*c),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub symbol: Symbol,
    pub to: StateIndex,
}

impl Transition {
    /// Constructs a new transition.
    pub fn new(symbol: Symbol, to: StateIndex) -> Self {
        Self { symbol, to }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("The automaton has no start state")]
    UndefinedStart,
}

/// The trait for finite automata.
///
/// States are referred to by (strong) indices of type `StateIndex`, which
/// range from zero up to the number of states.
pub trait FiniteAutomaton {
    /// Returns the index of the start state, if one has been designated.
    fn initial_state_index(&self) -> Option<StateIndex>;

    /// Returns the outgoing transitions of the given state, sorted by symbol.
    fn outgoing_transitions(&self, state_index: StateIndex) -> impl Iterator<Item = Transition> + '_;

    /// Returns the number of states.
    fn num_of_states(&self) -> usize;

    /// Returns the number of transitions.
    fn num_of_transitions(&self) -> usize;

    /// Returns true iff the given state is accepting.
    fn is_accepting(&self, state_index: StateIndex) -> bool;

    /// Iterate over all states of the automaton.
    fn iter_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        (0..self.num_of_states()).map(StateIndex::new)
    }

    /// Iterate over the accepting states of the automaton.
    fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.iter_states().filter(move |state_index| self.is_accepting(*state_index))
    }
}

/// Writes a textual listing of the given automaton, where every state is
/// printed as the given prefix followed by its index.
pub(crate) fn write_automaton<A: FiniteAutomaton>(
    f: &mut fmt::Formatter<'_>,
    automaton: &A,
    prefix: &str,
) -> fmt::Result {
    writeln!(f, "Number of states: {}", automaton.num_of_states())?;
    match automaton.initial_state_index() {
        Some(initial) => writeln!(f, "Start state: {prefix}{initial}")?,
        None => writeln!(f, "Start state: none")?,
    }
    writeln!(
        f,
        "Accepting states: {{{}}}",
        automaton
            .accepting_states()
            .format_with(", ", |state, f| f(&format_args!("{prefix}{state}")))
    )?;
    writeln!(f, "Transitions:")?;
    for state_index in automaton.iter_states() {
        for transition in automaton.outgoing_transitions(state_index) {
            writeln!(
                f,
                "  {prefix}{state_index} --{}--> {prefix}{}",
                transition.symbol, transition.to
            )?;
        }
    }

    Ok(())
}
