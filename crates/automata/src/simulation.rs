#![forbid(unsafe_code)]

use refa_utilities::debug_trace;

use crate::AutomatonError;
use crate::Dfa;
use crate::FiniteAutomaton;
use crate::Nfa;

/// Whole-string acceptance testing, shared by the automaton types.
pub trait Acceptor {
    /// Returns true iff the automaton accepts exactly the given input.
    fn accepts(&self, input: &str) -> Result<bool, AutomatonError>;
}

impl Acceptor for Nfa {
    fn accepts(&self, input: &str) -> Result<bool, AutomatonError> {
        let initial = self.initial_state_index().ok_or(AutomatonError::UndefinedStart)?;

        let mut current = self.epsilon_closure([initial]);
        for c in input.chars() {
            current = self.move_on_symbol(&current, c);
            debug_trace!("Nfa moved on {c} to {current}");

            if current.is_empty() {
                return Ok(false);
            }
        }

        Ok(self.contains_accepting(&current))
    }
}

impl Acceptor for Dfa {
    fn accepts(&self, input: &str) -> Result<bool, AutomatonError> {
        let mut current = self.initial_state_index().ok_or(AutomatonError::UndefinedStart)?;

        for c in input.chars() {
            match self.next_state(current, c) {
                Some(next) => {
                    debug_trace!("Dfa moved on {c} from {current} to {next}");
                    current = next;
                }
                None => return Ok(false),
            }
        }

        Ok(self.is_accepting(current))
    }
}
