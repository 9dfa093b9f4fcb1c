#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod automaton;
mod dfa;
mod nfa;
mod random_nfa;
mod simulation;
mod state_set;
mod subset_construction;

pub use automaton::*;
pub use dfa::*;
pub use nfa::*;
pub use random_nfa::*;
pub use simulation::*;
pub use state_set::*;
pub use subset_construction::*;
