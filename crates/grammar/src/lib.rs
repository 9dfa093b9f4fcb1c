#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod epsilon_elimination;
mod grammar;
mod io_grammar;
mod validator;

pub use epsilon_elimination::*;
pub use grammar::*;
pub use io_grammar::*;
pub use validator::*;
