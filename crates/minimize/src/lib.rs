#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod minimize;
mod moore_refinement;
mod partition;
mod quotient;

pub use minimize::*;
pub use moore_refinement::*;
pub use partition::*;
pub use quotient::*;
