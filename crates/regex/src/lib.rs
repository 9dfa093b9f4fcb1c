#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod batch;
mod compile;
mod error;
mod postfix;
mod random_expression;
mod thompson;
mod tokenizer;

pub use batch::*;
pub use compile::*;
pub use error::*;
pub use postfix::*;
pub use random_expression::*;
pub use thompson::*;
pub use tokenizer::*;
