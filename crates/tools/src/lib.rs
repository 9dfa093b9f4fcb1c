#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod verbosity;
pub mod version;

pub use verbosity::*;
pub use version::*;
