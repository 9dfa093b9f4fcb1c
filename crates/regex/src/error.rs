#![forbid(unsafe_code)]

use thiserror::Error;

use crate::Token;

/// A postfix expression that does not describe exactly one automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedExpression {
    #[error(
        "Operator '{operator}' at position {position} requires {arity} operand(s), \
         but only {stack_size} are available"
    )]
    MissingOperands {
        operator: Token,
        position: usize,
        arity: usize,
        stack_size: usize,
    },

    #[error("The expression describes {stack_size} automata instead of exactly one")]
    InvalidStackSize { stack_size: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    #[error("Malformed expression: {0}")]
    Malformed(#[from] MalformedExpression),

    #[error("Unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },
}
