#![forbid(unsafe_code)]

//! Thompson's construction of an NFA from a postfix regular expression, and
//! the combinators that implement the individual operators.
//!
//! Every combinator consumes its operands and returns a new automaton into
//! which the operands are embedded with fresh state indices.

use log::debug;
use refa_automata::FiniteAutomaton;
use refa_automata::Nfa;
use refa_automata::NfaBuilder;
use refa_automata::Symbol;

use crate::MalformedExpression;
use crate::PostfixExpression;
use crate::RegexError;
use crate::Token;

/// Returns the automaton that accepts exactly the given character.
pub fn symbol(c: char) -> Nfa {
    single_transition(Symbol::Char(c))
}

/// Returns the automaton that accepts exactly the empty string.
pub fn epsilon() -> Nfa {
    single_transition(Symbol::Epsilon)
}

/// Returns the automaton that accepts the words `uv` where `u` is accepted by
/// `left` and `v` by `right`.
pub fn concatenation(left: Nfa, right: Nfa) -> Nfa {
    let mut builder = NfaBuilder::with_capacity(left.num_of_states() + right.num_of_states());
    let left = builder.embed(&left);
    let right = builder.embed(&right);

    for state_index in &left.accepting_states {
        builder.set_accepting(*state_index, false);
        if let Some(right_initial) = right.initial_state {
            builder.add_transition(*state_index, Symbol::Epsilon, right_initial);
        }
    }

    builder.finish(left.initial_state)
}

/// Returns the automaton that accepts the words accepted by `left` or by `right`.
pub fn alternation(left: Nfa, right: Nfa) -> Nfa {
    let mut builder = NfaBuilder::with_capacity(left.num_of_states() + right.num_of_states() + 2);
    let initial = builder.add_state(false);
    let accepting = builder.add_state(true);

    for embedding in [builder.embed(&left), builder.embed(&right)] {
        if let Some(initial_state) = embedding.initial_state {
            builder.add_transition(initial, Symbol::Epsilon, initial_state);
        }

        for state_index in embedding.accepting_states {
            builder.set_accepting(state_index, false);
            builder.add_transition(state_index, Symbol::Epsilon, accepting);
        }
    }

    builder.finish(Some(initial))
}

/// Returns the automaton that accepts any number of repetitions, including
/// zero, of the words accepted by the given automaton.
pub fn star(nfa: Nfa) -> Nfa {
    let mut builder = NfaBuilder::with_capacity(nfa.num_of_states() + 2);
    let initial = builder.add_state(false);
    let accepting = builder.add_state(true);
    let embedding = builder.embed(&nfa);

    if let Some(inner_initial) = embedding.initial_state {
        builder.add_transition(initial, Symbol::Epsilon, inner_initial);
    }

    for state_index in embedding.accepting_states {
        builder.set_accepting(state_index, false);
        builder.add_transition(state_index, Symbol::Epsilon, accepting);
        if let Some(inner_initial) = embedding.initial_state {
            builder.add_transition(state_index, Symbol::Epsilon, inner_initial);
        }
    }

    builder.add_transition(initial, Symbol::Epsilon, accepting);
    builder.finish(Some(initial))
}

/// Returns the automaton that accepts one or more repetitions of the words
/// accepted by the given automaton.
pub fn plus(nfa: Nfa) -> Nfa {
    let repeated = star(nfa.clone());
    concatenation(nfa, repeated)
}

/// Returns the automaton that accepts the empty string and the words accepted
/// by the given automaton.
pub fn optional(nfa: Nfa) -> Nfa {
    alternation(epsilon(), nfa)
}

/// Evaluates the postfix expression on a stack of automata, and returns the
/// single automaton that remains.
pub fn thompson(postfix: &PostfixExpression) -> Result<Nfa, RegexError> {
    let mut stack: Vec<Nfa> = Vec::new();

    for (position, token) in postfix.tokens().iter().enumerate() {
        let missing_operands = |stack_size: usize| -> RegexError {
            MalformedExpression::MissingOperands {
                operator: *token,
                position,
                arity: token.arity().unwrap_or_default(),
                stack_size,
            }
            .into()
        };

        let nfa = match token {
            Token::Literal(c) | Token::Escaped(c) => symbol(*c),
            Token::Epsilon => epsilon(),
            Token::Concat | Token::Union => {
                let stack_size = stack.len();
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(missing_operands(stack_size));
                };

                if *token == Token::Concat {
                    concatenation(left, right)
                } else {
                    alternation(left, right)
                }
            }
            Token::Star | Token::Plus | Token::Optional => {
                let Some(operand) = stack.pop() else {
                    return Err(missing_operands(0));
                };

                match token {
                    Token::Star => star(operand),
                    Token::Plus => plus(operand),
                    _ => optional(operand),
                }
            }
            Token::OpenParen | Token::CloseParen => return Err(RegexError::UnbalancedParenthesis { position }),
        };

        stack.push(nfa);
    }

    if stack.len() != 1 {
        return Err(MalformedExpression::InvalidStackSize {
            stack_size: stack.len(),
        }
        .into());
    }

    let nfa = stack.pop().ok_or(MalformedExpression::InvalidStackSize { stack_size: 0 })?;
    debug!(
        "Thompson NFA has {} states and {} transitions",
        nfa.num_of_states(),
        nfa.num_of_transitions()
    );
    Ok(nfa)
}

/// Returns the automaton that moves from its start state to its only
/// accepting state on the given symbol.
fn single_transition(symbol: Symbol) -> Nfa {
    let mut builder = NfaBuilder::with_capacity(2);
    let initial = builder.add_state(false);
    let accepting = builder.add_state(true);
    builder.add_transition(initial, symbol, accepting);
    builder.finish(Some(initial))
}
