#![forbid(unsafe_code)]

use std::fmt;

use itertools::Itertools;
use log::trace;

use crate::FormattedExpression;
use crate::RegexError;
use crate::Token;

/// Determines how parentheses without a matching counterpart are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum GroupingMode {
    /// Unmatched parentheses are reported as an error.
    #[default]
    Strict,
    /// Unmatched parentheses are silently dropped.
    Lenient,
}

/// A regular expression in postfix notation, which contains no parentheses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostfixExpression {
    tokens: Vec<Token>,
}

impl PostfixExpression {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Display for PostfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().format(""))
    }
}

/// Converts the formatted infix expression to postfix notation using the
/// shunting-yard algorithm.
///
/// All operators are left associative: an operator first pops every stacked
/// operator that binds at least as tightly. The positions in errors are
/// indices into the formatted token sequence.
pub fn to_postfix(expression: &FormattedExpression, grouping: GroupingMode) -> Result<PostfixExpression, RegexError> {
    let mut output = Vec::with_capacity(expression.tokens().len());
    let mut stack: Vec<(Token, usize)> = Vec::new();

    for (position, token) in expression.tokens().iter().enumerate() {
        match token {
            token if token.is_operand() => output.push(*token),
            Token::OpenParen => stack.push((*token, position)),
            Token::CloseParen => {
                let mut matched = false;
                while let Some((top, _)) = stack.pop() {
                    if top == Token::OpenParen {
                        matched = true;
                        break;
                    }
                    output.push(top);
                }

                if !matched && grouping == GroupingMode::Strict {
                    return Err(RegexError::UnbalancedParenthesis { position });
                }
            }
            operator => {
                let precedence = operator.precedence();
                while let Some((top, _)) = stack.last() {
                    if top.precedence().is_some() && top.precedence() >= precedence {
                        output.push(*top);
                        stack.pop();
                    } else {
                        break;
                    }
                }
                stack.push((*operator, position));
            }
        }
    }

    while let Some((top, position)) = stack.pop() {
        if top == Token::OpenParen {
            if grouping == GroupingMode::Strict {
                return Err(RegexError::UnbalancedParenthesis { position });
            }
        } else {
            output.push(top);
        }
    }

    let postfix = PostfixExpression::new(output);
    trace!("Postfix expression {postfix}");
    Ok(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;
    use test_log::test;

    use crate::format_expression;

    #[test_case("ab", "ab·" ; "concatenation")]
    #[test_case("a|b", "ab|" ; "union")]
    #[test_case("a|bc", "abc·|" ; "concatenation binds tighter than union")]
    #[test_case("ab*", "ab*·" ; "star binds tighter than concatenation")]
    #[test_case("(a|b)*abb", "ab|*a·b·b·" ; "classic")]
    #[test_case("a|b|c", "ab|c|" ; "left associative")]
    #[test_case("a?b", "a?b·" ; "optional")]
    #[test_case("\\(a", "\\(a·" ; "escaped parenthesis")]
    #[test_case("", "" ; "empty")]
    fn test_to_postfix(expression: &str, expected: &str) {
        let postfix = to_postfix(&format_expression(expression), GroupingMode::Strict).unwrap();
        assert_eq!(postfix.to_string(), expected);
    }

    #[test_case("(a", 0 ; "unclosed")]
    #[test_case("a)", 1 ; "unopened")]
    #[test_case("(a))(", 3 ; "extra closing")]
    fn test_unbalanced_strict(expression: &str, position: usize) {
        assert_eq!(
            to_postfix(&format_expression(expression), GroupingMode::Strict),
            Err(RegexError::UnbalancedParenthesis { position })
        );
    }

    #[test]
    fn test_unbalanced_lenient() {
        let unclosed = to_postfix(&format_expression("(a|b"), GroupingMode::Lenient).unwrap();
        assert_eq!(unclosed.to_string(), "ab|");

        let unopened = to_postfix(&format_expression("a|b)c"), GroupingMode::Lenient).unwrap();
        assert_eq!(unopened.to_string(), "ab|c·");
    }
}
