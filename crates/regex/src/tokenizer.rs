#![forbid(unsafe_code)]

use std::fmt;

use itertools::Itertools;
use log::trace;

/// The tokens of a regular expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// An ordinary character.
    Literal(char),
    /// A character preceded by a backslash, which never acts as an operator.
    Escaped(char),
    /// The empty string, written as `ε` or `#`.
    Epsilon,
    Union,
    /// Concatenation, which is never written but inserted by [format_expression].
    Concat,
    Star,
    Plus,
    Optional,
    OpenParen,
    CloseParen,
}

impl Token {
    /// Returns true iff the token is an operand, which stands for an automaton by itself.
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::Escaped(_) | Token::Epsilon)
    }

    /// Returns the binding strength of an operator, higher binds tighter.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Token::Union => Some(1),
            Token::Concat => Some(2),
            Token::Star | Token::Plus | Token::Optional => Some(3),
            _ => None,
        }
    }

    /// Returns the number of operands of an operator.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Token::Union | Token::Concat => Some(2),
            Token::Star | Token::Plus | Token::Optional => Some(1),
            _ => None,
        }
    }

    /// Returns true iff a subexpression can end with this token.
    fn can_end(&self) -> bool {
        self.is_operand() || matches!(self, Token::CloseParen | Token::Star | Token::Plus | Token::Optional)
    }

    /// Returns true iff a subexpression can start with this token.
    fn can_start(&self) -> bool {
        self.is_operand() || matches!(self, Token::OpenParen)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "{c}"),
            Token::Escaped(c) => write!(f, "\\{c}"),
            Token::Epsilon => write!(f, "ε"),
            Token::Union => write!(f, "|"),
            Token::Concat => write!(f, "·"),
            Token::Star => write!(f, "*"),
            Token::Plus => write!(f, "+"),
            Token::Optional => write!(f, "?"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
        }
    }
}

/// An infix regular expression in which every concatenation is explicit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattedExpression {
    tokens: Vec<Token>,
}

impl FormattedExpression {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for FormattedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().format(""))
    }
}

/// Splits the expression into tokens and inserts a concatenation between every
/// two adjacent tokens where the first can end a subexpression and the second
/// can start one.
///
/// A backslash escapes the character that follows it, and a backslash at the
/// very end of the expression is a literal backslash.
pub fn format_expression(expression: &str) -> FormattedExpression {
    let mut tokens = Vec::new();
    let mut chars = expression.chars();

    while let Some(c) = chars.next() {
        let token = match c {
            '\\' => match chars.next() {
                Some(escaped) => Token::Escaped(escaped),
                None => Token::Literal('\\'),
            },
            'ε' | '#' => Token::Epsilon,
            '|' => Token::Union,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Optional,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            c => Token::Literal(c),
        };

        if tokens.last().is_some_and(Token::can_end) && token.can_start() {
            tokens.push(Token::Concat);
        }
        tokens.push(token);
    }

    let formatted = FormattedExpression::new(tokens);
    trace!("Formatted expression {expression} as {formatted}");
    formatted
}
