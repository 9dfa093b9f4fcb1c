#![forbid(unsafe_code)]

use std::fmt;
use std::io::Read;

use itertools::Itertools;
use log::debug;
use log::info;
use refa_automata::Acceptor;
use refa_automata::Dfa;
use refa_automata::FiniteAutomaton;
use refa_io::LineIterator;
use refa_regex::CompileError;
use refa_regex::CompileOptions;
use refa_regex::compile;
use refa_utilities::RefaError;
use refa_utilities::Timing;
use streaming_iterator::StreamingIterator;

/// A production line that does not have the expected shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineError {
    pub line_number: usize,
    pub line: String,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: invalid production '{}'", self.line_number, self.line)
    }
}

/// Checks that lines have the shape `A → body | ... | body` where `A` is an
/// upper case letter and every body is `ε` or a sequence of letters and digits.
///
/// Spaces and tabs are allowed around the arrow and the separators. The check
/// is performed by a minimal DFA compiled from a regular expression.
pub struct GrammarValidator {
    dfa: Dfa,
}

impl GrammarValidator {
    /// Compiles the automaton that recognizes production lines.
    pub fn new() -> Result<Self, CompileError> {
        let expression = production_expression();
        debug!("Production expression {expression}");

        let compiled = compile(&expression, &CompileOptions::default(), &mut Timing::new())?;
        info!(
            "Compiled the production validator into a DFA with {} states",
            compiled.minimal_dfa.num_of_states()
        );

        Ok(Self {
            dfa: compiled.minimal_dfa,
        })
    }

    /// Returns true iff the trimmed line is blank, a `#` comment or a production.
    pub fn validate_line(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return true;
        }

        matches!(self.dfa.accepts(line), Ok(true))
    }

    /// Returns every invalid line of the given reader.
    pub fn validate(&self, reader: impl Read) -> Result<Vec<LineError>, RefaError> {
        let mut lines = LineIterator::new(reader);
        let mut errors = Vec::new();

        while let Some(line) = lines.next() {
            if !self.validate_line(line) {
                let line = line.clone();
                errors.push(LineError {
                    line_number: lines.line_number(),
                    line,
                });
            }
        }

        if let Some(error) = lines.take_error() {
            return Err(error.into());
        }

        info!("Validated {} lines, found {} errors", lines.line_number(), errors.len());
        Ok(errors)
    }
}

/// Returns the expression `[A-Z]\s*→\s*(ε|[A-Za-z0-9]+(\s*\|\s*[A-Za-z0-9]+)*)`
/// with the character classes written out as unions, and `\s` restricted to
/// space and tab.
fn production_expression() -> String {
    let upper = ('A'..='Z').join("|");
    let alphanumeric = format!(
        "({upper}|{}|{})",
        ('a'..='z').join("|"),
        ('0'..='9').join("|")
    );
    let word = format!("{alphanumeric}+");
    let whitespace = "( |\t)*";

    format!("({upper}){whitespace}→{whitespace}(\\ε|{word}({whitespace}\\|{whitespace}{word})*)")
}
