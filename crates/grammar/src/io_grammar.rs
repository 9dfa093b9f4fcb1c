#![forbid(unsafe_code)]

use std::io::Read;

use log::info;
use refa_io::LineIterator;
use refa_utilities::RefaError;
use refa_utilities::debug_trace;
use streaming_iterator::StreamingIterator;
use thiserror::Error;

use crate::Body;
use crate::Grammar;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Line {line_number}: missing arrow '→' in '{line}'")]
    MissingArrow { line_number: usize, line: String },

    #[error("Line {line_number}: invalid production '{line}'")]
    InvalidProduction { line_number: usize, line: String },
}

/// Loads a grammar from the given reader, with one line `A → body | body | ...`
/// per nonterminal.
///
/// Blank lines and lines starting with `#` are skipped. The head must be a
/// single upper case letter, and every body is either `ε` or a non-empty
/// sequence of letters and digits. Spaces around the arrow and the bodies are
/// ignored.
pub fn read_grammar(reader: impl Read) -> Result<Grammar, RefaError> {
    info!("Reading grammar...");

    let mut lines = LineIterator::new(reader);
    let mut grammar = Grammar::new();

    while let Some(line) = lines.next() {
        let line = line.trim().to_string();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (head, bodies) = parse_production(&line, lines.line_number())?;
        for body in bodies {
            debug_trace!("Read production {head} → {body}");
            grammar.add_production(head, body);
        }
    }

    if let Some(error) = lines.take_error() {
        return Err(error.into());
    }

    info!(
        "Read grammar with {} nonterminals and {} productions",
        grammar.rules().len(),
        grammar.num_of_productions()
    );
    Ok(grammar)
}

/// Parses a single trimmed production line.
fn parse_production(line: &str, line_number: usize) -> Result<(char, Vec<Body>), GrammarError> {
    let invalid = || GrammarError::InvalidProduction {
        line_number,
        line: line.to_string(),
    };

    let (head, bodies) = line.split_once('→').ok_or_else(|| GrammarError::MissingArrow {
        line_number,
        line: line.to_string(),
    })?;

    let mut head_chars = head.trim().chars();
    let head = match (head_chars.next(), head_chars.next()) {
        (Some(head), None) if head.is_ascii_uppercase() => head,
        _ => return Err(invalid()),
    };

    let bodies = bodies
        .split('|')
        .map(|body| {
            let body = body.trim();
            if body == "ε" {
                Ok(Body::epsilon())
            } else if !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric()) {
                Ok(Body::from(body))
            } else {
                Err(invalid())
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((head, bodies))
}
