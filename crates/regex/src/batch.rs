#![forbid(unsafe_code)]

//! Files of test records, one `expression,input` pair per line.

use std::fmt;
use std::io::Read;

use log::info;
use log::warn;
use refa_io::LineIterator;
use refa_utilities::RefaError;
use refa_utilities::Timing;
use streaming_iterator::StreamingIterator;

use crate::CompileError;
use crate::CompileOptions;
use crate::MatchReport;
use crate::compile_and_match_with;

/// The contents of a single non-blank, non-comment line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchRecord {
    /// An expression and the input to match against it.
    Case { expression: String, input: String },
    /// A line without a comma separating the expression and the input.
    Malformed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchEntry {
    pub line_number: usize,
    pub record: BatchRecord,
}

/// Reads the records from the given reader.
///
/// Every line is split at its first comma into the expression and the input,
/// both trimmed of surrounding whitespace. Blank lines and lines starting with
/// `#` are skipped.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<BatchEntry>, RefaError> {
    let mut iterator = LineIterator::new(reader);
    let mut entries = Vec::new();

    while let Some(line) = iterator.next() {
        let line = line.trim().to_string();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let record = match line.split_once(',') {
            Some((expression, input)) => BatchRecord::Case {
                expression: expression.trim().to_string(),
                input: input.trim().to_string(),
            },
            None => BatchRecord::Malformed(line),
        };

        entries.push(BatchEntry {
            line_number: iterator.line_number(),
            record,
        });
    }

    if let Some(error) = iterator.take_error() {
        return Err(error.into());
    }

    Ok(entries)
}

/// The result of processing a single record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The automata agree on the input.
    Consistent(MatchReport),
    /// The automata disagree on the input.
    Inconsistent(MatchReport),
    /// The expression could not be compiled.
    Failed(CompileError),
    /// The line is not a record.
    Malformed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchResult {
    pub line_number: usize,
    pub record: BatchRecord,
    pub outcome: BatchOutcome,
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Consistent(_))
    }
}

impl fmt::Display for BatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: ", self.line_number)?;
        if let BatchRecord::Case { expression, input } = &self.record {
            write!(f, "{expression} -> '{input}': ")?;
        }

        match &self.outcome {
            BatchOutcome::Consistent(report) => {
                write!(f, "{}", if report.min_dfa_accept { "accepted" } else { "rejected" })
            }
            BatchOutcome::Inconsistent(report) => write!(
                f,
                "inconsistent (NFA {}, DFA {}, minimal DFA {})",
                report.nfa_accept, report.dfa_accept, report.min_dfa_accept
            ),
            BatchOutcome::Failed(error) => write!(f, "error: {error}"),
            BatchOutcome::Malformed(line) => write!(f, "malformed record '{line}', expected 'expression,input'"),
        }
    }
}

/// The results of all records of a batch, in the order of the records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub results: Vec<BatchResult>,
}

impl BatchSummary {
    pub fn num_of_processed(&self) -> usize {
        self.results.len()
    }

    pub fn num_of_successful(&self) -> usize {
        self.results.iter().filter(|result| result.is_success()).count()
    }

    pub fn num_of_failed(&self) -> usize {
        self.num_of_processed() - self.num_of_successful()
    }

    /// Returns the results of the records that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &BatchResult> + '_ {
        self.results.iter().filter(|result| !result.is_success())
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed: {}", self.num_of_processed())?;
        writeln!(f, "Successful: {}", self.num_of_successful())?;
        writeln!(f, "Failed: {}", self.num_of_failed())?;
        for failure in self.failures() {
            writeln!(f, "  {failure}")?;
        }

        Ok(())
    }
}

/// Compiles and matches every record independently, in order. A record
/// succeeds when it compiles and all automata agree on its input.
pub fn run_batch(entries: &[BatchEntry], options: &CompileOptions, timing: &mut Timing) -> BatchSummary {
    info!("Processing {} records...", entries.len());

    let results = entries
        .iter()
        .map(|entry| {
            let outcome = match &entry.record {
                BatchRecord::Case { expression, input } => {
                    match compile_and_match_with(expression, input, options, timing) {
                        Ok(report) if report.is_consistent() => BatchOutcome::Consistent(report),
                        Ok(report) => BatchOutcome::Inconsistent(report),
                        Err(error) => BatchOutcome::Failed(error),
                    }
                }
                BatchRecord::Malformed(line) => BatchOutcome::Malformed(line.clone()),
            };

            let result = BatchResult {
                line_number: entry.line_number,
                record: entry.record.clone(),
                outcome,
            };

            if !result.is_success() {
                warn!("{result}");
            }
            result
        })
        .collect();

    BatchSummary { results }
}
