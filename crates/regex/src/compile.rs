#![forbid(unsafe_code)]

use log::info;
use refa_automata::Acceptor;
use refa_automata::AutomatonError;
use refa_automata::Dfa;
use refa_automata::FiniteAutomaton;
use refa_automata::Nfa;
use refa_automata::subset_construction;
use refa_minimize::minimize;
use refa_utilities::Timing;
use thiserror::Error;

use crate::FormattedExpression;
use crate::GroupingMode;
use crate::PostfixExpression;
use crate::RegexError;
use crate::format_expression;
use crate::thompson;
use crate::to_postfix;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Regex(#[from] RegexError),

    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

/// The options that influence the compilation of an expression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub grouping: GroupingMode,
}

/// Every stage of the compilation of a single regular expression.
#[derive(Clone, Debug)]
pub struct CompiledExpression {
    pub formatted: FormattedExpression,
    pub postfix: PostfixExpression,
    pub nfa: Nfa,
    pub dfa: Dfa,
    pub minimal_dfa: Dfa,
}

/// The acceptance results of the three automata for one input string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchReport {
    pub nfa_accept: bool,
    pub dfa_accept: bool,
    pub min_dfa_accept: bool,
}

impl MatchReport {
    /// Returns true iff all automata agree on the input.
    pub fn is_consistent(&self) -> bool {
        self.nfa_accept == self.dfa_accept && self.dfa_accept == self.min_dfa_accept
    }
}

impl CompiledExpression {
    /// Runs the input through the NFA, the DFA and the minimal DFA.
    pub fn matches(&self, input: &str) -> Result<MatchReport, AutomatonError> {
        Ok(MatchReport {
            nfa_accept: self.nfa.accepts(input)?,
            dfa_accept: self.dfa.accepts(input)?,
            min_dfa_accept: self.minimal_dfa.accepts(input)?,
        })
    }
}

/// Compiles the expression through every stage of the pipeline, recording the
/// time of each stage in `timing`.
pub fn compile(
    expression: &str,
    options: &CompileOptions,
    timing: &mut Timing,
) -> Result<CompiledExpression, CompileError> {
    info!("Compiling expression {expression}...");

    let mut time = timing.start("format");
    let formatted = format_expression(expression);
    time.finish();

    let mut time = timing.start("postfix");
    let postfix = to_postfix(&formatted, options.grouping);
    time.finish();
    let postfix = postfix?;

    let mut time = timing.start("thompson");
    let nfa = thompson(&postfix);
    time.finish();
    let nfa = nfa?;

    let mut time = timing.start("subset construction");
    let dfa = subset_construction(&nfa);
    time.finish();
    let dfa = dfa?;

    let minimal_dfa = minimize(&dfa, timing);

    info!(
        "Compiled into an NFA with {} states, a DFA with {} states and a minimal DFA with {} states",
        nfa.num_of_states(),
        dfa.num_of_states(),
        minimal_dfa.num_of_states()
    );

    Ok(CompiledExpression {
        formatted,
        postfix,
        nfa,
        dfa,
        minimal_dfa,
    })
}

/// Compiles the expression with the default options and reports whether each
/// of the automata accepts the input.
pub fn compile_and_match(expression: &str, input: &str) -> Result<MatchReport, CompileError> {
    compile_and_match_with(expression, input, &CompileOptions::default(), &mut Timing::new())
}

/// Same as [compile_and_match], but with explicit options and timing.
pub fn compile_and_match_with(
    expression: &str,
    input: &str,
    options: &CompileOptions,
    timing: &mut Timing,
) -> Result<MatchReport, CompileError> {
    let compiled = compile(expression, options, timing)?;

    let mut time = timing.start("simulation");
    let report = compiled.matches(input);
    time.finish();

    Ok(report?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_compile_keeps_every_stage() {
        let compiled = compile("a*b", &CompileOptions::default(), &mut Timing::new()).unwrap();

        assert_eq!(compiled.formatted.to_string(), "a*·b");
        assert_eq!(compiled.postfix.to_string(), "a*b·");
        assert_eq!(compiled.nfa.num_of_states(), 6);
        assert_eq!(compiled.minimal_dfa.num_of_states(), 2);
        assert_eq!(compiled.minimal_dfa.alphabet(), &['a', 'b']);
    }

    #[test]
    fn test_compile_records_timing() {
        let mut timing = Timing::new();
        compile_and_match_with("a|b", "a", &CompileOptions::default(), &mut timing).unwrap();

        let names: Vec<String> = timing.results().into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "format",
                "postfix",
                "thompson",
                "subset construction",
                "refinement",
                "quotient",
                "simulation"
            ]
        );
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(compile_and_match("", "a"), Err(CompileError::Regex(RegexError::Malformed(_)))));
        assert_eq!(
            compile_and_match("(a", "a"),
            Err(CompileError::Regex(RegexError::UnbalancedParenthesis { position: 0 }))
        );
    }

    #[test]
    fn test_compile_lenient_grouping() {
        let options = CompileOptions {
            grouping: GroupingMode::Lenient,
        };

        let report = compile_and_match_with("(a", "a", &options, &mut Timing::new()).unwrap();
        assert!(report.is_consistent());
        assert!(report.min_dfa_accept);
    }

    #[test]
    fn test_match_report_consistency() {
        let consistent = MatchReport {
            nfa_accept: true,
            dfa_accept: true,
            min_dfa_accept: true,
        };
        let inconsistent = MatchReport {
            min_dfa_accept: false,
            ..consistent
        };

        assert!(consistent.is_consistent());
        assert!(!inconsistent.is_consistent());
    }
}
