use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use log::info;
use log::warn;

use refa_grammar::GrammarValidator;
use refa_grammar::eliminate_epsilon;
use refa_grammar::read_grammar;
use refa_io::LargeFormatter;
use refa_io::open_source;
use refa_regex::CompileOptions;
use refa_regex::GroupingMode;
use refa_regex::compile;
use refa_regex::read_batch;
use refa_regex::run_batch;
use refa_tools::Version;
use refa_tools::VersionFlag;
use refa_tools::verbosity::VerbosityFlag;
use refa_utilities::RefaError;
use refa_utilities::Timing;

#[derive(clap::Parser, Debug)]
#[command(
    about = "A command line tool that compiles regular expressions into minimal finite automata",
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    version: VersionFlag,

    #[command(flatten)]
    verbosity: VerbosityFlag,

    #[command(subcommand)]
    commands: Option<Commands>,

    #[arg(long, global = true, help = "How unmatched parentheses are treated, strict by default")]
    grouping: Option<GroupingMode>,

    #[arg(long, global = true)]
    timings: bool,
}

/// Defines the subcommands for this tool.
#[derive(Debug, Subcommand)]
enum Commands {
    Match(MatchArgs),
    Info(InfoArgs),
    Batch(BatchArgs),
    Grammar(GrammarArgs),
}

#[derive(clap::Args, Debug)]
#[command(about = "Checks whether the NFA, DFA and minimal DFA of an expression accept the input")]
struct MatchArgs {
    expression: String,

    /// The input string, the empty string when omitted.
    #[arg(default_value = "")]
    input: String,
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints every intermediate result of compiling the expression")]
struct InfoArgs {
    expression: String,
}

#[derive(clap::Args, Debug)]
#[command(about = "Runs every 'expression,input' record of the given file")]
struct BatchArgs {
    filename: PathBuf,
}

#[derive(clap::Args, Debug)]
#[command(about = "Validates the productions of a grammar and removes its epsilon-productions")]
struct GrammarArgs {
    filename: PathBuf,
}

fn main() -> Result<ExitCode, RefaError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    if cli.version.into() {
        eprintln!("{}", Version);
        return Ok(ExitCode::SUCCESS);
    }

    let options = CompileOptions {
        grouping: cli.grouping.unwrap_or_default(),
    };
    let mut timing = Timing::new();

    let success = match &cli.commands {
        Some(Commands::Match(args)) => handle_match(args, &options, &mut timing)?,
        Some(Commands::Info(args)) => handle_info(args, &options, &mut timing)?,
        Some(Commands::Batch(args)) => handle_batch(args, &options, &mut timing)?,
        Some(Commands::Grammar(args)) => handle_grammar(args)?,
        None => true,
    };

    if cli.timings {
        timing.print();
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Prints the acceptance of the three automata, returns false when they disagree.
fn handle_match(args: &MatchArgs, options: &CompileOptions, timing: &mut Timing) -> Result<bool, RefaError> {
    let compiled = compile(&args.expression, options, timing)?;

    let mut time = timing.start("simulation");
    let report = compiled.matches(&args.input);
    time.finish();
    let report = report?;

    println!("NFA accepts: {}", report.nfa_accept);
    println!("DFA accepts: {}", report.dfa_accept);
    println!("Minimal DFA accepts: {}", report.min_dfa_accept);

    if !report.is_consistent() {
        warn!("The automata of {} disagree on '{}'", args.expression, args.input);
        return Ok(false);
    }

    Ok(true)
}

/// Prints the formatted and postfix expressions followed by the three automata.
fn handle_info(args: &InfoArgs, options: &CompileOptions, timing: &mut Timing) -> Result<bool, RefaError> {
    let compiled = compile(&args.expression, options, timing)?;

    println!("Formatted: {}", compiled.formatted);
    println!("Postfix: {}", compiled.postfix);
    println!();
    println!("NFA:\n{}", compiled.nfa);
    println!("DFA:\n{}", compiled.dfa);
    println!("Minimal DFA:\n{}", compiled.minimal_dfa);

    Ok(true)
}

/// Runs a batch file, returns false when any of its records failed.
fn handle_batch(args: &BatchArgs, options: &CompileOptions, timing: &mut Timing) -> Result<bool, RefaError> {
    let file = open_source(&args.filename)?;
    let entries = read_batch(file)?;
    info!("Read {} records", LargeFormatter(entries.len()));

    let summary = run_batch(&entries, options, timing);
    for result in &summary.results {
        println!("{result}");
    }

    println!();
    print!("{summary}");

    Ok(summary.num_of_failed() == 0)
}

/// Validates the grammar file, and when every line is a production prints the
/// grammar without epsilon-productions.
fn handle_grammar(args: &GrammarArgs) -> Result<bool, RefaError> {
    let validator = GrammarValidator::new()?;
    let errors = validator.validate(open_source(&args.filename)?)?;

    if !errors.is_empty() {
        for error in &errors {
            println!("{error}");
        }
        println!("Found {} invalid productions", errors.len());
        return Ok(false);
    }

    let grammar = read_grammar(open_source(&args.filename)?)?;
    info!(
        "Grammar has {} nonterminals and {} productions",
        grammar.nonterminals().len(),
        grammar.num_of_productions()
    );

    let result = eliminate_epsilon(&grammar);
    info!("Without epsilon-productions it has {} productions", result.num_of_productions());
    print!("{result}");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grouping() {
        let cli = Cli::parse_from(["refa", "match", "(a|b", "a", "--grouping", "lenient"]);

        assert_eq!(cli.grouping, Some(GroupingMode::Lenient));
        assert!(matches!(cli.commands, Some(Commands::Match(ref args)) if args.input == "a"));
    }
}
