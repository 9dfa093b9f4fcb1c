use std::fmt;

use clap::Args;
use log::LevelFilter;

/// The global flags that determine how much is logged. When several are given
/// the quietest wins, and without flags the verbosity is [Verbosity::Verbose].
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct VerbosityFlag {
    #[arg(short, long, global = true, help = "Only print the results")]
    quiet: bool,

    #[arg(short, long, global = true, help = "Print the stages of the computation (default)")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Print the sizes of all intermediate automata")]
    debug: bool,

    #[arg(long, global = true, help = "Print every state and transition that is constructed")]
    trace: bool,
}

impl VerbosityFlag {
    /// Returns the log level filter corresponding to the given verbosity flags.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.verbosity().log_level_filter()
    }

    /// Returns the verbosity level corresponding to the given verbosity flags.
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.trace {
            Verbosity::Trace
        } else if self.debug {
            Verbosity::Debug
        } else {
            Verbosity::Verbose
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Verbose,
    Debug,
    Trace,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Quiet => write!(f, "quiet"),
            Verbosity::Verbose => write!(f, "verbose"),
            Verbosity::Debug => write!(f, "debug"),
            Verbosity::Trace => write!(f, "trace"),
        }
    }
}

impl Verbosity {
    /// Returns the log filter level corresponding to this verbosity.
    pub fn log_level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        verbosity: VerbosityFlag,
    }

    fn parse(args: &[&str]) -> Verbosity {
        TestCli::parse_from(std::iter::once("refa").chain(args.iter().copied()))
            .verbosity
            .verbosity()
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&[]), Verbosity::Verbose);
        assert_eq!(parse(&["--debug"]), Verbosity::Debug);
        assert_eq!(parse(&["--trace", "--debug"]), Verbosity::Trace);
        assert_eq!(parse(&["-q", "--trace"]), Verbosity::Quiet);
        assert_eq!(Verbosity::Quiet.log_level_filter(), LevelFilter::Off);
    }
}
