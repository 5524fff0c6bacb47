use clap::Parser;

use std::path::PathBuf;

/// Defines and parses the command-line arguments accepted by the generator.
///
/// The invocation surface is deliberately minimal: one or more input file
/// paths, no flags. The generated table always goes to standard output so
/// the build system can redirect it wherever the consuming runtime expects.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The preprocessed input files containing QCFG and Q directives,
    /// scanned in the order given.
    #[clap(required = true)]
    pub inputs: Vec<PathBuf>,
}

impl Args {
    /// Parses command-line arguments from the execution environment.
    ///
    /// On invalid arguments this does not return: `clap` prints its usual
    /// error message or help screen and exits the process.
    pub fn from_cli() -> Self {
        Self::parse()
    }
}
