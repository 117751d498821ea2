//! Completions command implementation.
//!
//! Completion scripts are rendered in full before anything reaches stdout,
//! so a closed pipe is reported instead of leaving a truncated script.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use super::Cli;
use crate::error::{IconsheetError, Result};

/// Print a shell completion script
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let script = render(args.shell);

    io::stdout()
        .lock()
        .write_all(&script)
        .map_err(|e| IconsheetError::Io {
            path: PathBuf::from("<stdout>"),
            message: e.to_string(),
        })
}

fn render(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    let mut script = Vec::new();
    clap_complete::generate(shell, &mut cmd, bin, &mut script);
    script
}
