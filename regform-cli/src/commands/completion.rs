//! `completion` command: shell completion scripts for `regform`.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{Shell, generate};

/// Name the completions are registered under.
const BIN_NAME: &str = "regform";

/// Write the completion script for `shell` to `out`.
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    let mut command = crate::Cli::command();
    generate(shell, &mut command, BIN_NAME, out);
}

/// Print the completion script for `shell` to stdout.
pub fn print_completion(shell: Shell) {
    write_completion(shell, &mut io::stdout().lock());
}
