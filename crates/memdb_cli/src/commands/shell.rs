//! Interactive shell command.

use crate::config::ShellConfig;
use crate::driver::{Driver, Exit};
use crate::error::CliResult;
use crate::report::StatsReport;
use memdb_core::Session;
use std::io;
use tracing::debug;

/// Runs the interactive shell on stdin/stdout until END or end of input.
///
/// The prompt is written to stderr.
pub fn run(config: &ShellConfig) -> CliResult<Exit> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    debug!(prompt = ?config.prompt, "starting shell");
    let mut driver = Driver::new(&mut session, config);
    let exit = driver.run(stdin.lock(), &mut stdout, &mut stderr)?;
    let lines_read = driver.lines_read();

    if exit == Exit::EndOfInput && config.prompt.is_some() {
        // Leave the terminal on a fresh line after the last prompt.
        eprintln!();
    }
    if config.show_stats {
        StatsReport::new(&session, lines_read).write_to(&mut stdout, config.stats_format)?;
    }
    Ok(exit)
}
