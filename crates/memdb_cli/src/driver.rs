//! Line-oriented statement driver shared by the shell and script runner.

use crate::config::ShellConfig;
use crate::error::{CliError, CliResult};
use memdb_core::{Outcome, Session, Statement};
use std::io::{BufRead, Write};
use tracing::debug;

/// Message written when END is executed.
pub const EXIT_MESSAGE: &str = "exiting database";

/// Why the driver loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// END was executed.
    Ended,
    /// The input ran out.
    EndOfInput,
}

/// Feeds lines of input to a session and writes results.
///
/// Results and statement errors go to `out`; the prompt, when configured,
/// goes to `prompt_out` so that piped output only holds results.
pub struct Driver<'a> {
    session: &'a mut Session,
    config: &'a ShellConfig,
    lines_read: usize,
}

impl<'a> Driver<'a> {
    /// Creates a driver over `session`.
    pub fn new(session: &'a mut Session, config: &'a ShellConfig) -> Self {
        Self {
            session,
            config,
            lines_read: 0,
        }
    }

    /// Returns how many lines have been read so far.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Runs until END, end of input, or (in fail-fast mode) the first
    /// failing statement.
    ///
    /// # Errors
    ///
    /// Returns I/O errors, and in fail-fast mode the first parse or engine
    /// error together with its line number.
    pub fn run<R, W, P>(&mut self, mut input: R, out: &mut W, prompt_out: &mut P) -> CliResult<Exit>
    where
        R: BufRead,
        W: Write,
        P: Write,
    {
        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.config.prompt {
                write!(prompt_out, "{prompt} ")?;
                prompt_out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!(lines = self.lines_read, "end of input");
                return Ok(Exit::EndOfInput);
            }
            self.lines_read += 1;

            if let Some(exit) = self.step(line.trim(), out)? {
                return Ok(exit);
            }
        }
    }

    /// Handles one trimmed line. Returns `Some` when the loop must stop.
    fn step<W: Write>(&mut self, text: &str, out: &mut W) -> CliResult<Option<Exit>> {
        if text.is_empty() || (self.config.comments && text.starts_with('#')) {
            return Ok(None);
        }
        if self.config.echo {
            writeln!(out, "{text}")?;
        }

        let line = self.lines_read;
        let stmt = match Statement::parse(text) {
            Ok(stmt) => stmt,
            Err(source) => {
                writeln!(out, "{source}")?;
                return self.fail(CliError::Parse { line, source });
            }
        };

        match self.session.execute(&stmt) {
            Ok(Outcome::Value(value)) => writeln!(out, "{value}")?,
            Ok(Outcome::Empty) => {}
            Ok(Outcome::Terminate) => {
                writeln!(out, "{EXIT_MESSAGE}")?;
                return Ok(Some(Exit::Ended));
            }
            Err(source) => {
                writeln!(out, "{source}")?;
                return self.fail(CliError::Core { line, source });
            }
        }
        Ok(None)
    }

    fn fail(&self, err: CliError) -> CliResult<Option<Exit>> {
        if self.config.fail_fast {
            Err(err)
        } else {
            debug!(error = %err, "statement failed");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(session: &mut Session, config: &ShellConfig, input: &str) -> (CliResult<Exit>, String, String) {
        let mut out = Vec::new();
        let mut prompt = Vec::new();
        let result = Driver::new(session, config).run(input.as_bytes(), &mut out, &mut prompt);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(prompt).unwrap(),
        )
    }

    #[test]
    fn prints_results_only_for_reads() {
        let mut session = Session::new();
        let config = ShellConfig::new().no_prompt();
        let (result, out, _) = drive(&mut session, &config, "SET a foo\nGET a\nCOUNT foo\n");
        assert_eq!(result.unwrap(), Exit::EndOfInput);
        assert_eq!(out, "foo\n1\n");
    }

    #[test]
    fn end_stops_the_loop() {
        let mut session = Session::new();
        let config = ShellConfig::new().no_prompt();
        let (result, out, _) = drive(&mut session, &config, "SET a foo\nEND\nGET a\n");
        assert_eq!(result.unwrap(), Exit::Ended);
        assert_eq!(out, "exiting database\n");
    }

    #[test]
    fn errors_are_printed_and_loop_continues() {
        let mut session = Session::new();
        let config = ShellConfig::new().no_prompt();
        let (result, out, _) = drive(&mut session, &config, "ROLLBACK\nGET\nSET a foo\nGET a\n");
        assert_eq!(result.unwrap(), Exit::EndOfInput);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "TRANSACTION NOT FOUND");
        assert!(lines[1].contains("does not have a name"));
        assert_eq!(lines[2], "foo");
    }

    #[test]
    fn fail_fast_reports_line() {
        let mut session = Session::new();
        let config = ShellConfig::script().fail_fast(true);
        let (result, _, _) = drive(&mut session, &config, "# setup\nSET a foo\nROLLBACK\nGET a\n");
        match result {
            Err(CliError::Core { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected core error, got {other:?}"),
        }
    }

    #[test]
    fn prompt_goes_to_prompt_writer() {
        let mut session = Session::new();
        let config = ShellConfig::new();
        let (_, out, prompt) = drive(&mut session, &config, "GET a\n");
        assert_eq!(out, "NULL\n");
        assert_eq!(prompt, ">> >> ");
    }

    #[test]
    fn comments_and_blank_lines_are_skipped_in_scripts() {
        let mut session = Session::new();
        let config = ShellConfig::script().echo(true);
        let (_, out, _) = drive(&mut session, &config, "# comment\n\nGET a\n");
        assert_eq!(out, "GET a\nNULL\n");
    }

    #[test]
    fn hash_is_a_statement_error_without_comments() {
        let mut session = Session::new();
        let config = ShellConfig::new().no_prompt();
        let (_, out, _) = drive(&mut session, &config, "# not a comment\n");
        assert!(out.starts_with("database does not support operation #"));
    }

    #[test]
    fn nested_transactions_through_the_loop() {
        let mut session = Session::new();
        let config = ShellConfig::new().no_prompt();
        let input = "BEGIN\nSET a foo\nBEGIN\nSET a bar\nCOMMIT\nGET a\nROLLBACK\n";
        let (_, out, _) = drive(&mut session, &config, input);
        assert_eq!(out, "bar\nTRANSACTION NOT FOUND\n");
        assert_eq!(session.depth(), 0);
    }
}
