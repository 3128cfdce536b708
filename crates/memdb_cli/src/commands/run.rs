//! Script runner command.

use crate::config::ShellConfig;
use crate::driver::{Driver, Exit};
use crate::error::{CliError, CliResult};
use crate::report::StatsReport;
use memdb_core::Session;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use tracing::info;

/// Runs the statements in the script at `path`, writing results to `out`.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn run<W: Write>(path: &Path, config: &ShellConfig, out: &mut W) -> CliResult<Exit> {
    let file = File::open(path).map_err(|source| CliError::Script {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Running script {:?}", path);

    let mut session = Session::new();
    let mut driver = Driver::new(&mut session, config);
    let exit = driver.run(BufReader::new(file), out, &mut io::sink())?;
    let lines_read = driver.lines_read();

    if session.in_transaction() {
        info!(
            depth = session.depth(),
            "script finished with open transactions; discarding them"
        );
    }
    if config.show_stats {
        StatsReport::new(&session, lines_read).write_to(out, config.stats_format)?;
    }
    Ok(exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn script(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn run_script(contents: &str, config: &ShellConfig) -> (CliResult<Exit>, String) {
        let file = script(contents);
        let mut out = Vec::new();
        let result = run(file.path(), config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn runs_scenario_b() {
        let contents = "\
# nested rollback
BEGIN
SET a foo
GET a
BEGIN
SET a bar
GET a
SET a baz
ROLLBACK
GET a
ROLLBACK
GET a
";
        let (result, out) = run_script(contents, &ShellConfig::script());
        assert_eq!(result.unwrap(), Exit::EndOfInput);
        assert_eq!(out, "foo\nbar\nfoo\nNULL\n");
    }

    #[test]
    fn end_stops_script() {
        let (result, out) = run_script("SET a foo\nEND\nGET a\n", &ShellConfig::script());
        assert_eq!(result.unwrap(), Exit::Ended);
        assert_eq!(out, "exiting database\n");
    }

    #[test]
    fn fail_fast_stops_at_first_error() {
        let config = ShellConfig::script().fail_fast(true);
        let (result, out) = run_script("GET a\nFOO\nGET a\n", &config);
        assert!(matches!(result, Err(CliError::Parse { line: 2, .. })));
        assert!(out.starts_with("NULL\n"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn missing_script_is_an_error() {
        let mut out = Vec::new();
        let result = run(
            Path::new("/nonexistent/memdb/script.txt"),
            &ShellConfig::script(),
            &mut out,
        );
        assert!(matches!(result, Err(CliError::Script { .. })));
    }

    #[test]
    fn stats_are_appended() {
        let config = ShellConfig::script().show_stats(true);
        let (_, out) = run_script("SET a foo\nBEGIN\n", &config);
        assert!(out.contains("Session statistics"));
        assert!(out.contains("Open transactions: 1"));
    }
}
