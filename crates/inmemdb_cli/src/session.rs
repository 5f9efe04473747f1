//! Interactive session: reads commands, drives the store, writes results.

use crate::command::Command;
use crate::error::{CliError, CliResult};
use inmemdb_core::TransactionalStore;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Output written when `ROLLBACK` or `COMMIT` finds no open block.
pub const NO_TRANSACTION: &str = "NO TRANSACTION";

/// Output written by `GET` for an unset variable.
pub const NULL: &str = "NULL";

/// Diagnostic written when input ends without an `END` command.
pub const EARLY_EOF: &str = "End-of-file reached before 'END' command.";

/// Diagnostic written for a line that does not decode as UTF-8.
pub const INVALID_UTF8: &str = "line is not valid UTF-8";

/// Whether the session should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// `END` was executed.
    End,
}

/// Totals for one [`Session::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read, including blank and malformed ones.
    pub lines: u64,
    /// Commands executed against the store (excluding `END`).
    pub commands: u64,
    /// Diagnostics written to the error stream.
    pub diagnostics: u64,
    /// True if the session stopped at `END` rather than end of input.
    pub ended: bool,
}

/// A command session over one store.
///
/// Results go to `out`; diagnostics go to `diag`. Output is flushed after
/// every line that produces any, so an interactive user sees results
/// immediately.
pub struct Session<W: Write, E: Write> {
    store: TransactionalStore,
    out: W,
    diag: E,
    summary: RunSummary,
}

impl<W: Write, E: Write> Session<W, E> {
    /// Creates a session.
    pub fn new(store: TransactionalStore, out: W, diag: E) -> Self {
        Self {
            store,
            out,
            diag,
            summary: RunSummary::default(),
        }
    }

    /// Reads and executes lines until `END` or end of input.
    ///
    /// # Errors
    ///
    /// Only I/O failures are returned. Malformed commands and rejected
    /// arguments are reported on the diagnostic stream.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> CliResult<RunSummary> {
        info!("session started");
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let raw = strip_line_ending(&buf);
            let flow = match std::str::from_utf8(raw) {
                Ok(line) => self.execute_line(line)?,
                Err(_) => {
                    self.summary.lines += 1;
                    self.diagnostic(INVALID_UTF8)?;
                    Flow::Continue
                }
            };
            if flow == Flow::End {
                self.summary.ended = true;
                break;
            }
        }

        if !self.summary.ended {
            self.diagnostic(EARLY_EOF)?;
        }
        info!(
            lines = self.summary.lines,
            commands = self.summary.commands,
            diagnostics = self.summary.diagnostics,
            "session finished"
        );
        Ok(self.summary.clone())
    }

    /// Parses and executes one line.
    pub fn execute_line(&mut self, line: &str) -> CliResult<Flow> {
        self.summary.lines += 1;
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                self.diagnostic(err)?;
                return Ok(Flow::Continue);
            }
        };

        match self.execute(&command) {
            Err(CliError::Core(err)) => {
                self.diagnostic(err)?;
                Ok(Flow::Continue)
            }
            other => other,
        }
    }

    /// Executes one parsed command.
    pub fn execute(&mut self, command: &Command) -> CliResult<Flow> {
        debug!(command = command.keyword(), depth = %self.store.depth(), "executing");
        match command {
            Command::Set { name, value } => self.store.set(name, value)?,
            Command::Get { name } => {
                let value = self.store.get(name)?.unwrap_or(NULL);
                writeln!(self.out, "{value}")?;
                self.out.flush()?;
            }
            Command::Unset { name } => self.store.unset(name)?,
            Command::NumEqualTo { value } => {
                let count = self.store.count_equal_to(value);
                self.respond(count)?;
            }
            Command::Begin => self.store.begin(),
            Command::Rollback => {
                if !self.store.rollback() {
                    self.respond(NO_TRANSACTION)?;
                }
            }
            Command::Commit => {
                if !self.store.commit_all() {
                    self.respond(NO_TRANSACTION)?;
                }
            }
            Command::End => return Ok(Flow::End),
        }
        self.summary.commands += 1;
        Ok(Flow::Continue)
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &TransactionalStore {
        &self.store
    }

    /// Consumes the session, returning the store and both writers.
    pub fn into_parts(self) -> (TransactionalStore, W, E) {
        (self.store, self.out, self.diag)
    }

    fn respond(&mut self, line: impl Display) -> CliResult<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    fn diagnostic(&mut self, message: impl Display) -> CliResult<()> {
        self.summary.diagnostics += 1;
        writeln!(self.diag, "{message}")?;
        self.diag.flush()?;
        Ok(())
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Opens a command script for [`Session::run`].
pub fn open_input(path: &Path) -> CliResult<BufReader<File>> {
    debug!(?path, "opening command script");
    Ok(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inmemdb_core::{Config, StatsSnapshot};

    fn session() -> Session<Vec<u8>, Vec<u8>> {
        Session::new(TransactionalStore::new(), Vec::new(), Vec::new())
    }

    fn output(session: Session<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (_, out, diag) = session.into_parts();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn get_prints_value_or_null() {
        let mut s = session();
        s.execute_line("GET a").unwrap();
        s.execute_line("SET a 10").unwrap();
        s.execute_line("GET a").unwrap();

        let (out, diag) = output(s);
        assert_eq!(out, "NULL\n10\n");
        assert!(diag.is_empty());
    }

    #[test]
    fn numequalto_prints_count() {
        let mut s = session();
        s.execute_line("SET a 10").unwrap();
        s.execute_line("SET b 10").unwrap();
        s.execute_line("NUMEQUALTO 10").unwrap();
        s.execute_line("NUMEQUALTO 20").unwrap();

        let (out, _) = output(s);
        assert_eq!(out, "2\n0\n");
    }

    #[test]
    fn numequalto_does_not_open_a_block() {
        let mut s = session();
        s.execute_line("NUMEQUALTO 10").unwrap();
        assert!(!s.store().in_transaction());
    }

    #[test]
    fn no_transaction_messages() {
        let mut s = session();
        s.execute_line("ROLLBACK").unwrap();
        s.execute_line("COMMIT").unwrap();

        let (out, _) = output(s);
        assert_eq!(out, "NO TRANSACTION\nNO TRANSACTION\n");
    }

    #[test]
    fn malformed_lines_leave_state_alone() {
        let mut s = session();
        assert_eq!(s.execute_line("SET a").unwrap(), Flow::Continue);
        assert_eq!(s.execute_line("FROB").unwrap(), Flow::Continue);
        assert_eq!(s.execute_line("BEGIN now").unwrap(), Flow::Continue);
        assert!(s.store().is_empty());
        assert!(!s.store().in_transaction());

        let (out, diag) = output(s);
        assert!(out.is_empty());
        assert_eq!(diag.lines().count(), 3);
        assert!(diag.contains("unrecognized command: FROB"));
    }

    #[test]
    fn rejected_argument_is_a_diagnostic() {
        let store = TransactionalStore::with_config(Config::new().max_value_len(2));
        let mut s = Session::new(store, Vec::new(), Vec::new());
        assert_eq!(s.execute_line("SET a 12345").unwrap(), Flow::Continue);
        assert_eq!(s.store().len(), 0);

        let (_, diag) = output(s);
        assert!(diag.starts_with("invalid argument"));
    }

    #[test]
    fn end_stops_without_touching_store() {
        let mut s = session();
        assert_eq!(s.execute_line("end").unwrap(), Flow::End);
        assert_eq!(s.store().stats().snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn run_reports_early_eof() {
        let mut s = session();
        let summary = s.run("SET a 1\n\nGET a\n".as_bytes()).unwrap();

        assert_eq!(summary.lines, 3);
        assert_eq!(summary.commands, 2);
        assert_eq!(summary.diagnostics, 1);
        assert!(!summary.ended);

        let (out, diag) = output(s);
        assert_eq!(out, "1\n");
        assert_eq!(diag, format!("{EARLY_EOF}\n"));
    }

    #[test]
    fn invalid_utf8_line_is_a_diagnostic() {
        let mut s = session();
        let summary = s.run(&b"SET a 1\nSET b \xff\nGET a\nEND\n"[..]).unwrap();
        assert!(summary.ended);
        assert_eq!(summary.lines, 4);
        assert_eq!(summary.diagnostics, 1);
        assert_eq!(s.store().get("b").unwrap(), None);
        let (out, diag) = output(s);
        assert_eq!(out, "1\n");
        assert_eq!(diag.trim_end(), INVALID_UTF8);
    }

    #[test]
    fn strips_lf_and_crlf_only() {
        assert_eq!(strip_line_ending(b"GET a\r\n"), b"GET a");
        assert_eq!(strip_line_ending(b"GET a\n"), b"GET a");
        assert_eq!(strip_line_ending(b"GET a"), b"GET a");
        assert_eq!(strip_line_ending(b"GET a\r"), b"GET a");
    }

    #[test]
    fn run_stops_at_end() {
        let mut s = session();
        let summary = s.run("SET a 1\nEND\nGET a\n".as_bytes()).unwrap();

        assert!(summary.ended);
        assert_eq!(summary.lines, 2);
        let (out, diag) = output(s);
        assert!(out.is_empty());
        assert!(diag.is_empty());
    }
}
