//! Command parsing.

use thiserror::Error;

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET name value`
    Set {
        /// Variable name.
        name: String,
        /// New value.
        value: String,
    },
    /// `GET name`
    Get {
        /// Variable name.
        name: String,
    },
    /// `UNSET name`
    Unset {
        /// Variable name.
        name: String,
    },
    /// `NUMEQUALTO value`
    NumEqualTo {
        /// Value to count.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `ROLLBACK`
    Rollback,
    /// `COMMIT`
    Commit,
    /// `END`
    End,
}

/// Reasons a line is not a valid command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first token is not a known command.
    #[error("unrecognized command: {0}")]
    Unrecognized(String),

    /// A known command with the wrong number of arguments.
    #[error("{command} takes {expected} argument(s), got {actual}; usage: {usage}")]
    Arity {
        /// Canonical command keyword.
        command: &'static str,
        /// Usage line.
        usage: &'static str,
        /// Expected argument count.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a blank line. The keyword is matched
    /// case-insensitively; arguments are kept verbatim.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match keyword.to_ascii_uppercase().as_str() {
            "SET" => {
                let [name, value] = expect_args::<2>("SET", "SET name value", &args)?;
                Self::Set {
                    name: name.to_owned(),
                    value: value.to_owned(),
                }
            }
            "GET" => {
                let [name] = expect_args::<1>("GET", "GET name", &args)?;
                Self::Get {
                    name: name.to_owned(),
                }
            }
            "UNSET" => {
                let [name] = expect_args::<1>("UNSET", "UNSET name", &args)?;
                Self::Unset {
                    name: name.to_owned(),
                }
            }
            "NUMEQUALTO" => {
                let [value] = expect_args::<1>("NUMEQUALTO", "NUMEQUALTO value", &args)?;
                Self::NumEqualTo {
                    value: value.to_owned(),
                }
            }
            "BEGIN" => {
                expect_args::<0>("BEGIN", "BEGIN", &args)?;
                Self::Begin
            }
            "ROLLBACK" => {
                expect_args::<0>("ROLLBACK", "ROLLBACK", &args)?;
                Self::Rollback
            }
            "COMMIT" => {
                expect_args::<0>("COMMIT", "COMMIT", &args)?;
                Self::Commit
            }
            "END" => {
                expect_args::<0>("END", "END", &args)?;
                Self::End
            }
            _ => return Err(ParseError::Unrecognized(keyword.to_owned())),
        };
        Ok(Some(command))
    }

    /// Returns the canonical keyword.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Set { .. } => "SET",
            Self::Get { .. } => "GET",
            Self::Unset { .. } => "UNSET",
            Self::NumEqualTo { .. } => "NUMEQUALTO",
            Self::Begin => "BEGIN",
            Self::Rollback => "ROLLBACK",
            Self::Commit => "COMMIT",
            Self::End => "END",
        }
    }
}

fn expect_args<'a, const N: usize>(
    command: &'static str,
    usage: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    <[&str; N]>::try_from(args).map_err(|_| ParseError::Arity {
        command,
        usage,
        expected: N,
        actual: args.len(),
    })
}
