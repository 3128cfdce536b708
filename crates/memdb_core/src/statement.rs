//! Statement parsing.
//!
//! One line of input holds one statement: an upper-case operation keyword
//! followed by its operands, separated by whitespace.
//!
//! | Statement            | Operands                |
//! |----------------------|-------------------------|
//! | `SET <name> <value>` | name and value          |
//! | `GET <name>`         | name                    |
//! | `DELETE <name>`      | name                    |
//! | `COUNT <value>`      | value                   |
//! | `BEGIN`, `COMMIT`, `ROLLBACK`, `END` | none    |
//!
//! Keywords and names are case-sensitive. Tokens past the ones a statement
//! needs are ignored.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The operations understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Assign a value to a name.
    Set,
    /// Read a name.
    Get,
    /// Remove a name.
    Delete,
    /// Count the names holding a value.
    Count,
    /// Open a (nested) transaction.
    Begin,
    /// Persist every open transaction.
    Commit,
    /// Discard the innermost transaction.
    Rollback,
    /// Request termination.
    End,
}

impl Operation {
    /// All operations, in the order they are listed to users.
    pub const ALL: [Operation; 8] = [
        Operation::Begin,
        Operation::Commit,
        Operation::Delete,
        Operation::Get,
        Operation::End,
        Operation::Rollback,
        Operation::Set,
        Operation::Count,
    ];

    /// Returns the keyword for this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Set => "SET",
            Operation::Get => "GET",
            Operation::Delete => "DELETE",
            Operation::Count => "COUNT",
            Operation::Begin => "BEGIN",
            Operation::Commit => "COMMIT",
            Operation::Rollback => "ROLLBACK",
            Operation::End => "END",
        }
    }

    /// Returns true if the operation changes the session.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        !matches!(self, Operation::Get | Operation::Count | Operation::End)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ParseError::UnsupportedOperation {
                operation: s.to_string(),
            })
    }
}

/// Space-separated keyword list used in error messages.
fn supported_operations() -> String {
    Operation::ALL.map(Operation::as_str).join(" ")
}

/// Errors produced while parsing a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input holds no operation.
    #[error(
        "database operation is not specified: statement must start with one of the following: {}",
        supported_operations()
    )]
    Empty,

    /// The first token is not a known operation.
    #[error(
        "database does not support operation {operation}: supported operations: {}",
        supported_operations()
    )]
    UnsupportedOperation {
        /// The unrecognized keyword.
        operation: String,
    },

    /// GET or DELETE without a name.
    #[error("failed to execute operation {operation}: statement {statement:?} does not have a name")]
    MissingName {
        /// The operation missing its operand.
        operation: Operation,
        /// The statement as given.
        statement: String,
    },

    /// COUNT without a value.
    #[error("failed to execute operation {operation}: statement {statement:?} does not have a value")]
    MissingValue {
        /// The operation missing its operand.
        operation: Operation,
        /// The statement as given.
        statement: String,
    },

    /// SET without both a name and a value.
    #[error(
        "failed to execute operation {operation}: statement {statement:?} does not have a name or value"
    )]
    MissingNameOrValue {
        /// The operation missing its operands.
        operation: Operation,
        /// The statement as given.
        statement: String,
    },
}

/// A validated statement, ready for [`Session::execute`](crate::Session::execute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `SET <name> <value>`
    Set {
        /// Target name.
        name: String,
        /// New value.
        value: String,
    },
    /// `GET <name>`
    Get {
        /// Name to read.
        name: String,
    },
    /// `DELETE <name>`
    Delete {
        /// Name to remove.
        name: String,
    },
    /// `COUNT <value>`
    Count {
        /// Value to count.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `END`
    End,
}

impl Statement {
    /// Parses one line of input.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the line is blank, names an unknown
    /// operation, or lacks an operand the operation requires.
    ///
    /// # Example
    ///
    /// ```rust
    /// use memdb_core::Statement;
    ///
    /// let stmt = Statement::parse("SET a foo").unwrap();
    /// assert_eq!(stmt, Statement::Set { name: "a".into(), value: "foo".into() });
    /// assert!(Statement::parse("SET a").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut tokens = input.split_whitespace();
        let operation: Operation = tokens.next().ok_or(ParseError::Empty)?.parse()?;
        let mut operand = || tokens.next().map(str::to_string);

        let stmt = match operation {
            Operation::Set => match (operand(), operand()) {
                (Some(name), Some(value)) => Statement::Set { name, value },
                _ => {
                    return Err(ParseError::MissingNameOrValue {
                        operation,
                        statement: input.to_string(),
                    })
                }
            },
            Operation::Get | Operation::Delete => {
                let name = operand().ok_or_else(|| ParseError::MissingName {
                    operation,
                    statement: input.to_string(),
                })?;
                if operation == Operation::Get {
                    Statement::Get { name }
                } else {
                    Statement::Delete { name }
                }
            }
            Operation::Count => {
                let value = operand().ok_or_else(|| ParseError::MissingValue {
                    operation,
                    statement: input.to_string(),
                })?;
                Statement::Count { value }
            }
            Operation::Begin => Statement::Begin,
            Operation::Commit => Statement::Commit,
            Operation::Rollback => Statement::Rollback,
            Operation::End => Statement::End,
        };
        Ok(stmt)
    }

    /// Returns the statement's operation.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Statement::Set { .. } => Operation::Set,
            Statement::Get { .. } => Operation::Get,
            Statement::Delete { .. } => Operation::Delete,
            Statement::Count { .. } => Operation::Count,
            Statement::Begin => Operation::Begin,
            Statement::Commit => Operation::Commit,
            Statement::Rollback => Operation::Rollback,
            Statement::End => Operation::End,
        }
    }
}

impl FromStr for Statement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Statement::parse(s)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Set { name, value } => write!(f, "SET {name} {value}"),
            Statement::Get { name } => write!(f, "GET {name}"),
            Statement::Delete { name } => write!(f, "DELETE {name}"),
            Statement::Count { value } => write!(f, "COUNT {value}"),
            other => f.write_str(other.operation().as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_set() {
        let stmt = Statement::parse("SET a foo").unwrap();
        assert_eq!(
            stmt,
            Statement::Set {
                name: "a".to_string(),
                value: "foo".to_string()
            }
        );
        assert_eq!(stmt.operation(), Operation::Set);
    }

    #[test]
    fn parse_single_operand_statements() {
        assert_eq!(
            Statement::parse("GET a").unwrap(),
            Statement::Get {
                name: "a".to_string()
            }
        );
        assert_eq!(
            Statement::parse("DELETE a").unwrap(),
            Statement::Delete {
                name: "a".to_string()
            }
        );
        assert_eq!(
            Statement::parse("COUNT foo").unwrap(),
            Statement::Count {
                value: "foo".to_string()
            }
        );
    }

    #[test]
    fn parse_bare_keywords() {
        assert_eq!(Statement::parse("BEGIN").unwrap(), Statement::Begin);
        assert_eq!(Statement::parse("COMMIT").unwrap(), Statement::Commit);
        assert_eq!(Statement::parse("ROLLBACK").unwrap(), Statement::Rollback);
        assert_eq!(Statement::parse("END").unwrap(), Statement::End);
    }

    #[test]
    fn extra_tokens_are_ignored() {
        assert_eq!(
            Statement::parse("GET a b c").unwrap(),
            Statement::Get {
                name: "a".to_string()
            }
        );
        assert_eq!(Statement::parse("BEGIN now").unwrap(), Statement::Begin);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            Statement::parse("  SET   a\tfoo  ").unwrap(),
            Statement::Set {
                name: "a".to_string(),
                value: "foo".to_string()
            }
        );
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(Statement::parse(""), Err(ParseError::Empty));
        assert_eq!(Statement::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert!(matches!(
            Statement::parse("get a"),
            Err(ParseError::UnsupportedOperation { operation }) if operation == "get"
        ));
    }

    #[test]
    fn missing_operands_fail() {
        assert!(matches!(
            Statement::parse("SET a"),
            Err(ParseError::MissingNameOrValue { operation: Operation::Set, .. })
        ));
        assert!(matches!(
            Statement::parse("SET"),
            Err(ParseError::MissingNameOrValue { .. })
        ));
        assert!(matches!(
            Statement::parse("GET"),
            Err(ParseError::MissingName { operation: Operation::Get, .. })
        ));
        assert!(matches!(
            Statement::parse("DELETE"),
            Err(ParseError::MissingName { operation: Operation::Delete, .. })
        ));
        assert!(matches!(
            Statement::parse("COUNT"),
            Err(ParseError::MissingValue { operation: Operation::Count, .. })
        ));
    }

    #[test]
    fn error_messages() {
        let err = Statement::parse("GET").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to execute operation GET: statement \"GET\" does not have a name"
        );

        let err = Statement::parse("FOO").unwrap_err();
        assert_eq!(
            err.to_string(),
            "database does not support operation FOO: supported operations: \
             BEGIN COMMIT DELETE GET END ROLLBACK SET COUNT"
        );
    }

    #[test]
    fn display_matches_input_form() {
        for line in ["SET a foo", "GET a", "DELETE a", "COUNT foo", "BEGIN", "END"] {
            assert_eq!(Statement::parse(line).unwrap().to_string(), line);
        }
    }

    #[test]
    fn mutating_operations() {
        assert!(Operation::Set.is_mutating());
        assert!(Operation::Rollback.is_mutating());
        assert!(!Operation::Get.is_mutating());
        assert!(!Operation::End.is_mutating());
    }
}
