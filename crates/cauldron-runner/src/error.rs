//! Error types for the runner.
//!
//! [`ProtocolError`] covers malformed turn input, which is always fatal.
//! [`RunnerError`] wraps everything that can stop the turn loop.

use std::num::ParseIntError;

use cauldron_engine::EngineError;
use cauldron_types::IngredientError;

/// The turn input did not match the game protocol.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Reading from the input stream failed.
    #[error("failed to read turn input: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended in the middle of a turn.
    #[error("input ended while reading {expected}")]
    UnexpectedEof {
        /// What the reader was waiting for.
        expected: &'static str,
    },

    /// A line had the wrong number of fields.
    #[error("{what} line has {found} fields, expected {expected}: {line:?}")]
    FieldCount {
        /// Kind of line being parsed.
        what: &'static str,
        /// Required number of fields.
        expected: usize,
        /// Number of fields present.
        found: usize,
        /// The offending line.
        line: String,
    },

    /// A numeric field did not parse.
    #[error("invalid {field} {value:?}: {source}")]
    InvalidNumber {
        /// Name of the field.
        field: &'static str,
        /// Raw text of the field.
        value: String,
        /// The underlying parse error.
        source: ParseIntError,
    },

    /// A count or index field was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the field.
        field: &'static str,
        /// The parsed value.
        value: i32,
    },

    /// The record type column held an unknown token.
    #[error("unknown record type {0:?}")]
    UnknownRecord(String),

    /// An order requirement could not be built.
    #[error("invalid order: {0}")]
    InvalidOrder(#[from] IngredientError),
}

/// Errors that stop the runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// The turn input was malformed.
    #[error("protocol error on turn {turn}: {source}")]
    Protocol {
        /// One-based turn number.
        turn: u64,
        /// What went wrong.
        source: ProtocolError,
    },

    /// The engine rejected a snapshot.
    #[error("engine error on turn {turn}: {source}")]
    Engine {
        /// One-based turn number.
        turn: u64,
        /// What went wrong.
        source: EngineError,
    },

    /// Writing the command failed.
    #[error("failed to write command: {0}")]
    Output(#[from] std::io::Error),
}

