//! Codec-specific types: errors and configuration.

use cmip5_types::{Cmip5Field, PathLayout};
use thiserror::Error;

/// Errors that can occur while parsing or rendering CMIP5 names and paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Cmip5Error {
    /// File name does not match the CMIP5 file name grammar.
    #[error("Invalid CMIP5 file name '{value}': {reason}")]
    InvalidFileName {
        /// The offending file name.
        value: String,
        /// What did not match.
        reason: String,
    },

    /// Path does not match the directory grammar of its layout.
    #[error("Invalid {layout} path '{value}': {reason}")]
    InvalidPath {
        /// The layout the path was parsed as.
        layout: PathLayout,
        /// The offending path.
        value: String,
        /// What did not match.
        reason: String,
    },

    /// A keyword outside the closed set of fields and sources.
    #[error("Unrecognized field: {name}")]
    UnknownField {
        /// The unrecognized keyword.
        name: String,
    },

    /// More than one construction source was supplied.
    #[error("Conflicting construction arguments: '{first}' and '{second}' (supply exactly one source)")]
    ConflictingSources {
        /// Keyword of the first source.
        first: String,
        /// Keyword of the second source.
        second: String,
    },

    /// No construction source was supplied.
    #[error("No construction source: expected cmor_fp, datanode_fp, cmor_fname or field values")]
    NoSource,

    /// Textual representation could not be read back.
    #[error("Invalid representation '{value}': {reason}")]
    InvalidRepr {
        /// The offending text.
        value: String,
        /// What did not match.
        reason: String,
    },

    /// A render was attempted without a field it needs.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The first missing field.
        field: Cmip5Field,
    },
}

/// Broad classification of a [`Cmip5Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input, bad keyword, or a disallowed combination of sources.
    Grammar,
    /// A render needed a field that is not set.
    MissingField,
}

impl Cmip5Error {
    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } => ErrorKind::MissingField,
            _ => ErrorKind::Grammar,
        }
    }

    /// Returns true for grammar (path/name/argument) errors.
    pub fn is_grammar(&self) -> bool {
        self.kind() == ErrorKind::Grammar
    }

    /// Returns true for missing-field errors.
    pub fn is_missing_field(&self) -> bool {
        self.kind() == ErrorKind::MissingField
    }
}

/// Result type for CMIP5 operations.
pub type Cmip5Result<T> = Result<T, Cmip5Error>;

/// Configuration for CMIP5 parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Require the ensemble member to look like `r<N>i<M>p<L>`.
    pub validate_ensemble: bool,
    /// Require directory segments to agree with the file name, and datanode
    /// version directories to look like `v<digits>`.
    pub check_consistency: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            validate_ensemble: true,
            check_consistency: true,
        }
    }
}

impl ParseConfig {
    /// Creates a config that only enforces the token structure.
    pub fn lenient() -> Self {
        Self {
            validate_ensemble: false,
            check_consistency: false,
        }
    }
}
