//!
//! Error types
//!
//! * `Error::Parse`: malformed line in an input file
//! * `Error::Validation`: well-formed input violating a matrix invariant
//! * `Error::Io`: file access failure
//!
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// `line` is 1-based
    #[error("parse error at line {line}: {reason} (`{content}`)")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("matrix is not square ({n_rows} rows, row {row} has {n_cols} columns)")]
    NotSquare {
        n_rows: usize,
        row: usize,
        n_cols: usize,
    },
    #[error("diagonal entry ({index}, {index}) is {value}, not zero")]
    NonZeroDiagonal { index: usize, value: f64 },
    #[error("entry ({i}, {j}) is NaN")]
    NotANumber { i: usize, j: usize },
    #[error("{what}: expected {expected} but found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("covariance matrix of the points is singular")]
    SingularCovariance,
    #[error("at least {required} points are required but {found} were given")]
    TooFewPoints { required: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    ///
    /// short-hand of `Error::Parse`
    ///
    pub fn parse<C: Into<String>, R: Into<String>>(line: usize, content: C, reason: R) -> Self {
        Error::Parse {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }
    ///
    /// Is this error a `Error::Validation`?
    ///
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
    ///
    /// Is this error a `Error::Parse`?
    ///
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}
