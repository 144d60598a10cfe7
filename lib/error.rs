//! Errors raised by tableau construction, reshaping, and row addressing.
//!
//! Every failure here is a contract violation by the caller; nothing is
//! transient and nothing is retried.

use thiserror::Error;

/// Everything that can go wrong when building or addressing a [`Tableau`].
///
/// [`Tableau`]: crate::tableau::Tableau
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TableauError {
    #[error("a tableau must act on at least one qubit")]
    NoQubits,

    #[error("{n} qubits are too many to address")]
    TooManyQubits { n: usize },

    #[error("initial state {state} does not fit in {n} qubit(s)")]
    InvalidInitialState { state: u64, n: usize },

    #[error("shape mismatch for `{field}`: expected {expected:?}, got {found:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("row index {row} out of bounds for a tableau with {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    #[error("qubit index {qubit} out of bounds for {n} qubit(s)")]
    QubitOutOfBounds { qubit: usize, n: usize },

    #[error("invalid Pauli symbol {0:?}")]
    InvalidPauli(char),
}

pub type TabResult<T> = Result<T, TableauError>;
