use core::fmt;

/// Result alias for `sil`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the silhouette-optimising engines.
///
/// All variants are precondition failures raised before any iteration
/// begins; no engine returns partial results.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Condensed distance vector has the wrong length for its size.
    InvalidDistance {
        /// Expected number of entries, n(n-1)/2.
        expected: usize,
        /// Found number of entries.
        found: usize,
    },

    /// Label vector length does not match the distance matrix.
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items it must fit within.
        n_items: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::InvalidDistance { expected, found } => {
                write!(
                    f,
                    "invalid condensed distance store: expected {expected} entries, found {found}"
                )
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for Error {}
