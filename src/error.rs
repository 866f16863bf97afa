//! Error types.

use alloc::string::String;
use core::fmt;

/// Detailed cause of a [`QueryError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// A query segment has no `=` between its key and value.
    ///
    /// The error detail is the offending segment, undecoded.
    MalformedPair,
    /// No value is present for the requested key.
    ///
    /// The error detail is the key.
    KeyNotFound,
    /// The separator cannot be used to split a query.
    ///
    /// The error detail is the rejected separator.
    InvalidSeparator,
    /// A configuration value is out of range.
    ///
    /// The error detail names the rejected value.
    InvalidConfiguration,
}

/// An error occurred when parsing or querying a [`QueryMap`].
///
/// [`QueryMap`]: crate::QueryMap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryError {
    pub(crate) kind: QueryErrorKind,
    pub(crate) detail: String,
}

impl QueryError {
    pub(crate) fn new(kind: QueryErrorKind, detail: impl Into<String>) -> QueryError {
        QueryError {
            kind,
            detail: detail.into(),
        }
    }

    /// Returns the detailed cause of the error.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> QueryErrorKind {
        self.kind
    }

    /// Returns the offending input: a segment, key, separator or setting,
    /// depending on the [kind](Self::kind).
    #[inline]
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            QueryErrorKind::MalformedPair => "malformed query pair: ",
            QueryErrorKind::KeyNotFound => "key not found: ",
            QueryErrorKind::InvalidSeparator => "invalid query separator: ",
            QueryErrorKind::InvalidConfiguration => "invalid query configuration: ",
        };
        write!(f, "{}{:?}", msg, self.detail)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QueryError {}

/// Returns immediately with a query error.
macro_rules! err {
    ($kind:ident, $detail:expr) => {
        return Err(crate::error::QueryError::new(
            crate::error::QueryErrorKind::$kind,
            $detail,
        ))
    };
}

pub(crate) use err;
