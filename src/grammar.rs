//! Grammar predicates for individual URI components.
//!
//! Each predicate checks a whole string against the matching production
//! of [RFC 3986]. The byte tables behind them are built at compile time.
//!
//! The decomposer itself only consults [`is_valid_scheme`]; the others are
//! offered to callers who want to check components they have built by hand.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/

use crate::{component::Scheme, encoding::table};

/// Checks a string against `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
///
/// ```
/// use uri_parts::grammar::is_valid_scheme;
///
/// assert!(is_valid_scheme("test-scheme+more"));
/// assert!(!is_valid_scheme("-test-scheme"));
/// ```
#[inline]
#[must_use]
pub const fn is_valid_scheme(s: &str) -> bool {
    Scheme::new(s).is_some()
}

/// Checks a string against `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`.
///
/// ```
/// use uri_parts::grammar::is_valid_userinfo;
///
/// assert!(is_valid_userinfo("user:pass%20word"));
/// assert!(!is_valid_userinfo("user@host"));
/// ```
#[inline]
#[must_use]
pub const fn is_valid_userinfo(s: &str) -> bool {
    table::USERINFO.validate(s.as_bytes())
}

/// Checks a string against `query = *( pchar / "/" / "?" )`.
///
/// ```
/// use uri_parts::grammar::is_valid_query;
///
/// assert!(is_valid_query("a=1&b=/x?y"));
/// assert!(!is_valid_query("a=1#b"));
/// assert!(!is_valid_query("a=%G1"));
/// ```
#[inline]
#[must_use]
pub const fn is_valid_query(s: &str) -> bool {
    table::QUERY.validate(s.as_bytes())
}

/// Checks a string against `fragment = *( pchar / "/" / "?" )`.
///
/// Note that a `#` is not allowed in a fragment by the grammar, even though
/// the decomposer keeps any such characters in the fragment it extracts.
///
/// ```
/// use uri_parts::grammar::is_valid_fragment;
///
/// assert!(is_valid_fragment("Section-2.2"));
/// assert!(!is_valid_fragment("a#b"));
/// ```
#[inline]
#[must_use]
pub const fn is_valid_fragment(s: &str) -> bool {
    table::FRAGMENT.validate(s.as_bytes())
}
