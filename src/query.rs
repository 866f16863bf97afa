//! Ordered multi-valued query maps.

use crate::{
    encoding::{
        self,
        table::{self, Table},
    },
    error::{err, QueryError},
    log,
};
use alloc::{
    borrow::ToOwned,
    collections::{BTreeMap, BTreeSet},
    string::{String, ToString},
    vec::Vec,
};
use core::{slice, str::FromStr};

/// Settings for parsing and serializing a [`QueryMap`].
///
/// The default splits pairs on `&`, treats `+` as a literal plus,
/// and leaves the unreserved characters together with
/// [`QUERY_SAFE_CHARS`](table::QUERY_SAFE_CHARS) unescaped.
///
/// # Examples
///
/// ```
/// use uri_parts::{QueryConfig, QueryMap};
///
/// let config = QueryConfig::new().with_separator(";")?.with_plus_as_space(true);
/// let query = QueryMap::parse_with("q=nova+scotia;lang=en", &config)?;
/// assert_eq!(query.get("q")?, "nova scotia");
/// assert_eq!(query.to_string(), "q=nova+scotia;lang=en");
/// # Ok::<_, uri_parts::QueryError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryConfig {
    separator: String,
    plus_is_space: bool,
    safe: Table,
    // `safe`, plus a literal `+` unless it stands for a space.
    encode_table: Table,
}

const PLUS: &Table = &Table::gen(b"+");

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            separator: "&".to_owned(),
            plus_is_space: false,
            safe: *table::QUERY_SAFE,
            encode_table: table::QUERY_SAFE.or(PLUS),
        }
    }
}

impl QueryConfig {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> QueryConfig {
        QueryConfig::default()
    }

    /// Sets the string that separates key-value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSeparator`] if the separator is empty.
    ///
    /// [`InvalidSeparator`]: crate::QueryErrorKind::InvalidSeparator
    pub fn with_separator(mut self, separator: &str) -> Result<QueryConfig, QueryError> {
        if separator.is_empty() {
            err!(InvalidSeparator, separator);
        }
        self.separator = separator.to_owned();
        Ok(self)
    }

    /// Sets whether `+` stands for a space, as in HTML form data.
    ///
    /// When set, `+` decodes to a space, a space encodes to `+`
    /// and a literal plus encodes to `%2B`.
    #[must_use]
    pub fn with_plus_as_space(mut self, plus_is_space: bool) -> QueryConfig {
        self.plus_is_space = plus_is_space;
        self.rebuild();
        self
    }

    /// Sets the characters besides the unreserved ones
    /// that are left unescaped on serialization.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration`] if any of the characters is not ASCII
    /// or is `%`.
    ///
    /// [`InvalidConfiguration`]: crate::QueryErrorKind::InvalidConfiguration
    pub fn with_safe_chars(mut self, chars: &str) -> Result<QueryConfig, QueryError> {
        match Table::try_gen(chars) {
            Some(extra) => self.safe = table::UNRESERVED.or(&extra),
            None => err!(InvalidConfiguration, alloc::format!("safe chars {:?}", chars)),
        }
        self.rebuild();
        Ok(self)
    }

    fn rebuild(&mut self) {
        self.encode_table = if self.plus_is_space {
            self.safe.sub(PLUS)
        } else {
            self.safe.or(PLUS)
        };
    }

    /// Returns the pair separator.
    #[inline]
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns whether `+` stands for a space.
    #[inline]
    #[must_use]
    pub fn plus_is_space(&self) -> bool {
        self.plus_is_space
    }

    fn decode<'a>(&self, s: &'a str) -> alloc::borrow::Cow<'a, str> {
        encoding::decode(s, self.plus_is_space)
    }

    fn encode_to(&self, s: &str, buf: &mut String) {
        encoding::encode_to(s, &self.encode_table, self.plus_is_space, buf);
    }
}

/// An ordered sequence of decoded key-value pairs where a key may repeat.
///
/// Pairs are kept in the order they were parsed or set. Lookups by key
/// come in two flavors that deliberately disagree:
///
/// - [`get`](Self::get) returns the **last** value of a key.
/// - [`to_flat_map`](Self::to_flat_map) keeps the **first** value of each key.
///
/// [`set`](Self::set) always appends, so assigning to an existing key
/// grows its list of values instead of replacing it.
///
/// # Examples
///
/// ```
/// use uri_parts::QueryMap;
///
/// let mut query = QueryMap::parse("a=1&a=2&a=3&b=x")?;
/// assert_eq!(query.get("a")?, "3");
/// assert_eq!(query.get_all("a"), ["1", "2", "3"]);
/// assert_eq!(query.to_flat_map()["a"], "1");
///
/// query.set("b", "y");
/// assert_eq!(query.get_all("b"), ["x", "y"]);
///
/// query.delete("a");
/// assert_eq!(query.keys(), ["b"]);
/// assert_eq!(query.to_string(), "b=x&b=y");
/// # Ok::<_, uri_parts::QueryError>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    pairs: Vec<(String, String)>,
    config: QueryConfig,
}

impl QueryMap {
    /// Creates an empty `QueryMap` with the default configuration.
    #[must_use]
    pub fn new() -> QueryMap {
        QueryMap::default()
    }

    /// Creates an empty `QueryMap` with the given configuration.
    #[must_use]
    pub fn with_config(config: QueryConfig) -> QueryMap {
        QueryMap {
            pairs: Vec::new(),
            config,
        }
    }

    /// Parses a query string with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPair`] if a non-empty segment has no `=`.
    ///
    /// [`MalformedPair`]: crate::QueryErrorKind::MalformedPair
    pub fn parse(raw: &str) -> Result<QueryMap, QueryError> {
        QueryMap::parse_with(raw, &QueryConfig::default())
    }

    /// Parses a query string with the given configuration.
    ///
    /// The string is split on the configured separator and each non-empty
    /// segment is split on its first `=`. Keys and values are decoded.
    /// An empty string yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPair`] if a non-empty segment has no `=`.
    /// The whole parse fails; no segment is dropped silently.
    ///
    /// [`MalformedPair`]: crate::QueryErrorKind::MalformedPair
    pub fn parse_with(raw: &str, config: &QueryConfig) -> Result<QueryMap, QueryError> {
        let mut map = QueryMap::with_config(config.clone());
        if raw.is_empty() {
            return Ok(map);
        }

        for segment in raw.split(config.separator.as_str()) {
            if segment.is_empty() {
                continue;
            }
            let Some((key, value)) = segment.split_once('=') else {
                log::debug!("rejecting query segment without '=': {:?}", segment);
                err!(MalformedPair, segment);
            };
            map.pairs.push((
                config.decode(key).into_owned(),
                config.decode(value).into_owned(),
            ));
        }
        Ok(map)
    }

    /// Returns the configuration used for serialization.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Returns the number of key-value pairs, counting repeated keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no key-value pairs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns `true` if at least one pair has the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Returns the last value set for the key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if no pair has the key.
    ///
    /// [`KeyNotFound`]: crate::QueryErrorKind::KeyNotFound
    pub fn get(&self, key: &str) -> Result<&str, QueryError> {
        match self.last_value(key) {
            Some(value) => Ok(value),
            None => err!(KeyNotFound, key),
        }
    }

    /// Returns the last value set for the key, or `default` if there is none.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.last_value(key).unwrap_or(default)
    }

    /// Returns all values of the key in the order they were set.
    ///
    /// The result is empty if no pair has the key.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns all values of the key in the order they were set.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if no pair has the key.
    ///
    /// [`KeyNotFound`]: crate::QueryErrorKind::KeyNotFound
    pub fn try_get_all(&self, key: &str) -> Result<Vec<&str>, QueryError> {
        let values = self.get_all(key);
        if values.is_empty() {
            err!(KeyNotFound, key);
        }
        Ok(values)
    }

    fn last_value(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Appends a key-value pair.
    ///
    /// Existing pairs with the same key are kept.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Replaces all values of the key.
    ///
    /// The new pairs take the place of the first existing pair with the key,
    /// or are appended if there is none. An empty `values` removes the key.
    pub fn set_all<I, V>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let at = self
            .pairs
            .iter()
            .position(|(k, _)| k == key)
            .unwrap_or(self.pairs.len());
        self.delete(key);
        for (i, value) in values.into_iter().enumerate() {
            self.pairs.insert(at + i, (key.to_owned(), value.into()));
        }
    }

    /// Appends a key-value pair if no pair has the key,
    /// then returns the last value of the key.
    pub fn set_default(&mut self, key: &str, value: impl Into<String>) -> &str {
        if !self.contains_key(key) {
            self.set(key, value);
        }
        self.get_or(key, "")
    }

    /// Removes all pairs with the key, returning how many were removed.
    pub fn delete(&mut self, key: &str) -> usize {
        let len = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        len - self.pairs.len()
    }

    /// Removes pairs matching both the key and the value, scanning in order
    /// and stopping after `max` removals if given.
    ///
    /// Returns how many pairs were removed. The remaining pairs keep their
    /// relative order.
    ///
    /// ```
    /// use uri_parts::QueryMap;
    ///
    /// let mut query = QueryMap::parse("p=1&p=2&p=3&p=2")?;
    /// assert_eq!(query.delete_pair("p", "2", Some(1)), 1);
    /// assert_eq!(query.get_all("p"), ["1", "3", "2"]);
    /// # Ok::<_, uri_parts::QueryError>(())
    /// ```
    pub fn delete_pair(&mut self, key: &str, value: &str, max: Option<usize>) -> usize {
        let max = max.unwrap_or(usize::MAX);
        let mut removed = 0;
        self.pairs.retain(|(k, v)| {
            if removed < max && k == key && v == value {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Returns the distinct keys in the order of their first occurrence.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.pairs
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| seen.insert(*k))
            .collect()
    }

    /// Returns each distinct key with its last value.
    #[must_use]
    pub fn items(&self) -> Vec<(&str, &str)> {
        self.lists()
            .into_iter()
            .filter_map(|(k, values)| values.last().map(|v| (k, *v)))
            .collect()
    }

    /// Returns the last value of each distinct key, in the order of [`keys`](Self::keys).
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.items().into_iter().map(|(_, v)| v).collect()
    }

    /// Returns each distinct key with all of its values.
    #[must_use]
    pub fn lists(&self) -> Vec<(&str, Vec<&str>)> {
        // Index of each key in the output.
        let mut index = BTreeMap::new();
        let mut lists: Vec<(&str, Vec<&str>)> = Vec::new();
        for (k, v) in &self.pairs {
            let i = *index.entry(k.as_str()).or_insert_with(|| {
                lists.push((k.as_str(), Vec::new()));
                lists.len() - 1
            });
            lists[i].1.push(v.as_str());
        }
        lists
    }

    /// Returns a single-valued map keeping the **first** value of each key.
    ///
    /// The map is sorted by key, not by first occurrence.
    #[must_use]
    pub fn to_flat_map(&self) -> BTreeMap<&str, &str> {
        let mut map = BTreeMap::new();
        for (k, v) in &self.pairs {
            map.entry(k.as_str()).or_insert(v.as_str());
        }
        map
    }

    /// Returns an iterator over all key-value pairs in the order they were set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.pairs.iter(),
        }
    }

    /// Serializes the map with the configured separator.
    ///
    /// Keys and values are percent-encoded and joined with `=`. Keys appear
    /// in the order of their first occurrence, each followed by all of its
    /// values in order.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut buf = String::new();
        self.serialize_to(&self.config.separator, &mut buf);
        buf
    }

    /// Serializes the map with another separator.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSeparator`] if the separator is empty.
    ///
    /// [`InvalidSeparator`]: crate::QueryErrorKind::InvalidSeparator
    pub fn serialize_with_separator(&self, separator: &str) -> Result<String, QueryError> {
        if separator.is_empty() {
            err!(InvalidSeparator, separator);
        }
        let mut buf = String::new();
        self.serialize_to(separator, &mut buf);
        Ok(buf)
    }

    fn serialize_to(&self, separator: &str, buf: &mut String) {
        let mut first = true;
        for (key, values) in self.lists() {
            for value in values {
                if !first {
                    buf.push_str(separator);
                }
                first = false;
                self.config.encode_to(key, buf);
                buf.push('=');
                self.config.encode_to(value, buf);
            }
        }
    }
}

/// An iterator over the key-value pairs of a [`QueryMap`].
///
/// This struct is created by [`QueryMap::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a QueryMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryMap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> QueryMap {
        let mut map = QueryMap::new();
        map.extend(iter);
        map
    }
}

impl FromStr for QueryMap {
    type Err = QueryError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryMap::parse(s)
    }
}

impl From<QueryMap> for String {
    #[inline]
    fn from(map: QueryMap) -> String {
        map.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryErrorKind;

    #[test]
    fn empty_segments_are_skipped() {
        let q = QueryMap::parse("a=1&&b=2&").unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(q.to_string(), "a=1&b=2");
    }

    #[test]
    fn value_keeps_later_equals() {
        let q = QueryMap::parse("expr=a=b").unwrap();
        assert_eq!(q.get("expr").unwrap(), "a=b");
    }

    #[test]
    fn multi_char_separator() {
        let config = QueryConfig::new().with_separator("&amp;").unwrap();
        let q = QueryMap::parse_with("a=1&amp;b=2", &config).unwrap();
        assert_eq!(q.keys(), ["a", "b"]);
        assert_eq!(q.to_string(), "a=1&amp;b=2");
    }

    #[test]
    fn error_kinds() {
        let e = QueryMap::parse("a=1&b").unwrap_err();
        assert_eq!(e.kind(), QueryErrorKind::MalformedPair);
        assert_eq!(e.detail(), "b");

        let e = QueryConfig::new().with_separator("").unwrap_err();
        assert_eq!(e.kind(), QueryErrorKind::InvalidSeparator);

        let e = QueryConfig::new().with_safe_chars("%").unwrap_err();
        assert_eq!(e.kind(), QueryErrorKind::InvalidConfiguration);
    }

    #[test]
    fn many_distinct_keys() {
        let raw: String = (0..50_000)
            .map(|i| alloc::format!("k{}=v{}", i, i))
            .collect::<Vec<_>>()
            .join("&");
        let q = QueryMap::parse(&raw).unwrap();
        assert_eq!(q.keys().len(), 50_000);
        assert_eq!(q.serialize(), raw);
        assert_eq!(q.items()[49_999], ("k49999", "v49999"));
    }
}
