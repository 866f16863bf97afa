//! Byte pattern tables from RFC 3986.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 2234].
//!
//! [RFC 2234]: https://datatracker.ietf.org/doc/html/rfc2234/

use alloc::string::String;

const fn gen_hex_table() -> [u8; 512] {
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut i = 0;
    let mut out = [0; 512];
    while i < 256 {
        out[i * 2] = HEX_DIGITS[i >> 4];
        out[i * 2 + 1] = HEX_DIGITS[i & 0b1111];
        i += 1;
    }
    out
}

const HEX_TABLE: &[u8; 512] = &gen_hex_table();

/// A table determining the byte patterns allowed in a string.
///
/// Tables double as encode sets: a byte the table allows is written
/// as-is by [`encode`], every other byte becomes a `%XX` triplet.
///
/// [`encode`]: super::encode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table {
    arr: [u8; 256],
    allows_enc: bool,
}

impl Table {
    /// Generates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or is `%`.
    pub const fn gen(mut bytes: &[u8]) -> Table {
        let mut arr = [0; 256];
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii() && *cur != b'%', "non-ASCII or %");
            arr[*cur as usize] = 1;
            bytes = rem;
        }
        Table {
            arr,
            allows_enc: false,
        }
    }

    /// Generates a table that only allows the given unencoded characters,
    /// returning `None` if any of them is not ASCII or is `%`.
    pub fn try_gen(chars: &str) -> Option<Table> {
        if chars.bytes().all(|x| x.is_ascii() && x != b'%') {
            Some(Table::gen(chars.as_bytes()))
        } else {
            None
        }
    }

    /// Marks this table as allowing percent-encoded octets.
    pub const fn enc(mut self) -> Table {
        self.allows_enc = true;
        self
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the byte patterns allowed
    /// either by `self` or by `other`.
    pub const fn or(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            self.arr[i] |= other.arr[i];
            i += 1;
        }
        self.allows_enc |= other.allows_enc;
        self
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the byte patterns allowed
    /// by `self` but not allowed by `other`.
    pub const fn sub(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            if other.arr[i] != 0 {
                self.arr[i] = 0;
            }
            i += 1;
        }
        if other.allows_enc {
            self.allows_enc = false;
        }
        self
    }

    /// Returns the specified table value.
    #[inline]
    pub(crate) const fn get(&self, x: u8) -> u8 {
        self.arr[x as usize]
    }

    /// Returns `true` if the given unencoded byte is allowed by the table.
    #[inline]
    pub const fn allows(&self, x: u8) -> bool {
        self.get(x) != 0
    }

    /// Returns `true` if percent-encoded octets are allowed by the table.
    #[inline]
    pub const fn allows_enc(&self) -> bool {
        self.allows_enc
    }

    /// Pushes a byte to the buffer, percent-encoding it if not allowed.
    #[inline]
    pub(crate) fn encode(&self, x: u8, buf: &mut String) {
        if self.allows(x) {
            buf.push(x as char);
        } else {
            buf.push('%');
            buf.push(HEX_TABLE[x as usize * 2] as char);
            buf.push(HEX_TABLE[x as usize * 2 + 1] as char);
        }
    }

    /// Validates the given byte sequence with the table.
    ///
    /// A `%` must start a complete percent-encoded octet and
    /// is only accepted when the table allows encoded octets.
    pub const fn validate(&self, s: &[u8]) -> bool {
        let mut i = 0;
        if !self.allows_enc() {
            while i < s.len() {
                if !self.allows(s[i]) {
                    return false;
                }
                i += 1;
            }
        } else {
            while i < s.len() {
                let x = s[i];
                if x == b'%' {
                    if i + 2 >= s.len() {
                        return false;
                    }
                    let (hi, lo) = (s[i + 1], s[i + 2]);

                    if HEXDIG.get(hi) & HEXDIG.get(lo) == 0 {
                        return false;
                    }
                    i += 3;
                } else {
                    if !self.allows(x) {
                        return false;
                    }
                    i += 1;
                }
            }
        }
        true
    }
}

const fn gen(bytes: &[u8]) -> Table {
    Table::gen(bytes)
}

/// ALPHA = A-Z / a-z
pub const ALPHA: &Table = &gen(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// DIGIT = 0-9
pub const DIGIT: &Table = &gen(b"0123456789");

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
///                / "a" / "b" / "c" / "d" / "e" / "f"
pub const HEXDIG: &Table = &DIGIT.or(&gen(b"ABCDEFabcdef"));

/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///            / "*" / "+" / "," / ";" / "="
pub const SUB_DELIMS: &Table = &gen(b"!$&'()*+,;=");

/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub const UNRESERVED: &Table = &ALPHA.or(DIGIT).or(&gen(b"-._~"));

/// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
pub const PCHAR: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":@")).enc();

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
///
/// Only covers the trailing characters; the first one must be an `ALPHA`.
pub const SCHEME: &Table = &ALPHA.or(DIGIT).or(&gen(b"+-."));

/// userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
pub const USERINFO: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":")).enc();

/// query = *( pchar / "/" / "?" )
pub const QUERY: &Table = &PCHAR.or(&gen(b"/?"));

/// fragment = *( pchar / "/" / "?" )
pub const FRAGMENT: &Table = QUERY;

/// The characters left unescaped in query keys and values besides
/// the unreserved ones, unless configured otherwise.
pub const QUERY_SAFE_CHARS: &str = ":@!$&'()*,;=~-._";

/// unreserved / ":" / "@" / "!" / "$" / "&" / "'" / "(" / ")"
///            / "*" / "," / ";" / "="
pub const QUERY_SAFE: &Table = &UNRESERVED.or(&gen(QUERY_SAFE_CHARS.as_bytes()));

/// Allows nothing; every byte is encoded.
pub(crate) const NONE: &Table = &gen(b"");

/// The characters that would end a path early: "?" / "#"
pub(crate) const PATH_DELIMS: &Table = &gen(b"?#");

/// The characters that would end an authority early: "/" / "?" / "#"
pub(crate) const AUTHORITY_DELIMS: &Table = &gen(b"/?#");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_safe_covers_defaults() {
        for x in QUERY_SAFE_CHARS.bytes() {
            assert!(QUERY_SAFE.allows(x), "{:?}", x as char);
        }
        assert!(!QUERY_SAFE.allows(b'+'));
        assert!(!QUERY_SAFE.allows(b' '));
        assert!(!QUERY_SAFE.allows(b'#'));
    }

    #[test]
    fn validate_octets() {
        assert!(QUERY.validate(b"a=%20&b=c"));
        assert!(!QUERY.validate(b"a=%2"));
        assert!(!QUERY.validate(b"a=%zz"));
        assert!(!QUERY.validate(b"a b"));
        assert!(!SCHEME.validate(b"a%20"));
    }

    #[test]
    fn try_gen_rejects_percent() {
        assert!(Table::try_gen("%").is_none());
        assert!(Table::try_gen("é").is_none());
        assert!(Table::try_gen(":@").unwrap().allows(b'@'));
    }
}
