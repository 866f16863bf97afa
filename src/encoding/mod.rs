//! Percent-encoding utilities for query keys and values.
//!
//! Encoding is table-driven: see [`table`] for the predefined byte
//! pattern tables. Decoding is lenient and never fails.

pub mod table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use table::Table;

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xFF; 256];
    let shift = (hi as u8) * 4;

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

static OCTET_HI: &[u8; 256] = &gen_octet_table(true);
static OCTET_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet.
#[inline]
fn decode_octet(hi: u8, lo: u8) -> Option<u8> {
    let (hi, lo) = (OCTET_HI[hi as usize], OCTET_LO[lo as usize]);
    if hi != 0xFF && lo != 0xFF {
        Some(hi | lo)
    } else {
        None
    }
}

/// Percent-encodes a string with the given table.
///
/// Bytes allowed by the table are left as-is; every other byte becomes
/// an uppercase `%XX` triplet. When `plus_is_space` is set, a space is
/// written as `+` instead of `%20`.
///
/// # Examples
///
/// ```
/// use uri_parts::encoding::{encode, table::QUERY_SAFE};
///
/// assert_eq!(encode("key 1", QUERY_SAFE, false), "key%201");
/// assert_eq!(encode("nova scotia", QUERY_SAFE, true), "nova+scotia");
/// assert_eq!(encode("a/b", QUERY_SAFE, false), "a%2Fb");
/// ```
pub fn encode<'a>(s: &'a str, table: &Table, plus_is_space: bool) -> Cow<'a, str> {
    // Skip the allowed bytes.
    let i = match s.bytes().position(|x| !table.allows(x)) {
        Some(i) => i,
        None => return Cow::Borrowed(s),
    };

    let mut buf = String::with_capacity(s.len() * 3);
    buf.push_str(&s[..i]);
    encode_bytes(&s.as_bytes()[i..], table, plus_is_space, &mut buf);
    Cow::Owned(buf)
}

/// Percent-encodes a string with the given table, appending to a buffer.
///
/// See [`encode`] for the encoding rules.
pub fn encode_to(s: &str, table: &Table, plus_is_space: bool, buf: &mut String) {
    buf.reserve(s.len());
    encode_bytes(s.as_bytes(), table, plus_is_space, buf);
}

fn encode_bytes(s: &[u8], table: &Table, plus_is_space: bool, buf: &mut String) {
    for &x in s {
        if plus_is_space && x == b' ' {
            buf.push('+');
        } else {
            table.encode(x, buf);
        }
    }
}

/// Decodes a percent-encoded string.
///
/// A `%` not followed by two hexadecimal digits is kept as-is, and any
/// invalid UTF-8 in the decoded bytes is replaced with
/// [`U+FFFD`](char::REPLACEMENT_CHARACTER). When `plus_is_space` is set,
/// an unencoded `+` decodes to a space.
///
/// # Examples
///
/// ```
/// use uri_parts::encoding::decode;
///
/// assert_eq!(decode("Value%201", false), "Value 1");
/// assert_eq!(decode("a+b", false), "a+b");
/// assert_eq!(decode("a+b", true), "a b");
/// assert_eq!(decode("100%", false), "100%");
/// assert_eq!(decode("%E5%BC%A0", false), "张");
/// ```
pub fn decode(s: &str, plus_is_space: bool) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    // Skip the bytes that need no decoding.
    let i = match bytes
        .iter()
        .position(|&x| x == b'%' || (plus_is_space && x == b'+'))
    {
        Some(i) => i,
        None => return Cow::Borrowed(s),
    };

    let mut buf = Vec::with_capacity(bytes.len());
    buf.extend_from_slice(&bytes[..i]);

    let mut i = i;
    while i < bytes.len() {
        let x = bytes[i];
        if x == b'%' && i + 2 < bytes.len() {
            if let Some(octet) = decode_octet(bytes[i + 1], bytes[i + 2]) {
                buf.push(octet);
                i += 3;
                continue;
            }
        }
        if plus_is_space && x == b'+' {
            buf.push(b' ');
        } else {
            buf.push(x);
        }
        i += 1;
    }

    match String::from_utf8(buf) {
        Ok(s) => Cow::Owned(s),
        Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}
