#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let u = uri_parts::parse_uri(data);
    let trimmed = data.trim_matches(|c: char| c.is_ascii_whitespace());
    assert_eq!(u.to_string(), trimmed);

    let mut buf = String::with_capacity(trimmed.len());
    if let Some(s) = u.scheme() {
        buf.push_str(s.as_str());
        buf.push(':');
    }
    buf.push_str(&u.hier_part());
    if let Some(q) = u.query_str() {
        buf.push('?');
        buf.push_str(&q);
    }
    if let Some(f) = u.fragment() {
        buf.push('#');
        buf.push_str(f);
    }
    assert_eq!(buf, trimmed);

    assert_eq!(uri_parts::parse_uri(trimmed), u);
});
