#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_parts::encoding::{decode, encode, table};

fuzz_target!(|data: &str| {
    assert_eq!(decode(&encode(data, table::QUERY_SAFE, false), false), data);
    assert_eq!(decode(&encode(data, table::QUERY_SAFE, true), true), data);
});
