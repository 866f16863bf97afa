use uri_parts::{QueryConfig, QueryErrorKind, QueryMap};

const SIMPLE: &str = "a=1&b=2&c=3&d=4&a=12&b=23&a=23";
const PCT_ENCODED: &str = "complex%20key=value&lang=en&q=my%20search%20terms&en=utf8";

#[test]
fn get_returns_last() {
    let q = QueryMap::parse("a=1&a=2&a=3").unwrap();
    assert_eq!(q.get("a").unwrap(), "3");
    assert_eq!(q.get_all("a"), ["1", "2", "3"]);
    assert_eq!(q.to_flat_map()["a"], "1");

    let q = QueryMap::parse(SIMPLE).unwrap();
    assert_eq!(q.get("a").unwrap(), "23");
    assert_eq!(q.get("b").unwrap(), "23");
    assert_eq!(q.get("c").unwrap(), "3");
    assert_eq!(q.get("d").unwrap(), "4");
}

#[test]
fn missing_key() {
    let q = QueryMap::parse(SIMPLE).unwrap();

    let err = q.get("does_not_exist").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::KeyNotFound);
    assert_eq!(err.detail(), "does_not_exist");
    assert_eq!(err.to_string(), r#"key not found: "does_not_exist""#);

    assert_eq!(q.get_or("does_not_exist", "fallback"), "fallback");
    assert_eq!(q.get_or("a", "fallback"), "23");

    assert!(q.get_all("does_not_exist").is_empty());
    assert_eq!(
        q.try_get_all("does_not_exist").unwrap_err().kind(),
        QueryErrorKind::KeyNotFound
    );
    assert_eq!(q.try_get_all("b").unwrap(), ["2", "23"]);
}

#[test]
fn get_all() {
    let q = QueryMap::parse(SIMPLE).unwrap();
    assert_eq!(q.get_all("a"), ["1", "12", "23"]);
    assert_eq!(q.get_all("b"), ["2", "23"]);
    assert_eq!(q.get_all("c"), ["3"]);
    assert_eq!(q.get_all("d"), ["4"]);
}

#[test]
fn keys_in_first_occurrence_order() {
    let q = QueryMap::parse(SIMPLE).unwrap();
    assert_eq!(q.keys(), ["a", "b", "c", "d"]);
    assert_eq!(q.len(), 7);
    assert!(q.contains_key("c"));
    assert!(!q.contains_key("e"));
}

#[test]
fn set_appends() {
    let mut q = QueryMap::parse(SIMPLE).unwrap();
    q.set("a", "new_value");
    assert_eq!(q.get_all("a"), ["1", "12", "23", "new_value"]);
    assert_eq!(q.get("a").unwrap(), "new_value");

    let mut q = QueryMap::new();
    q.set("a", "1");
    q.set("a", "2");
    assert_eq!(q.get_all("a"), ["1", "2"]);
}

#[test]
fn build_from_scratch() {
    let mut q = QueryMap::parse("").unwrap();
    assert!(q.is_empty());
    assert_eq!(q.to_string(), "");

    q.set("a", "1");
    q.set("complex key", "value");
    assert_eq!(q.to_string(), "a=1&complex%20key=value");
}

#[test]
fn delete_removes_all() {
    let mut q = QueryMap::parse("a=1&a=2&a=3").unwrap();
    assert_eq!(q.delete("a"), 3);
    assert!(!q.keys().contains(&"a"));
    assert!(q.get_all("a").is_empty());
    assert_eq!(q.delete("a"), 0);
}

#[test]
fn delete_pair() {
    let mut q = QueryMap::parse("p=1&p=2&p=3&p=2").unwrap();
    assert_eq!(q.delete_pair("p", "2", Some(1)), 1);
    assert_eq!(q.get_all("p"), ["1", "3", "2"]);

    let mut q = QueryMap::parse("p=1&p=2&p=3&p=2").unwrap();
    assert_eq!(q.delete_pair("p", "2", None), 2);
    assert_eq!(q.get_all("p"), ["1", "3"]);

    let mut q = QueryMap::parse("p=1&p=2&p=3&p=2").unwrap();
    assert_eq!(q.delete_pair("p", "2", Some(0)), 0);
    assert_eq!(q.get_all("p"), ["1", "2", "3", "2"]);

    let mut q = QueryMap::parse("p=1&x=2&p=2").unwrap();
    assert_eq!(q.delete_pair("x", "1", None), 0);
    assert_eq!(q.delete_pair("x", "2", None), 1);
    assert_eq!(q.to_string(), "p=1&p=2");
}

#[test]
fn set_all_replaces_in_place() {
    let mut q = QueryMap::parse(SIMPLE).unwrap();
    q.set_all("a", ["2", "3"]);
    assert_eq!(q.get_all("a"), ["2", "3"]);
    assert_eq!(q.keys(), ["a", "b", "c", "d"]);

    q.set_all("e", ["5"]);
    assert_eq!(q.keys(), ["a", "b", "c", "d", "e"]);

    q.set_all("b", Vec::<String>::new());
    assert_eq!(q.keys(), ["a", "c", "d", "e"]);
}

#[test]
fn set_default() {
    let mut q = QueryMap::parse("b=2&c=2").unwrap();
    assert_eq!(q.set_default("a", "1"), "1");
    assert_eq!(q.get_all("a"), ["1"]);

    let mut q = QueryMap::parse("a=1&b=2&c=2").unwrap();
    assert_eq!(q.set_default("a", "123"), "1");
    assert_eq!(q.get_all("a"), ["1"]);
}

#[test]
fn items_values_lists() {
    let q = QueryMap::parse(SIMPLE).unwrap();
    assert_eq!(q.items(), [("a", "23"), ("b", "23"), ("c", "3"), ("d", "4")]);
    assert_eq!(q.values(), ["23", "23", "3", "4"]);
    assert_eq!(
        q.lists(),
        [
            ("a", vec!["1", "12", "23"]),
            ("b", vec!["2", "23"]),
            ("c", vec!["3"]),
            ("d", vec!["4"]),
        ]
    );
}

#[test]
fn flat_map_keeps_first() {
    let q = QueryMap::parse(SIMPLE).unwrap();
    let flat = q.to_flat_map();
    assert_eq!(flat.len(), 4);
    assert_eq!(flat["a"], "1");
    assert_eq!(flat["b"], "2");
    assert_eq!(flat["c"], "3");
    assert_eq!(flat["d"], "4");
}

#[test]
fn iter_in_storage_order() {
    let q = QueryMap::parse("a=1&b=2&a=3").unwrap();
    let pairs: Vec<_> = q.iter().collect();
    assert_eq!(pairs, [("a", "1"), ("b", "2"), ("a", "3")]);
    assert_eq!(q.iter().len(), 3);
    assert_eq!(q.iter().next_back(), Some(("a", "3")));

    let mut n = 0;
    for (_, _) in &q {
        n += 1;
    }
    assert_eq!(n, 3);
}

#[test]
fn serialize_groups_by_key() {
    let q = QueryMap::parse(SIMPLE).unwrap();
    assert_eq!(q.to_string(), "a=1&a=12&a=23&b=2&b=23&c=3&d=4");
    assert_eq!(q.serialize(), q.to_string());
    assert_eq!(
        q.serialize_with_separator(";").unwrap(),
        "a=1;a=12;a=23;b=2;b=23;c=3;d=4"
    );
    assert_eq!(
        q.serialize_with_separator("").unwrap_err().kind(),
        QueryErrorKind::InvalidSeparator
    );
}

#[test]
fn percent_decoding() {
    let q = QueryMap::parse("key%201=Value%201").unwrap();
    assert_eq!(q.get("key 1").unwrap(), "Value 1");
    assert_eq!(q.to_string(), "key%201=Value%201");

    let q = QueryMap::parse(PCT_ENCODED).unwrap();
    assert!(q.contains_key("complex key"));
    assert!(q.contains_key("lang"));
    assert!(q.contains_key("q"));
    assert!(q.contains_key("en"));
    assert_eq!(q.get("q").unwrap(), "my search terms");
    assert_eq!(q.to_string(), PCT_ENCODED);

    let q = QueryMap::parse("name=%E5%BC%A0%E4%B8%89&speech=%C2%A1Ol%C3%A9%21").unwrap();
    assert_eq!(q.get("name").unwrap(), "张三");
    assert_eq!(q.get("speech").unwrap(), "¡Olé!");
    assert_eq!(q.to_string(), "name=%E5%BC%A0%E4%B8%89&speech=%C2%A1Ol%C3%A9!");
}

#[test]
fn plus_handling() {
    let q = QueryMap::parse("q=nova+scotia").unwrap();
    assert_eq!(q.get("q").unwrap(), "nova+scotia");
    assert_eq!(q.to_string(), "q=nova+scotia");

    let config = QueryConfig::new().with_plus_as_space(true);
    let q = QueryMap::parse_with("q=nova+scotia&p=1%2B1", &config).unwrap();
    assert_eq!(q.get("q").unwrap(), "nova scotia");
    assert_eq!(q.get("p").unwrap(), "1+1");
    assert_eq!(q.to_string(), "q=nova+scotia&p=1%2B1");

    let mut q = QueryMap::new();
    q.set("q", "nova scotia");
    assert_eq!(q.to_string(), "q=nova%20scotia");
}

#[test]
fn malformed_pair() {
    let err = QueryMap::parse("a=1&b&c=3").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::MalformedPair);
    assert_eq!(err.detail(), "b");
    assert_eq!(err.to_string(), r#"malformed query pair: "b""#);

    let q = QueryMap::parse("a=&=b").unwrap();
    assert_eq!(q.get("a").unwrap(), "");
    assert_eq!(q.get("").unwrap(), "b");
}

#[test]
fn custom_safe_chars() {
    let config = QueryConfig::new().with_safe_chars("/").unwrap();
    let mut q = QueryMap::with_config(config);
    q.set("path", "a/b:c");
    assert_eq!(q.to_string(), "path=a/b%3Ac");

    let err = QueryConfig::new().with_safe_chars("é").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::InvalidConfiguration);
}

#[test]
fn unsafe_chars_are_encoded() {
    let mut q = QueryMap::new();
    q.set("k", "#[]");
    assert_eq!(q.to_string(), "k=%23%5B%5D");

    let mut q = QueryMap::new();
    q.set("k", ":@!$&'()*,;=~-._");
    assert_eq!(q.to_string(), "k=:@!$&'()*,;=~-._");
}

#[test]
fn extend_and_collect() {
    let mut q = QueryMap::new();
    q.extend([("q", "urilib"), ("sourceid", "chrome"), ("ie", "UTF-8")]);
    assert_eq!(q.to_string(), "q=urilib&sourceid=chrome&ie=UTF-8");

    let q: QueryMap = vec![("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
    assert_eq!(q.get_all("a"), ["1", "3"]);
}

#[test]
fn clone_is_independent() {
    let q = QueryMap::parse(SIMPLE).unwrap();
    let mut copy = q.clone();
    copy.delete("a");
    assert_eq!(q.get_all("a"), ["1", "12", "23"]);
    assert!(copy.get_all("a").is_empty());
}

#[test]
fn debug_and_from_str() {
    let q: QueryMap = "a=1&b=2".parse().unwrap();
    assert_eq!(format!("{:?}", q), r#"QueryMap("a=1&b=2")"#);
    assert_eq!(format!("{:?}", QueryMap::new()), r#"QueryMap("")"#);
}

#[test]
fn flat_map_is_sorted_by_key() {
    let q = QueryMap::parse("z=1&a=2&m=3&a=4").unwrap();
    assert_eq!(q.keys(), ["z", "a", "m"]);
    let flat: Vec<_> = q.to_flat_map().into_iter().collect();
    assert_eq!(flat, [("a", "2"), ("m", "3"), ("z", "1")]);
}
