use serde::Serialize;
use std::collections::BTreeMap;

/// macro for checking that the produced querystring parses back, with
/// a standard `application/x-www-form-urlencoded` parser, into the
/// expected pairs
///
/// This is a macro so that failures point at the calling test
macro_rules! roundtrip_test {
    (
        $data:expr, [$(($key:expr, $value:expr)),* $(,)?]
    ) => {
        let data = &$data;
        let expected: Vec<(String, String)> = vec![$(($key.to_string(), $value.to_string())),*];

        for encode_set in [urlquery::EncodeSet::Query, urlquery::EncodeSet::Minimal] {
            let config = urlquery::Config::new().encode_set(encode_set);
            let serialized = config.serialize_string(data).expect("serialize");

            let parsed: Vec<(String, String)> =
                serde_urlencoded::from_str(&serialized).expect("parse");

            pretty_assertions::assert_eq!(expected, parsed, "{encode_set:?}: {serialized}");
        }
    };
}

// ========== BASIC STRUCTS ==========

#[derive(Debug, PartialEq, Serialize)]
struct FlatStruct {
    a: u8,
    b: u8,
}

#[test]
fn flat_struct() {
    roundtrip_test!(FlatStruct { a: 1, b: 2 }, [("a", 1), ("b", 2)]);
}

#[derive(Debug, PartialEq, Serialize)]
struct Penguin {
    #[serde(rename = "name,omitempty")]
    name: String,
}

#[test]
fn penguin() {
    roundtrip_test!(
        Penguin {
            name: "Penguin".to_string()
        },
        [("name", "Penguin")]
    );
}

// ========== PRIMITIVE TYPES ==========

#[derive(Debug, PartialEq, Serialize)]
struct PrimitiveTypes {
    bool_val: bool,
    i8_val: i8,
    i16_val: i16,
    i32_val: i32,
    i64_val: i64,
    u8_val: u8,
    u16_val: u16,
    u32_val: u32,
    u64_val: u64,
    f32_val: f32,
    f64_val: f64,
    char_val: char,
    string_val: String,
}

#[test]
fn primitive_types() {
    roundtrip_test!(
        PrimitiveTypes {
            bool_val: true,
            i8_val: -128,
            i16_val: -32768,
            i32_val: -2147483648,
            i64_val: -9223372036854775808,
            u8_val: 255,
            u16_val: 65535,
            u32_val: 4294967295,
            u64_val: 18446744073709551615,
            f32_val: 0.5,
            f64_val: -0.25,
            char_val: 'x',
            string_val: "hello".to_string(),
        },
        [
            ("bool_val", "true"),
            ("char_val", "x"),
            ("f32_val", "0.5"),
            ("f64_val", "-0.25"),
            ("i16_val", "-32768"),
            ("i32_val", "-2147483648"),
            ("i64_val", "-9223372036854775808"),
            ("i8_val", "-128"),
            ("string_val", "hello"),
            ("u16_val", "65535"),
            ("u32_val", "4294967295"),
            ("u64_val", "18446744073709551615"),
            ("u8_val", "255"),
        ]
    );
}

// ========== SPECIAL CHARACTERS ==========

#[derive(Debug, PartialEq, Serialize)]
struct SpecialChars {
    #[serde(rename = "key with spaces")]
    spaces: String,
    #[serde(rename = "a&b=c")]
    reserved: String,
    #[serde(rename = "unicode")]
    unicode: String,
    #[serde(rename = "plus")]
    plus: String,
}

#[test]
fn special_chars() {
    roundtrip_test!(
        SpecialChars {
            spaces: "hello world".to_string(),
            reserved: "x&y=z;w".to_string(),
            unicode: "héllo wörld 日本".to_string(),
            plus: "1+1=2".to_string(),
        },
        [
            ("a&b=c", "x&y=z;w"),
            ("key with spaces", "hello world"),
            ("plus", "1+1=2"),
            ("unicode", "héllo wörld 日本"),
        ]
    );
}

// ========== NESTING ==========

#[derive(Debug, PartialEq, Serialize)]
struct Level2 {
    #[serde(rename = "value")]
    value: Option<String>,
    #[serde(rename = "list")]
    list: Vec<u8>,
}

#[derive(Debug, PartialEq, Serialize)]
struct Level1 {
    #[serde(rename = "inner")]
    inner: Level2,
    #[serde(rename = "config")]
    config: BTreeMap<String, i32>,
}

#[test]
fn deep_nesting() {
    roundtrip_test!(
        Level1 {
            inner: Level2 {
                value: Some("deep".to_string()),
                list: vec![3, 1, 2],
            },
            config: BTreeMap::from([("b".to_string(), 2), ("a".to_string(), 1)]),
        },
        [
            ("config.a", 1),
            ("config.b", 2),
            ("inner.list", 3),
            ("inner.list", 1),
            ("inner.list", 2),
            ("inner.value", "deep"),
        ]
    );
}

#[test]
fn absent_nesting() {
    roundtrip_test!(
        Level1 {
            inner: Level2 {
                value: None,
                list: vec![],
            },
            config: BTreeMap::new(),
        },
        []
    );
}
