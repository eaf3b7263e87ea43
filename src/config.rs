use std::io::Write;

use serde::ser;
use tracing::debug;

use crate::error::{Error, Result};
use crate::flatten::Flattener;
use crate::value::{Field, Value};
use crate::values::Values;

/// Configuration for flattening and encoding.
///
/// ## Key separator
///
/// Nested keys are built by joining path segments with `key_separator`.
///
/// Default value: `key_separator = '.'`
///
/// ## Key order
///
/// With `sort_keys` (the default) the encoded output lists keys in
/// lexicographic order, so the same input always produces the same string.
/// Turning it off keeps the order in which keys were first written while
/// walking the value. Values under one key always keep their order.
///
/// ```
/// use serde::Serialize;
/// use urlquery::Config;
///
/// #[derive(Serialize)]
/// struct Query {
///     b: u8,
///     a: u8,
/// }
///
/// let query = Query { b: 1, a: 2 };
/// assert_eq!(Config::new().serialize_string(&query).unwrap(), "a=2&b=1");
///
/// let config = Config::new().sort_keys(false);
/// assert_eq!(config.serialize_string(&query).unwrap(), "b=1&a=2");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    key_separator: char,
    sort_keys: bool,
    encode_set: EncodeSet,
}

/// Which characters get percent-encoded in keys and values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeSet {
    /// Everything except ASCII alphanumerics and `-`, `_`, `.`, `~` is
    /// percent-encoded. Spaces become `+`.
    Query,
    /// Only the [WHATWG query set](https://url.spec.whatwg.org/#query-percent-encode-set)
    /// plus `+`, `=`, `&`, `[` and `]` is percent-encoded. Spaces become `+`.
    Minimal,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            key_separator: '.',
            sort_keys: true,
            encode_set: EncodeSet::Query,
        }
    }

    /// Specifies the separator placed between nested key segments.
    /// Default is `.`.
    pub const fn key_separator(mut self, key_separator: char) -> Self {
        self.key_separator = key_separator;
        self
    }

    /// Specifies whether keys are encoded in lexicographic order.
    /// Default is `true`.
    pub const fn sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Specifies which characters get percent-encoded.
    /// Default is [`EncodeSet::Query`].
    pub const fn encode_set(mut self, encode_set: EncodeSet) -> Self {
        self.encode_set = encode_set;
        self
    }

    pub(crate) const fn sorted(&self) -> bool {
        self.sort_keys
    }

    pub(crate) const fn set(&self) -> EncodeSet {
        self.encode_set
    }

    /// Flattens a record value into a multimap of keys to values.
    ///
    /// Accepts a [`Value::Record`] or a present [`Value::Optional`] holding
    /// one. Anything else fails with [`Error::InvalidInput`] before any
    /// flattening happens.
    pub fn marshal_values(self, value: &Value) -> Result<Values> {
        let fields = top_level(value)?;
        let mut flattener = Flattener::new(self.key_separator);
        flattener.flatten_record(fields, "");
        let values = flattener.finish();
        debug!(keys = values.len(), "flattened record");
        Ok(values)
    }

    /// Flattens a record value and encodes it as a querystring.
    pub fn marshal(self, value: &Value) -> Result<Vec<u8>> {
        let values = self.marshal_values(value)?;
        Ok(values.encode(&self).into_bytes())
    }

    /// Lowers `input` through `serde` and flattens it.
    pub fn serialize_values<T: ser::Serialize + ?Sized>(self, input: &T) -> Result<Values> {
        let value = crate::ser::to_value(input)?;
        self.marshal_values(&value)
    }

    /// Serializes an object to a querystring using this `Config`.
    pub fn serialize_string<T: ser::Serialize + ?Sized>(self, input: &T) -> Result<String> {
        let bytes = self.serialize_bytes(input)?;
        String::from_utf8(bytes).map_err(Error::from)
    }

    /// Serializes an object to querystring bytes using this `Config`.
    pub fn serialize_bytes<T: ser::Serialize + ?Sized>(self, input: &T) -> Result<Vec<u8>> {
        let value = crate::ser::to_value(input)?;
        self.marshal(&value)
    }

    /// Serializes an object to a querystring into a writer using this `Config`.
    pub fn serialize_to_writer<T: ser::Serialize + ?Sized, W: Write>(
        self,
        input: &T,
        writer: &mut W,
    ) -> Result<()> {
        let values = self.serialize_values(input)?;
        values.write_to(writer, &self)
    }
}

/// Checks the top-level kind of the input and returns the record's fields.
fn top_level(value: &Value) -> Result<&[Field]> {
    match value {
        Value::Record(fields) => Ok(fields),
        Value::Optional(None) => Err(Error::invalid_input("no data provided")),
        Value::Optional(Some(inner)) => match inner.as_ref() {
            Value::Record(fields) => Ok(fields),
            other => Err(Error::invalid_input(format_args!(
                "invalid type of input: reference to {}",
                other.kind()
            ))),
        },
        other => Err(Error::invalid_input(format_args!(
            "invalid type of input: {}",
            other.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_accepts_records() {
        assert!(top_level(&Value::Record(vec![])).is_ok());
        assert!(top_level(&Value::some(Value::Record(vec![]))).is_ok());
    }

    #[test]
    fn top_level_rejects_everything_else() {
        for value in [
            Value::none(),
            Value::from(42),
            Value::from("record"),
            Value::Sequence(vec![]),
            Value::Map(vec![]),
            Value::Unsupported,
            Value::some(42),
            Value::some(Value::none()),
            Value::some(Value::some(Value::Record(vec![]))),
        ] {
            let err = top_level(&value).unwrap_err();
            assert!(err.is_invalid_input(), "{value:?}: {err}");
        }
    }

    #[test]
    fn custom_separator() {
        let value = Value::Record(vec![Field::new(
            "sub",
            Value::Record(vec![Field::new("a", 1)]),
        )]);
        let values = Config::new()
            .key_separator('_')
            .marshal_values(&value)
            .unwrap();
        assert_eq!(values.get("sub_a"), Some("1"));
    }
}
