//! The flat multimap produced by flattening.

use std::fmt;
use std::io::Write;

use indexmap::IndexMap;

use crate::config::Config;
use crate::error::Result;
use crate::ser::encode::encode;

/// Keys mapped to one or more string values.
///
/// Keys remember the order in which they were first written. Values under
/// a key keep their insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Values {
    inner: IndexMap<String, Vec<String>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is stored under `key` with the single `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// Adds `value` to the end of the list stored under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value stored under `key`, or an empty slice.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Iterates over keys and their values in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    fn ordered(&self, sorted: bool) -> Vec<(&str, &[String])> {
        let mut pairs: Vec<_> = self.iter().collect();
        if sorted {
            pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        }
        pairs
    }

    /// Encodes the multimap as `key=value` pairs joined by `&`, with keys
    /// and values percent-encoded according to `config`.
    pub fn encode(&self, config: &Config) -> String {
        let mut out = String::with_capacity(self.inner.len() * 16);
        let mut first_kv = true;
        for (key, values) in self.ordered(config.sorted()) {
            for value in values {
                if first_kv {
                    first_kv = false;
                } else {
                    out.push('&');
                }
                out.extend(encode(key, config.set()));
                out.push('=');
                out.extend(encode(value, config.set()));
            }
        }
        out
    }

    /// Writes the encoded querystring into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W, config: &Config) -> Result<()> {
        writer.write_all(self.encode(config).as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode(&Config::default()))
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
