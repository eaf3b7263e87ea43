//! The recursive walk turning a [`Value`] tree into flat [`Values`].
//!
//! Keys are built from the tag names along the path, joined by the
//! configured separator:
//!
//! * records add a segment per field, except for inline fields whose
//!   children are promoted into the current path,
//! * map entries add a segment per key,
//! * scalars are stored with `set`, sequence elements with `append`,
//! * anything that cannot be represented is left out without an error.

use tracing::trace;

use crate::format;
use crate::tag::Tag;
use crate::value::{Field, Value};
use crate::values::Values;

/// Walks values and collects their leaves.
///
/// The walk never fails, and since a `Value` is an owned tree it always
/// terminates.
#[derive(Debug)]
pub struct Flattener {
    separator: char,
    out: Values,
}

impl Flattener {
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            out: Values::new(),
        }
    }

    /// Consumes the flattener, returning everything collected so far.
    pub fn finish(self) -> Values {
        self.out
    }

    /// Flattens every field of a record under `prefix`.
    pub fn flatten_record(&mut self, fields: &[Field], prefix: &str) {
        for field in fields {
            self.flatten_field(field, prefix);
        }
    }

    /// Flattens a single record field under `prefix`.
    pub fn flatten_field(&mut self, field: &Field, prefix: &str) {
        if field.is_inline() {
            if let Value::Record(children) = field.value() {
                self.flatten_record(children, prefix);
                return;
            }
        }

        if !field.is_public() {
            trace!(field = field.ident(), "skipping inaccessible field");
            return;
        }

        let tag = field.parsed_tag();
        if tag.is_skipped() {
            trace!(field = field.ident(), "skipping field tagged `-`");
            return;
        }

        let key = self.join(prefix, tag.name());
        self.emit(&key, field.value(), &tag);
    }

    /// Emits `value` under the fully built `key`.
    pub fn emit(&mut self, key: &str, value: &Value, tag: &Tag<'_>) {
        match value {
            Value::Optional(None) => {
                trace!(key, "skipping absent optional");
            }
            Value::Optional(Some(inner)) => self.emit(key, inner, tag),
            Value::Scalar(scalar) => {
                if tag.omit_empty() && scalar.is_empty() {
                    trace!(key, "omitting empty value");
                    return;
                }
                self.out.set(key, format::scalar(scalar));
            }
            Value::Sequence(items) => self.emit_sequence(key, items),
            Value::Map(entries) => {
                let untagged = Tag::default();
                for (entry_key, entry) in entries {
                    let child = self.join(key, entry_key);
                    self.emit(&child, entry, &untagged);
                }
            }
            Value::Record(fields) => self.flatten_record(fields, key),
            Value::Unsupported => {
                trace!(key, "skipping unsupported value");
            }
        }
    }

    fn emit_sequence(&mut self, key: &str, items: &[Value]) {
        if items.is_empty() {
            trace!(key, "skipping empty sequence");
            return;
        }

        let Some(formatted) = items.iter().map(format::leaf).collect::<Option<Vec<_>>>() else {
            trace!(key, "skipping sequence of non-scalar elements");
            return;
        };
        for item in formatted {
            self.out.append(key, item);
        }
    }

    fn join(&self, prefix: &str, name: &str) -> String {
        if prefix.is_empty() {
            return name.to_owned();
        }
        let mut key = String::with_capacity(prefix.len() + name.len() + self.separator.len_utf8());
        key.push_str(prefix);
        key.push(self.separator);
        key.push_str(name);
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    fn flatten(fields: Vec<Field>) -> Values {
        let mut flattener = Flattener::new('.');
        flattener.flatten_record(&fields, "");
        flattener.finish()
    }

    #[test]
    fn scalar_leaves() {
        let values = flatten(vec![
            Field::new("Name", "Penguin"),
            Field::new("Sex", 1),
            Field::new("Ok", true),
            Field::new("Ratio", 0.5),
        ]);
        assert_eq!(values.get("Name"), Some("Penguin"));
        assert_eq!(values.get("Sex"), Some("1"));
        assert_eq!(values.get("Ok"), Some("true"));
        assert_eq!(values.get("Ratio"), Some("0.5"));
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn omitempty_only_drops_empty_scalars() {
        let values = flatten(vec![
            Field::new("a", "").tag("a,omitempty"),
            Field::new("b", 0).tag("b,omitempty"),
            Field::new("c", false).tag("c,omitempty"),
            Field::new("d", 0.0).tag("d,omitempty"),
            Field::new("e", 0u32).tag("e,omitempty"),
            Field::new("f", "").tag("f"),
            Field::new("g", 7).tag("g,omitempty"),
        ]);
        let keys: Vec<_> = values.keys().collect();
        assert_eq!(keys, ["f", "g"]);
        assert_eq!(values.get("f"), Some(""));
    }

    #[test]
    fn omitempty_ignored_for_containers() {
        let values = flatten(vec![
            Field::new("seq", vec![0, 0]).tag("seq,omitempty"),
            Field::new("rec", Value::Record(vec![Field::new("x", 0)])).tag("rec,omitempty"),
            Field::new("map", Value::Map(vec![("k".into(), Value::from(""))])).tag("map,omitempty"),
        ]);
        assert_eq!(values.get_all("seq"), ["0", "0"]);
        assert_eq!(values.get("rec.x"), Some("0"));
        assert_eq!(values.get("map.k"), Some(""));
    }

    #[test]
    fn absent_optional_drops_subtree() {
        let values = flatten(vec![
            Field::new("nilPtr", Value::none()).tag("nil_ptr"),
            Field::new("ptr", Value::some(Value::Record(vec![Field::new("a", 1)]))).tag("ptr"),
            Field::new("deep", Value::Record(vec![Field::new("x", Value::none())])),
        ]);
        assert!(values.keys().all(|k| !k.starts_with("nil_ptr")));
        assert_eq!(values.get("ptr.a"), Some("1"));
        assert!(!values.contains_key("deep"));
        assert!(!values.contains_key("deep.x"));
    }

    #[test]
    fn sequences() {
        let values = flatten(vec![
            Field::new("Ints", vec![-1, -3, -5]).tag("ints"),
            Field::new("Empty", Vec::<i32>::new()).tag("empty"),
            Field::new("Mixed", Value::Sequence(vec![Value::from(1), Value::none()])),
            Field::new(
                "Nested",
                Value::Sequence(vec![Value::Record(vec![Field::new("a", 1)])]),
            ),
        ]);
        assert_eq!(values.get_all("ints"), ["-1", "-3", "-5"]);
        assert!(!values.contains_key("empty"));
        assert!(!values.contains_key("Mixed"));
        assert!(values.keys().all(|k| !k.starts_with("Nested")));
    }

    #[test]
    fn inline_fields_are_promoted() {
        let pet = Value::Record(vec![Field::new("OwnerID", "tencent").tag("owner_id")]);
        let values = flatten(vec![
            Field::embedded("Pet", pet).tag("pet"),
            Field::new("Color", "black").tag("color"),
        ]);
        assert_eq!(values.get("owner_id"), Some("tencent"));
        assert_eq!(values.get("color"), Some("black"));
        assert!(!values.contains_key("pet.owner_id"));
        assert!(!values.contains_key("Pet.owner_id"));
    }

    #[test]
    fn inline_promotes_into_current_prefix() {
        let inner = Value::Record(vec![Field::embedded(
            "Base",
            Value::Record(vec![Field::new("id", 3)]),
        )]);
        let values = flatten(vec![Field::new("outer", inner)]);
        assert_eq!(values.get("outer.id"), Some("3"));
    }

    #[test]
    fn inline_non_record_is_a_regular_field() {
        let values = flatten(vec![Field::embedded("Count", 3).tag("count")]);
        assert_eq!(values.get("count"), Some("3"));
    }

    #[test]
    fn skipped_fields() {
        let values = flatten(vec![
            Field::new("Secret", "x").tag("-"),
            Field::new("Opts", "x").tag("-,omitempty"),
            Field::new("Rec", Value::Record(vec![Field::new("a", 1)])).tag("-"),
            Field::new("hidden", "x").private(),
        ]);
        assert!(values.is_empty());
    }

    #[test]
    fn maps_use_entry_keys() {
        let values = flatten(vec![Field::new(
            "Labels",
            Value::Map(vec![
                ("-".to_owned(), Value::from("dash")),
                ("n".to_owned(), Value::from(0)),
                ("list".to_owned(), Value::from(vec!["a", "b"])),
                ("sub".to_owned(), Value::Record(vec![Field::new("z", 1)])),
                ("gone".to_owned(), Value::none()),
            ]),
        )
        .tag("labels")]);
        assert_eq!(values.get("labels.-"), Some("dash"));
        assert_eq!(values.get("labels.n"), Some("0"));
        assert_eq!(values.get_all("labels.list"), ["a", "b"]);
        assert_eq!(values.get("labels.sub.z"), Some("1"));
        assert!(!values.contains_key("labels.gone"));
    }

    #[test]
    fn unsupported_is_silent() {
        let values = flatten(vec![
            Field::new("Func", Value::Unsupported),
            Field::new("Ok", Value::Scalar(Scalar::Uint(1))),
        ]);
        let keys: Vec<_> = values.keys().collect();
        assert_eq!(keys, ["Ok"]);
    }
}
