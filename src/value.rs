//! The in-memory model that gets flattened into a querystring.
//!
//! Every runtime value falls into exactly one [`Value`] variant. Records
//! expose their fields as [`Field`] descriptors, either by implementing
//! [`Record`] by hand or by going through `serde` with [`crate::to_value`].
//!
//! ```
//! use urlquery::{Field, Record, Value};
//!
//! struct Pet {
//!     owner_id: String,
//!     name: String,
//! }
//!
//! impl Record for Pet {
//!     fn fields(&self) -> Vec<Field> {
//!         vec![
//!             Field::new("OwnerID", self.owner_id.as_str()).tag("owner_id,omitempty"),
//!             Field::new("Name", self.name.as_str()).tag(",omitempty"),
//!         ]
//!     }
//! }
//!
//! let pet = Pet { owner_id: "tencent".into(), name: "Penguin".into() };
//! let query = urlquery::marshal(&Value::record(&pet)).unwrap();
//! assert_eq!(query, b"Name=Penguin&owner_id=tencent");
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use crate::tag::Tag;

/// A terminal value with a canonical string form.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Uint(u64),
    Bool(bool),
    Float(f64),
}

impl Scalar {
    /// Whether the scalar holds the empty value of its kind.
    ///
    /// This is what `omitempty` looks at: `""`, `0`, `false` and `0.0`.
    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Str(s) => s.is_empty(),
            Scalar::Int(v) => *v == 0,
            Scalar::Uint(v) => *v == 0,
            Scalar::Bool(v) => !*v,
            Scalar::Float(v) => *v == 0.0,
        }
    }
}

/// A runtime value, classified into the kinds the flattener knows about.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    /// A reference that may be absent. An absent reference drops its whole
    /// subtree.
    Optional(Option<Box<Value>>),
    /// Elements must all be scalars, otherwise nothing is emitted.
    Sequence(Vec<Value>),
    /// Entries of an associative container, keys already rendered.
    Map(Vec<(String, Value)>),
    Record(Vec<Field>),
    /// Anything without a query representation. Never emitted.
    Unsupported,
}

impl Value {
    /// Builds a record value from anything implementing [`Record`].
    pub fn record<R: Record + ?Sized>(record: &R) -> Self {
        Value::Record(record.fields())
    }

    /// A present reference to `value`.
    pub fn some(value: impl Into<Value>) -> Self {
        Value::Optional(Some(Box::new(value.into())))
    }

    /// An absent reference.
    pub const fn none() -> Self {
        Value::Optional(None)
    }

    /// Short name of the variant, used in error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(Scalar::Str(_)) => "string",
            Value::Scalar(Scalar::Int(_)) => "signed integer",
            Value::Scalar(Scalar::Uint(_)) => "unsigned integer",
            Value::Scalar(Scalar::Bool(_)) => "boolean",
            Value::Scalar(Scalar::Float(_)) => "float",
            Value::Optional(_) => "optional",
            Value::Sequence(_) => "sequence",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::Unsupported => "unsupported",
        }
    }
}

/// Describes one field of a record: where its key comes from, whether it
/// is promoted into its parent, and whether it is visible at all.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    ident: Cow<'static, str>,
    tag: Cow<'static, str>,
    inline: bool,
    public: bool,
    value: Value,
}

impl Field {
    /// A public, non-inline field with an empty tag.
    pub fn new(ident: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            ident: ident.into(),
            tag: Cow::Borrowed(""),
            inline: false,
            public: true,
            value: value.into(),
        }
    }

    /// An embedded field. When it holds a record, that record's fields are
    /// flattened as if they were declared on the parent.
    pub fn embedded(ident: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self::new(ident, value).inline(true)
    }

    /// Sets the raw tag, e.g. `"owner_id,omitempty"`.
    pub fn tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Marks the field as not accessible. Such fields are never emitted.
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn raw_tag(&self) -> &str {
        &self.tag
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Parses the raw tag against the declared identifier.
    pub fn parsed_tag(&self) -> Tag<'_> {
        Tag::parse(&self.tag, &self.ident)
    }
}

/// Implemented by types that describe their own fields.
///
/// This is the hand-written counterpart of `#[derive(Serialize)]`: it gives
/// full control over tags, embedding and visibility.
pub trait Record {
    fn fields(&self) -> Vec<Field>;
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self) -> Vec<Field> {
        (**self).fields()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn fields(&self) -> Vec<Field> {
        (**self).fields()
    }
}

macro_rules! from_scalar {
    ($($ty:ty => $variant:ident as $as:ty,)*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::$variant(v as $as))
                }
            }
        )*
    };
}

from_scalar! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    usize => Uint as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Scalar(Scalar::Str(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Scalar(Scalar::Str(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(Scalar::Str(v.to_owned()))
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Scalar(Scalar::Str(v.clone()))
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(v: Cow<'_, str>) -> Self {
        Value::Scalar(Scalar::Str(v.into_owned()))
    }
}

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Value::Scalar(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Optional(v.map(|v| Box::new(v.into())))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<K: ToString, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k.to_string(), v.into())).collect())
    }
}

impl<K: ToString, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(v: HashMap<K, V, S>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k.to_string(), v.into())).collect())
    }
}
