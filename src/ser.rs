//! Serialization support for querystrings.
//!
//! Serialization happens in two steps: any `Serialize` type is first lowered
//! into a [`Value`] tree by [`ValueSerializer`], which is then flattened and
//! encoded. Struct field names double as tags, so
//! `#[serde(rename = "owner_id,omitempty")]` behaves like the tag
//! `owner_id,omitempty`, and the option `inline` promotes a nested struct's
//! fields into its parent.
//!
//! A renamed field keeps no trace of its Rust identifier, so a name segment
//! cannot be left out: `#[serde(rename = ",omitempty")]` drops the field.
//! Write `"name,omitempty"` instead. Unit structs serialize as empty records.

pub(crate) mod encode;
mod key;

use std::io::Write;

use serde::ser;

use crate::error::*;
use crate::tag::{self, Tag};
use crate::value::{Field, Scalar, Value};
use crate::values::Values;

use key::KeySerializer;

/// Serializes a value into a querystring.
///
/// ```
/// # use serde::Serialize;
/// #[derive(Serialize)]
/// struct Query {
///     name: String,
///     age: u8,
///     occupation: String,
/// }
///
/// let q = Query {
///     name: "Alice".to_owned(),
///     age: 24,
///     occupation: "Student".to_owned(),
/// };
///
/// assert_eq!(
///     urlquery::to_string(&q).unwrap(),
///     "age=24&name=Alice&occupation=Student");
/// ```
pub fn to_string<T: ser::Serialize + ?Sized>(input: &T) -> Result<String> {
    let config = crate::Config::default();
    config.serialize_string(input)
}

/// Serializes a value into querystring bytes.
pub fn to_bytes<T: ser::Serialize + ?Sized>(input: &T) -> Result<Vec<u8>> {
    let config = crate::Config::default();
    config.serialize_bytes(input)
}

/// Serializes a value into a generic writer object.
///
/// ```
/// # use serde::Serialize;
/// #[derive(Serialize)]
/// struct Query {
///     #[serde(rename = "q")]
///     search: String,
///     #[serde(rename = "page,omitempty")]
///     page: u32,
/// }
///
/// let q = Query { search: "rust lang".to_owned(), page: 0 };
///
/// let mut buffer = Vec::new();
/// urlquery::to_writer(&q, &mut buffer).unwrap();
/// assert_eq!(String::from_utf8(buffer).unwrap(), "q=rust+lang");
/// ```
pub fn to_writer<T: ser::Serialize + ?Sized, W: Write>(input: &T, writer: &mut W) -> Result<()> {
    let config = crate::Config::default();
    config.serialize_to_writer(input, writer)
}

/// Flattens a value into a multimap without encoding it.
pub fn to_values<T: ser::Serialize + ?Sized>(input: &T) -> Result<Values> {
    let config = crate::Config::default();
    config.serialize_values(input)
}

/// Lowers any `Serialize` type into a [`Value`] tree.
///
/// This never fails for the data itself: types without a query
/// representation become [`Value::Unsupported`]. Errors only come from
/// `Serialize` implementations that report one.
pub fn to_value<T: ser::Serialize + ?Sized>(input: &T) -> Result<Value> {
    input.serialize(ValueSerializer)
}

/// A serializer producing [`Value`] trees.
///
/// | serde data model              | value                    |
/// |-------------------------------|--------------------------|
/// | bool, integers, floats        | [`Value::Scalar`]        |
/// | char, str, unit variant       | [`Scalar::Str`]          |
/// | option                        | [`Value::Optional`]      |
/// | seq, tuple, tuple struct      | [`Value::Sequence`]      |
/// | map                           | [`Value::Map`]           |
/// | struct                        | [`Value::Record`]        |
/// | newtype struct                | the inner value          |
/// | everything else               | [`Value::Unsupported`]   |
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueSerializer;

macro_rules! serialize_scalar {
    (
        $($ty:ty => $meth:ident => $variant:ident as $as:ty,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                Ok(Value::Scalar(Scalar::$variant(v as $as)))
            }
        )*
    };
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = Discard<Value>;
    type SerializeMap = MapBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = Discard<Value>;

    serialize_scalar! {
        u8  => serialize_u8  => Uint as u64,
        u16 => serialize_u16 => Uint as u64,
        u32 => serialize_u32 => Uint as u64,
        u64 => serialize_u64 => Uint as u64,
        i8  => serialize_i8  => Int as i64,
        i16 => serialize_i16 => Int as i64,
        i32 => serialize_i32 => Int as i64,
        i64 => serialize_i64 => Int as i64,
        f32 => serialize_f32 => Float as f64,
        f64 => serialize_f64 => Float as f64,
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(Value::Scalar(Scalar::Bool(v)))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, _value: &[u8]) -> Result<Self::Ok> {
        Ok(Value::Unsupported)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(Value::Unsupported)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(Value::Record(Vec::new()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok> {
        Ok(Value::Unsupported)
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(Value::none())
    }

    fn serialize_some<T: ?Sized + ser::Serialize>(self, value: &T) -> Result<Self::Ok> {
        Ok(Value::some(value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqBuilder::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        Ok(SeqBuilder::with_capacity(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(SeqBuilder::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(Discard::new(Value::Unsupported))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapBuilder::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(RecordBuilder::with_capacity(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(Discard::new(Value::Unsupported))
    }
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: std::fmt::Display,
    {
        Error::Custom(msg.to_string())
    }
}

#[doc(hidden)]
pub struct SeqBuilder {
    items: Vec<Value>,
}

impl SeqBuilder {
    fn with_capacity(len: usize) -> Self {
        Self {
            items: Vec::with_capacity(len),
        }
    }

    fn push<T: ser::Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Value::Sequence(self.items))
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Value::Sequence(self.items))
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Value::Sequence(self.items))
    }
}

#[doc(hidden)]
pub struct MapBuilder {
    entries: Vec<(String, Value)>,
    // `Some(None)` marks a key that could not be rendered as a string;
    // its value is dropped.
    key: Option<Option<String>>,
}

impl MapBuilder {
    fn with_capacity(len: usize) -> Self {
        Self {
            entries: Vec::with_capacity(len),
            key: None,
        }
    }
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::Custom("map value serialized before its key".to_string()))?;
        let value = value.serialize(ValueSerializer)?;
        match key {
            Some(key) => self.entries.push((key, value)),
            None => tracing::trace!("dropping map entry with a non-scalar key"),
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Value::Map(self.entries))
    }
}

#[doc(hidden)]
pub struct RecordBuilder {
    fields: Vec<Field>,
}

impl RecordBuilder {
    fn with_capacity(len: usize) -> Self {
        Self {
            fields: Vec::with_capacity(len),
        }
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        // no declared identifier to fall back on once a field is renamed
        if key.split(',').next().is_none_or(str::is_empty) {
            tracing::trace!(field = key, "skipping field without a name");
            return Ok(());
        }
        let value = value.serialize(ValueSerializer)?;
        let inline = Tag::parse(key, key).has(tag::INLINE);
        self.fields
            .push(Field::new(key, value).tag(key).inline(inline));
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Value::Record(self.fields))
    }
}

/// Accepts and ignores every element, producing a fixed result.
///
/// Used for compound shapes that have no query representation, such as
/// enum variants carrying data or compound map keys.
#[doc(hidden)]
pub struct Discard<Ok> {
    ok: Ok,
}

impl<Ok> Discard<Ok> {
    pub(crate) fn new(ok: Ok) -> Self {
        Self { ok }
    }
}

impl<Ok> ser::SerializeSeq for Discard<Ok> {
    type Ok = Ok;
    type Error = Error;

    fn serialize_element<T: ser::Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Ok> {
        Ok(self.ok)
    }
}

impl<Ok> ser::SerializeTuple for Discard<Ok> {
    type Ok = Ok;
    type Error = Error;

    fn serialize_element<T: ser::Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Ok> {
        Ok(self.ok)
    }
}

impl<Ok> ser::SerializeTupleStruct for Discard<Ok> {
    type Ok = Ok;
    type Error = Error;

    fn serialize_field<T: ser::Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Ok> {
        Ok(self.ok)
    }
}

impl<Ok> ser::SerializeTupleVariant for Discard<Ok> {
    type Ok = Ok;
    type Error = Error;

    fn serialize_field<T: ser::Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Ok> {
        Ok(self.ok)
    }
}

impl<Ok> ser::SerializeMap for Discard<Ok> {
    type Ok = Ok;
    type Error = Error;

    fn serialize_key<T: ser::Serialize + ?Sized>(&mut self, _key: &T) -> Result<()> {
        Ok(())
    }

    fn serialize_value<T: ser::Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Ok> {
        Ok(self.ok)
    }
}

impl<Ok> ser::SerializeStruct for Discard<Ok> {
    type Ok = Ok;
    type Error = Error;

    fn serialize_field<T: ser::Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Ok> {
        Ok(self.ok)
    }
}

impl<Ok> ser::SerializeStructVariant for Discard<Ok> {
    type Ok = Ok;
    type Error = Error;

    fn serialize_field<T: ser::Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Ok> {
        Ok(self.ok)
    }
}
