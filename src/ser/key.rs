use serde::ser;

use super::Discard;
use crate::error::{Error, Result};
use crate::format;

macro_rules! serialize_key_itoa {
    (
        $($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                let mut buffer = itoa::Buffer::new();
                Ok(Some(buffer.format(v).to_owned()))
            }
        )*
    };
}

/// Renders map keys as strings.
///
/// Keys without a string form (sequences, structs, options, units...)
/// produce `None`, and the entry is dropped by the caller.
pub(super) struct KeySerializer;

impl ser::Serializer for KeySerializer {
    type Ok = Option<String>;
    type Error = Error;
    type SerializeSeq = Discard<Self::Ok>;
    type SerializeTuple = Discard<Self::Ok>;
    type SerializeTupleStruct = Discard<Self::Ok>;
    type SerializeTupleVariant = Discard<Self::Ok>;
    type SerializeMap = Discard<Self::Ok>;
    type SerializeStruct = Discard<Self::Ok>;
    type SerializeStructVariant = Discard<Self::Ok>;

    serialize_key_itoa! {
        u8  => serialize_u8,
        u16 => serialize_u16,
        u32 => serialize_u32,
        u64 => serialize_u64,
        i8  => serialize_i8,
        i16 => serialize_i16,
        i32 => serialize_i32,
        i64 => serialize_i64,
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        Ok(Some(format::float(f64::from(v))))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Ok(Some(format::float(v)))
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(Some(if v { "true" } else { "false" }.to_owned()))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Some(v.to_owned()))
    }

    fn serialize_bytes(self, _value: &[u8]) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(variant.to_owned()))
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
        Ok(None)
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T: ?Sized + ser::Serialize>(self, _value: &T) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(Discard::new(None))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(Discard::new(None))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(Discard::new(None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(Discard::new(None))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(Discard::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(Discard::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(Discard::new(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn key<T: Serialize + ?Sized>(v: &T) -> Option<String> {
        v.serialize(KeySerializer).unwrap()
    }

    #[test]
    fn scalar_keys() {
        assert_eq!(key("name").as_deref(), Some("name"));
        assert_eq!(key(&-12i32).as_deref(), Some("-12"));
        assert_eq!(key(&7u64).as_deref(), Some("7"));
        assert_eq!(key(&true).as_deref(), Some("true"));
        assert_eq!(key(&1.5f64).as_deref(), Some("1.5"));
        assert_eq!(key(&2.0f32).as_deref(), Some("2"));
        assert_eq!(key(&'k').as_deref(), Some("k"));
    }

    #[test]
    fn compound_keys_are_dropped() {
        assert_eq!(key(&(1, 2)), None);
        assert_eq!(key(&vec![1]), None);
        assert_eq!(key(&()), None);
        assert_eq!(key(&Some("x")), None);
    }
}
