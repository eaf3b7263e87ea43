//! Flatten structured values into URL querystrings
//!
//! Querystrings have no native nesting. This library walks a record and
//! writes every leaf under a dotted key path:
//!
//! ```text
//! id=42&address.city=Carrot+City&user_ids=1&user_ids=2
//! ```
//!
//! Each field's key and behaviour is controlled by a _tag_ of the form
//! `name[,opt1[,opt2...]]`:
//!
//! * an empty name keeps the field's declared name,
//! * the name `-` skips the field,
//! * `omitempty` drops scalar fields holding an empty value (`""`, `0`,
//!   `false`, `0.0`).
//!
//! ## Supported Types
//!
//! At the **top level**, `urlquery` only supports records (structs), or a
//! present reference to one. Anything else is rejected with
//! [`Error::InvalidInput`].
//!
//! Below the top level:
//!
//! * scalars (strings, integers, booleans, floats) produce one value,
//! * sequences of scalars produce one value per element under the same
//!   key, and nothing at all when empty,
//! * absent optionals drop their whole subtree,
//! * nested records and maps add one key segment per field or entry,
//! * anything else is silently left out.
//!
//! ## Usage
//!
//! Any `Serialize` type works. Struct field names are read as tags, so
//! renaming a field to `"name,omitempty"` sets both its key and its options.
//! The option `inline` promotes the fields of a nested struct into its
//! parent. The name segment has to be written out: a field renamed to
//! `",omitempty"` has no name to fall back on and is dropped.
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Address {
//!     city: String,
//!     postcode: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Paging {
//!     #[serde(rename = "limit,omitempty")]
//!     limit: u32,
//!     #[serde(rename = "offset,omitempty")]
//!     offset: u32,
//! }
//!
//! #[derive(Serialize)]
//! struct QueryParams {
//!     id: u8,
//!     name: String,
//!     address: Address,
//!     user_ids: Vec<u8>,
//!     #[serde(rename = "paging,inline")]
//!     paging: Paging,
//!     #[serde(rename = "-")]
//!     secret: String,
//! }
//!
//! let params = QueryParams {
//!     id: 42,
//!     name: "Acme".to_string(),
//!     address: Address {
//!         city: "Carrot City".to_string(),
//!         postcode: "12345".to_string(),
//!     },
//!     user_ids: vec![1, 2, 3],
//!     paging: Paging { limit: 10, offset: 0 },
//!     secret: "hunter2".to_string(),
//! };
//!
//! assert_eq!(
//!     urlquery::to_string(&params).unwrap(),
//!     "address.city=Carrot+City&address.postcode=12345&id=42&limit=10&\
//!      name=Acme&user_ids=1&user_ids=2&user_ids=3"
//! );
//! ```
//!
//! Types that need more control, such as private fields, can describe
//! themselves by implementing [`Record`] and go through [`marshal`].

mod config;
mod error;
mod flatten;
pub mod format;
mod ser;
mod tag;
mod value;
mod values;

#[doc(inline)]
pub use config::{Config, EncodeSet};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use flatten::Flattener;
#[doc(inline)]
pub use ser::{ValueSerializer, to_bytes, to_string, to_value, to_values, to_writer};
#[doc(inline)]
pub use tag::{INLINE, OMIT_EMPTY, SKIP, Tag};
#[doc(inline)]
pub use value::{Field, Record, Scalar, Value};
#[doc(inline)]
pub use values::Values;

/// Flattens a record [`Value`] and encodes it as querystring bytes.
///
/// ```
/// use urlquery::{Field, Value};
///
/// let value = Value::Record(vec![
///     Field::new("Ints", vec![-1, -3, -5]).tag("ints"),
///     Field::new("Empty", Vec::<i32>::new()).tag("empty"),
/// ]);
/// assert_eq!(urlquery::marshal(&value).unwrap(), b"ints=-1&ints=-3&ints=-5");
///
/// assert!(urlquery::marshal(&Value::from(42)).unwrap_err().is_invalid_input());
/// ```
pub fn marshal(value: &Value) -> Result<Vec<u8>> {
    Config::default().marshal(value)
}

/// Flattens a record [`Value`] into a multimap without encoding it.
pub fn marshal_values(value: &Value) -> Result<Values> {
    Config::default().marshal_values(value)
}
