//! The closed set of native shapes the serializer accepts.
//!
//! Each accepted shape maps onto one encoder write path through an explicit
//! impl. Adding a shape means adding an impl here; there is no reflective
//! fallback, so a type outside the set is rejected when the caller's code is
//! compiled rather than when it runs.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use indexmap::IndexMap;

use crate::encoder::JsonEncoder;
use crate::error::WriteError;
use crate::value::Value;

/// A native value the serializer can render without going through a
/// [`Value`] tree.
///
/// Accepted shapes: absence of a value (`()`, `Option::None`), booleans,
/// fixed-width integers up to 64 bits, floats, text, ordered sequences of
/// accepted values, and string-keyed mappings to accepted values.
pub trait ToJson {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError>;
}

impl ToJson for Value {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_any(self)
    }
}

impl ToJson for () {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_null()
    }
}

impl ToJson for bool {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_bool(*self)
    }
}

macro_rules! to_json_signed {
    ($($t:ty)*) => {
        $(
            impl ToJson for $t {
                fn write_json<W: Write>(
                    &self,
                    encoder: &mut JsonEncoder<W>,
                ) -> Result<(), WriteError> {
                    encoder.write_integer(*self as i64)
                }
            }
        )*
    };
}

macro_rules! to_json_unsigned {
    ($($t:ty)*) => {
        $(
            impl ToJson for $t {
                fn write_json<W: Write>(
                    &self,
                    encoder: &mut JsonEncoder<W>,
                ) -> Result<(), WriteError> {
                    encoder.write_uinteger(*self as u64)
                }
            }
        )*
    };
}

to_json_signed!(i8 i16 i32 i64 isize);
to_json_unsigned!(u8 u16 u32 u64 usize);

impl ToJson for f32 {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_float32(*self)
    }
}

impl ToJson for f64 {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_float(*self)
    }
}

impl ToJson for str {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_str(self)
    }
}

impl ToJson for String {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_str(self)
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        (**self).write_json(encoder)
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        (**self).write_json(encoder)
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        match self {
            Some(value) => value.write_json(encoder),
            None => encoder.write_null(),
        }
    }
}

impl<T: ToJson> ToJson for [T] {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_seq(self)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_seq(self)
    }
}

impl<T: ToJson> ToJson for HashMap<String, T> {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_map(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl<T: ToJson> ToJson for BTreeMap<String, T> {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_map(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl<T: ToJson> ToJson for IndexMap<String, T> {
    fn write_json<W: Write>(&self, encoder: &mut JsonEncoder<W>) -> Result<(), WriteError> {
        encoder.write_map(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}
