//! brisk-json — a general-purpose JSON codec over a dynamically typed
//! [`Value`] tree.
//!
//! Two independent pipelines share the value model:
//! - [`parse`] turns JSON text into a [`Value`] tree.
//! - [`to_string`] / [`to_writer`] (and their `_pretty` variants) render a
//!   [`Value`] tree — or any native [`ToJson`] value — as JSON text, fully
//!   in memory or streamed incrementally to a caller-supplied sink.
//!
//! Both pipelines are pure, synchronous computations with no shared state:
//! concurrent calls are safe by construction, as long as a single sink is
//! not handed to two `to_writer` calls at once.
//!
//! ```
//! use brisk_json::Value;
//!
//! let value = brisk_json::parse(r#"{"message": "Hello, World!"}"#)?;
//! assert_eq!(value.get("message").and_then(Value::as_str), Some("Hello, World!"));
//! assert_eq!(brisk_json::to_string(&value)?, r#"{"message":"Hello, World!"}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod encoder;
mod error;
mod parser;
mod scanner;
mod to_json;
mod value;

pub use encoder::JsonEncoder;
pub use error::{ParseError, WriteError};
pub use parser::JsonParser;
pub use scanner::{Scanner, Token};
pub use to_json::ToJson;
pub use value::Value;

use std::io;

use brisk_buffers::Writer;

/// Parses one JSON document into a [`Value`] tree.
///
/// The whole input must hold exactly one value; anything but whitespace
/// after it is [`ParseError::TrailingContent`]. Errors carry the byte
/// offset of the failure, and no partial tree is ever returned.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    JsonParser::new(text).parse()
}

/// Serializes a value as compact JSON: no whitespace at all.
pub fn to_string<T: ToJson + ?Sized>(value: &T) -> Result<String, WriteError> {
    encode_to_string(value, false)
}

/// Serializes a value as pretty JSON: two-space indentation, one line per
/// element, a space after each `:`.
pub fn to_string_pretty<T: ToJson + ?Sized>(value: &T) -> Result<String, WriteError> {
    encode_to_string(value, true)
}

/// Streams a value as compact JSON into `sink`, bounding peak memory for
/// large payloads. Sink errors propagate unchanged.
pub fn to_writer<T: ToJson + ?Sized, W: io::Write>(value: &T, sink: W) -> Result<(), WriteError> {
    JsonEncoder::new(sink).encode(value)
}

/// Streams a value as pretty JSON into `sink`.
pub fn to_writer_pretty<T: ToJson + ?Sized, W: io::Write>(
    value: &T,
    sink: W,
) -> Result<(), WriteError> {
    JsonEncoder::pretty(sink).encode(value)
}

fn encode_to_string<T: ToJson + ?Sized>(value: &T, pretty: bool) -> Result<String, WriteError> {
    let mut encoder = if pretty {
        JsonEncoder::pretty(Writer::new())
    } else {
        JsonEncoder::new(Writer::new())
    };
    encoder.encode(value)?;
    let bytes = encoder.into_inner().flush();
    Ok(String::from_utf8(bytes).expect("the encoder only emits UTF-8"))
}
