//! `JsonEncoder` — renders accepted values as JSON text on any byte sink.
//!
//! One encoder serves both output modes: the in-memory operations run it
//! over a [`brisk_buffers::Writer`], the streaming operations over the
//! caller's own `io::Write` sink. Pretty and compact styles differ only in
//! the whitespace this type emits around structural characters.

use std::io::Write;

use crate::error::WriteError;
use crate::to_json::ToJson;
use crate::value::Value;

const INDENT: &[u8] = b"  ";

/// Streaming JSON writer over an `io::Write` sink.
pub struct JsonEncoder<W: Write> {
    sink: W,
    pretty: bool,
    depth: usize,
}

impl<W: Write> JsonEncoder<W> {
    /// Creates a compact-style encoder: no whitespace at all.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            pretty: false,
            depth: 0,
        }
    }

    /// Creates a pretty-style encoder: newline plus two-space indentation
    /// after every `{`, `[` and `,`, and a space after every `:`.
    pub fn pretty(sink: W) -> Self {
        Self {
            sink,
            pretty: true,
            depth: 0,
        }
    }

    /// Renders one value onto the sink.
    pub fn encode<T: ToJson + ?Sized>(&mut self, value: &T) -> Result<(), WriteError> {
        value.write_json(self)
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Exhaustive rendering of a [`Value`] tree.
    pub fn write_any(&mut self, value: &Value) -> Result<(), WriteError> {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_bool(*b),
            Value::Integer(i) => self.write_integer(*i),
            Value::Float(f) => self.write_float(*f),
            Value::Str(s) => self.write_str(s),
            Value::Array(items) => self.write_seq(items),
            Value::Object(map) => self.write_map(map.iter().map(|(k, v)| (k.as_str(), v))),
        }
    }

    pub fn write_null(&mut self) -> Result<(), WriteError> {
        self.sink.write_all(b"null")?;
        Ok(())
    }

    pub fn write_bool(&mut self, b: bool) -> Result<(), WriteError> {
        self.sink.write_all(if b { b"true" } else { b"false" })?;
        Ok(())
    }

    pub fn write_integer(&mut self, int: i64) -> Result<(), WriteError> {
        self.sink.write_all(int.to_string().as_bytes())?;
        Ok(())
    }

    pub fn write_uinteger(&mut self, uint: u64) -> Result<(), WriteError> {
        self.sink.write_all(uint.to_string().as_bytes())?;
        Ok(())
    }

    /// Writes the shortest decimal form that parses back to the identical
    /// `f64`. The form always carries a `.` or an exponent, so it re-parses
    /// as a float, never an integer.
    pub fn write_float(&mut self, float: f64) -> Result<(), WriteError> {
        if !float.is_finite() {
            return Err(WriteError::UnsupportedType(float_shape(float)));
        }
        self.sink.write_all(format!("{float:?}").as_bytes())?;
        Ok(())
    }

    /// Single-precision counterpart of [`JsonEncoder::write_float`]; the
    /// rendered digits are the shortest form for the `f32` itself.
    pub fn write_float32(&mut self, float: f32) -> Result<(), WriteError> {
        if !float.is_finite() {
            return Err(WriteError::UnsupportedType(float_shape(f64::from(float))));
        }
        self.sink.write_all(format!("{float:?}").as_bytes())?;
        Ok(())
    }

    /// Writes a quoted string, escaping `"`, `\` and control characters
    /// with the same escape set the parser decodes.
    pub fn write_str(&mut self, s: &str) -> Result<(), WriteError> {
        self.sink.write_all(b"\"")?;
        let bytes = s.as_bytes();
        let mut run = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if b != b'"' && b != b'\\' && b >= 0x20 {
                continue;
            }
            self.sink.write_all(&bytes[run..i])?;
            match b {
                b'"' => self.sink.write_all(b"\\\"")?,
                b'\\' => self.sink.write_all(b"\\\\")?,
                0x08 => self.sink.write_all(b"\\b")?,
                0x0C => self.sink.write_all(b"\\f")?,
                b'\n' => self.sink.write_all(b"\\n")?,
                b'\r' => self.sink.write_all(b"\\r")?,
                b'\t' => self.sink.write_all(b"\\t")?,
                other => write!(self.sink, "\\u{:04x}", other)?,
            }
            run = i + 1;
        }
        self.sink.write_all(&bytes[run..])?;
        self.sink.write_all(b"\"")?;
        Ok(())
    }

    /// Writes an ordered sequence as `[...]`.
    pub fn write_seq<T: ToJson>(&mut self, items: &[T]) -> Result<(), WriteError> {
        if items.is_empty() {
            self.sink.write_all(b"[]")?;
            return Ok(());
        }
        self.sink.write_all(b"[")?;
        self.depth += 1;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }
            self.break_line()?;
            item.write_json(self)?;
        }
        self.depth -= 1;
        self.break_line()?;
        self.sink.write_all(b"]")?;
        Ok(())
    }

    /// Writes a key-to-value mapping as `{...}` in the mapping's own
    /// iteration order.
    pub fn write_map<'v, T: ToJson + 'v>(
        &mut self,
        entries: impl ExactSizeIterator<Item = (&'v str, &'v T)>,
    ) -> Result<(), WriteError> {
        if entries.len() == 0 {
            self.sink.write_all(b"{}")?;
            return Ok(());
        }
        self.sink.write_all(b"{")?;
        self.depth += 1;
        for (i, (key, value)) in entries.enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }
            self.break_line()?;
            self.write_str(key)?;
            self.sink
                .write_all(if self.pretty { b": " } else { b":" })?;
            value.write_json(self)?;
        }
        self.depth -= 1;
        self.break_line()?;
        self.sink.write_all(b"}")?;
        Ok(())
    }

    fn break_line(&mut self) -> Result<(), WriteError> {
        if self.pretty {
            self.sink.write_all(b"\n")?;
            for _ in 0..self.depth {
                self.sink.write_all(INDENT)?;
            }
        }
        Ok(())
    }
}

fn float_shape(f: f64) -> &'static str {
    if f.is_nan() {
        "a NaN float"
    } else {
        "an infinite float"
    }
}
