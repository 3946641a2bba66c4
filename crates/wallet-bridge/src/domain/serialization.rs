//! Transport-safe JSON encoding.
//!
//! The host parses envelopes with an IEEE-754 double number type, so any
//! integer beyond ±(2^53 − 1) would silently lose digits. While encoding,
//! every such integer is written as its exact decimal string instead. This
//! covers `u64`/`i64` as well as `u128`/`i128`, which never pass through a
//! [`Value`] tree. Everything else (strings, booleans, floats, nulls, safe
//! integers, empty containers) is left as is, and key order is preserved.

use crate::error::BridgeError;
use primitive_types::U256;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter};
use serde_json::{Number, Value};
use std::io;

/// Largest integer the host can represent exactly (2^53 − 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Encode `value` as lossless JSON text.
pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<String, BridgeError> {
    let mut buffer = Vec::with_capacity(128);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, LosslessFormatter::default());
    value.serialize(&mut serializer)?;

    String::from_utf8(buffer)
        .map_err(|e| BridgeError::Serialization(serde::ser::Error::custom(e)))
}

/// Rewrite every unsafe integer in `value` into its decimal string.
///
/// Pure tree form of what [`serialize`] does while writing.
#[must_use]
pub fn make_lossless(value: Value) -> Value {
    match value {
        Value::Number(number) => match unsafe_integer_text(&number) {
            Some(text) => Value::String(text),
            None => Value::Number(number),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(make_lossless).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, make_lossless(value)))
                .collect(),
        ),
        other => other,
    }
}

/// JSON value for an integer wider than 64 bits, as a decimal string.
///
/// Accepts anything convertible into `U256` (`u128`, `u64`, ...).
pub fn big_integer(value: impl Into<U256>) -> Value {
    Value::String(value.into().to_string())
}

fn unsafe_integer_text(number: &Number) -> Option<String> {
    if let Some(unsigned) = number.as_u64() {
        return (unsigned > MAX_SAFE_INTEGER).then(|| unsigned.to_string());
    }
    if let Some(signed) = number.as_i64() {
        return (signed.unsigned_abs() > MAX_SAFE_INTEGER).then(|| signed.to_string());
    }
    // floating point
    None
}

/// Compact JSON formatter that quotes integers outside the safe range.
///
/// Integer map keys are already written inside quotes, so they are left
/// alone.
#[derive(Default)]
struct LosslessFormatter {
    in_string: bool,
}

impl LosslessFormatter {
    fn write_integer<W>(&mut self, writer: &mut W, magnitude: u128, text: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.in_string || magnitude <= u128::from(MAX_SAFE_INTEGER) {
            return writer.write_all(text.as_bytes());
        }
        writer.write_all(b"\"")?;
        writer.write_all(text.as_bytes())?;
        writer.write_all(b"\"")
    }
}

impl Formatter for LosslessFormatter {
    fn begin_string<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.in_string = true;
        CompactFormatter.begin_string(writer)
    }

    fn end_string<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.in_string = false;
        CompactFormatter.end_string(writer)
    }

    fn write_i64<W>(&mut self, writer: &mut W, value: i64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_integer(writer, u128::from(value.unsigned_abs()), &value.to_string())
    }

    fn write_u64<W>(&mut self, writer: &mut W, value: u64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_integer(writer, u128::from(value), &value.to_string())
    }

    fn write_i128<W>(&mut self, writer: &mut W, value: i128) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_integer(writer, value.unsigned_abs(), &value.to_string())
    }

    fn write_u128<W>(&mut self, writer: &mut W, value: u128) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_integer(writer, value, &value.to_string())
    }
}
