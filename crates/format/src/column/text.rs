// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	column::ColumnCodec,
	error::Result,
	model::Value,
	primitive::{Decode, Encode},
	stream::{ReadStream, WriteStream},
};

impl ColumnCodec {
	pub(super) fn write_utf8<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_string(""),
			Some(Value::Utf8(v)) => stream.put_string(v),
			Some(other) => Err(self.mismatch(other)),
		}
	}

	/// ASCII text must fill the column exactly.
	pub(super) fn write_fixed_string<W: WriteStream + ?Sized>(
		&mut self,
		stream: &mut W,
		value: Option<&Value>,
	) -> Result<()> {
		match value {
			None => self.scratch.fill(0),
			Some(Value::Utf8(v)) => {
				if !v.is_ascii() {
					return Err(self.invalid("fixed length string is not ASCII"));
				}
				if v.len() != self.scratch.len() {
					return Err(self.invalid(format!(
						"fixed length string did not fill the buffer, expected {} bytes, got {}",
						self.scratch.len(),
						v.len()
					)));
				}
				self.scratch.copy_from_slice(v.as_bytes());
			}
			Some(other) => return Err(self.mismatch(other)),
		}
		stream.put_fixed_bytes(&self.scratch)
	}

	pub(super) fn read_fixed_string<R: ReadStream + ?Sized>(&mut self, stream: &mut R) -> Result<Value> {
		stream.get_fixed_bytes(&mut self.scratch)?;
		// Null placeholders are all zero bytes and still decode.
		Ok(Value::Utf8(self.scratch.iter().map(|&b| if b.is_ascii() { b as char } else { '?' }).collect()))
	}
}

#[cfg(test)]
pub mod tests {
	use crate::{
		column::{
			CodecKind, ColumnCodec,
			tests::{encoded, roundtrip},
		},
		error::FormatError,
		model::{ColumnFlags, Value},
	};

	#[test]
	fn test_utf8_roundtrip() {
		let mut codec = ColumnCodec::new("name", CodecKind::Utf8, ColumnFlags::empty());
		let long = "x".repeat(5000);
		for text in ["", "plain", "ünïcödé ✓", long.as_str()] {
			assert_eq!(roundtrip(&mut codec, Some(&Value::from(text))), Value::from(text));
		}
	}

	#[test]
	fn test_utf8_null_placeholder_is_empty() {
		let mut codec = ColumnCodec::new("name", CodecKind::Utf8, ColumnFlags::NULLABLE);
		assert_eq!(encoded(&mut codec, None), vec![0, 0, 0, 0]);
	}

	#[test]
	fn test_fixed_string_roundtrip() {
		let mut codec = ColumnCodec::new("code", CodecKind::FixedString(4), ColumnFlags::empty());
		assert_eq!(encoded(&mut codec, Some(&Value::from("ABCD"))), b"ABCD".to_vec());
		assert_eq!(roundtrip(&mut codec, Some(&Value::from("WXYZ"))), Value::from("WXYZ"));
	}

	#[test]
	fn test_fixed_string_must_fill_buffer() {
		let mut codec = ColumnCodec::new("code", CodecKind::FixedString(4), ColumnFlags::empty());
		let mut out = std::io::Cursor::new(Vec::new());
		assert!(matches!(codec.write(&mut out, Some(&Value::from("ABC"))), Err(FormatError::InvalidValue { .. })));
		assert!(matches!(codec.write(&mut out, Some(&Value::from("ABCDE"))), Err(FormatError::InvalidValue { .. })));
	}

	#[test]
	fn test_fixed_string_rejects_non_ascii() {
		let mut codec = ColumnCodec::new("code", CodecKind::FixedString(2), ColumnFlags::empty());
		let mut out = std::io::Cursor::new(Vec::new());
		assert!(matches!(codec.write(&mut out, Some(&Value::from("é"))), Err(FormatError::InvalidValue { .. })));
	}

	#[test]
	fn test_fixed_string_null_is_zero_filled() {
		let mut codec = ColumnCodec::new("code", CodecKind::FixedString(3), ColumnFlags::ABSENT_WHEN_NULL);
		assert_eq!(encoded(&mut codec, None), vec![0, 0, 0]);
	}
}
