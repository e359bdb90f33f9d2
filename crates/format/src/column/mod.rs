// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Per-type column codecs.
//!
//! Every codec aligns the stream itself before its value. Null handling is
//! split with the row codec: the row codec skips omitted nulls entirely, the
//! column codec writes a placeholder for any other null.

mod bytes;
mod decimal;
mod descriptor;
mod float;
mod guid;
mod integer;
mod order;
mod temporal;
mod text;
mod validate;

pub use order::{packing_order, sort_for_packing};
pub use temporal::{TICKS_PER_SECOND, datetime_from_ticks, datetime_to_ticks, ticks_to_time, time_to_ticks};
pub use validate::{validate, validate_against};

use crate::{
	decimal::DecimalPacker,
	error::{FormatError, Result},
	model::{Classification, ColumnDataType, ColumnFlags, Value, ValueKind},
	primitive::{Decode, Encode},
	stream::{ReadStream, WriteStream},
};

/// Widest fixed-length string or byte column accepted.
pub const MAX_FIXED_LENGTH: usize = 8000;

/// Widest decimal buffer accepted from a persisted descriptor.
pub const MAX_DECIMAL_BYTES: usize = 32;

/// On-disk representation chosen for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
	Boolean,
	UnsignedInt8,
	Int16,
	Int32,
	Int64,
	Float32,
	Float64,
	Decimal(DecimalPacker),
	Utf8,
	Bytes,
	/// ASCII text filling exactly this many bytes.
	FixedString(usize),
	FixedBytes(usize),
	Guid,
	Time,
	DateTime,
	DateTimeOffset,
}

impl CodecKind {
	pub fn data_type(&self) -> ColumnDataType {
		match self {
			CodecKind::Boolean | CodecKind::UnsignedInt8 => ColumnDataType::UnsignedInteger,
			CodecKind::Int16 | CodecKind::Int32 | CodecKind::Int64 => ColumnDataType::SignedInteger,
			CodecKind::Float32 | CodecKind::Float64 => ColumnDataType::FloatingPoint,
			CodecKind::Decimal(_) => ColumnDataType::DecimalFloatingPoint,
			CodecKind::Utf8 => ColumnDataType::String,
			CodecKind::Bytes => ColumnDataType::VariableLengthBytes,
			CodecKind::FixedString(_) => ColumnDataType::FixedLengthString,
			CodecKind::FixedBytes(_) => ColumnDataType::FixedLengthBytes,
			CodecKind::Guid => ColumnDataType::Guid,
			CodecKind::Time => ColumnDataType::Time,
			CodecKind::DateTime => ColumnDataType::DateTime,
			CodecKind::DateTimeOffset => ColumnDataType::DateTimeOffset,
		}
	}

	/// Fixed byte width, or `-1` for variable-length kinds.
	pub fn length(&self) -> i32 {
		match self {
			CodecKind::Boolean | CodecKind::UnsignedInt8 => 1,
			CodecKind::Int16 => 2,
			CodecKind::Int32 | CodecKind::Float32 => 4,
			CodecKind::Int64 | CodecKind::Float64 => 8,
			CodecKind::Decimal(packer) => packer.byte_count() as i32,
			CodecKind::Utf8 | CodecKind::Bytes => -1,
			CodecKind::FixedString(n) | CodecKind::FixedBytes(n) => i32::try_from(*n).unwrap_or(i32::MAX),
			CodecKind::Guid => 16,
			CodecKind::Time | CodecKind::DateTime => 8,
			CodecKind::DateTimeOffset => 12,
		}
	}

	/// Alignment applied before each value.
	pub fn alignment(&self) -> u64 {
		match self {
			CodecKind::Boolean | CodecKind::UnsignedInt8 => 1,
			CodecKind::Int16 => 2,
			CodecKind::Guid => 8,
			_ => 4,
		}
	}

	pub fn value_kind(&self) -> ValueKind {
		match self {
			CodecKind::Boolean => ValueKind::Boolean,
			CodecKind::UnsignedInt8 => ValueKind::Uint1,
			CodecKind::Int16 => ValueKind::Int2,
			CodecKind::Int32 => ValueKind::Int4,
			CodecKind::Int64 => ValueKind::Int8,
			CodecKind::Float32 => ValueKind::Float4,
			CodecKind::Float64 => ValueKind::Float8,
			CodecKind::Decimal(_) => ValueKind::Decimal,
			CodecKind::Utf8 | CodecKind::FixedString(_) => ValueKind::Utf8,
			CodecKind::Bytes | CodecKind::FixedBytes(_) => ValueKind::Blob,
			CodecKind::Guid => ValueKind::Uuid,
			CodecKind::Time => ValueKind::Time,
			CodecKind::DateTime => ValueKind::DateTime,
			CodecKind::DateTimeOffset => ValueKind::DateTimeOffset,
		}
	}
}

/// Codec for one column. Built once per table and reused for every row;
/// the scratch buffer is private to the instance.
#[derive(Debug, Clone)]
pub struct ColumnCodec {
	name: String,
	kind: CodecKind,
	flags: ColumnFlags,
	scratch: Vec<u8>,
}

impl PartialEq for ColumnCodec {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name && self.kind == other.kind && self.flags == other.flags
	}
}

impl ColumnCodec {
	/// Only the persisted subset of `flags` is kept.
	pub fn new(name: impl Into<String>, kind: CodecKind, flags: ColumnFlags) -> Self {
		let scratch = match kind {
			CodecKind::Decimal(packer) => packer.create_buffer(),
			CodecKind::FixedString(n) | CodecKind::FixedBytes(n) => vec![0; n],
			_ => Vec::new(),
		};
		Self {
			name: name.into(),
			kind,
			flags: flags.known(),
			scratch,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> CodecKind {
		self.kind
	}

	pub fn flags(&self) -> ColumnFlags {
		self.flags
	}

	pub fn data_type(&self) -> ColumnDataType {
		self.kind.data_type()
	}

	pub fn length(&self) -> i32 {
		self.kind.length()
	}

	pub fn classification(&self) -> Classification {
		self.data_type().classify()
	}

	pub fn value_kind(&self) -> ValueKind {
		self.kind.value_kind()
	}

	pub fn write<W: WriteStream + ?Sized>(&mut self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		stream.align_write(self.kind.alignment())?;
		match self.kind {
			CodecKind::Boolean => self.write_boolean(stream, value),
			CodecKind::UnsignedInt8 => self.write_uint1(stream, value),
			CodecKind::Int16 => self.write_int2(stream, value),
			CodecKind::Int32 => self.write_int4(stream, value),
			CodecKind::Int64 => self.write_int8(stream, value),
			CodecKind::Float32 => self.write_float4(stream, value),
			CodecKind::Float64 => self.write_float8(stream, value),
			CodecKind::Decimal(packer) => self.write_decimal(stream, packer, value),
			CodecKind::Utf8 => self.write_utf8(stream, value),
			CodecKind::Bytes => self.write_bytes(stream, value),
			CodecKind::FixedString(_) => self.write_fixed_string(stream, value),
			CodecKind::FixedBytes(_) => self.write_fixed_bytes(stream, value),
			CodecKind::Guid => self.write_guid(stream, value),
			CodecKind::Time => self.write_time(stream, value),
			CodecKind::DateTime => self.write_datetime(stream, value),
			CodecKind::DateTimeOffset => self.write_datetime_offset(stream, value),
		}
	}

	/// Decode one value. A null placeholder decodes like any other value;
	/// the caller applies the row's null bitmap.
	pub fn read<R: ReadStream + ?Sized>(&mut self, stream: &mut R) -> Result<Value> {
		stream.align_read(self.kind.alignment())?;
		match self.kind {
			CodecKind::Boolean => Ok(Value::Boolean(stream.get_u8()? != 0)),
			CodecKind::UnsignedInt8 => Ok(Value::Uint1(stream.get_u8()?)),
			CodecKind::Int16 => Ok(Value::Int2(stream.get_i16()?)),
			CodecKind::Int32 => Ok(Value::Int4(stream.get_i32()?)),
			CodecKind::Int64 => Ok(Value::Int8(stream.get_i64()?)),
			CodecKind::Float32 => Ok(Value::Float4(stream.get_f32()?)),
			CodecKind::Float64 => Ok(Value::Float8(stream.get_f64()?)),
			CodecKind::Decimal(packer) => self.read_decimal(stream, packer),
			CodecKind::Utf8 => Ok(Value::Utf8(stream.get_string()?)),
			CodecKind::Bytes => Ok(Value::Blob(stream.get_bytes()?)),
			CodecKind::FixedString(_) => self.read_fixed_string(stream),
			CodecKind::FixedBytes(_) => self.read_fixed_bytes(stream),
			CodecKind::Guid => Ok(Value::Uuid(stream.get_guid()?)),
			CodecKind::Time => self.read_time(stream),
			CodecKind::DateTime => self.read_datetime(stream),
			CodecKind::DateTimeOffset => self.read_datetime_offset(stream),
		}
	}

	fn mismatch(&self, value: &Value) -> FormatError {
		FormatError::InvalidValue {
			column: self.name.clone(),
			reason: format!("expected {}, found {}", self.value_kind(), value.kind()),
		}
	}

	fn invalid(&self, reason: impl Into<String>) -> FormatError {
		FormatError::InvalidValue {
			column: self.name.clone(),
			reason: reason.into(),
		}
	}
}
