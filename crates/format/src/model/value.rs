// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use uuid::Uuid;

/// A single non-null column value. Nulls are carried as `Option<Value>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Boolean(bool),
	Uint1(u8),
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Float4(f32),
	Float8(f64),
	Decimal(BigDecimal),
	Utf8(String),
	Blob(Vec<u8>),
	Uuid(Uuid),
	/// Time of day or elapsed interval.
	Time(TimeDelta),
	DateTime(NaiveDateTime),
	DateTimeOffset(DateTime<FixedOffset>),
}

/// Runtime type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	Boolean,
	Uint1,
	Int2,
	Int4,
	Int8,
	Float4,
	Float8,
	Decimal,
	Utf8,
	Blob,
	Uuid,
	Time,
	DateTime,
	DateTimeOffset,
}

impl Value {
	pub fn kind(&self) -> ValueKind {
		match self {
			Value::Boolean(_) => ValueKind::Boolean,
			Value::Uint1(_) => ValueKind::Uint1,
			Value::Int2(_) => ValueKind::Int2,
			Value::Int4(_) => ValueKind::Int4,
			Value::Int8(_) => ValueKind::Int8,
			Value::Float4(_) => ValueKind::Float4,
			Value::Float8(_) => ValueKind::Float8,
			Value::Decimal(_) => ValueKind::Decimal,
			Value::Utf8(_) => ValueKind::Utf8,
			Value::Blob(_) => ValueKind::Blob,
			Value::Uuid(_) => ValueKind::Uuid,
			Value::Time(_) => ValueKind::Time,
			Value::DateTime(_) => ValueKind::DateTime,
			Value::DateTimeOffset(_) => ValueKind::DateTimeOffset,
		}
	}
}

impl Display for ValueKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let name = match self {
			ValueKind::Boolean => "bool",
			ValueKind::Uint1 => "uint1",
			ValueKind::Int2 => "int2",
			ValueKind::Int4 => "int4",
			ValueKind::Int8 => "int8",
			ValueKind::Float4 => "float4",
			ValueKind::Float8 => "float8",
			ValueKind::Decimal => "decimal",
			ValueKind::Utf8 => "utf8",
			ValueKind::Blob => "blob",
			ValueKind::Uuid => "uuid",
			ValueKind::Time => "time",
			ValueKind::DateTime => "datetime",
			ValueKind::DateTimeOffset => "datetimeoffset",
		};
		f.write_str(name)
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Boolean(v) => Display::fmt(v, f),
			Value::Uint1(v) => Display::fmt(v, f),
			Value::Int2(v) => Display::fmt(v, f),
			Value::Int4(v) => Display::fmt(v, f),
			Value::Int8(v) => Display::fmt(v, f),
			Value::Float4(v) => Display::fmt(v, f),
			Value::Float8(v) => Display::fmt(v, f),
			Value::Decimal(v) => Display::fmt(v, f),
			Value::Utf8(v) => Display::fmt(v, f),
			Value::Blob(v) => {
				f.write_str("0x")?;
				for byte in v {
					write!(f, "{byte:02x}")?;
				}
				Ok(())
			}
			Value::Uuid(v) => Display::fmt(v, f),
			Value::Time(v) => Display::fmt(v, f),
			Value::DateTime(v) => Display::fmt(v, f),
			Value::DateTimeOffset(v) => Display::fmt(v, f),
		}
	}
}

macro_rules! impl_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::$variant(value)
				}
			}
		)*
	};
}

impl_from! {
	bool => Boolean,
	u8 => Uint1,
	i16 => Int2,
	i32 => Int4,
	i64 => Int8,
	f32 => Float4,
	f64 => Float8,
	BigDecimal => Decimal,
	String => Utf8,
	Vec<u8> => Blob,
	Uuid => Uuid,
	TimeDelta => Time,
	NaiveDateTime => DateTime,
	DateTime<FixedOffset> => DateTimeOffset,
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Utf8(value.to_string())
	}
}

#[cfg(test)]
pub mod tests {
	use super::{Value, ValueKind};

	#[test]
	fn test_kind() {
		assert_eq!(Value::from(1i16).kind(), ValueKind::Int2);
		assert_eq!(Value::from("text").kind(), ValueKind::Utf8);
		assert_eq!(Value::from(vec![1u8]).kind(), ValueKind::Blob);
	}

	#[test]
	fn test_display_blob_as_hex() {
		assert_eq!(Value::Blob(vec![0x0a, 0xff]).to_string(), "0x0aff");
	}
}
