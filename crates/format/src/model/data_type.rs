// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// On-disk type tag of a column, stored as a 32-bit integer.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ColumnDataType {
	SignedInteger = 1,
	UnsignedInteger = 2,
	FloatingPoint = 3,
	String = 4,
	VariableLengthBytes = 5,
	FixedLengthString = 6,
	FixedLengthBytes = 7,
	DecimalFloatingPoint = 8,
	Guid = 9,
	Time = 10,
	DateTime = 11,
	DateTimeOffset = 12,
}

/// Packing class of a column type. Rows store classes in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
	FixedLengthPrimitive,
	FixedLengthBuffer,
	VariableLengthBuffer,
}

impl Classification {
	pub fn is_fixed_length(self) -> bool {
		!matches!(self, Classification::VariableLengthBuffer)
	}
}

impl ColumnDataType {
	pub fn classify(self) -> Classification {
		match self {
			ColumnDataType::SignedInteger
			| ColumnDataType::UnsignedInteger
			| ColumnDataType::FloatingPoint
			| ColumnDataType::DecimalFloatingPoint
			| ColumnDataType::Guid
			| ColumnDataType::Time
			| ColumnDataType::DateTime
			| ColumnDataType::DateTimeOffset => Classification::FixedLengthPrimitive,
			ColumnDataType::FixedLengthString | ColumnDataType::FixedLengthBytes => {
				Classification::FixedLengthBuffer
			}
			ColumnDataType::String | ColumnDataType::VariableLengthBytes => Classification::VariableLengthBuffer,
		}
	}
}

impl TryFrom<i32> for ColumnDataType {
	type Error = FormatError;

	fn try_from(value: i32) -> Result<Self, Self::Error> {
		Ok(match value {
			1 => ColumnDataType::SignedInteger,
			2 => ColumnDataType::UnsignedInteger,
			3 => ColumnDataType::FloatingPoint,
			4 => ColumnDataType::String,
			5 => ColumnDataType::VariableLengthBytes,
			6 => ColumnDataType::FixedLengthString,
			7 => ColumnDataType::FixedLengthBytes,
			8 => ColumnDataType::DecimalFloatingPoint,
			9 => ColumnDataType::Guid,
			10 => ColumnDataType::Time,
			11 => ColumnDataType::DateTime,
			12 => ColumnDataType::DateTimeOffset,
			other => return Err(FormatError::UnknownDataType(other)),
		})
	}
}

impl From<ColumnDataType> for i32 {
	fn from(value: ColumnDataType) -> Self {
		value as i32
	}
}

impl Display for ColumnDataType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let name = match self {
			ColumnDataType::SignedInteger => "SignedInteger",
			ColumnDataType::UnsignedInteger => "UnsignedInteger",
			ColumnDataType::FloatingPoint => "FloatingPoint",
			ColumnDataType::String => "String",
			ColumnDataType::VariableLengthBytes => "VariableLengthBytes",
			ColumnDataType::FixedLengthString => "FixedLengthString",
			ColumnDataType::FixedLengthBytes => "FixedLengthBytes",
			ColumnDataType::DecimalFloatingPoint => "DecimalFloatingPoint",
			ColumnDataType::Guid => "Guid",
			ColumnDataType::Time => "Time",
			ColumnDataType::DateTime => "DateTime",
			ColumnDataType::DateTimeOffset => "DateTimeOffset",
		};
		f.write_str(name)
	}
}
