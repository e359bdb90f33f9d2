// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	io,
};

use uuid::Uuid;

use crate::model::ColumnDataType;

/// Which part of a column descriptor disagreed with the codec built for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorField {
	Flags,
	DataType,
	Length,
}

impl Display for DescriptorField {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			DescriptorField::Flags => f.write_str("flags"),
			DescriptorField::DataType => f.write_str("data type"),
			DescriptorField::Length => f.write_str("length"),
		}
	}
}

/// What a row-data chunk could not be resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingChunk {
	Table,
	Columns,
}

impl Display for MissingChunk {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			MissingChunk::Table => f.write_str("table identity"),
			MissingChunk::Columns => f.write_str("column schema"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
	#[error("unexpected end of input")]
	EndOfInput,

	#[error("corrupt stream: {reason}")]
	CorruptStream {
		reason: String,
	},

	#[error("column '{column}' does not match its descriptor: {field} {found} <> {expected}")]
	SchemaMismatch {
		column: String,
		field: DescriptorField,
		expected: String,
		found: String,
	},

	#[error("bookmark expected chunk type {expected:#010x} but found {found:#010x}")]
	BookmarkMismatch {
		expected: u32,
		found: u32,
	},

	#[error("decimal {value} does not fit in {digits} digits")]
	PrecisionOverflow {
		digits: u32,
		value: String,
	},

	#[error("corrupt decimal: {reason}")]
	CorruptDecimal {
		reason: String,
	},

	#[error("cannot open chunk {requested:#010x} while chunk {open:#010x} is still open")]
	ChunkAlreadyOpen {
		open: u32,
		requested: u32,
	},

	#[error("no chunk is current")]
	NoCurrentChunk,

	#[error("row data for table {table} appeared before its {missing} chunk")]
	OutOfOrderData {
		table: Uuid,
		missing: MissingChunk,
	},

	#[error("unrecognised file format")]
	UnrecognisedFormat,

	#[error("unsupported file version {0}")]
	UnsupportedVersion(i16),

	#[error("unknown column data type {0}")]
	UnknownDataType(i32),

	#[error("column '{column}' is not supported: {reason}")]
	UnsupportedColumn {
		column: String,
		reason: String,
	},

	#[error("invalid value for column '{column}': {reason}")]
	InvalidValue {
		column: String,
		reason: String,
	},

	#[error("invalid codec for column '{column}': {reason}")]
	InvalidSerialiser {
		column: String,
		reason: String,
	},

	#[error("target fields have no source column: {}", .0.join(", "))]
	UncorrelatedFields(Vec<String>),

	#[error("stream does not support seeking")]
	NotSeekable,

	#[error(transparent)]
	Io(io::Error),
}

impl From<io::Error> for FormatError {
	fn from(err: io::Error) -> Self {
		match err.kind() {
			io::ErrorKind::UnexpectedEof => FormatError::EndOfInput,
			_ => FormatError::Io(err),
		}
	}
}

impl FormatError {
	pub fn corrupt(reason: impl Into<String>) -> Self {
		FormatError::CorruptStream {
			reason: reason.into(),
		}
	}

	pub(crate) fn schema_mismatch(
		column: &str,
		field: DescriptorField,
		expected: impl Display,
		found: impl Display,
	) -> Self {
		FormatError::SchemaMismatch {
			column: column.to_string(),
			field,
			expected: expected.to_string(),
			found: found.to_string(),
		}
	}

	pub(crate) fn unsupported(column: &str, data_type: ColumnDataType, length: i32) -> Self {
		FormatError::UnsupportedColumn {
			column: column.to_string(),
			reason: format!("{data_type} with length {length}"),
		}
	}
}

pub type Result<T> = std::result::Result<T, FormatError>;
