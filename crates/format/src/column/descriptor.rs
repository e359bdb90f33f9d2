// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	column::{CodecKind, ColumnCodec, MAX_DECIMAL_BYTES, MAX_FIXED_LENGTH},
	decimal::DecimalPacker,
	error::{FormatError, Result},
	model::{ColumnDataType, ColumnDescriptor},
};

impl ColumnCodec {
	/// Build the codec a persisted descriptor calls for.
	///
	/// The result is not checked against the descriptor; pair this with
	/// [`crate::column::validate_against`]. Widths beyond
	/// [`MAX_FIXED_LENGTH`] or [`MAX_DECIMAL_BYTES`] are rejected before any
	/// scratch space is sized from them.
	pub fn from_descriptor(descriptor: &ColumnDescriptor) -> Result<Self> {
		let name = descriptor.original_name.as_str();
		let length = descriptor.length;
		let unsupported = || FormatError::unsupported(name, descriptor.data_type, length);
		let width = |max: usize| usize::try_from(length).ok().filter(|&n| n > 0 && n <= max);

		let kind = match descriptor.data_type {
			ColumnDataType::SignedInteger => match length {
				2 => CodecKind::Int16,
				4 => CodecKind::Int32,
				8 => CodecKind::Int64,
				_ => return Err(unsupported()),
			},
			ColumnDataType::UnsignedInteger => match length {
				1 => CodecKind::UnsignedInt8,
				_ => return Err(unsupported()),
			},
			ColumnDataType::FloatingPoint => match length {
				1..=4 => CodecKind::Float32,
				5..=8 => CodecKind::Float64,
				_ => return Err(unsupported()),
			},
			ColumnDataType::String => CodecKind::Utf8,
			ColumnDataType::VariableLengthBytes => CodecKind::Bytes,
			ColumnDataType::FixedLengthString => CodecKind::FixedString(width(MAX_FIXED_LENGTH).ok_or_else(unsupported)?),
			ColumnDataType::FixedLengthBytes => CodecKind::FixedBytes(width(MAX_FIXED_LENGTH).ok_or_else(unsupported)?),
			ColumnDataType::DecimalFloatingPoint => {
				let bytes = width(MAX_DECIMAL_BYTES).ok_or_else(unsupported)?;
				CodecKind::Decimal(DecimalPacker::for_buffer_size(bytes)?)
			}
			ColumnDataType::Guid => CodecKind::Guid,
			ColumnDataType::Time => CodecKind::Time,
			ColumnDataType::DateTime => CodecKind::DateTime,
			ColumnDataType::DateTimeOffset => CodecKind::DateTimeOffset,
			_ => return Err(unsupported()),
		};

		Ok(ColumnCodec::new(name, kind, descriptor.flags))
	}

	/// Describe this codec for the column-schema chunk. Variable-length
	/// codecs record `hint_length` in place of a width.
	pub fn descriptor(&self, original_index: i16, hint_length: i32) -> ColumnDescriptor {
		let length = if self.classification().is_fixed_length() {
			self.length()
		} else {
			hint_length
		};
		ColumnDescriptor {
			original_name: self.name.clone(),
			original_index,
			flags: self.flags,
			data_type: self.data_type(),
			length,
		}
	}
}
