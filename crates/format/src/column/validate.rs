// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	column::ColumnCodec,
	error::{DescriptorField, FormatError, Result},
	model::ColumnDescriptor,
};

/// Check a codec is self-consistent.
pub fn validate(codec: &ColumnCodec) -> Result<()> {
	if codec.classification().is_fixed_length() && codec.length() <= 0 {
		return Err(FormatError::InvalidSerialiser {
			column: codec.name().to_string(),
			reason: format!("fixed length {} declares length {}", codec.data_type(), codec.length()),
		});
	}
	let unknown = codec.flags().unknown();
	if unknown != 0 {
		return Err(FormatError::InvalidSerialiser {
			column: codec.name().to_string(),
			reason: format!("unknown flags {unknown:#06x}"),
		});
	}
	Ok(())
}

/// Check a codec agrees with the descriptor it will read or write under.
/// Length is compared for fixed-length classes only.
pub fn validate_against(codec: &ColumnCodec, descriptor: &ColumnDescriptor) -> Result<()> {
	validate(codec)?;

	if codec.flags().bits() != descriptor.flags.bits() {
		return Err(FormatError::schema_mismatch(
			codec.name(),
			DescriptorField::Flags,
			descriptor.flags,
			codec.flags(),
		));
	}
	if codec.data_type() != descriptor.data_type {
		return Err(FormatError::schema_mismatch(
			codec.name(),
			DescriptorField::DataType,
			descriptor.data_type,
			codec.data_type(),
		));
	}
	if codec.classification().is_fixed_length() && codec.length() != descriptor.length {
		return Err(FormatError::schema_mismatch(
			codec.name(),
			DescriptorField::Length,
			descriptor.length,
			codec.length(),
		));
	}
	Ok(())
}

#[cfg(test)]
pub mod tests {
	use super::{validate, validate_against};
	use crate::{
		column::{CodecKind, ColumnCodec},
		error::{DescriptorField, FormatError},
		model::{ColumnDataType, ColumnDescriptor, ColumnFlags},
	};

	fn descriptor(flags: ColumnFlags, data_type: ColumnDataType, length: i32) -> ColumnDescriptor {
		ColumnDescriptor {
			original_name: "qty".to_string(),
			original_index: 0,
			flags,
			data_type,
			length,
		}
	}

	fn mismatched_field(err: FormatError) -> DescriptorField {
		match err {
			FormatError::SchemaMismatch {
				field,
				..
			} => field,
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn test_fixed_length_must_be_positive() {
		let codec = ColumnCodec::new("code", CodecKind::FixedString(0), ColumnFlags::empty());
		assert!(matches!(validate(&codec), Err(FormatError::InvalidSerialiser { .. })));
		let codec = ColumnCodec::new("notes", CodecKind::Utf8, ColumnFlags::empty());
		assert!(validate(&codec).is_ok());
	}

	#[test]
	fn test_matching_descriptor() {
		let codec = ColumnCodec::new("qty", CodecKind::Int32, ColumnFlags::NULLABLE);
		validate_against(&codec, &descriptor(ColumnFlags::NULLABLE, ColumnDataType::SignedInteger, 4)).unwrap();
	}

	#[test]
	fn test_variable_length_ignores_length() {
		let codec = ColumnCodec::new("qty", CodecKind::Utf8, ColumnFlags::empty());
		validate_against(&codec, &descriptor(ColumnFlags::empty(), ColumnDataType::String, 255)).unwrap();
	}

	#[test]
	fn test_flag_mismatch() {
		let codec = ColumnCodec::new("qty", CodecKind::Int32, ColumnFlags::NULLABLE);
		let err = validate_against(&codec, &descriptor(ColumnFlags::ABSENT_WHEN_NULL, ColumnDataType::SignedInteger, 4))
			.unwrap_err();
		assert_eq!(mismatched_field(err), DescriptorField::Flags);
	}

	#[test]
	fn test_unknown_descriptor_flags_are_rejected() {
		let flags = ColumnFlags::from_bits_retain(0x0011);
		let codec = ColumnCodec::from_descriptor(&descriptor(flags, ColumnDataType::SignedInteger, 4)).unwrap();
		let err = validate_against(&codec, &descriptor(flags, ColumnDataType::SignedInteger, 4)).unwrap_err();
		assert_eq!(mismatched_field(err), DescriptorField::Flags);
	}

	#[test]
	fn test_type_mismatch() {
		let codec = ColumnCodec::new("qty", CodecKind::Float32, ColumnFlags::empty());
		let err =
			validate_against(&codec, &descriptor(ColumnFlags::empty(), ColumnDataType::SignedInteger, 4)).unwrap_err();
		assert_eq!(mismatched_field(err), DescriptorField::DataType);
	}

	#[test]
	fn test_length_mismatch() {
		let codec = ColumnCodec::new("qty", CodecKind::Int64, ColumnFlags::empty());
		let err =
			validate_against(&codec, &descriptor(ColumnFlags::empty(), ColumnDataType::SignedInteger, 4)).unwrap_err();
		assert_eq!(mismatched_field(err), DescriptorField::Length);
		assert_eq!(
			validate_against(&codec, &descriptor(ColumnFlags::empty(), ColumnDataType::SignedInteger, 4))
				.unwrap_err()
				.to_string(),
			"column 'qty' does not match its descriptor: length 8 <> 4"
		);
	}
}
