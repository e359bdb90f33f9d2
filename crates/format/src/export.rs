// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Export side: choose a codec per source field and fix the row packing
//! order recorded in the column-schema chunk.

use tracing::{debug, instrument};

use crate::{
	column::{CodecKind, ColumnCodec, MAX_FIXED_LENGTH, sort_for_packing, validate},
	decimal::DecimalPacker,
	error::{FormatError, Result},
	identity::{NameBasedTableIdPolicy, TableIdPolicy},
	model::{ColumnDescriptor, ColumnFlags, TableDescriptor, Value},
	row::RowSource,
	schema::{SourceField, SourceTable, SourceType},
};

/// Everything needed to write one table.
#[derive(Debug, Clone)]
pub struct ExportModel {
	pub table: TableDescriptor,
	/// Column descriptors in packed order.
	pub columns: Vec<ColumnDescriptor>,
	/// Codecs matching `columns` one to one.
	pub codecs: Vec<ColumnCodec>,
	/// Position in the source field list feeding each packed column.
	pub source_ordinals: Vec<usize>,
}

impl ExportModel {
	/// View a row laid out in source field order as a row in packed order.
	pub fn project<'a, R: RowSource + ?Sized>(&'a self, row: &'a R) -> ProjectedRow<'a, R> {
		ProjectedRow {
			ordinals: &self.source_ordinals,
			row,
		}
	}
}

pub struct ProjectedRow<'a, R: ?Sized> {
	ordinals: &'a [usize],
	row: &'a R,
}

impl<R: RowSource + ?Sized> RowSource for ProjectedRow<'_, R> {
	fn value(&self, ordinal: usize) -> Option<&Value> {
		self.ordinals.get(ordinal).and_then(|&source| self.row.value(source))
	}
}

pub struct ExportModelBuilder {
	policy: Box<dyn TableIdPolicy>,
}

impl Default for ExportModelBuilder {
	fn default() -> Self {
		Self::new(NameBasedTableIdPolicy)
	}
}

impl ExportModelBuilder {
	pub fn new(policy: impl TableIdPolicy + 'static) -> Self {
		Self {
			policy: Box::new(policy),
		}
	}

	/// Row-version fields are left out. Original indices count the
	/// exported fields only.
	#[instrument(name = "export::build", level = "debug", skip_all, fields(table = %table.identifier()))]
	pub fn build(&self, table: &SourceTable) -> Result<ExportModel> {
		if table.fields.len() > i16::MAX as usize {
			return Err(FormatError::UnsupportedColumn {
				column: table.identifier().to_string(),
				reason: format!("too many columns: {}", table.fields.len()),
			});
		}

		let mut fields = Vec::with_capacity(table.fields.len());
		let exported = table.fields.iter().enumerate().filter(|(_, field)| field.source_type != SourceType::Timestamp);
		for (index, (ordinal, field)) in exported.enumerate() {
			let codec = codec_for(field)?;
			validate(&codec)?;
			let descriptor = codec.descriptor(index as i16, field.max_length);
			fields.push((descriptor, codec, ordinal));
		}
		sort_for_packing(&mut fields, |(descriptor, _, _)| descriptor);

		let id = self.policy.table_id(table);
		debug!(%id, columns = fields.len(), "export model");

		let mut columns = Vec::with_capacity(fields.len());
		let mut codecs = Vec::with_capacity(fields.len());
		let mut source_ordinals = Vec::with_capacity(fields.len());
		for (descriptor, codec, ordinal) in fields {
			columns.push(descriptor);
			codecs.push(codec);
			source_ordinals.push(ordinal);
		}

		Ok(ExportModel {
			table: TableDescriptor {
				id,
				name: table.name.clone(),
				schema: table.schema.clone(),
			},
			columns,
			codecs,
			source_ordinals,
		})
	}
}

/// Codec for a source field. Numeric types record plain nullability;
/// everything else omits nulls from the row.
pub fn codec_for(field: &SourceField) -> Result<ColumnCodec> {
	let when_nullable = |flags: ColumnFlags| {
		if field.nullable {
			flags
		} else {
			ColumnFlags::empty()
		}
	};
	let nullable = when_nullable(ColumnFlags::NULLABLE);
	let absent = when_nullable(ColumnFlags::ABSENT_WHEN_NULL);
	let unsupported = || FormatError::UnsupportedColumn {
		column: field.name.clone(),
		reason: format!("{:?} with length {}", field.source_type, field.max_length),
	};
	let fixed_length = || {
		usize::try_from(field.max_length).ok().filter(|&n| n > 0 && n <= MAX_FIXED_LENGTH).ok_or_else(unsupported)
	};

	let (kind, flags) = match field.source_type {
		SourceType::BigInt => (CodecKind::Int64, nullable),
		SourceType::Int => (CodecKind::Int32, nullable),
		SourceType::SmallInt => (CodecKind::Int16, nullable),
		SourceType::TinyInt => (CodecKind::UnsignedInt8, nullable),
		SourceType::Bit => (CodecKind::Boolean, absent),
		SourceType::Char => (CodecKind::FixedString(fixed_length()?), absent),
		SourceType::VarChar
		| SourceType::Text
		| SourceType::NChar
		| SourceType::NVarChar
		| SourceType::NText
		| SourceType::Xml => (CodecKind::Utf8, absent),
		SourceType::UniqueIdentifier => (CodecKind::Guid, absent),
		SourceType::Float => match field.max_length {
			1..=4 => (CodecKind::Float32, nullable),
			5..=8 => (CodecKind::Float64, nullable),
			_ => return Err(unsupported()),
		},
		SourceType::Real => (CodecKind::Float32, nullable),
		SourceType::Binary | SourceType::Timestamp => (CodecKind::FixedBytes(fixed_length()?), absent),
		SourceType::VarBinary | SourceType::Image => (CodecKind::Bytes, absent),
		SourceType::Decimal => (CodecKind::Decimal(DecimalPacker::for_digit_count(field.precision)), nullable),
		SourceType::Money => (CodecKind::Decimal(DecimalPacker::for_buffer_size(12)?), absent),
		SourceType::SmallMoney => (CodecKind::Decimal(DecimalPacker::for_buffer_size(8)?), absent),
		SourceType::Time => (CodecKind::Time, absent),
		SourceType::Date | SourceType::DateTime | SourceType::DateTime2 | SourceType::SmallDateTime => {
			(CodecKind::DateTime, absent)
		}
		SourceType::DateTimeOffset => (CodecKind::DateTimeOffset, absent),
		SourceType::Variant | SourceType::Udt | SourceType::Structured => return Err(unsupported()),
	};
	Ok(ColumnCodec::new(&field.name, kind, flags))
}
