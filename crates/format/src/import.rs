// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Import side: rebuild codecs from a file's column schema and bind each
//! column to the target fields it feeds.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::{
	column::{ColumnCodec, validate_against},
	error::{FormatError, Result},
	model::{ColumnDescriptor, TableIdentifier},
	row::{BoundRowReader, FieldBinding, RowReader},
	schema::{SourceField, SourceTable},
};

/// Decides which target fields each source column is written to.
pub trait FieldCorrelator: Send + Sync {
	/// Positions within `targets` fed by `source`.
	fn target_fields(&self, source: &ColumnDescriptor, targets: &[&SourceField]) -> Vec<usize>;

	/// Called with the writable target fields no source column feeds.
	fn on_unallocated(&self, fields: &[&SourceField]) -> Result<()>;
}

/// Matches by case-insensitive name and rejects any unfed target.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictFieldNameCorrelator;

impl FieldCorrelator for StrictFieldNameCorrelator {
	fn target_fields(&self, source: &ColumnDescriptor, targets: &[&SourceField]) -> Vec<usize> {
		targets
			.iter()
			.enumerate()
			.filter(|(_, field)| field.name.eq_ignore_ascii_case(&source.original_name))
			.map(|(i, _)| i)
			.collect()
	}

	fn on_unallocated(&self, fields: &[&SourceField]) -> Result<()> {
		if fields.is_empty() {
			return Ok(());
		}
		Err(FormatError::UncorrelatedFields(fields.iter().map(|f| f.name.clone()).collect()))
	}
}

#[derive(Debug, Clone)]
pub struct ImportModel {
	pub table: TableIdentifier,
	/// One codec per source column, in file order.
	pub codecs: Vec<ColumnCodec>,
	pub bindings: Vec<FieldBinding>,
}

impl ImportModel {
	pub fn bound_reader(&self) -> Result<BoundRowReader> {
		BoundRowReader::new(RowReader::new(self.codecs.clone()), self.bindings.clone())
	}
}

pub struct ImportModelBuilder {
	correlator: Box<dyn FieldCorrelator>,
}

impl Default for ImportModelBuilder {
	fn default() -> Self {
		Self::new(StrictFieldNameCorrelator)
	}
}

impl ImportModelBuilder {
	pub fn new(correlator: impl FieldCorrelator + 'static) -> Self {
		Self {
			correlator: Box::new(correlator),
		}
	}

	/// Computed and row-version target fields are never written.
	#[instrument(name = "import::build", level = "debug", skip_all, fields(table = %table.identifier()))]
	pub fn build(&self, table: &SourceTable, columns: &[ColumnDescriptor]) -> Result<ImportModel> {
		let writable: Vec<&SourceField> = table.fields.iter().filter(|f| f.is_writable()).collect();

		let mut codecs = Vec::with_capacity(columns.len());
		let mut bindings = Vec::new();
		let mut allocated = HashSet::new();
		for (source_index, column) in columns.iter().enumerate() {
			let codec = ColumnCodec::from_descriptor(column)?;
			validate_against(&codec, column)?;

			for target in self.correlator.target_fields(column, &writable) {
				allocated.insert(target);
				bindings.push(FieldBinding {
					name: writable[target].name.clone(),
					source_index,
					kind: codec.value_kind(),
				});
			}
			codecs.push(codec);
		}

		let unallocated: Vec<&SourceField> =
			writable.iter().enumerate().filter(|(i, _)| !allocated.contains(i)).map(|(_, &f)| f).collect();
		if !unallocated.is_empty() {
			self.correlator.on_unallocated(&unallocated)?;
		}

		debug!(columns = codecs.len(), bindings = bindings.len(), "import model");
		Ok(ImportModel {
			table: table.identifier(),
			codecs,
			bindings,
		})
	}
}

#[cfg(test)]
pub mod tests {
	use super::{FieldCorrelator, ImportModelBuilder, StrictFieldNameCorrelator};
	use crate::{
		error::{DescriptorField, FormatError, Result},
		model::{ColumnDataType, ColumnDescriptor, ColumnFlags, ValueKind},
		schema::{SourceField, SourceTable, SourceType},
	};

	fn column(name: &str, index: i16, data_type: ColumnDataType, length: i32) -> ColumnDescriptor {
		ColumnDescriptor {
			original_name: name.to_string(),
			original_index: index,
			flags: ColumnFlags::empty(),
			data_type,
			length,
		}
	}

	fn source_columns() -> Vec<ColumnDescriptor> {
		vec![
			column("A", 2, ColumnDataType::SignedInteger, 8),
			column("B", 3, ColumnDataType::SignedInteger, 4),
			column("C", 4, ColumnDataType::SignedInteger, 2),
			column("D", 1, ColumnDataType::UnsignedInteger, 1),
			column("E", 0, ColumnDataType::FixedLengthString, 10),
			column("F", 6, ColumnDataType::String, -1),
		]
	}

	struct Lenient;

	impl FieldCorrelator for Lenient {
		fn target_fields(&self, source: &ColumnDescriptor, targets: &[&SourceField]) -> Vec<usize> {
			StrictFieldNameCorrelator.target_fields(source, targets)
		}

		fn on_unallocated(&self, _fields: &[&SourceField]) -> Result<()> {
			Ok(())
		}
	}

	#[test]
	fn test_codecs_follow_descriptor_order() {
		let model = ImportModelBuilder::default().build(&SourceTable::new("Schema", "Table", vec![]), &source_columns()).unwrap();
		let layout: Vec<_> = model.codecs.iter().map(|c| (c.data_type(), c.length())).collect();
		let expected: Vec<_> = source_columns().iter().map(|c| (c.data_type, c.length)).collect();
		assert_eq!(layout, expected);
	}

	#[test]
	fn test_bindings_carry_source_index() {
		let table = SourceTable::new(
			"Schema",
			"Table",
			vec![
				SourceField::new("D", SourceType::TinyInt, 1),
				SourceField::new("F", SourceType::NVarChar, -1),
				SourceField::new("A", SourceType::BigInt, 8),
				SourceField::new("B", SourceType::Int, 4),
				SourceField::new("C", SourceType::SmallInt, 2),
				SourceField::new("d", SourceType::TinyInt, 1),
			],
		);
		let model = ImportModelBuilder::default().build(&table, &source_columns()).unwrap();

		let mut bindings: Vec<_> = model.bindings.iter().map(|b| (b.name.as_str(), b.source_index)).collect();
		bindings.sort();
		assert_eq!(bindings, vec![("A", 0), ("B", 1), ("C", 2), ("D", 3), ("F", 5), ("d", 3)]);
		assert_eq!(model.bindings.iter().find(|b| b.name == "F").unwrap().kind, ValueKind::Utf8);
	}

	#[test]
	fn test_computed_fields_are_not_bound() {
		let table = SourceTable::new(
			"Schema",
			"Table",
			vec![SourceField::new("Data", SourceType::Int, 4), SourceField::new("Computed", SourceType::Int, 4).computed()],
		);
		let columns = vec![
			column("Data", 0, ColumnDataType::SignedInteger, 4),
			column("Computed", 1, ColumnDataType::SignedInteger, 4),
			column("Additional", 2, ColumnDataType::SignedInteger, 4),
		];
		let model = ImportModelBuilder::default().build(&table, &columns).unwrap();
		assert_eq!(model.codecs.len(), 3);
		assert_eq!(model.bindings.len(), 1);
		assert_eq!(model.bindings[0].name, "Data");
	}

	#[test]
	fn test_unfed_target_fields_are_rejected() {
		let table = SourceTable::new(
			"Schema",
			"Table",
			vec![SourceField::new("Data", SourceType::Int, 4), SourceField::new("Extra", SourceType::Int, 4)],
		);
		let columns = vec![column("Data", 0, ColumnDataType::SignedInteger, 4)];

		let err = ImportModelBuilder::default().build(&table, &columns).unwrap_err();
		assert!(matches!(err, FormatError::UncorrelatedFields(names) if names == vec!["Extra".to_string()]));

		let model = ImportModelBuilder::new(Lenient).build(&table, &columns).unwrap();
		assert_eq!(model.bindings.len(), 1);
	}

	#[test]
	fn test_row_version_target_is_not_required() {
		let table = SourceTable::new(
			"Schema",
			"Table",
			vec![SourceField::new("Data", SourceType::Int, 4), SourceField::new("Version", SourceType::Timestamp, 8)],
		);
		let columns = vec![column("Data", 0, ColumnDataType::SignedInteger, 4)];
		assert!(ImportModelBuilder::default().build(&table, &columns).is_ok());
	}

	#[test]
	fn test_descriptor_disagreement_fails() {
		let mut columns = vec![column("Data", 0, ColumnDataType::SignedInteger, 4)];
		columns[0].flags = ColumnFlags::from_bits_retain(0x0100);
		let table = SourceTable::new("Schema", "Table", vec![SourceField::new("Data", SourceType::Int, 4)]);

		let err = ImportModelBuilder::default().build(&table, &columns).unwrap_err();
		assert!(matches!(
			err,
			FormatError::SchemaMismatch {
				field: DescriptorField::Flags,
				..
			}
		));
	}

	#[test]
	fn test_bound_reader_from_model() {
		let table = SourceTable::new("Schema", "Table", vec![SourceField::new("data", SourceType::Int, 4)]);
		let columns = vec![column("DATA", 0, ColumnDataType::SignedInteger, 4)];
		let model = ImportModelBuilder::default().build(&table, &columns).unwrap();
		let reader = model.bound_reader().unwrap();
		assert_eq!(reader.field_count(), 1);
		assert_eq!(reader.name(0), "data");
		assert_eq!(model.table.to_string(), "Schema.Table");
	}
}
