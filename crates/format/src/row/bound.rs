// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	error::{FormatError, Result},
	model::{Value, ValueKind},
	row::{RowReader, RowSource},
	stream::ReadStream,
};

/// Maps a target field to the column that feeds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
	pub name: String,
	/// Ordinal of the feeding column in the row-data stream.
	pub source_index: usize,
	pub kind: ValueKind,
}

/// The current row seen through a set of field bindings.
#[derive(Debug, Clone, Copy)]
pub struct BoundRow<'a> {
	bindings: &'a [FieldBinding],
	values: &'a [Option<Value>],
}

impl<'a> BoundRow<'a> {
	pub fn field_count(&self) -> usize {
		self.bindings.len()
	}

	pub fn name(&self, ordinal: usize) -> &'a str {
		&self.bindings[ordinal].name
	}

	pub fn kind(&self, ordinal: usize) -> ValueKind {
		self.bindings[ordinal].kind
	}

	pub fn ordinal_of(&self, name: &str) -> Option<usize> {
		self.bindings.iter().position(|b| b.name.eq_ignore_ascii_case(name))
	}

	pub fn value(&self, ordinal: usize) -> Option<&'a Value> {
		self.values[self.bindings[ordinal].source_index].as_ref()
	}

	pub fn is_null(&self, ordinal: usize) -> bool {
		self.value(ordinal).is_none()
	}
}

impl RowSource for BoundRow<'_> {
	fn value(&self, ordinal: usize) -> Option<&Value> {
		BoundRow::value(self, ordinal)
	}
}

/// Receives decoded rows on the import side.
pub trait RowSink {
	fn accept(&mut self, row: &BoundRow<'_>) -> Result<()>;
}

impl<F> RowSink for F
where
	F: FnMut(&BoundRow<'_>) -> Result<()>,
{
	fn accept(&mut self, row: &BoundRow<'_>) -> Result<()> {
		self(row)
	}
}

/// A [`RowReader`] exposing its columns as named target fields.
#[derive(Debug)]
pub struct BoundRowReader {
	reader: RowReader,
	bindings: Vec<FieldBinding>,
}

impl BoundRowReader {
	pub fn new(reader: RowReader, bindings: Vec<FieldBinding>) -> Result<Self> {
		let columns = reader.column_count();
		if let Some(binding) = bindings.iter().find(|b| b.source_index >= columns) {
			return Err(FormatError::InvalidSerialiser {
				column: binding.name.clone(),
				reason: format!("source index {} out of range for {columns} columns", binding.source_index),
			});
		}
		Ok(Self {
			reader,
			bindings,
		})
	}

	pub fn bindings(&self) -> &[FieldBinding] {
		&self.bindings
	}

	pub fn move_next<R: ReadStream + ?Sized>(&mut self, stream: &mut R) -> Result<bool> {
		self.reader.move_next(stream)
	}

	pub fn row(&self) -> BoundRow<'_> {
		BoundRow {
			bindings: &self.bindings,
			values: self.reader.current(),
		}
	}

	pub fn field_count(&self) -> usize {
		self.bindings.len()
	}

	pub fn name(&self, ordinal: usize) -> &str {
		&self.bindings[ordinal].name
	}

	pub fn ordinal_of(&self, name: &str) -> Option<usize> {
		self.row().ordinal_of(name)
	}

	pub fn kind(&self, ordinal: usize) -> ValueKind {
		self.bindings[ordinal].kind
	}

	pub fn value(&self, ordinal: usize) -> Option<&Value> {
		self.reader.value(self.bindings[ordinal].source_index)
	}

	pub fn is_null(&self, ordinal: usize) -> bool {
		self.value(ordinal).is_none()
	}
}

/// Feed every remaining row of `stream` to `sink`. Returns the row count.
pub fn copy_rows<R, K>(reader: &mut BoundRowReader, stream: &mut R, sink: &mut K) -> Result<u64>
where
	R: ReadStream + ?Sized,
	K: RowSink + ?Sized,
{
	let mut count = 0;
	while reader.move_next(stream)? {
		sink.accept(&reader.row())?;
		count += 1;
	}
	Ok(count)
}

#[cfg(test)]
pub mod tests {
	use std::io::Cursor;

	use super::{BoundRow, BoundRowReader, FieldBinding, copy_rows};
	use crate::{
		error::{FormatError, Result},
		model::{Value, ValueKind},
		row::{
			RowReader, RowWriter,
			tests::{codecs, rows},
		},
	};

	fn bindings() -> Vec<FieldBinding> {
		vec![
			FieldBinding {
				name: "Label".to_string(),
				source_index: 3,
				kind: ValueKind::Utf8,
			},
			FieldBinding {
				name: "Id".to_string(),
				source_index: 0,
				kind: ValueKind::Int8,
			},
		]
	}

	fn encoded_rows() -> Vec<u8> {
		let mut writer = RowWriter::new(codecs());
		let mut out = Cursor::new(Vec::new());
		for row in rows() {
			writer.write(&mut out, &row).unwrap();
		}
		out.into_inner()
	}

	#[test]
	fn test_source_index_out_of_range() {
		let mut bindings = bindings();
		bindings[1].source_index = 4;
		let err = BoundRowReader::new(RowReader::new(codecs()), bindings).unwrap_err();
		assert!(matches!(err, FormatError::InvalidSerialiser { column, .. } if column == "Id"));
	}

	#[test]
	fn test_bound_accessors() {
		let mut reader = BoundRowReader::new(RowReader::new(codecs()), bindings()).unwrap();
		let mut input = Cursor::new(encoded_rows());

		assert!(reader.move_next(&mut input).unwrap());
		assert_eq!(reader.field_count(), 2);
		assert_eq!(reader.name(0), "Label");
		assert_eq!(reader.ordinal_of("id"), Some(1));
		assert_eq!(reader.ordinal_of("rank"), None);
		assert_eq!(reader.kind(1), ValueKind::Int8);
		assert_eq!(reader.value(0), Some(&Value::from("first")));
		assert_eq!(reader.value(1), Some(&Value::Int8(1)));

		assert!(reader.move_next(&mut input).unwrap());
		assert!(reader.is_null(0));
		assert!(!reader.is_null(1));
	}

	#[test]
	fn test_copy_rows_into_sink() {
		let mut reader = BoundRowReader::new(RowReader::new(codecs()), bindings()).unwrap();
		let mut input = Cursor::new(encoded_rows());
		let mut seen = Vec::new();
		let mut sink = |row: &BoundRow<'_>| -> Result<()> {
			seen.push((row.value(1).cloned(), row.value(0).cloned()));
			Ok(())
		};

		let count = copy_rows(&mut reader, &mut input, &mut sink).unwrap();
		assert_eq!(count, 4);
		assert_eq!(seen[1], (Some(Value::Int8(2)), None));
		assert_eq!(seen[3], (Some(Value::Int8(4)), Some(Value::from("last"))));
	}

	#[test]
	fn test_sink_error_stops_copy() {
		let mut reader = BoundRowReader::new(RowReader::new(codecs()), bindings()).unwrap();
		let mut input = Cursor::new(encoded_rows());
		let mut sink = |_: &BoundRow<'_>| -> Result<()> { Err(FormatError::corrupt("rejected")) };
		assert!(copy_rows(&mut reader, &mut input, &mut sink).is_err());
	}
}
