// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Table files: a file header followed by table-identity, column-schema and
//! row-data chunks, all keyed by table id.

mod reader;
mod writer;

pub use reader::{TableData, TableFileReader};
pub use writer::{RowDataWriter, TableFileWriter};

use uuid::Uuid;

use crate::{
	error::{FormatError, Result},
	model::{ColumnDataType, ColumnDescriptor, ColumnFlags, TableDescriptor},
	primitive::{Decode, Encode},
	stream::{ReadStream, WriteStream, skip_to},
};

pub const FILE_TYPE_ID: u32 = u32::from_le_bytes(*b"BTBL");

pub const TABLE_CHUNK: u32 = u32::from_le_bytes(*b"TABL");

pub const COLUMNS_CHUNK: u32 = u32::from_le_bytes(*b"COLS");

pub const ROWS_CHUNK: u32 = u32::from_le_bytes(*b"ROWD");

pub const FORMAT_VERSION: i16 = 1;

/// Bytes of a column record ahead of its name.
pub const COLUMN_RECORD_SIZE: i16 = 12;

pub(crate) fn write_table_identity<W: WriteStream + ?Sized>(stream: &mut W, table: &TableDescriptor) -> Result<()> {
	stream.put_guid(&table.id)?;
	stream.align_write(4)?;
	stream.put_string(&table.name)?;
	stream.align_write(4)?;
	stream.put_string(&table.schema)
}

pub(crate) fn read_table_identity<R: ReadStream + ?Sized>(stream: &mut R) -> Result<TableDescriptor> {
	let id = stream.get_guid()?;
	stream.align_read(4)?;
	let name = stream.get_string()?;
	stream.align_read(4)?;
	let schema = stream.get_string()?;
	Ok(TableDescriptor {
		id,
		name,
		schema,
	})
}

pub(crate) fn write_column_schema<W: WriteStream + ?Sized>(
	stream: &mut W,
	table_id: &Uuid,
	columns: &[ColumnDescriptor],
) -> Result<()> {
	let count = i16::try_from(columns.len()).map_err(|_| FormatError::UnsupportedColumn {
		column: table_id.to_string(),
		reason: format!("{} columns exceed the limit of {}", columns.len(), i16::MAX),
	})?;

	stream.put_guid(table_id)?;
	stream.put_i16(count)?;
	stream.put_i16(COLUMN_RECORD_SIZE)?;
	for column in columns {
		stream.align_write(4)?;
		stream.put_i16(column.original_index)?;
		stream.put_u16(column.flags.bits())?;
		stream.put_i32(column.data_type.into())?;
		stream.put_i32(column.length)?;
		stream.put_string(&column.original_name)?;
	}
	Ok(())
}

/// Records longer than [`COLUMN_RECORD_SIZE`] carry fields this version
/// does not know; they are skipped.
pub(crate) fn read_column_schema<R: ReadStream + ?Sized>(stream: &mut R) -> Result<(Uuid, Vec<ColumnDescriptor>)> {
	let table_id = stream.get_guid()?;
	let count = stream.get_i16()?;
	let record_size = stream.get_i16()?;
	if count < 0 {
		return Err(FormatError::corrupt(format!("table {table_id} declares {count} columns")));
	}
	if record_size < COLUMN_RECORD_SIZE {
		return Err(FormatError::corrupt(format!("column record size {record_size} is below {COLUMN_RECORD_SIZE}")));
	}

	let mut columns = Vec::with_capacity(count as usize);
	for _ in 0..count {
		stream.align_read(4)?;
		let record_start = stream.position();
		let original_index = stream.get_i16()?;
		let flags = ColumnFlags::from_bits_retain(stream.get_u16()?);
		let data_type = ColumnDataType::try_from(stream.get_i32()?)?;
		let length = stream.get_i32()?;
		skip_to(stream, record_start + record_size as u64)?;
		let original_name = stream.get_string()?;
		columns.push(ColumnDescriptor {
			original_name,
			original_index,
			flags,
			data_type,
			length,
		});
	}
	Ok((table_id, columns))
}

#[cfg(test)]
pub mod tests {
	use std::io::Cursor;

	use uuid::Uuid;

	use super::{COLUMNS_CHUNK, ROWS_CHUNK, TABLE_CHUNK, read_column_schema, read_table_identity, write_column_schema, write_table_identity};
	use crate::{
		error::FormatError,
		model::{ColumnDataType, ColumnDescriptor, ColumnFlags, TableDescriptor},
		primitive::Encode,
	};

	#[test]
	fn test_chunk_tags_spell_ascii() {
		assert_eq!(TABLE_CHUNK.to_le_bytes(), *b"TABL");
		assert_eq!(COLUMNS_CHUNK.to_le_bytes(), *b"COLS");
		assert_eq!(ROWS_CHUNK.to_le_bytes(), *b"ROWD");
	}

	#[test]
	fn test_table_identity_layout() {
		let table = TableDescriptor {
			id: Uuid::nil(),
			name: "abc".to_string(),
			schema: "dbo".to_string(),
		};
		let mut out = Cursor::new(Vec::new());
		write_table_identity(&mut out, &table).unwrap();

		let bytes = out.into_inner();
		let mut expected = vec![0u8; 16];
		expected.extend_from_slice(&[3, 0, 0, 0, b'a', b'b', b'c', 0]);
		expected.extend_from_slice(&[3, 0, 0, 0, b'd', b'b', b'o']);
		assert_eq!(bytes, expected);

		assert_eq!(read_table_identity(&mut Cursor::new(bytes)).unwrap(), table);
	}

	#[test]
	fn test_column_schema_roundtrip() {
		let id = Uuid::new_v4();
		let columns = vec![
			ColumnDescriptor {
				original_name: "id".to_string(),
				original_index: 1,
				flags: ColumnFlags::empty(),
				data_type: ColumnDataType::SignedInteger,
				length: 8,
			},
			ColumnDescriptor {
				original_name: "notes".to_string(),
				original_index: 0,
				flags: ColumnFlags::ABSENT_WHEN_NULL,
				data_type: ColumnDataType::String,
				length: 4000,
			},
		];
		let mut out = Cursor::new(Vec::new());
		write_column_schema(&mut out, &id, &columns).unwrap();
		assert_eq!(&out.get_ref()[16..20], &[2, 0, 12, 0]);

		let (read_id, read_columns) = read_column_schema(&mut Cursor::new(out.into_inner())).unwrap();
		assert_eq!(read_id, id);
		assert_eq!(read_columns, columns);
	}

	#[test]
	fn test_longer_column_records_are_skipped() {
		let mut out = Cursor::new(Vec::new());
		out.put_guid(&Uuid::nil()).unwrap();
		out.put_i16(1).unwrap();
		out.put_i16(16).unwrap();
		out.put_i16(0).unwrap();
		out.put_u16(1).unwrap();
		out.put_i32(4).unwrap();
		out.put_i32(-1).unwrap();
		out.put_u32(0xDEAD_BEEF).unwrap();
		out.put_string("name").unwrap();

		let (_, columns) = read_column_schema(&mut Cursor::new(out.into_inner())).unwrap();
		assert_eq!(columns.len(), 1);
		assert_eq!(columns[0].original_name, "name");
		assert_eq!(columns[0].flags, ColumnFlags::NULLABLE);
		assert_eq!(columns[0].data_type, ColumnDataType::String);
	}

	#[test]
	fn test_unknown_data_type() {
		let mut out = Cursor::new(Vec::new());
		out.put_guid(&Uuid::nil()).unwrap();
		out.put_i16(1).unwrap();
		out.put_i16(12).unwrap();
		out.put_i16(0).unwrap();
		out.put_u16(0).unwrap();
		out.put_i32(42).unwrap();
		out.put_i32(4).unwrap();
		out.put_string("x").unwrap();

		let err = read_column_schema(&mut Cursor::new(out.into_inner())).unwrap_err();
		assert!(matches!(err, FormatError::UnknownDataType(42)));
	}
}
