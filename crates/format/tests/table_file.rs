// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs::File,
	io::{Cursor, Read, Write},
};

use bulktable_format::{
	ColumnFlags, FormatError, ReaderConfig, TableDescriptor, TableFileReader, TableFileWriter, Value, WriterConfig,
	chunk::{ChunkedReader, FileHeader},
	column::{CodecKind, ColumnCodec},
	error::MissingChunk,
	stream::{ReadStream, SeekableReader},
	table::{COLUMNS_CHUNK, ROWS_CHUNK, TABLE_CHUNK},
};
use bulktable_testing::tempdir::{table_file, temp_dir};
use flate2::{Compression, write::GzEncoder};
use uuid::Uuid;

fn measurements() -> TableDescriptor {
	TableDescriptor {
		id: Uuid::from_u128(0x5eed),
		name: "readings".to_string(),
		schema: "lab".to_string(),
	}
}

fn codecs() -> Vec<ColumnCodec> {
	vec![
		ColumnCodec::new("ratio", CodecKind::Float64, ColumnFlags::empty()),
		ColumnCodec::new("delta", CodecKind::Int32, ColumnFlags::empty()),
	]
}

fn sample_rows() -> Vec<[Option<Value>; 2]> {
	vec![[Some(Value::Float8(42.0)), Some(Value::Int4(-42))]]
}

fn write_sample(rows: &[[Option<Value>; 2]]) -> Vec<u8> {
	let table = measurements();
	let codecs = codecs();
	let columns: Vec<_> = codecs.iter().enumerate().map(|(i, codec)| codec.descriptor(i as i16, 0)).collect();

	let mut writer = TableFileWriter::new(Cursor::new(Vec::new())).unwrap();
	writer.add_table(&table).unwrap();
	writer.add_columns(&table.id, &columns).unwrap();
	let mut data = writer.begin_row_data(&table.id, codecs).unwrap();
	for row in rows {
		data.write(row).unwrap();
	}
	assert_eq!(data.finish().unwrap(), rows.len() as u64);
	writer.finish().unwrap().into_inner()
}

fn read_all(mut reader: TableFileReader<Box<dyn ReadStream + '_>>) -> Vec<Vec<Option<Value>>> {
	let mut result = Vec::new();
	let mut data = reader.next_table().unwrap().expect("row data");
	assert_eq!(data.table, measurements());
	assert_eq!(data.columns.len(), 2);

	let mut rows = data.row_reader().unwrap();
	while rows.move_next(&mut data.rows).unwrap() {
		result.push(rows.current().to_vec());
	}
	drop(data);
	assert!(reader.next_table().unwrap().is_none());
	result
}

#[test]
fn test_single_row_roundtrip() {
	let bytes = write_sample(&sample_rows());
	assert_eq!(&bytes[..8], b"BTBL\x01\x00\x00\x00");

	let reader = TableFileReader::open(Cursor::new(bytes), &ReaderConfig::default()).unwrap();
	assert_eq!(read_all(reader), vec![vec![Some(Value::Float8(42.0)), Some(Value::Int4(-42))]]);
}

#[test]
fn test_gzip_input_is_detected() {
	let bytes = write_sample(&sample_rows());
	let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(&bytes).unwrap();
	let compressed = encoder.finish().unwrap();

	let reader = TableFileReader::open(Cursor::new(compressed.clone()), &ReaderConfig::default()).unwrap();
	assert_eq!(read_all(reader), vec![vec![Some(Value::Float8(42.0)), Some(Value::Int4(-42))]]);

	let reader = TableFileReader::open_forward(compressed.as_slice(), &ReaderConfig::default()).unwrap();
	assert_eq!(read_all(reader).len(), 1);
}

#[test]
fn test_empty_row_data() {
	let bytes = write_sample(&[]);
	let reader = TableFileReader::open(Cursor::new(bytes), &ReaderConfig::default()).unwrap();
	assert!(read_all(reader).is_empty());
}

#[test]
fn test_many_rows() {
	let rows: Vec<_> = (0..1000).map(|i| [Some(Value::Float8(i as f64 / 4.0)), Some(Value::Int4(-i))]).collect();
	let bytes = write_sample(&rows);
	let reader = TableFileReader::open_forward(bytes.as_slice(), &ReaderConfig::default()).unwrap();
	let read = read_all(reader);
	assert_eq!(read.len(), 1000);
	assert_eq!(read[999], vec![Some(Value::Float8(999.0 / 4.0)), Some(Value::Int4(-999))]);
}

#[test]
fn test_chunk_layout_and_bookmarks() {
	let bytes = write_sample(&sample_rows());
	let mut stream = SeekableReader::new(Cursor::new(bytes)).unwrap();
	assert_eq!(FileHeader::read(&mut stream).unwrap().version, 1);
	let mut chunks = ChunkedReader::new(stream);

	let mut seen = Vec::new();
	while chunks.move_next().unwrap() {
		let header = *chunks.current().unwrap();
		assert_eq!(header.start % 8, 0);
		seen.push(header.bookmark());
	}
	let types: Vec<u32> = seen.iter().map(|b| b.type_id).collect();
	assert_eq!(types, vec![TABLE_CHUNK, COLUMNS_CHUNK, ROWS_CHUNK]);

	chunks.seek_to(&seen[1]).unwrap();
	assert_eq!(chunks.current().unwrap().type_id, COLUMNS_CHUNK);
	let mut schema = Vec::new();
	chunks.data().unwrap().read_to_end(&mut schema).unwrap();
	assert_eq!(&schema[..16], Uuid::from_u128(0x5eed).to_bytes_le().as_slice());

	assert!(chunks.move_next().unwrap());
	assert_eq!(chunks.current().unwrap().type_id, ROWS_CHUNK);
	assert!(!chunks.move_next().unwrap());
}

#[test]
fn test_file_roundtrip_on_disk() {
	temp_dir(|dir| {
		let path = table_file(dir, "readings");
		let table = measurements();
		let codecs = codecs();
		let columns: Vec<_> = codecs.iter().enumerate().map(|(i, codec)| codec.descriptor(i as i16, 0)).collect();

		let mut writer = TableFileWriter::create(File::create(&path)?, &WriterConfig::default()).unwrap();
		writer.add_table(&table).unwrap();
		writer.add_columns(&table.id, &columns).unwrap();
		let mut data = writer.begin_row_data(&table.id, codecs).unwrap();
		data.write(&[Some(Value::Float8(-1.5)), Some(Value::Int4(7))]).unwrap();
		data.finish().unwrap();
		writer.finish().unwrap();

		let reader = TableFileReader::open(File::open(&path)?, &ReaderConfig::default()).unwrap();
		assert_eq!(read_all(reader), vec![vec![Some(Value::Float8(-1.5)), Some(Value::Int4(7))]]);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_rejects_foreign_file() {
	let result = TableFileReader::open(Cursor::new(b"PK\x03\x04\x14\x00\x00\x00".to_vec()), &ReaderConfig::default());
	assert!(matches!(result, Err(FormatError::UnrecognisedFormat)));
}

#[test]
fn test_rejects_future_version() {
	let mut bytes = write_sample(&sample_rows());
	bytes[4] = 2;
	let result = TableFileReader::open(Cursor::new(bytes), &ReaderConfig::default());
	assert!(matches!(result, Err(FormatError::UnsupportedVersion(2))));
}

#[test]
fn test_truncated_file_is_an_error() {
	let bytes = write_sample(&sample_rows());
	let truncated = bytes[..bytes.len() - 5].to_vec();
	let mut reader = TableFileReader::open(Cursor::new(truncated), &ReaderConfig::default()).unwrap();
	let mut failed = false;
	loop {
		match reader.next_table() {
			Ok(Some(mut data)) => {
				let mut rows = data.row_reader().unwrap();
				if rows.move_next(&mut data.rows).is_err() {
					failed = true;
				}
				break;
			}
			Ok(None) => break,
			Err(_) => {
				failed = true;
				break;
			}
		}
	}
	assert!(failed);
}

#[test]
fn test_rows_before_identity() {
	let table = measurements();
	let mut writer = TableFileWriter::new(Cursor::new(Vec::new())).unwrap();
	let mut data = writer.begin_row_data(&table.id, codecs()).unwrap();
	data.write(&[Some(Value::Float8(1.0)), Some(Value::Int4(1))]).unwrap();
	data.finish().unwrap();
	let bytes = writer.finish().unwrap().into_inner();

	let mut reader = TableFileReader::open(Cursor::new(bytes), &ReaderConfig::default()).unwrap();
	match reader.next_table() {
		Err(FormatError::OutOfOrderData {
			table: id,
			missing: MissingChunk::Table,
		}) => assert_eq!(id, table.id),
		Err(other) => panic!("unexpected {other}"),
		Ok(_) => panic!("expected out of order data"),
	}
}

#[test]
fn test_duplicate_identity_is_corrupt() {
	let table = measurements();
	let mut writer = TableFileWriter::new(Cursor::new(Vec::new())).unwrap();
	writer.add_table(&table).unwrap();
	writer.add_table(&table).unwrap();
	let bytes = writer.finish().unwrap().into_inner();

	let mut reader = TableFileReader::open(Cursor::new(bytes), &ReaderConfig::default()).unwrap();
	assert!(matches!(reader.next_table(), Err(FormatError::CorruptStream { .. })));
}
