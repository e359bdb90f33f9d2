// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	io::{Read, Seek},
};

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
	chunk::{ChunkedReader, FileHeader},
	column::{ColumnCodec, validate_against},
	config::ReaderConfig,
	error::{FormatError, MissingChunk, Result},
	model::{ColumnDescriptor, TableDescriptor},
	primitive::Decode,
	row::RowReader,
	stream::{RangeReader, ReadStream, open_forward, open_input},
	table::{COLUMNS_CHUNK, FILE_TYPE_ID, FORMAT_VERSION, ROWS_CHUNK, TABLE_CHUNK, read_column_schema, read_table_identity},
};

/// One row-data chunk resolved against its table and column schema.
pub struct TableData<'a, S: ReadStream + ?Sized> {
	pub table: TableDescriptor,
	pub columns: Vec<ColumnDescriptor>,
	/// Rows of the chunk, positioned at the first row.
	pub rows: RangeReader<'a, S>,
}

impl<S: ReadStream + ?Sized> TableData<'_, S> {
	/// Codecs for `columns`, each checked against its descriptor.
	pub fn codecs(&self) -> Result<Vec<ColumnCodec>> {
		self.columns
			.iter()
			.map(|column| {
				let codec = ColumnCodec::from_descriptor(column)?;
				validate_against(&codec, column)?;
				Ok(codec)
			})
			.collect()
	}

	pub fn row_reader(&self) -> Result<RowReader> {
		Ok(RowReader::new(self.codecs()?))
	}
}

pub struct TableFileReader<S> {
	chunks: ChunkedReader<S>,
	tables: HashMap<Uuid, TableDescriptor>,
	columns: HashMap<Uuid, Vec<ColumnDescriptor>>,
}

impl<'a> TableFileReader<Box<dyn ReadStream + 'a>> {
	/// Open a seekable input, plain or gzip-compressed.
	pub fn open<R: Read + Seek + 'a>(input: R, config: &ReaderConfig) -> Result<Self> {
		Self::new(open_input(input, config)?)
	}

	/// Open a forward-only input, plain or gzip-compressed.
	pub fn open_forward<R: Read + 'a>(input: R, config: &ReaderConfig) -> Result<Self> {
		Self::new(open_forward(input, config)?)
	}
}

impl<S: ReadStream> TableFileReader<S> {
	pub fn new(mut stream: S) -> Result<Self> {
		let header = FileHeader::read(&mut stream)?;
		if header.type_id != FILE_TYPE_ID {
			return Err(FormatError::UnrecognisedFormat);
		}
		if header.version != FORMAT_VERSION {
			return Err(FormatError::UnsupportedVersion(header.version));
		}
		Ok(Self {
			chunks: ChunkedReader::new(stream),
			tables: HashMap::new(),
			columns: HashMap::new(),
		})
	}

	/// Tables whose identity chunk has been read so far.
	pub fn tables(&self) -> impl Iterator<Item = &TableDescriptor> {
		self.tables.values()
	}

	pub fn table(&self, id: &Uuid) -> Option<&TableDescriptor> {
		self.tables.get(id)
	}

	pub fn columns(&self, id: &Uuid) -> Option<&[ColumnDescriptor]> {
		self.columns.get(id).map(Vec::as_slice)
	}

	/// Advance to the next row-data chunk, collecting the identity and
	/// column-schema chunks on the way. Unknown chunk types are skipped.
	#[instrument(name = "table::reader::next_table", level = "trace", skip(self))]
	pub fn next_table(&mut self) -> Result<Option<TableData<'_, S>>> {
		while self.chunks.move_next()? {
			let Some(header) = self.chunks.current().copied() else {
				break;
			};
			match header.type_id {
				TABLE_CHUNK => {
					let table = read_table_identity(&mut self.chunks.data()?)?;
					if self.tables.contains_key(&table.id) {
						return Err(FormatError::corrupt(format!("duplicate identity chunk for table {}", table.id)));
					}
					debug!(table = %table.identifier(), id = %table.id, "read table identity");
					self.tables.insert(table.id, table);
				}
				COLUMNS_CHUNK => {
					let (id, columns) = read_column_schema(&mut self.chunks.data()?)?;
					if self.columns.contains_key(&id) {
						return Err(FormatError::corrupt(format!("duplicate column schema chunk for table {id}")));
					}
					debug!(id = %id, columns = columns.len(), "read column schema");
					self.columns.insert(id, columns);
				}
				ROWS_CHUNK => {
					let id = self.chunks.data()?.get_guid()?;
					let table = self.tables.get(&id).cloned().ok_or(FormatError::OutOfOrderData {
						table: id,
						missing: MissingChunk::Table,
					})?;
					let columns = self.columns.get(&id).cloned().ok_or(FormatError::OutOfOrderData {
						table: id,
						missing: MissingChunk::Columns,
					})?;
					debug!(table = %table.identifier(), bytes = header.length, "row data");
					return Ok(Some(TableData {
						table,
						columns,
						rows: self.chunks.data()?,
					}));
				}
				other => debug!(type_id = other, start = header.start, "skipping unknown chunk"),
			}
		}
		Ok(None)
	}

	pub fn into_inner(self) -> S {
		self.chunks.into_inner()
	}
}
