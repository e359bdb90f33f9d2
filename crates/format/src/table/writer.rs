// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{BufWriter, Seek, Write};

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
	chunk::{ChunkedWriter, FileHeader},
	column::ColumnCodec,
	config::WriterConfig,
	error::Result,
	export::ExportModel,
	model::{ColumnDescriptor, TableDescriptor},
	primitive::Encode,
	row::{RowSource, RowWriter},
	stream::{SeekableWriteStream, TrackedWriter},
	table::{COLUMNS_CHUNK, FILE_TYPE_ID, FORMAT_VERSION, ROWS_CHUNK, TABLE_CHUNK, write_column_schema, write_table_identity},
};

pub struct TableFileWriter<W> {
	chunks: ChunkedWriter<W>,
}

impl<W: Write + Seek> TableFileWriter<TrackedWriter<BufWriter<W>>> {
	/// Buffer `output` and start a table file at its current position.
	pub fn create(output: W, config: &WriterConfig) -> Result<Self> {
		let buffered = BufWriter::with_capacity(config.buffer_size, output);
		let stream = TrackedWriter::new(buffered)?.with_strict_alignment(config.strict_alignment);
		Self::new(stream)
	}
}

impl<W: SeekableWriteStream> TableFileWriter<W> {
	pub fn new(mut stream: W) -> Result<Self> {
		FileHeader {
			type_id: FILE_TYPE_ID,
			version: FORMAT_VERSION,
		}
		.write(&mut stream)?;
		Ok(Self {
			chunks: ChunkedWriter::new(stream),
		})
	}

	pub fn add_table(&mut self, table: &TableDescriptor) -> Result<()> {
		debug!(table = %table.identifier(), id = %table.id, "writing table identity");
		self.chunks.write_chunk(TABLE_CHUNK, |stream| write_table_identity(stream, table))?;
		Ok(())
	}

	pub fn add_columns(&mut self, table_id: &Uuid, columns: &[ColumnDescriptor]) -> Result<()> {
		debug!(id = %table_id, columns = columns.len(), "writing column schema");
		self.chunks.write_chunk(COLUMNS_CHUNK, |stream| write_column_schema(stream, table_id, columns))?;
		Ok(())
	}

	/// Open a row-data chunk. `codecs` must be in the order the table's
	/// column schema lists them.
	pub fn begin_row_data(&mut self, table_id: &Uuid, codecs: Vec<ColumnCodec>) -> Result<RowDataWriter<'_, W>> {
		self.chunks.open_chunk(ROWS_CHUNK)?;
		self.chunks.stream_mut().put_guid(table_id)?;
		Ok(RowDataWriter {
			chunks: &mut self.chunks,
			rows: RowWriter::new(codecs),
			table_id: *table_id,
			count: 0,
			closed: false,
		})
	}

	/// Write identity, column schema and one row-data chunk for `model`.
	/// Rows are indexed by source field ordinal. Returns the row count.
	#[instrument(name = "table::writer::write_table", level = "debug", skip_all, fields(table = %model.table.identifier()))]
	pub fn write_table<I>(&mut self, model: &ExportModel, rows: I) -> Result<u64>
	where
		I: IntoIterator,
		I::Item: RowSource,
	{
		self.add_table(&model.table)?;
		self.add_columns(&model.table.id, &model.columns)?;

		let mut writer = self.begin_row_data(&model.table.id, model.codecs.clone())?;
		for row in rows {
			writer.write(&model.project(&row))?;
		}
		writer.finish()
	}

	/// Close any open chunk, flush and hand back the stream.
	pub fn finish(self) -> Result<W> {
		let mut stream = self.chunks.into_inner()?;
		stream.flush()?;
		Ok(stream)
	}
}

/// Writes the rows of one row-data chunk. Dropping it closes the chunk;
/// call [`RowDataWriter::finish`] to see errors from doing so.
pub struct RowDataWriter<'a, W: SeekableWriteStream> {
	chunks: &'a mut ChunkedWriter<W>,
	rows: RowWriter,
	table_id: Uuid,
	count: u64,
	closed: bool,
}

impl<W: SeekableWriteStream> RowDataWriter<'_, W> {
	pub fn write<R: RowSource + ?Sized>(&mut self, row: &R) -> Result<()> {
		self.rows.write(self.chunks.stream_mut(), row)?;
		self.count += 1;
		Ok(())
	}

	pub fn count(&self) -> u64 {
		self.count
	}

	pub fn finish(mut self) -> Result<u64> {
		self.closed = true;
		let header = self.chunks.close_chunk()?;
		debug!(id = %self.table_id, rows = self.count, bytes = header.length, "closed row data");
		Ok(self.count)
	}
}

impl<W: SeekableWriteStream> Drop for RowDataWriter<'_, W> {
	fn drop(&mut self) {
		if self.closed {
			return;
		}
		if let Err(err) = self.chunks.close_chunk() {
			warn!(id = %self.table_id, error = %err, "failed to close row data chunk");
		}
	}
}
