// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	column::ColumnCodec,
	error::{FormatError, Result},
	model::Value,
	primitive::Decode,
	row::{NullFieldMap, ROW_MARKER},
	stream::ReadStream,
};

/// Reads rows for one table into a reusable row buffer.
#[derive(Debug)]
pub struct RowReader {
	codecs: Vec<ColumnCodec>,
	nulls: NullFieldMap,
	current: Vec<Option<Value>>,
}

impl RowReader {
	pub fn new(codecs: Vec<ColumnCodec>) -> Self {
		let nulls = NullFieldMap::new(&codecs);
		let current = vec![None; codecs.len()];
		Self {
			codecs,
			nulls,
			current,
		}
	}

	pub fn codecs(&self) -> &[ColumnCodec] {
		&self.codecs
	}

	pub fn column_count(&self) -> usize {
		self.codecs.len()
	}

	/// Decode the next row. Returns `false` once the stream holds no
	/// further row.
	pub fn move_next<R: ReadStream + ?Sized>(&mut self, stream: &mut R) -> Result<bool> {
		self.current.fill(None);

		if !stream.try_align_read(4)? {
			return Ok(false);
		}
		match stream.try_get_u8()? {
			None => return Ok(false),
			Some(ROW_MARKER) => {}
			Some(other) => {
				return Err(FormatError::corrupt(format!(
					"expected row marker {ROW_MARKER:#04x} at {}, found {other:#04x}",
					stream.position() - 1
				)));
			}
		}

		self.nulls.read(stream)?;
		stream.align_read(4)?;

		for (ordinal, codec) in self.codecs.iter_mut().enumerate() {
			let null = self.nulls.is_null(ordinal);
			if null && codec.flags().omit_nulls() {
				continue;
			}
			let value = codec.read(stream)?;
			if !null {
				self.current[ordinal] = Some(value);
			}
		}
		Ok(true)
	}

	pub fn current(&self) -> &[Option<Value>] {
		&self.current
	}

	pub fn value(&self, ordinal: usize) -> Option<&Value> {
		self.current.get(ordinal).and_then(Option::as_ref)
	}
}
