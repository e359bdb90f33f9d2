// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	column::ColumnCodec,
	error::{FormatError, Result},
	primitive::Encode,
	row::{NullFieldMap, ROW_MARKER, RowSource},
	stream::WriteStream,
};

/// Writes rows for one table. Codec `i` encodes ordinal `i` of each row.
#[derive(Debug)]
pub struct RowWriter {
	codecs: Vec<ColumnCodec>,
	nulls: NullFieldMap,
}

impl RowWriter {
	pub fn new(codecs: Vec<ColumnCodec>) -> Self {
		let nulls = NullFieldMap::new(&codecs);
		Self {
			codecs,
			nulls,
		}
	}

	pub fn codecs(&self) -> &[ColumnCodec] {
		&self.codecs
	}

	/// Write one row.
	///
	/// Nulls are accepted only in nullable columns. A null in any other
	/// column fails with [`FormatError::InvalidValue`] before anything is
	/// written, instead of being stored as a zero placeholder the reader
	/// could not tell apart from a real value.
	pub fn write<W, R>(&mut self, stream: &mut W, row: &R) -> Result<()>
	where
		W: WriteStream + ?Sized,
		R: RowSource + ?Sized,
	{
		self.nulls.clear();
		for (ordinal, codec) in self.codecs.iter().enumerate() {
			if row.value(ordinal).is_some() {
				continue;
			}
			if !codec.flags().is_nullable() {
				return Err(FormatError::InvalidValue {
					column: codec.name().to_string(),
					reason: "null in a column that is not nullable".to_string(),
				});
			}
			self.nulls.set_null(ordinal, true);
		}

		stream.align_write(4)?;
		stream.put_u8(ROW_MARKER)?;
		self.nulls.write(stream)?;
		stream.align_write(4)?;

		for (ordinal, codec) in self.codecs.iter_mut().enumerate() {
			if self.nulls.is_null(ordinal) && codec.flags().omit_nulls() {
				continue;
			}
			codec.write(stream, row.value(ordinal))?;
		}
		Ok(())
	}
}
