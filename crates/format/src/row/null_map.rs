// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	bitset::BitsetPacker,
	column::ColumnCodec,
	error::Result,
	primitive::{Decode, Encode},
	stream::{ReadStream, WriteStream},
};

/// Per-row null flags, persisted for nullable columns only.
#[derive(Debug, Clone)]
pub struct NullFieldMap {
	packer: BitsetPacker,
	nulls: Vec<bool>,
	packed: Vec<u8>,
}

impl NullFieldMap {
	pub fn new(codecs: &[ColumnCodec]) -> Self {
		let nullable =
			codecs.iter().enumerate().filter(|(_, codec)| codec.flags().is_nullable()).map(|(i, _)| i).collect();
		let packer = BitsetPacker::new(nullable);
		let packed = vec![0; packer.packed_byte_count()];
		Self {
			packer,
			nulls: vec![false; codecs.len()],
			packed,
		}
	}

	pub fn packed_byte_count(&self) -> usize {
		self.packed.len()
	}

	pub fn is_null(&self, ordinal: usize) -> bool {
		self.nulls[ordinal]
	}

	pub fn set_null(&mut self, ordinal: usize, null: bool) {
		self.nulls[ordinal] = null;
	}

	pub fn clear(&mut self) {
		self.nulls.fill(false);
	}

	pub fn write<W: WriteStream + ?Sized>(&mut self, stream: &mut W) -> Result<()> {
		self.packer.pack(&self.nulls, &mut self.packed);
		stream.put_fixed_bytes(&self.packed)
	}

	/// Non-nullable columns always read back as not null.
	pub fn read<R: ReadStream + ?Sized>(&mut self, stream: &mut R) -> Result<()> {
		stream.get_fixed_bytes(&mut self.packed)?;
		self.clear();
		self.packer.unpack(&self.packed, &mut self.nulls);
		Ok(())
	}
}
