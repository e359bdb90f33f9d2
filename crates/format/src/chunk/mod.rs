// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Chunked container.
//!
//! A file is an 8-byte header followed by 8-aligned chunks. Each chunk is a
//! 16-byte header `u32 type | u32 reserved | i64 length` and `length` bytes
//! of data.

mod reader;
mod writer;

pub use reader::ChunkedReader;
pub use writer::ChunkedWriter;

use crate::{
	error::Result,
	primitive::{Decode, Encode},
	stream::{ReadStream, WriteStream},
};

pub const CHUNK_ALIGNMENT: u64 = 8;

pub const CHUNK_HEADER_SIZE: u64 = 16;

pub const FILE_HEADER_SIZE: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
	pub type_id: u32,
	/// Length of the data section.
	pub length: u64,
	/// Absolute offset of the chunk header.
	pub start: u64,
}

impl ChunkHeader {
	pub fn data_start(&self) -> u64 {
		self.start + CHUNK_HEADER_SIZE
	}

	pub fn data_end(&self) -> u64 {
		self.data_start() + self.length
	}

	pub fn bookmark(&self) -> ChunkBookmark {
		ChunkBookmark {
			type_id: self.type_id,
			offset: self.start,
		}
	}
}

/// Where a previously visited chunk starts, and what it should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkBookmark {
	pub type_id: u32,
	pub offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
	pub type_id: u32,
	pub version: i16,
}

impl FileHeader {
	pub fn write<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		stream.align_write(CHUNK_ALIGNMENT)?;
		stream.put_u32(self.type_id)?;
		stream.put_i16(self.version)?;
		stream.put_u16(0)
	}

	pub fn read<R: ReadStream + ?Sized>(stream: &mut R) -> Result<Self> {
		stream.align_read(CHUNK_ALIGNMENT)?;
		let type_id = stream.get_u32()?;
		let version = stream.get_i16()?;
		let _reserved = stream.get_u16()?;
		Ok(Self {
			type_id,
			version,
		})
	}
}
