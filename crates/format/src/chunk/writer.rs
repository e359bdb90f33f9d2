// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::trace;

use crate::{
	chunk::{CHUNK_ALIGNMENT, CHUNK_HEADER_SIZE, ChunkHeader},
	error::{FormatError, Result},
	primitive::Encode,
	stream::SeekableWriteStream,
};

#[derive(Debug, Clone, Copy)]
struct OpenChunk {
	type_id: u32,
	start: u64,
}

/// Writes chunks one at a time. The data length is back-patched into the
/// header when the chunk is closed.
pub struct ChunkedWriter<W> {
	stream: W,
	open: Option<OpenChunk>,
}

impl<W: SeekableWriteStream> ChunkedWriter<W> {
	pub fn new(stream: W) -> Self {
		Self {
			stream,
			open: None,
		}
	}

	pub fn open_chunk(&mut self, type_id: u32) -> Result<()> {
		if let Some(open) = self.open {
			return Err(FormatError::ChunkAlreadyOpen {
				open: open.type_id,
				requested: type_id,
			});
		}

		self.stream.align_write(CHUNK_ALIGNMENT)?;
		let start = self.stream.position();
		self.stream.put_u32(type_id)?;
		self.stream.put_u32(0)?;
		self.stream.put_i64(0)?;
		self.open = Some(OpenChunk {
			type_id,
			start,
		});
		trace!(type_id, start, "opened chunk");
		Ok(())
	}

	/// Stream positioned inside the open chunk's data section.
	pub fn stream_mut(&mut self) -> &mut W {
		&mut self.stream
	}

	pub fn is_open(&self) -> bool {
		self.open.is_some()
	}

	pub fn close_chunk(&mut self) -> Result<ChunkHeader> {
		let open = self.open.take().ok_or(FormatError::NoCurrentChunk)?;
		let end = self.stream.position();
		let header = ChunkHeader {
			type_id: open.type_id,
			length: end - open.start - CHUNK_HEADER_SIZE,
			start: open.start,
		};
		let length = i64::try_from(header.length)
			.map_err(|_| FormatError::corrupt(format!("chunk length {} overflows", header.length)))?;

		self.stream.seek_to(open.start + 8)?;
		self.stream.put_i64(length)?;
		self.stream.seek_to(end)?;
		trace!(type_id = header.type_id, length, "closed chunk");
		Ok(header)
	}

	/// Open a chunk, let `write` fill its data section, then close it.
	pub fn write_chunk<F>(&mut self, type_id: u32, write: F) -> Result<ChunkHeader>
	where
		F: FnOnce(&mut W) -> Result<()>,
	{
		self.open_chunk(type_id)?;
		write(&mut self.stream)?;
		self.close_chunk()
	}

	/// Close any open chunk and hand back the stream.
	pub fn into_inner(mut self) -> Result<W> {
		if self.open.is_some() {
			self.close_chunk()?;
		}
		Ok(self.stream)
	}
}
