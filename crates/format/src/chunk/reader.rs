// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use crate::{
	chunk::{CHUNK_ALIGNMENT, CHUNK_HEADER_SIZE, ChunkBookmark, ChunkHeader},
	error::{FormatError, Result},
	primitive::Decode,
	stream::{RangeReader, ReadStream, skip_to},
};

/// Iterates the chunks of a stream.
///
/// Moving to the next chunk skips whatever of the current chunk's data was
/// left unread. Fewer than a header's worth of trailing bytes on a stream
/// of known length count as the end of the stream.
pub struct ChunkedReader<S> {
	stream: S,
	current: Option<ChunkHeader>,
	finished: bool,
}

impl<S: ReadStream> ChunkedReader<S> {
	pub fn new(stream: S) -> Self {
		Self {
			stream,
			current: None,
			finished: false,
		}
	}

	pub fn move_next(&mut self) -> Result<bool> {
		if self.finished {
			return Ok(false);
		}
		if let Some(current) = self.current.take() {
			skip_to(&mut self.stream, current.data_end())?;
		}

		match self.read_header()? {
			Some(header) => {
				trace!(type_id = header.type_id, start = header.start, length = header.length, "chunk");
				self.current = Some(header);
				Ok(true)
			}
			None => {
				self.finished = true;
				Ok(false)
			}
		}
	}

	pub fn current(&self) -> Option<&ChunkHeader> {
		self.current.as_ref()
	}

	/// Bounded view of the current chunk's data.
	pub fn data(&mut self) -> Result<RangeReader<'_, S>> {
		let current = self.current.ok_or(FormatError::NoCurrentChunk)?;
		RangeReader::new(&mut self.stream, current.data_start(), current.length)
	}

	pub fn bookmark(&self) -> Option<ChunkBookmark> {
		self.current.map(|header| header.bookmark())
	}

	/// Return to a previously visited chunk. On failure the reader is left
	/// where it was.
	pub fn seek_to(&mut self, bookmark: &ChunkBookmark) -> Result<()> {
		if !self.stream.is_seekable() {
			return Err(FormatError::NotSeekable);
		}

		let position = self.stream.position();
		match self.read_header_at(bookmark) {
			Ok(header) => {
				self.current = Some(header);
				self.finished = false;
				Ok(())
			}
			Err(err) => {
				self.stream.seek_to(position)?;
				Err(err)
			}
		}
	}

	pub fn stream(&self) -> &S {
		&self.stream
	}

	pub fn into_inner(self) -> S {
		self.stream
	}

	fn read_header_at(&mut self, bookmark: &ChunkBookmark) -> Result<ChunkHeader> {
		self.stream.seek_to(bookmark.offset)?;
		let header = self.read_header()?.ok_or(FormatError::EndOfInput)?;
		if header.type_id != bookmark.type_id {
			return Err(FormatError::BookmarkMismatch {
				expected: bookmark.type_id,
				found: header.type_id,
			});
		}
		Ok(header)
	}

	fn read_header(&mut self) -> Result<Option<ChunkHeader>> {
		if !self.stream.try_align_read(CHUNK_ALIGNMENT)? {
			return Ok(None);
		}
		if let Some(remaining) = self.stream.remaining()
			&& remaining < CHUNK_HEADER_SIZE
		{
			return Ok(None);
		}

		let start = self.stream.position();
		if start % CHUNK_ALIGNMENT != 0 {
			return Err(FormatError::corrupt(format!("chunk header at unaligned offset {start}")));
		}

		let mut bytes = [0u8; CHUNK_HEADER_SIZE as usize];
		match self.stream.try_get_u8()? {
			None => return Ok(None),
			Some(first) => bytes[0] = first,
		}
		self.stream.get_fixed_bytes(&mut bytes[1..])?;

		let type_id = LittleEndian::read_u32(&bytes[0..4]);
		let length = LittleEndian::read_i64(&bytes[8..16]);
		let length = u64::try_from(length)
			.map_err(|_| FormatError::corrupt(format!("chunk at {start} has negative length {length}")))?;
		if let Some(remaining) = self.stream.remaining()
			&& length > remaining
		{
			return Err(FormatError::corrupt(format!(
				"chunk at {start} declares {length} bytes but only {remaining} remain"
			)));
		}

		Ok(Some(ChunkHeader {
			type_id,
			length,
			start,
		}))
	}
}
