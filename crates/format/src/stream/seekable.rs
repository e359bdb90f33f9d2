// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{self, Read, Seek, SeekFrom};

use crate::{error::Result, stream::ReadStream};

/// Read-only view of a seekable source with cached position and length.
///
/// The length is taken once at construction; the source must not grow or
/// shrink while it is being read.
pub struct SeekableReader<R> {
	inner: R,
	position: u64,
	length: u64,
	strict: bool,
}

impl<R: Read + Seek> SeekableReader<R> {
	pub fn new(mut inner: R) -> io::Result<Self> {
		let position = inner.stream_position()?;
		let length = inner.seek(SeekFrom::End(0))?;
		inner.seek(SeekFrom::Start(position))?;
		Ok(Self {
			inner,
			position,
			length,
			strict: false,
		})
	}

	pub fn with_strict_alignment(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	pub fn len(&self) -> u64 {
		self.length
	}

	pub fn is_empty(&self) -> bool {
		self.length == 0
	}

	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read> Read for SeekableReader<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let n = self.inner.read(buf)?;
		self.position += n as u64;
		Ok(n)
	}
}

impl<R: Read + Seek> ReadStream for SeekableReader<R> {
	fn position(&self) -> u64 {
		self.position
	}

	fn remaining(&self) -> Option<u64> {
		Some(self.length.saturating_sub(self.position))
	}

	fn is_seekable(&self) -> bool {
		true
	}

	fn seek_to(&mut self, position: u64) -> Result<()> {
		if position != self.position {
			self.position = self.inner.seek(SeekFrom::Start(position))?;
		}
		Ok(())
	}

	fn strict_alignment(&self) -> bool {
		self.strict
	}
}

#[cfg(test)]
pub mod tests {
	use std::io::{Cursor, Read};

	use super::SeekableReader;
	use crate::stream::ReadStream;

	#[test]
	fn test_caches_length_and_position() {
		let mut cursor = Cursor::new(vec![0u8; 32]);
		cursor.set_position(8);
		let mut reader = SeekableReader::new(cursor).unwrap();
		assert_eq!(reader.position(), 8);
		assert_eq!(reader.len(), 32);
		assert_eq!(reader.remaining(), Some(24));

		let mut buf = [0u8; 4];
		reader.read_exact(&mut buf).unwrap();
		assert_eq!(reader.remaining(), Some(20));

		reader.seek_to(30).unwrap();
		assert_eq!(reader.remaining(), Some(2));
	}
}
