// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Byte streams the container and codecs operate on.
//!
//! Readers and writers expose their absolute position so alignment can be
//! computed without seeking. Forward-only inputs (pipes, gzip) are wrapped
//! in a [`TrackedReader`] which counts the bytes it hands out.

pub mod detect;
pub mod range;
pub mod seekable;
pub mod tracked;

use std::io::{self, Cursor, Read, Write};

pub use detect::{GZIP_SIGNATURE, open_forward, open_input};
pub use range::RangeReader;
pub use seekable::SeekableReader;
pub use tracked::{TrackedReader, TrackedWriter};

use crate::error::{FormatError, Result};

pub trait ReadStream: Read {
	/// Absolute position of the next byte to be read.
	fn position(&self) -> u64;

	/// Bytes left before the end of the stream, when known.
	fn remaining(&self) -> Option<u64>;

	fn is_seekable(&self) -> bool;

	/// Move to an absolute position. Forward-only streams fail with
	/// [`FormatError::NotSeekable`].
	fn seek_to(&mut self, position: u64) -> Result<()>;

	fn strict_alignment(&self) -> bool {
		false
	}
}

pub trait WriteStream: Write {
	fn position(&self) -> u64;

	fn strict_alignment(&self) -> bool {
		false
	}
}

pub trait SeekableWriteStream: WriteStream {
	fn seek_to(&mut self, position: u64) -> Result<()>;
}

/// Advance `stream` to the absolute `target` position, seeking when the
/// stream allows it and reading-and-discarding otherwise.
pub fn skip_to<S: ReadStream + ?Sized>(stream: &mut S, target: u64) -> Result<()> {
	let position = stream.position();
	if target == position {
		return Ok(());
	}
	if stream.is_seekable() {
		return stream.seek_to(target);
	}
	if target < position {
		return Err(FormatError::NotSeekable);
	}

	let wanted = target - position;
	let skipped = io::copy(&mut (&mut *stream).take(wanted), &mut io::sink())?;
	if skipped < wanted {
		return Err(FormatError::EndOfInput);
	}
	Ok(())
}

impl<T: AsRef<[u8]>> ReadStream for Cursor<T> {
	fn position(&self) -> u64 {
		Cursor::position(self)
	}

	fn remaining(&self) -> Option<u64> {
		let len = self.get_ref().as_ref().len() as u64;
		Some(len.saturating_sub(Cursor::position(self)))
	}

	fn is_seekable(&self) -> bool {
		true
	}

	fn seek_to(&mut self, position: u64) -> Result<()> {
		self.set_position(position);
		Ok(())
	}
}

impl WriteStream for Cursor<Vec<u8>> {
	fn position(&self) -> u64 {
		Cursor::position(self)
	}
}

impl SeekableWriteStream for Cursor<Vec<u8>> {
	fn seek_to(&mut self, position: u64) -> Result<()> {
		self.set_position(position);
		Ok(())
	}
}

impl WriteStream for Cursor<&mut Vec<u8>> {
	fn position(&self) -> u64 {
		Cursor::position(self)
	}
}

impl SeekableWriteStream for Cursor<&mut Vec<u8>> {
	fn seek_to(&mut self, position: u64) -> Result<()> {
		self.set_position(position);
		Ok(())
	}
}

impl<S: ReadStream + ?Sized> ReadStream for Box<S> {
	fn position(&self) -> u64 {
		(**self).position()
	}

	fn remaining(&self) -> Option<u64> {
		(**self).remaining()
	}

	fn is_seekable(&self) -> bool {
		(**self).is_seekable()
	}

	fn seek_to(&mut self, position: u64) -> Result<()> {
		(**self).seek_to(position)
	}

	fn strict_alignment(&self) -> bool {
		(**self).strict_alignment()
	}
}

impl<S: ReadStream + ?Sized> ReadStream for &mut S {
	fn position(&self) -> u64 {
		(**self).position()
	}

	fn remaining(&self) -> Option<u64> {
		(**self).remaining()
	}

	fn is_seekable(&self) -> bool {
		(**self).is_seekable()
	}

	fn seek_to(&mut self, position: u64) -> Result<()> {
		(**self).seek_to(position)
	}

	fn strict_alignment(&self) -> bool {
		(**self).strict_alignment()
	}
}

impl<S: WriteStream + ?Sized> WriteStream for &mut S {
	fn position(&self) -> u64 {
		(**self).position()
	}

	fn strict_alignment(&self) -> bool {
		(**self).strict_alignment()
	}
}

impl<S: SeekableWriteStream + ?Sized> SeekableWriteStream for &mut S {
	fn seek_to(&mut self, position: u64) -> Result<()> {
		(**self).seek_to(position)
	}
}

#[cfg(test)]
pub mod tests {
	use std::io::{Cursor, Read};

	use super::{ReadStream, TrackedReader, skip_to};
	use crate::error::FormatError;

	#[test]
	fn test_skip_to_seeks_cursor() {
		let mut cursor = Cursor::new(vec![1u8, 2, 3, 4, 5]);
		skip_to(&mut cursor, 3).unwrap();
		assert_eq!(ReadStream::position(&cursor), 3);
		assert_eq!(cursor.remaining(), Some(2));
	}

	#[test]
	fn test_skip_to_reads_forward_only() {
		let mut reader = TrackedReader::new(&[1u8, 2, 3, 4, 5][..], 0);
		skip_to(&mut reader, 4).unwrap();
		let mut rest = Vec::new();
		reader.read_to_end(&mut rest).unwrap();
		assert_eq!(rest, vec![5]);
	}

	#[test]
	fn test_skip_to_backwards_requires_seek() {
		let mut reader = TrackedReader::new(&[1u8, 2, 3][..], 0);
		skip_to(&mut reader, 2).unwrap();
		assert!(matches!(skip_to(&mut reader, 1), Err(FormatError::NotSeekable)));
	}

	#[test]
	fn test_skip_to_past_end_of_forward_stream() {
		let mut reader = TrackedReader::new(&[1u8, 2][..], 0);
		assert!(matches!(skip_to(&mut reader, 10), Err(FormatError::EndOfInput)));
	}
}
