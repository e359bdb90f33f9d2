// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::{
	error::{FormatError, Result},
	stream::{ReadStream, SeekableWriteStream, WriteStream},
};

/// Forward-only reader that counts the bytes it has produced.
pub struct TrackedReader<R> {
	inner: R,
	position: u64,
	strict: bool,
}

impl<R: Read> TrackedReader<R> {
	/// Wrap `inner`, assuming it is currently at absolute offset `start`.
	pub fn new(inner: R, start: u64) -> Self {
		Self {
			inner,
			position: start,
			strict: false,
		}
	}

	pub fn with_strict_alignment(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read> Read for TrackedReader<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let n = self.inner.read(buf)?;
		self.position += n as u64;
		Ok(n)
	}
}

impl<R: Read> ReadStream for TrackedReader<R> {
	fn position(&self) -> u64 {
		self.position
	}

	fn remaining(&self) -> Option<u64> {
		None
	}

	fn is_seekable(&self) -> bool {
		false
	}

	fn seek_to(&mut self, _position: u64) -> Result<()> {
		Err(FormatError::NotSeekable)
	}

	fn strict_alignment(&self) -> bool {
		self.strict
	}
}

/// Seekable writer caching its position so alignment never queries the OS.
pub struct TrackedWriter<W> {
	inner: W,
	position: u64,
	strict: bool,
}

impl<W: Write + Seek> TrackedWriter<W> {
	pub fn new(mut inner: W) -> io::Result<Self> {
		let position = inner.stream_position()?;
		Ok(Self {
			inner,
			position,
			strict: false,
		})
	}

	pub fn with_strict_alignment(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	pub fn into_inner(self) -> W {
		self.inner
	}
}

impl<W: Write> Write for TrackedWriter<W> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		let n = self.inner.write(buf)?;
		self.position += n as u64;
		Ok(n)
	}

	fn flush(&mut self) -> io::Result<()> {
		self.inner.flush()
	}
}

impl<W: Write + Seek> WriteStream for TrackedWriter<W> {
	fn position(&self) -> u64 {
		self.position
	}

	fn strict_alignment(&self) -> bool {
		self.strict
	}
}

impl<W: Write + Seek> SeekableWriteStream for TrackedWriter<W> {
	fn seek_to(&mut self, position: u64) -> Result<()> {
		self.position = self.inner.seek(SeekFrom::Start(position))?;
		Ok(())
	}
}
