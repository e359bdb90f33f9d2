// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{self, Read};

use crate::{
	error::{FormatError, Result},
	stream::ReadStream,
};

/// Bounded window `[start, start + length)` over a parent stream.
///
/// Positions are relative to the window start. Reads stop at the window end
/// even when the parent has more data.
pub struct RangeReader<'a, S: ReadStream + ?Sized> {
	parent: &'a mut S,
	start: u64,
	length: u64,
	offset: u64,
}

impl<'a, S: ReadStream + ?Sized> RangeReader<'a, S> {
	/// Open a window over `parent`. The parent must currently be positioned
	/// inside the window; a seekable parent outside it is moved to `start`.
	pub fn new(parent: &'a mut S, start: u64, length: u64) -> Result<Self> {
		let position = parent.position();
		let end = start + length;
		let offset = if position >= start && position <= end {
			position - start
		} else if parent.is_seekable() {
			parent.seek_to(start)?;
			0
		} else {
			return Err(FormatError::NotSeekable);
		};
		Ok(Self {
			parent,
			start,
			length,
			offset,
		})
	}

	pub fn len(&self) -> u64 {
		self.length
	}

	pub fn is_empty(&self) -> bool {
		self.length == 0
	}

	/// Absolute position of the window start in the parent stream.
	pub fn start(&self) -> u64 {
		self.start
	}
}

impl<S: ReadStream + ?Sized> Read for RangeReader<'_, S> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let left = self.length - self.offset;
		if left == 0 {
			return Ok(0);
		}
		let want = buf.len().min(usize::try_from(left).unwrap_or(usize::MAX));
		let n = self.parent.read(&mut buf[..want])?;
		self.offset += n as u64;
		Ok(n)
	}
}

impl<S: ReadStream + ?Sized> ReadStream for RangeReader<'_, S> {
	fn position(&self) -> u64 {
		self.offset
	}

	fn remaining(&self) -> Option<u64> {
		Some(self.length - self.offset)
	}

	fn is_seekable(&self) -> bool {
		self.parent.is_seekable()
	}

	fn seek_to(&mut self, position: u64) -> Result<()> {
		let position = position.min(self.length);
		self.parent.seek_to(self.start + position)?;
		self.offset = position;
		Ok(())
	}

	fn strict_alignment(&self) -> bool {
		self.parent.strict_alignment()
	}
}
