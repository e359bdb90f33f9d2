// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Little-endian primitives, length-prefixed buffers and alignment padding.
//!
//! Nothing here aligns implicitly. Callers issue `align_read`/`align_write`
//! before any primitive whose position matters; strict streams assert this
//! in debug builds.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use uuid::Uuid;

use crate::{
	error::{FormatError, Result},
	stream::{ReadStream, WriteStream},
};

/// Largest alignment any layout may request.
pub const MAX_ALIGNMENT: u64 = 16;

const ZEROES: [u8; MAX_ALIGNMENT as usize] = [0; MAX_ALIGNMENT as usize];

/// Bytes needed to advance `position` to the next multiple of `alignment`.
pub fn padding(position: u64, alignment: u64) -> u64 {
	debug_assert!(alignment.is_power_of_two() && alignment <= MAX_ALIGNMENT, "invalid alignment {alignment}");
	(alignment - position % alignment) % alignment
}

fn check_read_aligned<S: ReadStream + ?Sized>(stream: &S, alignment: u64) {
	debug_assert!(
		!stream.strict_alignment() || stream.position() % alignment == 0,
		"read of {alignment}-aligned value at position {}",
		stream.position()
	);
}

fn check_write_aligned<S: WriteStream + ?Sized>(stream: &S, alignment: u64) {
	debug_assert!(
		!stream.strict_alignment() || stream.position() % alignment == 0,
		"write of {alignment}-aligned value at position {}",
		stream.position()
	);
}

pub trait Decode: ReadStream {
	fn get_u8(&mut self) -> Result<u8> {
		Ok(self.read_u8()?)
	}

	/// Read a single byte, or `None` at a clean end of stream.
	fn try_get_u8(&mut self) -> Result<Option<u8>> {
		let mut byte = [0u8; 1];
		loop {
			match self.read(&mut byte) {
				Ok(0) => return Ok(None),
				Ok(_) => return Ok(Some(byte[0])),
				Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
				Err(e) => return Err(e.into()),
			}
		}
	}

	fn get_i16(&mut self) -> Result<i16> {
		check_read_aligned(self, 2);
		Ok(self.read_i16::<LittleEndian>()?)
	}

	fn get_u16(&mut self) -> Result<u16> {
		check_read_aligned(self, 2);
		Ok(self.read_u16::<LittleEndian>()?)
	}

	fn get_i32(&mut self) -> Result<i32> {
		check_read_aligned(self, 4);
		Ok(self.read_i32::<LittleEndian>()?)
	}

	fn get_u32(&mut self) -> Result<u32> {
		check_read_aligned(self, 4);
		Ok(self.read_u32::<LittleEndian>()?)
	}

	fn get_i64(&mut self) -> Result<i64> {
		check_read_aligned(self, 4);
		Ok(self.read_i64::<LittleEndian>()?)
	}

	fn get_u64(&mut self) -> Result<u64> {
		check_read_aligned(self, 4);
		Ok(self.read_u64::<LittleEndian>()?)
	}

	fn get_f32(&mut self) -> Result<f32> {
		check_read_aligned(self, 4);
		Ok(self.read_f32::<LittleEndian>()?)
	}

	fn get_f64(&mut self) -> Result<f64> {
		check_read_aligned(self, 4);
		Ok(self.read_f64::<LittleEndian>()?)
	}

	/// 128-bit identifier: `u32 | u16 | u16` little-endian, then 8 raw bytes.
	fn get_guid(&mut self) -> Result<Uuid> {
		check_read_aligned(self, 4);
		let mut bytes = [0u8; 16];
		self.read_exact(&mut bytes)?;
		Ok(Uuid::from_bytes_le(bytes))
	}

	/// `u32` length prefix followed by that many bytes.
	fn get_bytes(&mut self) -> Result<Vec<u8>> {
		let len = u64::from(self.get_u32()?);
		if let Some(remaining) = self.remaining()
			&& len > remaining
		{
			return Err(FormatError::EndOfInput);
		}

		let mut bytes = Vec::with_capacity(len.min(64 * 1024) as usize);
		let n = (&mut *self).take(len).read_to_end(&mut bytes)?;
		if (n as u64) < len {
			return Err(FormatError::EndOfInput);
		}
		Ok(bytes)
	}

	fn get_string(&mut self) -> Result<String> {
		let bytes = self.get_bytes()?;
		String::from_utf8(bytes).map_err(|e| FormatError::corrupt(format!("invalid utf-8 text: {e}")))
	}

	/// Fill `buf` exactly, with no length prefix.
	fn get_fixed_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
		self.read_exact(buf)?;
		Ok(())
	}

	fn align_read(&mut self, alignment: u64) -> Result<()> {
		if self.try_align_read(alignment)? {
			Ok(())
		} else {
			Err(FormatError::EndOfInput)
		}
	}

	/// Like [`Decode::align_read`], but reports `false` instead of failing
	/// when the padding would run past the end of the stream.
	fn try_align_read(&mut self, alignment: u64) -> Result<bool> {
		let pad = padding(self.position(), alignment) as usize;
		if pad == 0 {
			return Ok(true);
		}
		if let Some(remaining) = self.remaining()
			&& remaining < pad as u64
		{
			return Ok(false);
		}

		let mut scratch = [0u8; MAX_ALIGNMENT as usize];
		let mut filled = 0;
		while filled < pad {
			match self.read(&mut scratch[filled..pad]) {
				Ok(0) => return Ok(false),
				Ok(n) => filled += n,
				Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
				Err(e) => return Err(e.into()),
			}
		}
		Ok(true)
	}
}

impl<S: ReadStream + ?Sized> Decode for S {}

pub trait Encode: WriteStream {
	fn put_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.write_u8(value)?)
	}

	fn put_i16(&mut self, value: i16) -> Result<()> {
		check_write_aligned(self, 2);
		Ok(self.write_i16::<LittleEndian>(value)?)
	}

	fn put_u16(&mut self, value: u16) -> Result<()> {
		check_write_aligned(self, 2);
		Ok(self.write_u16::<LittleEndian>(value)?)
	}

	fn put_i32(&mut self, value: i32) -> Result<()> {
		check_write_aligned(self, 4);
		Ok(self.write_i32::<LittleEndian>(value)?)
	}

	fn put_u32(&mut self, value: u32) -> Result<()> {
		check_write_aligned(self, 4);
		Ok(self.write_u32::<LittleEndian>(value)?)
	}

	fn put_i64(&mut self, value: i64) -> Result<()> {
		check_write_aligned(self, 4);
		Ok(self.write_i64::<LittleEndian>(value)?)
	}

	fn put_u64(&mut self, value: u64) -> Result<()> {
		check_write_aligned(self, 4);
		Ok(self.write_u64::<LittleEndian>(value)?)
	}

	fn put_f32(&mut self, value: f32) -> Result<()> {
		check_write_aligned(self, 4);
		Ok(self.write_f32::<LittleEndian>(value)?)
	}

	fn put_f64(&mut self, value: f64) -> Result<()> {
		check_write_aligned(self, 4);
		Ok(self.write_f64::<LittleEndian>(value)?)
	}

	fn put_guid(&mut self, value: &Uuid) -> Result<()> {
		check_write_aligned(self, 4);
		Ok(self.write_all(&value.to_bytes_le())?)
	}

	fn put_bytes(&mut self, value: &[u8]) -> Result<()> {
		let len = u32::try_from(value.len())
			.map_err(|_| FormatError::corrupt(format!("buffer of {} bytes exceeds length prefix", value.len())))?;
		self.put_u32(len)?;
		Ok(self.write_all(value)?)
	}

	fn put_string(&mut self, value: &str) -> Result<()> {
		self.put_bytes(value.as_bytes())
	}

	fn put_fixed_bytes(&mut self, value: &[u8]) -> Result<()> {
		Ok(self.write_all(value)?)
	}

	/// Emit zero bytes up to the next multiple of `alignment`.
	fn align_write(&mut self, alignment: u64) -> Result<()> {
		let pad = padding(self.position(), alignment) as usize;
		if pad > 0 {
			self.write_all(&ZEROES[..pad])?;
		}
		Ok(())
	}
}

impl<S: WriteStream + ?Sized> Encode for S {}

#[cfg(test)]
pub mod tests {
	use std::io::Cursor;

	use uuid::Uuid;

	use super::{Decode, Encode, padding};
	use crate::{error::FormatError, stream::ReadStream};

	#[test]
	fn test_padding() {
		assert_eq!(padding(0, 4), 0);
		assert_eq!(padding(1, 4), 3);
		assert_eq!(padding(5, 8), 3);
		assert_eq!(padding(17, 16), 15);
		assert_eq!(padding(9, 1), 0);
	}

	#[test]
	fn test_integers_are_little_endian() {
		let mut out = Cursor::new(Vec::new());
		out.put_i16(-2).unwrap();
		out.put_u16(0x0102).unwrap();
		out.put_i32(0x01020304).unwrap();
		out.put_i64(-1).unwrap();
		assert_eq!(
			out.into_inner(),
			vec![0xfe, 0xff, 0x02, 0x01, 0x04, 0x03, 0x02, 0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
		);
	}

	#[test]
	fn test_set_get_after_misaligned_start() {
		let mut out = Cursor::new(Vec::new());
		out.put_u8(0xAA).unwrap();
		out.align_write(4).unwrap();
		out.put_f64(42.5).unwrap();
		out.align_write(2).unwrap();
		out.put_i16(i16::MIN).unwrap();
		out.align_write(4).unwrap();
		out.put_f32(-1.25).unwrap();
		out.align_write(8).unwrap();
		out.put_u64(u64::MAX).unwrap();

		let mut input = Cursor::new(out.into_inner());
		assert_eq!(input.get_u8().unwrap(), 0xAA);
		input.align_read(4).unwrap();
		assert_eq!(input.get_f64().unwrap(), 42.5);
		input.align_read(2).unwrap();
		assert_eq!(input.get_i16().unwrap(), i16::MIN);
		input.align_read(4).unwrap();
		assert_eq!(input.get_f32().unwrap(), -1.25);
		input.align_read(8).unwrap();
		assert_eq!(input.get_u64().unwrap(), u64::MAX);
		assert_eq!(input.remaining(), Some(0));
	}

	#[test]
	fn test_guid_layout() {
		let id = Uuid::parse_str("00112233-4455-6677-8899-aabbccddeeff").unwrap();
		let mut out = Cursor::new(Vec::new());
		out.put_guid(&id).unwrap();
		let bytes = out.into_inner();
		assert_eq!(
			bytes,
			vec![0x33, 0x22, 0x11, 0x00, 0x55, 0x44, 0x77, 0x66, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]
		);
		assert_eq!(Cursor::new(bytes).get_guid().unwrap(), id);
	}

	#[test]
	fn test_length_prefixed_text() {
		let mut out = Cursor::new(Vec::new());
		out.put_string("héllo").unwrap();
		let bytes = out.into_inner();
		assert_eq!(&bytes[..4], &[6, 0, 0, 0]);
		assert_eq!(Cursor::new(bytes).get_string().unwrap(), "héllo");
	}

	#[test]
	fn test_empty_buffer() {
		let mut out = Cursor::new(Vec::new());
		out.put_bytes(&[]).unwrap();
		let mut input = Cursor::new(out.into_inner());
		assert_eq!(input.get_bytes().unwrap(), Vec::<u8>::new());
	}

	#[test]
	fn test_truncated_primitive_is_end_of_input() {
		let mut input = Cursor::new(vec![1u8, 2, 3]);
		assert!(matches!(input.get_i32(), Err(FormatError::EndOfInput)));
	}

	#[test]
	fn test_truncated_buffer_is_end_of_input() {
		let mut input = Cursor::new(vec![10u8, 0, 0, 0, 1, 2]);
		assert!(matches!(input.get_bytes(), Err(FormatError::EndOfInput)));
	}

	#[test]
	fn test_invalid_utf8_is_corrupt() {
		let mut input = Cursor::new(vec![2u8, 0, 0, 0, 0xff, 0xfe]);
		assert!(matches!(input.get_string(), Err(FormatError::CorruptStream { .. })));
	}

	#[test]
	fn test_align_read_past_end() {
		let mut input = Cursor::new(vec![1u8, 0]);
		input.get_u8().unwrap();
		assert!(!input.try_align_read(4).unwrap());
		assert!(matches!(input.align_read(4), Err(FormatError::EndOfInput)));
	}

	#[test]
	fn test_try_get_u8_at_end() {
		let mut input = Cursor::new(vec![7u8]);
		assert_eq!(input.try_get_u8().unwrap(), Some(7));
		assert_eq!(input.try_get_u8().unwrap(), None);
	}
}
