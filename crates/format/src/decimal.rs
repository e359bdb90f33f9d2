// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixed-width packing of arbitrary precision decimals.
//!
//! A packed decimal is `significand_bytes` of two's-complement little-endian
//! significand followed by one byte holding the negated scale. Buffer sizes
//! are always a multiple of four.

use std::f32::consts::{LOG2_10, LOG10_2};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};

use crate::error::{FormatError, Result};

/// Largest precision and scale a decimal may carry.
pub const MAX_PRECISION: u32 = 38;

/// Width of the widest significand a decimal value natively holds.
pub const NATIVE_SIGNIFICAND_BYTES: usize = 16;

const SCALE_BITS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct UnpackedDecimal {
	pub value: BigDecimal,
	pub precision: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalPacker {
	digit_count: u32,
	byte_count: usize,
}

impl DecimalPacker {
	/// Smallest packer able to hold any signed integer of `digits` digits.
	pub fn for_digit_count(digits: u32) -> Self {
		let significand_bits = signed_bits_for_digits(digits) as usize;
		Self {
			digit_count: digits,
			byte_count: 4 * (1 + (significand_bits + SCALE_BITS - 1) / 32),
		}
	}

	/// Packer for an existing buffer width, deriving the digits it can hold.
	pub fn for_buffer_size(bytes: usize) -> Result<Self> {
		if bytes == 0 || bytes % 4 != 0 {
			return Err(FormatError::CorruptDecimal {
				reason: format!("buffer size must be a positive multiple of 4, got {bytes}"),
			});
		}
		let unsigned_bits = bytes * 8 - SCALE_BITS - 1;
		let digit_count = ((unsigned_bits - 1) as f32 * LOG10_2).ceil() as u32;
		Ok(Self {
			digit_count,
			byte_count: bytes,
		})
	}

	pub fn digit_count(&self) -> u32 {
		self.digit_count
	}

	pub fn byte_count(&self) -> usize {
		self.byte_count
	}

	fn significand_bytes(&self) -> usize {
		self.byte_count - 1
	}

	pub fn create_buffer(&self) -> Vec<u8> {
		vec![0; self.byte_count]
	}

	pub fn pack(&self, value: &BigDecimal, buffer: &mut [u8]) -> Result<()> {
		self.check_buffer(buffer)?;
		let (significand, scale) = split(value).ok_or_else(|| self.overflow(value))?;
		if significand.magnitude().bits() > (NATIVE_SIGNIFICAND_BYTES * 8) as u64 {
			return Err(self.overflow(value));
		}

		let bytes = significand.to_signed_bytes_le();
		let width = self.significand_bytes();
		if bytes.len() > width {
			return Err(self.overflow(value));
		}

		let sign = if significand.sign() == Sign::Minus {
			0xff
		} else {
			0x00
		};
		buffer[..bytes.len()].copy_from_slice(&bytes);
		buffer[bytes.len()..width].fill(sign);
		buffer[width] = scale.wrapping_neg();
		Ok(())
	}

	pub fn unpack(&self, buffer: &[u8]) -> Result<UnpackedDecimal> {
		self.check_buffer(buffer)?;
		let width = self.significand_bytes();

		let scale = buffer[width].wrapping_neg();
		if u32::from(scale) > MAX_PRECISION {
			return Err(FormatError::CorruptDecimal {
				reason: format!("scale {scale} exceeds {MAX_PRECISION}"),
			});
		}

		let sign = if buffer[width - 1] & 0x80 == 0 {
			0x00
		} else {
			0xff
		};
		if width > NATIVE_SIGNIFICAND_BYTES
			&& buffer[NATIVE_SIGNIFICAND_BYTES..width].iter().any(|&b| b != sign)
		{
			return Err(self.too_wide());
		}

		let significand = BigInt::from_signed_bytes_le(&buffer[..width]);
		if significand.magnitude().bits() > (NATIVE_SIGNIFICAND_BYTES * 8) as u64 {
			return Err(self.too_wide());
		}

		Ok(UnpackedDecimal {
			value: BigDecimal::new(significand, i64::from(scale)),
			precision: u32::from(scale).max(self.digit_count.min(MAX_PRECISION)),
		})
	}

	fn check_buffer(&self, buffer: &[u8]) -> Result<()> {
		if buffer.len() != self.byte_count {
			return Err(FormatError::CorruptDecimal {
				reason: format!("incorrect buffer size, expected {} got {}", self.byte_count, buffer.len()),
			});
		}
		Ok(())
	}

	fn overflow(&self, value: &BigDecimal) -> FormatError {
		FormatError::PrecisionOverflow {
			digits: self.digit_count,
			value: value.to_string(),
		}
	}

	fn too_wide(&self) -> FormatError {
		FormatError::CorruptDecimal {
			reason: format!(
				"a decimal holds at most {} bits but the {}-byte buffer encodes more",
				NATIVE_SIGNIFICAND_BYTES * 8,
				self.byte_count
			),
		}
	}
}

/// Bits needed to store any signed integer with `digits` decimal digits.
pub fn signed_bits_for_digits(digits: u32) -> u32 {
	(digits as f32 * LOG2_10).ceil() as u32 + 1
}

/// Significand and non-negative scale of `value`, or `None` when the scale
/// cannot be brought within [`MAX_PRECISION`].
fn split(value: &BigDecimal) -> Option<(BigInt, u8)> {
	let (mut significand, mut scale) = value.as_bigint_and_exponent();
	if significand.sign() == Sign::NoSign {
		return Some((significand, 0));
	}
	if scale > i64::from(MAX_PRECISION) {
		(significand, scale) = value.normalized().into_bigint_and_exponent();
	}
	if scale < 0 {
		// a non-zero value times 10^39 already exceeds every supported precision
		if -scale > i64::from(MAX_PRECISION) {
			return None;
		}
		let exponent = u32::try_from(-scale).ok()?;
		significand *= BigInt::from(10u8).pow(exponent);
		scale = 0;
	}
	if scale > i64::from(MAX_PRECISION) {
		return None;
	}
	Some((significand, scale as u8))
}
