// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

/// Space separated upper-case hex, sixteen bytes per line.
pub fn hex(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(bytes.len() * 3);
	for (i, byte) in bytes.iter().enumerate() {
		if i > 0 {
			out.push(if i % 16 == 0 { '\n' } else { ' ' });
		}
		let _ = write!(out, "{byte:02X}");
	}
	out
}

/// Parse whitespace separated hex pairs, e.g. `"E7 03 00 00"`.
pub fn from_hex(text: &str) -> Vec<u8> {
	text.split_whitespace()
		.map(|pair| u8::from_str_radix(pair, 16).unwrap_or_else(|_| panic!("invalid hex byte '{pair}'")))
		.collect()
}

/// Compare byte buffers, reporting both sides as hex on mismatch.
#[track_caller]
pub fn assert_bytes_eq(actual: &[u8], expected: &[u8]) {
	if actual != expected {
		panic!("byte mismatch\n  actual:\n{}\n  expected:\n{}", hex(actual), hex(expected));
	}
}

#[cfg(test)]
pub mod tests {
	use super::{from_hex, hex};

	#[test]
	fn test_hex_lines() {
		let bytes: Vec<u8> = (0..18).collect();
		assert_eq!(hex(&bytes).lines().count(), 2);
		assert_eq!(hex(&[0xE7, 0x03]), "E7 03");
	}

	#[test]
	fn test_from_hex() {
		assert_eq!(from_hex("19 FC ff\n00"), vec![0x19, 0xFC, 0xFF, 0x00]);
	}
}
