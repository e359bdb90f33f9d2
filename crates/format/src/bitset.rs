// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Packs a chosen subset of a boolean vector into the fewest bytes.
///
/// Bit `j` of packed byte `i` holds `bits[indices[i * 8 + j]]`. Buffer
/// sizes are the caller's responsibility and only checked in debug builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitsetPacker {
	indices: Vec<usize>,
}

impl BitsetPacker {
	pub fn new(indices: Vec<usize>) -> Self {
		Self {
			indices,
		}
	}

	pub fn indices(&self) -> &[usize] {
		&self.indices
	}

	pub fn packed_byte_count(&self) -> usize {
		self.indices.len().div_ceil(8)
	}

	pub fn pack(&self, bits: &[bool], packed: &mut [u8]) {
		debug_assert!(packed.len() >= self.packed_byte_count());
		for (i, chunk) in self.indices.chunks(8).enumerate() {
			let mut byte = 0u8;
			for (j, &index) in chunk.iter().enumerate() {
				debug_assert!(index < bits.len());
				if bits[index] {
					byte |= 1 << j;
				}
			}
			packed[i] = byte;
		}
	}

	/// Positions of `bits` not named by the packer are left untouched.
	pub fn unpack(&self, packed: &[u8], bits: &mut [bool]) {
		debug_assert!(packed.len() >= self.packed_byte_count());
		for (i, chunk) in self.indices.chunks(8).enumerate() {
			let byte = packed[i];
			for (j, &index) in chunk.iter().enumerate() {
				debug_assert!(index < bits.len());
				bits[index] = byte & (1 << j) != 0;
			}
		}
	}
}
