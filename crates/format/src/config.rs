// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Settings applied when opening a table file for reading.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
	/// Assert that aligned primitives are read from aligned positions.
	pub strict_alignment: bool,
	/// Capacity of the buffer placed in front of the raw input.
	pub buffer_size: usize,
}

impl Default for ReaderConfig {
	fn default() -> Self {
		Self {
			strict_alignment: cfg!(debug_assertions),
			buffer_size: 4 * 1024 * 1024,
		}
	}
}

/// Settings applied when creating a table file.
#[derive(Debug, Clone)]
pub struct WriterConfig {
	/// Assert that aligned primitives are written at aligned positions.
	pub strict_alignment: bool,
	pub buffer_size: usize,
}

impl Default for WriterConfig {
	fn default() -> Self {
		Self {
			strict_alignment: cfg!(debug_assertions),
			buffer_size: 4 * 1024 * 1024,
		}
	}
}
