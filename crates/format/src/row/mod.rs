// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Row codec.
//!
//! A row is `align(4) | marker | null bitmap | align(4) | values`, with the
//! values in codec order. Null columns whose codec omits nulls are not
//! written at all; every other column writes a value or a placeholder.

mod bound;
mod null_map;
mod reader;
mod writer;

pub use bound::{BoundRow, BoundRowReader, FieldBinding, RowSink, copy_rows};
pub use null_map::NullFieldMap;
pub use reader::RowReader;
pub use writer::RowWriter;

use crate::model::Value;

/// Sentinel byte opening every row.
pub const ROW_MARKER: u8 = 0x52;

/// Values of one row by column ordinal. `None` is null.
pub trait RowSource {
	fn value(&self, ordinal: usize) -> Option<&Value>;
}

impl RowSource for [Option<Value>] {
	fn value(&self, ordinal: usize) -> Option<&Value> {
		self.get(ordinal).and_then(Option::as_ref)
	}
}

impl RowSource for Vec<Option<Value>> {
	fn value(&self, ordinal: usize) -> Option<&Value> {
		self.as_slice().value(ordinal)
	}
}

impl<const N: usize> RowSource for [Option<Value>; N] {
	fn value(&self, ordinal: usize) -> Option<&Value> {
		self.as_slice().value(ordinal)
	}
}

impl<T: RowSource + ?Sized> RowSource for &T {
	fn value(&self, ordinal: usize) -> Option<&Value> {
		(**self).value(ordinal)
	}
}
