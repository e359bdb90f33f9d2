// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	column::ColumnCodec,
	error::Result,
	model::Value,
	primitive::{Decode, Encode},
	stream::{ReadStream, WriteStream},
};

impl ColumnCodec {
	pub(super) fn write_bytes<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_bytes(&[]),
			Some(Value::Blob(v)) => stream.put_bytes(v),
			Some(other) => Err(self.mismatch(other)),
		}
	}

	pub(super) fn write_fixed_bytes<W: WriteStream + ?Sized>(
		&mut self,
		stream: &mut W,
		value: Option<&Value>,
	) -> Result<()> {
		match value {
			None => self.scratch.fill(0),
			Some(Value::Blob(v)) if v.len() == self.scratch.len() => self.scratch.copy_from_slice(v),
			Some(Value::Blob(v)) => {
				return Err(self.invalid(format!("expected exactly {} bytes, got {}", self.scratch.len(), v.len())));
			}
			Some(other) => return Err(self.mismatch(other)),
		}
		stream.put_fixed_bytes(&self.scratch)
	}

	pub(super) fn read_fixed_bytes<R: ReadStream + ?Sized>(&mut self, stream: &mut R) -> Result<Value> {
		stream.get_fixed_bytes(&mut self.scratch)?;
		Ok(Value::Blob(self.scratch.clone()))
	}
}
