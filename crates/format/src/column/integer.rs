// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	column::ColumnCodec,
	error::Result,
	model::Value,
	primitive::Encode,
	stream::WriteStream,
};

impl ColumnCodec {
	pub(super) fn write_boolean<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		let byte = match value {
			None => 0,
			Some(Value::Boolean(v)) => u8::from(*v),
			Some(other) => return Err(self.mismatch(other)),
		};
		stream.put_u8(byte)
	}

	pub(super) fn write_uint1<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_u8(0),
			Some(Value::Uint1(v)) => stream.put_u8(*v),
			Some(other) => Err(self.mismatch(other)),
		}
	}

	pub(super) fn write_int2<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_i16(0),
			Some(Value::Int2(v)) => stream.put_i16(*v),
			Some(other) => Err(self.mismatch(other)),
		}
	}

	pub(super) fn write_int4<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_i32(0),
			Some(Value::Int4(v)) => stream.put_i32(*v),
			Some(other) => Err(self.mismatch(other)),
		}
	}

	pub(super) fn write_int8<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_i64(0),
			Some(Value::Int8(v)) => stream.put_i64(*v),
			Some(other) => Err(self.mismatch(other)),
		}
	}
}
