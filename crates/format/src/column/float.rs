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
	pub(super) fn write_float4<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_f32(0.0),
			Some(Value::Float4(v)) => stream.put_f32(*v),
			Some(other) => Err(self.mismatch(other)),
		}
	}

	pub(super) fn write_float8<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_f64(0.0),
			Some(Value::Float8(v)) => stream.put_f64(*v),
			Some(other) => Err(self.mismatch(other)),
		}
	}
}
