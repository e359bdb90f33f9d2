// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use bigdecimal::BigDecimal;

use crate::{
	column::ColumnCodec,
	decimal::DecimalPacker,
	error::Result,
	model::Value,
	primitive::{Decode, Encode},
	stream::{ReadStream, WriteStream},
};

impl ColumnCodec {
	pub(super) fn write_decimal<W: WriteStream + ?Sized>(
		&mut self,
		stream: &mut W,
		packer: DecimalPacker,
		value: Option<&Value>,
	) -> Result<()> {
		let zero = BigDecimal::from(0);
		let decimal = match value {
			None => &zero,
			Some(Value::Decimal(v)) => v,
			Some(other) => return Err(self.mismatch(other)),
		};
		packer.pack(decimal, &mut self.scratch)?;
		stream.put_fixed_bytes(&self.scratch)
	}

	pub(super) fn read_decimal<R: ReadStream + ?Sized>(&mut self, stream: &mut R, packer: DecimalPacker) -> Result<Value> {
		stream.get_fixed_bytes(&mut self.scratch)?;
		Ok(Value::Decimal(packer.unpack(&self.scratch)?.value))
	}
}
