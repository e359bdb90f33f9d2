// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use uuid::Uuid;

use crate::{
	column::ColumnCodec,
	error::Result,
	model::Value,
	primitive::Encode,
	stream::WriteStream,
};

impl ColumnCodec {
	pub(super) fn write_guid<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		match value {
			None => stream.put_guid(&Uuid::nil()),
			Some(Value::Uuid(v)) => stream.put_guid(v),
			Some(other) => Err(self.mismatch(other)),
		}
	}
}
