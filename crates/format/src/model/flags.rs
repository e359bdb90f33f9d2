// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags::bitflags! {
	/// Persisted column flags. Unknown bits are retained when read so the
	/// validator can reject them.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ColumnFlags: u16 {
		const NULLABLE = 0x0001;
		/// Null values are not written at all. Implies [`Self::NULLABLE`].
		const ABSENT_WHEN_NULL = 0x0003;
	}
}

impl ColumnFlags {
	pub fn is_nullable(self) -> bool {
		self.contains(Self::NULLABLE)
	}

	pub fn omit_nulls(self) -> bool {
		self.contains(Self::ABSENT_WHEN_NULL)
	}

	/// Bits outside the persisted set.
	pub fn unknown(self) -> u16 {
		self.bits() & !Self::all().bits()
	}

	/// The persisted subset of these flags.
	pub fn known(self) -> Self {
		self & Self::ABSENT_WHEN_NULL
	}
}

impl Display for ColumnFlags {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if self.omit_nulls() {
			f.write_str("AbsentWhenNull")?;
		} else if self.is_nullable() {
			f.write_str("Nullable")?;
		} else {
			f.write_str("None")?;
		}
		match self.unknown() {
			0 => Ok(()),
			unknown => write!(f, " | {unknown:#06x}"),
		}
	}
}

impl Serialize for ColumnFlags {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u16(self.bits())
	}
}

impl<'de> Deserialize<'de> for ColumnFlags {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		u16::deserialize(deserializer).map(Self::from_bits_retain)
	}
}
