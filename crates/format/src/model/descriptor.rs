// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ColumnDataType, ColumnFlags};

/// Identity of one table within a file. The id correlates its identity,
/// column-schema and row-data chunks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableDescriptor {
	pub id: Uuid,
	pub name: String,
	pub schema: String,
}

impl TableDescriptor {
	pub fn identifier(&self) -> TableIdentifier {
		TableIdentifier::new(&self.schema, &self.name)
	}
}

/// Persisted description of one column, in packed row order.
///
/// `length` is the fixed byte width for fixed-length types and a hint (the
/// declared maximum length) for variable-length types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDescriptor {
	pub original_name: String,
	pub original_index: i16,
	pub flags: ColumnFlags,
	pub data_type: ColumnDataType,
	pub length: i32,
}

/// Schema-qualified table name, compared without regard to case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableIdentifier {
	pub schema: String,
	pub name: String,
}

impl TableIdentifier {
	pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			schema: schema.into(),
			name: name.into(),
		}
	}
}

impl PartialEq for TableIdentifier {
	fn eq(&self, other: &Self) -> bool {
		self.name.eq_ignore_ascii_case(&other.name) && self.schema.eq_ignore_ascii_case(&other.schema)
	}
}

impl Eq for TableIdentifier {}

impl Hash for TableIdentifier {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.to_ascii_lowercase().hash(state);
		self.schema.to_ascii_lowercase().hash(state);
	}
}

impl Display for TableIdentifier {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let qualified = format!("{}.{}", self.schema, self.name);
		f.write_str(qualified.trim_matches('.'))
	}
}
