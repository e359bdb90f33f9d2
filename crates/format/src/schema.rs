// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Relational table shapes as reported by schema introspection. These are
//! the inputs to the export and import model builders.

use serde::{Deserialize, Serialize};

use crate::model::TableIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
	BigInt,
	Int,
	SmallInt,
	TinyInt,
	Bit,
	Char,
	VarChar,
	Text,
	NChar,
	NVarChar,
	NText,
	Xml,
	UniqueIdentifier,
	Float,
	Real,
	Binary,
	VarBinary,
	Image,
	/// Row version. Never exported or written.
	Timestamp,
	Decimal,
	Money,
	SmallMoney,
	Time,
	Date,
	DateTime,
	DateTime2,
	SmallDateTime,
	DateTimeOffset,
	Variant,
	Udt,
	Structured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceField {
	pub name: String,
	pub source_type: SourceType,
	/// Declared length in bytes; `-1` for unbounded types.
	pub max_length: i32,
	#[serde(default)]
	pub precision: u32,
	#[serde(default)]
	pub nullable: bool,
	#[serde(default)]
	pub computed: bool,
}

impl SourceField {
	pub fn new(name: impl Into<String>, source_type: SourceType, max_length: i32) -> Self {
		Self {
			name: name.into(),
			source_type,
			max_length,
			precision: 0,
			nullable: false,
			computed: false,
		}
	}

	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	pub fn computed(mut self) -> Self {
		self.computed = true;
		self
	}

	pub fn with_precision(mut self, precision: u32) -> Self {
		self.precision = precision;
		self
	}

	/// Whether an import may write this field.
	pub fn is_writable(&self) -> bool {
		!self.computed && self.source_type != SourceType::Timestamp
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTable {
	#[serde(default)]
	pub schema: String,
	pub name: String,
	pub fields: Vec<SourceField>,
}

impl SourceTable {
	pub fn new(schema: impl Into<String>, name: impl Into<String>, fields: Vec<SourceField>) -> Self {
		Self {
			schema: schema.into(),
			name: name.into(),
			fields,
		}
	}

	pub fn identifier(&self) -> TableIdentifier {
		TableIdentifier::new(&self.schema, &self.name)
	}
}
