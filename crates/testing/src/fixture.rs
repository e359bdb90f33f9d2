// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A small order table covering every codec class, with rows in source
//! field order.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use bulktable_format::{
	Value,
	schema::{SourceField, SourceTable, SourceType},
};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

pub fn orders_table() -> SourceTable {
	SourceTable::new(
		"sales",
		"orders",
		vec![
			SourceField::new("id", SourceType::BigInt, 8),
			SourceField::new("customer", SourceType::NVarChar, 200).nullable(),
			SourceField::new("quantity", SourceType::SmallInt, 2),
			SourceField::new("price", SourceType::Decimal, 9).with_precision(10).nullable(),
			SourceField::new("shipped", SourceType::Bit, 1).nullable(),
			SourceField::new("placed", SourceType::DateTime, 8),
			SourceField::new("row_version", SourceType::Timestamp, 8),
			SourceField::new("region", SourceType::Char, 2),
			SourceField::new("reference", SourceType::UniqueIdentifier, 16).nullable(),
			SourceField::new("weight", SourceType::Float, 8).nullable(),
			SourceField::new("total", SourceType::Money, 8).nullable().computed(),
		],
	)
}

/// Same fields as [`orders_table`] declared in a different order and case.
pub fn orders_target() -> SourceTable {
	let mut fields = orders_table().fields;
	fields.reverse();
	for field in &mut fields {
		field.name = field.name.to_uppercase();
	}
	SourceTable::new("archive", "orders", fields)
}

pub fn orders_rows() -> Vec<Vec<Option<Value>>> {
	vec![
		vec![
			Some(Value::Int8(1)),
			Some(Value::from("Ada")),
			Some(Value::Int2(3)),
			Some(decimal("12.50")),
			Some(Value::Boolean(true)),
			Some(Value::DateTime(at(2024, 1, 15, 9, 30))),
			Some(Value::Blob(vec![0, 0, 0, 0, 0, 0, 7, 1])),
			Some(Value::from("EU")),
			Some(Value::Uuid(Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef))),
			Some(Value::Float8(1.25)),
			Some(decimal("37.50")),
		],
		vec![
			Some(Value::Int8(2)),
			None,
			Some(Value::Int2(-1)),
			None,
			None,
			Some(Value::DateTime(at(2024, 2, 29, 23, 59))),
			None,
			Some(Value::from("US")),
			None,
			None,
			None,
		],
		vec![
			Some(Value::Int8(i64::MAX)),
			Some(Value::from("Grace Hopper")),
			Some(Value::Int2(i16::MIN)),
			Some(decimal("-99999999.99")),
			Some(Value::Boolean(false)),
			Some(Value::DateTime(at(1999, 12, 31, 0, 0))),
			None,
			Some(Value::from("AP")),
			Some(Value::Uuid(Uuid::nil())),
			Some(Value::Float8(-0.5)),
			Some(decimal("0.01")),
		],
	]
}

/// Source ordinals that are exported and written back on import.
pub fn orders_exported_ordinals() -> Vec<usize> {
	vec![0, 1, 2, 3, 4, 5, 7, 8, 9, 10]
}

pub fn decimal(text: &str) -> Value {
	Value::Decimal(BigDecimal::from_str(text).expect("valid decimal literal"))
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
	NaiveDate::from_ymd_opt(year, month, day)
		.and_then(|date| date.and_hms_opt(hour, minute, 0))
		.expect("valid timestamp")
}
