// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{self, Write};

use bulktable_format::{ColumnDescriptor, Result, TableDescriptor, TableFileReader, stream::ReadStream};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct TableReport {
	pub table: TableDescriptor,
	pub columns: Vec<ColumnDescriptor>,
	pub row_count: u64,
	/// Leading rows rendered as text, `None` for null.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub rows: Vec<Vec<Option<String>>>,
}

/// Read every row-data chunk, counting rows and keeping the first
/// `dump_rows` of each table.
pub fn inspect<S: ReadStream>(reader: &mut TableFileReader<S>, dump_rows: usize) -> Result<Vec<TableReport>> {
	let mut reports = Vec::new();
	while let Some(mut data) = reader.next_table()? {
		let mut rows = data.row_reader()?;
		let mut report = TableReport {
			table: data.table.clone(),
			columns: data.columns.clone(),
			row_count: 0,
			rows: Vec::new(),
		};
		while rows.move_next(&mut data.rows)? {
			if report.rows.len() < dump_rows {
				report.rows.push(rows.current().iter().map(|v| v.as_ref().map(ToString::to_string)).collect());
			}
			report.row_count += 1;
		}
		debug!(table = %report.table.identifier(), rows = report.row_count, "inspected table");
		reports.push(report);
	}
	Ok(reports)
}

pub fn render<W: Write>(reports: &[TableReport], out: &mut W) -> io::Result<()> {
	for report in reports {
		writeln!(out, "table {} ({})", report.table.identifier(), report.table.id)?;
		writeln!(out, "  rows: {}", report.row_count)?;
		for column in &report.columns {
			writeln!(
				out,
				"  [{}] {} {} length={} flags={}",
				column.original_index, column.original_name, column.data_type, column.length, column.flags
			)?;
		}
		for row in &report.rows {
			let cells: Vec<&str> = row.iter().map(|cell| cell.as_deref().unwrap_or("NULL")).collect();
			writeln!(out, "  | {}", cells.join(" | "))?;
		}
	}
	Ok(())
}
