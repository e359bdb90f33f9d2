// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binary bulk table format.
//!
//! This crate provides:
//! - Little-endian primitives with explicit alignment via [`primitive`]
//! - Null bitmaps and fixed-width decimals via [`bitset`] and [`decimal`]
//! - Per-type column codecs via [`column`] and the row codec via [`row`]
//! - The chunked container via [`chunk`] and table files via [`table`]
//! - Export and import model builders via [`export`] and [`import`]

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod bitset;
pub mod chunk;
pub mod column;
pub mod config;
pub mod decimal;
pub mod error;
pub mod export;
pub mod identity;
pub mod import;
pub mod model;
pub mod primitive;
pub mod row;
pub mod schema;
pub mod stream;
pub mod table;

pub use config::{ReaderConfig, WriterConfig};
pub use error::{FormatError, Result};
pub use export::{ExportModel, ExportModelBuilder};
pub use import::{ImportModel, ImportModelBuilder};
pub use model::{
	Classification, ColumnDataType, ColumnDescriptor, ColumnFlags, TableDescriptor, TableIdentifier, Value, ValueKind,
};
pub use table::{TableData, TableFileReader, TableFileWriter};
