// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod data_type;
mod descriptor;
mod flags;
mod value;

pub use data_type::{Classification, ColumnDataType};
pub use descriptor::{ColumnDescriptor, TableDescriptor, TableIdentifier};
pub use flags::ColumnFlags;
pub use value::{Value, ValueKind};
