// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::schema::SourceTable;

/// Chooses the id correlating a table's chunks within a file.
pub trait TableIdPolicy: Send + Sync {
	fn table_id(&self, table: &SourceTable) -> Uuid;
}

/// First 16 bytes of the SHA-256 of `schema.name`, so identical tables get
/// identical ids across exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameBasedTableIdPolicy;

impl TableIdPolicy for NameBasedTableIdPolicy {
	fn table_id(&self, table: &SourceTable) -> Uuid {
		let digest = Sha256::digest(table.identifier().to_string().as_bytes());
		let mut bytes = [0u8; 16];
		bytes.copy_from_slice(&digest[..16]);
		Uuid::from_bytes_le(bytes)
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTableIdPolicy;

impl TableIdPolicy for RandomTableIdPolicy {
	fn table_id(&self, _table: &SourceTable) -> Uuid {
		Uuid::new_v4()
	}
}
