// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test support shared by the format crate and the tools built on it.

pub mod bytes;
pub mod fixture;
pub mod tempdir;
