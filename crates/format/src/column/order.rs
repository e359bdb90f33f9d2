// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use crate::model::ColumnDescriptor;

/// Row packing order: classification ascending, then wider fixed-length
/// columns first, then original column index.
pub fn packing_order(a: &ColumnDescriptor, b: &ColumnDescriptor) -> Ordering {
	let class_a = a.data_type.classify();
	let class_b = b.data_type.classify();
	class_a
		.cmp(&class_b)
		.then_with(|| {
			if class_a.is_fixed_length() {
				b.length.cmp(&a.length)
			} else {
				Ordering::Equal
			}
		})
		.then_with(|| a.original_index.cmp(&b.original_index))
}

/// Sort `items` into row packing order by the descriptor each carries.
pub fn sort_for_packing<T>(items: &mut [T], descriptor: impl Fn(&T) -> &ColumnDescriptor) {
	items.sort_by(|a, b| packing_order(descriptor(a), descriptor(b)));
}
