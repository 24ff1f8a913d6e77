// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_type::{Property, PropertyValue};

/// Invalidation state of every [`Property`] of one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable {
	invalidated: [bool; Property::ALL.len()],
}

impl PropertyTable {
	pub fn invalidate(&mut self, property: Property) {
		self.invalidated[property.index()] = true;
	}

	pub fn is_invalidated(&self, property: Property) -> bool {
		self.invalidated[property.index()]
	}

	/// An invalidated claim is unknown, never false.
	pub fn value(&self, property: Property) -> PropertyValue {
		if self.is_invalidated(property) {
			PropertyValue::Unknown
		} else if property.initial_value() {
			PropertyValue::True
		} else {
			PropertyValue::False
		}
	}

	/// Invalidated in any process means invalidated globally.
	pub fn merge(&mut self, other: &PropertyTable) {
		for property in Property::ALL {
			if other.is_invalidated(property) {
				self.invalidate(property);
			}
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (Property, PropertyValue)> + '_ {
		Property::ALL.into_iter().map(|property| (property, self.value(property)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fresh_table_is_true() {
		let table = PropertyTable::default();
		for (_, value) in table.iter() {
			assert_eq!(value, PropertyValue::True);
		}
	}

	#[test]
	fn test_invalidated_is_unknown() {
		let mut table = PropertyTable::default();
		table.invalidate(Property::ThreadLockEventComplete);
		assert_eq!(table.value(Property::ThreadLockEventComplete), PropertyValue::Unknown);
		assert_eq!(table.value(Property::MpiCommunicationComplete), PropertyValue::True);
	}

	#[test]
	fn test_merge_keeps_invalidation() {
		let mut global = PropertyTable::default();
		let mut local = PropertyTable::default();
		local.invalidate(Property::MpiCommunicationComplete);

		global.merge(&local);
		global.merge(&PropertyTable::default());
		assert!(global.is_invalidated(Property::MpiCommunicationComplete));
	}
}
