// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::{
	UNDEFINED_U32, UNDEFINED_U64,
	record::{
		AttributeKind, GroupKind, LocationGroupKind, LocationKind, ParameterKind, Paradigm, RegionRole, ValueType,
	},
};

/// Referenceable definition kinds of the container.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefKind {
	String,
	SystemTreeNode,
	LocationGroup,
	Location,
	Region,
	Group,
	Comm,
	RmaWin,
	Metric,
	MetricClass,
	Attribute,
	Parameter,
	Callpath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefRecord {
	String {
		id: u32,
		value: String,
	},
	SystemTreeNode {
		id: u32,
		name: u32,
		class: u32,
		parent: u32,
	},
	LocationGroup {
		id: u32,
		name: u32,
		kind: LocationGroupKind,
		parent: u32,
	},
	Location {
		id: u64,
		name: u32,
		kind: LocationKind,
		number_of_events: u64,
		group: u32,
	},
	Region {
		id: u32,
		name: u32,
		canonical_name: u32,
		description: u32,
		role: RegionRole,
		paradigm: Paradigm,
		file: u32,
		begin_line: u32,
		end_line: u32,
	},
	Group {
		id: u32,
		name: u32,
		kind: GroupKind,
		paradigm: Paradigm,
		members: Vec<u64>,
	},
	Comm {
		id: u32,
		name: u32,
		group: u32,
		parent: u32,
	},
	RmaWin {
		id: u32,
		name: u32,
		comm: u32,
	},
	Metric {
		id: u32,
		name: u32,
		description: u32,
		unit: u32,
		value_type: ValueType,
	},
	MetricClass {
		id: u32,
		metrics: Vec<u32>,
	},
	Attribute {
		id: u32,
		name: u32,
		description: u32,
		kind: AttributeKind,
	},
	Parameter {
		id: u32,
		name: u32,
		kind: ParameterKind,
	},
	Callpath {
		id: u32,
		parent: u32,
		region: u32,
	},
	LocationProperty {
		location: u64,
		name: u32,
		value: u32,
	},
	/// Local to global translation of one kind for the events of a location.
	MappingTable {
		kind: DefKind,
		map: Vec<u32>,
	},
	ClockOffset {
		time: u64,
		offset: i64,
		standard_deviation: f64,
	},
}

impl DefRecord {
	/// Kind and id this record defines, if it defines anything referenceable.
	pub fn key(&self) -> Option<(DefKind, u64)> {
		let key = match self {
			DefRecord::String {
				id,
				..
			} => (DefKind::String, *id as u64),
			DefRecord::SystemTreeNode {
				id,
				..
			} => (DefKind::SystemTreeNode, *id as u64),
			DefRecord::LocationGroup {
				id,
				..
			} => (DefKind::LocationGroup, *id as u64),
			DefRecord::Location {
				id,
				..
			} => (DefKind::Location, *id),
			DefRecord::Region {
				id,
				..
			} => (DefKind::Region, *id as u64),
			DefRecord::Group {
				id,
				..
			} => (DefKind::Group, *id as u64),
			DefRecord::Comm {
				id,
				..
			} => (DefKind::Comm, *id as u64),
			DefRecord::RmaWin {
				id,
				..
			} => (DefKind::RmaWin, *id as u64),
			DefRecord::Metric {
				id,
				..
			} => (DefKind::Metric, *id as u64),
			DefRecord::MetricClass {
				id,
				..
			} => (DefKind::MetricClass, *id as u64),
			DefRecord::Attribute {
				id,
				..
			} => (DefKind::Attribute, *id as u64),
			DefRecord::Parameter {
				id,
				..
			} => (DefKind::Parameter, *id as u64),
			DefRecord::Callpath {
				id,
				..
			} => (DefKind::Callpath, *id as u64),
			DefRecord::LocationProperty {
				..
			}
			| DefRecord::MappingTable {
				..
			}
			| DefRecord::ClockOffset {
				..
			} => return None,
		};
		Some(key)
	}

	/// Definitions this record refers to; undefined references are skipped.
	pub fn references(&self) -> Vec<(DefKind, u64)> {
		let mut refs = Vec::new();
		let mut add = |kind: DefKind, id: u32| {
			if id != UNDEFINED_U32 {
				refs.push((kind, id as u64));
			}
		};

		match self {
			DefRecord::String {
				..
			}
			| DefRecord::MappingTable {
				..
			}
			| DefRecord::ClockOffset {
				..
			} => {}
			DefRecord::SystemTreeNode {
				name,
				class,
				parent,
				..
			} => {
				add(DefKind::String, *name);
				add(DefKind::String, *class);
				add(DefKind::SystemTreeNode, *parent);
			}
			DefRecord::LocationGroup {
				name,
				parent,
				..
			} => {
				add(DefKind::String, *name);
				add(DefKind::SystemTreeNode, *parent);
			}
			DefRecord::Location {
				name,
				group,
				..
			} => {
				add(DefKind::String, *name);
				add(DefKind::LocationGroup, *group);
			}
			DefRecord::Region {
				name,
				canonical_name,
				description,
				file,
				..
			} => {
				add(DefKind::String, *name);
				add(DefKind::String, *canonical_name);
				add(DefKind::String, *description);
				add(DefKind::String, *file);
			}
			DefRecord::Group {
				name,
				..
			} => add(DefKind::String, *name),
			DefRecord::Comm {
				name,
				group,
				parent,
				..
			} => {
				add(DefKind::String, *name);
				add(DefKind::Group, *group);
				add(DefKind::Comm, *parent);
			}
			DefRecord::RmaWin {
				name,
				comm,
				..
			} => {
				add(DefKind::String, *name);
				add(DefKind::Comm, *comm);
			}
			DefRecord::Metric {
				name,
				description,
				unit,
				..
			} => {
				add(DefKind::String, *name);
				add(DefKind::String, *description);
				add(DefKind::String, *unit);
			}
			DefRecord::MetricClass {
				metrics,
				..
			} => {
				for metric in metrics {
					add(DefKind::Metric, *metric);
				}
			}
			DefRecord::Attribute {
				name,
				description,
				..
			} => {
				add(DefKind::String, *name);
				add(DefKind::String, *description);
			}
			DefRecord::Parameter {
				name,
				..
			} => add(DefKind::String, *name),
			DefRecord::Callpath {
				parent,
				region,
				..
			} => {
				add(DefKind::Callpath, *parent);
				add(DefKind::Region, *region);
			}
			DefRecord::LocationProperty {
				location,
				name,
				value,
			} => {
				add(DefKind::String, *name);
				add(DefKind::String, *value);
				if *location != UNDEFINED_U64 {
					refs.push((DefKind::Location, *location));
				}
			}
		}
		refs
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_undefined_references_are_skipped() {
		let record = DefRecord::SystemTreeNode {
			id: 0,
			name: 1,
			class: 2,
			parent: UNDEFINED_U32,
		};
		assert_eq!(record.references(), vec![(DefKind::String, 1), (DefKind::String, 2)]);
		assert_eq!(record.key(), Some((DefKind::SystemTreeNode, 0)));
	}

	#[test]
	fn test_location_property_references_location_id() {
		let record = DefRecord::LocationProperty {
			location: 1 << 32,
			name: 0,
			value: 1,
		};
		assert!(record.references().contains(&(DefKind::Location, 1 << 32)));
		assert_eq!(record.key(), None);
	}
}
