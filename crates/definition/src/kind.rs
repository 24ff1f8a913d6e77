// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefinitionKind {
	String,
	SystemTreeNode,
	LocationGroup,
	Location,
	Region,
	Group,
	Communicator,
	RmaWindow,
	Metric,
	SamplingSet,
	Attribute,
	Parameter,
	Callpath,
	LocationProperty,
}

impl DefinitionKind {
	/// Dependency order: every kind only references kinds listed before it.
	pub const WRITE_ORDER: [DefinitionKind; 14] = [
		DefinitionKind::String,
		DefinitionKind::SystemTreeNode,
		DefinitionKind::LocationGroup,
		DefinitionKind::Location,
		DefinitionKind::Region,
		DefinitionKind::Group,
		DefinitionKind::Communicator,
		DefinitionKind::RmaWindow,
		DefinitionKind::Metric,
		DefinitionKind::SamplingSet,
		DefinitionKind::Attribute,
		DefinitionKind::Parameter,
		DefinitionKind::Callpath,
		DefinitionKind::LocationProperty,
	];

	/// Kinds a definition of this kind may reference.
	pub fn dependencies(self) -> &'static [DefinitionKind] {
		use DefinitionKind::*;
		match self {
			String => &[],
			SystemTreeNode => &[String, SystemTreeNode],
			LocationGroup => &[String, SystemTreeNode],
			Location => &[String, LocationGroup],
			Region => &[String],
			Group => &[String],
			Communicator => &[String, Group, Communicator],
			RmaWindow => &[String, Communicator],
			Metric => &[String],
			SamplingSet => &[Metric],
			Attribute => &[String],
			Parameter => &[String],
			Callpath => &[Region, Callpath],
			LocationProperty => &[String, Location],
		}
	}

	pub fn position(self) -> usize {
		Self::WRITE_ORDER.iter().position(|k| *k == self).unwrap_or(usize::MAX)
	}
}
