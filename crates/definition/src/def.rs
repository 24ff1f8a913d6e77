// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_type::{
	AttributeType, CallpathHandle, CommunicatorHandle, GroupHandle, GroupType, LocationGroupHandle,
	LocationGroupType, LocationHandle, LocationType, MetricHandle, MetricValueType, Paradigm, ParameterType,
	RegionHandle, RegionType, StringHandle, SystemTreeNodeHandle,
};
use serde::{Deserialize, Serialize};

use crate::{DefinitionKind, IdMappings, Remap};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringDef {
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemTreeNodeDef {
	pub name: StringHandle,
	pub class: StringHandle,
	pub parent: Option<SystemTreeNodeHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationGroupDef {
	pub name: StringHandle,
	pub kind: LocationGroupType,
	pub parent: SystemTreeNodeHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationDef {
	pub name: StringHandle,
	pub kind: LocationType,
	pub group: LocationGroupHandle,
	/// Process-local id of the location, unique within its process.
	pub local_id: u32,
	pub global_id: Option<u64>,
	pub number_of_events: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionDef {
	pub name: StringHandle,
	pub canonical_name: StringHandle,
	pub description: StringHandle,
	pub kind: RegionType,
	pub paradigm: Paradigm,
	pub file: Option<StringHandle>,
	pub begin_line: u32,
	pub end_line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupDef {
	pub name: StringHandle,
	pub kind: GroupType,
	pub paradigm: Paradigm,
	pub members: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunicatorDef {
	pub name: StringHandle,
	pub group: GroupHandle,
	pub parent: Option<CommunicatorHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RmaWindowDef {
	pub name: StringHandle,
	pub communicator: CommunicatorHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricDef {
	pub name: StringHandle,
	pub description: StringHandle,
	pub unit: StringHandle,
	pub value_type: MetricValueType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SamplingSetDef {
	pub metrics: Vec<MetricHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDef {
	pub name: StringHandle,
	pub description: StringHandle,
	pub kind: AttributeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterDef {
	pub name: StringHandle,
	pub kind: ParameterType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallpathDef {
	pub parent: Option<CallpathHandle>,
	pub region: RegionHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationPropertyDef {
	pub location: LocationHandle,
	pub name: StringHandle,
	pub value: StringHandle,
}

fn string(mappings: &IdMappings, handle: StringHandle) -> StringHandle {
	mappings.resolve(DefinitionKind::String, handle)
}

impl Remap for StringDef {
	fn remap(&self, _: &IdMappings) -> Self {
		self.clone()
	}
}

impl Remap for SystemTreeNodeDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			class: string(mappings, self.class),
			parent: self.parent.map(|parent| mappings.resolve(DefinitionKind::SystemTreeNode, parent)),
		}
	}
}

impl Remap for LocationGroupDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			kind: self.kind,
			parent: mappings.resolve(DefinitionKind::SystemTreeNode, self.parent),
		}
	}
}

impl Remap for LocationDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			group: mappings.resolve(DefinitionKind::LocationGroup, self.group),
			..self.clone()
		}
	}
}

impl Remap for RegionDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			canonical_name: string(mappings, self.canonical_name),
			description: string(mappings, self.description),
			file: self.file.map(|file| string(mappings, file)),
			..self.clone()
		}
	}
}

impl Remap for GroupDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			..self.clone()
		}
	}
}

impl Remap for CommunicatorDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			group: mappings.resolve(DefinitionKind::Group, self.group),
			parent: self.parent.map(|parent| mappings.resolve(DefinitionKind::Communicator, parent)),
		}
	}
}

impl Remap for RmaWindowDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			communicator: mappings.resolve(DefinitionKind::Communicator, self.communicator),
		}
	}
}

impl Remap for MetricDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			description: string(mappings, self.description),
			unit: string(mappings, self.unit),
			value_type: self.value_type,
		}
	}
}

impl Remap for SamplingSetDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			metrics: self.metrics.iter().map(|metric| mappings.resolve(DefinitionKind::Metric, *metric)).collect(),
		}
	}
}

impl Remap for AttributeDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			description: string(mappings, self.description),
			kind: self.kind,
		}
	}
}

impl Remap for ParameterDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			name: string(mappings, self.name),
			kind: self.kind,
		}
	}
}

impl Remap for CallpathDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			parent: self.parent.map(|parent| mappings.resolve(DefinitionKind::Callpath, parent)),
			region: mappings.resolve(DefinitionKind::Region, self.region),
		}
	}
}

impl Remap for LocationPropertyDef {
	fn remap(&self, mappings: &IdMappings) -> Self {
		Self {
			location: mappings.resolve(DefinitionKind::Location, self.location),
			name: string(mappings, self.name),
			value: string(mappings, self.value),
		}
	}
}
