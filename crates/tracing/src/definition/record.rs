// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_archive::DefRecord;
use scorep_definition::{
	AttributeDef, CallpathDef, CommunicatorDef, DefinitionError, DefinitionKind, DefinitionManager, GroupDef,
	LocationDef, LocationGroupDef, LocationPropertyDef, MetricDef, ParameterDef, RegionDef, RmaWindowDef,
	SamplingSetDef, StringDef, SystemTreeNodeDef,
};
use scorep_type::{
	AttributeHandle, CallpathHandle, CommunicatorHandle, GroupHandle, Handle, LocationGroupHandle, LocationHandle,
	LocationPropertyHandle, MetricHandle, ParameterHandle, RegionHandle, RmaWindowHandle, SamplingSetHandle,
	StringHandle, SystemTreeNodeHandle,
};

use crate::convert;

/// Conversion of a stored definition into its archive record.
pub(crate) trait ToDefRecord {
	type Handle: Handle;

	fn to_record(&self, handle: Self::Handle, definitions: &DefinitionManager) -> scorep_definition::Result<DefRecord>;
}

impl ToDefRecord for StringDef {
	type Handle = StringHandle;

	fn to_record(&self, handle: StringHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::String {
			id: handle.0,
			value: self.value.clone(),
		})
	}
}

impl ToDefRecord for SystemTreeNodeDef {
	type Handle = SystemTreeNodeHandle;

	fn to_record(&self, handle: SystemTreeNodeHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::SystemTreeNode {
			id: handle.0,
			name: self.name.0,
			class: self.class.0,
			parent: convert::reference(self.parent),
		})
	}
}

impl ToDefRecord for LocationGroupDef {
	type Handle = LocationGroupHandle;

	fn to_record(&self, handle: LocationGroupHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::LocationGroup {
			id: handle.0,
			name: self.name.0,
			kind: convert::location_group_kind(self.kind),
			parent: self.parent.0,
		})
	}
}

impl ToDefRecord for LocationDef {
	type Handle = LocationHandle;

	fn to_record(&self, handle: LocationHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		let id = self.global_id.ok_or(DefinitionError::UnassignedGlobalId(handle.0))?;
		Ok(DefRecord::Location {
			id,
			name: self.name.0,
			kind: convert::location_kind(self.kind),
			number_of_events: self.number_of_events,
			group: self.group.0,
		})
	}
}

impl ToDefRecord for RegionDef {
	type Handle = RegionHandle;

	fn to_record(&self, handle: RegionHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::Region {
			id: handle.0,
			name: self.name.0,
			canonical_name: self.canonical_name.0,
			description: self.description.0,
			role: convert::region_role(self.kind),
			paradigm: convert::paradigm(self.paradigm),
			file: convert::reference(self.file),
			begin_line: self.begin_line,
			end_line: self.end_line,
		})
	}
}

impl ToDefRecord for GroupDef {
	type Handle = GroupHandle;

	fn to_record(&self, handle: GroupHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::Group {
			id: handle.0,
			name: self.name.0,
			kind: convert::group_kind(self.kind),
			paradigm: convert::paradigm(self.paradigm),
			members: self.members.clone(),
		})
	}
}

impl ToDefRecord for CommunicatorDef {
	type Handle = CommunicatorHandle;

	fn to_record(&self, handle: CommunicatorHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::Comm {
			id: handle.0,
			name: self.name.0,
			group: self.group.0,
			parent: convert::reference(self.parent),
		})
	}
}

impl ToDefRecord for RmaWindowDef {
	type Handle = RmaWindowHandle;

	fn to_record(&self, handle: RmaWindowHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::RmaWin {
			id: handle.0,
			name: self.name.0,
			comm: self.communicator.0,
		})
	}
}

impl ToDefRecord for MetricDef {
	type Handle = MetricHandle;

	fn to_record(&self, handle: MetricHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::Metric {
			id: handle.0,
			name: self.name.0,
			description: self.description.0,
			unit: self.unit.0,
			value_type: convert::value_type(self.value_type),
		})
	}
}

impl ToDefRecord for SamplingSetDef {
	type Handle = SamplingSetHandle;

	fn to_record(&self, handle: SamplingSetHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::MetricClass {
			id: handle.0,
			metrics: self.metrics.iter().map(|metric| metric.0).collect(),
		})
	}
}

impl ToDefRecord for AttributeDef {
	type Handle = AttributeHandle;

	fn to_record(&self, handle: AttributeHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::Attribute {
			id: handle.0,
			name: self.name.0,
			description: self.description.0,
			kind: convert::attribute_kind(self.kind),
		})
	}
}

impl ToDefRecord for ParameterDef {
	type Handle = ParameterHandle;

	fn to_record(&self, handle: ParameterHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::Parameter {
			id: handle.0,
			name: self.name.0,
			kind: convert::parameter_kind(self.kind),
		})
	}
}

impl ToDefRecord for CallpathDef {
	type Handle = CallpathHandle;

	fn to_record(&self, handle: CallpathHandle, _: &DefinitionManager) -> scorep_definition::Result<DefRecord> {
		Ok(DefRecord::Callpath {
			id: handle.0,
			parent: convert::reference(self.parent),
			region: self.region.0,
		})
	}
}

impl ToDefRecord for LocationPropertyDef {
	type Handle = LocationPropertyHandle;

	fn to_record(
		&self,
		_: LocationPropertyHandle,
		definitions: &DefinitionManager,
	) -> scorep_definition::Result<DefRecord> {
		let location = definitions.locations().get(self.location).ok_or(DefinitionError::UnknownHandle {
			kind: DefinitionKind::Location,
			id: self.location.0,
		})?;
		let location = location.global_id.ok_or(DefinitionError::UnassignedGlobalId(self.location.0))?;
		Ok(DefRecord::LocationProperty {
			location,
			name: self.name.0,
			value: self.value.0,
		})
	}
}
