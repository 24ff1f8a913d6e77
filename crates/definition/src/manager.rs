// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_type::{
	AttributeHandle, AttributeType, CallpathHandle, CommunicatorHandle, GroupHandle, GroupType, LocationGroupHandle,
	LocationGroupType, LocationHandle, LocationPropertyHandle, LocationType, MetricHandle, MetricValueType,
	Paradigm, ParameterHandle, ParameterType, Property, RegionHandle, RegionType, RmaWindowHandle,
	SamplingSetHandle, StringHandle, SystemTreeNodeHandle,
};

use crate::{
	AttributeDef, CallpathDef, CommunicatorDef, DefinitionError, DefinitionKind, DefinitionTable, GroupDef,
	LocationDef, LocationGroupDef, LocationPropertyDef, MetricDef, ParameterDef, PropertyTable, RegionDef,
	RmaWindowDef, SamplingSetDef, StringDef, SystemTreeNodeDef,
};

/// All definitions of one process.
#[derive(Debug, Clone, Default)]
pub struct DefinitionManager {
	pub(crate) strings: DefinitionTable<StringHandle, StringDef>,
	pub(crate) system_tree_nodes: DefinitionTable<SystemTreeNodeHandle, SystemTreeNodeDef>,
	pub(crate) location_groups: DefinitionTable<LocationGroupHandle, LocationGroupDef>,
	pub(crate) locations: DefinitionTable<LocationHandle, LocationDef>,
	pub(crate) regions: DefinitionTable<RegionHandle, RegionDef>,
	pub(crate) groups: DefinitionTable<GroupHandle, GroupDef>,
	pub(crate) communicators: DefinitionTable<CommunicatorHandle, CommunicatorDef>,
	pub(crate) rma_windows: DefinitionTable<RmaWindowHandle, RmaWindowDef>,
	pub(crate) metrics: DefinitionTable<MetricHandle, MetricDef>,
	pub(crate) sampling_sets: DefinitionTable<SamplingSetHandle, SamplingSetDef>,
	pub(crate) attributes: DefinitionTable<AttributeHandle, AttributeDef>,
	pub(crate) parameters: DefinitionTable<ParameterHandle, ParameterDef>,
	pub(crate) callpaths: DefinitionTable<CallpathHandle, CallpathDef>,
	pub(crate) location_properties: DefinitionTable<LocationPropertyHandle, LocationPropertyDef>,
	pub(crate) properties: PropertyTable,
}

impl DefinitionManager {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn new_string(&mut self, value: &str) -> StringHandle {
		self.strings.intern(StringDef {
			value: value.to_string(),
		})
	}

	pub fn new_system_tree_node(
		&mut self,
		parent: Option<SystemTreeNodeHandle>,
		class: &str,
		name: &str,
	) -> SystemTreeNodeHandle {
		let class = self.new_string(class);
		let name = self.new_string(name);
		self.system_tree_nodes.intern(SystemTreeNodeDef {
			name,
			class,
			parent,
		})
	}

	pub fn new_location_group(
		&mut self,
		name: &str,
		kind: LocationGroupType,
		parent: SystemTreeNodeHandle,
	) -> LocationGroupHandle {
		let name = self.new_string(name);
		self.location_groups.insert(LocationGroupDef {
			name,
			kind,
			parent,
		})
	}

	pub fn new_location(
		&mut self,
		name: &str,
		kind: LocationType,
		group: LocationGroupHandle,
		local_id: u32,
	) -> LocationHandle {
		let name = self.new_string(name);
		self.locations.insert(LocationDef {
			name,
			kind,
			group,
			local_id,
			global_id: None,
			number_of_events: 0,
		})
	}

	pub fn new_region(
		&mut self,
		name: &str,
		file: Option<&str>,
		begin_line: u32,
		end_line: u32,
		paradigm: Paradigm,
		kind: RegionType,
	) -> RegionHandle {
		let name = self.new_string(name);
		let description = self.new_string("");
		let file = file.map(|file| self.new_string(file));
		self.regions.intern(RegionDef {
			name,
			canonical_name: name,
			description,
			kind,
			paradigm,
			file,
			begin_line,
			end_line,
		})
	}

	pub fn new_group(&mut self, kind: GroupType, name: &str, paradigm: Paradigm, members: Vec<u64>) -> GroupHandle {
		let name = self.new_string(name);
		self.groups.intern(GroupDef {
			name,
			kind,
			paradigm,
			members,
		})
	}

	pub fn new_communicator(
		&mut self,
		group: GroupHandle,
		name: &str,
		parent: Option<CommunicatorHandle>,
	) -> CommunicatorHandle {
		let name = self.new_string(name);
		self.communicators.intern(CommunicatorDef {
			name,
			group,
			parent,
		})
	}

	pub fn new_rma_window(&mut self, name: &str, communicator: CommunicatorHandle) -> RmaWindowHandle {
		let name = self.new_string(name);
		self.rma_windows.intern(RmaWindowDef {
			name,
			communicator,
		})
	}

	pub fn new_metric(
		&mut self,
		name: &str,
		description: &str,
		unit: &str,
		value_type: MetricValueType,
	) -> MetricHandle {
		let name = self.new_string(name);
		let description = self.new_string(description);
		let unit = self.new_string(unit);
		self.metrics.intern(MetricDef {
			name,
			description,
			unit,
			value_type,
		})
	}

	pub fn new_sampling_set(&mut self, metrics: Vec<MetricHandle>) -> SamplingSetHandle {
		self.sampling_sets.intern(SamplingSetDef {
			metrics,
		})
	}

	pub fn new_attribute(&mut self, name: &str, description: &str, kind: AttributeType) -> AttributeHandle {
		let name = self.new_string(name);
		let description = self.new_string(description);
		self.attributes.intern(AttributeDef {
			name,
			description,
			kind,
		})
	}

	pub fn new_parameter(&mut self, name: &str, kind: ParameterType) -> ParameterHandle {
		let name = self.new_string(name);
		self.parameters.intern(ParameterDef {
			name,
			kind,
		})
	}

	pub fn new_callpath(&mut self, parent: Option<CallpathHandle>, region: RegionHandle) -> CallpathHandle {
		self.callpaths.intern(CallpathDef {
			parent,
			region,
		})
	}

	pub fn new_location_property(
		&mut self,
		location: LocationHandle,
		name: &str,
		value: &str,
	) -> LocationPropertyHandle {
		let name = self.new_string(name);
		let value = self.new_string(value);
		self.location_properties.intern(LocationPropertyDef {
			location,
			name,
			value,
		})
	}

	pub fn set_location_global_id(&mut self, location: LocationHandle, global_id: u64) -> crate::Result<()> {
		self.update_location(location, |def| def.global_id = Some(global_id))
	}

	pub fn set_location_number_of_events(&mut self, location: LocationHandle, events: u64) -> crate::Result<()> {
		self.update_location(location, |def| def.number_of_events = events)
	}

	fn update_location<F: FnOnce(&mut LocationDef)>(&mut self, location: LocationHandle, f: F) -> crate::Result<()> {
		if self.locations.update(location, f) {
			Ok(())
		} else {
			Err(DefinitionError::UnknownHandle {
				kind: DefinitionKind::Location,
				id: location.0,
			})
		}
	}

	pub fn invalidate_property(&mut self, property: Property) {
		self.properties.invalidate(property);
	}

	pub fn string(&self, handle: StringHandle) -> Option<&str> {
		self.strings.get(handle).map(|def| def.value.as_str())
	}

	pub fn strings(&self) -> &DefinitionTable<StringHandle, StringDef> {
		&self.strings
	}

	pub fn system_tree_nodes(&self) -> &DefinitionTable<SystemTreeNodeHandle, SystemTreeNodeDef> {
		&self.system_tree_nodes
	}

	pub fn location_groups(&self) -> &DefinitionTable<LocationGroupHandle, LocationGroupDef> {
		&self.location_groups
	}

	pub fn locations(&self) -> &DefinitionTable<LocationHandle, LocationDef> {
		&self.locations
	}

	pub fn regions(&self) -> &DefinitionTable<RegionHandle, RegionDef> {
		&self.regions
	}

	pub fn groups(&self) -> &DefinitionTable<GroupHandle, GroupDef> {
		&self.groups
	}

	pub fn communicators(&self) -> &DefinitionTable<CommunicatorHandle, CommunicatorDef> {
		&self.communicators
	}

	pub fn rma_windows(&self) -> &DefinitionTable<RmaWindowHandle, RmaWindowDef> {
		&self.rma_windows
	}

	pub fn metrics(&self) -> &DefinitionTable<MetricHandle, MetricDef> {
		&self.metrics
	}

	pub fn sampling_sets(&self) -> &DefinitionTable<SamplingSetHandle, SamplingSetDef> {
		&self.sampling_sets
	}

	pub fn attributes(&self) -> &DefinitionTable<AttributeHandle, AttributeDef> {
		&self.attributes
	}

	pub fn parameters(&self) -> &DefinitionTable<ParameterHandle, ParameterDef> {
		&self.parameters
	}

	pub fn callpaths(&self) -> &DefinitionTable<CallpathHandle, CallpathDef> {
		&self.callpaths
	}

	pub fn location_properties(&self) -> &DefinitionTable<LocationPropertyHandle, LocationPropertyDef> {
		&self.location_properties
	}

	pub fn properties(&self) -> &PropertyTable {
		&self.properties
	}

	/// Value types of a sampling set's metrics, in member order.
	pub fn sampling_set_value_types(&self, sampling_set: SamplingSetHandle) -> crate::Result<Vec<MetricValueType>> {
		let set = self.sampling_sets.get(sampling_set).ok_or(DefinitionError::UnknownHandle {
			kind: DefinitionKind::SamplingSet,
			id: sampling_set.0,
		})?;

		set.metrics
			.iter()
			.map(|metric| {
				self.metrics.get(*metric).map(|def| def.value_type).ok_or(DefinitionError::UnknownHandle {
					kind: DefinitionKind::Metric,
					id: metric.0,
				})
			})
			.collect()
	}

	pub fn count(&self, kind: DefinitionKind) -> usize {
		match kind {
			DefinitionKind::String => self.strings.len(),
			DefinitionKind::SystemTreeNode => self.system_tree_nodes.len(),
			DefinitionKind::LocationGroup => self.location_groups.len(),
			DefinitionKind::Location => self.locations.len(),
			DefinitionKind::Region => self.regions.len(),
			DefinitionKind::Group => self.groups.len(),
			DefinitionKind::Communicator => self.communicators.len(),
			DefinitionKind::RmaWindow => self.rma_windows.len(),
			DefinitionKind::Metric => self.metrics.len(),
			DefinitionKind::SamplingSet => self.sampling_sets.len(),
			DefinitionKind::Attribute => self.attributes.len(),
			DefinitionKind::Parameter => self.parameters.len(),
			DefinitionKind::Callpath => self.callpaths.len(),
			DefinitionKind::LocationProperty => self.location_properties.len(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_region_reuses_strings() {
		let mut defs = DefinitionManager::new();
		let main = defs.new_region("main", Some("main.c"), 1, 10, Paradigm::User, RegionType::Function);
		let again = defs.new_region("main", Some("main.c"), 1, 10, Paradigm::User, RegionType::Function);

		assert_eq!(main, again);
		assert_eq!(defs.count(DefinitionKind::Region), 1);
		assert_eq!(defs.string(defs.regions().get(main).unwrap().name), Some("main"));
	}

	#[test]
	fn test_locations_are_never_deduplicated() {
		let mut defs = DefinitionManager::new();
		let node = defs.new_system_tree_node(None, "machine", "host");
		let group = defs.new_location_group("Process", LocationGroupType::Process, node);
		let a = defs.new_location("Thread", LocationType::CpuThread, group, 0);
		let b = defs.new_location("Thread", LocationType::CpuThread, group, 0);
		assert_ne!(a, b);
	}

	#[test]
	fn test_location_updates() {
		let mut defs = DefinitionManager::new();
		let node = defs.new_system_tree_node(None, "machine", "host");
		let group = defs.new_location_group("Process", LocationGroupType::Process, node);
		let location = defs.new_location("Master thread", LocationType::CpuThread, group, 0);

		defs.set_location_global_id(location, 42).unwrap();
		defs.set_location_number_of_events(location, 17).unwrap();

		let def = defs.locations().get(location).unwrap();
		assert_eq!(def.global_id, Some(42));
		assert_eq!(def.number_of_events, 17);

		assert!(defs.set_location_global_id(LocationHandle(9), 1).is_err());
	}

	#[test]
	fn test_sampling_set_value_types() {
		let mut defs = DefinitionManager::new();
		let cycles = defs.new_metric("PAPI_TOT_CYC", "cycles", "#", MetricValueType::Uint64);
		let temp = defs.new_metric("temperature", "", "C", MetricValueType::Double);
		let set = defs.new_sampling_set(vec![cycles, temp]);

		assert_eq!(
			defs.sampling_set_value_types(set).unwrap(),
			vec![MetricValueType::Uint64, MetricValueType::Double]
		);
		assert!(defs.sampling_set_value_types(SamplingSetHandle(5)).is_err());
	}
}
