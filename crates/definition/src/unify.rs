// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::hash::Hash;

use scorep_type::Handle;
use tracing::debug;

use crate::{DefinitionKind, DefinitionManager, DefinitionTable, IdMappings, Remap};

/// The global definitions and one [`IdMappings`] per input process.
#[derive(Debug, Clone)]
pub struct Unified {
	pub definitions: DefinitionManager,
	pub mappings: Vec<IdMappings>,
}

/// Merges process-local definitions, in rank order, into one global numbering.
///
/// Equal definitions of different processes share one global sequence
/// number. Location groups and locations stay distinct per process.
pub fn unify(processes: &[&DefinitionManager]) -> Unified {
	let mut global = DefinitionManager::new();
	let mut mappings = Vec::with_capacity(processes.len());

	for local in processes {
		let mut mapping = IdMappings::new();

		merge(&mut mapping, DefinitionKind::String, &local.strings, &mut global.strings, true);
		merge(
			&mut mapping,
			DefinitionKind::SystemTreeNode,
			&local.system_tree_nodes,
			&mut global.system_tree_nodes,
			true,
		);
		merge(
			&mut mapping,
			DefinitionKind::LocationGroup,
			&local.location_groups,
			&mut global.location_groups,
			false,
		);
		merge(&mut mapping, DefinitionKind::Location, &local.locations, &mut global.locations, false);
		merge(&mut mapping, DefinitionKind::Region, &local.regions, &mut global.regions, true);
		merge(&mut mapping, DefinitionKind::Group, &local.groups, &mut global.groups, true);
		merge(&mut mapping, DefinitionKind::Communicator, &local.communicators, &mut global.communicators, true);
		merge(&mut mapping, DefinitionKind::RmaWindow, &local.rma_windows, &mut global.rma_windows, true);
		merge(&mut mapping, DefinitionKind::Metric, &local.metrics, &mut global.metrics, true);
		merge(&mut mapping, DefinitionKind::SamplingSet, &local.sampling_sets, &mut global.sampling_sets, true);
		merge(&mut mapping, DefinitionKind::Attribute, &local.attributes, &mut global.attributes, true);
		merge(&mut mapping, DefinitionKind::Parameter, &local.parameters, &mut global.parameters, true);
		merge(&mut mapping, DefinitionKind::Callpath, &local.callpaths, &mut global.callpaths, true);
		merge(
			&mut mapping,
			DefinitionKind::LocationProperty,
			&local.location_properties,
			&mut global.location_properties,
			true,
		);

		global.properties.merge(&local.properties);
		mappings.push(mapping);
	}

	debug!(
		processes = processes.len(),
		strings = global.strings.len(),
		regions = global.regions.len(),
		locations = global.locations.len(),
		"unified definitions"
	);

	Unified {
		definitions: global,
		mappings,
	}
}

fn merge<H, D>(
	mapping: &mut IdMappings,
	kind: DefinitionKind,
	local: &DefinitionTable<H, D>,
	global: &mut DefinitionTable<H, D>,
	deduplicate: bool,
) where
	H: Handle,
	D: Clone + Eq + Hash + Remap,
{
	for (_, def) in local.iter() {
		// self references point backwards, so their map entry already exists
		let def = def.remap(mapping);
		let handle = if deduplicate {
			global.intern(def)
		} else {
			global.insert(def)
		};
		mapping.push(kind, handle.id());
	}
}

#[cfg(test)]
mod tests {
	use scorep_type::{
		LocationGroupType, LocationType, Paradigm, Property, PropertyValue, RegionHandle, RegionType,
	};

	use super::*;

	fn process(regions: &[&str]) -> DefinitionManager {
		let mut defs = DefinitionManager::new();
		let node = defs.new_system_tree_node(None, "machine", "cluster");
		let group = defs.new_location_group("Process", LocationGroupType::Process, node);
		defs.new_location("Master thread", LocationType::CpuThread, group, 0);
		for region in regions {
			defs.new_region(region, None, 0, 0, Paradigm::User, RegionType::User);
		}
		defs
	}

	#[test]
	fn test_first_process_maps_identically() {
		let rank0 = process(&["main", "foo"]);
		let unified = unify(&[&rank0]);

		assert_eq!(unified.mappings.len(), 1);
		assert_eq!(unified.mappings[0].non_identity().count(), 0);
	}

	#[test]
	fn test_shared_definitions_resolve_to_same_logical_definition() {
		let rank0 = process(&["main", "foo"]);
		let rank1 = process(&["bar", "main"]);
		let unified = unify(&[&rank0, &rank1]);
		let global = &unified.definitions;

		assert_eq!(global.regions().len(), 3);

		let mapping = &unified.mappings[1];
		for (local, def) in rank1.regions().iter() {
			let global_handle = mapping.resolve(DefinitionKind::Region, local);
			let global_def = global.regions().get(global_handle).unwrap();
			assert_eq!(rank1.string(def.name), global.string(global_def.name));
		}

		let main_local = RegionHandle(1);
		assert_eq!(mapping.resolve(DefinitionKind::Region, main_local), RegionHandle(0));
		assert!(mapping.non_identity().any(|(kind, _)| kind == DefinitionKind::Region));
	}

	#[test]
	fn test_locations_stay_per_process() {
		let rank0 = process(&[]);
		let rank1 = process(&[]);
		let unified = unify(&[&rank0, &rank1]);

		assert_eq!(unified.definitions.location_groups().len(), 2);
		assert_eq!(unified.definitions.locations().len(), 2);
		assert_eq!(unified.definitions.system_tree_nodes().len(), 1);
	}

	#[test]
	fn test_self_references_are_remapped() {
		let rank0 = process(&["a"]);
		let mut rank1 = DefinitionManager::new();
		let only = rank1.new_region("b", None, 0, 0, Paradigm::User, RegionType::User);
		let root = rank1.new_callpath(None, only);
		let child = rank1.new_callpath(Some(root), only);

		let unified = unify(&[&rank0, &rank1]);
		let mapping = &unified.mappings[1];
		let global_child = mapping.resolve(DefinitionKind::Callpath, child);
		let def = unified.definitions.callpaths().get(global_child).unwrap();

		assert_eq!(def.parent, Some(mapping.resolve(DefinitionKind::Callpath, root)));
		assert_eq!(def.region, mapping.resolve(DefinitionKind::Region, only));
	}

	#[test]
	fn test_properties_merge() {
		let rank0 = process(&[]);
		let mut rank1 = process(&[]);
		rank1.invalidate_property(Property::ThreadForkJoinEventComplete);

		let unified = unify(&[&rank0, &rank1]);
		assert_eq!(
			unified.definitions.properties().value(Property::ThreadForkJoinEventComplete),
			PropertyValue::Unknown
		);
		assert_eq!(unified.definitions.properties().value(Property::MpiCommunicationComplete), PropertyValue::True);
	}
}
