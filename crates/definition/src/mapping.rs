// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use scorep_type::Handle;
use serde::{Deserialize, Serialize};

use crate::DefinitionKind;

/// Dense local to global translation table of one definition kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdMap {
	map: Vec<u32>,
}

impl IdMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_vec(map: Vec<u32>) -> Self {
		Self {
			map,
		}
	}

	pub fn push(&mut self, global: u32) {
		self.map.push(global);
	}

	pub fn resolve(&self, local: u32) -> Option<u32> {
		self.map.get(local as usize).copied()
	}

	/// An identity map carries no information and is never written.
	pub fn is_identity(&self) -> bool {
		self.map.iter().enumerate().all(|(local, global)| local as u32 == *global)
	}

	pub fn as_slice(&self) -> &[u32] {
		&self.map
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

/// The ID maps of one process, per definition kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMappings {
	maps: BTreeMap<DefinitionKind, IdMap>,
}

impl IdMappings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, kind: DefinitionKind, map: IdMap) {
		self.maps.insert(kind, map);
	}

	pub fn push(&mut self, kind: DefinitionKind, global: u32) {
		self.maps.entry(kind).or_default().push(global);
	}

	pub fn get(&self, kind: DefinitionKind) -> Option<&IdMap> {
		self.maps.get(&kind)
	}

	/// Translates a local handle, leaving it unchanged where no map exists.
	pub fn resolve<H: Handle>(&self, kind: DefinitionKind, handle: H) -> H {
		match self.maps.get(&kind).and_then(|map| map.resolve(handle.id())) {
			Some(global) => H::from_id(global),
			None => handle,
		}
	}

	/// Maps that must be written, in definition write order.
	pub fn non_identity(&self) -> impl Iterator<Item = (DefinitionKind, &IdMap)> {
		DefinitionKind::WRITE_ORDER
			.iter()
			.filter_map(|kind| self.maps.get(kind).map(|map| (*kind, map)))
			.filter(|(_, map)| !map.is_identity())
	}
}

/// Rewrites every handle a definition references through the process's maps.
pub trait Remap {
	fn remap(&self, mappings: &IdMappings) -> Self;
}

#[cfg(test)]
mod tests {
	use scorep_type::{RegionHandle, StringHandle};

	use super::*;

	#[test]
	fn test_identity_detection() {
		assert!(IdMap::from_vec(vec![0, 1, 2]).is_identity());
		assert!(IdMap::new().is_identity());
		assert!(!IdMap::from_vec(vec![0, 2, 1]).is_identity());
	}

	#[test]
	fn test_resolve_without_map_is_identity() {
		let mappings = IdMappings::new();
		assert_eq!(mappings.resolve(DefinitionKind::Region, RegionHandle(4)), RegionHandle(4));
	}

	#[test]
	fn test_resolve_through_map() {
		let mut mappings = IdMappings::new();
		mappings.insert(DefinitionKind::String, IdMap::from_vec(vec![3, 0]));
		assert_eq!(mappings.resolve(DefinitionKind::String, StringHandle(0)), StringHandle(3));
		assert_eq!(mappings.resolve(DefinitionKind::String, StringHandle(1)), StringHandle(0));
	}

	#[test]
	fn test_non_identity_skips_identity_maps() {
		let mut mappings = IdMappings::new();
		mappings.insert(DefinitionKind::Region, IdMap::from_vec(vec![1, 0]));
		mappings.insert(DefinitionKind::String, IdMap::from_vec(vec![0, 1]));

		let kinds: Vec<_> = mappings.non_identity().map(|(kind, _)| kind).collect();
		assert_eq!(kinds, vec![DefinitionKind::Region]);
	}
}
