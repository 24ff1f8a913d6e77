// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	sync::{
		Arc, OnceLock,
		atomic::{AtomicU8, AtomicU32, AtomicU64, Ordering},
	},
};

use dashmap::DashMap;
use scorep_archive::{Attribute, EvtWriter};
use scorep_type::{LocationHandle, LocationType, MetricValueType, SamplingSetHandle};

use crate::rewind::RewindStack;

/// Buffer flush state of one location.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPhase {
	Normal = 0,
	PreFlush = 1,
	Flushing = 2,
	PostFlush = 3,
}

impl FlushPhase {
	fn from_u8(value: u8) -> Self {
		match value {
			1 => FlushPhase::PreFlush,
			2 => FlushPhase::Flushing,
			3 => FlushPhase::PostFlush,
			_ => FlushPhase::Normal,
		}
	}
}

/// The shared part of a location, reachable from the flush callbacks.
#[derive(Debug)]
pub struct Location {
	local_id: u32,
	kind: LocationType,
	parent: Option<u32>,
	definition: LocationHandle,
	global_id: OnceLock<u64>,
	flush_epoch: AtomicU64,
	flush_begin: AtomicU64,
	phase: AtomicU8,
}

impl Location {
	pub(crate) fn new(local_id: u32, kind: LocationType, parent: Option<u32>, definition: LocationHandle) -> Self {
		Self {
			local_id,
			kind,
			parent,
			definition,
			global_id: OnceLock::new(),
			flush_epoch: AtomicU64::new(0),
			flush_begin: AtomicU64::new(0),
			phase: AtomicU8::new(FlushPhase::Normal as u8),
		}
	}

	pub fn local_id(&self) -> u32 {
		self.local_id
	}

	pub fn kind(&self) -> LocationType {
		self.kind
	}

	pub fn parent(&self) -> Option<u32> {
		self.parent
	}

	pub fn definition(&self) -> LocationHandle {
		self.definition
	}

	pub fn global_id(&self) -> Option<u64> {
		self.global_id.get().copied()
	}

	pub(crate) fn assign_global_id(&self, global_id: u64) -> u64 {
		*self.global_id.get_or_init(|| global_id)
	}

	/// Number of intermediate buffer flushes so far.
	pub fn flush_epoch(&self) -> u64 {
		self.flush_epoch.load(Ordering::Acquire)
	}

	pub fn phase(&self) -> FlushPhase {
		FlushPhase::from_u8(self.phase.load(Ordering::Acquire))
	}

	pub(crate) fn set_phase(&self, phase: FlushPhase) {
		self.phase.store(phase as u8, Ordering::Release);
	}

	pub(crate) fn begin_flush(&self, timestamp: u64) {
		self.flush_begin.store(timestamp, Ordering::Release);
		self.flush_epoch.fetch_add(1, Ordering::AcqRel);
	}

	pub(crate) fn flush_begin(&self) -> u64 {
		self.flush_begin.load(Ordering::Acquire)
	}
}

/// All locations of the process, by local id.
#[derive(Debug, Default)]
pub struct LocationRegistry {
	locations: DashMap<u32, Arc<Location>>,
	next_id: AtomicU32,
}

impl LocationRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn next_local_id(&self) -> u32 {
		self.next_id.fetch_add(1, Ordering::AcqRel)
	}

	pub(crate) fn insert(&self, location: Arc<Location>) {
		self.locations.insert(location.local_id(), location);
	}

	pub fn get(&self, local_id: u32) -> Option<Arc<Location>> {
		self.locations.get(&local_id).map(|entry| entry.value().clone())
	}

	pub fn len(&self) -> usize {
		self.locations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.locations.is_empty()
	}

	/// Locations ordered by local id.
	pub fn snapshot(&self) -> Vec<Arc<Location>> {
		let mut locations: Vec<_> = self.locations.iter().map(|entry| entry.value().clone()).collect();
		locations.sort_by_key(|location| location.local_id());
		locations
	}
}

/// Tracing state exclusively owned by one location's thread.
#[derive(Default)]
pub struct TracingData {
	pub(crate) writer: Option<EvtWriter>,
	pub(crate) attributes: Vec<Attribute>,
	pub(crate) rewind: RewindStack,
	pub(crate) metric_types: HashMap<SamplingSetHandle, Arc<[MetricValueType]>>,
}

/// A location together with its tracing state.
///
/// Handed out by the session at location creation and passed by the
/// measurement core to every event of that location.
pub struct TracingLocation {
	pub(crate) location: Arc<Location>,
	pub(crate) data: TracingData,
}

impl TracingLocation {
	pub(crate) fn new(location: Arc<Location>) -> Self {
		Self {
			location,
			data: TracingData::default(),
		}
	}

	pub fn location(&self) -> &Arc<Location> {
		&self.location
	}

	pub fn local_id(&self) -> u32 {
		self.location.local_id()
	}

	pub fn rewind_depth(&self) -> usize {
		self.data.rewind.depth()
	}

	pub fn number_of_events(&self) -> u64 {
		self.data.writer.as_ref().map(EvtWriter::number_of_events).unwrap_or(0)
	}

	pub fn has_writer(&self) -> bool {
		self.data.writer.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_global_id_is_assigned_once() {
		let location = Location::new(0, LocationType::CpuThread, None, LocationHandle(0));
		assert_eq!(location.global_id(), None);
		assert_eq!(location.assign_global_id(7), 7);
		assert_eq!(location.assign_global_id(9), 7);
		assert_eq!(location.global_id(), Some(7));
	}

	#[test]
	fn test_flush_bookkeeping() {
		let location = Location::new(0, LocationType::CpuThread, None, LocationHandle(0));
		assert_eq!(location.phase(), FlushPhase::Normal);
		location.begin_flush(55);
		location.set_phase(FlushPhase::Flushing);
		assert_eq!(location.flush_epoch(), 1);
		assert_eq!(location.flush_begin(), 55);
		assert_eq!(location.phase(), FlushPhase::Flushing);
	}

	#[test]
	fn test_registry_snapshot_is_ordered() {
		let registry = LocationRegistry::new();
		for _ in 0..3 {
			let id = registry.next_local_id();
			registry.insert(Arc::new(Location::new(id, LocationType::CpuThread, None, LocationHandle(id))));
		}
		let ids: Vec<_> = registry.snapshot().iter().map(|location| location.local_id()).collect();
		assert_eq!(ids, vec![0, 1, 2]);
		assert!(registry.get(1).is_some());
		assert!(registry.get(5).is_none());
	}
}
