// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc, OnceLock,
	atomic::{AtomicBool, Ordering},
};

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use scorep_archive::{Archive, Collectives, EvtWriter, SerialCollectives, UserData};
use scorep_definition::{DefinitionManager, IdMappings, unify};
use scorep_type::{LocationGroupHandle, LocationGroupType, LocationType, PropertyValue, SystemTreeNodeHandle};
use tracing::{debug, info, warn};

use crate::{
	ChunkAllocator, PoolStats, Result, TraceError, TracingConfig,
	clock::{Clock, MonotonicClock},
	definition::{ClockOffset, write_clock_offsets, write_definitions, write_mappings},
	flush::{FlushController, FlushObserver, Registry},
	location::{Location, LocationRegistry, TracingLocation},
};

enum ArchiveState {
	Uninitialized,
	Open(Archive),
	Finalized,
}

/// Result of definition unification as seen by one process.
#[derive(Debug, Clone, Default)]
pub struct UnifiedDefinitions {
	/// Local to global translation of this process's definitions.
	pub mappings: IdMappings,
	/// The global definitions; only the master process needs them.
	pub global: Option<DefinitionManager>,
}

pub struct TraceSessionBuilder {
	config: TracingConfig,
	clock: Arc<dyn Clock>,
	collectives: Arc<dyn Collectives>,
}

impl TraceSessionBuilder {
	pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	pub fn collectives(mut self, collectives: Arc<dyn Collectives>) -> Self {
		self.collectives = collectives;
		self
	}

	pub fn build(self) -> Arc<TraceSession> {
		let mut definitions = DefinitionManager::new();
		let machine = definitions.new_system_tree_node(None, "machine", "localhost");
		let process = definitions.new_location_group("Process", LocationGroupType::Process, machine);

		Arc::new(TraceSession {
			allocator: ChunkAllocator::new(self.config.chunk_size, self.config.total_memory),
			config: self.config,
			archive: Mutex::new(ArchiveState::Uninitialized),
			registry: LocationRegistry::new(),
			definitions: RwLock::new(definitions),
			clock: self.clock,
			collectives: self.collectives,
			rank: OnceLock::new(),
			clock_offsets: Mutex::new(Vec::new()),
			observers: Registry::default(),
			machine,
			process,
			writers_finalized: AtomicBool::new(false),
		})
	}
}

/// The tracing state of one process.
///
/// Owns the single trace archive of the process. Operations that change the
/// archive's shared metadata, such as creating writers or assigning global
/// location ids, run under the archive lock. Event writing needs no lock:
/// every writer belongs to exactly one [`TracingLocation`].
pub struct TraceSession {
	config: TracingConfig,
	archive: Mutex<ArchiveState>,
	allocator: ChunkAllocator,
	registry: LocationRegistry,
	definitions: RwLock<DefinitionManager>,
	clock: Arc<dyn Clock>,
	collectives: Arc<dyn Collectives>,
	rank: OnceLock<u32>,
	clock_offsets: Mutex<Vec<ClockOffset>>,
	observers: Registry<dyn FlushObserver>,
	machine: SystemTreeNodeHandle,
	process: LocationGroupHandle,
	writers_finalized: AtomicBool,
}

impl TraceSession {
	pub fn builder(config: TracingConfig) -> TraceSessionBuilder {
		TraceSessionBuilder {
			config,
			clock: Arc::new(MonotonicClock::default()),
			collectives: Arc::new(SerialCollectives),
		}
	}

	pub fn config(&self) -> &TracingConfig {
		&self.config
	}

	pub fn clock(&self) -> &dyn Clock {
		self.clock.as_ref()
	}

	pub fn rank(&self) -> Option<u32> {
		self.rank.get().copied()
	}

	pub fn machine(&self) -> SystemTreeNodeHandle {
		self.machine
	}

	pub fn process(&self) -> LocationGroupHandle {
		self.process
	}

	pub fn locations(&self) -> &LocationRegistry {
		&self.registry
	}

	pub fn location(&self, local_id: u32) -> Result<Arc<Location>> {
		self.registry.get(local_id).ok_or(TraceError::UnknownLocation(local_id))
	}

	pub fn definitions(&self) -> RwLockReadGuard<'_, DefinitionManager> {
		self.definitions.read()
	}

	/// Definitions are created by the measurement core through this guard.
	pub fn definitions_mut(&self) -> RwLockWriteGuard<'_, DefinitionManager> {
		self.definitions.write()
	}

	pub fn observers(&self) -> &Registry<dyn FlushObserver> {
		&self.observers
	}

	pub fn register_flush_observer(&self, observer: Arc<dyn FlushObserver>) {
		self.observers.register(observer);
	}

	pub fn pool_stats(&self) -> PoolStats {
		self.allocator.pool().stats()
	}

	pub fn add_clock_offset(&self, time: u64, offset: i64, standard_deviation: f64) {
		self.clock_offsets.lock().push(ClockOffset {
			time,
			offset,
			standard_deviation,
		});
	}

	pub fn is_initialized(&self) -> bool {
		matches!(*self.archive.lock(), ArchiveState::Open(_))
	}

	/// Locks the archive for a metadata change.
	pub fn lock_archive(&self) -> Result<MappedMutexGuard<'_, Archive>> {
		let guard = self.archive.lock();
		let finalized = matches!(*guard, ArchiveState::Finalized);
		MutexGuard::try_map(guard, |state| match state {
			ArchiveState::Open(archive) => Some(archive),
			_ => None,
		})
		.map_err(|_| {
			if finalized {
				TraceError::AlreadyFinalized
			} else {
				TraceError::NotInitialized
			}
		})
	}

	/// Opens the trace archive.
	pub fn initialize(self: &Arc<Self>) -> Result<()> {
		let mut state = self.archive.lock();
		match *state {
			ArchiveState::Open(_) => return Err(TraceError::AlreadyInitialized),
			ArchiveState::Finalized => return Err(TraceError::AlreadyFinalized),
			ArchiveState::Uninitialized => {}
		}

		self.config.validate()?;
		let archive = Archive::create(
			self.config.archive_config(),
			Arc::new(FlushController::new(Arc::downgrade(self))),
			Arc::new(self.allocator.clone()),
			self.collectives.clone(),
		)?;
		*state = ArchiveState::Open(archive);
		drop(state);

		self.add_clock_offset(self.clock.now(), 0, 0.0);
		info!(
			directory = %self.config.directory.display(),
			chunk_size = self.config.chunk_size,
			total_memory = self.config.total_memory,
			"tracing initialized"
		);
		Ok(())
	}

	/// Registers a new location and its definition.
	pub fn on_location_creation(&self, kind: LocationType, parent: Option<&TracingLocation>) -> TracingLocation {
		let local_id = self.registry.next_local_id();
		let name = match kind {
			LocationType::CpuThread if local_id == 0 => "Master thread".to_string(),
			LocationType::CpuThread => format!("Thread {local_id}"),
			LocationType::Gpu => format!("GPU stream {local_id}"),
			LocationType::Metric => format!("Metric location {local_id}"),
		};
		let definition = self.definitions.write().new_location(&name, kind, self.process, local_id);

		let location = Arc::new(Location::new(local_id, kind, parent.map(TracingLocation::local_id), definition));
		self.registry.insert(location.clone());
		if self.rank.get().is_some() {
			if let Err(err) = self.ensure_global_id(&location) {
				warn!(location = local_id, "cannot assign global location id: {err}");
			}
		}

		debug!(location = local_id, ?kind, parent = ?location.parent(), "created location");
		TracingLocation::new(location)
	}

	/// Called once the process rank is known.
	pub fn on_mpp_init(&self) -> Result<()> {
		let rank = self.collectives.rank();
		if self.rank.set(rank).is_err() && self.rank.get() != Some(&rank) {
			return Err(TraceError::InvalidConfig(format!("process rank changed to {rank}")));
		}

		{
			let mut archive = self.lock_archive()?;
			archive.set_master(rank == 0);
			archive.open_event_files()?;
		}

		for location in self.registry.snapshot() {
			self.ensure_global_id(&location)?;
		}
		debug!(rank, locations = self.registry.len(), "event files opened");
		Ok(())
	}

	/// Global id of `location`, assigned on first use.
	pub fn ensure_global_id(&self, location: &Location) -> Result<u64> {
		if let Some(global_id) = location.global_id() {
			return Ok(global_id);
		}

		let rank = self.rank().ok_or(TraceError::MppNotInitialized)?;
		let global_id = {
			let _archive = self.archive.lock();
			location.assign_global_id(((location.local_id() as u64) << 32) | rank as u64)
		};
		self.definitions.write().set_location_global_id(location.definition(), global_id)?;
		Ok(global_id)
	}

	/// The location's event writer, created on first use.
	pub(crate) fn event_writer<'a>(&self, location: &'a mut TracingLocation) -> Result<&'a mut EvtWriter> {
		let writer = match location.data.writer.take() {
			Some(writer) => writer,
			None => {
				let user_data: UserData = location.location.clone();
				let mut writer = self.lock_archive()?.event_writer(user_data);
				if let Some(global_id) = location.location.global_id() {
					writer.set_location_id(global_id);
				}
				debug!(location = location.local_id(), "created event writer");
				writer
			}
		};
		Ok(location.data.writer.insert(writer))
	}

	/// Closes the event writers of `locations` and fixes their event counts.
	///
	/// A writer that fails to close is reported and skipped.
	pub fn finalize_event_writers<'a, I>(&self, locations: I) -> Result<()>
	where
		I: IntoIterator<Item = &'a mut TracingLocation>,
	{
		let mut closed = 0usize;
		for location in locations {
			let global_id = self.ensure_global_id(&location.location)?;
			let Some(writer) = location.data.writer.as_mut() else {
				continue;
			};
			if let Err(err) = writer.close() {
				warn!(location = global_id, "failed to close event writer: {err}");
			}
			let events = writer.number_of_events();
			self.definitions.write().set_location_number_of_events(location.location.definition(), events)?;
			closed += 1;
		}

		self.add_clock_offset(self.clock.now(), 0, 0.0);
		self.writers_finalized.store(true, Ordering::Release);
		debug!(closed, "finalized event writers");
		Ok(())
	}

	/// Unifies the definitions of this process on its own.
	pub fn unify_locally(&self) -> UnifiedDefinitions {
		let definitions = self.definitions.read();
		let unified = unify(&[&*definitions]);
		UnifiedDefinitions {
			mappings: unified.mappings.into_iter().next().unwrap_or_default(),
			global: Some(unified.definitions),
		}
	}

	/// Writes the mapping and clock offset stream of every location, then,
	/// on the master, the global definitions and the location count of all
	/// processes.
	pub fn write_definitions(&self, unified: &UnifiedDefinitions) -> Result<()> {
		if !self.writers_finalized.load(Ordering::Acquire) {
			return Err(TraceError::EventWritersOpen);
		}

		let locations = self.registry.snapshot();
		let mut ids = Vec::with_capacity(locations.len());
		for location in &locations {
			ids.push(self.ensure_global_id(location)?);
		}

		let offsets = self.clock_offsets.lock().clone();
		let definitions = self.definitions.read();
		for global_id in ids {
			let mut writer = self.lock_archive()?.local_def_writer(global_id);
			write_mappings(&mut writer, &unified.mappings);
			write_clock_offsets(&mut writer, &offsets);
			if self.config.write_local_definitions {
				write_definitions(&mut writer, &definitions);
			}
			if let Err(err) = writer.close() {
				warn!(location = global_id, "failed to write local definitions: {err}");
			}
		}
		drop(definitions);

		self.collectives.barrier();

		if !self.lock_archive()?.is_master() {
			return Ok(());
		}
		let global = unified.global.as_ref().ok_or(TraceError::MissingGlobalDefinitions)?;
		let mut writer = {
			let mut archive = self.lock_archive()?;
			archive.set_number_of_locations(global.locations().len() as u64);
			archive.global_def_writer()?
		};
		let stats = write_definitions(&mut writer, global);
		writer.close()?;
		info!(written = stats.written, failed = stats.failed, "wrote global definitions");
		Ok(())
	}

	/// Stores the completeness properties in the anchor.
	pub fn write_properties(&self, unified: &UnifiedDefinitions) -> Result<()> {
		let properties: Vec<_> = match unified.global.as_ref() {
			Some(global) => global.properties().iter().collect(),
			None => self.definitions.read().properties().iter().collect(),
		};

		let mut archive = self.lock_archive()?;
		if !archive.is_master() {
			return Ok(());
		}
		for (property, value) in properties {
			if value == PropertyValue::Unknown {
				debug!(property = property.name(), "property invalidated by rewind");
			}
			archive.set_property(&format!("SCOREP::{}", property.name()), value.as_str())?;
		}
		Ok(())
	}

	/// Closes the archive. The session cannot be initialized again.
	pub fn finalize(&self) -> Result<()> {
		let mut state = self.archive.lock();
		let archive = match std::mem::replace(&mut *state, ArchiveState::Finalized) {
			ArchiveState::Open(archive) => archive,
			ArchiveState::Uninitialized => {
				*state = ArchiveState::Uninitialized;
				return Err(TraceError::NotInitialized);
			}
			ArchiveState::Finalized => return Err(TraceError::AlreadyFinalized),
		};
		drop(state);

		if !self.writers_finalized.load(Ordering::Acquire) {
			warn!("finalizing tracing with open event writers");
		}
		archive.close()?;
		info!(locations = self.registry.len(), "tracing finalized");
		Ok(())
	}
}
