// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, fs, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
	ArchiveConfig, ArchiveError, Collectives, Compression, DefWriter, EvtWriter, FileSubstrate, FlushCallbacks,
	MemoryCallbacks, Result, UserData, storage::Storage,
};

pub(crate) const FORMAT: &str = "scorep-trace";
pub(crate) const VERSION: u32 = 1;

pub(crate) struct Shared {
	pub storage: Storage,
	pub flush: Arc<dyn FlushCallbacks>,
	pub memory: Arc<dyn MemoryCallbacks>,
}

/// Entry point of a trace, written by the master process on close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
	pub format: String,
	pub version: u32,
	pub name: String,
	pub chunk_size: usize,
	pub compression: Compression,
	pub substrate: FileSubstrate,
	pub number_of_processes: u32,
	pub number_of_locations: u64,
	pub properties: BTreeMap<String, String>,
}

/// One trace archive of one process.
///
/// Creating writers and changing archive metadata take `&mut self`; callers
/// that share an archive between locations serialize these calls.
pub struct Archive {
	shared: Arc<Shared>,
	collectives: Arc<dyn Collectives>,
	master: bool,
	event_files_open: bool,
	event_writers: usize,
	number_of_locations: u64,
	properties: BTreeMap<String, String>,
}

impl Archive {
	pub fn create(
		config: ArchiveConfig,
		flush: Arc<dyn FlushCallbacks>,
		memory: Arc<dyn MemoryCallbacks>,
		collectives: Arc<dyn Collectives>,
	) -> Result<Self> {
		config.validate()?;

		let storage = Storage::new(config);
		storage.create_directories()?;
		info!(
			directory = %storage.config().directory.display(),
			name = %storage.config().name,
			"created trace archive"
		);

		Ok(Self {
			shared: Arc::new(Shared {
				storage,
				flush,
				memory,
			}),
			collectives,
			master: false,
			event_files_open: false,
			event_writers: 0,
			number_of_locations: 0,
			properties: BTreeMap::new(),
		})
	}

	pub fn config(&self) -> &ArchiveConfig {
		self.shared.storage.config()
	}

	pub fn set_master(&mut self, master: bool) {
		self.master = master;
	}

	pub fn is_master(&self) -> bool {
		self.master
	}

	/// Event files can only be placed once the process rank is known.
	pub fn open_event_files(&mut self) -> Result<()> {
		let rank = self.collectives.rank();
		self.shared.storage.open_event_files(rank)?;
		self.event_files_open = true;
		debug!(rank, "opened event files");
		Ok(())
	}

	pub fn event_files_open(&self) -> bool {
		self.event_files_open
	}

	pub fn event_writer(&mut self, user_data: UserData) -> EvtWriter {
		self.event_writers += 1;
		EvtWriter::new(self.shared.clone(), user_data)
	}

	pub fn event_writers(&self) -> usize {
		self.event_writers
	}

	pub fn local_def_writer(&mut self, location_id: u64) -> DefWriter {
		let path = self.shared.storage.local_definitions_path(location_id);
		DefWriter::new(self.shared.clone(), path, Some(location_id))
	}

	pub fn global_def_writer(&mut self) -> Result<DefWriter> {
		if !self.master {
			return Err(ArchiveError::NotMaster);
		}
		let path = self.shared.storage.global_definitions_path();
		Ok(DefWriter::new(self.shared.clone(), path, None))
	}

	pub fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
		if !self.master {
			return Err(ArchiveError::NotMaster);
		}
		self.properties.insert(name.to_string(), value.to_string());
		Ok(())
	}

	pub fn set_number_of_locations(&mut self, number_of_locations: u64) {
		self.number_of_locations = number_of_locations;
	}

	/// Synchronizes all processes; the master then writes the anchor.
	pub fn close(self) -> Result<()> {
		self.collectives.barrier();
		if !self.master {
			return Ok(());
		}

		let config = self.shared.storage.config();
		let anchor = Anchor {
			format: FORMAT.to_string(),
			version: VERSION,
			name: config.name.clone(),
			chunk_size: config.chunk_size,
			compression: config.compression,
			substrate: config.substrate,
			number_of_processes: self.collectives.size(),
			number_of_locations: self.number_of_locations,
			properties: self.properties,
		};
		fs::write(config.anchor_path(), serde_json::to_vec_pretty(&anchor)?)?;
		info!(locations = anchor.number_of_locations, "closed trace archive");
		Ok(())
	}
}
