// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use scorep_archive::{Collectives, EventRecord, TraceReader};
use scorep_tracing::{ManualClock, TraceSession, TracingConfig, TracingLocation, TracingSubstrate, UnifiedDefinitions};
use scorep_type::{Paradigm, RegionHandle, RegionType};

pub struct Harness {
	pub session: Arc<TraceSession>,
	pub substrate: TracingSubstrate,
	pub clock: Arc<ManualClock>,
}

/// Collectives of one rank out of `size`, without real synchronization.
pub struct Rank {
	pub rank: u32,
	pub size: u32,
}

impl Collectives for Rank {
	fn rank(&self) -> u32 {
		self.rank
	}

	fn size(&self) -> u32 {
		self.size
	}

	fn barrier(&self) {}
}

pub fn config(dir: &Path) -> TracingConfig {
	TracingConfig::default().directory(dir).write_local_definitions(true)
}

pub fn start(config: TracingConfig) -> Harness {
	start_rank(config, Rank {
		rank: 0,
		size: 1,
	})
}

pub fn start_rank(config: TracingConfig, rank: Rank) -> Harness {
	let clock = Arc::new(ManualClock::new(1000));
	let session = TraceSession::builder(config).clock(clock.clone()).collectives(Arc::new(rank)).build();
	session.initialize().unwrap();
	session.on_mpp_init().unwrap();
	Harness {
		substrate: TracingSubstrate::new(session.clone()),
		session,
		clock,
	}
}

pub fn region(session: &TraceSession, name: &str) -> RegionHandle {
	session.definitions_mut().new_region(name, Some("main.c"), 1, 10, Paradigm::User, RegionType::Function)
}

/// Runs the whole finalization sequence of a single process.
pub fn finish(session: &TraceSession, locations: Vec<&mut TracingLocation>) -> UnifiedDefinitions {
	session.finalize_event_writers(locations).unwrap();
	let unified = session.unify_locally();
	session.write_definitions(&unified).unwrap();
	session.write_properties(&unified).unwrap();
	session.finalize().unwrap();
	unified
}

pub fn records(reader: &TraceReader, location: u64) -> Vec<(u64, EventRecord)> {
	reader.events(location).unwrap().into_iter().map(|event| (event.timestamp, event.record)).collect()
}
