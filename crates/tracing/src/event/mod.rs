// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Translation of measurement events into archive records.
//!
//! Each event writes one record, two for task begin and completion, to the
//! location's own writer and may mark the location's open rewind frames as
//! affected by the event's paradigm. Pending attributes are attached to the
//! next record and then dropped.

mod metric;
mod mpi;
mod region;
mod rewind;
mod rma;
mod thread;

use scorep_archive::{ArchiveError, EventRecord, MeasurementMode};
use scorep_type::RewindParadigm;
use tracing::warn;

pub use rewind::rma_rewind_paradigm;

use crate::{TraceSession, error::fatal, location::TracingLocation};

/// Records the events of one location.
pub struct Recorder<'a> {
	session: &'a TraceSession,
	location: &'a mut TracingLocation,
}

impl<'a> Recorder<'a> {
	pub fn new(session: &'a TraceSession, location: &'a mut TracingLocation) -> Self {
		Self {
			session,
			location,
		}
	}

	fn write(&mut self, timestamp: u64, record: EventRecord) {
		let attributes = std::mem::take(&mut self.location.data.attributes);
		let local_id = self.location.local_id();

		let writer = match self.session.event_writer(self.location) {
			Ok(writer) => writer,
			Err(err) => {
				warn!(location = local_id, "dropping event: {err}");
				return;
			}
		};

		match writer.write(attributes, timestamp, record) {
			Ok(()) => {}
			Err(ArchiveError::OutOfMemory) => {
				fatal("trace buffer memory exhausted even after a flush; increase SCOREP_TOTAL_MEMORY")
			}
			Err(err) => warn!(location = local_id, timestamp, "failed to record event: {err}"),
		}
	}

	/// Marks every open rewind frame as affected by `paradigm`.
	fn mark(&mut self, paradigm: RewindParadigm) {
		let epoch = self.location.location.flush_epoch();
		let rewind = &mut self.location.data.rewind;
		rewind.sync(epoch);
		rewind.mark_paradigm(paradigm);
	}

	pub fn enable_recording(&mut self, timestamp: u64) {
		self.write(timestamp, EventRecord::MeasurementOnOff {
			mode: MeasurementMode::On,
		});
	}

	pub fn disable_recording(&mut self, timestamp: u64) {
		self.write(timestamp, EventRecord::MeasurementOnOff {
			mode: MeasurementMode::Off,
		});
	}
}
