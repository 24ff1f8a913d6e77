// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_archive::{EventRecord, MeasurementMode};
use scorep_type::{RegionHandle, RewindParadigm};
use tracing::{debug, warn};

use super::Recorder;

/// Paradigm RMA events mark on open rewind frames.
///
/// RMA events never invalidate a completeness property when their span is
/// rewound.
pub fn rma_rewind_paradigm() -> Option<RewindParadigm> {
	None
}

impl Recorder<'_> {
	/// Opens a rewind region at the current buffer position.
	pub fn store_rewind_point(&mut self, timestamp: u64, region: RegionHandle) {
		let local_id = self.location.local_id();
		let epoch = self.location.location.flush_epoch();
		self.location.data.rewind.sync(epoch);
		let frame = self.location.data.rewind.push(region, timestamp);

		match self.session.event_writer(self.location) {
			Ok(writer) => writer.store_rewind_point(frame.point),
			Err(err) => warn!(location = local_id, region = region.0, "cannot store rewind point: {err}"),
		}
	}

	/// Closes the innermost rewind region of `region`.
	///
	/// With `do_rewind` everything recorded since the region was entered is
	/// discarded and the gap is bracketed by measurement off/on records.
	/// Inner rewind regions still open are closed along with it.
	pub fn exit_rewind_point(&mut self, timestamp: u64, region: RegionHandle, do_rewind: bool) {
		let local_id = self.location.local_id();
		let epoch = self.location.location.flush_epoch();
		let drained = self.location.data.rewind.sync(epoch);
		if drained > 0 {
			debug!(location = local_id, drained, "dropped rewind points invalidated by a buffer flush");
		}

		let Some(unwound) = self.location.data.rewind.unwind(region) else {
			warn!(
				location = local_id,
				region = region.0,
				"no rewind point for region; it was discarded by an intermediate buffer flush"
			);
			return;
		};

		let writer = match self.session.event_writer(self.location) {
			Ok(writer) => writer,
			Err(err) => {
				warn!(location = local_id, region = region.0, "cannot exit rewind region: {err}");
				return;
			}
		};
		for frame in &unwound.collapsed {
			writer.clear_rewind_point(frame.point);
		}

		let frame = unwound.frame;
		if !do_rewind {
			writer.clear_rewind_point(frame.point);
			return;
		}

		let rewound = writer.rewind(frame.point);
		writer.clear_rewind_point(frame.point);
		if let Err(err) = rewound {
			warn!(location = local_id, region = region.0, "failed to rewind event buffer: {err}");
			return;
		}

		self.write(frame.entered, EventRecord::MeasurementOnOff {
			mode: MeasurementMode::Off,
		});
		self.write(timestamp, EventRecord::MeasurementOnOff {
			mode: MeasurementMode::On,
		});

		let affected: Vec<_> = frame.affected().collect();
		if !affected.is_empty() {
			let mut definitions = self.session.definitions_mut();
			for paradigm in &affected {
				definitions.invalidate_property(paradigm.property());
			}
		}
		debug!(location = local_id, region = region.0, ?affected, "rewound event buffer");
	}
}
