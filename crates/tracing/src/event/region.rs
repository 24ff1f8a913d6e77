// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_archive::EventRecord;
use scorep_type::RegionHandle;

use super::Recorder;

impl Recorder<'_> {
	pub fn enter_region(&mut self, timestamp: u64, region: RegionHandle) {
		self.write(timestamp, EventRecord::Enter {
			region: region.0,
		});
	}

	pub fn exit_region(&mut self, timestamp: u64, region: RegionHandle) {
		self.write(timestamp, EventRecord::Leave {
			region: region.0,
		});
	}
}
