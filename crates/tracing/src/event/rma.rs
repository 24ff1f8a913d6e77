// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_archive::EventRecord;
use scorep_type::{CollectiveType, GroupHandle, LockType, RmaAtomicType, RmaSyncLevel, RmaSyncType, RmaWindowHandle};

use super::{Recorder, rma_rewind_paradigm};
use crate::convert;

impl Recorder<'_> {
	fn write_rma(&mut self, timestamp: u64, record: EventRecord) {
		self.write(timestamp, record);
		if let Some(paradigm) = rma_rewind_paradigm() {
			self.mark(paradigm);
		}
	}

	pub fn rma_win_create(&mut self, timestamp: u64, window: RmaWindowHandle) {
		self.write_rma(timestamp, EventRecord::RmaWinCreate {
			window: window.0,
		});
	}

	pub fn rma_win_destroy(&mut self, timestamp: u64, window: RmaWindowHandle) {
		self.write_rma(timestamp, EventRecord::RmaWinDestroy {
			window: window.0,
		});
	}

	pub fn rma_collective_begin(&mut self, timestamp: u64) {
		self.write_rma(timestamp, EventRecord::RmaCollectiveBegin);
	}

	pub fn rma_collective_end(
		&mut self,
		timestamp: u64,
		kind: CollectiveType,
		sync_level: RmaSyncLevel,
		window: RmaWindowHandle,
		root: u32,
		bytes_sent: u64,
		bytes_received: u64,
	) {
		self.write_rma(timestamp, EventRecord::RmaCollectiveEnd {
			operation: convert::collective(kind),
			sync_level: convert::sync_level(sync_level),
			window: window.0,
			root: convert::root_rank(root),
			bytes_sent,
			bytes_received,
		});
	}

	pub fn rma_group_sync(
		&mut self,
		timestamp: u64,
		sync_level: RmaSyncLevel,
		window: RmaWindowHandle,
		group: GroupHandle,
	) {
		self.write_rma(timestamp, EventRecord::RmaGroupSync {
			sync_level: convert::sync_level(sync_level),
			window: window.0,
			group: group.0,
		});
	}

	pub fn rma_request_lock(
		&mut self,
		timestamp: u64,
		window: RmaWindowHandle,
		remote: u32,
		lock_id: u64,
		lock_type: LockType,
	) {
		self.write_rma(timestamp, EventRecord::RmaRequestLock {
			window: window.0,
			remote,
			lock_id,
			lock_type: convert::lock_type(lock_type),
		});
	}

	pub fn rma_acquire_lock(
		&mut self,
		timestamp: u64,
		window: RmaWindowHandle,
		remote: u32,
		lock_id: u64,
		lock_type: LockType,
	) {
		self.write_rma(timestamp, EventRecord::RmaAcquireLock {
			window: window.0,
			remote,
			lock_id,
			lock_type: convert::lock_type(lock_type),
		});
	}

	pub fn rma_try_lock(
		&mut self,
		timestamp: u64,
		window: RmaWindowHandle,
		remote: u32,
		lock_id: u64,
		lock_type: LockType,
	) {
		self.write_rma(timestamp, EventRecord::RmaTryLock {
			window: window.0,
			remote,
			lock_id,
			lock_type: convert::lock_type(lock_type),
		});
	}

	pub fn rma_release_lock(&mut self, timestamp: u64, window: RmaWindowHandle, remote: u32, lock_id: u64) {
		self.write_rma(timestamp, EventRecord::RmaReleaseLock {
			window: window.0,
			remote,
			lock_id,
		});
	}

	pub fn rma_sync(&mut self, timestamp: u64, window: RmaWindowHandle, remote: u32, sync_type: RmaSyncType) {
		self.write_rma(timestamp, EventRecord::RmaSync {
			window: window.0,
			remote,
			sync_type: convert::sync_type(sync_type),
		});
	}

	pub fn rma_wait_change(&mut self, timestamp: u64, window: RmaWindowHandle) {
		self.write_rma(timestamp, EventRecord::RmaWaitChange {
			window: window.0,
		});
	}

	pub fn rma_put(&mut self, timestamp: u64, window: RmaWindowHandle, remote: u32, bytes: u64, matching_id: u64) {
		self.write_rma(timestamp, EventRecord::RmaPut {
			window: window.0,
			remote,
			bytes,
			matching_id,
		});
	}

	pub fn rma_get(&mut self, timestamp: u64, window: RmaWindowHandle, remote: u32, bytes: u64, matching_id: u64) {
		self.write_rma(timestamp, EventRecord::RmaGet {
			window: window.0,
			remote,
			bytes,
			matching_id,
		});
	}

	pub fn rma_atomic(
		&mut self,
		timestamp: u64,
		window: RmaWindowHandle,
		remote: u32,
		kind: RmaAtomicType,
		bytes_sent: u64,
		bytes_received: u64,
		matching_id: u64,
	) {
		self.write_rma(timestamp, EventRecord::RmaAtomic {
			window: window.0,
			remote,
			atomic_type: convert::atomic_type(kind),
			bytes_sent,
			bytes_received,
			matching_id,
		});
	}

	pub fn rma_op_complete_blocking(&mut self, timestamp: u64, window: RmaWindowHandle, matching_id: u64) {
		self.write_rma(timestamp, EventRecord::RmaOpCompleteBlocking {
			window: window.0,
			matching_id,
		});
	}

	pub fn rma_op_complete_non_blocking(&mut self, timestamp: u64, window: RmaWindowHandle, matching_id: u64) {
		self.write_rma(timestamp, EventRecord::RmaOpCompleteNonBlocking {
			window: window.0,
			matching_id,
		});
	}

	pub fn rma_op_test(&mut self, timestamp: u64, window: RmaWindowHandle, matching_id: u64) {
		self.write_rma(timestamp, EventRecord::RmaOpTest {
			window: window.0,
			matching_id,
		});
	}

	pub fn rma_op_complete_remote(&mut self, timestamp: u64, window: RmaWindowHandle, matching_id: u64) {
		self.write_rma(timestamp, EventRecord::RmaOpCompleteRemote {
			window: window.0,
			matching_id,
		});
	}
}
