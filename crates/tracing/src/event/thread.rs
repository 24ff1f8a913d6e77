// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_archive::EventRecord;
use scorep_type::{CommunicatorHandle, Paradigm, RegionHandle, RewindParadigm, TaskId};

use super::Recorder;
use crate::convert;

impl Recorder<'_> {
	fn write_thread(&mut self, timestamp: u64, record: EventRecord, paradigm: RewindParadigm) {
		self.write(timestamp, record);
		self.mark(paradigm);
	}

	pub fn thread_fork(&mut self, timestamp: u64, paradigm: Paradigm, number_of_requested_threads: u32) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadFork {
				model: convert::paradigm(paradigm),
				number_of_requested_threads,
			},
			RewindParadigm::ThreadForkJoin,
		);
	}

	pub fn thread_join(&mut self, timestamp: u64, paradigm: Paradigm) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadJoin {
				model: convert::paradigm(paradigm),
			},
			RewindParadigm::ThreadForkJoin,
		);
	}

	pub fn thread_team_begin(&mut self, timestamp: u64, team: CommunicatorHandle) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadTeamBegin {
				thread_team: team.0,
			},
			RewindParadigm::ThreadForkJoin,
		);
	}

	pub fn thread_team_end(&mut self, timestamp: u64, team: CommunicatorHandle) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadTeamEnd {
				thread_team: team.0,
			},
			RewindParadigm::ThreadForkJoin,
		);
	}

	pub fn thread_acquire_lock(&mut self, timestamp: u64, paradigm: Paradigm, lock_id: u32, acquisition_order: u32) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadAcquireLock {
				model: convert::paradigm(paradigm),
				lock_id,
				acquisition_order,
			},
			RewindParadigm::ThreadLock,
		);
	}

	pub fn thread_release_lock(&mut self, timestamp: u64, paradigm: Paradigm, lock_id: u32, acquisition_order: u32) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadReleaseLock {
				model: convert::paradigm(paradigm),
				lock_id,
				acquisition_order,
			},
			RewindParadigm::ThreadLock,
		);
	}

	pub fn thread_task_create(&mut self, timestamp: u64, team: CommunicatorHandle, task: TaskId) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadTaskCreate {
				thread_team: team.0,
				creating_thread: task.creating_thread,
				generation_number: task.generation,
			},
			RewindParadigm::ThreadForkJoin,
		);
	}

	pub fn thread_task_switch(&mut self, timestamp: u64, team: CommunicatorHandle, task: TaskId) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadTaskSwitch {
				thread_team: team.0,
				creating_thread: task.creating_thread,
				generation_number: task.generation,
			},
			RewindParadigm::ThreadForkJoin,
		);
	}

	/// Enters the task region and switches to the task.
	pub fn thread_task_begin(&mut self, timestamp: u64, region: RegionHandle, team: CommunicatorHandle, task: TaskId) {
		self.enter_region(timestamp, region);
		self.thread_task_switch(timestamp, team, task);
	}

	/// Leaves the task region and completes the task.
	pub fn thread_task_complete(
		&mut self,
		timestamp: u64,
		region: RegionHandle,
		team: CommunicatorHandle,
		task: TaskId,
	) {
		self.exit_region(timestamp, region);
		self.write_thread(
			timestamp,
			EventRecord::ThreadTaskComplete {
				thread_team: team.0,
				creating_thread: task.creating_thread,
				generation_number: task.generation,
			},
			RewindParadigm::ThreadForkJoin,
		);
	}

	pub fn thread_create(&mut self, timestamp: u64, contingent: CommunicatorHandle, sequence_count: u64) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadCreate {
				thread_contingent: contingent.0,
				sequence_count,
			},
			RewindParadigm::ThreadCreateWait,
		);
	}

	pub fn thread_begin(&mut self, timestamp: u64, contingent: CommunicatorHandle, sequence_count: u64) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadBegin {
				thread_contingent: contingent.0,
				sequence_count,
			},
			RewindParadigm::ThreadCreateWait,
		);
	}

	pub fn thread_wait(&mut self, timestamp: u64, contingent: CommunicatorHandle, sequence_count: u64) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadWait {
				thread_contingent: contingent.0,
				sequence_count,
			},
			RewindParadigm::ThreadCreateWait,
		);
	}

	pub fn thread_end(&mut self, timestamp: u64, contingent: CommunicatorHandle, sequence_count: u64) {
		self.write_thread(
			timestamp,
			EventRecord::ThreadEnd {
				thread_contingent: contingent.0,
				sequence_count,
			},
			RewindParadigm::ThreadCreateWait,
		);
	}
}
