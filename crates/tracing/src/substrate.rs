// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Entry points of the measurement core into the tracing engine.
//!
//! [`EventSink`] has one method per event kind, each a no-op by default.
//! Two implementations exist: [`RecordingEnabled`] records every event and
//! [`RecordingDisabled`] only reacts to recording being switched back on.
//! The measurement core picks one with [`TracingSubstrate::callbacks`].

use std::sync::Arc;

use scorep_type::{
	AttributeHandle, AttributeValue, CollectiveType, CommunicatorHandle, GroupHandle, LockType, Paradigm,
	ParameterHandle, RegionHandle, RmaAtomicType, RmaSyncLevel, RmaSyncType, RmaWindowHandle, SamplingSetHandle,
	TaskId,
};

use crate::{TraceSession, event::Recorder, location::TracingLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingMode {
	Enabled,
	Disabled,
}

macro_rules! event_sink {
	(
		recording { $( $(#[$meta:meta])* fn $name:ident($($arg:ident: $ty:ty),* $(,)?); )* }
		resuming { $( $(#[$resume_meta:meta])* fn $resume:ident($($resume_arg:ident: $resume_ty:ty),* $(,)?); )* }
	) => {
		/// Event callbacks of the tracing substrate.
		pub trait EventSink: Send + Sync {
			$(
				$(#[$meta])*
				#[allow(unused_variables)]
				fn $name(&self, location: &mut TracingLocation, $($arg: $ty),*) {}
			)*
			$(
				$(#[$resume_meta])*
				#[allow(unused_variables)]
				fn $resume(&self, location: &mut TracingLocation, $($resume_arg: $resume_ty),*) {}
			)*
		}

		impl EventSink for RecordingEnabled {
			$(
				fn $name(&self, location: &mut TracingLocation, $($arg: $ty),*) {
					Recorder::new(&self.session, location).$name($($arg),*)
				}
			)*
		}

		impl EventSink for RecordingDisabled {
			$(
				fn $resume(&self, location: &mut TracingLocation, $($resume_arg: $resume_ty),*) {
					Recorder::new(&self.session, location).$resume($($resume_arg),*)
				}
			)*
		}
	};
}

event_sink! {
	recording {
		fn enter_region(timestamp: u64, region: RegionHandle);
		fn exit_region(timestamp: u64, region: RegionHandle);

		fn mpi_send(timestamp: u64, receiver: u32, communicator: CommunicatorHandle, tag: u32, bytes_sent: u64);
		fn mpi_recv(timestamp: u64, sender: u32, communicator: CommunicatorHandle, tag: u32, bytes_received: u64);
		fn mpi_isend(
			timestamp: u64,
			receiver: u32,
			communicator: CommunicatorHandle,
			tag: u32,
			bytes_sent: u64,
			request_id: u64,
		);
		fn mpi_irecv(
			timestamp: u64,
			sender: u32,
			communicator: CommunicatorHandle,
			tag: u32,
			bytes_received: u64,
			request_id: u64,
		);
		fn mpi_isend_complete(timestamp: u64, request_id: u64);
		fn mpi_irecv_request(timestamp: u64, request_id: u64);
		fn mpi_request_tested(timestamp: u64, request_id: u64);
		fn mpi_request_cancelled(timestamp: u64, request_id: u64);
		fn mpi_collective_begin(timestamp: u64);
		fn mpi_collective_end(
			timestamp: u64,
			communicator: CommunicatorHandle,
			root: u32,
			kind: CollectiveType,
			bytes_sent: u64,
			bytes_received: u64,
		);

		fn rma_win_create(timestamp: u64, window: RmaWindowHandle);
		fn rma_win_destroy(timestamp: u64, window: RmaWindowHandle);
		fn rma_collective_begin(timestamp: u64);
		fn rma_collective_end(
			timestamp: u64,
			kind: CollectiveType,
			sync_level: RmaSyncLevel,
			window: RmaWindowHandle,
			root: u32,
			bytes_sent: u64,
			bytes_received: u64,
		);
		fn rma_group_sync(timestamp: u64, sync_level: RmaSyncLevel, window: RmaWindowHandle, group: GroupHandle);
		fn rma_request_lock(timestamp: u64, window: RmaWindowHandle, remote: u32, lock_id: u64, lock_type: LockType);
		fn rma_acquire_lock(timestamp: u64, window: RmaWindowHandle, remote: u32, lock_id: u64, lock_type: LockType);
		fn rma_try_lock(timestamp: u64, window: RmaWindowHandle, remote: u32, lock_id: u64, lock_type: LockType);
		fn rma_release_lock(timestamp: u64, window: RmaWindowHandle, remote: u32, lock_id: u64);
		fn rma_sync(timestamp: u64, window: RmaWindowHandle, remote: u32, sync_type: RmaSyncType);
		fn rma_wait_change(timestamp: u64, window: RmaWindowHandle);
		fn rma_put(timestamp: u64, window: RmaWindowHandle, remote: u32, bytes: u64, matching_id: u64);
		fn rma_get(timestamp: u64, window: RmaWindowHandle, remote: u32, bytes: u64, matching_id: u64);
		fn rma_atomic(
			timestamp: u64,
			window: RmaWindowHandle,
			remote: u32,
			kind: RmaAtomicType,
			bytes_sent: u64,
			bytes_received: u64,
			matching_id: u64,
		);
		fn rma_op_complete_blocking(timestamp: u64, window: RmaWindowHandle, matching_id: u64);
		fn rma_op_complete_non_blocking(timestamp: u64, window: RmaWindowHandle, matching_id: u64);
		fn rma_op_test(timestamp: u64, window: RmaWindowHandle, matching_id: u64);
		fn rma_op_complete_remote(timestamp: u64, window: RmaWindowHandle, matching_id: u64);

		fn thread_fork(timestamp: u64, paradigm: Paradigm, number_of_requested_threads: u32);
		fn thread_join(timestamp: u64, paradigm: Paradigm);
		fn thread_team_begin(timestamp: u64, team: CommunicatorHandle);
		fn thread_team_end(timestamp: u64, team: CommunicatorHandle);
		fn thread_acquire_lock(timestamp: u64, paradigm: Paradigm, lock_id: u32, acquisition_order: u32);
		fn thread_release_lock(timestamp: u64, paradigm: Paradigm, lock_id: u32, acquisition_order: u32);
		fn thread_task_create(timestamp: u64, team: CommunicatorHandle, task: TaskId);
		fn thread_task_switch(timestamp: u64, team: CommunicatorHandle, task: TaskId);
		fn thread_task_begin(timestamp: u64, region: RegionHandle, team: CommunicatorHandle, task: TaskId);
		fn thread_task_complete(timestamp: u64, region: RegionHandle, team: CommunicatorHandle, task: TaskId);
		fn thread_create(timestamp: u64, contingent: CommunicatorHandle, sequence_count: u64);
		fn thread_begin(timestamp: u64, contingent: CommunicatorHandle, sequence_count: u64);
		fn thread_wait(timestamp: u64, contingent: CommunicatorHandle, sequence_count: u64);
		fn thread_end(timestamp: u64, contingent: CommunicatorHandle, sequence_count: u64);

		/// Untagged values, typed by the sampling set's metric definitions.
		fn write_metrics(timestamp: u64, sampling_set: SamplingSetHandle, values: &[u64]);
		fn trigger_counter_int64(timestamp: u64, sampling_set: SamplingSetHandle, value: i64);
		fn trigger_counter_uint64(timestamp: u64, sampling_set: SamplingSetHandle, value: u64);
		fn trigger_counter_double(timestamp: u64, sampling_set: SamplingSetHandle, value: f64);
		fn trigger_parameter_int64(timestamp: u64, parameter: ParameterHandle, value: i64);
		fn trigger_parameter_uint64(timestamp: u64, parameter: ParameterHandle, value: u64);
		fn trigger_parameter_string(timestamp: u64, parameter: ParameterHandle, value: &str);
		fn add_attribute(attribute: AttributeHandle, value: AttributeValue);

		fn store_rewind_point(timestamp: u64, region: RegionHandle);
		fn exit_rewind_point(timestamp: u64, region: RegionHandle, do_rewind: bool);

		fn disable_recording(timestamp: u64);
	}
	resuming {
		fn enable_recording(timestamp: u64);
	}
}

pub struct RecordingEnabled {
	session: Arc<TraceSession>,
}

pub struct RecordingDisabled {
	session: Arc<TraceSession>,
}

/// Both callback sets of one session.
pub struct TracingSubstrate {
	enabled: RecordingEnabled,
	disabled: RecordingDisabled,
}

impl TracingSubstrate {
	pub fn new(session: Arc<TraceSession>) -> Self {
		Self {
			enabled: RecordingEnabled {
				session: session.clone(),
			},
			disabled: RecordingDisabled {
				session,
			},
		}
	}

	pub fn session(&self) -> &Arc<TraceSession> {
		&self.enabled.session
	}

	pub fn callbacks(&self, mode: RecordingMode) -> &dyn EventSink {
		match mode {
			RecordingMode::Enabled => &self.enabled,
			RecordingMode::Disabled => &self.disabled,
		}
	}
}
