// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::record::{CollectiveOp, LockType, MeasurementMode, Paradigm, RmaAtomicType, RmaSyncLevel, RmaSyncType};

/// One timestamped record of an event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
	pub timestamp: u64,
	pub attributes: Vec<Attribute>,
	pub record: EventRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
	pub attribute: u32,
	pub value: AttributeValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
	Int8(i8),
	Int16(i16),
	Int32(i32),
	Int64(i64),
	Uint8(u8),
	Uint16(u16),
	Uint32(u32),
	Uint64(u64),
	Float(f32),
	Double(f64),
	String(u32),
	Location(u64),
	Region(u32),
	Group(u32),
	Comm(u32),
	RmaWin(u32),
	Parameter(u32),
	Callpath(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
	Int64(i64),
	Uint64(u64),
	Double(f64),
}

/// Event records. Definition references are local sequence numbers unless
/// the stream's local definitions carry a mapping table for their kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventRecord {
	/// Data between the event's timestamp and `stop_time` was not recorded.
	BufferFlush {
		stop_time: u64,
	},
	MeasurementOnOff {
		mode: MeasurementMode,
	},
	Enter {
		region: u32,
	},
	Leave {
		region: u32,
	},
	MpiSend {
		receiver: u32,
		communicator: u32,
		tag: u32,
		length: u64,
	},
	MpiIsend {
		receiver: u32,
		communicator: u32,
		tag: u32,
		length: u64,
		request_id: u64,
	},
	MpiIsendComplete {
		request_id: u64,
	},
	MpiIrecvRequest {
		request_id: u64,
	},
	MpiRecv {
		sender: u32,
		communicator: u32,
		tag: u32,
		length: u64,
	},
	MpiIrecv {
		sender: u32,
		communicator: u32,
		tag: u32,
		length: u64,
		request_id: u64,
	},
	MpiRequestTest {
		request_id: u64,
	},
	MpiRequestCancelled {
		request_id: u64,
	},
	MpiCollectiveBegin,
	MpiCollectiveEnd {
		operation: CollectiveOp,
		communicator: u32,
		root: u32,
		size_sent: u64,
		size_received: u64,
	},
	RmaWinCreate {
		window: u32,
	},
	RmaWinDestroy {
		window: u32,
	},
	RmaCollectiveBegin,
	RmaCollectiveEnd {
		operation: CollectiveOp,
		sync_level: RmaSyncLevel,
		window: u32,
		root: u32,
		bytes_sent: u64,
		bytes_received: u64,
	},
	RmaGroupSync {
		sync_level: RmaSyncLevel,
		window: u32,
		group: u32,
	},
	RmaRequestLock {
		window: u32,
		remote: u32,
		lock_id: u64,
		lock_type: LockType,
	},
	RmaAcquireLock {
		window: u32,
		remote: u32,
		lock_id: u64,
		lock_type: LockType,
	},
	RmaTryLock {
		window: u32,
		remote: u32,
		lock_id: u64,
		lock_type: LockType,
	},
	RmaReleaseLock {
		window: u32,
		remote: u32,
		lock_id: u64,
	},
	RmaSync {
		window: u32,
		remote: u32,
		sync_type: RmaSyncType,
	},
	RmaWaitChange {
		window: u32,
	},
	RmaPut {
		window: u32,
		remote: u32,
		bytes: u64,
		matching_id: u64,
	},
	RmaGet {
		window: u32,
		remote: u32,
		bytes: u64,
		matching_id: u64,
	},
	RmaAtomic {
		window: u32,
		remote: u32,
		atomic_type: RmaAtomicType,
		bytes_sent: u64,
		bytes_received: u64,
		matching_id: u64,
	},
	RmaOpCompleteBlocking {
		window: u32,
		matching_id: u64,
	},
	RmaOpCompleteNonBlocking {
		window: u32,
		matching_id: u64,
	},
	RmaOpTest {
		window: u32,
		matching_id: u64,
	},
	RmaOpCompleteRemote {
		window: u32,
		matching_id: u64,
	},
	ThreadFork {
		model: Paradigm,
		number_of_requested_threads: u32,
	},
	ThreadJoin {
		model: Paradigm,
	},
	ThreadTeamBegin {
		thread_team: u32,
	},
	ThreadTeamEnd {
		thread_team: u32,
	},
	ThreadAcquireLock {
		model: Paradigm,
		lock_id: u32,
		acquisition_order: u32,
	},
	ThreadReleaseLock {
		model: Paradigm,
		lock_id: u32,
		acquisition_order: u32,
	},
	ThreadTaskCreate {
		thread_team: u32,
		creating_thread: u32,
		generation_number: u32,
	},
	ThreadTaskSwitch {
		thread_team: u32,
		creating_thread: u32,
		generation_number: u32,
	},
	ThreadTaskComplete {
		thread_team: u32,
		creating_thread: u32,
		generation_number: u32,
	},
	ThreadCreate {
		thread_contingent: u32,
		sequence_count: u64,
	},
	ThreadBegin {
		thread_contingent: u32,
		sequence_count: u64,
	},
	ThreadWait {
		thread_contingent: u32,
		sequence_count: u64,
	},
	ThreadEnd {
		thread_contingent: u32,
		sequence_count: u64,
	},
	Metric {
		metric: u32,
		values: Vec<MetricValue>,
	},
	ParameterInt {
		parameter: u32,
		value: i64,
	},
	ParameterUnsignedInt {
		parameter: u32,
		value: u64,
	},
	ParameterString {
		parameter: u32,
		string: u32,
	},
}
