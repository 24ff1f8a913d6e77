// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_archive::EventRecord;
use scorep_type::{CollectiveType, CommunicatorHandle, RewindParadigm};

use super::Recorder;
use crate::convert;

impl Recorder<'_> {
	fn write_mpi(&mut self, timestamp: u64, record: EventRecord) {
		self.write(timestamp, record);
		self.mark(RewindParadigm::Mpi);
	}

	pub fn mpi_send(
		&mut self,
		timestamp: u64,
		receiver: u32,
		communicator: CommunicatorHandle,
		tag: u32,
		bytes_sent: u64,
	) {
		self.write_mpi(timestamp, EventRecord::MpiSend {
			receiver,
			communicator: communicator.0,
			tag,
			length: bytes_sent,
		});
	}

	pub fn mpi_recv(
		&mut self,
		timestamp: u64,
		sender: u32,
		communicator: CommunicatorHandle,
		tag: u32,
		bytes_received: u64,
	) {
		self.write_mpi(timestamp, EventRecord::MpiRecv {
			sender,
			communicator: communicator.0,
			tag,
			length: bytes_received,
		});
	}

	pub fn mpi_isend(
		&mut self,
		timestamp: u64,
		receiver: u32,
		communicator: CommunicatorHandle,
		tag: u32,
		bytes_sent: u64,
		request_id: u64,
	) {
		self.write_mpi(timestamp, EventRecord::MpiIsend {
			receiver,
			communicator: communicator.0,
			tag,
			length: bytes_sent,
			request_id,
		});
	}

	pub fn mpi_irecv(
		&mut self,
		timestamp: u64,
		sender: u32,
		communicator: CommunicatorHandle,
		tag: u32,
		bytes_received: u64,
		request_id: u64,
	) {
		self.write_mpi(timestamp, EventRecord::MpiIrecv {
			sender,
			communicator: communicator.0,
			tag,
			length: bytes_received,
			request_id,
		});
	}

	pub fn mpi_isend_complete(&mut self, timestamp: u64, request_id: u64) {
		self.write_mpi(timestamp, EventRecord::MpiIsendComplete {
			request_id,
		});
	}

	pub fn mpi_irecv_request(&mut self, timestamp: u64, request_id: u64) {
		self.write_mpi(timestamp, EventRecord::MpiIrecvRequest {
			request_id,
		});
	}

	pub fn mpi_request_tested(&mut self, timestamp: u64, request_id: u64) {
		self.write_mpi(timestamp, EventRecord::MpiRequestTest {
			request_id,
		});
	}

	pub fn mpi_request_cancelled(&mut self, timestamp: u64, request_id: u64) {
		self.write_mpi(timestamp, EventRecord::MpiRequestCancelled {
			request_id,
		});
	}

	pub fn mpi_collective_begin(&mut self, timestamp: u64) {
		self.write_mpi(timestamp, EventRecord::MpiCollectiveBegin);
	}

	pub fn mpi_collective_end(
		&mut self,
		timestamp: u64,
		communicator: CommunicatorHandle,
		root: u32,
		kind: CollectiveType,
		bytes_sent: u64,
		bytes_received: u64,
	) {
		self.write_mpi(timestamp, EventRecord::MpiCollectiveEnd {
			operation: convert::collective(kind),
			communicator: communicator.0,
			root: convert::root_rank(root),
			size_sent: bytes_sent,
			size_received: bytes_received,
		});
	}
}
