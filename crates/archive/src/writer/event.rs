// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, trace};

use crate::{
	ArchiveError, Attribute, BufferSlot, Chunk, Event, EventRecord, FileType, FlushContext, Result, UserData,
	archive::Shared, storage::encode_frame,
};

/// Buffer position a rewind point returns to.
#[derive(Debug, Clone, Copy)]
struct Mark {
	chunks: usize,
	used: usize,
	events: u64,
	last_timestamp: u64,
}

/// Event writer of exactly one location.
///
/// Records are buffered in chunks obtained from the archive's memory
/// callbacks. When no chunk can be obtained the buffer is flushed to disk,
/// all chunks are handed back, and a `BufferFlush` record marks the gap.
pub struct EvtWriter {
	shared: Arc<Shared>,
	user_data: UserData,
	location_id: Option<u64>,
	slot: BufferSlot,
	chunks: Vec<Chunk>,
	spare: Vec<Chunk>,
	marks: HashMap<u32, Mark>,
	number_of_events: u64,
	last_timestamp: u64,
	closed: bool,
}

impl EvtWriter {
	pub(crate) fn new(shared: Arc<Shared>, user_data: UserData) -> Self {
		Self {
			shared,
			user_data,
			location_id: None,
			slot: BufferSlot::new(),
			chunks: Vec::new(),
			spare: Vec::new(),
			marks: HashMap::new(),
			number_of_events: 0,
			last_timestamp: 0,
			closed: false,
		}
	}

	pub fn location_id(&self) -> Option<u64> {
		self.location_id
	}

	pub fn set_location_id(&mut self, location_id: u64) {
		self.location_id = Some(location_id);
	}

	pub fn user_data(&self) -> &UserData {
		&self.user_data
	}

	/// Events recorded so far, including `BufferFlush` records.
	pub fn number_of_events(&self) -> u64 {
		self.number_of_events
	}

	pub fn write(&mut self, attributes: Vec<Attribute>, timestamp: u64, record: EventRecord) -> Result<()> {
		if self.closed {
			return Err(ArchiveError::Closed);
		}

		let frame = encode_frame(&Event {
			timestamp,
			attributes,
			record,
		})?;
		let chunk_size = self.shared.storage.config().chunk_size;
		if frame.len() > chunk_size {
			return Err(ArchiveError::RecordTooLarge {
				size: frame.len(),
				chunk_size,
			});
		}

		self.reserve(frame.len())?;
		self.push_frame(&frame, timestamp)
	}

	fn push_frame(&mut self, frame: &[u8], timestamp: u64) -> Result<()> {
		if !self.chunks.last_mut().is_some_and(|chunk| chunk.append(frame)) {
			return Err(ArchiveError::OutOfMemory);
		}
		self.number_of_events += 1;
		self.last_timestamp = timestamp;
		Ok(())
	}

	fn reserve(&mut self, len: usize) -> Result<()> {
		if self.chunks.last().is_some_and(|chunk| chunk.remaining() >= len) {
			return Ok(());
		}
		if self.acquire_chunk(len) {
			return Ok(());
		}

		self.flush(false)?;

		if self.chunks.last().is_some_and(|chunk| chunk.remaining() >= len) || self.acquire_chunk(len) {
			Ok(())
		} else {
			Err(ArchiveError::OutOfMemory)
		}
	}

	fn acquire_chunk(&mut self, len: usize) -> bool {
		if let Some(mut chunk) = self.spare.pop() {
			chunk.reset();
			self.chunks.push(chunk);
			return true;
		}

		let chunk_size = self.shared.storage.config().chunk_size;
		match self.shared.memory.allocate(FileType::Events, self.location_id, &mut self.slot, chunk_size) {
			Some(chunk) if chunk.capacity() >= len => {
				self.chunks.push(chunk);
				true
			}
			Some(chunk) => {
				self.spare.push(chunk);
				false
			}
			None => false,
		}
	}

	/// Writes the buffered records and hands every chunk back.
	///
	/// A non-final flush invalidates all rewind points and records the
	/// unrecorded interval as a `BufferFlush` event.
	pub fn flush(&mut self, is_final: bool) -> Result<()> {
		let begin = self.last_timestamp;

		let pre = self.shared.flush.pre_flush(FlushContext {
			user_data: self.user_data.as_ref(),
			file_type: FileType::Events,
			location_id: self.location_id,
			is_final,
		});
		if let Some(location_id) = pre.location_id {
			self.location_id = Some(location_id);
		}
		let location_id = self.location_id.ok_or(ArchiveError::UndefinedLocation)?;

		let raw: Vec<u8> = self.chunks.iter().flat_map(|chunk| chunk.as_bytes().iter().copied()).collect();
		let written = if raw.is_empty() {
			Ok(())
		} else {
			self.shared
				.storage
				.event_path(location_id)
				.and_then(|path| self.shared.storage.append_block(&path, location_id, &raw))
		};

		let mut chunks = std::mem::take(&mut self.chunks);
		chunks.append(&mut self.spare);
		self.shared.memory.free_all(FileType::Events, Some(location_id), &mut self.slot, chunks, is_final);
		self.marks.clear();

		let stop_time = self.shared.flush.post_flush(FlushContext {
			user_data: self.user_data.as_ref(),
			file_type: FileType::Events,
			location_id: Some(location_id),
			is_final,
		});
		written?;

		debug!(location = location_id, bytes = raw.len(), is_final, "flushed event buffer");

		if !is_final {
			let frame = encode_frame(&Event {
				timestamp: begin,
				attributes: Vec::new(),
				record: EventRecord::BufferFlush {
					stop_time,
				},
			})?;
			if !self.acquire_chunk(frame.len()) {
				return Err(ArchiveError::OutOfMemory);
			}
			self.push_frame(&frame, stop_time)?;
		}
		Ok(())
	}

	pub fn store_rewind_point(&mut self, id: u32) {
		let mark = Mark {
			chunks: self.chunks.len(),
			used: self.chunks.last().map(Chunk::used).unwrap_or(0),
			events: self.number_of_events,
			last_timestamp: self.last_timestamp,
		};
		trace!(id, events = mark.events, "stored rewind point");
		self.marks.insert(id, mark);
	}

	/// Discards everything written after the rewind point `id`.
	pub fn rewind(&mut self, id: u32) -> Result<()> {
		let mark = *self.marks.get(&id).ok_or(ArchiveError::UnknownRewindPoint(id))?;

		while self.chunks.len() > mark.chunks {
			if let Some(mut chunk) = self.chunks.pop() {
				chunk.reset();
				self.spare.push(chunk);
			}
		}
		if let Some(chunk) = self.chunks.last_mut() {
			chunk.truncate(mark.used);
		}
		self.number_of_events = mark.events;
		self.last_timestamp = mark.last_timestamp;

		self.marks.retain(|_, other| (other.chunks, other.used) <= (mark.chunks, mark.used));
		Ok(())
	}

	pub fn clear_rewind_point(&mut self, id: u32) -> bool {
		self.marks.remove(&id).is_some()
	}

	pub fn has_rewind_point(&self, id: u32) -> bool {
		self.marks.contains_key(&id)
	}

	/// Final flush. The writer accepts no further records.
	pub fn close(&mut self) -> Result<()> {
		if self.closed {
			return Ok(());
		}
		self.closed = true;
		self.flush(true)
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}
}
