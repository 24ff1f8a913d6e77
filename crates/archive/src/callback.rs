// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{any::Any, sync::Arc};

use crate::{Chunk, FileType};

/// Opaque per-writer value handed back to the flush callbacks.
pub type UserData = Arc<dyn Any + Send + Sync>;

/// Opaque per-writer state owned by the memory callbacks.
#[derive(Default)]
pub struct BufferSlot(Option<Box<dyn Any + Send>>);

impl BufferSlot {
	pub fn new() -> Self {
		Self(None)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_none()
	}

	pub fn get_or_insert_with<T, F>(&mut self, f: F) -> Option<&mut T>
	where
		T: Any + Send,
		F: FnOnce() -> T,
	{
		self.0.get_or_insert_with(|| Box::new(f()) as Box<dyn Any + Send>).downcast_mut::<T>()
	}

	pub fn get_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
		self.0.as_mut().and_then(|value| value.downcast_mut::<T>())
	}

	pub fn take(&mut self) -> Option<Box<dyn Any + Send>> {
		self.0.take()
	}
}

impl std::fmt::Debug for BufferSlot {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("BufferSlot").field(&self.0.is_some()).finish()
	}
}

pub struct FlushContext<'a> {
	pub user_data: &'a (dyn Any + Send + Sync),
	pub file_type: FileType,
	pub location_id: Option<u64>,
	pub is_final: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreFlush {
	/// Location id the flushed data is keyed by, if the writer lacks one.
	pub location_id: Option<u64>,
}

pub trait FlushCallbacks: Send + Sync {
	fn pre_flush(&self, context: FlushContext<'_>) -> PreFlush;

	/// Returns the timestamp at which recording resumes.
	fn post_flush(&self, context: FlushContext<'_>) -> u64;
}

pub trait MemoryCallbacks: Send + Sync {
	/// Hands out a chunk of at least `size` bytes, or `None` to request a flush.
	fn allocate(
		&self,
		file_type: FileType,
		location_id: Option<u64>,
		slot: &mut BufferSlot,
		size: usize,
	) -> Option<Chunk>;

	/// Takes back every chunk of a writer. `is_final` ends the slot's lifetime.
	fn free_all(
		&self,
		file_type: FileType,
		location_id: Option<u64>,
		slot: &mut BufferSlot,
		chunks: Vec<Chunk>,
		is_final: bool,
	);
}

pub trait Collectives: Send + Sync {
	fn rank(&self) -> u32;

	fn size(&self) -> u32;

	fn barrier(&self);
}

/// Collectives of a single-process measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialCollectives;

impl Collectives for SerialCollectives {
	fn rank(&self) -> u32 {
		0
	}

	fn size(&self) -> u32 {
		1
	}

	fn barrier(&self) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_buffer_slot_lazily_creates_state() {
		let mut slot = BufferSlot::new();
		assert!(slot.is_empty());

		*slot.get_or_insert_with(|| 1u32).unwrap() += 1;
		assert_eq!(slot.get_mut::<u32>().copied(), Some(2));
		assert!(slot.get_mut::<u64>().is_none());

		assert!(slot.take().is_some());
		assert!(slot.is_empty());
	}
}
