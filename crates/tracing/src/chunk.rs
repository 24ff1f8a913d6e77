// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Trace buffer memory.
//!
//! All event buffers of a process draw fixed-size pages from one bounded
//! [`PagePool`]; released pages go to a lock-free free list and are reused
//! before new ones are created. Each writer's buffer slot lazily gets a
//! [`ChunkArena`] that tracks what the writer currently holds.

use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use crossbeam_channel::{Receiver, Sender, unbounded};
use scorep_archive::{BufferSlot, Chunk, FileType, MemoryCallbacks};
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
	pub page_size: usize,
	pub max_pages: usize,
	pub created: usize,
	pub in_use: usize,
}

pub struct PagePool {
	page_size: usize,
	max_pages: usize,
	created: AtomicUsize,
	in_use: AtomicUsize,
	free_tx: Sender<Box<[u8]>>,
	free_rx: Receiver<Box<[u8]>>,
}

impl PagePool {
	pub fn new(page_size: usize, total_memory: usize) -> Self {
		let (free_tx, free_rx) = unbounded();
		Self {
			page_size,
			max_pages: total_memory / page_size.max(1),
			created: AtomicUsize::new(0),
			in_use: AtomicUsize::new(0),
			free_tx,
			free_rx,
		}
	}

	pub fn page_size(&self) -> usize {
		self.page_size
	}

	fn acquire(&self) -> Option<Box<[u8]>> {
		let page = self.free_rx.try_recv().ok().or_else(|| {
			let created = self
				.created
				.fetch_update(Ordering::AcqRel, Ordering::Acquire, |created| {
					(created < self.max_pages).then_some(created + 1)
				})
				.is_ok();
			if created {
				Some(vec![0u8; self.page_size].into_boxed_slice())
			} else {
				// another location may have released a page meanwhile
				self.free_rx.try_recv().ok()
			}
		})?;
		self.in_use.fetch_add(1, Ordering::AcqRel);
		Some(page)
	}

	fn release(&self, page: Box<[u8]>) {
		self.in_use.fetch_sub(1, Ordering::AcqRel);
		// the pool owns the receiver, so sending cannot fail
		let _ = self.free_tx.send(page);
	}

	pub fn stats(&self) -> PoolStats {
		PoolStats {
			page_size: self.page_size,
			max_pages: self.max_pages,
			created: self.created.load(Ordering::Acquire),
			in_use: self.in_use.load(Ordering::Acquire),
		}
	}
}

/// Per-writer bookkeeping stored in the writer's buffer slot.
#[derive(Debug, Default)]
pub struct ChunkArena {
	held: usize,
	allocations: u64,
}

impl ChunkArena {
	pub fn held(&self) -> usize {
		self.held
	}

	pub fn allocations(&self) -> u64 {
		self.allocations
	}
}

/// Memory callbacks of the trace archive.
///
/// Running out of pages is not an error here: the writer reacts to a
/// refused allocation by flushing its buffer.
#[derive(Clone)]
pub struct ChunkAllocator {
	pool: Arc<PagePool>,
}

impl ChunkAllocator {
	pub fn new(chunk_size: usize, total_memory: usize) -> Self {
		Self {
			pool: Arc::new(PagePool::new(chunk_size, total_memory)),
		}
	}

	pub fn pool(&self) -> &PagePool {
		&self.pool
	}
}

impl MemoryCallbacks for ChunkAllocator {
	fn allocate(
		&self,
		file_type: FileType,
		location_id: Option<u64>,
		slot: &mut BufferSlot,
		size: usize,
	) -> Option<Chunk> {
		if size > self.pool.page_size() {
			warn!(size, page_size = self.pool.page_size(), "chunk request exceeds page size");
			return None;
		}

		let arena = slot.get_or_insert_with(ChunkArena::default)?;
		let page = self.pool.acquire()?;
		arena.held += 1;
		arena.allocations += 1;
		trace!(?file_type, ?location_id, held = arena.held, "allocated chunk");
		Some(Chunk::new(page))
	}

	fn free_all(
		&self,
		file_type: FileType,
		location_id: Option<u64>,
		slot: &mut BufferSlot,
		chunks: Vec<Chunk>,
		is_final: bool,
	) {
		let released = chunks.len();
		for chunk in chunks {
			self.pool.release(chunk.into_inner());
		}
		if let Some(arena) = slot.get_mut::<ChunkArena>() {
			arena.held = arena.held.saturating_sub(released);
		}
		if is_final {
			slot.take();
		}
		trace!(?file_type, ?location_id, released, is_final, "released chunks");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_allocation_is_bounded() {
		let allocator = ChunkAllocator::new(64, 128);
		let mut slot = BufferSlot::new();

		let a = allocator.allocate(FileType::Events, None, &mut slot, 64);
		let b = allocator.allocate(FileType::Events, None, &mut slot, 64);
		let c = allocator.allocate(FileType::Events, None, &mut slot, 64);

		assert!(a.is_some());
		assert!(b.is_some());
		assert!(c.is_none());
		assert_eq!(slot.get_mut::<ChunkArena>().map(|arena| arena.held()), Some(2));
	}

	#[test]
	fn test_released_pages_are_reused() {
		let allocator = ChunkAllocator::new(64, 64);
		let mut slot = BufferSlot::new();

		let chunk = allocator.allocate(FileType::Events, Some(1), &mut slot, 64).unwrap();
		allocator.free_all(FileType::Events, Some(1), &mut slot, vec![chunk], false);

		assert!(allocator.allocate(FileType::Events, Some(1), &mut slot, 64).is_some());
		assert_eq!(allocator.pool().stats().created, 1);
	}

	#[test]
	fn test_free_all_is_idempotent() {
		let allocator = ChunkAllocator::new(64, 256);
		let mut slot = BufferSlot::new();

		let chunk = allocator.allocate(FileType::Events, Some(1), &mut slot, 64).unwrap();
		allocator.free_all(FileType::Events, Some(1), &mut slot, vec![chunk], false);
		let after_first = allocator.pool().stats();
		allocator.free_all(FileType::Events, Some(1), &mut slot, Vec::new(), false);

		assert_eq!(allocator.pool().stats(), after_first);
		assert_eq!(after_first.in_use, 0);
		assert_eq!(slot.get_mut::<ChunkArena>().map(|arena| arena.held()), Some(0));
	}

	#[test]
	fn test_free_all_on_untouched_slot() {
		let allocator = ChunkAllocator::new(64, 256);
		let mut slot = BufferSlot::new();

		allocator.free_all(FileType::Events, None, &mut slot, Vec::new(), false);
		allocator.free_all(FileType::Events, None, &mut slot, Vec::new(), true);

		assert!(slot.is_empty());
		assert_eq!(allocator.pool().stats().created, 0);
	}

	#[test]
	fn test_final_free_drops_arena() {
		let allocator = ChunkAllocator::new(64, 256);
		let mut slot = BufferSlot::new();

		let chunk = allocator.allocate(FileType::Events, Some(2), &mut slot, 32).unwrap();
		assert_eq!(chunk.capacity(), 64);
		allocator.free_all(FileType::Events, Some(2), &mut slot, vec![chunk], true);

		assert!(slot.is_empty());
		assert_eq!(allocator.pool().stats().in_use, 0);
	}
}
