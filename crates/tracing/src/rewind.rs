// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Per-location stack of open rewind regions.
//!
//! Frames live in an index-reusing arena: popped slots go to a free list and
//! are handed out again by the next push. A buffer flush invalidates every
//! stored buffer position, so the stack remembers the flush epoch it was
//! last synchronized with and drops all frames once that epoch has passed.

use scorep_type::{RegionHandle, RewindParadigm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewindFrame {
	pub region: RegionHandle,
	/// Id of the rewind point stored in the event writer.
	pub point: u32,
	pub entered: u64,
	affected: u8,
}

impl RewindFrame {
	pub fn is_affected(&self, paradigm: RewindParadigm) -> bool {
		self.affected & paradigm.bit() != 0
	}

	pub fn affected(&self) -> impl Iterator<Item = RewindParadigm> + '_ {
		RewindParadigm::ALL.into_iter().filter(|paradigm| self.is_affected(*paradigm))
	}
}

#[derive(Debug)]
struct Slot {
	frame: RewindFrame,
	below: Option<usize>,
}

#[derive(Debug, Default)]
pub struct RewindStack {
	slots: Vec<Slot>,
	head: Option<usize>,
	free: Vec<usize>,
	depth: usize,
	next_point: u32,
	epoch: u64,
}

/// Result of leaving a rewind region.
#[derive(Debug, PartialEq, Eq)]
pub struct Unwound {
	pub frame: RewindFrame,
	/// Inner frames collapsed into the exited one, innermost first.
	pub collapsed: Vec<RewindFrame>,
}

impl RewindStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn depth(&self) -> usize {
		self.depth
	}

	pub fn is_empty(&self) -> bool {
		self.head.is_none()
	}

	/// Drops every frame if a flush happened since the last call.
	///
	/// Returns the number of dropped frames.
	pub fn sync(&mut self, flush_epoch: u64) -> usize {
		if flush_epoch == self.epoch {
			return 0;
		}
		self.epoch = flush_epoch;
		let mut drained = 0;
		while self.pop().is_some() {
			drained += 1;
		}
		drained
	}

	pub fn push(&mut self, region: RegionHandle, entered: u64) -> RewindFrame {
		let frame = RewindFrame {
			region,
			point: self.next_point,
			entered,
			affected: 0,
		};
		self.next_point = self.next_point.wrapping_add(1);

		let slot = Slot {
			frame,
			below: self.head,
		};
		let index = match self.free.pop() {
			Some(index) => {
				self.slots[index] = slot;
				index
			}
			None => {
				self.slots.push(slot);
				self.slots.len() - 1
			}
		};
		self.head = Some(index);
		self.depth += 1;
		frame
	}

	pub fn pop(&mut self) -> Option<RewindFrame> {
		let index = self.head?;
		let slot = &self.slots[index];
		let frame = slot.frame;
		self.head = slot.below;
		self.free.push(index);
		self.depth -= 1;
		Some(frame)
	}

	pub fn top(&self) -> Option<RewindFrame> {
		self.head.map(|index| self.slots[index].frame)
	}

	pub fn contains(&self, region: RegionHandle) -> bool {
		self.frames().any(|frame| frame.region == region)
	}

	/// Marks the paradigm on every open frame.
	pub fn mark_paradigm(&mut self, paradigm: RewindParadigm) {
		let mut cursor = self.head;
		while let Some(index) = cursor {
			let slot = &mut self.slots[index];
			slot.frame.affected |= paradigm.bit();
			cursor = slot.below;
		}
	}

	/// Pops frames down to and including the innermost frame of `region`.
	///
	/// Leaves the stack untouched and returns `None` if no frame matches.
	pub fn unwind(&mut self, region: RegionHandle) -> Option<Unwound> {
		if !self.contains(region) {
			return None;
		}

		let mut collapsed = Vec::new();
		while let Some(frame) = self.pop() {
			if frame.region == region {
				return Some(Unwound {
					frame,
					collapsed,
				});
			}
			collapsed.push(frame);
		}
		None
	}

	fn frames(&self) -> impl Iterator<Item = RewindFrame> + '_ {
		let mut cursor = self.head;
		std::iter::from_fn(move || {
			let slot = &self.slots[cursor?];
			cursor = slot.below;
			Some(slot.frame)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_well_nested_sequences_balance() {
		let mut stack = RewindStack::new();
		for depth in 1..6u32 {
			for region in 0..depth {
				stack.push(RegionHandle(region), region as u64);
			}
			for region in (0..depth).rev() {
				let unwound = stack.unwind(RegionHandle(region)).unwrap();
				assert!(unwound.collapsed.is_empty());
			}
			assert!(stack.is_empty());
			assert_eq!(stack.depth(), 0);
		}
	}

	#[test]
	fn test_slots_are_reused() {
		let mut stack = RewindStack::new();
		for round in 0..10 {
			stack.push(RegionHandle(1), round);
			stack.push(RegionHandle(2), round);
			stack.unwind(RegionHandle(1)).unwrap();
		}
		assert_eq!(stack.slots.len(), 2);
	}

	#[test]
	fn test_unwind_collapses_inner_frames() {
		let mut stack = RewindStack::new();
		stack.push(RegionHandle(1), 10);
		stack.push(RegionHandle(2), 20);
		stack.push(RegionHandle(3), 30);

		let unwound = stack.unwind(RegionHandle(1)).unwrap();
		assert_eq!(unwound.frame.region, RegionHandle(1));
		assert_eq!(unwound.frame.entered, 10);
		let collapsed: Vec<_> = unwound.collapsed.iter().map(|frame| frame.region).collect();
		assert_eq!(collapsed, vec![RegionHandle(3), RegionHandle(2)]);
		assert!(stack.is_empty());
	}

	#[test]
	fn test_unknown_region_leaves_stack_untouched() {
		let mut stack = RewindStack::new();
		stack.push(RegionHandle(1), 10);
		assert!(stack.unwind(RegionHandle(9)).is_none());
		assert_eq!(stack.depth(), 1);
	}

	#[test]
	fn test_mark_paradigm_affects_all_open_frames() {
		let mut stack = RewindStack::new();
		stack.push(RegionHandle(1), 10);
		stack.push(RegionHandle(2), 20);
		stack.mark_paradigm(RewindParadigm::Mpi);
		stack.push(RegionHandle(3), 30);
		stack.mark_paradigm(RewindParadigm::ThreadLock);

		let inner = stack.pop().unwrap();
		assert!(!inner.is_affected(RewindParadigm::Mpi));
		assert!(inner.is_affected(RewindParadigm::ThreadLock));

		let middle = stack.pop().unwrap();
		assert_eq!(middle.affected().collect::<Vec<_>>(), vec![RewindParadigm::Mpi, RewindParadigm::ThreadLock]);
	}

	#[test]
	fn test_sync_drops_frames_after_flush() {
		let mut stack = RewindStack::new();
		assert_eq!(stack.sync(0), 0);
		stack.push(RegionHandle(1), 10);
		stack.push(RegionHandle(2), 20);

		assert_eq!(stack.sync(0), 0);
		assert_eq!(stack.sync(1), 2);
		assert!(stack.is_empty());

		stack.push(RegionHandle(3), 30);
		assert_eq!(stack.sync(1), 0);
		assert_eq!(stack.depth(), 1);
	}

	#[test]
	fn test_points_are_unique_for_recursive_regions() {
		let mut stack = RewindStack::new();
		let outer = stack.push(RegionHandle(1), 10);
		let inner = stack.push(RegionHandle(1), 20);
		assert_ne!(outer.point, inner.point);

		let unwound = stack.unwind(RegionHandle(1)).unwrap();
		assert_eq!(unwound.frame.point, inner.point);
		assert_eq!(stack.depth(), 1);
	}
}
