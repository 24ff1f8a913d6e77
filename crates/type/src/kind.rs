// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
	CpuThread,
	Gpu,
	Metric,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationGroupType {
	Process,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionType {
	Unknown,
	Function,
	Loop,
	User,
	Code,
	Phase,
	Dynamic,
	DynamicPhase,
	DynamicLoop,
	DynamicFunction,
	DynamicLoopPhase,
	MpiCollBarrier,
	MpiCollOneToAll,
	MpiCollAllToOne,
	MpiCollAllToAll,
	MpiCollOther,
	OmpParallel,
	OmpLoop,
	OmpSections,
	OmpSection,
	OmpWorkshare,
	OmpSingle,
	OmpMaster,
	OmpCritical,
	OmpAtomic,
	OmpBarrier,
	OmpImplicitBarrier,
	OmpFlush,
	OmpCriticalSblock,
	OmpSingleSblock,
	OmpWrapper,
	Task,
	TaskWait,
	Artificial,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupType {
	Unknown,
	Locations,
	Regions,
	Metric,
	CommSelf,
	MpiGroup,
	MpiLocations,
	ThreadTeam,
}

/// Programming model an event or region belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paradigm {
	Measurement,
	User,
	Compiler,
	Sampling,
	Mpi,
	Shmem,
	OpenMp,
	Pthread,
	Cuda,
	OpenCl,
	Io,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricValueType {
	Int64,
	Uint64,
	Double,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
	Int64,
	Uint64,
	String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectiveType {
	Barrier,
	Broadcast,
	Gather,
	Gatherv,
	Scatter,
	Scatterv,
	Allgather,
	Allgatherv,
	Alltoall,
	Alltoallv,
	Alltoallw,
	Allreduce,
	Reduce,
	ReduceScatter,
	ReduceScatterBlock,
	Scan,
	Exscan,
	CreateHandle,
	DestroyHandle,
	Allocate,
	Deallocate,
	CreateHandleAndAllocate,
	DestroyHandleAndDeallocate,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockType {
	Exclusive,
	Shared,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RmaSyncType {
	Memory,
	NotifyIn,
	NotifyOut,
}

/// Bit set of synchronization scopes of an RMA synchronization.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RmaSyncLevel(pub u32);

impl RmaSyncLevel {
	pub const NONE: Self = Self(0);
	pub const PROCESS: Self = Self(1 << 0);
	pub const MEMORY: Self = Self(1 << 1);

	pub fn contains(self, other: Self) -> bool {
		self.0 & other.0 == other.0
	}
}

impl BitOr for RmaSyncLevel {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self::Output {
		Self(self.0 | rhs.0)
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RmaAtomicType {
	Accumulate,
	Increment,
	TestAndSet,
	CompareAndSwap,
	Swap,
	FetchAndAdd,
	FetchAndIncrement,
	Add,
	FetchAndAccumulate,
}

/// Identity of a task: the thread that created it and a per-thread generation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId {
	pub creating_thread: u32,
	pub generation: u32,
}

impl TaskId {
	pub fn new(creating_thread: u32, generation: u32) -> Self {
		Self {
			creating_thread,
			generation,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sync_level_bits() {
		let level = RmaSyncLevel::PROCESS | RmaSyncLevel::MEMORY;
		assert!(level.contains(RmaSyncLevel::PROCESS));
		assert!(level.contains(RmaSyncLevel::MEMORY));
		assert!(!RmaSyncLevel::NONE.contains(RmaSyncLevel::MEMORY));
		assert_eq!(level.0, 3);
	}
}
