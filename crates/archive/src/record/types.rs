// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementMode {
	On,
	Off,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectiveOp {
	Barrier,
	Bcast,
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

#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RmaSyncLevel(pub u32);

impl RmaSyncLevel {
	pub const NONE: Self = Self(0);
	pub const PROCESS: Self = Self(1 << 0);
	pub const MEMORY: Self = Self(1 << 1);
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

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paradigm {
	Unknown,
	User,
	Compiler,
	OpenMp,
	Mpi,
	Cuda,
	Measurement,
	Pthread,
	Shmem,
	Sampling,
	OpenCl,
	Io,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
	CpuThread,
	Gpu,
	Metric,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationGroupKind {
	Process,
}

/// What a region does, independent of its paradigm.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionRole {
	Unknown,
	Function,
	Wrapper,
	Loop,
	Code,
	Parallel,
	Sections,
	Section,
	Workshare,
	Single,
	SingleSblock,
	Master,
	Critical,
	CriticalSblock,
	Atomic,
	Barrier,
	ImplicitBarrier,
	Flush,
	Task,
	TaskWait,
	CollOneToAll,
	CollAllToOne,
	CollAllToAll,
	CollOther,
	Phase,
	Dynamic,
	DynamicPhase,
	DynamicLoop,
	DynamicFunction,
	DynamicLoopPhase,
	Artificial,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
	Unknown,
	Locations,
	Regions,
	Metric,
	CommLocations,
	CommGroup,
	CommSelf,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
	Int64,
	Uint64,
	Double,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
	Int64,
	Uint64,
	String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
	Int8,
	Int16,
	Int32,
	Int64,
	Uint8,
	Uint16,
	Uint32,
	Uint64,
	Float,
	Double,
	String,
	Location,
	Region,
	Group,
	Comm,
	RmaWin,
	Parameter,
	Callpath,
}
