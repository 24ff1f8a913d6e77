// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Translation of measurement values into the archive's value domains.

use scorep_archive as archive;
use scorep_archive::{UNDEFINED_U32, UNDEFINED_U64};
use scorep_type::{
	AttributeType, CollectiveType, GroupType, Handle, INVALID_ROOT_RANK, LocationGroupType, LocationType, LockType,
	MetricValueType, Paradigm, ParameterType, RegionType, RmaAtomicType, RmaSyncLevel, RmaSyncType,
};

/// Archive reference of an optional handle.
pub(crate) fn reference<H: Handle>(handle: Option<H>) -> u32 {
	handle.map(|handle| handle.id()).unwrap_or(UNDEFINED_U32)
}

pub(crate) fn location_reference(global_id: Option<u64>) -> u64 {
	global_id.unwrap_or(UNDEFINED_U64)
}

pub(crate) fn root_rank(root: u32) -> u32 {
	if root == INVALID_ROOT_RANK {
		UNDEFINED_U32
	} else {
		root
	}
}

pub(crate) fn paradigm(paradigm: Paradigm) -> archive::Paradigm {
	match paradigm {
		Paradigm::Measurement => archive::Paradigm::Measurement,
		Paradigm::User => archive::Paradigm::User,
		Paradigm::Compiler => archive::Paradigm::Compiler,
		Paradigm::Sampling => archive::Paradigm::Sampling,
		Paradigm::Mpi => archive::Paradigm::Mpi,
		Paradigm::Shmem => archive::Paradigm::Shmem,
		Paradigm::OpenMp => archive::Paradigm::OpenMp,
		Paradigm::Pthread => archive::Paradigm::Pthread,
		Paradigm::Cuda => archive::Paradigm::Cuda,
		Paradigm::OpenCl => archive::Paradigm::OpenCl,
		Paradigm::Io => archive::Paradigm::Io,
	}
}

pub(crate) fn collective(kind: CollectiveType) -> archive::CollectiveOp {
	use archive::CollectiveOp as Op;
	match kind {
		CollectiveType::Barrier => Op::Barrier,
		CollectiveType::Broadcast => Op::Bcast,
		CollectiveType::Gather => Op::Gather,
		CollectiveType::Gatherv => Op::Gatherv,
		CollectiveType::Scatter => Op::Scatter,
		CollectiveType::Scatterv => Op::Scatterv,
		CollectiveType::Allgather => Op::Allgather,
		CollectiveType::Allgatherv => Op::Allgatherv,
		CollectiveType::Alltoall => Op::Alltoall,
		CollectiveType::Alltoallv => Op::Alltoallv,
		CollectiveType::Alltoallw => Op::Alltoallw,
		CollectiveType::Allreduce => Op::Allreduce,
		CollectiveType::Reduce => Op::Reduce,
		CollectiveType::ReduceScatter => Op::ReduceScatter,
		CollectiveType::ReduceScatterBlock => Op::ReduceScatterBlock,
		CollectiveType::Scan => Op::Scan,
		CollectiveType::Exscan => Op::Exscan,
		CollectiveType::CreateHandle => Op::CreateHandle,
		CollectiveType::DestroyHandle => Op::DestroyHandle,
		CollectiveType::Allocate => Op::Allocate,
		CollectiveType::Deallocate => Op::Deallocate,
		CollectiveType::CreateHandleAndAllocate => Op::CreateHandleAndAllocate,
		CollectiveType::DestroyHandleAndDeallocate => Op::DestroyHandleAndDeallocate,
	}
}

pub(crate) fn lock_type(kind: LockType) -> archive::LockType {
	match kind {
		LockType::Exclusive => archive::LockType::Exclusive,
		LockType::Shared => archive::LockType::Shared,
	}
}

pub(crate) fn sync_type(kind: RmaSyncType) -> archive::RmaSyncType {
	match kind {
		RmaSyncType::Memory => archive::RmaSyncType::Memory,
		RmaSyncType::NotifyIn => archive::RmaSyncType::NotifyIn,
		RmaSyncType::NotifyOut => archive::RmaSyncType::NotifyOut,
	}
}

pub(crate) fn sync_level(level: RmaSyncLevel) -> archive::RmaSyncLevel {
	let mut bits = archive::RmaSyncLevel::NONE.0;
	if level.contains(RmaSyncLevel::PROCESS) {
		bits |= archive::RmaSyncLevel::PROCESS.0;
	}
	if level.contains(RmaSyncLevel::MEMORY) {
		bits |= archive::RmaSyncLevel::MEMORY.0;
	}
	archive::RmaSyncLevel(bits)
}

pub(crate) fn atomic_type(kind: RmaAtomicType) -> archive::RmaAtomicType {
	use archive::RmaAtomicType as Atomic;
	match kind {
		RmaAtomicType::Accumulate => Atomic::Accumulate,
		RmaAtomicType::Increment => Atomic::Increment,
		RmaAtomicType::TestAndSet => Atomic::TestAndSet,
		RmaAtomicType::CompareAndSwap => Atomic::CompareAndSwap,
		RmaAtomicType::Swap => Atomic::Swap,
		RmaAtomicType::FetchAndAdd => Atomic::FetchAndAdd,
		RmaAtomicType::FetchAndIncrement => Atomic::FetchAndIncrement,
		RmaAtomicType::Add => Atomic::Add,
		RmaAtomicType::FetchAndAccumulate => Atomic::FetchAndAccumulate,
	}
}

pub(crate) fn location_kind(kind: LocationType) -> archive::LocationKind {
	match kind {
		LocationType::CpuThread => archive::LocationKind::CpuThread,
		LocationType::Gpu => archive::LocationKind::Gpu,
		LocationType::Metric => archive::LocationKind::Metric,
	}
}

pub(crate) fn location_group_kind(kind: LocationGroupType) -> archive::LocationGroupKind {
	match kind {
		LocationGroupType::Process => archive::LocationGroupKind::Process,
	}
}

pub(crate) fn region_role(kind: RegionType) -> archive::RegionRole {
	use archive::RegionRole as Role;
	match kind {
		RegionType::Unknown => Role::Unknown,
		RegionType::Function | RegionType::User => Role::Function,
		RegionType::Loop | RegionType::OmpLoop => Role::Loop,
		RegionType::Code => Role::Code,
		RegionType::Phase => Role::Phase,
		RegionType::Dynamic => Role::Dynamic,
		RegionType::DynamicPhase => Role::DynamicPhase,
		RegionType::DynamicLoop => Role::DynamicLoop,
		RegionType::DynamicFunction => Role::DynamicFunction,
		RegionType::DynamicLoopPhase => Role::DynamicLoopPhase,
		RegionType::MpiCollBarrier | RegionType::OmpBarrier => Role::Barrier,
		RegionType::MpiCollOneToAll => Role::CollOneToAll,
		RegionType::MpiCollAllToOne => Role::CollAllToOne,
		RegionType::MpiCollAllToAll => Role::CollAllToAll,
		RegionType::MpiCollOther => Role::CollOther,
		RegionType::OmpParallel => Role::Parallel,
		RegionType::OmpSections => Role::Sections,
		RegionType::OmpSection => Role::Section,
		RegionType::OmpWorkshare => Role::Workshare,
		RegionType::OmpSingle => Role::Single,
		RegionType::OmpMaster => Role::Master,
		RegionType::OmpCritical => Role::Critical,
		RegionType::OmpAtomic => Role::Atomic,
		RegionType::OmpImplicitBarrier => Role::ImplicitBarrier,
		RegionType::OmpFlush => Role::Flush,
		RegionType::OmpCriticalSblock => Role::CriticalSblock,
		RegionType::OmpSingleSblock => Role::SingleSblock,
		RegionType::OmpWrapper => Role::Wrapper,
		RegionType::Task => Role::Task,
		RegionType::TaskWait => Role::TaskWait,
		RegionType::Artificial => Role::Artificial,
	}
}

pub(crate) fn group_kind(kind: GroupType) -> archive::GroupKind {
	match kind {
		GroupType::Unknown => archive::GroupKind::Unknown,
		GroupType::Locations => archive::GroupKind::Locations,
		GroupType::Regions => archive::GroupKind::Regions,
		GroupType::Metric => archive::GroupKind::Metric,
		GroupType::CommSelf => archive::GroupKind::CommSelf,
		GroupType::MpiGroup => archive::GroupKind::CommGroup,
		GroupType::MpiLocations | GroupType::ThreadTeam => archive::GroupKind::CommLocations,
	}
}

pub(crate) fn value_type(kind: MetricValueType) -> archive::ValueType {
	match kind {
		MetricValueType::Int64 => archive::ValueType::Int64,
		MetricValueType::Uint64 => archive::ValueType::Uint64,
		MetricValueType::Double => archive::ValueType::Double,
	}
}

/// Interprets an untagged metric payload according to its definition.
pub(crate) fn metric_value(kind: MetricValueType, raw: u64) -> archive::MetricValue {
	match kind {
		MetricValueType::Int64 => archive::MetricValue::Int64(raw as i64),
		MetricValueType::Uint64 => archive::MetricValue::Uint64(raw),
		MetricValueType::Double => archive::MetricValue::Double(f64::from_bits(raw)),
	}
}

pub(crate) fn parameter_kind(kind: ParameterType) -> archive::ParameterKind {
	match kind {
		ParameterType::Int64 => archive::ParameterKind::Int64,
		ParameterType::Uint64 => archive::ParameterKind::Uint64,
		ParameterType::String => archive::ParameterKind::String,
	}
}

pub(crate) fn attribute_kind(kind: AttributeType) -> archive::AttributeKind {
	use archive::AttributeKind as Kind;
	match kind {
		AttributeType::Int8 => Kind::Int8,
		AttributeType::Int16 => Kind::Int16,
		AttributeType::Int32 => Kind::Int32,
		AttributeType::Int64 => Kind::Int64,
		AttributeType::Uint8 => Kind::Uint8,
		AttributeType::Uint16 => Kind::Uint16,
		AttributeType::Uint32 => Kind::Uint32,
		AttributeType::Uint64 => Kind::Uint64,
		AttributeType::Float => Kind::Float,
		AttributeType::Double => Kind::Double,
		AttributeType::String => Kind::String,
		AttributeType::Location => Kind::Location,
		AttributeType::Region => Kind::Region,
		AttributeType::Group => Kind::Group,
		AttributeType::Communicator => Kind::Comm,
		AttributeType::RmaWindow => Kind::RmaWin,
		AttributeType::Parameter => Kind::Parameter,
		AttributeType::Callpath => Kind::Callpath,
	}
}

#[cfg(test)]
mod tests {
	use scorep_type::RegionHandle;

	use super::*;

	#[test]
	fn test_missing_handles_map_to_undefined() {
		assert_eq!(reference::<RegionHandle>(None), UNDEFINED_U32);
		assert_eq!(reference(Some(RegionHandle(4))), 4);
		assert_eq!(location_reference(None), UNDEFINED_U64);
	}

	#[test]
	fn test_invalid_root_is_undefined() {
		assert_eq!(root_rank(INVALID_ROOT_RANK), UNDEFINED_U32);
		assert_eq!(root_rank(3), 3);
	}

	#[test]
	fn test_metric_payload_follows_definition() {
		assert_eq!(metric_value(MetricValueType::Int64, (-5i64) as u64), archive::MetricValue::Int64(-5));
		assert_eq!(metric_value(MetricValueType::Uint64, 7), archive::MetricValue::Uint64(7));
		assert_eq!(metric_value(MetricValueType::Double, 2.5f64.to_bits()), archive::MetricValue::Double(2.5));
	}

	#[test]
	fn test_sync_level_bits_are_translated() {
		let level = sync_level(RmaSyncLevel::PROCESS | RmaSyncLevel::MEMORY);
		assert_eq!(level, archive::RmaSyncLevel(archive::RmaSyncLevel::PROCESS.0 | archive::RmaSyncLevel::MEMORY.0));
		assert_eq!(sync_level(RmaSyncLevel::NONE), archive::RmaSyncLevel::NONE);
	}
}
