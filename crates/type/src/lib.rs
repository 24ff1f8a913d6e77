// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Vocabulary types of the measurement core.
//!
//! Handles are process-local sequence numbers handed out by the definition
//! manager. The enums describe event arguments the way instrumentation
//! adapters see them; the tracing engine translates them into the trace
//! container's own value domains.

mod attribute;
mod handle;
mod kind;
mod property;

pub use attribute::{AttributeType, AttributeValue};
pub use handle::{
	AttributeHandle, CallpathHandle, CommunicatorHandle, GroupHandle, Handle, LocationGroupHandle, LocationHandle,
	LocationPropertyHandle, MetricHandle, ParameterHandle, RegionHandle, RmaWindowHandle, SamplingSetHandle,
	StringHandle, SystemTreeNodeHandle,
};
pub use kind::{
	CollectiveType, GroupType, LocationGroupType, LocationType, LockType, MetricValueType, Paradigm, ParameterType,
	RegionType, RmaAtomicType, RmaSyncLevel, RmaSyncType, TaskId,
};
pub use property::{Property, PropertyValue, RewindParadigm};

/// Rank of an MPI root argument that has no root.
pub const INVALID_ROOT_RANK: u32 = u32::MAX;
