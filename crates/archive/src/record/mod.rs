// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod definition;
mod event;
mod types;

pub use definition::{DefKind, DefRecord};
pub use event::{Attribute, AttributeValue, Event, EventRecord, MetricValue};
pub use types::{
	AttributeKind, CollectiveOp, GroupKind, LocationGroupKind, LocationKind, LockType, MeasurementMode, ParameterKind,
	Paradigm, RegionRole, RmaAtomicType, RmaSyncLevel, RmaSyncType, ValueType,
};
