// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::{
	CallpathHandle, CommunicatorHandle, GroupHandle, LocationHandle, ParameterHandle, RegionHandle,
	RmaWindowHandle, StringHandle,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
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
	Communicator,
	RmaWindow,
	Parameter,
	Callpath,
}

/// Value attached to the next event of a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
	Int8(i8),
	Int16(i16),
	Int32(i32),
	Int64(i64),
	Uint8(u8),
	Uint16(u16),
	Uint32(u32),
	Uint64(u64),
	Float(f32),
	Double(f64),
	String(StringHandle),
	Location(LocationHandle),
	Region(RegionHandle),
	Group(GroupHandle),
	Communicator(CommunicatorHandle),
	RmaWindow(RmaWindowHandle),
	Parameter(ParameterHandle),
	Callpath(CallpathHandle),
}

impl AttributeValue {
	pub fn kind(&self) -> AttributeType {
		match self {
			AttributeValue::Int8(_) => AttributeType::Int8,
			AttributeValue::Int16(_) => AttributeType::Int16,
			AttributeValue::Int32(_) => AttributeType::Int32,
			AttributeValue::Int64(_) => AttributeType::Int64,
			AttributeValue::Uint8(_) => AttributeType::Uint8,
			AttributeValue::Uint16(_) => AttributeType::Uint16,
			AttributeValue::Uint32(_) => AttributeType::Uint32,
			AttributeValue::Uint64(_) => AttributeType::Uint64,
			AttributeValue::Float(_) => AttributeType::Float,
			AttributeValue::Double(_) => AttributeType::Double,
			AttributeValue::String(_) => AttributeType::String,
			AttributeValue::Location(_) => AttributeType::Location,
			AttributeValue::Region(_) => AttributeType::Region,
			AttributeValue::Group(_) => AttributeType::Group,
			AttributeValue::Communicator(_) => AttributeType::Communicator,
			AttributeValue::RmaWindow(_) => AttributeType::RmaWindow,
			AttributeValue::Parameter(_) => AttributeType::Parameter,
			AttributeValue::Callpath(_) => AttributeType::Callpath,
		}
	}
}
