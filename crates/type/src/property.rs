// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A cross-cutting completeness claim about the recorded trace.
///
/// Every property starts out as `TRUE`. Discarding a recorded span that
/// contained events of the property's paradigm makes the claim unknown.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Property {
	MpiCommunicationComplete,
	ThreadForkJoinEventComplete,
	ThreadCreateWaitEventComplete,
	ThreadLockEventComplete,
}

impl Property {
	pub const ALL: [Property; 4] = [
		Property::MpiCommunicationComplete,
		Property::ThreadForkJoinEventComplete,
		Property::ThreadCreateWaitEventComplete,
		Property::ThreadLockEventComplete,
	];

	pub fn name(self) -> &'static str {
		match self {
			Property::MpiCommunicationComplete => "MPI_COMMUNICATION_COMPLETE",
			Property::ThreadForkJoinEventComplete => "THREAD_FORK_JOIN_EVENT_COMPLETE",
			Property::ThreadCreateWaitEventComplete => "THREAD_CREATE_WAIT_EVENT_COMPLETE",
			Property::ThreadLockEventComplete => "THREAD_LOCK_EVENT_COMPLETE",
		}
	}

	pub fn initial_value(self) -> bool {
		true
	}

	pub fn index(self) -> usize {
		self as usize
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
	True,
	False,
	Unknown,
}

impl PropertyValue {
	pub fn as_str(self) -> &'static str {
		match self {
			PropertyValue::True => "TRUE",
			PropertyValue::False => "FALSE",
			PropertyValue::Unknown => "UNKNOWN",
		}
	}
}

impl Display for PropertyValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Paradigm family whose events inside a rewind region make the region's
/// removal affect a completeness property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewindParadigm {
	Mpi,
	ThreadForkJoin,
	ThreadCreateWait,
	ThreadLock,
}

impl RewindParadigm {
	pub const ALL: [RewindParadigm; 4] = [
		RewindParadigm::Mpi,
		RewindParadigm::ThreadForkJoin,
		RewindParadigm::ThreadCreateWait,
		RewindParadigm::ThreadLock,
	];

	pub fn property(self) -> Property {
		match self {
			RewindParadigm::Mpi => Property::MpiCommunicationComplete,
			RewindParadigm::ThreadForkJoin => Property::ThreadForkJoinEventComplete,
			RewindParadigm::ThreadCreateWait => Property::ThreadCreateWaitEventComplete,
			RewindParadigm::ThreadLock => Property::ThreadLockEventComplete,
		}
	}

	pub fn bit(self) -> u8 {
		1 << (self as u8)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_each_rewind_paradigm_has_distinct_property() {
		let mut seen = Vec::new();
		for paradigm in RewindParadigm::ALL {
			let property = paradigm.property();
			assert!(!seen.contains(&property));
			seen.push(property);
		}
		assert_eq!(seen.len(), Property::ALL.len());
	}

	#[test]
	fn test_rewind_paradigm_bits_are_disjoint() {
		let mut all = 0u8;
		for paradigm in RewindParadigm::ALL {
			assert_eq!(all & paradigm.bit(), 0);
			all |= paradigm.bit();
		}
	}

	#[test]
	fn test_property_names() {
		assert_eq!(Property::MpiCommunicationComplete.name(), "MPI_COMMUNICATION_COMPLETE");
		assert_eq!(PropertyValue::Unknown.to_string(), "UNKNOWN");
	}
}
