// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	hash::Hash,
	ops::Deref,
};

use serde::{Deserialize, Serialize};

/// A typed, process-local sequence number of one definition kind.
pub trait Handle: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
	fn from_id(id: u32) -> Self;

	fn id(self) -> u32;
}

macro_rules! define_handle {
	($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
		$(
			$(#[$meta])*
			#[repr(transparent)]
			#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
			pub struct $name(pub u32);

			impl Handle for $name {
				fn from_id(id: u32) -> Self {
					Self(id)
				}

				fn id(self) -> u32 {
					self.0
				}
			}

			impl Display for $name {
				fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
					Display::fmt(&self.0, f)
				}
			}

			impl Deref for $name {
				type Target = u32;

				fn deref(&self) -> &Self::Target {
					&self.0
				}
			}

			impl PartialEq<u32> for $name {
				fn eq(&self, other: &u32) -> bool {
					self.0.eq(other)
				}
			}

			impl From<$name> for u32 {
				fn from(value: $name) -> Self {
					value.0
				}
			}
		)+
	};
}

define_handle!(
	StringHandle,
	SystemTreeNodeHandle,
	LocationGroupHandle,
	/// Definition of an execution location; distinct from its runtime local id.
	LocationHandle,
	RegionHandle,
	GroupHandle,
	CommunicatorHandle,
	RmaWindowHandle,
	MetricHandle,
	/// A set of metrics sampled together; metric events reference this.
	SamplingSetHandle,
	AttributeHandle,
	ParameterHandle,
	CallpathHandle,
	LocationPropertyHandle,
);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_handle_id_round_trip() {
		let handle = RegionHandle::from_id(7);
		assert_eq!(handle.id(), 7);
		assert_eq!(handle, 7u32);
		assert_eq!(u32::from(handle), 7);
		assert_eq!(handle.to_string(), "7");
	}

	#[test]
	fn test_handles_order_by_sequence() {
		assert!(StringHandle(1) < StringHandle(2));
	}
}
