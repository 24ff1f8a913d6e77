// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::DefinitionKind;

#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
	#[error("unknown {kind:?} handle {id}")]
	UnknownHandle {
		kind: DefinitionKind,
		id: u32,
	},

	#[error("location {0} has no global id assigned")]
	UnassignedGlobalId(u32),
}
