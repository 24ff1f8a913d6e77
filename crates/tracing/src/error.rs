// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use scorep_archive::ArchiveError;
use scorep_definition::DefinitionError;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
	#[error(transparent)]
	Archive(#[from] ArchiveError),

	#[error(transparent)]
	Definition(#[from] DefinitionError),

	#[error("invalid tracing configuration: {0}")]
	InvalidConfig(String),

	#[error("tracing is not initialized")]
	NotInitialized,

	#[error("tracing is already initialized")]
	AlreadyInitialized,

	#[error("tracing was already finalized")]
	AlreadyFinalized,

	#[error("unknown location {0}")]
	UnknownLocation(u32),

	#[error("process rank is not known yet")]
	MppNotInitialized,

	#[error("the master process needs the unified global definitions")]
	MissingGlobalDefinitions,

	#[error("event writers must be finalized before writing definitions")]
	EventWritersOpen,
}

/// Terminates the measurement after an unrecoverable invariant violation.
///
/// Only used at callback edges that cannot hand an error back to the caller.
#[cold]
pub fn fatal(message: &str) -> ! {
	error!("{message}; aborting measurement");
	std::process::abort()
}
