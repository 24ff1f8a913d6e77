// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::DefKind;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
	#[error("archive I/O failed: {0}")]
	Io(#[from] std::io::Error),

	#[error("record encoding failed: {0}")]
	Encode(#[from] postcard::Error),

	#[error("anchor encoding failed: {0}")]
	Anchor(#[from] serde_json::Error),

	#[error("invalid archive configuration: {0}")]
	InvalidConfig(String),

	#[error("event writer has no location id")]
	UndefinedLocation,

	#[error("event files are not open yet")]
	FilesNotOpen,

	#[error("event files were opened for rank {current}, not {requested}")]
	RankChanged {
		current: u32,
		requested: u32,
	},

	#[error("record of {size} bytes does not fit into a chunk of {chunk_size} bytes")]
	RecordTooLarge {
		size: usize,
		chunk_size: usize,
	},

	#[error("no memory for event buffer after flush")]
	OutOfMemory,

	#[error("unknown rewind point {0}")]
	UnknownRewindPoint(u32),

	#[error("definition references undefined {kind:?} {id}")]
	UndefinedReference {
		kind: DefKind,
		id: u64,
	},

	#[error("only the master process writes global data")]
	NotMaster,

	#[error("writer already closed")]
	Closed,

	#[error("corrupt stream {path}: {reason}")]
	Corrupt {
		path: String,
		reason: String,
	},
}
