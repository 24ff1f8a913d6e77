// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ArchiveError, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compression {
	None,
	Zstd,
}

/// How event streams map to files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileSubstrate {
	/// One file per location.
	Posix,
	/// The locations of `group_size` consecutive ranks share one file.
	Aggregated {
		group_size: u32,
	},
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
	Anchor,
	GlobalDefinitions,
	LocalDefinitions,
	Events,
}

#[derive(Debug, Clone)]
pub struct ArchiveConfig {
	/// Experiment directory the archive is created in.
	pub directory: PathBuf,
	/// Base name of the anchor, the global definitions and the stream directory.
	pub name: String,
	/// Size of one event buffer chunk in bytes.
	pub chunk_size: usize,
	pub compression: Compression,
	pub substrate: FileSubstrate,
}

impl ArchiveConfig {
	pub fn new(directory: impl Into<PathBuf>, name: impl Into<String>) -> Self {
		Self {
			directory: directory.into(),
			name: name.into(),
			chunk_size: 1024 * 1024,
			compression: Compression::None,
			substrate: FileSubstrate::Posix,
		}
	}

	pub fn validate(&self) -> Result<()> {
		if self.chunk_size == 0 {
			return Err(ArchiveError::InvalidConfig("chunk size must not be zero".to_string()));
		}
		if self.name.is_empty() {
			return Err(ArchiveError::InvalidConfig("archive name must not be empty".to_string()));
		}
		if let FileSubstrate::Aggregated {
			group_size: 0,
		} = self.substrate
		{
			return Err(ArchiveError::InvalidConfig("aggregation group size must not be zero".to_string()));
		}
		Ok(())
	}

	pub(crate) fn anchor_path(&self) -> PathBuf {
		self.directory.join(format!("{}.anchor", self.name))
	}

	pub(crate) fn global_definitions_path(&self) -> PathBuf {
		self.directory.join(format!("{}.def", self.name))
	}

	pub(crate) fn stream_directory(&self) -> PathBuf {
		self.directory.join(&self.name)
	}
}
