// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use scorep_archive::{ArchiveConfig, Compression, FileSubstrate};

use crate::TraceError;

pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;
pub const DEFAULT_TOTAL_MEMORY: usize = 16000 * 1024;
pub const DEFAULT_PROCS_PER_FILE: u32 = 1024;

/// Configuration of the tracing substrate, read once at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
	/// Experiment directory holding the archive.
	pub directory: PathBuf,
	/// Base name of the archive files.
	pub name: String,
	/// Size of one event buffer chunk.
	pub chunk_size: usize,
	/// Memory budget shared by all event buffers of the process.
	pub total_memory: usize,
	pub compression: bool,
	/// Number of ranks sharing one aggregated event file, if aggregating.
	pub aggregation: Option<u32>,
	/// Also write a local definition stream per location.
	pub write_local_definitions: bool,
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			directory: PathBuf::from("scorep-measurement"),
			name: "traces".to_string(),
			chunk_size: DEFAULT_CHUNK_SIZE,
			total_memory: DEFAULT_TOTAL_MEMORY,
			compression: false,
			aggregation: None,
			write_local_definitions: cfg!(debug_assertions),
		}
	}
}

impl TracingConfig {
	pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
		self.directory = directory.into();
		self
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn chunk_size(mut self, chunk_size: usize) -> Self {
		self.chunk_size = chunk_size;
		self
	}

	pub fn total_memory(mut self, total_memory: usize) -> Self {
		self.total_memory = total_memory;
		self
	}

	pub fn compression(mut self, compression: bool) -> Self {
		self.compression = compression;
		self
	}

	pub fn aggregation(mut self, procs_per_file: Option<u32>) -> Self {
		self.aggregation = procs_per_file;
		self
	}

	pub fn write_local_definitions(mut self, write: bool) -> Self {
		self.write_local_definitions = write;
		self
	}

	/// Reads the configuration from the process environment.
	pub fn from_env() -> crate::Result<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads the configuration through `lookup`, falling back to defaults.
	pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();

		if let Some(directory) = lookup("SCOREP_EXPERIMENT_DIRECTORY") {
			config.directory = PathBuf::from(directory);
		}
		if let Some(value) = lookup("SCOREP_TRACING_COMPRESS") {
			config.compression = parse_bool("SCOREP_TRACING_COMPRESS", &value)?;
		}
		if let Some(value) = lookup("SCOREP_TOTAL_MEMORY") {
			config.total_memory = parse_size("SCOREP_TOTAL_MEMORY", &value)?;
		}
		if let Some(value) = lookup("SCOREP_TRACING_CHUNK_SIZE") {
			config.chunk_size = parse_size("SCOREP_TRACING_CHUNK_SIZE", &value)?;
		}
		if let Some(value) = lookup("SCOREP_TRACING_WRITE_LOCAL_DEFINITIONS") {
			config.write_local_definitions = parse_bool("SCOREP_TRACING_WRITE_LOCAL_DEFINITIONS", &value)?;
		}

		let aggregate = match lookup("SCOREP_TRACING_USE_SION") {
			Some(value) => parse_bool("SCOREP_TRACING_USE_SION", &value)?,
			None => false,
		};
		if aggregate {
			let procs_per_file = match lookup("SCOREP_TRACING_MAX_PROCS_PER_SION_FILE") {
				Some(value) => value.trim().parse::<u32>().map_err(|_| {
					TraceError::InvalidConfig(format!(
						"SCOREP_TRACING_MAX_PROCS_PER_SION_FILE: '{value}' is not a number"
					))
				})?,
				None => DEFAULT_PROCS_PER_FILE,
			};
			config.aggregation = Some(procs_per_file);
		}

		Ok(config)
	}

	pub fn validate(&self) -> crate::Result<()> {
		if self.chunk_size == 0 {
			return Err(TraceError::InvalidConfig("chunk size must not be zero".to_string()));
		}
		if self.total_memory < self.chunk_size {
			return Err(TraceError::InvalidConfig(format!(
				"total memory of {} bytes cannot hold one chunk of {} bytes",
				self.total_memory, self.chunk_size
			)));
		}
		if self.aggregation == Some(0) {
			return Err(TraceError::InvalidConfig("aggregation group size must not be zero".to_string()));
		}
		Ok(())
	}

	pub fn archive_config(&self) -> ArchiveConfig {
		let mut config = ArchiveConfig::new(&self.directory, &self.name);
		config.chunk_size = self.chunk_size;
		config.compression = if self.compression {
			Compression::Zstd
		} else {
			Compression::None
		};
		config.substrate = match self.aggregation {
			Some(group_size) => FileSubstrate::Aggregated {
				group_size,
			},
			None => FileSubstrate::Posix,
		};
		config
	}
}

fn parse_bool(key: &str, value: &str) -> crate::Result<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "yes" | "on" | "1" => Ok(true),
		"false" | "no" | "off" | "0" => Ok(false),
		_ => Err(TraceError::InvalidConfig(format!("{key}: '{value}' is not a boolean"))),
	}
}

/// Parses sizes like `16000k`, `4M` or `1G`.
fn parse_size(key: &str, value: &str) -> crate::Result<usize> {
	let value = value.trim();
	let (digits, multiplier) = match value.char_indices().last() {
		Some((index, 'k' | 'K')) => (&value[..index], 1024),
		Some((index, 'm' | 'M')) => (&value[..index], 1024 * 1024),
		Some((index, 'g' | 'G')) => (&value[..index], 1024 * 1024 * 1024),
		_ => (value, 1),
	};
	digits
		.trim()
		.parse::<usize>()
		.ok()
		.and_then(|number| number.checked_mul(multiplier))
		.ok_or_else(|| TraceError::InvalidConfig(format!("{key}: '{value}' is not a size")))
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		move |key| map.get(key).cloned()
	}

	#[test]
	fn test_defaults() {
		let config = TracingConfig::from_lookup(|_| None).unwrap();
		assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
		assert_eq!(config.total_memory, DEFAULT_TOTAL_MEMORY);
		assert_eq!(config.aggregation, None);
		assert!(!config.compression);
		config.validate().unwrap();
	}

	#[test]
	fn test_environment_values() {
		let config = TracingConfig::from_lookup(lookup(&[
			("SCOREP_EXPERIMENT_DIRECTORY", "/tmp/run"),
			("SCOREP_TRACING_COMPRESS", "yes"),
			("SCOREP_TOTAL_MEMORY", "4M"),
			("SCOREP_TRACING_CHUNK_SIZE", "64k"),
			("SCOREP_TRACING_USE_SION", "true"),
			("SCOREP_TRACING_MAX_PROCS_PER_SION_FILE", "16"),
		]))
		.unwrap();

		assert_eq!(config.directory, PathBuf::from("/tmp/run"));
		assert!(config.compression);
		assert_eq!(config.total_memory, 4 * 1024 * 1024);
		assert_eq!(config.chunk_size, 64 * 1024);
		assert_eq!(config.aggregation, Some(16));

		let archive = config.archive_config();
		assert_eq!(archive.compression, Compression::Zstd);
		assert_eq!(archive.substrate, FileSubstrate::Aggregated {
			group_size: 16
		});
	}

	#[test]
	fn test_aggregation_default_group_size() {
		let config = TracingConfig::from_lookup(lookup(&[("SCOREP_TRACING_USE_SION", "1")])).unwrap();
		assert_eq!(config.aggregation, Some(DEFAULT_PROCS_PER_FILE));
	}

	#[test]
	fn test_zero_group_size_is_invalid() {
		let config = TracingConfig::from_lookup(lookup(&[
			("SCOREP_TRACING_USE_SION", "true"),
			("SCOREP_TRACING_MAX_PROCS_PER_SION_FILE", "0"),
		]))
		.unwrap();
		assert!(matches!(config.validate(), Err(TraceError::InvalidConfig(_))));
	}

	#[test]
	fn test_unparsable_values() {
		assert!(TracingConfig::from_lookup(lookup(&[("SCOREP_TOTAL_MEMORY", "lots")])).is_err());
		assert!(TracingConfig::from_lookup(lookup(&[("SCOREP_TRACING_COMPRESS", "maybe")])).is_err());
	}

	#[test]
	fn test_memory_must_hold_a_chunk() {
		let config = TracingConfig::default().chunk_size(4096).total_memory(1024);
		assert!(config.validate().is_err());
	}
}
