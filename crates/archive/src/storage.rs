// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs,
	fs::OpenOptions,
	io::Write,
	path::{Path, PathBuf},
	sync::OnceLock,
};

use parking_lot::Mutex;
use serde::{Serialize, de::DeserializeOwned};
use tracing::trace;

use crate::{ArchiveConfig, ArchiveError, Compression, FileSubstrate, Result};

const FLAG_ZSTD: u8 = 1;
const BLOCK_HEADER_SIZE: usize = 8 + 1 + 4 + 4;
const ZSTD_LEVEL: i32 = 3;

/// One decoded block of a stream file.
#[derive(Debug)]
pub(crate) struct Block {
	pub location: u64,
	pub data: Vec<u8>,
}

/// Encodes one length-prefixed postcard frame.
pub(crate) fn encode_frame<T: Serialize>(value: &T) -> Result<Vec<u8>> {
	let payload = postcard::to_allocvec(value)?;
	let mut frame = Vec::with_capacity(4 + payload.len());
	frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
	frame.extend_from_slice(&payload);
	Ok(frame)
}

pub(crate) fn decode_frames<T: DeserializeOwned>(path: &Path, mut data: &[u8]) -> Result<Vec<T>> {
	let mut result = Vec::new();
	while !data.is_empty() {
		if data.len() < 4 {
			return Err(corrupt(path, "truncated frame header"));
		}
		let len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
		if data.len() < 4 + len {
			return Err(corrupt(path, "truncated frame"));
		}
		result.push(postcard::from_bytes(&data[4..4 + len])?);
		data = &data[4 + len..];
	}
	Ok(result)
}

fn corrupt(path: &Path, reason: &str) -> ArchiveError {
	ArchiveError::Corrupt {
		path: path.display().to_string(),
		reason: reason.to_string(),
	}
}

/// File layout and block I/O of one archive.
pub(crate) struct Storage {
	config: ArchiveConfig,
	rank: OnceLock<u32>,
	append: Mutex<()>,
}

impl Storage {
	pub fn new(config: ArchiveConfig) -> Self {
		Self {
			config,
			rank: OnceLock::new(),
			append: Mutex::new(()),
		}
	}

	pub fn config(&self) -> &ArchiveConfig {
		&self.config
	}

	pub fn create_directories(&self) -> Result<()> {
		fs::create_dir_all(self.config.stream_directory())?;
		Ok(())
	}

	pub fn open_event_files(&self, rank: u32) -> Result<()> {
		let current = *self.rank.get_or_init(|| rank);
		if current != rank {
			return Err(ArchiveError::RankChanged {
				current,
				requested: rank,
			});
		}
		Ok(())
	}

	pub fn event_path(&self, location: u64) -> Result<PathBuf> {
		let directory = self.config.stream_directory();
		match self.config.substrate {
			FileSubstrate::Posix => Ok(directory.join(format!("{location}.evt"))),
			FileSubstrate::Aggregated {
				group_size,
			} => {
				let rank = self.rank.get().ok_or(ArchiveError::FilesNotOpen)?;
				Ok(directory.join(format!("group-{}.evt", rank / group_size)))
			}
		}
	}

	pub fn local_definitions_path(&self, location: u64) -> PathBuf {
		self.config.stream_directory().join(format!("{location}.def"))
	}

	pub fn global_definitions_path(&self) -> PathBuf {
		self.config.global_definitions_path()
	}

	fn encode_block(&self, location: u64, raw: &[u8]) -> Result<Vec<u8>> {
		let (flags, payload) = match self.config.compression {
			Compression::None => (0, raw.to_vec()),
			Compression::Zstd => (FLAG_ZSTD, zstd::bulk::compress(raw, ZSTD_LEVEL)?),
		};

		let mut block = Vec::with_capacity(BLOCK_HEADER_SIZE + payload.len());
		block.extend_from_slice(&location.to_le_bytes());
		block.push(flags);
		block.extend_from_slice(&(payload.len() as u32).to_le_bytes());
		block.extend_from_slice(&(raw.len() as u32).to_le_bytes());
		block.extend_from_slice(&payload);
		Ok(block)
	}

	/// Appends one block. Appends to a shared aggregated file are serialized.
	pub fn append_block(&self, path: &Path, location: u64, raw: &[u8]) -> Result<()> {
		let block = self.encode_block(location, raw)?;

		let _guard = match self.config.substrate {
			FileSubstrate::Aggregated {
				..
			} => Some(self.append.lock()),
			FileSubstrate::Posix => None,
		};
		let mut file = OpenOptions::new().create(true).append(true).open(path)?;
		file.write_all(&block)?;
		trace!(path = %path.display(), location, bytes = block.len(), "appended block");
		Ok(())
	}

	pub fn write_stream(&self, path: &Path, location: u64, raw: &[u8]) -> Result<()> {
		let block = self.encode_block(location, raw)?;
		fs::write(path, block)?;
		Ok(())
	}
}

pub(crate) fn read_blocks(path: &Path) -> Result<Vec<Block>> {
	let bytes = fs::read(path)?;
	let mut blocks = Vec::new();
	let mut rest = bytes.as_slice();

	while !rest.is_empty() {
		if rest.len() < BLOCK_HEADER_SIZE {
			return Err(corrupt(path, "truncated block header"));
		}
		let location = u64::from_le_bytes(rest[0..8].try_into().map_err(|_| corrupt(path, "bad location"))?);
		let flags = rest[8];
		let len = u32::from_le_bytes(rest[9..13].try_into().map_err(|_| corrupt(path, "bad length"))?) as usize;
		let raw_len = u32::from_le_bytes(rest[13..17].try_into().map_err(|_| corrupt(path, "bad length"))?) as usize;
		rest = &rest[BLOCK_HEADER_SIZE..];

		if rest.len() < len {
			return Err(corrupt(path, "truncated block"));
		}
		let payload = &rest[..len];
		let data = if flags & FLAG_ZSTD != 0 {
			zstd::bulk::decompress(payload, raw_len)?
		} else {
			payload.to_vec()
		};
		if data.len() != raw_len {
			return Err(corrupt(path, "block length mismatch"));
		}

		blocks.push(Block {
			location,
			data,
		});
		rest = &rest[len..];
	}
	Ok(blocks)
}

#[cfg(test)]
mod tests {
	use scorep_testing::temp_dir;

	use super::*;

	#[test]
	fn test_compressed_blocks_read_back() {
		temp_dir(|dir| {
			let mut config = ArchiveConfig::new(dir, "traces");
			config.compression = Compression::Zstd;
			let storage = Storage::new(config);
			storage.create_directories().unwrap();

			let path = storage.local_definitions_path(3);
			let raw = vec![7u8; 4096];
			storage.append_block(&path, 3, &raw).unwrap();
			storage.append_block(&path, 4, b"tail").unwrap();

			let blocks = read_blocks(&path).unwrap();
			assert_eq!(blocks.len(), 2);
			assert_eq!(blocks[0].location, 3);
			assert_eq!(blocks[0].data, raw);
			assert_eq!(blocks[1].data, b"tail");
			assert!(fs::metadata(&path).unwrap().len() < 4096);
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_aggregated_path_needs_rank() {
		let mut config = ArchiveConfig::new("/tmp/unused", "traces");
		config.substrate = FileSubstrate::Aggregated {
			group_size: 4,
		};
		let storage = Storage::new(config);
		assert!(matches!(storage.event_path(0), Err(ArchiveError::FilesNotOpen)));

		storage.open_event_files(9).unwrap();
		assert!(storage.event_path(0).unwrap().ends_with("group-2.evt"));
	}

	#[test]
	fn test_rank_cannot_change_once_files_are_open() {
		let storage = Storage::new(ArchiveConfig::new("/tmp/unused", "traces"));
		storage.open_event_files(3).unwrap();
		storage.open_event_files(3).unwrap();
		assert!(matches!(
			storage.open_event_files(5),
			Err(ArchiveError::RankChanged {
				current: 3,
				requested: 5
			})
		));
		assert_eq!(storage.rank.get(), Some(&3));
	}

	#[test]
	fn test_posix_appends_do_not_serialize() {
		temp_dir(|dir| {
			let storage = Storage::new(ArchiveConfig::new(dir, "traces"));
			storage.create_directories().unwrap();

			let _held = storage.append.lock();
			let path = storage.event_path(1).unwrap();
			storage.append_block(&path, 1, b"block").unwrap();

			let blocks = read_blocks(&path).unwrap();
			assert_eq!(blocks.len(), 1);
			assert_eq!(blocks[0].data, b"block");
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_frames() {
		let mut data = encode_frame(&(1u32, "a".to_string())).unwrap();
		data.extend(encode_frame(&(2u32, "b".to_string())).unwrap());
		let frames: Vec<(u32, String)> = decode_frames(Path::new("mem"), &data).unwrap();
		assert_eq!(frames, vec![(1, "a".to_string()), (2, "b".to_string())]);

		let truncated: Result<Vec<(u32, String)>> = decode_frames(Path::new("mem"), &data[..data.len() - 1]);
		assert!(truncated.is_err());
	}
}
