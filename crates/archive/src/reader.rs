// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::BTreeSet,
	fs,
	path::{Path, PathBuf},
};

use crate::{
	Anchor, ArchiveError, DefRecord, Event, FileSubstrate, Result,
	archive::FORMAT,
	storage::{decode_frames, read_blocks},
};

/// Reads a closed archive back.
pub struct TraceReader {
	directory: PathBuf,
	anchor: Anchor,
}

impl TraceReader {
	pub fn open(directory: impl AsRef<Path>, name: &str) -> Result<Self> {
		let directory = directory.as_ref().to_path_buf();
		let path = directory.join(format!("{name}.anchor"));
		let anchor: Anchor = serde_json::from_slice(&fs::read(&path)?)?;
		if anchor.format != FORMAT {
			return Err(ArchiveError::Corrupt {
				path: path.display().to_string(),
				reason: format!("unexpected format {}", anchor.format),
			});
		}
		Ok(Self {
			directory,
			anchor,
		})
	}

	pub fn anchor(&self) -> &Anchor {
		&self.anchor
	}

	fn stream_directory(&self) -> PathBuf {
		self.directory.join(&self.anchor.name)
	}

	pub fn global_definitions(&self) -> Result<Vec<DefRecord>> {
		read_records(&self.directory.join(format!("{}.def", self.anchor.name)))
	}

	pub fn local_definitions(&self, location: u64) -> Result<Vec<DefRecord>> {
		read_records(&self.stream_directory().join(format!("{location}.def")))
	}

	pub fn has_local_definitions(&self, location: u64) -> bool {
		self.stream_directory().join(format!("{location}.def")).exists()
	}

	/// Every location that has at least one event block.
	pub fn event_locations(&self) -> Result<Vec<u64>> {
		let mut locations = BTreeSet::new();
		for path in self.event_files()? {
			for block in read_blocks(&path)? {
				locations.insert(block.location);
			}
		}
		Ok(locations.into_iter().collect())
	}

	/// Events of one location in recording order.
	pub fn events(&self, location: u64) -> Result<Vec<Event>> {
		let paths = match self.anchor.substrate {
			FileSubstrate::Posix => vec![self.stream_directory().join(format!("{location}.evt"))],
			FileSubstrate::Aggregated {
				..
			} => self.event_files()?,
		};

		let mut events = Vec::new();
		for path in paths {
			if !path.exists() {
				continue;
			}
			for block in read_blocks(&path)? {
				if block.location == location {
					events.extend(decode_frames::<Event>(&path, &block.data)?);
				}
			}
		}
		Ok(events)
	}

	fn event_files(&self) -> Result<Vec<PathBuf>> {
		let mut paths = Vec::new();
		for entry in fs::read_dir(self.stream_directory())? {
			let path = entry?.path();
			if path.extension().is_some_and(|extension| extension == "evt") {
				paths.push(path);
			}
		}
		paths.sort();
		Ok(paths)
	}
}

fn read_records(path: &Path) -> Result<Vec<DefRecord>> {
	let mut records = Vec::new();
	for block in read_blocks(path)? {
		records.extend(decode_frames::<DefRecord>(path, &block.data)?);
	}
	Ok(records)
}
