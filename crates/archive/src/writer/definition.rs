// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashSet, path::PathBuf, sync::Arc};

use tracing::debug;

use crate::{ArchiveError, DefKind, DefRecord, Result, UNDEFINED_U64, archive::Shared, storage::encode_frame};

/// Definition stream writer.
///
/// Rejects any record that references a definition not written before it.
/// The stream is persisted by [`DefWriter::close`].
pub struct DefWriter {
	shared: Arc<Shared>,
	path: PathBuf,
	location: u64,
	buffer: Vec<u8>,
	defined: HashSet<(DefKind, u64)>,
	records: usize,
}

impl DefWriter {
	pub(crate) fn new(shared: Arc<Shared>, path: PathBuf, location: Option<u64>) -> Self {
		Self {
			shared,
			path,
			location: location.unwrap_or(UNDEFINED_U64),
			buffer: Vec::new(),
			defined: HashSet::new(),
			records: 0,
		}
	}

	pub fn write(&mut self, record: DefRecord) -> Result<()> {
		if let Some((kind, id)) = record.references().into_iter().find(|reference| !self.defined.contains(reference))
		{
			return Err(ArchiveError::UndefinedReference {
				kind,
				id,
			});
		}

		let frame = encode_frame(&record)?;
		self.buffer.extend_from_slice(&frame);
		if let Some(key) = record.key() {
			self.defined.insert(key);
		}
		self.records += 1;
		Ok(())
	}

	pub fn records(&self) -> usize {
		self.records
	}

	pub fn close(self) -> Result<()> {
		self.shared.storage.write_stream(&self.path, self.location, &self.buffer)?;
		debug!(path = %self.path.display(), records = self.records, "wrote definition stream");
		Ok(())
	}
}
