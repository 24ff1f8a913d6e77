// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// A fixed-capacity piece of event buffer memory.
#[derive(Debug)]
pub struct Chunk {
	data: Box<[u8]>,
	used: usize,
}

impl Chunk {
	pub fn new(data: Box<[u8]>) -> Self {
		Self {
			data,
			used: 0,
		}
	}

	pub fn capacity(&self) -> usize {
		self.data.len()
	}

	pub fn used(&self) -> usize {
		self.used
	}

	pub fn remaining(&self) -> usize {
		self.data.len() - self.used
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.data[..self.used]
	}

	pub(crate) fn append(&mut self, bytes: &[u8]) -> bool {
		if bytes.len() > self.remaining() {
			return false;
		}
		self.data[self.used..self.used + bytes.len()].copy_from_slice(bytes);
		self.used += bytes.len();
		true
	}

	pub(crate) fn truncate(&mut self, used: usize) {
		self.used = self.used.min(used);
	}

	pub(crate) fn reset(&mut self) {
		self.used = 0;
	}

	/// Releases the backing memory, discarding any content.
	pub fn into_inner(self) -> Box<[u8]> {
		self.data
	}
}
