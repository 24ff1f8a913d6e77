// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, hash::Hash, marker::PhantomData};

use scorep_type::Handle;

/// Definitions of one kind in creation order.
///
/// The position of a definition is its local sequence number. Interned
/// definitions are deduplicated by value; inserted ones never are.
#[derive(Debug, Clone)]
pub struct DefinitionTable<H: Handle, D: Clone + Eq + Hash> {
	entries: Vec<D>,
	index: HashMap<D, u32>,
	_handle: PhantomData<H>,
}

impl<H: Handle, D: Clone + Eq + Hash> Default for DefinitionTable<H, D> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			index: HashMap::new(),
			_handle: PhantomData,
		}
	}
}

impl<H: Handle, D: Clone + Eq + Hash> DefinitionTable<H, D> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the handle of an equal definition, creating it if absent.
	pub fn intern(&mut self, def: D) -> H {
		if let Some(id) = self.index.get(&def) {
			return H::from_id(*id);
		}
		let id = self.entries.len() as u32;
		self.index.insert(def.clone(), id);
		self.entries.push(def);
		H::from_id(id)
	}

	/// Appends a definition without looking for an equal one.
	pub fn insert(&mut self, def: D) -> H {
		let id = self.entries.len() as u32;
		self.entries.push(def);
		H::from_id(id)
	}

	pub fn get(&self, handle: H) -> Option<&D> {
		self.entries.get(handle.id() as usize)
	}

	pub fn contains(&self, handle: H) -> bool {
		(handle.id() as usize) < self.entries.len()
	}

	/// Mutates a definition in place, keeping the deduplication index valid.
	pub fn update<F>(&mut self, handle: H, f: F) -> bool
	where
		F: FnOnce(&mut D),
	{
		let id = handle.id();
		let Some(entry) = self.entries.get_mut(id as usize) else {
			return false;
		};

		let indexed = self.index.get(&*entry) == Some(&id);
		if indexed {
			self.index.remove(&*entry);
		}
		f(entry);
		if indexed {
			self.index.entry(entry.clone()).or_insert(id);
		}
		true
	}

	pub fn iter(&self) -> impl Iterator<Item = (H, &D)> {
		self.entries.iter().enumerate().map(|(id, def)| (H::from_id(id as u32), def))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
