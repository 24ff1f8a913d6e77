// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Definition streams of the archive.
//!
//! Definitions are written kind by kind in [`DefinitionKind::WRITE_ORDER`],
//! each kind in creation order, so a record never refers to one written
//! after it. A definition that cannot be written is reported and skipped;
//! the pass always runs to the end.

mod record;

use std::hash::Hash;

use scorep_archive::{DefKind, DefRecord, DefWriter};
use scorep_definition::{DefinitionKind, DefinitionManager, DefinitionTable, IdMappings};
use scorep_type::Handle;
use tracing::{debug, warn};

pub(crate) use record::ToDefRecord;

/// Offset of the local clock against the global one at `time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockOffset {
	pub time: u64,
	pub offset: i64,
	pub standard_deviation: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefinitionStats {
	pub written: usize,
	pub failed: usize,
}

/// Archive kind whose event references a mapping table translates.
///
/// Locations are referenced by global id and location properties are not
/// referenced at all, so neither gets a table.
pub(crate) fn mapped_kind(kind: DefinitionKind) -> Option<DefKind> {
	match kind {
		DefinitionKind::String => Some(DefKind::String),
		DefinitionKind::SystemTreeNode => Some(DefKind::SystemTreeNode),
		DefinitionKind::LocationGroup => Some(DefKind::LocationGroup),
		DefinitionKind::Region => Some(DefKind::Region),
		DefinitionKind::Group => Some(DefKind::Group),
		DefinitionKind::Communicator => Some(DefKind::Comm),
		DefinitionKind::RmaWindow => Some(DefKind::RmaWin),
		DefinitionKind::Metric => Some(DefKind::Metric),
		DefinitionKind::SamplingSet => Some(DefKind::MetricClass),
		DefinitionKind::Attribute => Some(DefKind::Attribute),
		DefinitionKind::Parameter => Some(DefKind::Parameter),
		DefinitionKind::Callpath => Some(DefKind::Callpath),
		DefinitionKind::Location | DefinitionKind::LocationProperty => None,
	}
}

/// Writes one mapping table per kind whose map is not the identity.
pub fn write_mappings(writer: &mut DefWriter, mappings: &IdMappings) -> usize {
	let mut written = 0;
	for (kind, map) in mappings.non_identity() {
		let Some(def_kind) = mapped_kind(kind) else {
			continue;
		};
		let record = DefRecord::MappingTable {
			kind: def_kind,
			map: map.as_slice().to_vec(),
		};
		match writer.write(record) {
			Ok(()) => written += 1,
			Err(err) => warn!(?kind, "failed to write mapping table: {err}"),
		}
	}
	written
}

pub fn write_clock_offsets(writer: &mut DefWriter, offsets: &[ClockOffset]) {
	for offset in offsets {
		let record = DefRecord::ClockOffset {
			time: offset.time,
			offset: offset.offset,
			standard_deviation: offset.standard_deviation,
		};
		if let Err(err) = writer.write(record) {
			warn!(time = offset.time, "failed to write clock offset: {err}");
		}
	}
}

/// Writes every definition of `definitions` in dependency order.
pub fn write_definitions(writer: &mut DefWriter, definitions: &DefinitionManager) -> DefinitionStats {
	let mut stats = DefinitionStats::default();
	for kind in DefinitionKind::WRITE_ORDER {
		match kind {
			DefinitionKind::String => write_table(writer, kind, definitions.strings(), definitions, &mut stats),
			DefinitionKind::SystemTreeNode => {
				write_table(writer, kind, definitions.system_tree_nodes(), definitions, &mut stats)
			}
			DefinitionKind::LocationGroup => {
				write_table(writer, kind, definitions.location_groups(), definitions, &mut stats)
			}
			DefinitionKind::Location => write_table(writer, kind, definitions.locations(), definitions, &mut stats),
			DefinitionKind::Region => write_table(writer, kind, definitions.regions(), definitions, &mut stats),
			DefinitionKind::Group => write_table(writer, kind, definitions.groups(), definitions, &mut stats),
			DefinitionKind::Communicator => {
				write_table(writer, kind, definitions.communicators(), definitions, &mut stats)
			}
			DefinitionKind::RmaWindow => write_table(writer, kind, definitions.rma_windows(), definitions, &mut stats),
			DefinitionKind::Metric => write_table(writer, kind, definitions.metrics(), definitions, &mut stats),
			DefinitionKind::SamplingSet => {
				write_table(writer, kind, definitions.sampling_sets(), definitions, &mut stats)
			}
			DefinitionKind::Attribute => write_table(writer, kind, definitions.attributes(), definitions, &mut stats),
			DefinitionKind::Parameter => write_table(writer, kind, definitions.parameters(), definitions, &mut stats),
			DefinitionKind::Callpath => write_table(writer, kind, definitions.callpaths(), definitions, &mut stats),
			DefinitionKind::LocationProperty => {
				write_table(writer, kind, definitions.location_properties(), definitions, &mut stats)
			}
		}
	}
	debug!(written = stats.written, failed = stats.failed, "wrote definitions");
	stats
}

fn write_table<H, D>(
	writer: &mut DefWriter,
	kind: DefinitionKind,
	table: &DefinitionTable<H, D>,
	definitions: &DefinitionManager,
	stats: &mut DefinitionStats,
) where
	H: Handle,
	D: ToDefRecord<Handle = H> + Clone + Eq + Hash,
{
	for (handle, def) in table.iter() {
		let written = def
			.to_record(handle, definitions)
			.map_err(|err| err.to_string())
			.and_then(|record| writer.write(record).map_err(|err| err.to_string()));
		match written {
			Ok(()) => stats.written += 1,
			Err(err) => {
				stats.failed += 1;
				warn!(?kind, id = handle.id(), "failed to write definition: {err}");
			}
		}
	}
}
