// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use std::collections::HashSet;

use common::{Rank, config, finish, records, region, start, start_rank};
use scorep_archive::{DefKind, DefRecord, EventRecord, TraceReader};
use scorep_definition::unify;
use scorep_testing::temp_dir;
use scorep_tracing::{RecordingMode, UnifiedDefinitions};
use scorep_type::{GroupType, LocationType, MetricValueType, Paradigm};

fn lookup_string(definitions: &[DefRecord], id: u32) -> Option<String> {
	definitions.iter().find_map(|record| match record {
		DefRecord::String {
			id: key,
			value,
		} if *key == id => Some(value.clone()),
		_ => None,
	})
}

#[test]
fn test_global_definitions_precede_their_references() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let main = region(session, "main");
		{
			let mut definitions = session.definitions_mut();
			let group = definitions.new_group(GroupType::MpiGroup, "world", Paradigm::Mpi, vec![0]);
			let comm = definitions.new_communicator(group, "MPI_COMM_WORLD", None);
			definitions.new_rma_window("window", comm);
			let cycles = definitions.new_metric("cycles", "cpu cycles", "#", MetricValueType::Uint64);
			definitions.new_sampling_set(vec![cycles]);
			let root = definitions.new_callpath(None, main);
			definitions.new_callpath(Some(root), main);
		}
		let mut location = session.on_location_creation(LocationType::CpuThread, None);
		session.definitions_mut().new_location_property(location.location().definition(), "HOST", "node-1");

		sink.enter_region(&mut location, 1, main);
		sink.exit_region(&mut location, 2, main);
		finish(session, vec![&mut location]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		let global = reader.global_definitions().unwrap();
		assert!(!global.is_empty());

		let mut seen = HashSet::new();
		for record in &global {
			for reference in record.references() {
				assert!(seen.contains(&reference), "{record:?} refers to {reference:?} before its definition");
			}
			if let Some(key) = record.key() {
				seen.insert(key);
			}
		}
		assert!(global.iter().any(|record| matches!(record, DefRecord::LocationProperty { .. })));
		assert!(global.iter().any(|record| matches!(record, DefRecord::Callpath { .. })));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_single_process_writes_no_mapping_tables() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let main = region(session, "main");
		let mut location = session.on_location_creation(LocationType::CpuThread, None);
		sink.enter_region(&mut location, 1, main);
		sink.exit_region(&mut location, 2, main);
		finish(session, vec![&mut location]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		assert!(reader.has_local_definitions(0));
		let local = reader.local_definitions(0).unwrap();
		assert!(!local.iter().any(|record| matches!(record, DefRecord::MappingTable { .. })));

		// one at initialization, one when the event writers close
		let offsets = local.iter().filter(|record| matches!(record, DefRecord::ClockOffset { .. })).count();
		assert_eq!(offsets, 2);

		// write_local_definitions copies the process definitions into the stream
		assert!(local.iter().any(|record| matches!(record, DefRecord::Region { .. })));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_location_definitions_carry_event_counts() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let main = region(session, "main");
		let mut master = session.on_location_creation(LocationType::CpuThread, None);
		let mut worker = session.on_location_creation(LocationType::CpuThread, Some(&master));
		for ts in 0..5 {
			sink.enter_region(&mut master, ts * 2, main);
			sink.exit_region(&mut master, ts * 2 + 1, main);
		}
		sink.enter_region(&mut worker, 3, main);
		sink.exit_region(&mut worker, 4, main);
		finish(session, vec![&mut master, &mut worker]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		let global = reader.global_definitions().unwrap();
		let mut locations: Vec<_> = global
			.iter()
			.filter_map(|record| match record {
				DefRecord::Location {
					id,
					name,
					number_of_events,
					..
				} => Some((*id, lookup_string(&global, *name), *number_of_events)),
				_ => None,
			})
			.collect();
		locations.sort();

		assert_eq!(locations, vec![
			(0, Some("Master thread".to_string()), 10),
			(1 << 32, Some("Thread 1".to_string()), 2),
		]);
		assert_eq!(reader.anchor().number_of_locations, 2);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_unified_ids_resolve_through_mapping_tables() {
	temp_dir(|dir| {
		let first = start_rank(config(dir), Rank {
			rank: 0,
			size: 2,
		});
		let second = start_rank(config(dir), Rank {
			rank: 1,
			size: 2,
		});

		let bar_on_first = region(&first.session, "bar");
		let foo_on_second = region(&second.session, "foo");
		let bar_on_second = region(&second.session, "bar");

		let mut first_location = first.session.on_location_creation(LocationType::CpuThread, None);
		let mut second_location = second.session.on_location_creation(LocationType::CpuThread, None);

		let sink = first.substrate.callbacks(RecordingMode::Enabled);
		sink.enter_region(&mut first_location, 1, bar_on_first);
		sink.exit_region(&mut first_location, 2, bar_on_first);

		let sink = second.substrate.callbacks(RecordingMode::Enabled);
		sink.enter_region(&mut second_location, 1, foo_on_second);
		sink.exit_region(&mut second_location, 2, foo_on_second);
		sink.enter_region(&mut second_location, 3, bar_on_second);
		sink.exit_region(&mut second_location, 4, bar_on_second);

		first.session.finalize_event_writers(vec![&mut first_location]).unwrap();
		second.session.finalize_event_writers(vec![&mut second_location]).unwrap();

		let unified = unify(&[&*first.session.definitions(), &*second.session.definitions()]);
		let mut mappings = unified.mappings.into_iter();
		let first_unified = UnifiedDefinitions {
			mappings: mappings.next().unwrap_or_default(),
			global: Some(unified.definitions),
		};
		let second_unified = UnifiedDefinitions {
			mappings: mappings.next().unwrap_or_default(),
			global: None,
		};

		second.session.write_definitions(&second_unified).unwrap();
		second.session.write_properties(&second_unified).unwrap();
		second.session.finalize().unwrap();

		first.session.write_definitions(&first_unified).unwrap();
		first.session.write_properties(&first_unified).unwrap();
		first.session.finalize().unwrap();

		let reader = TraceReader::open(dir, "traces").unwrap();
		assert_eq!(reader.anchor().number_of_processes, 2);
		assert_eq!(reader.anchor().number_of_locations, 2);
		assert_eq!(reader.event_locations().unwrap(), vec![0, 1]);

		let global = reader.global_definitions().unwrap();
		let region_name = |id: u32| {
			global.iter().find_map(|record| match record {
				DefRecord::Region {
					id: key,
					name,
					..
				} if *key == id => lookup_string(&global, *name),
				_ => None,
			})
		};

		let first_local = reader.local_definitions(0).unwrap();
		assert!(!first_local.iter().any(|record| matches!(record, DefRecord::MappingTable { kind: DefKind::Region, .. })));

		let second_local = reader.local_definitions(1).unwrap();
		let region_map = second_local
			.iter()
			.find_map(|record| match record {
				DefRecord::MappingTable {
					kind: DefKind::Region,
					map,
				} => Some(map.clone()),
				_ => None,
			})
			.unwrap();

		let names: Vec<_> = records(&reader, 1)
			.into_iter()
			.filter_map(|(_, record)| match record {
				EventRecord::Enter {
					region,
				} => region_name(region_map[region as usize]),
				_ => None,
			})
			.collect();
		assert_eq!(names, vec!["foo".to_string(), "bar".to_string()]);
		Ok(())
	})
	.unwrap();
}
