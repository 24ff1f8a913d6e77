// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use std::thread;

use common::{config, finish, records, region, start};
use scorep_archive::{EventRecord, MeasurementMode, TraceReader};
use scorep_testing::{capture_logs, temp_dir};
use scorep_tracing::RecordingMode;
use scorep_type::LocationType;
use tracing::Level;

#[test]
fn test_nested_regions_are_recorded_in_order() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let r1 = region(session, "r1");
		let r2 = region(session, "r2");
		let mut location = session.on_location_creation(LocationType::CpuThread, None);

		sink.enter_region(&mut location, 100, r1);
		sink.enter_region(&mut location, 105, r2);
		sink.exit_region(&mut location, 110, r2);
		sink.exit_region(&mut location, 120, r1);
		assert_eq!(location.number_of_events(), 4);

		finish(session, vec![&mut location]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		assert_eq!(records(&reader, 0), vec![
			(100, EventRecord::Enter {
				region: r1.0
			}),
			(105, EventRecord::Enter {
				region: r2.0
			}),
			(110, EventRecord::Leave {
				region: r2.0
			}),
			(120, EventRecord::Leave {
				region: r1.0
			}),
		]);
		assert_eq!(reader.anchor().number_of_locations, 1);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_flush_between_store_and_exit_only_warns() {
	temp_dir(|dir| {
		let harness = start(config(dir).chunk_size(64).total_memory(64));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let r = region(session, "speculative");
		let work = region(session, "work");
		let mut location = session.on_location_creation(LocationType::CpuThread, None);

		let (_, logs) = capture_logs(|| {
			sink.store_rewind_point(&mut location, 50, r);
			sink.enter_region(&mut location, 50, r);
			for ts in 0..20u64 {
				sink.enter_region(&mut location, 60 + 2 * ts, work);
				sink.exit_region(&mut location, 61 + 2 * ts, work);
			}
			sink.exit_region(&mut location, 200, r);
			sink.exit_rewind_point(&mut location, 200, r, true);
		});

		assert!(logs.contains(Level::WARN, "consider increasing SCOREP_TOTAL_MEMORY"));
		assert!(logs.contains(Level::WARN, "no rewind point for region"));
		assert_eq!(location.rewind_depth(), 0);
		assert!(location.location().flush_epoch() >= 1);

		finish(session, vec![&mut location]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		let events = records(&reader, 0);
		assert!(events.iter().any(|(_, record)| matches!(record, EventRecord::BufferFlush { .. })));
		assert!(!events.iter().any(|(_, record)| matches!(record, EventRecord::MeasurementOnOff {
			mode: MeasurementMode::Off
		})));
		assert_eq!(events.last().map(|(ts, _)| *ts), Some(200));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_concurrent_locations_write_their_own_streams() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let substrate = &harness.substrate;

		let r = region(session, "parallel");
		let mut first = session.on_location_creation(LocationType::CpuThread, None);
		let mut second = session.on_location_creation(LocationType::CpuThread, Some(&first));
		assert_eq!(second.location().parent(), Some(0));

		thread::scope(|scope| {
			for location in [&mut first, &mut second] {
				scope.spawn(move || {
					let sink = substrate.callbacks(RecordingMode::Enabled);
					for round in 0..100u64 {
						sink.enter_region(location, 100 + round, r);
						sink.exit_region(location, 100 + round, r);
					}
				});
			}
		});

		finish(session, vec![&mut first, &mut second]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		assert_eq!(reader.event_locations().unwrap(), vec![0, 1 << 32]);
		for location in [0, 1 << 32] {
			let events = records(&reader, location);
			assert_eq!(events.len(), 200);
			assert_eq!(events[0], (100, EventRecord::Enter {
				region: r.0
			}));
		}
		Ok(())
	})
	.unwrap();
}
