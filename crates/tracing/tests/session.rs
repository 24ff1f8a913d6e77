// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use std::sync::Arc;

use common::{config, finish, records, region, start};
use parking_lot::Mutex;
use scorep_archive::{self as archive, EventRecord, MeasurementMode, MetricValue, TraceReader};
use scorep_testing::{capture_logs, temp_dir};
use scorep_tracing::{FlushInterval, FlushObserver, RecordingMode, TraceError, TraceSession};
use scorep_type::{AttributeType, AttributeValue, CommunicatorHandle, LocationType, MetricValueType, ParameterType, TaskId};
use tracing::Level;

#[derive(Default)]
struct Intervals(Mutex<Vec<FlushInterval>>);

impl FlushObserver for Intervals {
	fn on_flush(&self, interval: FlushInterval) {
		self.0.lock().push(interval);
	}
}

#[test]
fn test_lifecycle_errors() {
	temp_dir(|dir| {
		let session = TraceSession::builder(config(dir)).build();
		assert!(matches!(session.finalize(), Err(TraceError::NotInitialized)));
		assert!(matches!(session.lock_archive(), Err(TraceError::NotInitialized)));

		session.initialize().unwrap();
		assert!(session.is_initialized());
		assert!(matches!(session.initialize(), Err(TraceError::AlreadyInitialized)));

		session.on_mpp_init().unwrap();
		let unified = session.unify_locally();
		assert!(matches!(session.write_definitions(&unified), Err(TraceError::EventWritersOpen)));

		session.finalize_event_writers(Vec::new()).unwrap();
		session.write_definitions(&unified).unwrap();
		session.finalize().unwrap();

		assert!(matches!(session.finalize(), Err(TraceError::AlreadyFinalized)));
		assert!(matches!(session.initialize(), Err(TraceError::AlreadyFinalized)));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_invalid_config_is_rejected() {
	temp_dir(|dir| {
		let session = TraceSession::builder(config(dir).chunk_size(1024).total_memory(512)).build();
		assert!(matches!(session.initialize(), Err(TraceError::InvalidConfig(_))));
		assert!(!session.is_initialized());
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_disabled_recording_only_resumes() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let enabled = harness.substrate.callbacks(RecordingMode::Enabled);
		let disabled = harness.substrate.callbacks(RecordingMode::Disabled);

		let r = region(session, "main");
		let mut location = session.on_location_creation(LocationType::CpuThread, None);

		enabled.enter_region(&mut location, 1, r);
		enabled.disable_recording(&mut location, 2);
		disabled.enter_region(&mut location, 3, r);
		disabled.exit_region(&mut location, 4, r);
		disabled.disable_recording(&mut location, 5);
		disabled.enable_recording(&mut location, 6);
		enabled.exit_region(&mut location, 7, r);

		finish(session, vec![&mut location]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		assert_eq!(records(&reader, 0), vec![
			(1, EventRecord::Enter {
				region: r.0
			}),
			(2, EventRecord::MeasurementOnOff {
				mode: MeasurementMode::Off
			}),
			(6, EventRecord::MeasurementOnOff {
				mode: MeasurementMode::On
			}),
			(7, EventRecord::Leave {
				region: r.0
			}),
		]);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_flush_observers_see_intermediate_flushes() {
	temp_dir(|dir| {
		let harness = start(config(dir).chunk_size(64).total_memory(64));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let intervals = Arc::new(Intervals::default());
		session.register_flush_observer(intervals.clone());
		assert_eq!(session.observers().len(), 1);

		let r = region(session, "work");
		let mut location = session.on_location_creation(LocationType::CpuThread, None);

		let (_, logs) = capture_logs(|| {
			for ts in 0..20u64 {
				sink.enter_region(&mut location, ts * 2, r);
				sink.exit_region(&mut location, ts * 2 + 1, r);
			}
		});
		assert!(logs.contains(Level::WARN, "SCOREP_TOTAL_MEMORY"));

		let seen = intervals.0.lock().clone();
		assert!(!seen.is_empty());
		assert!(seen.iter().all(|interval| interval.location == 0 && interval.begin <= interval.end));
		assert_eq!(location.location().flush_epoch(), seen.len() as u64);

		finish(session, vec![&mut location]);
		assert_eq!(intervals.0.lock().len(), seen.len());
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_metrics_are_typed_by_sampling_set() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let (set, counter) = {
			let mut definitions = session.definitions_mut();
			let cycles = definitions.new_metric("cycles", "", "#", MetricValueType::Uint64);
			let delta = definitions.new_metric("delta", "", "#", MetricValueType::Int64);
			let power = definitions.new_metric("power", "", "W", MetricValueType::Double);
			let set = definitions.new_sampling_set(vec![cycles, delta, power]);
			let counter = definitions.new_sampling_set(vec![power]);
			(set, counter)
		};
		let mut location = session.on_location_creation(LocationType::CpuThread, None);

		let (_, logs) = capture_logs(|| {
			sink.write_metrics(&mut location, 1, set, &[7, (-3i64) as u64, 1.5f64.to_bits()]);
			sink.write_metrics(&mut location, 2, set, &[1, 2]);
			sink.trigger_counter_double(&mut location, 3, counter, 0.25);
		});
		assert!(logs.contains(Level::WARN, "metric value count does not match"));

		finish(session, vec![&mut location]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		assert_eq!(records(&reader, 0), vec![
			(1, EventRecord::Metric {
				metric: set.0,
				values: vec![MetricValue::Uint64(7), MetricValue::Int64(-3), MetricValue::Double(1.5)],
			}),
			(3, EventRecord::Metric {
				metric: counter.0,
				values: vec![MetricValue::Double(0.25)],
			}),
		]);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_parameters_define_their_strings() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let (size, mode) = {
			let mut definitions = session.definitions_mut();
			(definitions.new_parameter("size", ParameterType::Int64), definitions.new_parameter("mode", ParameterType::String))
		};
		let mut location = session.on_location_creation(LocationType::CpuThread, None);

		sink.trigger_parameter_int64(&mut location, 1, size, -8);
		sink.trigger_parameter_string(&mut location, 2, mode, "fast");
		finish(session, vec![&mut location]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		let events = records(&reader, 0);
		assert_eq!(events[0], (1, EventRecord::ParameterInt {
			parameter: size.0,
			value: -8,
		}));
		let EventRecord::ParameterString {
			parameter,
			string,
		} = events[1].1.clone()
		else {
			panic!("expected a string parameter, got {:?}", events[1]);
		};
		assert_eq!(parameter, mode.0);

		let global = reader.global_definitions().unwrap();
		assert!(global.contains(&archive::DefRecord::String {
			id: string,
			value: "fast".to_string(),
		}));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_attributes_attach_to_the_next_event_only() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let task_region = region(session, "task");
		let attribute = session.definitions_mut().new_attribute("bytes", "payload size", AttributeType::Uint64);
		let team = CommunicatorHandle(0);
		let task = TaskId::new(0, 1);
		let mut location = session.on_location_creation(LocationType::CpuThread, None);

		sink.add_attribute(&mut location, attribute, AttributeValue::Uint64(4096));
		sink.thread_task_begin(&mut location, 10, task_region, team, task);
		sink.thread_task_complete(&mut location, 20, task_region, team, task);
		finish(session, vec![&mut location]);

		let reader = TraceReader::open(dir, "traces").unwrap();
		let events = reader.events(0).unwrap();
		assert_eq!(events.len(), 4);
		assert_eq!(events[0].attributes, vec![archive::Attribute {
			attribute: attribute.0,
			value: archive::AttributeValue::Uint64(4096),
		}]);
		assert!(events[1..].iter().all(|event| event.attributes.is_empty()));
		assert!(matches!(events[1].record, EventRecord::ThreadTaskSwitch { .. }));
		assert!(matches!(events[3].record, EventRecord::ThreadTaskComplete { .. }));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_pages_return_to_the_pool() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let sink = harness.substrate.callbacks(RecordingMode::Enabled);

		let r = region(session, "main");
		let mut location = session.on_location_creation(LocationType::CpuThread, None);
		sink.enter_region(&mut location, 1, r);
		assert!(session.pool_stats().in_use > 0);
		sink.exit_region(&mut location, 2, r);

		finish(session, vec![&mut location]);
		assert_eq!(session.pool_stats().in_use, 0);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_unknown_location_lookup() {
	temp_dir(|dir| {
		let harness = start(config(dir));
		let session = &harness.session;
		let location = session.on_location_creation(LocationType::CpuThread, None);

		assert_eq!(session.location(0).unwrap().local_id(), location.local_id());
		assert!(matches!(session.location(7), Err(TraceError::UnknownLocation(7))));
		assert_eq!(session.rank(), Some(0));
		Ok(())
	})
	.unwrap();
}
