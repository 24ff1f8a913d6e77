// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use scorep_archive::{self as archive, Attribute, EventRecord, MetricValue};
use scorep_type::{AttributeHandle, AttributeValue, MetricValueType, ParameterHandle, SamplingSetHandle};
use tracing::warn;

use super::Recorder;
use crate::convert;

impl Recorder<'_> {
	/// Value types of a sampling set, cached per location.
	fn metric_types(&mut self, sampling_set: SamplingSetHandle) -> Option<Arc<[MetricValueType]>> {
		if let Some(types) = self.location.data.metric_types.get(&sampling_set) {
			return Some(types.clone());
		}

		match self.session.definitions().sampling_set_value_types(sampling_set) {
			Ok(types) => {
				let types: Arc<[MetricValueType]> = types.into();
				self.location.data.metric_types.insert(sampling_set, types.clone());
				Some(types)
			}
			Err(err) => {
				warn!(location = self.location.local_id(), "dropping metric event: {err}");
				None
			}
		}
	}

	/// Writes untagged metric values, typed by the sampling set's definition.
	pub fn write_metrics(&mut self, timestamp: u64, sampling_set: SamplingSetHandle, values: &[u64]) {
		let Some(types) = self.metric_types(sampling_set) else {
			return;
		};
		if types.len() != values.len() {
			warn!(
				location = self.location.local_id(),
				sampling_set = sampling_set.0,
				expected = types.len(),
				actual = values.len(),
				"metric value count does not match the sampling set"
			);
			return;
		}

		let values = types.iter().zip(values).map(|(kind, raw)| convert::metric_value(*kind, *raw)).collect();
		self.write(timestamp, EventRecord::Metric {
			metric: sampling_set.0,
			values,
		});
	}

	pub fn trigger_counter_int64(&mut self, timestamp: u64, sampling_set: SamplingSetHandle, value: i64) {
		self.write(timestamp, EventRecord::Metric {
			metric: sampling_set.0,
			values: vec![MetricValue::Int64(value)],
		});
	}

	pub fn trigger_counter_uint64(&mut self, timestamp: u64, sampling_set: SamplingSetHandle, value: u64) {
		self.write(timestamp, EventRecord::Metric {
			metric: sampling_set.0,
			values: vec![MetricValue::Uint64(value)],
		});
	}

	pub fn trigger_counter_double(&mut self, timestamp: u64, sampling_set: SamplingSetHandle, value: f64) {
		self.write(timestamp, EventRecord::Metric {
			metric: sampling_set.0,
			values: vec![MetricValue::Double(value)],
		});
	}

	pub fn trigger_parameter_int64(&mut self, timestamp: u64, parameter: ParameterHandle, value: i64) {
		self.write(timestamp, EventRecord::ParameterInt {
			parameter: parameter.0,
			value,
		});
	}

	pub fn trigger_parameter_uint64(&mut self, timestamp: u64, parameter: ParameterHandle, value: u64) {
		self.write(timestamp, EventRecord::ParameterUnsignedInt {
			parameter: parameter.0,
			value,
		});
	}

	/// The string value is defined before the event referencing it.
	pub fn trigger_parameter_string(&mut self, timestamp: u64, parameter: ParameterHandle, value: &str) {
		let string = self.session.definitions_mut().new_string(value);
		self.write(timestamp, EventRecord::ParameterString {
			parameter: parameter.0,
			string: string.0,
		});
	}

	/// Attaches an attribute to the next event of the location.
	pub fn add_attribute(&mut self, attribute: AttributeHandle, value: AttributeValue) {
		let value = match value {
			AttributeValue::Int8(value) => archive::AttributeValue::Int8(value),
			AttributeValue::Int16(value) => archive::AttributeValue::Int16(value),
			AttributeValue::Int32(value) => archive::AttributeValue::Int32(value),
			AttributeValue::Int64(value) => archive::AttributeValue::Int64(value),
			AttributeValue::Uint8(value) => archive::AttributeValue::Uint8(value),
			AttributeValue::Uint16(value) => archive::AttributeValue::Uint16(value),
			AttributeValue::Uint32(value) => archive::AttributeValue::Uint32(value),
			AttributeValue::Uint64(value) => archive::AttributeValue::Uint64(value),
			AttributeValue::Float(value) => archive::AttributeValue::Float(value),
			AttributeValue::Double(value) => archive::AttributeValue::Double(value),
			AttributeValue::String(handle) => archive::AttributeValue::String(handle.0),
			AttributeValue::Location(handle) => {
				let global_id = self.session.definitions().locations().get(handle).and_then(|def| def.global_id);
				archive::AttributeValue::Location(convert::location_reference(global_id))
			}
			AttributeValue::Region(handle) => archive::AttributeValue::Region(handle.0),
			AttributeValue::Group(handle) => archive::AttributeValue::Group(handle.0),
			AttributeValue::Communicator(handle) => archive::AttributeValue::Comm(handle.0),
			AttributeValue::RmaWindow(handle) => archive::AttributeValue::RmaWin(handle.0),
			AttributeValue::Parameter(handle) => archive::AttributeValue::Parameter(handle.0),
			AttributeValue::Callpath(handle) => archive::AttributeValue::Callpath(handle.0),
		};
		self.location.data.attributes.push(Attribute {
			attribute: attribute.0,
			value,
		});
	}
}
