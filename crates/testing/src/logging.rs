// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Captures `tracing` events emitted on the current thread.

use std::{collections::BTreeMap, fmt, sync::Arc};

use parking_lot::Mutex;
use tracing::{
	Event, Level, Subscriber,
	field::{Field, Visit},
};
use tracing_subscriber::{
	Layer,
	layer::{Context, SubscriberExt},
	registry,
};

#[derive(Debug, Clone)]
pub struct CapturedEvent {
	pub level: Level,
	pub target: String,
	pub message: String,
	pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct LogCapture {
	events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
	pub fn events(&self) -> Vec<CapturedEvent> {
		self.events.lock().clone()
	}

	pub fn at(&self, level: Level) -> Vec<CapturedEvent> {
		self.events.lock().iter().filter(|event| event.level == level).cloned().collect()
	}

	pub fn warnings(&self) -> Vec<CapturedEvent> {
		self.at(Level::WARN)
	}

	/// Whether any event of `level` has a message containing `needle`.
	pub fn contains(&self, level: Level, needle: &str) -> bool {
		self.events.lock().iter().any(|event| event.level == level && event.message.contains(needle))
	}
}

struct CaptureLayer {
	capture: LogCapture,
}

#[derive(Default)]
struct FieldVisitor {
	message: String,
	fields: BTreeMap<String, String>,
}

impl Visit for FieldVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "message" {
			self.message = value.to_string();
		} else {
			self.fields.insert(field.name().to_string(), value.to_string());
		}
	}

	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		if field.name() == "message" {
			self.message = format!("{value:?}");
		} else {
			self.fields.insert(field.name().to_string(), format!("{value:?}"));
		}
	}
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let mut visitor = FieldVisitor::default();
		event.record(&mut visitor);

		self.capture.events.lock().push(CapturedEvent {
			level: *event.metadata().level(),
			target: event.metadata().target().to_string(),
			message: visitor.message,
			fields: visitor.fields,
		});
	}
}

/// Runs `f` with a subscriber that records every event of this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, LogCapture) {
	let capture = LogCapture::default();
	let subscriber = registry().with(CaptureLayer {
		capture: capture.clone(),
	});
	let result = tracing::subscriber::with_default(subscriber, f);
	(result, capture)
}

#[cfg(test)]
mod tests {
	use tracing::{info, warn};

	use super::*;

	#[test]
	fn test_captures_message_and_fields() {
		let (_, capture) = capture_logs(|| {
			info!(location = 3, "hello");
			warn!("careful");
		});

		let events = capture.events();
		assert_eq!(events.len(), 2);
		assert_eq!(events[0].message, "hello");
		assert_eq!(events[0].fields.get("location").map(String::as_str), Some("3"));
		assert!(capture.contains(Level::WARN, "care"));
		assert_eq!(capture.warnings().len(), 1);
	}
}
