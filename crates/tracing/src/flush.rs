// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use scorep_archive::{FileType, FlushCallbacks, FlushContext, PreFlush};
use tracing::{debug, warn};

use crate::{
	TraceSession,
	error::fatal,
	location::{FlushPhase, Location},
};

/// Interval during which a location could not record events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushInterval {
	pub location: u64,
	pub begin: u64,
	pub end: u64,
}

/// Notified after every intermediate buffer flush.
pub trait FlushObserver: Send + Sync {
	fn on_flush(&self, interval: FlushInterval);
}

pub struct Registry<T: Send + Sync + 'static + ?Sized> {
	observers: RwLock<Vec<Arc<T>>>,
}

impl<T: Send + Sync + 'static + ?Sized> Default for Registry<T> {
	fn default() -> Self {
		Self {
			observers: RwLock::new(Vec::new()),
		}
	}
}

impl<T: Send + Sync + 'static + ?Sized> Registry<T> {
	pub fn register(&self, observer: Arc<T>) {
		self.observers.write().push(observer);
	}

	pub fn for_each<F: Fn(&Arc<T>)>(&self, f: F) {
		for observer in self.observers.read().iter() {
			f(observer);
		}
	}

	pub fn len(&self) -> usize {
		self.observers.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.observers.read().is_empty()
	}
}

/// Flush callbacks of the trace archive.
///
/// Every writer carries its [`Location`] as user data. Before a flush the
/// location's global id is resolved, since flushed blocks are keyed by it,
/// and its flush epoch is advanced, which drops the location's open rewind
/// points on their next use.
pub struct FlushController {
	session: Weak<TraceSession>,
}

impl FlushController {
	pub(crate) fn new(session: Weak<TraceSession>) -> Self {
		Self {
			session,
		}
	}

	fn session(&self) -> Arc<TraceSession> {
		match self.session.upgrade() {
			Some(session) => session,
			None => fatal("buffer flush after the tracing session was dropped"),
		}
	}
}

fn location<'a>(context: &FlushContext<'a>) -> &'a Location {
	match context.user_data.downcast_ref::<Location>() {
		Some(location) => location,
		None => fatal("event writer without a location"),
	}
}

impl FlushCallbacks for FlushController {
	fn pre_flush(&self, context: FlushContext<'_>) -> PreFlush {
		let location = location(&context);
		location.set_phase(FlushPhase::PreFlush);

		if context.file_type == FileType::Events && !context.is_final {
			warn!(
				location = location.local_id(),
				"trace buffer flush during measurement; the flushed interval is not recorded, \
				 consider increasing SCOREP_TOTAL_MEMORY"
			);
		}

		let session = self.session();
		let global_id = match session.ensure_global_id(location) {
			Ok(global_id) => global_id,
			Err(err) => fatal(&format!("cannot resolve location id before flush: {err}")),
		};

		if !context.is_final {
			location.begin_flush(session.clock().now());
		}
		location.set_phase(FlushPhase::Flushing);
		debug!(location = global_id, is_final = context.is_final, "flushing event buffer");

		PreFlush {
			location_id: Some(global_id),
		}
	}

	fn post_flush(&self, context: FlushContext<'_>) -> u64 {
		let location = location(&context);
		location.set_phase(FlushPhase::PostFlush);

		let session = self.session();
		let end = session.clock().now();
		if !context.is_final {
			let interval = FlushInterval {
				location: context.location_id.unwrap_or_else(|| location.global_id().unwrap_or_default()),
				begin: location.flush_begin(),
				end,
			};
			session.observers().for_each(|observer| observer.on_flush(interval));
		}

		location.set_phase(FlushPhase::Normal);
		end
	}
}
