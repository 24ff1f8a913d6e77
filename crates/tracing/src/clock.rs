// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::Instant,
};

/// Timestamp source of the measurement.
pub trait Clock: Send + Sync {
	fn now(&self) -> u64;
}

/// Nanoseconds since the clock was created.
#[derive(Debug)]
pub struct MonotonicClock {
	start: Instant,
}

impl Default for MonotonicClock {
	fn default() -> Self {
		Self {
			start: Instant::now(),
		}
	}
}

impl Clock for MonotonicClock {
	fn now(&self) -> u64 {
		self.start.elapsed().as_nanos() as u64
	}
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
	now: AtomicU64,
}

impl ManualClock {
	pub fn new(start: u64) -> Self {
		Self {
			now: AtomicU64::new(start),
		}
	}

	pub fn set(&self, now: u64) {
		self.now.store(now, Ordering::SeqCst);
	}

	pub fn advance(&self, delta: u64) -> u64 {
		self.now.fetch_add(delta, Ordering::SeqCst) + delta
	}
}

impl Clock for ManualClock {
	fn now(&self) -> u64 {
		self.now.load(Ordering::SeqCst)
	}
}
