// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Tracing substrate of the measurement system.
//!
//! A [`TraceSession`] owns the trace archive of one process. Every
//! execution location gets a [`TracingLocation`] holding its event writer,
//! pending attributes and rewind stack; events reach it through the
//! [`EventSink`] selected for the current [`RecordingMode`].
//!
//! Event buffers draw chunks from a bounded page pool ([`ChunkAllocator`]).
//! When no chunk is left the buffer is flushed mid-run: the
//! [`FlushController`] resolves the location's global id, invalidates its
//! rewind points and records the unrecorded interval.
//!
//! At the end of the measurement the lifecycle is
//! [`TraceSession::finalize_event_writers`], unification,
//! [`TraceSession::write_definitions`], [`TraceSession::write_properties`]
//! and [`TraceSession::finalize`].

mod chunk;
mod clock;
mod config;
mod convert;
mod definition;
mod error;
mod event;
mod flush;
mod location;
mod rewind;
mod session;
mod substrate;

pub use chunk::{ChunkAllocator, ChunkArena, PagePool, PoolStats};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{DEFAULT_CHUNK_SIZE, DEFAULT_PROCS_PER_FILE, DEFAULT_TOTAL_MEMORY, TracingConfig};
pub use definition::{ClockOffset, DefinitionStats, write_clock_offsets, write_definitions, write_mappings};
pub use error::{TraceError, fatal};
pub use event::{Recorder, rma_rewind_paradigm};
pub use flush::{FlushController, FlushInterval, FlushObserver, Registry};
pub use location::{FlushPhase, Location, LocationRegistry, TracingLocation};
pub use rewind::{RewindFrame, RewindStack, Unwound};
pub use session::{TraceSession, TraceSessionBuilder, UnifiedDefinitions};
pub use substrate::{EventSink, RecordingDisabled, RecordingEnabled, RecordingMode, TracingSubstrate};

pub type Result<T> = std::result::Result<T, TraceError>;
