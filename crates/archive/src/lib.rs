// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Directory based trace container.
//!
//! An archive consists of one JSON anchor, one global definition stream,
//! optional per-location local definition streams and one event stream per
//! location. Streams are sequences of blocks; each block holds the
//! length-prefixed, postcard encoded records of one buffer flush and may be
//! zstd compressed.
//!
//! The container owns no memory policy of its own: event buffers are built
//! from chunks handed out by [`MemoryCallbacks`], and every buffer flush is
//! bracketed by [`FlushCallbacks`].

mod archive;
mod callback;
mod chunk;
mod config;
mod error;
mod reader;
mod record;
mod storage;
mod writer;

pub use archive::{Anchor, Archive};
pub use callback::{
	BufferSlot, Collectives, FlushCallbacks, FlushContext, MemoryCallbacks, PreFlush, SerialCollectives, UserData,
};
pub use chunk::Chunk;
pub use config::{ArchiveConfig, Compression, FileSubstrate, FileType};
pub use error::ArchiveError;
pub use reader::TraceReader;
pub use record::{
	Attribute, AttributeKind, AttributeValue, CollectiveOp, DefKind, DefRecord, Event, EventRecord, GroupKind,
	LocationGroupKind, LocationKind, LockType, MeasurementMode, MetricValue, ParameterKind, Paradigm, RegionRole,
	RmaAtomicType, RmaSyncLevel, RmaSyncType, ValueType,
};
pub use writer::{DefWriter, EvtWriter};

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Reference value meaning "no definition".
pub const UNDEFINED_U32: u32 = u32::MAX;

/// Location id value meaning "not yet assigned".
pub const UNDEFINED_U64: u64 = u64::MAX;
