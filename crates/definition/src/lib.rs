// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Per-process definition manager.
//!
//! Every definition kind lives in its own [`DefinitionTable`], addressed by
//! the typed handles of `scorep-type`. A definition can only reference
//! handles that already exist, so iterating the kinds in
//! [`DefinitionKind::WRITE_ORDER`] and each table in creation order never
//! yields a forward reference.
//!
//! [`unify`] merges the managers of all processes into one global numbering
//! and produces the per-process [`IdMappings`].

mod def;
mod error;
mod kind;
mod manager;
mod mapping;
mod property;
mod table;
mod unify;

pub use def::{
	AttributeDef, CallpathDef, CommunicatorDef, GroupDef, LocationDef, LocationGroupDef, LocationPropertyDef,
	MetricDef, ParameterDef, RegionDef, RmaWindowDef, SamplingSetDef, StringDef, SystemTreeNodeDef,
};
pub use error::DefinitionError;
pub use kind::DefinitionKind;
pub use manager::DefinitionManager;
pub use mapping::{IdMap, IdMappings, Remap};
pub use property::PropertyTable;
pub use table::DefinitionTable;
pub use unify::{Unified, unify};

pub type Result<T> = std::result::Result<T, DefinitionError>;
