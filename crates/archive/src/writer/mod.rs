// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod definition;
mod event;

pub use definition::DefWriter;
pub use event::EvtWriter;
