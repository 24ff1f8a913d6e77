// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod logging;
mod tempdir;

pub use logging::{CapturedEvent, LogCapture, capture_logs};
pub use tempdir::temp_dir;
