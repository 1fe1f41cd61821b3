// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

use std::path::PathBuf;

use sj_storage::FileJobStore;

use crate::config::Config;
use crate::output::OutputFormat;

pub mod cancel;
pub mod list;
pub mod parse;
pub mod run;
pub mod show;

/// Resolved environment shared by every command.
pub struct Context {
    pub state_dir: PathBuf,
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    pub fn store(&self) -> FileJobStore {
        FileJobStore::new(self.state_dir.join("jobs"))
    }
}
