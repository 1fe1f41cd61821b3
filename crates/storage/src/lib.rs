// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-storage: the persistent job store the supervisor reads and mutates

mod error;
mod file;
mod memory;
mod store;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use error::StoreError;
pub use file::{FileJobStore, StoredJob, CURRENT_RECORD_VERSION};
pub use memory::MemoryJobStore;
pub use store::JobStore;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobStore, StoreCall};
