// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each section has a partial `*ConfigLayer` used
//! while merging sources and a resolved `*Config` produced by `finalize`.

mod access;
mod database;
mod logging;

pub use access::{AccessConfig, AccessConfigLayer};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
