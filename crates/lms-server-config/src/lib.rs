// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the LMS server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Validated access overrides applied on top of the reference permission matrix
//! - Consistent environment variable naming (`LMS_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use lms_server_config::load_config;
//!
//! let config = load_config()?;
//! let matrix = config.access.build_matrix();
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
	pub access: AccessConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`LMS_SERVER_*`)
/// 2. Config file (`/etc/lms/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge sources in precedence order and finalize.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let database = layer.database.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let access = layer.access.unwrap_or_default().finalize()?;

	access.validate()?;

	info!(
		database = %database.url,
		log_level = %logging.level,
		superuser_roles = access.superuser_roles.len(),
		extra_grant_roles = access.extra_grants.len(),
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		database,
		logging,
		access,
	})
}
