// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer merged across sources.

use serde::Deserialize;

use crate::sections::{AccessConfigLayer, DatabaseConfigLayer, LoggingConfigLayer};

/// One source's view of the configuration. Unset sections stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub access: Option<AccessConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge `other` on top of `self`; values set in `other` win.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
		merge_section(&mut self.access, other.access, AccessConfigLayer::merge);
	}
}

fn merge_section<T>(current: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	let Some(other) = other else {
		return;
	};
	match current {
		Some(current) => merge(current, other),
		None => *current = Some(other),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn later_layer_overrides_set_values_only() {
		let mut base = ServerConfigLayer {
			database: Some(DatabaseConfigLayer {
				url: Some("sqlite:./base.db".to_string()),
			}),
			logging: Some(LoggingConfigLayer {
				level: Some("debug".to_string()),
				json: Some(true),
			}),
			access: None,
		};

		base.merge(ServerConfigLayer {
			database: Some(DatabaseConfigLayer {
				url: Some("sqlite:./override.db".to_string()),
			}),
			logging: Some(LoggingConfigLayer {
				level: None,
				json: None,
			}),
			access: None,
		});

		assert_eq!(
			base.database.and_then(|d| d.url).as_deref(),
			Some("sqlite:./override.db")
		);
		let logging = base.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("debug"));
		assert_eq!(logging.json, Some(true));
	}

	#[test]
	fn missing_section_is_filled_from_later_layer() {
		let mut base = ServerConfigLayer::default();
		base.merge(ServerConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("warn".to_string()),
				json: None,
			}),
			..Default::default()
		});
		assert!(base.logging.is_some());
		assert!(base.database.is_none());
	}
}
