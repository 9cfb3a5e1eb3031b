// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access-control configuration: deployment overrides on top of the
//! reference permission matrix.
//!
//! ```toml
//! [access]
//! superuser_roles = ["StaffManagement"]
//!
//! [access.extra_grants]
//! StaffMinor = ["Process.GetAllUsers"]
//! ```

use std::collections::{BTreeMap, BTreeSet};

use lms_access_core::{Permission, Role, RolePermissionMatrix};
use serde::Deserialize;

use crate::error::ConfigError;

/// Access configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessConfig {
	/// Roles granted the `All` override.
	pub superuser_roles: BTreeSet<Role>,
	/// Grants added to a role on top of the reference matrix.
	pub extra_grants: BTreeMap<Role, BTreeSet<Permission>>,
}

impl AccessConfig {
	/// Builds the reference matrix with this configuration's additions.
	pub fn build_matrix(&self) -> RolePermissionMatrix {
		let mut matrix = RolePermissionMatrix::reference();
		for role in &self.superuser_roles {
			matrix = matrix.with_additional_grants(*role, [Permission::All]);
		}
		for (role, grants) in &self.extra_grants {
			matrix = matrix.with_additional_grants(*role, grants.iter().copied());
		}
		matrix
	}

	/// Returns true if no override is configured.
	pub fn is_reference(&self) -> bool {
		self.superuser_roles.is_empty() && self.extra_grants.values().all(BTreeSet::is_empty)
	}

	/// The unauthenticated role must never receive the universal override.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let grants_all_to_none = self.superuser_roles.contains(&Role::None)
			|| self
				.extra_grants
				.get(&Role::None)
				.is_some_and(|grants| grants.contains(&Permission::All));

		if grants_all_to_none {
			return Err(ConfigError::Validation(
				"the All permission cannot be granted to role None; \
				 unauthenticated requests would bypass every check"
					.to_string(),
			));
		}

		Ok(())
	}
}

/// Access configuration layer (partial, for merging).
///
/// Roles and permissions are kept as strings until [`Self::finalize`] so that
/// unknown names are reported with the offending key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfigLayer {
	#[serde(default)]
	pub superuser_roles: Option<Vec<String>>,
	#[serde(default)]
	pub extra_grants: Option<BTreeMap<String, Vec<String>>>,
}

impl AccessConfigLayer {
	pub fn merge(&mut self, other: AccessConfigLayer) {
		if other.superuser_roles.is_some() {
			self.superuser_roles = other.superuser_roles;
		}
		if let Some(other_grants) = other.extra_grants {
			self
				.extra_grants
				.get_or_insert_with(BTreeMap::new)
				.extend(other_grants);
		}
	}

	pub fn finalize(self) -> Result<AccessConfig, ConfigError> {
		let superuser_roles = self
			.superuser_roles
			.unwrap_or_default()
			.iter()
			.map(|name| parse_role("access.superuser_roles", name))
			.collect::<Result<BTreeSet<_>, _>>()?;

		let mut extra_grants = BTreeMap::new();
		for (role_name, tokens) in self.extra_grants.unwrap_or_default() {
			let key = format!("access.extra_grants.{role_name}");
			let role = parse_role(&key, &role_name)?;
			let grants = tokens
				.iter()
				.map(|token| {
					token
						.parse::<Permission>()
						.map_err(|e| ConfigError::InvalidValue {
							key: key.clone(),
							message: e.to_string(),
						})
				})
				.collect::<Result<BTreeSet<_>, _>>()?;
			extra_grants
				.entry(role)
				.or_insert_with(BTreeSet::new)
				.extend(grants);
		}

		Ok(AccessConfig {
			superuser_roles,
			extra_grants,
		})
	}
}

fn parse_role(key: &str, name: &str) -> Result<Role, ConfigError> {
	name.trim().parse().map_err(|e: lms_access_core::UnknownRole| {
		ConfigError::InvalidValue {
			key: key.to_string(),
			message: e.to_string(),
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_reference_matrix() {
		let config = AccessConfigLayer::default().finalize().unwrap();
		assert!(config.is_reference());
		assert_eq!(config.build_matrix(), RolePermissionMatrix::reference());
	}

	#[test]
	fn test_superuser_roles_receive_all() {
		let layer = AccessConfigLayer {
			superuser_roles: Some(vec!["StaffManagement".to_string()]),
			extra_grants: None,
		};
		let matrix = layer.finalize().unwrap().build_matrix();
		assert!(matrix.role_has(Role::StaffManagement, Permission::All));
		assert!(!matrix.role_has(Role::StaffMinor, Permission::All));
	}

	#[test]
	fn test_extra_grants_extend_reference() {
		let layer = AccessConfigLayer {
			superuser_roles: None,
			extra_grants: Some(BTreeMap::from([(
				"StaffMinor".to_string(),
				vec!["Process.GetAllUsers".to_string()],
			)])),
		};
		let matrix = layer.finalize().unwrap().build_matrix();
		assert!(matrix.role_has(Role::StaffMinor, Permission::ProcessGetAllUsers));
		assert!(matrix.role_has(Role::StaffMinor, Permission::ProcessBorrowBook));
	}

	#[test]
	fn test_unknown_role_is_rejected() {
		let layer = AccessConfigLayer {
			superuser_roles: Some(vec!["Librarian".to_string()]),
			extra_grants: None,
		};
		let err = layer.finalize().unwrap_err();
		assert!(err.to_string().contains("access.superuser_roles"), "got: {err}");
		assert!(err.to_string().contains("Librarian"), "got: {err}");
	}

	#[test]
	fn test_unknown_permission_is_rejected() {
		let layer = AccessConfigLayer {
			superuser_roles: None,
			extra_grants: Some(BTreeMap::from([(
				"Member".to_string(),
				vec!["self.borrowbook".to_string()],
			)])),
		};
		let err = layer.finalize().unwrap_err();
		assert!(
			err.to_string().contains("access.extra_grants.Member"),
			"got: {err}"
		);
	}

	#[test]
	fn test_all_for_none_role_fails_validation() {
		let config = AccessConfig {
			superuser_roles: BTreeSet::from([Role::None]),
			extra_grants: BTreeMap::new(),
		};
		assert!(config.validate().is_err());

		let config = AccessConfig {
			superuser_roles: BTreeSet::new(),
			extra_grants: BTreeMap::from([(Role::None, BTreeSet::from([Permission::All]))]),
		};
		assert!(config.validate().is_err());

		let config = AccessConfig {
			superuser_roles: BTreeSet::from([Role::StaffManagement]),
			extra_grants: BTreeMap::new(),
		};
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_merge_combines_extra_grants_per_role() {
		let mut layer = AccessConfigLayer {
			superuser_roles: Some(vec!["StaffManagement".to_string()]),
			extra_grants: Some(BTreeMap::from([(
				"Member".to_string(),
				vec!["HandleLogout".to_string()],
			)])),
		};
		layer.merge(AccessConfigLayer {
			superuser_roles: None,
			extra_grants: Some(BTreeMap::from([(
				"StaffMinor".to_string(),
				vec!["Process.UpdateUser".to_string()],
			)])),
		});

		let config = layer.finalize().unwrap();
		assert_eq!(config.superuser_roles, BTreeSet::from([Role::StaffManagement]));
		assert_eq!(config.extra_grants.len(), 2);
	}

	#[test]
	fn test_keys_naming_the_same_role_are_combined() {
		let layer: AccessConfigLayer = toml::from_str(
			r#"
[extra_grants]
" Member" = ["Process.GetAllUsers"]
"Member" = ["Process.CreateBook"]
"#,
		)
		.unwrap();

		let config = layer.finalize().unwrap();
		assert_eq!(config.extra_grants.len(), 1);

		let matrix = config.build_matrix();
		assert!(matrix.role_has(Role::Member, Permission::ProcessGetAllUsers));
		assert!(matrix.role_has(Role::Member, Permission::ProcessCreateBook));
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		fn authenticated_roles() -> impl Strategy<Value = Vec<Role>> {
			prop::sample::subsequence(
				vec![Role::Member, Role::StaffMinor, Role::StaffManagement],
				0..=3,
			)
		}

		proptest! {
			#[test]
			fn overrides_only_add_grants(roles in authenticated_roles()) {
				let layer = AccessConfigLayer {
					superuser_roles: Some(roles.iter().map(|r| r.as_str().to_string()).collect()),
					extra_grants: None,
				};
				let config = layer.finalize().unwrap();
				prop_assert!(config.validate().is_ok());

				let matrix = config.build_matrix();
				let reference = RolePermissionMatrix::reference();
				for role in Role::all() {
					prop_assert!(reference.grants_for(*role).is_subset(matrix.grants_for(*role)));
					prop_assert_eq!(
						matrix.role_has(*role, Permission::All),
						roles.contains(role)
					);
				}
			}
		}
	}
}
