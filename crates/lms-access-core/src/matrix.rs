// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The role → permission matrix.
//!
//! A [`RolePermissionMatrix`] is built once and read-only afterwards. It is
//! total over [`Role`]: construction fails if any role lacks an entry, so
//! lookups never have to handle a missing role.

use std::collections::BTreeSet;

use crate::error::MatrixError;
use crate::permission::Permission;
use crate::types::{Actor, Role};

/// The set of permissions granted to a role.
pub type PermissionSet = BTreeSet<Permission>;

/// Immutable mapping from every [`Role`] to its granted permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionMatrix {
	grants: [PermissionSet; Role::COUNT],
}

impl RolePermissionMatrix {
	/// The reference grants of the library system.
	///
	/// Each role is enumerated independently; nothing is inherited between
	/// roles even where sets overlap. No role holds [`Permission::All`].
	pub fn reference() -> Self {
		use Permission::*;

		let none = [HandleGetAllBooks, HandleGetBookById, Public];

		let member = [
			HandleGetAllBooks,
			HandleGetBookById,
			SelfGetUserById,
			SelfUpdateUser,
			SelfBorrowBook,
			SelfReturnBook,
			SelfGetBorrowedBooks,
		];

		let staff_minor = [
			HandleGetAllBooks,
			HandleGetBookById,
			SelfGetUserById,
			SelfUpdateUser,
			ProcessUpdateBook,
			ProcessCreateBook,
			ProcessDeleteBook,
			ProcessBorrowBook,
			ProcessReturnBook,
			ProcessGetBorrowedBooks,
		];

		let staff_management = [
			ProcessGetAllUsers,
			HandleGetAllBooks,
			HandleGetBookById,
			SelfGetUserById,
			SelfUpdateUser,
			ProcessUpdateUser,
			ProcessCreateUser,
			ProcessDeleteUser,
			ProcessCreateBook,
			ProcessUpdateBook,
			ProcessBorrowBook,
			ProcessDeleteBook,
			ProcessReturnBook,
			ProcessGetBorrowedBooks,
		];

		Self {
			grants: [
				none.into_iter().collect(),
				member.into_iter().collect(),
				staff_minor.into_iter().collect(),
				staff_management.into_iter().collect(),
			],
		}
	}

	/// Starts an empty builder. Every role must be given an entry before
	/// [`MatrixBuilder::build`] succeeds.
	pub fn builder() -> MatrixBuilder {
		MatrixBuilder::default()
	}

	/// Returns the permissions granted to `role`.
	pub fn grants_for(&self, role: Role) -> &PermissionSet {
		&self.grants[role.index()]
	}

	/// Returns the permissions for an optional actor. An absent actor is
	/// looked up as [`Role::None`].
	pub fn grants_for_actor(&self, actor: Option<&Actor>) -> &PermissionSet {
		self.grants_for(actor.map(|a| a.role).unwrap_or(Role::None))
	}

	/// Returns true if `role` holds `permission` verbatim. [`Permission::All`]
	/// is not expanded here; that is the decision engine's job.
	pub fn role_has(&self, role: Role, permission: Permission) -> bool {
		self.grants_for(role).contains(&permission)
	}

	/// Returns a copy of this matrix with `permissions` added to `role`.
	pub fn with_additional_grants(
		mut self,
		role: Role,
		permissions: impl IntoIterator<Item = Permission>,
	) -> Self {
		self.grants[role.index()].extend(permissions);
		self
	}

	/// Iterates `(role, grants)` in [`Role::all`] order.
	pub fn iter(&self) -> impl Iterator<Item = (Role, &PermissionSet)> + '_ {
		Role::all().iter().map(move |role| (*role, self.grants_for(*role)))
	}
}

impl Default for RolePermissionMatrix {
	fn default() -> Self {
		Self::reference()
	}
}

/// Builder for alternate matrices (tests, deployment overrides).
#[derive(Debug, Default)]
pub struct MatrixBuilder {
	grants: [Option<PermissionSet>; Role::COUNT],
}

impl MatrixBuilder {
	/// Sets the full grant set for `role`, replacing any previous entry.
	pub fn role(mut self, role: Role, permissions: impl IntoIterator<Item = Permission>) -> Self {
		self.grants[role.index()] = Some(permissions.into_iter().collect());
		self
	}

	pub fn build(self) -> Result<RolePermissionMatrix, MatrixError> {
		let [none, member, staff_minor, staff_management] = self.grants;
		Ok(RolePermissionMatrix {
			grants: [
				none.ok_or(MatrixError::MissingRole(Role::None))?,
				member.ok_or(MatrixError::MissingRole(Role::Member))?,
				staff_minor.ok_or(MatrixError::MissingRole(Role::StaffMinor))?,
				staff_management.ok_or(MatrixError::MissingRole(Role::StaffManagement))?,
			],
		})
	}
}
