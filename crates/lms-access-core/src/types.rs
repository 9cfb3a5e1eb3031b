// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity types consumed by access decisions.
//!
//! - [`UserId`]: integer identifier of a user record
//! - [`Role`]: the closed set of roles that key the permission matrix
//! - [`Actor`]: the `(id, role)` pair an access decision is evaluated against
//! - [`ActorKind`]: the record kind an actor was created as, used to validate
//!   which roles it may hold

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ActorError, UnknownRole};

// =============================================================================
// User IDs
// =============================================================================

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
	pub fn new(id: i64) -> Self {
		Self(id)
	}

	pub fn into_inner(self) -> i64 {
		self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<i64> for UserId {
	fn from(id: i64) -> Self {
		Self(id)
	}
}

impl From<UserId> for i64 {
	fn from(id: UserId) -> Self {
		id.0
	}
}

// =============================================================================
// Roles
// =============================================================================

/// Roles an actor can hold. Exactly one per actor.
///
/// The string form is the variant name, matching what the user store persists
/// in its `user_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
	/// No authenticated identity.
	None,
	/// Library member; acts on their own record only.
	Member,
	/// Front-desk staff; manages books and borrowing for others.
	StaffMinor,
	/// Management staff; additionally manages user accounts.
	StaffManagement,
}

impl Role {
	pub const COUNT: usize = 4;

	/// Returns all roles.
	pub fn all() -> &'static [Role] {
		&[
			Role::None,
			Role::Member,
			Role::StaffMinor,
			Role::StaffManagement,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::None => "None",
			Role::Member => "Member",
			Role::StaffMinor => "StaffMinor",
			Role::StaffManagement => "StaffManagement",
		}
	}

	/// Dense index used by the permission matrix.
	pub(crate) fn index(self) -> usize {
		match self {
			Role::None => 0,
			Role::Member => 1,
			Role::StaffMinor => 2,
			Role::StaffManagement => 3,
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = UnknownRole;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::all()
			.iter()
			.copied()
			.find(|role| role.as_str() == s)
			.ok_or_else(|| UnknownRole(s.to_string()))
	}
}

// =============================================================================
// Actors
// =============================================================================

/// A user identity as seen by access decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
	pub id: UserId,
	pub role: Role,
}

impl Actor {
	pub fn new(id: UserId, role: Role) -> Self {
		Self { id, role }
	}

	/// Creates an actor after checking that `role` is valid for `kind` and
	/// that the id is positive.
	pub fn for_kind(kind: ActorKind, id: i64, role: Role) -> Result<Self, ActorError> {
		if id <= 0 {
			return Err(ActorError::InvalidId(id));
		}
		kind.validate_role(role)?;
		Ok(Self::new(UserId::new(id), role))
	}

	/// Returns true if both actors refer to the same user record.
	pub fn is_same_user(&self, other: &Actor) -> bool {
		self.id == other.id
	}
}

/// The kind of user record an actor was created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
	Member,
	Staff,
}

impl ActorKind {
	/// Roles this kind of record may hold.
	pub fn allowed_roles(&self) -> &'static [Role] {
		match self {
			ActorKind::Member => &[Role::Member],
			ActorKind::Staff => &[Role::StaffMinor, Role::StaffManagement],
		}
	}

	pub fn validate_role(&self, role: Role) -> Result<(), ActorError> {
		if self.allowed_roles().contains(&role) {
			Ok(())
		} else {
			Err(ActorError::InvalidRoleForKind { kind: *self, role })
		}
	}
}

impl fmt::Display for ActorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ActorKind::Member => write!(f, "member"),
			ActorKind::Staff => write!(f, "staff"),
		}
	}
}
