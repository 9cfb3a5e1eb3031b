// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for access-control primitives.

use thiserror::Error;

use crate::types::{ActorKind, Role};

/// Raised by every throwing access check.
///
/// The message is supplied by the caller at the check site. Denials caused by
/// a missing actor and denials caused by a missing grant are indistinguishable
/// through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access denied: {message}")]
pub struct AccessDenied {
	message: String,
}

impl AccessDenied {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// The caller-supplied denial message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// A string that does not name any permission in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission token: {0:?}")]
pub struct UnknownPermission(pub String);

/// A string that does not name any role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

/// Actor creation rejected by kind-specific validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
	#[error("user id must be a positive integer, got {0}")]
	InvalidId(i64),

	#[error("role {role} is not valid for a {kind} actor")]
	InvalidRoleForKind { kind: ActorKind, role: Role },
}

/// Errors raised while assembling a [`crate::RolePermissionMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
	#[error("role {0} has no entry in the permission matrix")]
	MissingRole(Role),
}
