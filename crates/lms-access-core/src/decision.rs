// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access decision evaluation.
//!
//! This module contains [`evaluate`], the single function every access check
//! in the system goes through. Boolean and throwing check APIs are thin
//! adapters over its [`Decision`]:
//!
//! - boolean shape: [`Decision::is_allowed`]
//! - throwing shape: [`Decision::into_result`]
//!
//! # Targeted checks
//!
//! When an action targets a user record, the caller supplies a
//! `(self, process)` token pair. Evaluation order:
//!
//! 1. requester and target must both be present
//! 2. a requester holding `All` is allowed
//! 3. a requester acting on themselves and holding the self token is allowed
//! 4. a requester holding the process token is allowed, whether or not the
//!    target is themselves
//!
//! Steps 3 and 4 are independent alternatives. A process grant alone covers
//! self-targeting; a self grant alone never covers another user's record.

use tracing::debug;

use crate::error::AccessDenied;
use crate::matrix::RolePermissionMatrix;
use crate::permission::Permission;
use crate::types::Actor;

/// A single access check, borrowed for the duration of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionRequest<'a> {
	/// The actor needs `permission`, with no target record involved.
	Single {
		actor: Option<&'a Actor>,
		permission: Permission,
	},
	/// The requester acts on the target's record.
	Targeted {
		requester: Option<&'a Actor>,
		target: Option<&'a Actor>,
		self_permission: Permission,
		process_permission: Permission,
	},
}

impl<'a> DecisionRequest<'a> {
	pub fn single(actor: Option<&'a Actor>, permission: Permission) -> Self {
		DecisionRequest::Single { actor, permission }
	}

	pub fn targeted(
		requester: Option<&'a Actor>,
		target: Option<&'a Actor>,
		self_permission: Permission,
		process_permission: Permission,
	) -> Self {
		DecisionRequest::Targeted {
			requester,
			target,
			self_permission,
			process_permission,
		}
	}
}

/// Why a request was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowReason {
	/// The requester holds the universal override.
	AllPermission,
	/// The actor holds the single required permission.
	Granted,
	/// The requester acts on themselves and holds the self permission.
	SelfPermission,
	/// The requester holds the process permission.
	ProcessPermission,
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
	/// Single check against an absent actor.
	ActorMissing,
	RequesterMissing,
	TargetMissing,
	/// The actor exists but holds none of the required permissions.
	NotGranted,
}

/// Outcome of [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
	Allowed(AllowReason),
	Denied(DenyReason),
}

impl Decision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allowed(_))
	}

	/// Converts a denial into [`AccessDenied`] carrying `message`. The deny
	/// reason is deliberately dropped.
	pub fn into_result(self, message: impl Into<String>) -> Result<(), AccessDenied> {
		match self {
			Decision::Allowed(_) => Ok(()),
			Decision::Denied(_) => Err(AccessDenied::new(message)),
		}
	}
}

/// Evaluates an access request against `matrix`.
///
/// Pure: no I/O, no shared state is touched beyond reading the matrix.
pub fn evaluate(matrix: &RolePermissionMatrix, request: &DecisionRequest<'_>) -> Decision {
	let decision = match *request {
		DecisionRequest::Single { actor, permission } => evaluate_single(matrix, actor, permission),
		DecisionRequest::Targeted {
			requester,
			target,
			self_permission,
			process_permission,
		} => evaluate_targeted(
			matrix,
			requester,
			target,
			self_permission,
			process_permission,
		),
	};

	log_decision(request, decision);
	decision
}

fn evaluate_single(
	matrix: &RolePermissionMatrix,
	actor: Option<&Actor>,
	permission: Permission,
) -> Decision {
	let Some(actor) = actor else {
		return Decision::Denied(DenyReason::ActorMissing);
	};

	let grants = matrix.grants_for(actor.role);
	if grants.contains(&Permission::All) {
		return Decision::Allowed(AllowReason::AllPermission);
	}
	if grants.contains(&permission) {
		return Decision::Allowed(AllowReason::Granted);
	}

	Decision::Denied(DenyReason::NotGranted)
}

fn evaluate_targeted(
	matrix: &RolePermissionMatrix,
	requester: Option<&Actor>,
	target: Option<&Actor>,
	self_permission: Permission,
	process_permission: Permission,
) -> Decision {
	let Some(requester) = requester else {
		return Decision::Denied(DenyReason::RequesterMissing);
	};
	let Some(target) = target else {
		return Decision::Denied(DenyReason::TargetMissing);
	};

	let grants = matrix.grants_for(requester.role);

	if grants.contains(&Permission::All) {
		return Decision::Allowed(AllowReason::AllPermission);
	}

	if requester.is_same_user(target) && grants.contains(&self_permission) {
		return Decision::Allowed(AllowReason::SelfPermission);
	}

	if grants.contains(&process_permission) {
		return Decision::Allowed(AllowReason::ProcessPermission);
	}

	Decision::Denied(DenyReason::NotGranted)
}

fn log_decision(request: &DecisionRequest<'_>, decision: Decision) {
	match *request {
		DecisionRequest::Single { actor, permission } => debug!(
			actor_id = actor.map(|a| a.id.into_inner()),
			role = actor.map(|a| a.role.as_str()),
			permission = %permission,
			?decision,
			"access decision"
		),
		DecisionRequest::Targeted {
			requester,
			target,
			self_permission,
			process_permission,
		} => debug!(
			requester_id = requester.map(|a| a.id.into_inner()),
			target_id = target.map(|a| a.id.into_inner()),
			role = requester.map(|a| a.role.as_str()),
			self_permission = %self_permission,
			process_permission = %process_permission,
			?decision,
			"access decision"
		),
	}
}
