// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The permission checker used by request handlers.
//!
//! [`PermissionChecker`] offers every check in two shapes:
//!
//! | Boolean (`decide*`) | Throwing (`require*`) |
//! |---|---|
//! | never fails, `false` on denial | `Err(AccessDenied)` carrying the caller's message |
//!
//! and in four parameter shapes: a single permission or a self/process pair,
//! each by resolved [`Actor`] or by raw [`UserId`]. All eight delegate to
//! [`lms_access_core::evaluate`], so the two shapes cannot drift apart.
//!
//! Id-based checks resolve actors through the injected [`ActorResolver`]. A
//! resolver error or a missing user is treated as an absent actor, which is
//! always a denial.

use std::sync::Arc;

use lms_access_core::{
	evaluate, AccessDenied, Actor, Decision, DecisionRequest, Permission, RolePermissionMatrix,
	UserId,
};
use tracing::{instrument, warn};

use crate::operation::{Operation, Requirement};
use crate::resolver::ActorResolver;

/// Evaluates access checks against a fixed matrix and an actor store.
///
/// Cheap to clone; the matrix and resolver are shared.
#[derive(Clone)]
pub struct PermissionChecker {
	matrix: Arc<RolePermissionMatrix>,
	resolver: Arc<dyn ActorResolver>,
}

impl PermissionChecker {
	pub fn new(matrix: Arc<RolePermissionMatrix>, resolver: Arc<dyn ActorResolver>) -> Self {
		Self { matrix, resolver }
	}

	/// Checker over the reference matrix.
	pub fn with_reference_matrix(resolver: Arc<dyn ActorResolver>) -> Self {
		Self::new(Arc::new(RolePermissionMatrix::reference()), resolver)
	}

	pub fn matrix(&self) -> &RolePermissionMatrix {
		&self.matrix
	}

	// =========================================================================
	// Boolean shape
	// =========================================================================

	/// Returns true if `actor` holds `permission` (or `All`).
	pub fn decide(&self, actor: Option<&Actor>, permission: Permission) -> bool {
		self.evaluate_single(actor, permission).is_allowed()
	}

	/// Like [`Self::decide`], resolving the actor first.
	pub async fn decide_for_id(&self, actor_id: UserId, permission: Permission) -> bool {
		let actor = self.resolve(actor_id).await;
		self.decide(actor.as_ref(), permission)
	}

	/// Returns true if `requester` may act on `target`'s record.
	pub fn decide_targeted(
		&self,
		requester: Option<&Actor>,
		target: Option<&Actor>,
		self_permission: Permission,
		process_permission: Permission,
	) -> bool {
		self
			.evaluate_targeted(requester, target, self_permission, process_permission)
			.is_allowed()
	}

	/// Like [`Self::decide_targeted`], resolving both actors first.
	pub async fn decide_targeted_for_ids(
		&self,
		requester_id: UserId,
		target_id: UserId,
		self_permission: Permission,
		process_permission: Permission,
	) -> bool {
		let (requester, target) = self.resolve_pair(requester_id, target_id).await;
		self.decide_targeted(
			requester.as_ref(),
			target.as_ref(),
			self_permission,
			process_permission,
		)
	}

	// =========================================================================
	// Throwing shape
	// =========================================================================

	/// Fails with `message` unless `actor` holds `permission` (or `All`).
	pub fn require(
		&self,
		actor: Option<&Actor>,
		permission: Permission,
		message: &str,
	) -> Result<(), AccessDenied> {
		self.evaluate_single(actor, permission).into_result(message)
	}

	/// Like [`Self::require`], resolving the actor first.
	pub async fn require_for_id(
		&self,
		actor_id: UserId,
		permission: Permission,
		message: &str,
	) -> Result<(), AccessDenied> {
		let actor = self.resolve(actor_id).await;
		self.require(actor.as_ref(), permission, message)
	}

	/// Fails with `message` unless `requester` may act on `target`'s record.
	pub fn require_targeted(
		&self,
		requester: Option<&Actor>,
		target: Option<&Actor>,
		self_permission: Permission,
		process_permission: Permission,
		message: &str,
	) -> Result<(), AccessDenied> {
		self
			.evaluate_targeted(requester, target, self_permission, process_permission)
			.into_result(message)
	}

	/// Like [`Self::require_targeted`], resolving both actors first.
	pub async fn require_targeted_for_ids(
		&self,
		requester_id: UserId,
		target_id: UserId,
		self_permission: Permission,
		process_permission: Permission,
		message: &str,
	) -> Result<(), AccessDenied> {
		let (requester, target) = self.resolve_pair(requester_id, target_id).await;
		self.require_targeted(
			requester.as_ref(),
			target.as_ref(),
			self_permission,
			process_permission,
			message,
		)
	}

	// =========================================================================
	// Operations
	// =========================================================================

	/// Authorizes a library operation for `requester_id`.
	///
	/// Targeted operations are checked against `target_id`, or against the
	/// requester when no target is given. Single-permission operations ignore
	/// `target_id`. Denials carry [`Operation::denial_message`].
	#[instrument(skip(self))]
	pub async fn authorize(
		&self,
		requester_id: UserId,
		operation: Operation,
		target_id: Option<UserId>,
	) -> Result<(), AccessDenied> {
		let message = operation.denial_message();
		match operation.requirement() {
			Requirement::Single(permission) => {
				self.require_for_id(requester_id, permission, message).await
			}
			Requirement::Targeted(pair) => {
				self
					.require_targeted_for_ids(
						requester_id,
						target_id.unwrap_or(requester_id),
						pair.self_permission,
						pair.process_permission,
						message,
					)
					.await
			}
		}
	}

	// =========================================================================
	// Internals
	// =========================================================================

	fn evaluate_single(&self, actor: Option<&Actor>, permission: Permission) -> Decision {
		evaluate(&self.matrix, &DecisionRequest::single(actor, permission))
	}

	fn evaluate_targeted(
		&self,
		requester: Option<&Actor>,
		target: Option<&Actor>,
		self_permission: Permission,
		process_permission: Permission,
	) -> Decision {
		evaluate(
			&self.matrix,
			&DecisionRequest::targeted(requester, target, self_permission, process_permission),
		)
	}

	async fn resolve(&self, id: UserId) -> Option<Actor> {
		match self.resolver.resolve_actor(id).await {
			Ok(actor) => actor,
			Err(e) => {
				warn!(user_id = %id, error = %e, "actor resolution failed, treating as absent");
				None
			}
		}
	}

	async fn resolve_pair(
		&self,
		requester_id: UserId,
		target_id: UserId,
	) -> (Option<Actor>, Option<Actor>) {
		let requester = self.resolve(requester_id).await;
		if requester_id == target_id {
			return (requester, requester);
		}
		let target = self.resolve(target_id).await;
		(requester, target)
	}
}

impl std::fmt::Debug for PermissionChecker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PermissionChecker")
			.field("matrix", &self.matrix)
			.finish_non_exhaustive()
	}
}
