// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use clap::Args;
use lms_access_core::{Permission, PermissionPair, Role, RolePermissionMatrix, UserId};
use lms_server_access::PermissionChecker;
use tracing::{info, instrument};

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
	/// Id of the user making the request
	#[arg(long)]
	pub requester: i64,

	/// Id of the user the request acts on (defaults to the requester)
	#[arg(long)]
	pub target: Option<i64>,

	/// Permission token, e.g. `Self.BorrowBook`
	#[arg(long)]
	pub permission: Permission,

	/// Process token paired with a self token, e.g. `Process.BorrowBook`
	#[arg(long)]
	pub process_permission: Option<Permission>,
}

/// A check command reduced to one of the two evaluation shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckRequest {
	Single {
		requester: UserId,
		permission: Permission,
	},
	Targeted {
		requester: UserId,
		target: UserId,
		pair: PermissionPair,
	},
}

impl TryFrom<&CheckArgs> for CheckRequest {
	type Error = anyhow::Error;

	fn try_from(args: &CheckArgs) -> anyhow::Result<Self> {
		let requester = UserId::new(args.requester);
		match (args.process_permission, args.target) {
			(Some(process_permission), target) => Ok(CheckRequest::Targeted {
				requester,
				target: target.map(UserId::new).unwrap_or(requester),
				pair: PermissionPair::new(args.permission, process_permission),
			}),
			(None, None) => Ok(CheckRequest::Single {
				requester,
				permission: args.permission,
			}),
			(None, Some(_)) => anyhow::bail!("--target requires --process-permission"),
		}
	}
}

/// Tokens granted to `role`, in catalog order.
pub fn grants(matrix: &RolePermissionMatrix, role: Role) -> Vec<&'static str> {
	matrix
		.grants_for(role)
		.iter()
		.map(Permission::as_str)
		.collect()
}

#[instrument(skip(checker))]
pub async fn check(checker: &PermissionChecker, request: CheckRequest) -> bool {
	let allowed = match request {
		CheckRequest::Single {
			requester,
			permission,
		} => checker.decide_for_id(requester, permission).await,
		CheckRequest::Targeted {
			requester,
			target,
			pair,
		} => {
			checker
				.decide_targeted_for_ids(
					requester,
					target,
					pair.self_permission,
					pair.process_permission,
				)
				.await
		}
	};
	info!(allowed, "check evaluated");
	allowed
}

#[cfg(test)]
mod tests {
	use super::*;
	use lms_access_core::Actor;
	use lms_server_access::InMemoryActorResolver;
	use std::sync::Arc;

	fn args(target: Option<i64>, process_permission: Option<Permission>) -> CheckArgs {
		CheckArgs {
			requester: 5,
			target,
			permission: Permission::SelfBorrowBook,
			process_permission,
		}
	}

	fn checker() -> PermissionChecker {
		let resolver = InMemoryActorResolver::new()
			.with_actor(Actor::new(UserId::new(5), Role::Member))
			.with_actor(Actor::new(UserId::new(6), Role::Member))
			.with_actor(Actor::new(UserId::new(9), Role::StaffMinor));
		PermissionChecker::with_reference_matrix(Arc::new(resolver))
	}

	mod request_shape {
		use super::*;

		#[test]
		fn plain_permission_is_single() {
			let request = CheckRequest::try_from(&args(None, None)).unwrap();
			assert_eq!(
				request,
				CheckRequest::Single {
					requester: UserId::new(5),
					permission: Permission::SelfBorrowBook,
				}
			);
		}

		#[test]
		fn missing_target_defaults_to_requester() {
			let request =
				CheckRequest::try_from(&args(None, Some(Permission::ProcessBorrowBook))).unwrap();
			let CheckRequest::Targeted {
				requester, target, ..
			} = request
			else {
				panic!("expected targeted request, got {request:?}");
			};
			assert_eq!(requester, target);
		}

		#[test]
		fn target_without_process_permission_is_rejected() {
			let err = CheckRequest::try_from(&args(Some(6), None)).unwrap_err();
			assert!(err.to_string().contains("--process-permission"));
		}
	}

	mod evaluation {
		use super::*;

		#[test]
		fn grants_lists_reference_tokens() {
			let tokens = grants(&RolePermissionMatrix::reference(), Role::None);
			assert!(tokens.contains(&"HandleGetBookById"));
			assert!(!tokens.contains(&"Self.BorrowBook"));
		}

		#[tokio::test]
		async fn member_borrows_for_self_but_not_others() {
			let checker = checker();
			let own =
				CheckRequest::try_from(&args(None, Some(Permission::ProcessBorrowBook))).unwrap();
			assert!(check(&checker, own).await);

			let other =
				CheckRequest::try_from(&args(Some(6), Some(Permission::ProcessBorrowBook))).unwrap();
			assert!(!check(&checker, other).await);
		}

		#[tokio::test]
		async fn unknown_requester_is_denied() {
			let request = CheckRequest::Single {
				requester: UserId::new(404),
				permission: Permission::HandleGetAllBooks,
			};
			assert!(!check(&checker(), request).await);
		}
	}
}
