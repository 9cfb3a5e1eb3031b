// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end permission checks against a SQLite user table.
//!
//! Tests cover:
//! - The reference matrix scenarios (member self-borrow, staff borrow for member,
//!   member listing users, unauthenticated book view)
//! - Unknown ids behaving like denials in both check shapes
//! - Boolean/throwing agreement across every operation and actor pair

use std::sync::Arc;

use lms_server_access::{
	Operation, Permission, PermissionChecker, RolePermissionMatrix, SqliteActorResolver, UserId,
};
use sqlx::SqlitePool;

const USERS: &[(i64, &str, &str)] = &[
	(1, "Anonymous", "None"),
	(5, "Ada", "Member"),
	(6, "Alan", "Member"),
	(9, "Grace", "StaffMinor"),
	(11, "Edsger", "StaffManagement"),
];

async fn setup_checker() -> PermissionChecker {
	let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
	sqlx::query(
		r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            user_type TEXT NOT NULL
        )
        "#,
	)
	.execute(&pool)
	.await
	.unwrap();

	for (id, name, user_type) in USERS {
		sqlx::query("INSERT INTO users (id, name, user_type) VALUES (?, ?, ?)")
			.bind(*id)
			.bind(*name)
			.bind(*user_type)
			.execute(&pool)
			.await
			.unwrap();
	}

	PermissionChecker::new(
		Arc::new(RolePermissionMatrix::reference()),
		Arc::new(SqliteActorResolver::new(pool)),
	)
}

#[tokio::test]
async fn member_borrows_for_self() {
	let checker = setup_checker().await;
	assert!(
		checker
			.decide_targeted_for_ids(
				UserId::new(5),
				UserId::new(5),
				Permission::SelfBorrowBook,
				Permission::ProcessBorrowBook,
			)
			.await
	);
}

#[tokio::test]
async fn staff_minor_borrows_for_member() {
	let checker = setup_checker().await;
	assert!(
		checker
			.decide_targeted_for_ids(
				UserId::new(9),
				UserId::new(5),
				Permission::SelfBorrowBook,
				Permission::ProcessBorrowBook,
			)
			.await
	);
}

#[tokio::test]
async fn member_cannot_list_users() {
	let checker = setup_checker().await;
	assert!(
		!checker
			.decide_for_id(UserId::new(5), Permission::ProcessGetAllUsers)
			.await
	);
	let err = checker
		.require_for_id(
			UserId::new(5),
			Permission::ProcessGetAllUsers,
			"User does not have permission to view all users.",
		)
		.await
		.unwrap_err();
	assert_eq!(
		err.message(),
		"User does not have permission to view all users."
	);
}

#[tokio::test]
async fn unauthenticated_role_views_book() {
	let checker = setup_checker().await;
	assert!(
		checker
			.decide_for_id(UserId::new(1), Permission::HandleGetBookById)
			.await
	);
}

#[tokio::test]
async fn unknown_ids_are_denied_in_both_shapes() {
	let checker = setup_checker().await;
	let ghost = UserId::new(77);

	assert!(!checker.decide_for_id(ghost, Permission::HandleGetAllBooks).await);
	assert!(checker
		.require_for_id(ghost, Permission::HandleGetAllBooks, "denied")
		.await
		.is_err());
	assert!(
		!checker
			.decide_targeted_for_ids(
				ghost,
				ghost,
				Permission::SelfGetUserById,
				Permission::ProcessGetUserById,
			)
			.await
	);
	assert!(checker
		.require_targeted_for_ids(
			UserId::new(11),
			ghost,
			Permission::SelfUpdateUser,
			Permission::ProcessUpdateUser,
			"denied",
		)
		.await
		.is_err());
}

#[tokio::test]
async fn authorize_matches_boolean_checks_for_every_operation() {
	let checker = setup_checker().await;

	for (requester, _, _) in USERS {
		for (target, _, _) in USERS {
			for operation in Operation::all() {
				let requester = UserId::new(*requester);
				let target = UserId::new(*target);

				let allowed = match operation.requirement() {
					lms_server_access::Requirement::Single(permission) => {
						checker.decide_for_id(requester, permission).await
					}
					lms_server_access::Requirement::Targeted(pair) => {
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
				let authorized = checker
					.authorize(requester, *operation, Some(target))
					.await
					.is_ok();

				assert_eq!(
					allowed, authorized,
					"{operation} requester={requester} target={target}"
				);
			}
		}
	}
}
