// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite-backed actor resolution.
//!
//! Reads the `users` table maintained by the user store. Only `id` and
//! `user_type` are read; the resolver never writes.

use async_trait::async_trait;
use lms_access_core::{Actor, Role, UserId};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::error::{ResolveError, Result};
use crate::resolver::ActorResolver;

/// Resolves actors from the `users` table.
#[derive(Clone)]
pub struct SqliteActorResolver {
	pool: SqlitePool,
}

impl SqliteActorResolver {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

#[derive(sqlx::FromRow)]
struct ActorRow {
	id: i64,
	user_type: String,
}

impl TryFrom<ActorRow> for Actor {
	type Error = ResolveError;

	fn try_from(row: ActorRow) -> Result<Self> {
		let role: Role = row
			.user_type
			.parse()
			.map_err(|e| ResolveError::InvalidData(format!("user {}: {e}", row.id)))?;
		Ok(Actor::new(UserId::new(row.id), role))
	}
}

#[async_trait]
impl ActorResolver for SqliteActorResolver {
	#[instrument(skip(self), fields(user_id = %id))]
	async fn resolve_actor(&self, id: UserId) -> Result<Option<Actor>> {
		let row: Option<ActorRow> =
			sqlx::query_as("SELECT id, user_type FROM users WHERE id = ?")
				.bind(id.into_inner())
				.fetch_optional(&self.pool)
				.await?;

		row.map(Actor::try_from).transpose()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	async fn setup_db() -> SqlitePool {
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

		for (id, name, user_type) in [
			(5, "Ada", "Member"),
			(9, "Grace", "StaffMinor"),
			(11, "Edsger", "StaffManagement"),
			(13, "Legacy", "Librarian"),
		] {
			sqlx::query("INSERT INTO users (id, name, user_type) VALUES (?, ?, ?)")
				.bind(id)
				.bind(name)
				.bind(user_type)
				.execute(&pool)
				.await
				.unwrap();
		}

		pool
	}

	#[tokio::test]
	async fn resolves_stored_roles() {
		let resolver = SqliteActorResolver::new(setup_db().await);

		let member = resolver.resolve_actor(UserId::new(5)).await.unwrap();
		assert_eq!(member, Some(Actor::new(UserId::new(5), Role::Member)));

		let manager = resolver.resolve_actor(UserId::new(11)).await.unwrap();
		assert_eq!(manager.map(|a| a.role), Some(Role::StaffManagement));
	}

	#[tokio::test]
	async fn missing_user_is_none() {
		let resolver = SqliteActorResolver::new(setup_db().await);
		assert!(resolver.resolve_actor(UserId::new(404)).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn unknown_user_type_is_invalid_data() {
		let resolver = SqliteActorResolver::new(setup_db().await);
		let err = resolver.resolve_actor(UserId::new(13)).await.unwrap_err();
		assert!(matches!(err, ResolveError::InvalidData(_)), "got: {err}");
		assert!(err.to_string().contains("Librarian"));
	}

	#[tokio::test]
	async fn missing_table_is_database_error() {
		let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
		let resolver = SqliteActorResolver::new(pool);
		let err = resolver.resolve_actor(UserId::new(1)).await.unwrap_err();
		assert!(matches!(err, ResolveError::Database(_)));
	}
}
