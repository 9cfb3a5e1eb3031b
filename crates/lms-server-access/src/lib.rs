// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission checks for the library management server.
//!
//! This crate wires the pure decision core from [`lms_access_core`] to actor
//! storage:
//!
//! - [`ActorResolver`]: the "load actor by id" contract, with in-memory and
//!   SQLite implementations
//! - [`PermissionChecker`]: boolean (`decide*`) and throwing (`require*`)
//!   checks, by resolved actor or by raw id
//! - [`Operation`]: the library use cases and the permissions each requires
//!
//! # Flow
//!
//! ```text
//! handler ──ids──▶ PermissionChecker ──▶ ActorResolver ──▶ Option<Actor>
//!                        │
//!                        └──▶ evaluate(matrix, request) ──▶ Decision
//!                                                            ├── decide*  → bool
//!                                                            └── require* → Result<(), AccessDenied>
//! ```
//!
//! Resolver failures never escape a check: they are logged and treated as an
//! absent actor.

pub mod checker;
pub mod error;
pub mod operation;
pub mod resolver;
pub mod sqlite;

pub use checker::PermissionChecker;
pub use error::{ResolveError, Result};
pub use operation::{Operation, Requirement};
pub use resolver::{ActorResolver, InMemoryActorResolver};
pub use sqlite::SqliteActorResolver;

pub use lms_access_core::{
	AccessDenied, Actor, Decision, Permission, PermissionPair, Role, RolePermissionMatrix, UserId,
};
