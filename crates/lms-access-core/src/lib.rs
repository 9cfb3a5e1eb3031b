// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core access-control types for the library management system.
//!
//! This crate provides:
//! - [`Permission`]: the closed catalog of permission tokens
//! - [`Role`], [`UserId`], [`Actor`]: the minimal identity shape used in decisions
//! - [`RolePermissionMatrix`]: the immutable role → grants table
//! - [`evaluate`]: the single decision function behind every access check
//!
//! Nothing here performs I/O. Resolving actors from storage is the job of
//! `lms-server-access`, which layers the boolean and throwing check APIs on
//! top of [`evaluate`].
//!
//! # Example
//!
//! ```
//! use lms_access_core::{evaluate, Actor, DecisionRequest, Permission, Role, RolePermissionMatrix, UserId};
//!
//! let matrix = RolePermissionMatrix::reference();
//! let member = Actor::new(UserId::new(5), Role::Member);
//!
//! let decision = evaluate(
//! 	&matrix,
//! 	&DecisionRequest::targeted(
//! 		Some(&member),
//! 		Some(&member),
//! 		Permission::SelfBorrowBook,
//! 		Permission::ProcessBorrowBook,
//! 	),
//! );
//! assert!(decision.is_allowed());
//! ```

pub mod decision;
pub mod error;
pub mod matrix;
pub mod permission;
pub mod types;

pub use decision::{evaluate, AllowReason, Decision, DecisionRequest, DenyReason};
pub use error::{AccessDenied, ActorError, MatrixError, UnknownPermission, UnknownRole};
pub use matrix::{MatrixBuilder, PermissionSet, RolePermissionMatrix};
pub use permission::{Permission, PermissionPair, PermissionScope};
pub use types::{Actor, ActorKind, Role, UserId};
