// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for actor resolution.

use lms_access_core::UserId;
use thiserror::Error;

/// Errors an [`crate::ActorResolver`] may report.
///
/// Permission checks never surface these; they fold every variant into an
/// absent actor.
#[derive(Debug, Error)]
pub enum ResolveError {
	/// No user record with this id
	#[error("user not found: {0}")]
	NotFound(UserId),

	/// Database error
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	/// Stored record could not be mapped to an actor
	#[error("invalid user data: {0}")]
	InvalidData(String),
}

/// Result type for actor resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;
