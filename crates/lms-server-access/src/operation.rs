// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Library use cases and the permissions they require.
//!
//! Handlers call [`crate::PermissionChecker::authorize`] with an [`Operation`]
//! instead of repeating token pairs and denial messages at every call site.

use lms_access_core::{Permission, PermissionPair};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an operation needs from the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
	/// A single permission, no target record.
	Single(Permission),
	/// A self/process pair, evaluated against a target user.
	Targeted(PermissionPair),
}

/// Operations exposed by the library server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	Register,
	Login,
	Logout,
	GetAllBooks,
	GetBookById,
	CreateBook,
	UpdateBook,
	DeleteBook,
	GetAllUsers,
	GetUserById,
	CreateUser,
	UpdateUser,
	DeleteUser,
	BorrowBook,
	ReturnBook,
	GetBorrowedBooks,
}

impl Operation {
	/// Returns all operations.
	pub fn all() -> &'static [Operation] {
		&[
			Operation::Register,
			Operation::Login,
			Operation::Logout,
			Operation::GetAllBooks,
			Operation::GetBookById,
			Operation::CreateBook,
			Operation::UpdateBook,
			Operation::DeleteBook,
			Operation::GetAllUsers,
			Operation::GetUserById,
			Operation::CreateUser,
			Operation::UpdateUser,
			Operation::DeleteUser,
			Operation::BorrowBook,
			Operation::ReturnBook,
			Operation::GetBorrowedBooks,
		]
	}

	pub fn requirement(&self) -> Requirement {
		use Permission as P;

		match self {
			Operation::Register => Requirement::Single(P::HandleRegister),
			Operation::Login => Requirement::Single(P::HandleLogin),
			Operation::Logout => Requirement::Single(P::HandleLogout),
			Operation::GetAllBooks => Requirement::Single(P::HandleGetAllBooks),
			Operation::GetBookById => Requirement::Single(P::HandleGetBookById),
			Operation::CreateBook => Requirement::Single(P::ProcessCreateBook),
			Operation::UpdateBook => Requirement::Single(P::ProcessUpdateBook),
			Operation::DeleteBook => Requirement::Single(P::ProcessDeleteBook),
			Operation::GetAllUsers => Requirement::Single(P::ProcessGetAllUsers),
			Operation::CreateUser => Requirement::Single(P::ProcessCreateUser),
			Operation::DeleteUser => Requirement::Single(P::ProcessDeleteUser),
			Operation::GetUserById => Requirement::Targeted(PermissionPair::new(
				P::SelfGetUserById,
				P::ProcessGetUserById,
			)),
			Operation::UpdateUser => Requirement::Targeted(PermissionPair::new(
				P::SelfUpdateUser,
				P::ProcessUpdateUser,
			)),
			Operation::BorrowBook => Requirement::Targeted(PermissionPair::new(
				P::SelfBorrowBook,
				P::ProcessBorrowBook,
			)),
			Operation::ReturnBook => Requirement::Targeted(PermissionPair::new(
				P::SelfReturnBook,
				P::ProcessReturnBook,
			)),
			Operation::GetBorrowedBooks => Requirement::Targeted(PermissionPair::new(
				P::SelfGetBorrowedBooks,
				P::ProcessGetBorrowedBooks,
			)),
		}
	}

	/// Message returned to the caller when the operation is denied.
	pub fn denial_message(&self) -> &'static str {
		match self {
			Operation::Register => "You do not have permission to register users.",
			Operation::Login => "You do not have permission to log in.",
			Operation::Logout => "You do not have permission to log out.",
			Operation::GetAllBooks => "User does not have permission to view all books.",
			Operation::GetBookById => "User does not have permission to view book.",
			Operation::CreateBook => "User does not have permission to create books.",
			Operation::UpdateBook => "User does not have permission to update books.",
			Operation::DeleteBook => "User does not have permission to delete books.",
			Operation::GetAllUsers => "User does not have permission to view all users.",
			Operation::GetUserById => "User does not have permission to view user details.",
			Operation::CreateUser => "User does not have permission to create users.",
			Operation::UpdateUser => "User does not have permission to update users.",
			Operation::DeleteUser => "User does not have permission to delete users.",
			Operation::BorrowBook => "You do not have permission to borrow books",
			Operation::ReturnBook => "You do not have permission to return books",
			Operation::GetBorrowedBooks => "You do not have permission to view borrowed books",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{self:?}")
	}
}
