// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The permission catalog.
//!
//! Every permission token in the system is a variant of [`Permission`]. Each
//! variant has a stable token string, which is what gets persisted, logged and
//! accepted from configuration. Token comparison is exact and case-sensitive.
//!
//! Tokens fall into four groups (see [`PermissionScope`]):
//!
//! - plain tokens such as `HandleGetAllBooks`, with no self/other distinction
//! - `Self.*` tokens, allowing an actor to act on their own record
//! - `Process.*` tokens, allowing an actor to act on another actor's record
//! - the reserved `All`, `None` and `Public` tokens
//!
//! The `Self.`/`Process.` prefix is only a naming convention. The matrix treats
//! `Self.BorrowBook` and `Process.BorrowBook` as unrelated tokens; the
//! decision engine is what gives them self/other meaning.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownPermission;

/// Classification of a permission token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionScope {
	Plain,
	SelfScoped,
	Process,
	Reserved,
}

macro_rules! define_permissions {
	($($variant:ident => ($token:literal, $scope:ident)),+ $(,)?) => {
		/// A permission token from the closed catalog.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub enum Permission {
			$(
				#[doc = concat!("`", $token, "`")]
				$variant,
			)+
		}

		impl Permission {
			/// Returns every permission in the catalog.
			pub fn all() -> &'static [Permission] {
				&[$(Permission::$variant),+]
			}

			/// The stable token string.
			pub fn as_str(&self) -> &'static str {
				match self {
					$(Permission::$variant => $token,)+
				}
			}

			pub fn scope(&self) -> PermissionScope {
				match self {
					$(Permission::$variant => PermissionScope::$scope,)+
				}
			}
		}

		impl FromStr for Permission {
			type Err = UnknownPermission;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($token => Ok(Permission::$variant),)+
					_ => Err(UnknownPermission(s.to_string())),
				}
			}
		}
	};
}

define_permissions! {
	// Authentication
	HandleRegister => ("HandleRegister", Plain),
	HandleLogin => ("HandleLogin", Plain),
	HandleLogout => ("HandleLogout", Plain),

	// Public book catalog
	HandleGetAllBooks => ("HandleGetAllBooks", Plain),
	HandleGetBookById => ("HandleGetBookById", Plain),

	// Acting on one's own record
	SelfGetUserById => ("Self.GetUserById", SelfScoped),
	SelfUpdateUser => ("Self.UpdateUser", SelfScoped),
	SelfBorrowBook => ("Self.BorrowBook", SelfScoped),
	SelfReturnBook => ("Self.ReturnBook", SelfScoped),
	SelfGetBorrowedBooks => ("Self.GetBorrowedBooks", SelfScoped),

	// Acting on another actor's record
	ProcessGetUserById => ("Process.GetUserById", Process),
	ProcessGetAllUsers => ("Process.GetAllUsers", Process),
	ProcessUpdateUser => ("Process.UpdateUser", Process),
	ProcessCreateUser => ("Process.CreateUser", Process),
	ProcessDeleteUser => ("Process.DeleteUser", Process),
	ProcessCreateBook => ("Process.CreateBook", Process),
	ProcessUpdateBook => ("Process.UpdateBook", Process),
	ProcessDeleteBook => ("Process.DeleteBook", Process),
	ProcessBorrowBook => ("Process.BorrowBook", Process),
	ProcessReturnBook => ("Process.ReturnBook", Process),
	ProcessGetBorrowedBooks => ("Process.GetBorrowedBooks", Process),

	// Reserved
	None => ("None", Reserved),
	Public => ("Public", Reserved),
	All => ("All", Reserved),
}

impl Permission {
	/// Returns true for the universal override token.
	pub fn is_all(&self) -> bool {
		matches!(self, Permission::All)
	}
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for Permission {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Permission {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let token = String::deserialize(deserializer)?;
		token.parse().map_err(serde::de::Error::custom)
	}
}

/// The `(self, process)` token pair checked when an action targets a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionPair {
	pub self_permission: Permission,
	pub process_permission: Permission,
}

impl PermissionPair {
	pub fn new(self_permission: Permission, process_permission: Permission) -> Self {
		Self {
			self_permission,
			process_permission,
		}
	}
}
