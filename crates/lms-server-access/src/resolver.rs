// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The "load actor by id" contract.

use std::collections::HashMap;

use async_trait::async_trait;
use lms_access_core::{Actor, UserId};

use crate::error::Result;

/// Loads actors from user storage.
///
/// Implementations may return `Ok(None)` or an error for a missing user;
/// permission checks treat both the same way.
#[async_trait]
pub trait ActorResolver: Send + Sync {
	async fn resolve_actor(&self, id: UserId) -> Result<Option<Actor>>;
}

/// Fixed set of actors held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActorResolver {
	actors: HashMap<UserId, Actor>,
}

impl InMemoryActorResolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder: add an actor, replacing any actor with the same id.
	pub fn with_actor(mut self, actor: Actor) -> Self {
		self.actors.insert(actor.id, actor);
		self
	}

	pub fn len(&self) -> usize {
		self.actors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.actors.is_empty()
	}
}

impl FromIterator<Actor> for InMemoryActorResolver {
	fn from_iter<I: IntoIterator<Item = Actor>>(iter: I) -> Self {
		Self {
			actors: iter.into_iter().map(|actor| (actor.id, actor)).collect(),
		}
	}
}

#[async_trait]
impl ActorResolver for InMemoryActorResolver {
	async fn resolve_actor(&self, id: UserId) -> Result<Option<Actor>> {
		Ok(self.actors.get(&id).copied())
	}
}
