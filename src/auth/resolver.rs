// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Principal lookup by token subject.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::claims::Principal;
use crate::store::InMemoryStore;

/// Resolves a token subject to the principal it identifies.
///
/// Returns `None` when no such principal exists.
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    async fn resolve_principal(&self, id: Uuid) -> Option<Principal>;
}

/// Resolver backed by the user store.
#[derive(Clone)]
pub struct StorePrincipalResolver {
    store: Arc<RwLock<InMemoryStore>>,
}

impl StorePrincipalResolver {
    pub fn new(store: Arc<RwLock<InMemoryStore>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PrincipalResolver for StorePrincipalResolver {
    async fn resolve_principal(&self, id: Uuid) -> Option<Principal> {
        let store = self.store.read().await;
        store
            .user(id)
            .map(|user| Principal::new(user.id, user.authorities.iter().copied()))
    }
}
