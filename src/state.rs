// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{
    password::{hash_password, PasswordError},
    AuthGateway, PathPolicy, StorePrincipalResolver, TokenCodec, UserAuthority,
};
use crate::config::{AppConfig, SeedAdmin};
use crate::models::{User, UserFields};
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub tokens: Arc<TokenCodec>,
    pub gateway: Arc<AuthGateway>,
}

impl AppState {
    pub fn new(store: InMemoryStore, tokens: TokenCodec, policy: PathPolicy) -> Self {
        let store = Arc::new(RwLock::new(store));
        let tokens = Arc::new(tokens);
        let resolver = Arc::new(StorePrincipalResolver::new(store.clone()));
        let gateway = Arc::new(AuthGateway::new(policy, tokens.clone(), resolver));
        Self {
            store,
            tokens,
            gateway,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            InMemoryStore::new(),
            TokenCodec::new(&config.jwt_secret),
            PathPolicy::new(config.excluded_paths.iter().cloned()),
        )
    }

    /// Create the bootstrap administrator unless the email is already registered.
    pub async fn seed_admin(&self, seed: &SeedAdmin) -> Result<Option<User>, PasswordError> {
        let mut store = self.store.write().await;
        if store.user_by_email(&seed.email).is_some() {
            return Ok(None);
        }

        let password_hash = hash_password(&seed.password)?;
        let fields = UserFields {
            name: "Admin".to_string(),
            surname: "Admin".to_string(),
            email: seed.email.clone(),
            password: seed.password.clone(),
            phone_number: String::new(),
        };
        Ok(store
            .insert_user(fields, password_hash, [UserAuthority::Admin, UserAuthority::User])
            .ok())
    }
}
