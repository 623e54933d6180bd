// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{password, TokenCodec};
use crate::config::AppConfig;
use crate::storage::DocumentStore;

/// Authentication context shared by every request: the token codec and the
/// fallback hash that equalizes login timing for unknown emails. Read-only
/// after startup.
#[derive(Clone)]
pub struct AuthContext {
    /// Session token issue/verify.
    pub tokens: TokenCodec,
    /// PHC string verified against when an email lookup misses.
    pub fallback_hash: String,
}

impl AuthContext {
    /// Build the auth context from process configuration.
    pub fn new(config: &AppConfig) -> Result<Self, password::PasswordError> {
        Ok(Self {
            tokens: TokenCodec::new(config.token_secret.as_bytes(), config.token_ttl),
            fallback_hash: password::fallback_hash()?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    storage: DocumentStore,
    pub auth: Arc<AuthContext>,
}

impl AppState {
    pub fn new(storage: DocumentStore, auth: AuthContext) -> Self {
        Self {
            storage,
            auth: Arc::new(auth),
        }
    }

    /// Get a handle to the document store.
    pub fn storage(&self) -> DocumentStore {
        self.storage.clone()
    }
}
