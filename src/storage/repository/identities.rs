// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity repository: the credential store.
//!
//! One record per registered identity. Email is the login key; lookups and
//! the uniqueness check fold ASCII case, and records store the lowercased
//! form so the two always agree. The password hash never leaves the storage
//! and auth layers; API responses carry a projection without it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{DocumentStore, StorageError, StorageResult};

/// Registered identity as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredIdentity {
    /// Unique identity identifier (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email, stored lowercased
    pub email: String,
    /// PHC-format Argon2id hash of the secret
    pub password_hash: String,
    /// When the identity was created
    pub created_at: DateTime<Utc>,
}

/// Repository for identity records. No update or delete operations exist;
/// identities are immutable once created.
pub struct IdentityRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> IdentityRepository<'a> {
    /// Create a new IdentityRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if an identity exists.
    pub fn exists(&self, identity_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().identity(identity_id))
    }

    /// Get an identity by ID.
    pub fn get(&self, identity_id: &str) -> StorageResult<StoredIdentity> {
        let path = self.storage.paths().identity(identity_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Identity {identity_id}")));
        }
        self.storage.read_json(path)
    }

    /// Look up an identity by email (case-insensitive).
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredIdentity>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().identities_dir(), "json")?;

        for id in ids {
            if let Ok(identity) = self.get(&id) {
                if identity.email.eq_ignore_ascii_case(email) {
                    return Ok(Some(identity));
                }
            }
        }

        Ok(None)
    }

    /// Create a new identity.
    ///
    /// Fails with `AlreadyExists` when the email is already registered,
    /// compared case-insensitively.
    pub fn create(&self, identity: &StoredIdentity) -> StorageResult<()> {
        if self.find_by_email(&identity.email)?.is_some() {
            return Err(StorageError::AlreadyExists(format!(
                "Identity with email {}",
                identity.email
            )));
        }

        self.storage
            .write_json(self.storage.paths().identity(&identity.id), identity)
    }
}
