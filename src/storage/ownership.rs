// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for per-user resources.
//!
//! Every read or mutation of a goal or consultation passes through these
//! checks, so the invariant holds identically for all owned resource types.
//! A missing record stays `NotFound` while a record with the wrong owner
//! becomes `PermissionDenied`; the two remain distinct here even when the
//! HTTP layer flattens the caller-facing message.

use crate::auth::AuthenticatedUser;

use super::{StorageError, StorageResult};

/// A record that belongs to exactly one identity. The owner reference is
/// assigned once at creation, from the authenticated identity, never from
/// client input.
pub trait OwnedResource {
    /// The owning identity's id.
    fn owner_id(&self) -> &str;

    /// Resource type name used in error reporting ("goal", "consultation").
    fn resource_type(&self) -> &'static str;
}

/// Enforcement of the ownership invariant on storage operations.
pub trait OwnershipEnforcer {
    /// Verify that the user owns this resource.
    ///
    /// # Errors
    /// `StorageError::PermissionDenied` when the owner reference and the
    /// authenticated identity differ.
    fn verify_ownership(&self, user: &AuthenticatedUser) -> StorageResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, user: &AuthenticatedUser) -> StorageResult<()> {
        if self.owner_id() == user.user_id {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied {
                user_id: user.user_id.clone(),
                resource: self.resource_type().to_string(),
            })
        }
    }
}

/// Ownership verification chained onto repository lookups.
pub trait OwnershipCheck<T> {
    /// Pass the resource through when the user owns it, keeping lookup
    /// failures intact.
    fn verify_owner(self, user: &AuthenticatedUser) -> StorageResult<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for StorageResult<T> {
    fn verify_owner(self, user: &AuthenticatedUser) -> StorageResult<T> {
        let resource = self?;
        resource.verify_ownership(user)?;
        Ok(resource)
    }
}
