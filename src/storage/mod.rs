// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for the wellness tracker: a plain-filesystem document
//! store with one JSON file per record, typed repositories per collection,
//! ownership enforcement for per-user resources, and an append-only audit
//! log.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   identities/
//!     {identity_id}.json
//!   goals/
//!     {goal_id}.json
//!   consultations/
//!     {consultation_id}.json
//!   audit/
//!     {date}/events.jsonl  # Daily audit logs
//! ```

pub mod audit;
pub mod document_fs;
pub mod ownership;
pub mod paths;
pub mod repository;

pub use audit::{AuditEvent, AuditEventType, AuditRepository};
pub use document_fs::{DocumentStore, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipCheck, OwnershipEnforcer};
pub use paths::StoragePaths;
pub use repository::{
    ConsultationRepository, ConsultationStatus, GoalRepository, IdentityRepository,
    StoredConsultation, StoredGoal, StoredIdentity,
};
