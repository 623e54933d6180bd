// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed repositories over the document store, one per collection.

pub mod consultations;
pub mod goals;
pub mod identities;

pub use consultations::{ConsultationRepository, ConsultationStatus, StoredConsultation};
pub use goals::{GoalRepository, StoredGoal};
pub use identities::{IdentityRepository, StoredIdentity};
