// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consultation repository.
//!
//! Consultations are booked dietician slots. Each consultation is stored as
//! a separate JSON file under `consultations/`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, OwnedResource, StorageError, StorageResult};

/// Booking lifecycle of a consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Consultation stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredConsultation {
    /// Unique consultation identifier (UUID)
    pub id: String,
    /// Owner identity id, set at creation from the authenticated identity
    pub owner_id: String,
    /// Booked day
    pub date: NaiveDate,
    /// Booked slot, free-form ("10:30", "morning")
    pub time: String,
    /// Optional notes for the dietician
    pub notes: Option<String>,
    /// Booking status
    pub status: ConsultationStatus,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
}

impl OwnedResource for StoredConsultation {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn resource_type(&self) -> &'static str {
        "consultation"
    }
}

/// Repository for consultation operations.
pub struct ConsultationRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> ConsultationRepository<'a> {
    /// Create a new ConsultationRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a consultation exists.
    pub fn exists(&self, consultation_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().consultation(consultation_id))
    }

    /// Get a consultation by ID.
    pub fn get(&self, consultation_id: &str) -> StorageResult<StoredConsultation> {
        let path = self.storage.paths().consultation(consultation_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!(
                "Consultation {consultation_id}"
            )));
        }
        self.storage.read_json(path)
    }

    /// Create a new consultation.
    pub fn create(&self, consultation: &StoredConsultation) -> StorageResult<()> {
        let consultation_id = &consultation.id;

        if self.exists(consultation_id) {
            return Err(StorageError::AlreadyExists(format!(
                "Consultation {consultation_id}"
            )));
        }

        self.storage.write_json(
            self.storage.paths().consultation(consultation_id),
            consultation,
        )
    }

    /// Update an existing consultation.
    pub fn update(&self, consultation: &StoredConsultation) -> StorageResult<()> {
        let consultation_id = &consultation.id;

        if !self.exists(consultation_id) {
            return Err(StorageError::NotFound(format!(
                "Consultation {consultation_id}"
            )));
        }

        self.storage.write_json(
            self.storage.paths().consultation(consultation_id),
            consultation,
        )
    }

    /// Delete a consultation.
    pub fn delete(&self, consultation_id: &str) -> StorageResult<()> {
        if !self.exists(consultation_id) {
            return Err(StorageError::NotFound(format!(
                "Consultation {consultation_id}"
            )));
        }

        self.storage
            .delete(self.storage.paths().consultation(consultation_id))
    }

    /// List all consultations owned by a user, most recent date first.
    pub fn list_by_owner(&self, owner_id: &str) -> StorageResult<Vec<StoredConsultation>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().consultations_dir(), "json")?;

        let mut consultations = Vec::new();
        for id in ids {
            if let Ok(consultation) = self.get(&id) {
                if consultation.owner_id == owner_id {
                    consultations.push(consultation);
                }
            }
        }

        consultations.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(consultations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, DocumentStore) {
        let temp = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp.path());
        let mut storage = DocumentStore::new(paths);
        storage.initialize().unwrap();
        (temp, storage)
    }

    fn test_consultation(id: &str, owner: &str, date: NaiveDate) -> StoredConsultation {
        StoredConsultation {
            id: id.to_string(),
            owner_id: owner.to_string(),
            date,
            time: "10:30".to_string(),
            notes: None,
            status: ConsultationStatus::default(),
            created_at: Utc::now(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn create_and_get_consultation() {
        let (_temp, storage) = test_storage();
        let repo = ConsultationRepository::new(&storage);

        let consultation = test_consultation("c-1", "user-1", day("2026-09-01"));
        repo.create(&consultation).unwrap();

        let loaded = repo.get("c-1").unwrap();
        assert_eq!(loaded, consultation);
        assert_eq!(loaded.status, ConsultationStatus::Pending);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ConsultationStatus::Confirmed).unwrap();
        assert_eq!(json, r#""confirmed""#);

        let parsed: ConsultationStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(parsed, ConsultationStatus::Cancelled);
    }

    #[test]
    fn delete_removes_consultation() {
        let (_temp, storage) = test_storage();
        let repo = ConsultationRepository::new(&storage);

        repo.create(&test_consultation("c-1", "user-1", day("2026-09-01")))
            .unwrap();
        repo.delete("c-1").unwrap();

        assert!(matches!(repo.get("c-1"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn list_by_owner_sorts_by_date_desc() {
        let (_temp, storage) = test_storage();
        let repo = ConsultationRepository::new(&storage);

        repo.create(&test_consultation("c-early", "user-a", day("2026-09-01")))
            .unwrap();
        repo.create(&test_consultation("c-late", "user-a", day("2026-10-15")))
            .unwrap();
        repo.create(&test_consultation("c-other", "user-b", day("2026-12-01")))
            .unwrap();

        let consultations = repo.list_by_owner("user-a").unwrap();
        assert_eq!(consultations.len(), 2);
        assert_eq!(consultations[0].id, "c-late");
        assert_eq!(consultations[1].id, "c-early");
    }
}
