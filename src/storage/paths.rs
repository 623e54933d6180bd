// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path utilities for the document store layout.

use std::path::{Path, PathBuf};

/// Default root directory for persistent storage.
pub const DATA_ROOT: &str = "/data";

/// Storage path utilities for the document store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persistent data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Identity Paths ==========

    /// Directory containing all registered identities.
    pub fn identities_dir(&self) -> PathBuf {
        self.root.join("identities")
    }

    /// Path to a specific identity record.
    pub fn identity(&self, identity_id: &str) -> PathBuf {
        self.identities_dir().join(format!("{identity_id}.json"))
    }

    // ========== Goal Paths ==========

    /// Directory containing all goals.
    pub fn goals_dir(&self) -> PathBuf {
        self.root.join("goals")
    }

    /// Path to a specific goal record.
    pub fn goal(&self, goal_id: &str) -> PathBuf {
        self.goals_dir().join(format!("{goal_id}.json"))
    }

    // ========== Consultation Paths ==========

    /// Directory containing all consultations.
    pub fn consultations_dir(&self) -> PathBuf {
        self.root.join("consultations")
    }

    /// Path to a specific consultation record.
    pub fn consultation(&self, consultation_id: &str) -> PathBuf {
        self.consultations_dir()
            .join(format!("{consultation_id}.json"))
    }

    // ========== Audit Log Paths ==========

    /// Directory containing audit logs.
    pub fn audit_dir(&self) -> PathBuf {
        self.root.join("audit")
    }

    /// Directory for a specific date's audit logs.
    pub fn audit_date_dir(&self, date: &str) -> PathBuf {
        self.audit_dir().join(date)
    }

    /// Path to a daily audit events file (JSONL format).
    pub fn audit_events_file(&self, date: &str) -> PathBuf {
        self.audit_date_dir(date).join("events.jsonl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("/data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.identity("id-123"),
            PathBuf::from("/tmp/test-data/identities/id-123.json")
        );
    }

    #[test]
    fn identity_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(paths.identities_dir(), PathBuf::from("/data/identities"));
        assert_eq!(
            paths.identity("u1"),
            PathBuf::from("/data/identities/u1.json")
        );
    }

    #[test]
    fn goal_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(paths.goals_dir(), PathBuf::from("/data/goals"));
        assert_eq!(paths.goal("g-123"), PathBuf::from("/data/goals/g-123.json"));
    }

    #[test]
    fn consultation_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(
            paths.consultations_dir(),
            PathBuf::from("/data/consultations")
        );
        assert_eq!(
            paths.consultation("c-456"),
            PathBuf::from("/data/consultations/c-456.json")
        );
    }

    #[test]
    fn audit_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(paths.audit_dir(), PathBuf::from("/data/audit"));
        assert_eq!(
            paths.audit_events_file("2026-08-07"),
            PathBuf::from("/data/audit/2026-08-07/events.jsonl")
        );
    }
}
