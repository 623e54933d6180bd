// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Audit logging for security-sensitive operations.
//!
//! Registration, login outcomes, resource mutations and ownership denials
//! are appended to daily JSONL files under the store's `audit/` directory.
//! Logging is best-effort; a failed append never fails the request it
//! describes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentStore, StorageError, StorageResult};

/// Types of auditable events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    // Identity events
    IdentityRegistered,
    LoginSucceeded,
    LoginFailed,

    // Goal events
    GoalCreated,
    GoalUpdated,
    GoalDeleted,

    // Consultation events
    ConsultationBooked,
    ConsultationUpdated,
    ConsultationCancelled,

    // Authorization events
    OwnershipDenied,
}

/// An audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event ID.
    pub event_id: String,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// Type of event.
    pub event_type: AuditEventType,
    /// User who triggered the event (if known).
    pub user_id: Option<String>,
    /// Resource affected (goal id, consultation id, ...).
    pub resource_id: Option<String>,
    /// Resource type (goal, consultation, ...).
    pub resource_type: Option<String>,
    /// Additional details as JSON.
    pub details: Option<serde_json::Value>,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error message if the operation failed.
    pub error: Option<String>,
}

impl AuditEvent {
    /// Create a new audit event.
    pub fn new(event_type: AuditEventType) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type,
            user_id: None,
            resource_id: None,
            resource_type: None,
            details: None,
            success: true,
            error: None,
        }
    }

    /// Set the user ID.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the resource.
    pub fn with_resource(
        mut self,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        self.resource_type = Some(resource_type.into());
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Add details.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Mark as failed with an error message.
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.success = false;
        self.error = Some(error.into());
        self
    }
}

/// Repository for audit events. One JSONL file per day; events append in
/// arrival order.
pub struct AuditRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> AuditRepository<'a> {
    /// Create a new audit repository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Append an event to the day's log file.
    pub fn log(&self, event: &AuditEvent) -> StorageResult<()> {
        let date = event.timestamp.format("%Y-%m-%d").to_string();
        let path = self.storage.paths().audit_events_file(&date);

        let line = serde_json::to_string(event).map_err(|e| {
            StorageError::SerializationError(format!("audit event not serializable: {e}"))
        })?;

        self.storage.append_line(&path, &line)
    }

    /// Read back all events recorded on a given date (`YYYY-MM-DD`).
    pub fn read_events(&self, date: &str) -> StorageResult<Vec<AuditEvent>> {
        let path = self.storage.paths().audit_events_file(date);
        let content = self.storage.read_log(&path)?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    StorageError::SerializationError(format!("corrupt audit line: {e}"))
                })
            })
            .collect()
    }
}

/// Helper macro for logging audit events.
#[macro_export]
macro_rules! audit_log {
    ($storage:expr, $event_type:expr, $user:expr) => {{
        let repo = $crate::storage::AuditRepository::new($storage);
        let event = $crate::storage::AuditEvent::new($event_type).with_user(&$user.user_id);
        let _ = repo.log(&event);
    }};
    ($storage:expr, $event_type:expr, $user:expr, $resource_type:expr, $resource_id:expr) => {{
        let repo = $crate::storage::AuditRepository::new($storage);
        let event = $crate::storage::AuditEvent::new($event_type)
            .with_user(&$user.user_id)
            .with_resource($resource_type, $resource_id);
        let _ = repo.log(&event);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DocumentStore) {
        let temp = TempDir::new().unwrap();
        let mut storage = DocumentStore::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();
        (temp, storage)
    }

    #[test]
    fn builder_fills_event_fields() {
        let event = AuditEvent::new(AuditEventType::GoalCreated)
            .with_user("user_123")
            .with_resource("goal", "goal_abc")
            .with_details(serde_json::json!({"source": "test"}));

        assert_eq!(event.event_type, AuditEventType::GoalCreated);
        assert_eq!(event.user_id.as_deref(), Some("user_123"));
        assert_eq!(event.resource_type.as_deref(), Some("goal"));
        assert_eq!(event.resource_id.as_deref(), Some("goal_abc"));
        assert!(event.details.is_some());
        assert!(event.success);
    }

    #[test]
    fn failed_marks_event_unsuccessful() {
        let event = AuditEvent::new(AuditEventType::OwnershipDenied)
            .with_user("user_123")
            .failed("Not authorized");

        assert!(!event.success);
        assert_eq!(event.error.as_deref(), Some("Not authorized"));
    }

    #[test]
    fn events_append_in_order_and_read_back() {
        let (_temp, storage) = setup();
        let repo = AuditRepository::new(&storage);

        repo.log(&AuditEvent::new(AuditEventType::IdentityRegistered).with_user("user_1"))
            .unwrap();
        repo.log(
            &AuditEvent::new(AuditEventType::GoalCreated)
                .with_user("user_2")
                .with_resource("goal", "g1"),
        )
        .unwrap();

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let events = repo.read_events(&today).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, AuditEventType::IdentityRegistered);
        assert_eq!(events[1].event_type, AuditEventType::GoalCreated);
    }

    #[test]
    fn audit_log_macro_appends_event() {
        let (_temp, storage) = setup();
        let user = crate::auth::AuthenticatedUser {
            user_id: "user_macro".to_string(),
            expires_at: 0,
        };

        audit_log!(&storage, AuditEventType::GoalDeleted, &user, "goal", "g9");

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let events = AuditRepository::new(&storage).read_events(&today).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].user_id.as_deref(), Some("user_macro"));
        assert_eq!(events[0].resource_id.as_deref(), Some("g9"));
    }
}
