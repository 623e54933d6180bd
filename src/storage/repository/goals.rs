// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Goal repository.
//!
//! Goals are per-user wellness targets. Each goal is stored as a separate
//! JSON file under `goals/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, OwnedResource, StorageError, StorageResult};

/// Goal stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredGoal {
    /// Unique goal identifier (UUID)
    pub id: String,
    /// Owner identity id, set at creation from the authenticated identity
    pub owner_id: String,
    /// What the user wants to achieve
    pub description: String,
    /// Whether the goal has been reached
    pub completed: bool,
    /// When the goal was created
    pub created_at: DateTime<Utc>,
}

impl OwnedResource for StoredGoal {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn resource_type(&self) -> &'static str {
        "goal"
    }
}

/// Repository for goal operations.
pub struct GoalRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> GoalRepository<'a> {
    /// Create a new GoalRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a goal exists.
    pub fn exists(&self, goal_id: &str) -> bool {
        self.storage.exists(self.storage.paths().goal(goal_id))
    }

    /// Get a goal by ID.
    pub fn get(&self, goal_id: &str) -> StorageResult<StoredGoal> {
        let path = self.storage.paths().goal(goal_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Goal {goal_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new goal.
    pub fn create(&self, goal: &StoredGoal) -> StorageResult<()> {
        let goal_id = &goal.id;

        if self.exists(goal_id) {
            return Err(StorageError::AlreadyExists(format!("Goal {goal_id}")));
        }

        self.storage
            .write_json(self.storage.paths().goal(goal_id), goal)
    }

    /// Update an existing goal.
    pub fn update(&self, goal: &StoredGoal) -> StorageResult<()> {
        let goal_id = &goal.id;

        if !self.exists(goal_id) {
            return Err(StorageError::NotFound(format!("Goal {goal_id}")));
        }

        self.storage
            .write_json(self.storage.paths().goal(goal_id), goal)
    }

    /// Delete a goal.
    pub fn delete(&self, goal_id: &str) -> StorageResult<()> {
        if !self.exists(goal_id) {
            return Err(StorageError::NotFound(format!("Goal {goal_id}")));
        }

        self.storage.delete(self.storage.paths().goal(goal_id))
    }

    /// List all goals owned by a user, newest first.
    pub fn list_by_owner(&self, owner_id: &str) -> StorageResult<Vec<StoredGoal>> {
        let goal_ids = self
            .storage
            .list_files(self.storage.paths().goals_dir(), "json")?;

        let mut goals = Vec::new();
        for id in goal_ids {
            if let Ok(goal) = self.get(&id) {
                if goal.owner_id == owner_id {
                    goals.push(goal);
                }
            }
        }

        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, DocumentStore) {
        let temp = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp.path());
        let mut storage = DocumentStore::new(paths);
        storage.initialize().unwrap();
        (temp, storage)
    }

    fn test_goal(id: &str, owner: &str) -> StoredGoal {
        StoredGoal {
            id: id.to_string(),
            owner_id: owner.to_string(),
            description: "Run 5k".to_string(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_and_get_goal() {
        let (_temp, storage) = test_storage();
        let repo = GoalRepository::new(&storage);

        let goal = test_goal("g-1", "user-1");
        repo.create(&goal).unwrap();

        let loaded = repo.get("g-1").unwrap();
        assert_eq!(loaded, goal);
    }

    #[test]
    fn create_duplicate_id_is_rejected() {
        let (_temp, storage) = test_storage();
        let repo = GoalRepository::new(&storage);

        repo.create(&test_goal("g-1", "user-1")).unwrap();
        let result = repo.create(&test_goal("g-1", "user-2"));
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn update_missing_goal_is_not_found() {
        let (_temp, storage) = test_storage();
        let repo = GoalRepository::new(&storage);

        let result = repo.update(&test_goal("g-404", "user-1"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn delete_removes_goal() {
        let (_temp, storage) = test_storage();
        let repo = GoalRepository::new(&storage);

        repo.create(&test_goal("g-1", "user-1")).unwrap();
        repo.delete("g-1").unwrap();

        assert!(!repo.exists("g-1"));
        assert!(matches!(repo.get("g-1"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn list_by_owner_filters_and_sorts_newest_first() {
        let (_temp, storage) = test_storage();
        let repo = GoalRepository::new(&storage);

        let now = Utc::now();
        for i in 1..=3 {
            let mut goal = test_goal(&format!("g-a{i}"), "user-a");
            goal.created_at = now + Duration::seconds(i);
            repo.create(&goal).unwrap();
        }
        repo.create(&test_goal("g-b1", "user-b")).unwrap();

        let goals = repo.list_by_owner("user-a").unwrap();
        assert_eq!(goals.len(), 3);
        assert_eq!(goals[0].id, "g-a3");
        assert_eq!(goals[2].id, "g-a1");
        assert!(goals.iter().all(|g| g.owner_id == "user-a"));
    }
}
