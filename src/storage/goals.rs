//! Goal repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Goal, GoalId};

use super::file_io::{read_json, write_json_atomic};

/// Repository for savings goal persistence
pub struct GoalRepository {
    path: PathBuf,
    goals: RwLock<Vec<Goal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let loaded: Vec<Goal> = read_json(&self.path)?;

        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        tracing::debug!(count = loaded.len(), path = %self.path.display(), "loaded goals");
        *goals = loaded;
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*goals)?;
        tracing::debug!(count = goals.len(), "saved goals");
        Ok(())
    }

    pub fn get(&self, id: GoalId) -> Result<Option<Goal>, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.iter().find(|g| g.id == id).cloned())
    }

    /// Find a goal by short ID or by title (case-insensitive)
    pub fn find(&self, identifier: &str) -> Result<Option<Goal>, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let identifier = identifier.trim();
        Ok(goals
            .iter()
            .find(|g| g.title.eq_ignore_ascii_case(identifier))
            .or_else(|| goals.iter().find(|g| g.id.matches(identifier)))
            .cloned())
    }

    pub fn get_all(&self) -> Result<Vec<Goal>, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.clone())
    }

    pub fn upsert(&self, goal: Goal) -> Result<(), FinanceError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match goals.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => *existing = goal,
            None => goals.push(goal),
        }
        Ok(())
    }

    pub fn delete(&self, id: GoalId) -> Result<bool, FinanceError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = goals.len();
        goals.retain(|g| g.id != id);
        Ok(goals.len() != before)
    }

    pub fn replace_all(&self, loaded: Vec<Goal>) -> Result<(), FinanceError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *goals = loaded;
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.len())
    }
}
