//! Goal service
//!
//! Create savings goals, deposit toward them and delete them.

use chrono::{NaiveDate, Utc};

use crate::audit::{AuditEntry, AuditEvent};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Goal, GoalId, Money};
use crate::storage::Storage;

/// Service for savings goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

/// Result of a deposit
#[derive(Debug, Clone)]
pub struct DepositOutcome {
    pub goal: Goal,
    /// True only for the deposit that first reached the target
    pub just_completed: bool,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        title: &str,
        target_amount: Money,
        initial_amount: Money,
        deadline: NaiveDate,
    ) -> FinanceResult<Goal> {
        if initial_amount.is_negative() {
            return Err(FinanceError::Validation(
                "Initial amount cannot be negative".into(),
            ));
        }

        let goal = Goal::new(title.trim(), target_amount, deadline)
            .with_initial_amount(initial_amount, Utc::now());

        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.record(AuditEntry::for_record(
            goal.id,
            goal.title.clone(),
            AuditEvent::GoalCreated {
                target: goal.target_amount,
                initial: goal.current_amount,
                deadline: goal.deadline,
            },
        ))?;

        Ok(goal)
    }

    pub fn get(&self, id: GoalId) -> FinanceResult<Option<Goal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by title (case-insensitive) or short ID
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Goal>> {
        self.storage.goals.find(identifier)
    }

    pub fn list(&self) -> FinanceResult<Vec<Goal>> {
        self.storage.goals.get_all()
    }

    /// Add `amount` to a goal.
    ///
    /// Non-positive amounts are rejected and leave the goal unchanged.
    /// Deposits into a completed goal are accepted but never re-stamp
    /// `completed_at`.
    pub fn deposit(&self, id: GoalId, amount: Money) -> FinanceResult<DepositOutcome> {
        if !amount.is_positive() {
            return Err(FinanceError::Validation(
                "Deposit amount must be greater than zero".into(),
            ));
        }

        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        let just_completed = goal.deposit(amount, Utc::now());
        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.record(AuditEntry::for_record(
            goal.id,
            goal.title.clone(),
            AuditEvent::GoalDeposit {
                amount,
                balance: goal.current_amount,
                target: goal.target_amount,
                reached_target: just_completed,
            },
        ))?;

        if just_completed {
            tracing::info!(goal = %goal.title, "goal completed");
        }

        Ok(DepositOutcome {
            goal,
            just_completed,
        })
    }

    pub fn delete(&self, id: GoalId) -> FinanceResult<Goal> {
        let goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        self.storage.goals.delete(id)?;
        self.storage.goals.save()?;

        self.storage.record(AuditEntry::for_record(
            goal.id,
            goal.title.clone(),
            AuditEvent::GoalDeleted {
                balance: goal.current_amount,
                target: goal.target_amount,
                completed: goal.completed,
            },
        ))?;

        Ok(goal)
    }
}
