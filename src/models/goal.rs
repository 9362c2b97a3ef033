//! Savings goal model
//!
//! A goal accumulates deposits toward a target amount. It is tracked
//! independently of transactions: depositing into a goal does not create a
//! transaction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    pub title: String,

    /// Amount to reach, always > 0
    pub target_amount: Money,

    /// Amount deposited so far, only ever increased
    #[serde(default)]
    pub current_amount: Money,

    pub deadline: NaiveDate,

    /// Set once `current_amount` reaches `target_amount`; never reset
    #[serde(default)]
    pub completed: bool,

    /// When the goal was first completed
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(title: impl Into<String>, target_amount: Money, deadline: NaiveDate) -> Self {
        Self {
            id: GoalId::new(),
            title: title.into(),
            target_amount,
            current_amount: Money::zero(),
            deadline,
            completed: false,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Start a goal with money already saved toward it
    pub fn with_initial_amount(mut self, amount: Money, now: DateTime<Utc>) -> Self {
        self.current_amount = amount;
        if self.target_reached() {
            self.completed = true;
            self.completed_at = Some(now);
        }
        self
    }

    fn target_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Add a deposit and recompute completion.
    ///
    /// Returns `true` only on the deposit that first completes the goal.
    /// The caller validates that `amount` is positive.
    pub fn deposit(&mut self, amount: Money, now: DateTime<Utc>) -> bool {
        self.current_amount += amount;

        if !self.completed && self.target_reached() {
            self.completed = true;
            self.completed_at = Some(now);
            return true;
        }
        false
    }

    /// Progress toward the target, clamped to 0..=100
    pub fn progress_percentage(&self) -> f64 {
        self.current_amount
            .percent_of(self.target_amount)
            .clamp(0.0, 100.0)
    }

    /// Amount still needed, floored at zero
    pub fn remaining(&self) -> Money {
        self.target_amount.saturating_remaining(self.current_amount)
    }

    /// Whether the deadline has passed without completion
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && today > self.deadline
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "In progress"
        }
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }

        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }

        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(self.current_amount));
        }

        for amount in [self.target_amount, self.current_amount] {
            if amount.exceeds_max() {
                return Err(GoalValidationError::AmountTooLarge(amount));
            }
        }

        if self.completed != self.target_reached() {
            return Err(GoalValidationError::CompletionMismatch {
                completed: self.completed,
                current: self.current_amount,
                target: self.target_amount,
            });
        }

        if self.completed && self.completed_at.is_none() {
            return Err(GoalValidationError::MissingCompletionTime);
        }

        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {})",
            self.title, self.current_amount, self.target_amount
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTitle,
    NonPositiveTarget(Money),
    NegativeCurrent(Money),
    AmountTooLarge(Money),
    CompletionMismatch {
        completed: bool,
        current: Money,
        target: Money,
    },
    MissingCompletionTime,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Goal title cannot be empty"),
            Self::NonPositiveTarget(amount) => {
                write!(f, "Goal target must be greater than zero ({})", amount)
            }
            Self::NegativeCurrent(amount) => {
                write!(f, "Goal amount cannot be negative ({})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Goal amount {} exceeds the maximum of {}",
                amount,
                Money::MAX_AMOUNT
            ),
            Self::CompletionMismatch {
                completed,
                current,
                target,
            } => write!(
                f,
                "Goal marked {} but holds {} of {}",
                if *completed { "completed" } else { "in progress" },
                current,
                target
            ),
            Self::MissingCompletionTime => {
                write!(f, "Completed goal is missing its completion time")
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn deadline() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 12, 31).unwrap()
    }

    #[test]
    fn test_deposit_completes_goal_once() {
        let now = Utc::now();
        let mut goal = Goal::new("Trip", Money::from_units(100), deadline())
            .with_initial_amount(Money::from_units(60), now);
        assert!(!goal.completed);

        let just_completed = goal.deposit(Money::from_units(50), now);

        assert!(just_completed);
        assert_eq!(goal.current_amount, Money::from_units(110));
        assert!(goal.completed);
        assert_eq!(goal.completed_at, Some(now));
        assert_eq!(goal.remaining(), Money::zero());
        assert_eq!(goal.progress_percentage(), 100.0);
    }

    #[test]
    fn test_deposit_after_completion_keeps_timestamp() {
        let first = Utc::now();
        let mut goal = Goal::new("Bike", Money::from_units(10), deadline());
        assert!(goal.deposit(Money::from_units(10), first));

        let later = first + chrono::Duration::days(1);
        assert!(!goal.deposit(Money::from_units(5), later));
        assert_eq!(goal.completed_at, Some(first));
        assert_eq!(goal.current_amount, Money::from_units(15));
    }

    #[test]
    fn test_partial_progress() {
        let mut goal = Goal::new("Laptop", Money::from_units(200), deadline());
        assert!(!goal.deposit(Money::from_units(50), Utc::now()));

        assert_eq!(goal.progress_percentage(), 25.0);
        assert_eq!(goal.remaining(), Money::from_units(150));
        assert!(!goal.completed);
        assert!(goal.completed_at.is_none());
    }

    #[test]
    fn test_initial_amount_at_target_is_completed() {
        let goal = Goal::new("Done", Money::from_units(10), deadline())
            .with_initial_amount(Money::from_units(10), Utc::now());
        assert!(goal.completed);
        assert!(goal.completed_at.is_some());
    }

    #[test]
    fn test_validation() {
        let mut goal = Goal::new("Fund", Money::from_units(100), deadline());
        assert!(goal.validate().is_ok());

        goal.target_amount = Money::zero();
        assert!(matches!(
            goal.validate(),
            Err(GoalValidationError::NonPositiveTarget(_))
        ));

        goal.target_amount = Money::from_units(100);
        goal.title = String::new();
        assert_eq!(goal.validate(), Err(GoalValidationError::EmptyTitle));

        goal.title = "Fund".into();
        goal.target_amount = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        assert!(matches!(
            goal.validate(),
            Err(GoalValidationError::AmountTooLarge(_))
        ));
    }

    #[test]
    fn test_validation_checks_completion_state() {
        let mut goal = Goal::new("Fund", Money::from_units(100), deadline());
        goal.current_amount = Money::from_units(200);
        assert!(matches!(
            goal.validate(),
            Err(GoalValidationError::CompletionMismatch { completed: false, .. })
        ));

        goal.completed = true;
        assert_eq!(goal.validate(), Err(GoalValidationError::MissingCompletionTime));

        goal.completed_at = Some(Utc::now());
        assert!(goal.validate().is_ok());

        goal.current_amount = Money::from_units(50);
        assert!(matches!(
            goal.validate(),
            Err(GoalValidationError::CompletionMismatch { completed: true, .. })
        ));
    }

    #[test]
    fn test_overdue() {
        let goal = Goal::new("Car", Money::from_units(100), deadline());
        let after = NaiveDate::from_ymd_opt(2031, 1, 1).unwrap();
        assert!(goal.is_overdue(after));
        assert!(!goal.is_overdue(deadline()));
    }
}
