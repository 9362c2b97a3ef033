//! What happened to the data, as typed events

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{CategoryKind, Money, TransactionKind};

const MAX_VALUE_CHARS: usize = 40;

/// One field an edit changed, rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub from: String,
    pub to: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, clip(&self.from), clip(&self.to))
    }
}

fn clip(value: &str) -> String {
    if value.chars().count() > MAX_VALUE_CHARS {
        let kept: String = value.chars().take(MAX_VALUE_CHARS - 3).collect();
        format!("{}...", kept)
    } else {
        value.to_string()
    }
}

/// Collects the fields that differ between two versions of a record
#[derive(Debug, Default)]
pub struct ChangeSet(Vec<FieldChange>);

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track<T>(mut self, field: &str, before: &T, after: &T) -> Self
    where
        T: PartialEq + fmt::Display + ?Sized,
    {
        if before != after {
            self.0.push(FieldChange {
                field: field.to_string(),
                from: before.to_string(),
                to: after.to_string(),
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldChange> {
        self.0
    }
}

/// A change to the stored data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    TransactionRecorded {
        kind: TransactionKind,
        amount: Money,
        category: String,
        date: NaiveDate,
    },
    TransactionEdited {
        changes: Vec<FieldChange>,
    },
    TransactionDeleted {
        kind: TransactionKind,
        amount: Money,
        category: String,
        date: NaiveDate,
    },
    CategoryCreated {
        kind: CategoryKind,
        color: String,
    },
    CategoryEdited {
        changes: Vec<FieldChange>,
        /// Transactions relabelled by a rename
        #[serde(default)]
        transactions_moved: usize,
    },
    CategoryDeleted {
        kind: CategoryKind,
    },
    GoalCreated {
        target: Money,
        initial: Money,
        deadline: NaiveDate,
    },
    GoalDeposit {
        amount: Money,
        balance: Money,
        target: Money,
        /// This deposit took the goal to its target
        #[serde(default)]
        reached_target: bool,
    },
    GoalDeleted {
        balance: Money,
        target: Money,
        completed: bool,
    },
    DataRestored {
        transactions: usize,
        categories: usize,
        goals: usize,
    },
}

impl AuditEvent {
    /// Short heading, e.g. "Goal deposit"
    pub fn heading(&self) -> &'static str {
        match self {
            Self::TransactionRecorded { .. } => "Transaction recorded",
            Self::TransactionEdited { .. } => "Transaction edited",
            Self::TransactionDeleted { .. } => "Transaction deleted",
            Self::CategoryCreated { .. } => "Category created",
            Self::CategoryEdited { .. } => "Category edited",
            Self::CategoryDeleted { .. } => "Category deleted",
            Self::GoalCreated { .. } => "Goal created",
            Self::GoalDeposit { .. } => "Goal deposit",
            Self::GoalDeleted { .. } => "Goal deleted",
            Self::DataRestored { .. } => "Data restored",
        }
    }

    /// One line of detail, or `None` when the heading says it all
    pub fn details(&self) -> Option<String> {
        match self {
            Self::TransactionRecorded {
                kind,
                amount,
                category,
                date,
            }
            | Self::TransactionDeleted {
                kind,
                amount,
                category,
                date,
            } => Some(format!(
                "{} {} in {} on {}",
                kind.label().to_lowercase(),
                amount,
                category,
                date
            )),
            Self::TransactionEdited { changes } => join_changes(changes),
            Self::CategoryCreated { kind, color } => {
                Some(format!("{} category, color {}", kind.label().to_lowercase(), color))
            }
            Self::CategoryEdited {
                changes,
                transactions_moved,
            } => {
                let mut line = join_changes(changes).unwrap_or_default();
                if *transactions_moved > 0 {
                    if !line.is_empty() {
                        line.push_str("; ");
                    }
                    line.push_str(&format!("{} transaction(s) moved", transactions_moved));
                }
                (!line.is_empty()).then_some(line)
            }
            Self::CategoryDeleted { kind } => {
                Some(format!("{} category", kind.label().to_lowercase()))
            }
            Self::GoalCreated {
                target,
                initial,
                deadline,
            } => Some(format!("{} of {} by {}", initial, target, deadline)),
            Self::GoalDeposit {
                amount,
                balance,
                target,
                reached_target,
            } => {
                let mut line = format!("+{}, now {} of {}", amount, balance, target);
                if *reached_target {
                    line.push_str(", target reached");
                }
                Some(line)
            }
            Self::GoalDeleted {
                balance,
                target,
                completed,
            } => Some(format!(
                "{} of {}{}",
                balance,
                target,
                if *completed { ", completed" } else { "" }
            )),
            Self::DataRestored {
                transactions,
                categories,
                goals,
            } => Some(format!(
                "{} transactions, {} categories, {} goals",
                transactions, categories, goals
            )),
        }
    }
}

fn join_changes(changes: &[FieldChange]) -> Option<String> {
    if changes.is_empty() {
        return None;
    }
    Some(
        changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_set_keeps_only_differences() {
        let changes = ChangeSet::new()
            .track("amount", &Money::from_units(50), &Money::from_units(75))
            .track("category", "Food", "Food")
            .track("description", "Lunch", "Team lunch")
            .into_vec();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].to_string(), "amount: $50.00 -> $75.00");
        assert_eq!(changes[1].field, "description");
    }

    #[test]
    fn test_long_values_are_clipped_on_char_boundaries() {
        let change = FieldChange {
            field: "description".into(),
            from: "é".repeat(60),
            to: "short".into(),
        };
        let line = change.to_string();
        assert!(line.starts_with("description: éé"));
        assert!(line.ends_with("é... -> short"));
    }

    #[test]
    fn test_deposit_details() {
        let event = AuditEvent::GoalDeposit {
            amount: Money::from_units(50),
            balance: Money::from_units(110),
            target: Money::from_units(100),
            reached_target: true,
        };
        assert_eq!(event.heading(), "Goal deposit");
        assert_eq!(
            event.details().unwrap(),
            "+$50.00, now $110.00 of $100.00, target reached"
        );
    }

    #[test]
    fn test_rename_details_include_moved_transactions() {
        let event = AuditEvent::CategoryEdited {
            changes: ChangeSet::new().track("name", "Food", "Groceries").into_vec(),
            transactions_moved: 3,
        };
        assert_eq!(
            event.details().unwrap(),
            "name: Food -> Groceries; 3 transaction(s) moved"
        );

        let untouched = AuditEvent::CategoryEdited {
            changes: Vec::new(),
            transactions_moved: 0,
        };
        assert!(untouched.details().is_none());
    }

    #[test]
    fn test_events_serialize_with_tag() {
        let event = AuditEvent::DataRestored {
            transactions: 2,
            categories: 14,
            goals: 1,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "data_restored");
        assert_eq!(value["categories"], 14);

        let back: AuditEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }
}
