//! Goal display formatting
//!
//! Goal tables with progress bars, and the message shown after a deposit.

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage};
use crate::models::Goal;
use crate::services::DepositOutcome;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    title: String,
    #[tabled(rename = "Saved")]
    current: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status(goal: &Goal, today: NaiveDate) -> String {
    if goal.is_overdue(today) {
        "Overdue".to_string()
    } else {
        goal.status_label().to_string()
    }
}

pub fn format_goal_list(goals: &[Goal], currency: &str, today: NaiveDate) -> String {
    if goals.is_empty() {
        return "No goals yet. Create one with 'fintrack goal create'.\n".to_string();
    }

    let rows = goals.iter().map(|g| {
        let pct = g.progress_percentage();
        GoalRow {
            id: g.id.short(),
            title: g.title.clone(),
            current: g.current_amount.format_with_symbol(currency),
            target: g.target_amount.format_with_symbol(currency),
            progress: format!("{} {:>5}", format_bar(pct, 100.0, 10), format_percentage(pct)),
            deadline: g.deadline.to_string(),
            status: status(g, today),
        }
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// Message after a deposit, with a celebration on the completing one
pub fn format_deposit_outcome(outcome: &DepositOutcome, currency: &str) -> String {
    let goal = &outcome.goal;
    let mut output = format!(
        "Deposited into '{}': {} of {} ({})\n",
        goal.title,
        goal.current_amount.format_with_symbol(currency),
        goal.target_amount.format_with_symbol(currency),
        format_percentage(goal.progress_percentage())
    );

    if outcome.just_completed {
        output.push_str(&format!(
            "🎉 Congratulations! You reached your goal '{}'.\n",
            goal.title
        ));
    } else if !goal.completed {
        output.push_str(&format!(
            "{} to go.\n",
            goal.remaining().format_with_symbol(currency)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::Utc;

    fn goal(target: i64, current: i64) -> Goal {
        Goal::new("Vacation", Money::from_units(target), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
            .with_initial_amount(Money::from_units(current), Utc::now())
    }

    #[test]
    fn test_goal_list() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let table = format_goal_list(&[goal(1000, 250)], "$", today);

        assert!(table.contains("Vacation"));
        assert!(table.contains("$250.00"));
        assert!(table.contains("25%"));
        assert!(table.contains("In progress"));
    }

    #[test]
    fn test_overdue_status() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let table = format_goal_list(&[goal(1000, 10)], "$", today);
        assert!(table.contains("Overdue"));
    }

    #[test]
    fn test_deposit_messages() {
        let done = DepositOutcome {
            goal: goal(100, 100),
            just_completed: true,
        };
        assert!(format_deposit_outcome(&done, "$").contains("Congratulations"));

        let partial = DepositOutcome {
            goal: goal(100, 40),
            just_completed: false,
        };
        let message = format_deposit_outcome(&partial, "$");
        assert!(message.contains("$60.00 to go."));
        assert!(!message.contains("Congratulations"));
    }
}
