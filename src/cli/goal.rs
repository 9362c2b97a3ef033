//! Savings goal CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::settings::Settings;
use crate::display::goal::{format_deposit_outcome, format_goal_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Goal, Money};
use crate::services::GoalService;
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals with their progress
    List,

    /// Create a savings goal
    Create {
        /// Goal title
        title: String,
        /// Target amount
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
        /// Amount already saved
        #[arg(short, long)]
        initial: Option<String>,
    },

    /// Add money to a goal
    Deposit {
        /// Goal title or ID
        goal: String,
        /// Amount to deposit
        amount: String,
    },

    /// Delete a goal
    Delete {
        /// Goal title or ID
        goal: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn find_goal(service: &GoalService, identifier: &str) -> FinanceResult<Goal> {
    service
        .find(identifier)?
        .ok_or_else(|| FinanceError::goal_not_found(identifier))
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: GoalCommands,
) -> FinanceResult<()> {
    let service = GoalService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::List => {
            print!("{}", format_goal_list(&service.list()?, currency, today));
        }

        GoalCommands::Create {
            title,
            target,
            deadline,
            initial,
        } => {
            let target = parse_amount(&target, "target amount")?;
            let initial = initial
                .map(|i| parse_amount(&i, "initial amount"))
                .transpose()?
                .unwrap_or_else(Money::zero);
            let deadline = parse_date(&deadline)?;

            let goal = service.create(&title, target, initial, deadline)?;
            println!("Created goal: {}", goal);
            println!("  Deadline: {}", goal.deadline);
            println!("  ID:       {}", goal.id.short());
            if goal.completed {
                println!("  Already reached!");
            }
        }

        GoalCommands::Deposit { goal, amount } => {
            let goal = find_goal(&service, &goal)?;
            let amount = parse_amount(&amount, "deposit amount")?;

            let outcome = service.deposit(goal.id, amount)?;
            print!("{}", format_deposit_outcome(&outcome, currency));
        }

        GoalCommands::Delete { goal, force } => {
            let goal = find_goal(&service, &goal)?;

            if !force {
                println!("About to delete goal: {}", goal);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(goal.id)?;
            println!("Deleted goal: {}", deleted.title);
        }
    }

    Ok(())
}
