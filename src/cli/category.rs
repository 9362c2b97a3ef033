//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, CategoryKind};
use crate::services::category::validate_color;
use crate::services::{CategoryService, UpdateCategoryInput};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their usage
    List,

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Which transactions may use it (income, expense, both)
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: CategoryKind,
        /// Display color as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Edit a category; a new name is applied to its transactions too
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<CategoryKind>,
        /// New color
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a category that no transaction uses
    Delete {
        /// Category name or ID
        category: String,
    },
}

fn find_category(service: &CategoryService, identifier: &str) -> FinanceResult<Category> {
    service
        .find(identifier)?
        .ok_or_else(|| FinanceError::category_not_found(identifier))
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FinanceResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            let transactions = storage.transactions.get_all()?;
            print!(
                "{}",
                format_category_list(&categories, |name| {
                    transactions.iter().filter(|t| t.uses_category(name)).count()
                })
            );
        }

        CategoryCommands::Show { category } => {
            let category = find_category(&service, &category)?;
            let usage = service.usage_count(&category.name)?;
            print!("{}", format_category_details(&category, usage));
        }

        CategoryCommands::Create { name, kind, color } => {
            if let Some(color) = &color {
                validate_color(color)?;
            }

            let category = service.create(&name, kind, color.as_deref())?;
            println!("Created category: {}", category.name);
            println!("  Type:  {}", category.kind.label());
            println!("  Color: {}", category.color);
            println!("  ID:    {}", category.id.short());
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            color,
        } => {
            let existing = find_category(&service, &category)?;

            if name.is_none() && kind.is_none() && color.is_none() {
                println!("No changes specified. Use --name, --type or --color.");
                return Ok(());
            }

            if let Some(color) = &color {
                validate_color(color)?;
            }

            let update = service.update(existing.id, UpdateCategoryInput { name, kind, color })?;
            println!("Updated category: {}", update.category.name);
            if update.renamed_transactions > 0 {
                println!(
                    "  {} transaction(s) moved from '{}'",
                    update.renamed_transactions, existing.name
                );
            }
        }

        CategoryCommands::Delete { category } => {
            let existing = find_category(&service, &category)?;
            let deleted = service.delete(existing.id)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
