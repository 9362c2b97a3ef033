//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Used")]
    usage: usize,
}

/// Format categories with their transaction usage counts.
///
/// `usage` is looked up by category name.
pub fn format_category_list<F>(categories: &[Category], usage: F) -> String
where
    F: Fn(&str) -> usize,
{
    if categories.is_empty() {
        return "No categories found.\n\nRun 'fintrack init' to create the default categories.\n"
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.short(),
        name: c.name.clone(),
        kind: c.kind.label(),
        color: c.color.clone(),
        usage: usage(&c.name),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

pub fn format_category_details(category: &Category, usage: usize) -> String {
    format!(
        "Category: {}\nID:       {}\nType:     {}\nColor:    {}\nUsed by:  {} transaction(s)\n",
        category.name,
        category.id,
        category.kind.label(),
        category.color,
        usage
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_includes_defaults() {
        let categories = Category::defaults();
        let table = format_category_list(&categories, |name| if name == "Food" { 3 } else { 0 });

        assert!(table.contains("Salary"));
        assert!(table.contains("Other Expenses"));
        assert!(table.contains("#EF4444"));
        assert!(table.contains("Used"));
    }

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[], |_| 0).starts_with("No categories found."));
    }

    #[test]
    fn test_details() {
        let category = &Category::defaults()[0];
        let details = format_category_details(category, 2);
        assert!(details.contains("Category: Salary"));
        assert!(details.contains("Used by:  2 transaction(s)"));
    }
}
