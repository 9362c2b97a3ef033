//! Category model
//!
//! Categories label transactions. A category applies to income, expense or
//! both, and carries a display color used by charts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;
use super::transaction::TransactionKind;

/// Which transaction kinds a category can label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

impl CategoryKind {
    /// Whether transactions of `kind` may use a category of this kind
    pub fn accepts(&self, kind: TransactionKind) -> bool {
        match self {
            Self::Both => true,
            Self::Income => kind == TransactionKind::Income,
            Self::Expense => kind == TransactionKind::Expense,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown category type '{}'", other)),
        }
    }
}

impl From<TransactionKind> for CategoryKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

/// Color given to categories created without one
pub const DEFAULT_COLOR: &str = "#6B7280";

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Category name, unique ignoring case
    pub name: String,

    /// Display color as `#RRGGBB`
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind, color: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: color.into(),
            kind,
        }
    }

    /// Whether transactions of `kind` may use this category
    pub fn accepts(&self, kind: TransactionKind) -> bool {
        self.kind.accepts(kind)
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }

    /// The built-in category set written on first run
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, kind, color)| Category::new(*name, *kind, *color))
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const DEFAULT_CATEGORIES: &[(&str, CategoryKind, &str)] = &[
    ("Salary", CategoryKind::Income, "#10B981"),
    ("Freelance", CategoryKind::Income, "#059669"),
    ("Investments", CategoryKind::Income, "#047857"),
    ("Sales", CategoryKind::Income, "#065F46"),
    ("Other Income", CategoryKind::Income, "#064E3B"),
    ("Food", CategoryKind::Expense, "#EF4444"),
    ("Transport", CategoryKind::Expense, "#DC2626"),
    ("Housing", CategoryKind::Expense, "#B91C1C"),
    ("Health", CategoryKind::Expense, "#991B1B"),
    ("Education", CategoryKind::Expense, "#7F1D1D"),
    ("Entertainment", CategoryKind::Expense, "#F59E0B"),
    ("Shopping", CategoryKind::Expense, "#D97706"),
    ("Bills", CategoryKind::Expense, "#B45309"),
    ("Other Expenses", CategoryKind::Expense, "#92400E"),
];

/// Whether `s` is a `#RRGGBB` color
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}', expected #RRGGBB", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
