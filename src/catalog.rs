// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
        }
    }
}

/// The closed category catalog. Stored category strings stay free-form,
/// but anything the catalog does not recognize is reported under
/// `Uncategorized` so aggregates never silently drop a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Dining,
    Housing,
    Transportation,
    Utilities,
    Healthcare,
    Entertainment,
    Shopping,
    Education,
    Travel,
    Insurance,
    Subscriptions,
    Salary,
    Business,
    Investments,
    Gifts,
    Uncategorized,
}

/// Catalog order. Drives the fixed shape of per-category report series.
pub const CATALOG: [Category; 17] = [
    Category::Groceries,
    Category::Dining,
    Category::Housing,
    Category::Transportation,
    Category::Utilities,
    Category::Healthcare,
    Category::Entertainment,
    Category::Shopping,
    Category::Education,
    Category::Travel,
    Category::Insurance,
    Category::Subscriptions,
    Category::Salary,
    Category::Business,
    Category::Investments,
    Category::Gifts,
    Category::Uncategorized,
];

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Dining => "dining",
            Category::Housing => "housing",
            Category::Transportation => "transportation",
            Category::Utilities => "utilities",
            Category::Healthcare => "healthcare",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Education => "education",
            Category::Travel => "travel",
            Category::Insurance => "insurance",
            Category::Subscriptions => "subscriptions",
            Category::Salary => "salary",
            Category::Business => "business",
            Category::Investments => "investments",
            Category::Gifts => "gifts",
            Category::Uncategorized => "uncategorized",
        }
    }

    /// Exact, case-sensitive catalog match.
    pub fn lookup(s: &str) -> Option<Category> {
        match s {
            "groceries" => Some(Category::Groceries),
            "dining" => Some(Category::Dining),
            "housing" => Some(Category::Housing),
            "transportation" => Some(Category::Transportation),
            "utilities" => Some(Category::Utilities),
            "healthcare" => Some(Category::Healthcare),
            "entertainment" => Some(Category::Entertainment),
            "shopping" => Some(Category::Shopping),
            "education" => Some(Category::Education),
            "travel" => Some(Category::Travel),
            "insurance" => Some(Category::Insurance),
            "subscriptions" => Some(Category::Subscriptions),
            "salary" => Some(Category::Salary),
            "business" => Some(Category::Business),
            "investments" => Some(Category::Investments),
            "gifts" => Some(Category::Gifts),
            "uncategorized" => Some(Category::Uncategorized),
            _ => None,
        }
    }

    /// Like `lookup`, but unknown strings land in the fallback bucket.
    pub fn resolve(s: &str) -> Category {
        Category::lookup(s).unwrap_or(Category::Uncategorized)
    }

    pub fn kind(self) -> CategoryKind {
        match self {
            Category::Salary | Category::Business | Category::Investments | Category::Gifts => {
                CategoryKind::Income
            }
            _ => CategoryKind::Expense,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Dining => "Dining out",
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Insurance => "Insurance",
            Category::Subscriptions => "Subscriptions",
            Category::Salary => "Salary",
            Category::Business => "Business income",
            Category::Investments => "Investment income",
            Category::Gifts => "Gifts received",
            Category::Uncategorized => "Uncategorized",
        }
    }
}
