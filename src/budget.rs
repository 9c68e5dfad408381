// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget evaluator. `evaluate` is a pure on-demand query over the live
//! ledger; nothing here caches overrun state, so edits and deletions are
//! reflected the next time someone asks.

use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::decimal_col;
use crate::error::LedgerError;
use crate::models::Budget;
use crate::utils::month_key;

fn budget_from_row(r: &Row) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: r.get(0)?,
        owner: r.get(1)?,
        category: r.get(2)?,
        limit: decimal_col(r, 3)?,
        month: r.get(4)?,
        year: r.get(5)?,
    })
}

fn check_month(month: u32) -> Result<(), LedgerError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(LedgerError::InvalidPeriod(format!(
            "month {} out of range 1..=12",
            month
        )))
    }
}

/// Create or update the limit for `(owner, category, month, year)`.
/// At most one budget row ever exists per key.
pub fn set_budget(
    conn: &Connection,
    owner: &str,
    category: &str,
    month: u32,
    year: i32,
    limit: Decimal,
) -> Result<Budget, LedgerError> {
    check_month(month)?;
    let limit = limit.round_dp(2);
    if limit <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(limit));
    }
    conn.execute(
        "INSERT INTO budgets(owner, category, limit_amount, month, year)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(owner, category, month, year)
         DO UPDATE SET limit_amount=excluded.limit_amount",
        params![owner, category, limit.to_string(), month, year],
    )?;
    let budget = conn.query_row(
        "SELECT id, owner, category, limit_amount, month, year FROM budgets
         WHERE owner=?1 AND category=?2 AND month=?3 AND year=?4",
        params![owner, category, month, year],
        budget_from_row,
    )?;
    Ok(budget)
}

pub fn delete_budget(
    conn: &Connection,
    owner: &str,
    category: &str,
    month: u32,
    year: i32,
) -> Result<(), LedgerError> {
    check_month(month)?;
    let n = conn.execute(
        "DELETE FROM budgets WHERE owner=?1 AND category=?2 AND month=?3 AND year=?4",
        params![owner, category, month, year],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound(format!(
            "budget for '{}' in {}",
            category,
            month_key(year, month)
        )));
    }
    Ok(())
}

pub fn list_budgets(
    conn: &Connection,
    owner: &str,
    year: Option<i32>,
) -> Result<Vec<Budget>, LedgerError> {
    let mut out = Vec::new();
    if let Some(y) = year {
        let mut stmt = conn.prepare(
            "SELECT id, owner, category, limit_amount, month, year FROM budgets
             WHERE owner=?1 AND year=?2 ORDER BY year DESC, month DESC, category",
        )?;
        let rows = stmt.query_map(params![owner, y], budget_from_row)?;
        for row in rows {
            out.push(row?);
        }
    } else {
        let mut stmt = conn.prepare(
            "SELECT id, owner, category, limit_amount, month, year FROM budgets
             WHERE owner=?1 ORDER BY year DESC, month DESC, category",
        )?;
        let rows = stmt.query_map(params![owner], budget_from_row)?;
        for row in rows {
            out.push(row?);
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStanding {
    pub category: String,
    pub month: u32,
    pub year: i32,
    pub limit: Decimal,
    pub spent: Decimal,
    pub exceeded: bool,
    pub over_by: Decimal,
}

/// Compare accumulated expense/bill spend against the configured limit.
/// No budget row means no ceiling: `limit` reports 0 and `exceeded`
/// stays false no matter the spend.
pub fn evaluate(
    conn: &Connection,
    owner: &str,
    category: &str,
    month: u32,
    year: i32,
) -> Result<BudgetStanding, LedgerError> {
    check_month(month)?;
    let limit: Decimal = conn
        .query_row(
            "SELECT limit_amount FROM budgets
             WHERE owner=?1 AND category=?2 AND month=?3 AND year=?4",
            params![owner, category, month, year],
            |r| decimal_col(r, 0),
        )
        .optional()?
        .unwrap_or(Decimal::ZERO);
    let spent = spent_in_month(conn, owner, category, month, year)?;
    let exceeded = limit > Decimal::ZERO && spent > limit;
    let over_by = (spent - limit).max(Decimal::ZERO);
    Ok(BudgetStanding {
        category: category.to_string(),
        month,
        year,
        limit,
        spent,
        exceeded,
        over_by,
    })
}

/// Sum of expense/bill amounts for `(owner, category)` dated inside the
/// given month. Matching is case-sensitive on the raw category string.
pub(crate) fn spent_in_month(
    conn: &Connection,
    owner: &str,
    category: &str,
    month: u32,
    year: i32,
) -> Result<Decimal, LedgerError> {
    let mut stmt = conn.prepare(
        "SELECT amount FROM transactions
         WHERE owner=?1 AND category=?2 AND kind IN ('expense','bill')
           AND substr(transaction_date,1,7)=?3",
    )?;
    let mut rows = stmt.query(params![owner, category, month_key(year, month)])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        total += decimal_col(r, 0)?;
    }
    Ok(total)
}
