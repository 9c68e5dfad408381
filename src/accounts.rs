// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Account store. Balances here are a denormalized cache of the ledger:
//! `balance == opening_balance + sum of signed effects of live entries`.
//! Higher layers maintain that invariant exclusively through
//! [`adjust_balance`], wrapped in the SQLite transaction of the operation
//! that caused the change.

use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::db::decimal_col;
use crate::error::LedgerError;
use crate::models::{Account, AccountKind};

const ACCOUNT_COLS: &str = "id, owner, name, kind, balance, opening_balance, monthly_budget, spent";

fn account_from_row(r: &Row) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        owner: r.get(1)?,
        name: r.get(2)?,
        kind: r.get(3)?,
        balance: decimal_col(r, 4)?,
        opening_balance: decimal_col(r, 5)?,
        monthly_budget: decimal_col(r, 6)?,
        spent: decimal_col(r, 7)?,
    })
}

pub fn create_account(
    conn: &Connection,
    owner: &str,
    name: &str,
    kind: AccountKind,
    opening_balance: Decimal,
    monthly_budget: Decimal,
) -> Result<i64, LedgerError> {
    let opening = opening_balance.round_dp(2);
    let budget = monthly_budget.round_dp(2);
    if budget < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(budget));
    }
    conn.execute(
        "INSERT INTO accounts(owner, name, kind, balance, opening_balance, monthly_budget, spent)
         VALUES (?1, ?2, ?3, ?4, ?4, ?5, '0')",
        params![owner, name, kind, opening.to_string(), budget.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_accounts(conn: &Connection, owner: &str) -> Result<Vec<Account>, LedgerError> {
    let sql = format!("SELECT {ACCOUNT_COLS} FROM accounts WHERE owner=?1 ORDER BY name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner], account_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get_account(conn: &Connection, owner: &str, id: i64) -> Result<Account, LedgerError> {
    let sql = format!("SELECT {ACCOUNT_COLS} FROM accounts WHERE id=?1 AND owner=?2");
    let account = conn
        .query_row(&sql, params![id, owner], account_from_row)
        .optional()?;
    account.ok_or(LedgerError::InvalidAccount(id))
}

/// Update account metadata. Balances are never writable here; they move
/// only through the apply/reverse protocol in the ledger and transfer
/// modules.
pub fn update_account(
    conn: &Connection,
    owner: &str,
    id: i64,
    name: Option<&str>,
    kind: Option<AccountKind>,
    monthly_budget: Option<Decimal>,
) -> Result<Account, LedgerError> {
    let mut account = get_account(conn, owner, id)?;
    if let Some(n) = name {
        account.name = n.to_string();
    }
    if let Some(k) = kind {
        account.kind = k;
    }
    if let Some(mb) = monthly_budget {
        let mb = mb.round_dp(2);
        if mb < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(mb));
        }
        account.monthly_budget = mb;
    }
    conn.execute(
        "UPDATE accounts SET name=?1, kind=?2, monthly_budget=?3 WHERE id=?4",
        params![
            account.name,
            account.kind,
            account.monthly_budget.to_string(),
            id
        ],
    )?;
    Ok(account)
}

/// Delete the account row. Ledger history referencing it is kept.
pub fn delete_account(conn: &Connection, owner: &str, id: i64) -> Result<(), LedgerError> {
    let n = conn.execute(
        "DELETE FROM accounts WHERE id=?1 AND owner=?2",
        params![id, owner],
    )?;
    if n == 0 {
        return Err(LedgerError::InvalidAccount(id));
    }
    Ok(())
}

/// The single balance-mutation primitive. Applies `delta` to the stored
/// balance and returns the new value; fails without touching anything if
/// the account no longer exists.
pub fn adjust_balance(
    conn: &Connection,
    account_id: i64,
    delta: Decimal,
) -> Result<Decimal, LedgerError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT balance FROM accounts WHERE id=?1",
            params![account_id],
            |r| r.get(0),
        )
        .optional()?;
    let raw = match raw {
        Some(s) => s,
        None => return Err(LedgerError::InvalidAccount(account_id)),
    };
    let balance = raw.parse::<Decimal>().map_err(|_| {
        LedgerError::InconsistentState(format!(
            "account {} holds non-decimal balance '{}'",
            account_id, raw
        ))
    })?;
    let next = balance + delta;
    conn.execute(
        "UPDATE accounts SET balance=?1 WHERE id=?2",
        params![next.to_string(), account_id],
    )?;
    Ok(next)
}

/// Companion to `adjust_balance` for the `spent` running total, which
/// tracks expense/bill amounts only.
pub(crate) fn adjust_spent(
    conn: &Connection,
    account_id: i64,
    delta: Decimal,
) -> Result<(), LedgerError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT spent FROM accounts WHERE id=?1",
            params![account_id],
            |r| r.get(0),
        )
        .optional()?;
    let raw = match raw {
        Some(s) => s,
        None => return Err(LedgerError::InvalidAccount(account_id)),
    };
    let spent = raw.parse::<Decimal>().map_err(|_| {
        LedgerError::InconsistentState(format!(
            "account {} holds non-decimal spent '{}'",
            account_id, raw
        ))
    })?;
    conn.execute(
        "UPDATE accounts SET spent=?1 WHERE id=?2",
        params![(spent + delta).to_string(), account_id],
    )?;
    Ok(())
}

pub(crate) fn exists(conn: &Connection, account_id: i64) -> Result<bool, LedgerError> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM accounts WHERE id=?1",
            params![account_id],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}
