// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction ledger. Every mutation runs inside one SQLite transaction
//! so the ledger row and the balance adjustment land together or not at
//! all; an early return drops the transaction and rolls both back.

use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::accounts;
use crate::db::decimal_col;
use crate::error::LedgerError;
use crate::models::{Transaction, TransactionKind};
use crate::utils::month_key;

const TX_COLS: &str = "id, owner, kind, amount, description, transaction_date, payment_date, \
                       account_id, category, notes, transfer_id, created_at";

pub(crate) fn tx_from_row(r: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        owner: r.get(1)?,
        kind: r.get(2)?,
        amount: decimal_col(r, 3)?,
        description: r.get(4)?,
        transaction_date: r.get(5)?,
        payment_date: r.get(6)?,
        account_id: r.get(7)?,
        category: r.get(8)?,
        notes: r.get(9)?,
        transfer_id: r.get(10)?,
        created_at: r.get(11)?,
    })
}

/// Caller-supplied fields for `record` and `update`.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub owner: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub transaction_date: chrono::NaiveDate,
    pub payment_date: chrono::NaiveDate,
    pub account_id: i64,
    pub category: String,
    pub notes: Option<String>,
}

fn validate(input: &TransactionInput) -> Result<Decimal, LedgerError> {
    let amount = input.amount.round_dp(2);
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(input.amount));
    }
    if input.description.trim().is_empty() {
        return Err(LedgerError::MissingDescription);
    }
    Ok(amount)
}

/// Record a new ledger entry and apply its signed effect to the target
/// account. If the balance adjustment fails, no row is persisted.
pub fn record(conn: &mut Connection, input: &TransactionInput) -> Result<Transaction, LedgerError> {
    let amount = validate(input)?;
    let tx = conn.transaction()?;
    accounts::get_account(&tx, &input.owner, input.account_id)?;
    accounts::adjust_balance(&tx, input.account_id, input.kind.signed_effect(amount))?;
    if input.kind.is_spending() {
        accounts::adjust_spent(&tx, input.account_id, amount)?;
    }
    tx.execute(
        "INSERT INTO transactions(owner, kind, amount, description, transaction_date,
            payment_date, account_id, category, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            input.owner,
            input.kind,
            amount.to_string(),
            input.description,
            input.transaction_date.to_string(),
            input.payment_date.to_string(),
            input.account_id,
            input.category,
            input.notes
        ],
    )?;
    let id = tx.last_insert_rowid();
    let recorded = get_transaction(&tx, &input.owner, id)?;
    tx.commit()?;
    Ok(recorded)
}

/// Replace an existing entry: reverse the old signed effect, apply the new
/// one (possibly against a different account), then overwrite the row.
/// When the edit moves the entry between accounts, both sides commit
/// together or neither does.
pub fn update(
    conn: &mut Connection,
    id: i64,
    input: &TransactionInput,
) -> Result<Transaction, LedgerError> {
    let amount = validate(input)?;
    let tx = conn.transaction()?;
    let old = get_transaction(&tx, &input.owner, id)?;
    // The old account may have been deleted since; its history row stays,
    // and there is no balance left to reverse against.
    if accounts::exists(&tx, old.account_id)? {
        accounts::adjust_balance(&tx, old.account_id, -old.kind.signed_effect(old.amount))?;
        if old.kind.is_spending() {
            accounts::adjust_spent(&tx, old.account_id, -old.amount)?;
        }
    }
    accounts::get_account(&tx, &input.owner, input.account_id)?;
    accounts::adjust_balance(&tx, input.account_id, input.kind.signed_effect(amount))?;
    if input.kind.is_spending() {
        accounts::adjust_spent(&tx, input.account_id, amount)?;
    }
    tx.execute(
        "UPDATE transactions SET kind=?1, amount=?2, description=?3, transaction_date=?4,
            payment_date=?5, account_id=?6, category=?7, notes=?8
         WHERE id=?9",
        params![
            input.kind,
            amount.to_string(),
            input.description,
            input.transaction_date.to_string(),
            input.payment_date.to_string(),
            input.account_id,
            input.category,
            input.notes,
            id
        ],
    )?;
    let updated = get_transaction(&tx, &input.owner, id)?;
    tx.commit()?;
    Ok(updated)
}

/// Remove an entry after reversing its effect against its account.
pub fn delete(conn: &mut Connection, owner: &str, id: i64) -> Result<(), LedgerError> {
    let tx = conn.transaction()?;
    let old = get_transaction(&tx, owner, id)?;
    if accounts::exists(&tx, old.account_id)? {
        accounts::adjust_balance(&tx, old.account_id, -old.kind.signed_effect(old.amount))?;
        if old.kind.is_spending() {
            accounts::adjust_spent(&tx, old.account_id, -old.amount)?;
        }
    }
    tx.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    tx.commit()?;
    Ok(())
}

pub fn get_transaction(
    conn: &Connection,
    owner: &str,
    id: i64,
) -> Result<Transaction, LedgerError> {
    let sql = format!("SELECT {TX_COLS} FROM transactions WHERE id=?1 AND owner=?2");
    let found = conn
        .query_row(&sql, params![id, owner], tx_from_row)
        .optional()?;
    found.ok_or_else(|| LedgerError::NotFound(format!("transaction {}", id)))
}

/// Entries for one calendar month, newest first.
pub fn list_month(
    conn: &Connection,
    owner: &str,
    year: i32,
    month: u32,
) -> Result<Vec<Transaction>, LedgerError> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidPeriod(format!(
            "month {} out of range 1..=12",
            month
        )));
    }
    let sql = format!(
        "SELECT {TX_COLS} FROM transactions
         WHERE owner=?1 AND substr(transaction_date,1,7)=?2
         ORDER BY transaction_date DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner, month_key(year, month)], tx_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// The most recent `limit` entries across all kinds, newest first.
pub fn recent(conn: &Connection, owner: &str, limit: usize) -> Result<Vec<Transaction>, LedgerError> {
    let sql = format!(
        "SELECT {TX_COLS} FROM transactions WHERE owner=?1
         ORDER BY transaction_date DESC, id DESC LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner, limit as i64], tx_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
