// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transfer executor. A transfer is one operation producing two linked
//! ledger legs; no caller ever observes a state with only one side
//! applied.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accounts;
use crate::error::LedgerError;
use crate::models::TransactionKind;

/// Category carried by transfer legs. Not part of the catalog: transfers
/// are neither spending nor income and stay out of the aggregates.
pub const TRANSFER_CATEGORY: &str = "transfer";

#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub transfer_id: i64,
    pub out_id: i64,
    pub in_id: i64,
    pub source_balance: Decimal,
    pub destination_balance: Decimal,
}

/// Move `amount` between two accounts of the same owner, recording a
/// `TransferOut`/`TransferIn` leg pair that shares a correlation id.
/// Returns both post-transfer balances.
pub fn transfer(
    conn: &mut Connection,
    owner: &str,
    source: i64,
    destination: i64,
    amount: Decimal,
    description: &str,
    date: NaiveDate,
    notes: Option<&str>,
) -> Result<TransferReceipt, LedgerError> {
    let rounded = amount.round_dp(2);
    if rounded <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    if source == destination {
        return Err(LedgerError::SameAccount);
    }
    if description.trim().is_empty() {
        return Err(LedgerError::MissingDescription);
    }

    let tx = conn.transaction()?;
    let src = accounts::get_account(&tx, owner, source)?;
    let dst = accounts::get_account(&tx, owner, destination)?;

    let outcome = (|| -> Result<TransferReceipt, LedgerError> {
        let source_balance = accounts::adjust_balance(&tx, source, -rounded)?;
        let destination_balance = accounts::adjust_balance(&tx, destination, rounded)?;

        tx.execute(
            "INSERT INTO transactions(owner, kind, amount, description, transaction_date,
                payment_date, account_id, category, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                owner,
                TransactionKind::TransferOut,
                rounded.to_string(),
                format!("[To: {}] {}", dst.name, description),
                date.to_string(),
                date.to_string(),
                source,
                TRANSFER_CATEGORY,
                notes
            ],
        )?;
        let out_id = tx.last_insert_rowid();
        // The out leg's row id doubles as the pair's correlation id.
        tx.execute(
            "UPDATE transactions SET transfer_id=?1 WHERE id=?1",
            params![out_id],
        )?;
        tx.execute(
            "INSERT INTO transactions(owner, kind, amount, description, transaction_date,
                payment_date, account_id, category, notes, transfer_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                owner,
                TransactionKind::TransferIn,
                rounded.to_string(),
                format!("[From: {}] {}", src.name, description),
                date.to_string(),
                date.to_string(),
                destination,
                TRANSFER_CATEGORY,
                notes,
                out_id
            ],
        )?;
        let in_id = tx.last_insert_rowid();

        Ok(TransferReceipt {
            transfer_id: out_id,
            out_id,
            in_id,
            source_balance,
            destination_balance,
        })
    })();

    match outcome {
        Ok(receipt) => {
            tx.commit()?;
            Ok(receipt)
        }
        Err(err) => {
            // Compensating reversal: undo whatever side already applied
            // before reporting the original failure.
            if let Err(rollback_err) = tx.rollback() {
                return Err(LedgerError::InconsistentState(format!(
                    "transfer {} -> {} failed ({}) and its reversal also failed: {}",
                    source, destination, err, rollback_err
                )));
            }
            Err(err)
        }
    }
}
