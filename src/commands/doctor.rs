// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::Category;
use crate::db::decimal_col;
use crate::error::LedgerError;
use crate::models::TransactionKind;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();
    let mut drift = 0usize;

    // 1) Cached balances and spent counters out of step with the ledger
    let mut stmt = conn.prepare(
        "SELECT id, name, balance, opening_balance, spent FROM accounts ORDER BY id",
    )?;
    let accounts = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            decimal_col(r, 2)?,
            decimal_col(r, 3)?,
            decimal_col(r, 4)?,
        ))
    })?;
    for account in accounts {
        let (id, name, balance, opening, spent) = account?;
        let mut expected_balance = opening;
        let mut expected_spent = Decimal::ZERO;
        let mut st = conn.prepare("SELECT kind, amount FROM transactions WHERE account_id=?1")?;
        let entries = st.query_map([id], |r| {
            Ok((r.get::<_, TransactionKind>(0)?, decimal_col(r, 1)?))
        })?;
        for entry in entries {
            let (kind, amount) = entry?;
            expected_balance += kind.signed_effect(amount);
            if kind.is_spending() {
                expected_spent += amount;
            }
        }
        if expected_balance != balance {
            drift += 1;
            rows.push(vec![
                "balance_drift".into(),
                format!("account '{}' has {} but ledger says {}", name, balance, expected_balance),
            ]);
        }
        if expected_spent != spent {
            drift += 1;
            rows.push(vec![
                "spent_drift".into(),
                format!("account '{}' has {} but ledger says {}", name, spent, expected_spent),
            ]);
        }
    }

    // 2) History rows whose account is gone (kept on purpose, but worth surfacing)
    let orphans: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions
         WHERE account_id NOT IN (SELECT id FROM accounts)",
        [],
        |r| r.get(0),
    )?;
    if orphans > 0 {
        rows.push(vec![
            "orphan_history".into(),
            format!("{} transaction(s) reference deleted accounts", orphans),
        ]);
    }

    // 3) Spending categories outside the catalog (folded into 'uncategorized' in reports)
    let mut stmt3 = conn.prepare(
        "SELECT DISTINCT category FROM transactions
         WHERE kind IN ('expense','bill') ORDER BY category",
    )?;
    let mut cur = stmt3.query([])?;
    while let Some(r) = cur.next()? {
        let cat: String = r.get(0)?;
        if Category::lookup(&cat).is_none() {
            rows.push(vec!["unknown_category".into(), cat]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    if drift > 0 {
        return Err(LedgerError::InconsistentState(format!(
            "{} account(s) disagree with their ledger history",
            drift
        ))
        .into());
    }
    Ok(())
}
