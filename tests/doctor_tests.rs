// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use monedero::commands::doctor;
use monedero::ledger::{self, TransactionInput};
use monedero::models::{AccountKind, TransactionKind};
use monedero::{accounts, transfer};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> (Connection, i64, i64) {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE accounts(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            balance TEXT NOT NULL DEFAULT '0',
            opening_balance TEXT NOT NULL DEFAULT '0',
            monthly_budget TEXT NOT NULL DEFAULT '0',
            spent TEXT NOT NULL DEFAULT '0',
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(owner, name)
        );
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            kind TEXT NOT NULL,
            amount TEXT NOT NULL,
            description TEXT NOT NULL,
            transaction_date TEXT NOT NULL,
            payment_date TEXT NOT NULL,
            account_id INTEGER NOT NULL,
            category TEXT NOT NULL,
            notes TEXT,
            transfer_id INTEGER,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .unwrap();
    let a = accounts::create_account(
        &conn,
        "default",
        "Checking",
        AccountKind::Debit,
        dec("100"),
        dec("0"),
    )
    .unwrap();
    let b = accounts::create_account(
        &conn,
        "default",
        "Savings",
        AccountKind::Debit,
        dec("50"),
        dec("0"),
    )
    .unwrap();
    (conn, a, b)
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn input(account_id: i64, amount: &str) -> TransactionInput {
    TransactionInput {
        owner: "default".to_string(),
        kind: TransactionKind::Expense,
        amount: dec(amount),
        description: "fixture".to_string(),
        transaction_date: date("2025-08-05"),
        payment_date: date("2025-08-05"),
        account_id,
        category: "groceries".to_string(),
        notes: None,
    }
}

#[test]
fn clean_ledger_passes() {
    let (mut conn, a, _) = setup();
    ledger::record(&mut conn, &input(a, "25")).unwrap();
    doctor::handle(&conn).unwrap();
}

#[test]
fn transfer_legs_reconcile() {
    let (mut conn, a, b) = setup();
    transfer::transfer(
        &mut conn,
        "default",
        a,
        b,
        dec("30"),
        "Stash",
        date("2025-08-01"),
        None,
    )
    .unwrap();
    doctor::handle(&conn).unwrap();
}

#[test]
fn tampered_balance_fails() {
    let (mut conn, a, _) = setup();
    ledger::record(&mut conn, &input(a, "25")).unwrap();
    conn.execute("UPDATE accounts SET balance='999' WHERE id=1", [])
        .unwrap();
    assert!(doctor::handle(&conn).is_err());
}

#[test]
fn tampered_spent_counter_fails() {
    let (mut conn, a, _) = setup();
    ledger::record(&mut conn, &input(a, "25")).unwrap();
    conn.execute("UPDATE accounts SET spent='0' WHERE id=1", [])
        .unwrap();
    assert!(doctor::handle(&conn).is_err());
}

#[test]
fn orphan_history_is_reported_but_not_fatal() {
    let (mut conn, _, b) = setup();
    ledger::record(&mut conn, &input(b, "10")).unwrap();
    accounts::delete_account(&conn, "default", b).unwrap();
    doctor::handle(&conn).unwrap();
}

#[test]
fn unknown_spending_category_is_reported_but_not_fatal() {
    let (mut conn, a, _) = setup();
    let mut i = input(a, "10");
    i.category = "weird-stuff".to_string();
    ledger::record(&mut conn, &i).unwrap();
    doctor::handle(&conn).unwrap();
}
