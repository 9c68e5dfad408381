// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use monedero::error::LedgerError;
use monedero::models::AccountKind;
use monedero::transfer::{self, TRANSFER_CATEGORY};
use monedero::accounts;
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
    let x = accounts::create_account(
        &conn,
        "default",
        "Checking",
        AccountKind::Debit,
        dec("500"),
        dec("0"),
    )
    .unwrap();
    let y = accounts::create_account(
        &conn,
        "default",
        "Savings",
        AccountKind::Debit,
        dec("100"),
        dec("0"),
    )
    .unwrap();
    (conn, x, y)
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn balance_of(conn: &Connection, id: i64) -> Decimal {
    accounts::get_account(conn, "default", id).unwrap().balance
}

#[test]
fn transfer_moves_funds_and_links_legs() {
    let (mut conn, x, y) = setup();
    let receipt = transfer::transfer(
        &mut conn,
        "default",
        x,
        y,
        dec("100"),
        "Monthly savings",
        date("2025-08-01"),
        None,
    )
    .unwrap();

    assert_eq!(receipt.source_balance, dec("400"));
    assert_eq!(receipt.destination_balance, dec("200"));
    assert_eq!(balance_of(&conn, x), dec("400"));
    assert_eq!(balance_of(&conn, y), dec("200"));

    let (out_kind, out_account, out_desc, out_link): (String, i64, String, i64) = conn
        .query_row(
            "SELECT kind, account_id, description, transfer_id FROM transactions WHERE id=?1",
            [receipt.out_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(out_kind, "transfer_out");
    assert_eq!(out_account, x);
    assert_eq!(out_desc, "[To: Savings] Monthly savings");
    assert_eq!(out_link, receipt.transfer_id);

    let (in_kind, in_account, in_desc, in_link): (String, i64, String, i64) = conn
        .query_row(
            "SELECT kind, account_id, description, transfer_id FROM transactions WHERE id=?1",
            [receipt.in_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(in_kind, "transfer_in");
    assert_eq!(in_account, y);
    assert_eq!(in_desc, "[From: Checking] Monthly savings");
    assert_eq!(in_link, receipt.transfer_id);

    let categories: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM transactions WHERE category=?1",
            [TRANSFER_CATEGORY],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(categories, 2);
}

#[test]
fn same_account_is_rejected() {
    let (mut conn, x, _) = setup();
    let err = transfer::transfer(
        &mut conn,
        "default",
        x,
        x,
        dec("10"),
        "Loop",
        date("2025-08-01"),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::SameAccount));
    assert_eq!(balance_of(&conn, x), dec("500"));
}

#[test]
fn non_positive_amount_is_rejected() {
    let (mut conn, x, y) = setup();
    for amount in ["0", "-25"] {
        let err = transfer::transfer(
            &mut conn,
            "default",
            x,
            y,
            dec(amount),
            "Nothing",
            date("2025-08-01"),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }
}

#[test]
fn blank_description_is_rejected() {
    let (mut conn, x, y) = setup();
    let err = transfer::transfer(
        &mut conn,
        "default",
        x,
        y,
        dec("10"),
        "  ",
        date("2025-08-01"),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::MissingDescription));
}

#[test]
fn unknown_destination_leaves_source_untouched() {
    let (mut conn, x, _) = setup();
    let err = transfer::transfer(
        &mut conn,
        "default",
        x,
        999,
        dec("100"),
        "Into the void",
        date("2025-08-01"),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAccount(999)));
    // Neither a debit nor any ledger row may survive the failed attempt.
    assert_eq!(balance_of(&conn, x), dec("500"));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn wrong_owner_is_rejected() {
    let (mut conn, x, y) = setup();
    let err = transfer::transfer(
        &mut conn,
        "bob",
        x,
        y,
        dec("10"),
        "Not yours",
        date("2025-08-01"),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAccount(_)));
    assert_eq!(balance_of(&conn, x), dec("500"));
    assert_eq!(balance_of(&conn, y), dec("100"));
}

#[test]
fn transfer_does_not_count_as_spending() {
    let (mut conn, x, y) = setup();
    transfer::transfer(
        &mut conn,
        "default",
        x,
        y,
        dec("50"),
        "Stash",
        date("2025-08-01"),
        None,
    )
    .unwrap();
    let spent_x = accounts::get_account(&conn, "default", x).unwrap().spent;
    let spent_y = accounts::get_account(&conn, "default", y).unwrap().spent;
    assert_eq!(spent_x, Decimal::ZERO);
    assert_eq!(spent_y, Decimal::ZERO);
}
