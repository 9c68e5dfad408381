// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monedero::budget;
use monedero::error::LedgerError;
use monedero::{cli, commands};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
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
        CREATE TABLE budgets(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            category TEXT NOT NULL,
            limit_amount TEXT NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            UNIQUE(owner, category, month, year)
        );
        "#,
    )
    .unwrap();
    conn
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn spend(conn: &Connection, kind: &str, amount: &str, category: &str, day: &str) {
    conn.execute(
        "INSERT INTO transactions(owner, kind, amount, description, transaction_date,
            payment_date, account_id, category)
         VALUES ('default', ?1, ?2, 'fixture', ?3, ?3, 1, ?4)",
        params![kind, amount, day, category],
    )
    .unwrap();
}

#[test]
fn set_budget_upserts_on_the_period_key() {
    let conn = setup();
    budget::set_budget(&conn, "default", "dining", 8, 2025, dec("50")).unwrap();
    let b = budget::set_budget(&conn, "default", "dining", 8, 2025, dec("80")).unwrap();
    assert_eq!(b.limit, dec("80"));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM budgets", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn spend_equal_to_limit_is_within_budget() {
    let conn = setup();
    budget::set_budget(&conn, "default", "dining", 8, 2025, dec("100")).unwrap();
    spend(&conn, "expense", "60", "dining", "2025-08-05");
    spend(&conn, "bill", "40", "dining", "2025-08-20");

    let standing = budget::evaluate(&conn, "default", "dining", 8, 2025).unwrap();
    assert_eq!(standing.spent, dec("100"));
    assert!(!standing.exceeded);
    assert_eq!(standing.over_by, Decimal::ZERO);

    // One extra cent tips it over.
    spend(&conn, "expense", "0.01", "dining", "2025-08-21");
    let standing = budget::evaluate(&conn, "default", "dining", 8, 2025).unwrap();
    assert!(standing.exceeded);
    assert_eq!(standing.over_by, dec("0.01"));
}

#[test]
fn absent_budget_is_unbounded() {
    let conn = setup();
    spend(&conn, "expense", "500", "travel", "2025-08-02");
    let standing = budget::evaluate(&conn, "default", "travel", 8, 2025).unwrap();
    assert_eq!(standing.limit, Decimal::ZERO);
    assert_eq!(standing.spent, dec("500"));
    assert!(!standing.exceeded);
}

#[test]
fn other_months_do_not_count() {
    let conn = setup();
    budget::set_budget(&conn, "default", "dining", 8, 2025, dec("50")).unwrap();
    spend(&conn, "expense", "45", "dining", "2025-07-31");
    spend(&conn, "expense", "10", "dining", "2025-08-01");
    let standing = budget::evaluate(&conn, "default", "dining", 8, 2025).unwrap();
    assert_eq!(standing.spent, dec("10"));
}

#[test]
fn category_match_is_case_sensitive() {
    let conn = setup();
    budget::set_budget(&conn, "default", "dining", 8, 2025, dec("50")).unwrap();
    spend(&conn, "expense", "30", "Dining", "2025-08-05");
    let standing = budget::evaluate(&conn, "default", "dining", 8, 2025).unwrap();
    assert_eq!(standing.spent, Decimal::ZERO);
}

#[test]
fn income_and_transfers_never_count_as_spend() {
    let conn = setup();
    spend(&conn, "income", "200", "dining", "2025-08-03");
    spend(&conn, "refund", "20", "dining", "2025-08-04");
    spend(&conn, "transfer_out", "75", "dining", "2025-08-05");
    spend(&conn, "expense", "10", "dining", "2025-08-06");
    let standing = budget::evaluate(&conn, "default", "dining", 8, 2025).unwrap();
    assert_eq!(standing.spent, dec("10"));
}

#[test]
fn delete_of_missing_budget_is_not_found() {
    let conn = setup();
    let err = budget::delete_budget(&conn, "default", "dining", 8, 2025).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    budget::set_budget(&conn, "default", "dining", 8, 2025, dec("50")).unwrap();
    budget::delete_budget(&conn, "default", "dining", 8, 2025).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM budgets", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn month_out_of_range_is_rejected() {
    let conn = setup();
    assert!(matches!(
        budget::set_budget(&conn, "default", "dining", 0, 2025, dec("50")),
        Err(LedgerError::InvalidPeriod(_))
    ));
    assert!(matches!(
        budget::evaluate(&conn, "default", "dining", 13, 2025),
        Err(LedgerError::InvalidPeriod(_))
    ));
}

#[test]
fn non_positive_limit_is_rejected() {
    let conn = setup();
    assert!(matches!(
        budget::set_budget(&conn, "default", "dining", 8, 2025, dec("0")),
        Err(LedgerError::InvalidAmount(_))
    ));
}

#[test]
fn list_filters_by_year() {
    let conn = setup();
    budget::set_budget(&conn, "default", "dining", 8, 2025, dec("50")).unwrap();
    budget::set_budget(&conn, "default", "dining", 8, 2024, dec("40")).unwrap();
    let all = budget::list_budgets(&conn, "default", None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].year, 2025);
    let only = budget::list_budgets(&conn, "default", Some(2024)).unwrap();
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].limit, dec("40"));
}

#[test]
fn cli_set_trims_inputs() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "monedero",
        "budget",
        "set",
        "--category",
        " dining ",
        "--month",
        "2025-08",
        "--limit",
        "50",
    ]);
    if let Some(("budget", budget_m)) = matches.subcommand() {
        commands::budgets::handle(&conn, budget_m).unwrap();
    } else {
        panic!("no budget subcommand");
    }
    let category: String = conn
        .query_row("SELECT category FROM budgets", [], |r| r.get(0))
        .unwrap();
    assert_eq!(category, "dining");
}
