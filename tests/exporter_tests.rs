// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monedero::{cli, commands::exporter};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
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
    conn
}

#[test]
fn export_transactions_streams_pretty_json() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO accounts(id, owner, name, kind) VALUES (1,'default','Checking','debit')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(owner, kind, amount, description, transaction_date,
            payment_date, account_id, category, notes)
         VALUES ('default','expense','12.34','Corner Shop','2025-01-02','2025-01-02',1,
            'groceries','Weekly run')",
        [],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "monedero",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "kind": "expense",
                "amount": "12.34",
                "account": "Checking",
                "description": "Corner Shop",
                "category": "groceries",
                "notes": "Weekly run",
                "transfer_id": null
            }
        ])
    );
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "monedero",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&conn, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}

#[test]
fn export_is_scoped_to_the_owner() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO transactions(owner, kind, amount, description, transaction_date,
            payment_date, account_id, category)
         VALUES ('default','expense','5','Mine','2025-01-02','2025-01-02',1,'groceries'),
                ('bob','expense','9','Not mine','2025-01-03','2025-01-03',2,'dining')",
        [],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "monedero",
        "export",
        "transactions",
        "--format",
        "csv",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert!(contents.contains("Mine"));
    assert!(!contents.contains("Not mine"));
    // Orphan rows fall back to the raw account id.
    assert!(contents.contains("#1"));
}
