// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::resolve_owner;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    if fmt != "csv" && fmt != "json" {
        anyhow::bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut stmt = conn.prepare(
        "SELECT t.transaction_date, t.kind, t.amount, IFNULL(a.name, '#' || t.account_id) AS account,
                t.description, t.category, t.notes, t.transfer_id
         FROM transactions t
         LEFT JOIN accounts a ON t.account_id=a.id
         WHERE t.owner=?1
         ORDER BY t.transaction_date, t.id",
    )?;
    let rows = stmt.query_map([&owner], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, Option<String>>(6)?,
            r.get::<_, Option<i64>>(7)?,
        ))
    })?;

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "date",
            "kind",
            "amount",
            "account",
            "description",
            "category",
            "notes",
            "transfer_id",
        ])?;
        for row in rows {
            let (d, kind, amt, account, desc, cat, notes, transfer) = row?;
            wtr.write_record([
                d,
                kind,
                amt,
                account,
                desc,
                cat,
                notes.unwrap_or_default(),
                transfer.map(|t| t.to_string()).unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let mut items = Vec::new();
        for row in rows {
            let (d, kind, amt, account, desc, cat, notes, transfer) = row?;
            items.push(json!({
                "date": d, "kind": kind, "amount": amt, "account": account,
                "description": desc, "category": cat, "notes": notes, "transfer_id": transfer
            }));
        }
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
