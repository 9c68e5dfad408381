// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::{print_rows, rows_for_display};
use crate::ledger;
use crate::periods::{self, Granularity};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, resolve_owner};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spending", sub)) => spending(conn, sub)?,
        Some(("history", sub)) => history(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn spending(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let granularity = Granularity::parse(sub.get_one::<String>("granularity").unwrap())
        .context("Unknown granularity")?;
    let index = *sub.get_one::<u32>("index").unwrap();
    let today = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };

    let buckets = periods::aggregate(conn, &owner, granularity, index, today)?;
    if !maybe_print_json(json_flag, jsonl_flag, &buckets)? {
        let mut rows = Vec::new();
        for b in &buckets {
            rows.push(vec![
                b.label.clone(),
                "(total)".to_string(),
                fmt_money(&b.grand_total),
            ]);
            for ct in &b.per_category {
                if ct.total != Decimal::ZERO {
                    rows.push(vec![
                        String::new(),
                        ct.category.as_str().to_string(),
                        fmt_money(&ct.total),
                    ]);
                }
            }
        }
        println!("{}", pretty_table(&["Period", "Category", "Spent"], rows));
    }
    Ok(())
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let limit = *sub.get_one::<usize>("limit").unwrap();
    let data = ledger::recent(conn, &owner, limit)?;
    let rows = rows_for_display(conn, &data)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        print_rows(&rows);
    }
    Ok(())
}
