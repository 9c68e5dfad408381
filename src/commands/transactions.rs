// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, TransactionInput};
use crate::models::{Transaction, TransactionKind};
use crate::utils::{
    fmt_money, id_for_account, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table, resolve_owner,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub account: String,
    pub description: String,
    pub category: String,
    pub notes: String,
}

/// Resolves account names for display. Rows whose account has since been
/// deleted show the raw id instead.
pub fn rows_for_display(conn: &Connection, data: &[Transaction]) -> Result<Vec<TransactionRow>> {
    let mut rows = Vec::with_capacity(data.len());
    for t in data {
        let account: Option<String> = conn
            .query_row(
                "SELECT name FROM accounts WHERE id=?1",
                params![t.account_id],
                |r| r.get(0),
            )
            .ok();
        rows.push(TransactionRow {
            id: t.id,
            date: t.transaction_date.to_string(),
            kind: t.kind.as_str().to_string(),
            amount: fmt_money(&t.amount),
            account: account.unwrap_or_else(|| format!("#{}", t.account_id)),
            description: t.description.clone(),
            category: t.category.clone(),
            notes: t.notes.clone().unwrap_or_default(),
        });
    }
    Ok(rows)
}

pub fn print_rows(rows: &[TransactionRow]) {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.kind.clone(),
                r.amount.clone(),
                r.account.clone(),
                r.description.clone(),
                r.category.clone(),
                r.notes.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Id",
                "Date",
                "Kind",
                "Amount",
                "Account",
                "Description",
                "Category",
                "Notes"
            ],
            cells
        )
    );
}

fn input_from_args(conn: &Connection, sub: &clap::ArgMatches) -> Result<TransactionInput> {
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let payment_date = match sub.get_one::<String>("payment-date") {
        Some(s) => parse_date(s)?,
        None => date,
    };
    let account_id = id_for_account(conn, &owner, sub.get_one::<String>("account").unwrap())?;
    let kind = TransactionKind::parse(sub.get_one::<String>("kind").unwrap())
        .context("Unknown transaction kind")?;
    Ok(TransactionInput {
        owner,
        kind,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?,
        description: sub.get_one::<String>("description").unwrap().trim().to_string(),
        transaction_date: date,
        payment_date,
        account_id,
        category: sub.get_one::<String>("category").unwrap().trim().to_string(),
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
    })
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let input = input_from_args(conn, sub)?;
    let recorded = ledger::record(conn, &input)?;
    println!(
        "Recorded {} #{}: {} on {}",
        recorded.kind.as_str(),
        recorded.id,
        fmt_money(&recorded.amount),
        recorded.transaction_date
    );
    Ok(())
}

fn edit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let input = input_from_args(conn, sub)?;
    let updated = ledger::update(conn, id, &input)?;
    println!(
        "Updated {} #{}: {} on {}",
        updated.kind.as_str(),
        updated.id,
        fmt_money(&updated.amount),
        updated.transaction_date
    );
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::delete(conn, &owner, id)?;
    println!("Removed transaction #{}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let data = ledger::list_month(conn, &owner, year, month)?;
    let rows = rows_for_display(conn, &data)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        print_rows(&rows);
    }
    Ok(())
}
