// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accounts;
use crate::models::AccountKind;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table, resolve_owner};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let kind = AccountKind::parse(sub.get_one::<String>("kind").unwrap())
        .context("Unknown account kind")?;
    let opening = parse_decimal(sub.get_one::<String>("opening").unwrap().trim())?;
    let budget = parse_decimal(sub.get_one::<String>("budget").unwrap().trim())?;
    let id = accounts::create_account(conn, &owner, &name, kind, opening, budget)?;
    println!(
        "Added account '{}' (#{}, {}, opening {})",
        name,
        id,
        kind.as_str(),
        fmt_money(&opening)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let data = accounts::get_accounts(conn, &owner)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.name.clone(),
                    a.kind.as_str().to_string(),
                    fmt_money(&a.balance),
                    fmt_money(&a.monthly_budget),
                    fmt_money(&a.spent),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Kind", "Balance", "Monthly budget", "Spent"],
                rows
            )
        );
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let name = sub.get_one::<String>("name").map(|s| s.trim().to_string());
    let kind = sub
        .get_one::<String>("kind")
        .and_then(|s| AccountKind::parse(s));
    let budget = match sub.get_one::<String>("budget") {
        Some(s) => Some(parse_decimal(s.trim())?),
        None => None,
    };
    let account = accounts::update_account(conn, &owner, id, name.as_deref(), kind, budget)?;
    println!("Updated account '{}' (#{})", account.name, account.id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let id = *sub.get_one::<i64>("id").unwrap();
    accounts::delete_account(conn, &owner, id)?;
    println!("Removed account #{} (its ledger history is kept)", id);
    Ok(())
}
