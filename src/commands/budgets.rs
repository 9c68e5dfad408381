// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{self, BudgetStanding};
use crate::utils::{
    fmt_money, maybe_print_json, month_key, parse_decimal, parse_month, pretty_table,
    resolve_owner,
};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap().trim())?;
    let b = budget::set_budget(conn, &owner, category, month, year, limit)?;
    println!(
        "Budget set for {} / {} = {}",
        month_key(b.year, b.month),
        b.category,
        fmt_money(&b.limit)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim();
    budget::delete_budget(conn, &owner, category, month, year)?;
    println!("Removed budget for {} / {}", month_key(year, month), category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let year = sub.get_one::<i32>("year").copied();
    let data = budget::list_budgets(conn, &owner, year)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    month_key(b.year, b.month),
                    b.category.clone(),
                    fmt_money(&b.limit),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Category", "Limit"], rows));
    }
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = resolve_owner(conn, sub.get_one::<String>("owner"))?;
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;

    let data: Vec<BudgetStanding> = match sub.get_one::<String>("category") {
        Some(cat) => vec![budget::evaluate(conn, &owner, cat.trim(), month, year)?],
        None => {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT category FROM budgets
                 WHERE owner=?1 AND month=?2 AND year=?3 ORDER BY category",
            )?;
            let names = stmt
                .query_map(params![owner, month, year], |r| r.get::<_, String>(0))?
                .collect::<Result<Vec<String>, _>>()?;
            let mut out = Vec::with_capacity(names.len());
            for name in &names {
                out.push(budget::evaluate(conn, &owner, name, month, year)?);
            }
            out
        }
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    fmt_money(&s.limit),
                    fmt_money(&s.spent),
                    fmt_money(&s.over_by),
                    if s.exceeded { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", "Over by", "Exceeded"], rows)
        );
    }
    Ok(())
}
