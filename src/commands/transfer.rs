// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::transfer;
use crate::utils::{
    fmt_money, id_for_account, maybe_print_json, parse_date, parse_decimal, resolve_owner,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let owner = resolve_owner(conn, m.get_one::<String>("owner"))?;
    let source = id_for_account(conn, &owner, m.get_one::<String>("from").unwrap())?;
    let destination = id_for_account(conn, &owner, m.get_one::<String>("to").unwrap())?;
    let amount = parse_decimal(m.get_one::<String>("amount").unwrap().trim())?;
    let description = m.get_one::<String>("description").unwrap().trim().to_string();
    let date = match m.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let notes = m.get_one::<String>("notes").map(|s| s.as_str());

    let receipt = transfer::transfer(
        conn,
        &owner,
        source,
        destination,
        amount,
        &description,
        date,
        notes,
    )?;
    if !maybe_print_json(json_flag, jsonl_flag, &receipt)? {
        println!(
            "Transferred {} (#{} -> #{}, transfer {})",
            fmt_money(&amount),
            receipt.out_id,
            receipt.in_id,
            receipt.transfer_id
        );
        println!("Source balance: {}", fmt_money(&receipt.source_balance));
        println!(
            "Destination balance: {}",
            fmt_money(&receipt.destination_balance)
        );
    }
    Ok(())
}
