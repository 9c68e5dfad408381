// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::CATALOG;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct CatRow {
    name: &'static str,
    kind: &'static str,
    label: &'static str,
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let data: Vec<CatRow> = CATALOG
                .iter()
                .map(|c| CatRow {
                    name: c.as_str(),
                    kind: c.kind().as_str(),
                    label: c.label(),
                })
                .collect();
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|c| vec![c.name.to_string(), c.kind.to_string(), c.label.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Category", "Kind", "Label"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
