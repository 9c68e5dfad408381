// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn owner_arg() -> Arg {
    Arg::new("owner")
        .long("owner")
        .help("Owner to act for (defaults to the configured owner)")
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON lines"),
    )
}

fn tx_field_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("date")
            .long("date")
            .required(true)
            .help("Transaction date (YYYY-MM-DD)"),
    )
    .arg(
        Arg::new("account")
            .long("account")
            .required(true)
            .help("Account name"),
    )
    .arg(Arg::new("amount").long("amount").required(true))
    .arg(
        Arg::new("kind")
            .long("kind")
            .value_parser(["expense", "bill", "income", "refund"])
            .default_value("expense"),
    )
    .arg(Arg::new("description").long("description").required(true))
    .arg(
        Arg::new("category")
            .long("category")
            .default_value("uncategorized"),
    )
    .arg(
        Arg::new("payment-date")
            .long("payment-date")
            .help("Settlement date, when it differs from the transaction date"),
    )
    .arg(Arg::new("notes").long("notes"))
    .arg(owner_arg())
}

pub fn build_cli() -> Command {
    Command::new("monedero")
        .about("Monedero: personal-finance ledger, balances, budgets, and spending history")
        .version(crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Create an account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["debit", "credit"])
                                .default_value("debit"),
                        )
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .default_value("0")
                                .help("Opening balance"),
                        )
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .default_value("0")
                                .help("Monthly budget for this account"),
                        )
                        .arg(owner_arg()),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List accounts with balances")
                        .arg(owner_arg()),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Update account metadata")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["debit", "credit"]),
                        )
                        .arg(Arg::new("budget").long("budget"))
                        .arg(owner_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account (its ledger history is kept)")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(owner_arg()),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage ledger entries")
                .subcommand(tx_field_args(
                    Command::new("add").about("Record a transaction"),
                ))
                .subcommand(tx_field_args(
                    Command::new("edit")
                        .about("Replace a transaction's fields, re-applying its effect")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction, reversing its effect")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(owner_arg()),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List one month of entries")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .help("Month (YYYY-MM)"),
                        )
                        .arg(owner_arg()),
                )),
        )
        .subcommand(json_args(
            Command::new("transfer")
                .about("Move money between two accounts")
                .arg(
                    Arg::new("from")
                        .long("from")
                        .required(true)
                        .help("Source account name"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .help("Destination account name"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("date").long("date").help("Date (defaults to today)"))
                .arg(Arg::new("notes").long("notes"))
                .arg(owner_arg()),
        ))
        .subcommand(
            Command::new("budget")
                .about("Manage per-category monthly budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create or update a budget limit")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .help("Month (YYYY-MM)"),
                        )
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(owner_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .help("Month (YYYY-MM)"),
                        )
                        .arg(owner_arg()),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List configured budgets")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(clap::value_parser!(i32)),
                        )
                        .arg(owner_arg()),
                ))
                .subcommand(json_args(
                    Command::new("status")
                        .about("Spend vs. limit for a month")
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .help("Month (YYYY-MM)"),
                        )
                        .arg(owner_arg()),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Spending reports over navigable time windows")
                .subcommand(json_args(
                    Command::new("spending")
                        .about("Per-category spending buckets")
                        .arg(
                            Arg::new("granularity")
                                .long("granularity")
                                .value_parser(["monthly", "quarterly", "yearly"])
                                .default_value("monthly"),
                        )
                        .arg(
                            Arg::new("index")
                                .long("index")
                                .value_parser(clap::value_parser!(u32))
                                .default_value("0")
                                .help("Periods back from today"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Reference date (defaults to today)"),
                        )
                        .arg(owner_arg()),
                ))
                .subcommand(json_args(
                    Command::new("history")
                        .about("Most recent transactions across all kinds")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize))
                                .default_value("10"),
                        )
                        .arg(owner_arg()),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Category catalog")
                .subcommand(json_args(
                    Command::new("list").about("Show the known categories"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export the ledger to a file")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(owner_arg()),
                ),
        )
        .subcommand(
            Command::new("owner")
                .about("Default owner settings")
                .subcommand(
                    Command::new("set")
                        .about("Set the default owner")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("show").about("Show the default owner")),
        )
        .subcommand(Command::new("doctor").about("Audit stored balances against the ledger"))
}
