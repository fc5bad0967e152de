// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_offset(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month-offset")
            .long("month-offset")
            .default_value("0")
            .allow_hyphen_values(true)
            .value_parser(value_parser!(i32))
            .help("Months relative to the current one, e.g. -1 for last month"),
    )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .value_parser(["income", "expense"])
            .help("Transaction type"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true)
            .help("Positive amount, e.g. 42.50"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .required(required)
            .help("Category, e.g. Food"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .help("Date as YYYY-MM-DD (default: today)"),
    )
    .arg(
        Arg::new("method")
            .long("method")
            .help("Payment method, e.g. Card or Cash"),
    )
    .arg(Arg::new("desc").long("desc").help("Free-text description"))
}

pub fn build_cli() -> Command {
    Command::new("luxbudget")
        .version(crate_version!())
        .about("Track income and expenses, category budgets, and a savings goal")
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .env("LUXBUDGET_STORE")
                .value_parser(value_parser!(PathBuf))
                .help("Path of the state database (default: platform data dir)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .help("Logging verbosity; RUST_LOG takes precedence"),
        )
        .subcommand(Command::new("init").about("Create the state store and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand_required(true)
                .subcommand(tx_fields(Command::new("add").about("Record a transaction"), true))
                .subcommand(tx_fields(
                    Command::new("edit")
                        .about("Change a transaction; omitted fields keep their value")
                        .arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Match description or category, case-insensitive"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("all")
                                .value_parser(["all", "income", "expense"]),
                        )
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .default_value("date")
                                .help("Sort field: date or amount"),
                        )
                        .arg(
                            Arg::new("dir")
                                .long("dir")
                                .default_value("desc")
                                .value_parser(["asc", "desc"]),
                        ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Category budgets")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("status").about("This month's spending against each budget"),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboards and breakdowns")
                .subcommand_required(true)
                .subcommand(json_flags(month_offset(
                    Command::new("summary").about("Totals, this month vs last, savings rate"),
                )))
                .subcommand(json_flags(
                    Command::new("trend").about("Income and expenses per month"),
                ))
                .subcommand(json_flags(month_offset(
                    Command::new("categories").about("This month's expenses by category"),
                ))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goal")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set")
                        .about("Set the savings goal, replacing any existing one")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("target")
                                .long("target")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(json_flags(Command::new("show").about("Show goal progress"))),
        )
        .subcommand(
            Command::new("settings")
                .about("Display settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("currency")
                        .about("Set the display currency (ISO code)")
                        .arg(Arg::new("code").required(true)),
                )
                .subcommand(
                    Command::new("dark-mode")
                        .about("Switch dark mode")
                        .arg(
                            Arg::new("mode")
                                .required(true)
                                .value_parser(["on", "off", "toggle"]),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("json")
                        .about("Full snapshot as pretty JSON")
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .default_value(crate::export::DEFAULT_EXPORT_FILE),
                        ),
                )
                .subcommand(
                    Command::new("csv")
                        .about("Transactions as CSV")
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}
