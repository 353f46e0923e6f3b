// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("classconnect")
        .about("Student and parent contact book for tutors")
        .version(crate_version!())
        .arg(
            Arg::new("data")
                .long("data")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("Data file to use instead of the default location"),
        )
        .subcommand(Command::new("init").about("Create an empty data file"))
        .subcommand(
            Command::new("exec")
                .about("Run a single address book command, e.g. exec adds n/Alex p/9123 ...")
                .arg(
                    Arg::new("line")
                        .required(true)
                        .num_args(1..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(Command::new("shell").about("Read commands interactively"))
        .subcommand(json_args(
            Command::new("list").about("List contacts").arg(
                Arg::new("tag")
                    .long("tag")
                    .action(ArgAction::Append)
                    .help("Only students carrying this tag (repeatable)"),
            ),
        ))
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("contacts")
                    .about("Export contacts with their tags and links")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check the data file for problems"))
}
