// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use classconnect::book::{AddressBook, Model};
use classconnect::commands::shell::{self, Session};
use classconnect::commands::{EXIT_MESSAGE, listing};
use classconnect::config::Config;
use classconnect::models::Tag;
use classconnect::parser::parse_command;
use classconnect::utils::{PERSON_HEADERS, person_rows};
use classconnect::{cli, storage};
use tempfile::tempdir;

fn setup() -> AddressBook {
    let mut model = Model::new(AddressBook::new());
    for line in [
        "add_tags t/Math t/Science",
        "adds n/Alice Pauline p/94351253 e/alice@example.com a/123, Jurong West Ave 6, #08-111 t/Math",
        "adds n/Benson Meier p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 t/Science",
        "addp n/Carl Kurz p/95352563 e/heinz@example.com a/wall street",
    ] {
        parse_command(line).unwrap().execute(&mut model).unwrap();
    }
    model.into_book()
}

fn list_names(book: &AddressBook, args: &[&str]) -> Vec<String> {
    let mut argv = vec!["classconnect", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("list", list_m)) = matches.subcommand() {
        listing::query_rows(book, list_m)
            .iter()
            .map(|p| p.name.as_str().to_string())
            .collect()
    } else {
        panic!("no list subcommand");
    }
}

#[test]
fn list_without_tags_shows_everyone() {
    let book = setup();
    assert_eq!(
        list_names(&book, &[]),
        ["Alice Pauline", "Benson Meier", "Carl Kurz"]
    );
}

#[test]
fn list_tag_filter_is_repeatable() {
    let book = setup();
    assert_eq!(list_names(&book, &["--tag", "math"]), ["Alice Pauline"]);
    assert_eq!(
        list_names(&book, &["--tag", "Math", "--tag", "science", "--json"]),
        ["Alice Pauline", "Benson Meier"]
    );
}

#[test]
fn data_flag_and_exec_line_parse() {
    let matches = cli::build_cli().get_matches_from([
        "classconnect",
        "--data",
        "/tmp/book.json",
        "exec",
        "adds",
        "n/Alex Yeoh",
        "p/87438807",
    ]);
    assert_eq!(
        matches.get_one::<PathBuf>("data"),
        Some(&PathBuf::from("/tmp/book.json"))
    );
    let Some(("exec", sub)) = matches.subcommand() else {
        panic!("no exec subcommand");
    };
    let line: Vec<&String> = sub.get_many::<String>("line").unwrap().collect();
    assert_eq!(line, ["adds", "n/Alex Yeoh", "p/87438807"]);
}

#[test]
fn config_prefers_flag_then_env() {
    let flag = Path::new("/tmp/flag.json");
    let env = PathBuf::from("/tmp/env.json");

    let c = Config::from_sources(Some(flag), Some(env.clone())).unwrap();
    assert_eq!(c.data_path, flag);
    let c = Config::from_sources(None, Some(env.clone())).unwrap();
    assert_eq!(c.data_path, env);
}

#[test]
fn session_saves_after_changes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.json");
    storage::save(&path, &setup()).unwrap();

    let mut session = Session::open(&path).unwrap();
    let res = session.execute("remark 1 r/Quiet").unwrap();
    assert!(res.feedback.starts_with("Added remark to Person: Alice Pauline"));
    session.execute("find alice").unwrap();

    let reloaded = storage::load(&path).unwrap();
    assert_eq!(reloaded.persons()[0].remark.as_str(), "Quiet");
    assert_eq!(session.model().displayed().len(), 1);

    assert!(session.execute("delete 5").is_err());
    assert_eq!(storage::load(&path).unwrap().persons().len(), 3);
}

#[test]
fn shell_keeps_going_after_errors_and_stops_on_exit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.json");
    let mut session = Session::open(&path).unwrap();

    let input = "add_tags t/Math\n\
                 adds n/Alex Yeoh p/87438807 e/alexyeoh@example.com a/Blk 30 Geylang Street 29 t/Math\n\
                 bogus\n\
                 adds n/Alex Yeoh\n\
                 \n\
                 list\n\
                 exit\n\
                 clear\n";
    let mut out = Vec::new();
    shell::run(&mut session, input.as_bytes(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with(shell::WELCOME));
    assert!(out.contains("New person added: Alex Yeoh"));
    assert!(out.contains("Unknown command"));
    assert!(out.contains("Missing required fields: p/PHONE e/EMAIL a/ADDRESS"));
    assert!(out.contains("Listed all persons"));
    assert!(out.contains("alexyeoh@example.com"));
    assert!(out.trim_end().ends_with(EXIT_MESSAGE));

    // clear came after exit and never ran
    assert_eq!(storage::load(&path).unwrap().persons().len(), 1);
}

#[test]
fn exec_subcommand_writes_to_the_data_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.json");
    let p = path.to_str().unwrap();

    let matches =
        cli::build_cli().get_matches_from(["classconnect", "--data", p, "exec", "add_tags", "t/Math"]);
    let config = Config::resolve(matches.get_one::<PathBuf>("data").map(PathBuf::as_path)).unwrap();
    assert_eq!(config.data_path, path);
    let Some(("exec", sub)) = matches.subcommand() else {
        panic!("no exec subcommand");
    };
    shell::exec(&config, sub).unwrap();

    let reloaded = storage::load(&path).unwrap();
    assert!(reloaded.has_tag(&Tag::parse("Math").unwrap()));
    assert!(reloaded.persons().is_empty());
}

#[test]
fn person_table_shows_remarks() {
    let mut model = Model::new(setup());
    parse_command("remark 2 r/Plays chess")
        .unwrap()
        .execute(&mut model)
        .unwrap();
    let book = model.into_book();
    let persons: Vec<_> = book.persons().iter().collect();
    let rows = person_rows(&book, &persons);

    assert_eq!(PERSON_HEADERS[6], "Remark");
    assert_eq!(rows[1].len(), PERSON_HEADERS.len());
    assert_eq!(rows[1][2], "Benson Meier");
    assert_eq!(rows[1][6], "Plays chess");
    assert_eq!(rows[0][6], "");
}
