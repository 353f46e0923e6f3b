// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use classconnect::book::{AddressBook, Model};
use classconnect::parser::parse_command;
use classconnect::{cli, commands::exporter};
use serde_json::json;
use tempfile::tempdir;

fn setup() -> AddressBook {
    let mut model = Model::new(AddressBook::new());
    for line in [
        "add_tags t/Math t/Science",
        "adds n/Alice Pauline p/94351253 e/alice@example.com a/123, Jurong West Ave 6, #08-111 r/Likes math t/Math t/Science",
        "addp n/Carl Kurz p/95352563 e/heinz@example.com a/wall street",
        "link sn/Alice Pauline pn/Carl Kurz",
    ] {
        parse_command(line).unwrap().execute(&mut model).unwrap();
    }
    model.into_book()
}

fn export(book: &AddressBook, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "classconnect",
        "export",
        "contacts",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(book, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_contacts_as_pretty_json() {
    let book = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("contacts.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&book, "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "role": "student",
                "name": "Alice Pauline",
                "phone": "94351253",
                "email": "alice@example.com",
                "address": "123, Jurong West Ave 6, #08-111",
                "remark": "Likes math",
                "tags": ["Math", "Science"],
                "linked": ["Carl Kurz"]
            },
            {
                "role": "parent",
                "name": "Carl Kurz",
                "phone": "95352563",
                "email": "heinz@example.com",
                "address": "wall street",
                "remark": "",
                "tags": [],
                "linked": ["Alice Pauline"]
            }
        ])
    );
}

#[test]
fn export_contacts_as_csv() {
    let book = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("contacts.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&book, "CSV", &out_str).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["role", "name", "phone", "email", "address", "remark", "tags", "linked"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][4], "123, Jurong West Ave 6, #08-111");
    assert_eq!(&rows[0][6], "Math;Science");
    assert_eq!(&rows[0][7], "Carl Kurz");
    assert_eq!(&rows[1][0], "parent");
    assert_eq!(&rows[1][6], "");
}

#[test]
fn export_contacts_rejects_unknown_format() {
    let book = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("contacts.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&book, "xml", &out_str).is_err());
    assert!(!out_path.exists());
}
