// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use crate::book::AddressBook;
use crate::models::Person;

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub const PERSON_HEADERS: [&str; 9] = [
    "#", "Role", "Name", "Phone", "Email", "Address", "Remark", "Tags", "Linked",
];

/// One row per person, numbered the way index arguments count.
pub fn person_rows(book: &AddressBook, persons: &[&Person]) -> Vec<Vec<String>> {
    persons
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let tags = p
                .tags()
                .map(|t| t.iter().map(|t| t.name()).collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            let linked = book
                .linked_persons(&p.name)
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                (i + 1).to_string(),
                p.role().to_string(),
                p.name.as_str().to_string(),
                p.phone.as_str().to_string(),
                p.email.as_str().to_string(),
                p.address.as_str().to_string(),
                p.remark.as_str().to_string(),
                tags,
                linked,
            ]
        })
        .collect()
}

pub fn person_table(book: &AddressBook, persons: &[&Person]) -> Table {
    pretty_table(&PERSON_HEADERS, person_rows(book, persons))
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
