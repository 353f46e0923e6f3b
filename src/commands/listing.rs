// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::book::{AddressBook, PersonFilter};
use crate::models::Person;
use crate::utils::{maybe_print_json, person_table};

/// Persons selected by the `list` arguments, in book order.
pub fn query_rows<'a>(book: &'a AddressBook, sub: &clap::ArgMatches) -> Vec<&'a Person> {
    let tags: Vec<&String> = sub
        .get_many::<String>("tag")
        .map(|v| v.collect())
        .unwrap_or_default();
    let filter = if tags.is_empty() {
        PersonFilter::All
    } else {
        PersonFilter::tags(&tags)
    };
    book.persons().iter().filter(|p| filter.matches(p)).collect()
}

pub fn handle(book: &AddressBook, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(book, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No persons to show.");
        } else {
            println!("{}", person_table(book, &data));
        }
    }
    Ok(())
}
