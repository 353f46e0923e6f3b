// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use log::info;
use serde_json::json;

use crate::book::AddressBook;
use crate::models::Person;

pub fn handle(book: &AddressBook, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("contacts", sub)) => export_contacts(book, sub),
        _ => Ok(()),
    }
}

fn tag_names(p: &Person) -> Vec<&str> {
    p.tags()
        .map(|t| t.iter().map(|t| t.name()).collect())
        .unwrap_or_default()
}

fn linked_names<'a>(book: &'a AddressBook, p: &Person) -> Vec<&'a str> {
    book.linked_persons(&p.name)
        .into_iter()
        .map(|l| l.name.as_str())
        .collect()
}

fn export_contacts(book: &AddressBook, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|f| f.to_lowercase())
        .unwrap_or_default();
    let Some(out) = sub.get_one::<String>("out") else {
        bail!("--out is required");
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "role", "name", "phone", "email", "address", "remark", "tags", "linked",
            ])?;
            for p in book.persons() {
                wtr.write_record([
                    p.role().to_string().as_str(),
                    p.name.as_str(),
                    p.phone.as_str(),
                    p.email.as_str(),
                    p.address.as_str(),
                    p.remark.as_str(),
                    tag_names(p).join(";").as_str(),
                    linked_names(book, p).join(";").as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = book
                .persons()
                .iter()
                .map(|p| {
                    json!({
                        "role": p.role(),
                        "name": p.name.as_str(),
                        "phone": p.phone.as_str(),
                        "email": p.email.as_str(),
                        "address": p.address.as_str(),
                        "remark": p.remark.as_str(),
                        "tags": tag_names(p),
                        "linked": linked_names(book, p),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    info!("Exported {} contact(s) as {}", book.persons().len(), fmt);
    println!("Exported contacts to {}", out);
    Ok(())
}
