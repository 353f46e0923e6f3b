// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;

use crate::models::{Person, Role, Tag};
use crate::storage::{self, JsonAddressBook};
use crate::utils::pretty_table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

impl Issue {
    fn new(kind: &'static str, detail: impl Into<String>) -> Self {
        Issue {
            kind,
            detail: detail.into(),
        }
    }
}

/// Checks a data file as written, before any of it is dropped on load.
pub fn inspect(data: &JsonAddressBook) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1) Persons that fail validation or repeat a name
    let mut persons: Vec<Person> = Vec::new();
    for (i, jp) in data.persons.iter().enumerate() {
        let label = jp.name.clone().unwrap_or_else(|| format!("#{}", i + 1));
        match jp.to_model() {
            Ok(p) => {
                if persons.iter().any(|q| q.is_same_person(&p)) {
                    issues.push(Issue::new("duplicate_person", p.name.as_str()));
                } else {
                    persons.push(p);
                }
            }
            Err(e) => issues.push(Issue::new("invalid_person", format!("{}: {}", label, e))),
        }
    }

    // 2) Registry entries and student tags
    let mut registry = BTreeSet::new();
    for t in &data.tags {
        match Tag::parse(t) {
            Ok(tag) => {
                registry.insert(tag);
            }
            Err(_) => issues.push(Issue::new("invalid_tag", t.clone())),
        }
    }
    let mut sorted: Vec<&Person> = persons.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    for p in sorted {
        let tags = p.tags().into_iter().flatten();
        for tag in tags.filter(|t| !registry.contains(*t)) {
            issues.push(Issue::new(
                "unregistered_tag",
                format!("{} {}", p.name.as_str(), tag),
            ));
        }
    }

    // 3) Links, resolved the way loading resolves them
    let find = |n: &str| {
        persons
            .iter()
            .find(|p| p.name.as_str() == n)
            .or_else(|| persons.iter().find(|p| p.name.eq_ignore_case(n)))
            .map(|p| (p.name.clone(), p.role()))
    };
    let mut seen = BTreeSet::new();
    for link in &data.links {
        let detail = format!("{} <-> {}", link.a, link.b);
        let (Some((a, ra)), Some((b, rb))) = (find(&link.a), find(&link.b)) else {
            issues.push(Issue::new("dangling_link", detail));
            continue;
        };
        if a == b {
            issues.push(Issue::new("self_link", detail));
        } else if ra == rb {
            let kind = match ra {
                Role::Student => "student_student_link",
                Role::Parent => "parent_parent_link",
            };
            issues.push(Issue::new(kind, detail));
        } else if !seen.insert(if a < b { (a, b) } else { (b, a) }) {
            issues.push(Issue::new("duplicate_link", detail));
        }
    }

    issues
}

pub fn handle(path: &Path) -> Result<()> {
    let data = storage::read_file(path)?;
    let rows: Vec<Vec<String>> = inspect(&data)
        .into_iter()
        .map(|i| vec![i.kind.to_string(), i.detail])
        .collect();

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
