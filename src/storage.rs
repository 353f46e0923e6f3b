// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::book::AddressBook;
use crate::error::StorageError;
use crate::models::{Address, Email, Name, Person, Phone, Remark, Tag};

pub const DUPLICATE_PERSON: &str = "Persons list contains duplicate person(s).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonRole {
    #[serde(rename = "STUDENT")]
    Student,
    #[serde(rename = "PARENT")]
    Parent,
}

/// On-disk form of a person. A missing field is reported by name on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonPerson {
    pub role: JsonRole,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonLink {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonAddressBook {
    #[serde(default)]
    pub persons: Vec<JsonPerson>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<JsonLink>,
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, StorageError> {
    value
        .as_deref()
        .ok_or_else(|| StorageError::IllegalValue(format!("Person's {} field is missing!", field)))
}

impl JsonPerson {
    pub fn from_model(person: &Person) -> Self {
        let (role, tags) = match person.tags() {
            Some(tags) => (
                JsonRole::Student,
                Some(tags.iter().map(|t| t.name().to_string()).collect()),
            ),
            None => (JsonRole::Parent, None),
        };
        JsonPerson {
            role,
            name: Some(person.name.as_str().to_string()),
            phone: Some(person.phone.as_str().to_string()),
            email: Some(person.email.as_str().to_string()),
            address: Some(person.address.as_str().to_string()),
            remark: Some(person.remark.as_str().to_string()),
            tags,
        }
    }

    pub fn to_model(&self) -> Result<Person, StorageError> {
        let name = Name::parse(required(&self.name, "Name")?)?;
        let phone = Phone::parse(required(&self.phone, "Phone")?)?;
        let email = Email::parse(required(&self.email, "Email")?)?;
        let address = Address::parse(required(&self.address, "Address")?)?;
        let remark = match &self.remark {
            Some(r) => Remark::parse(r)?,
            None => Remark::default(),
        };
        match self.role {
            JsonRole::Student => {
                let tags = self
                    .tags
                    .iter()
                    .flatten()
                    .map(|t| Tag::parse(t))
                    .collect::<Result<BTreeSet<_>, _>>()?;
                Ok(Person::student(name, phone, email, address, remark, tags))
            }
            JsonRole::Parent => {
                if self.tags.as_ref().is_some_and(|t| !t.is_empty()) {
                    warn!("Ignoring tags on parent '{}'", name.as_str());
                }
                Ok(Person::parent(name, phone, email, address, remark))
            }
        }
    }
}

impl JsonAddressBook {
    pub fn from_model(book: &AddressBook) -> Self {
        JsonAddressBook {
            persons: book.persons().iter().map(JsonPerson::from_model).collect(),
            tags: book.tags().iter().map(|t| t.name().to_string()).collect(),
            links: book
                .graph()
                .pairs()
                .into_iter()
                .map(|(a, b)| JsonLink {
                    a: a.as_str().to_string(),
                    b: b.as_str().to_string(),
                })
                .collect(),
        }
    }

    /// Rebuilds the address book. Links whose endpoints cannot be resolved,
    /// or that break the student/parent rule, are dropped with a warning.
    pub fn to_model(&self) -> Result<AddressBook, StorageError> {
        let mut book = AddressBook::new();
        for jp in &self.persons {
            let person = jp.to_model()?;
            if book.has_person(&person) {
                return Err(StorageError::IllegalValue(DUPLICATE_PERSON.to_string()));
            }
            book.add_person(person)
                .map_err(|e| StorageError::IllegalValue(e.to_string()))?;
        }

        let tags = self
            .tags
            .iter()
            .map(|t| Tag::parse(t))
            .collect::<Result<Vec<_>, _>>()?;
        book.add_tag_types(&tags);

        for link in &self.links {
            let ends = (
                book.resolve_name(&link.a).map(|p| p.name.clone()),
                book.resolve_name(&link.b).map(|p| p.name.clone()),
            );
            let (Some(a), Some(b)) = ends else {
                warn!("Dropping link {} <-> {}: unknown contact", link.a, link.b);
                continue;
            };
            if let Err(e) = book.link(&a, &b) {
                warn!("Dropping link {} <-> {}: {}", link.a, link.b, e);
            }
        }
        Ok(book)
    }
}

/// Reads the raw file without building a model. A missing file reads as empty.
pub fn read_file(path: &Path) -> Result<JsonAddressBook, StorageError> {
    if !path.exists() {
        return Ok(JsonAddressBook::default());
    }
    let text = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load(path: &Path) -> Result<AddressBook, StorageError> {
    if !path.exists() {
        info!("No data file at {}, starting empty", path.display());
        return Ok(AddressBook::new());
    }
    let book = read_file(path)?.to_model()?;
    info!(
        "Loaded {} person(s) from {}",
        book.persons().len(),
        path.display()
    );
    Ok(book)
}

/// Writes through a sibling temp file so a failed write leaves the old file.
pub fn save(path: &Path, book: &AddressBook) -> Result<(), StorageError> {
    let io_err = |source: std::io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(&JsonAddressBook::from_model(book)).map_err(|source| {
        StorageError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    info!("Saved {} person(s) to {}", book.persons().len(), path.display());
    Ok(())
}

/// Creates an empty data file unless one already exists.
pub fn init(path: &Path) -> Result<(), StorageError> {
    if path.exists() {
        return Ok(());
    }
    save(path, &AddressBook::new())
}
