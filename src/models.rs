// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ConstraintViolation;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").unwrap());
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s].*$").unwrap());
static REMARK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\n/]*$").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
static EMAIL_LOCAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+([+_.\-][A-Za-z0-9_]+)*$").unwrap());
static EMAIL_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+(-[A-Za-z0-9_]+)*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Parent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Parent => f.write_str("parent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub const CONSTRAINTS: &'static str = "Names should only contain alphanumeric characters and spaces, and it should not be blank";

    pub fn parse(s: &str) -> Result<Self, ConstraintViolation> {
        if Self::is_valid(s) {
            Ok(Name(s.to_string()))
        } else {
            Err(ConstraintViolation(Self::CONSTRAINTS))
        }
    }

    pub fn is_valid(s: &str) -> bool {
        NAME_RE.is_match(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub const CONSTRAINTS: &'static str =
        "Phone numbers should only contain numbers, and it should be at least 3 digits long";

    pub fn parse(s: &str) -> Result<Self, ConstraintViolation> {
        if PHONE_RE.is_match(s) {
            Ok(Phone(s.to_string()))
        } else {
            Err(ConstraintViolation(Self::CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Compared case-insensitively.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub const CONSTRAINTS: &'static str = r#"Emails should be of the format "local-part@domain-part" where:
1. The local-part:
    - Should only contain alphanumeric characters and special characters '+', '_', '.', '-'
    - Must not start or end with any special characters
    - Should not exceed 64 characters
2. The domain-part:
    - Should only contain alphanumeric labels connected by hyphens '-', if any
    - Must end with a domain label that is at least 2 characters long
    - Should not exceed 255 characters"#;

    pub fn parse(s: &str) -> Result<Self, ConstraintViolation> {
        if Self::is_valid(s) {
            Ok(Email(s.to_string()))
        } else {
            Err(ConstraintViolation(Self::CONSTRAINTS))
        }
    }

    pub fn is_valid(s: &str) -> bool {
        if s.is_empty() || s.len() > 320 {
            return false;
        }
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        if local.len() > 64 || !EMAIL_LOCAL_RE.is_match(local) {
            return false;
        }
        if domain.is_empty() || domain.len() > 255 {
            return false;
        }
        let labels: Vec<&str> = domain.split('.').collect();
        if !labels.iter().all(|l| EMAIL_LABEL_RE.is_match(l)) {
            return false;
        }
        // the top-level label needs at least one hyphen-free run of two characters
        labels
            .last()
            .is_some_and(|last| last.split('-').any(|run| run.len() >= 2))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Email {}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub const CONSTRAINTS: &'static str = "Addresses can take any values, and it should not be blank";

    pub fn parse(s: &str) -> Result<Self, ConstraintViolation> {
        if ADDRESS_RE.is_match(s) {
            Ok(Address(s.to_string()))
        } else {
            Err(ConstraintViolation(Self::CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Remark(String);

impl Remark {
    pub const CONSTRAINTS: &'static str =
        "Remarks are optional but should not contain special character '/' or newline.";

    pub fn parse(s: &str) -> Result<Self, ConstraintViolation> {
        if REMARK_RE.is_match(s) {
            Ok(Remark(s.to_string()))
        } else {
            Err(ConstraintViolation(Self::CONSTRAINTS))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub const CONSTRAINTS: &'static str = "Tags names should be alphanumeric";

    pub fn parse(s: &str) -> Result<Self, ConstraintViolation> {
        if TAG_RE.is_match(s) {
            Ok(Tag(s.to_string()))
        } else {
            Err(ConstraintViolation(Self::CONSTRAINTS))
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Renders tags as `[a], [b]`.
pub fn join_tags<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> String {
    tags.into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Kind {
    Student { tags: BTreeSet<Tag> },
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub address: Address,
    pub remark: Remark,
    #[serde(flatten)]
    pub kind: Kind,
}

impl Person {
    pub fn student(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        remark: Remark,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Person {
            name,
            phone,
            email,
            address,
            remark,
            kind: Kind::Student { tags },
        }
    }

    pub fn parent(name: Name, phone: Phone, email: Email, address: Address, remark: Remark) -> Self {
        Person {
            name,
            phone,
            email,
            address,
            remark,
            kind: Kind::Parent,
        }
    }

    pub fn role(&self) -> Role {
        match self.kind {
            Kind::Student { .. } => Role::Student,
            Kind::Parent => Role::Parent,
        }
    }

    /// Tags carried by a student; `None` for parents.
    pub fn tags(&self) -> Option<&BTreeSet<Tag>> {
        match &self.kind {
            Kind::Student { tags } => Some(tags),
            Kind::Parent => None,
        }
    }

    /// Weaker notion of equality: two records describe the same contact when
    /// their names match exactly.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
    }

    pub fn with_remark(&self, remark: Remark) -> Person {
        Person {
            remark,
            ..self.clone()
        }
    }

    pub fn remove_tags(&mut self, doomed: &BTreeSet<Tag>) {
        if let Kind::Student { tags } = &mut self.kind {
            tags.retain(|t| !doomed.contains(t));
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}",
            self.name.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.address.as_str()
        )?;
        if !self.remark.is_empty() {
            write!(f, "; Remark: {}", self.remark.as_str())?;
        }
        if let Some(tags) = self.tags() {
            f.write_str("; Tags: ")?;
            for t in tags {
                write!(f, "{}", t)?;
            }
        }
        Ok(())
    }
}
