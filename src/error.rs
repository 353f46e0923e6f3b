// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Role, Tag};

/// A field value that does not satisfy its format rule. Carries the
/// user-facing constraint message of the field type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConstraintViolation(pub &'static str);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Tag: {0} does not exist.")]
pub struct TagNotFound(pub Tag);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid command format! \n{0}")]
    InvalidFormat(String),
    #[error("Unknown command")]
    UnknownCommand,
    #[error(transparent)]
    InvalidValue(#[from] ConstraintViolation),
    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefixes(String),
    #[error("Index is not a non-zero unsigned integer.")]
    InvalidIndex,
}

/// Violations of the relationship rules enforced by the address book.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("No person named '{0}' in the address book.")]
    UnknownPerson(String),
    #[error("Cannot link a contact to itself.")]
    SelfLink,
    #[error("Cannot link two {0}s together.")]
    SameRole(Role),
    #[error("These contacts are already linked.")]
    AlreadyLinked,
    #[error("These contacts are not currently linked.")]
    NotLinked,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("This person already exists in the address book")]
    DuplicatePerson,
    #[error(transparent)]
    TagNotFound(#[from] TagNotFound),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("The person index provided is invalid")]
    InvalidIndex,
    #[error("No person matches the given detail(s).")]
    NoMatch,
    #[error(
        "Multiple persons match the given detail(s). Please refine using email/phone, or delete by index after using 'find'."
    )]
    MultipleMatches,
    #[error("No {role} named '{name}' is currently shown.")]
    NotShown { role: Role, name: String },
    #[error("'{name}' is not a {role}.")]
    WrongRole { role: Role, name: String },
    #[error("Several {role}s are named '{name}'; add a phone number to pick one.")]
    Ambiguous { role: Role, name: String },
    #[error("One or both contacts could not be found.")]
    ContactNotFound,
    #[error("Cannot unlink a contact from itself.")]
    UnlinkSelf,
    #[error("No person found with the name: {0}")]
    NameNotFound(String),
    #[error("'{0}' is no longer in the address book.")]
    UnknownPerson(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed data file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    IllegalValue(String),
}

impl From<ConstraintViolation> for StorageError {
    fn from(err: ConstraintViolation) -> Self {
        StorageError::IllegalValue(err.0.to_string())
    }
}
