// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use log::debug;

use crate::book::Model;
use crate::error::CommandError;
use crate::models::{Email, Name, Person, Phone, Remark, Tag};

pub mod doctor;
pub mod exporter;
pub mod links;
pub mod listing;
pub mod persons;
pub mod shell;
pub mod tags;

/// A contact named on the command line, with an optional phone number to
/// tell apart contacts sharing a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRef {
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// Zero-based position in the displayed list.
    Index(usize),
    Details {
        name: Option<Name>,
        email: Option<Email>,
        phone: Option<Phone>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStudent(Person),
    AddParent(Person),
    Delete(DeleteTarget),
    Remark { index: usize, remark: Remark },
    AddTags(BTreeSet<Tag>),
    DeleteTags(BTreeSet<Tag>),
    ListTags,
    Filter(Vec<String>),
    Link { student: ContactRef, parent: ContactRef },
    Unlink { student: ContactRef, parent: ContactRef },
    FindLink(String),
    ShowAll,
    List,
    Find(Vec<String>),
    Clear,
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub show_help: bool,
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        CommandResult {
            feedback: feedback.into(),
            show_help: false,
            exit: false,
        }
    }
}

pub const HELP_MESSAGE: &str = "Opened help window.";
pub const EXIT_MESSAGE: &str = "Exiting Address Book as requested ...";
pub const CLEAR_MESSAGE: &str = "Address book has been cleared!";

impl Command {
    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        debug!("Executing {:?}", self);
        match self {
            Command::AddStudent(p) | Command::AddParent(p) => persons::add(model, p),
            Command::Delete(target) => persons::delete(model, target),
            Command::Remark { index, remark } => persons::remark(model, *index, remark),
            Command::AddTags(t) => Ok(tags::add_tags(model, t)),
            Command::DeleteTags(t) => Ok(tags::delete_tags(model, t)),
            Command::ListTags => Ok(tags::list_tags(model)),
            Command::Filter(keywords) => Ok(tags::filter(model, keywords)),
            Command::Link { student, parent } => links::link(model, student, parent),
            Command::Unlink { student, parent } => links::unlink(model, student, parent),
            Command::FindLink(name) => links::find_link(model, name),
            Command::ShowAll => Ok(persons::show_all(model)),
            Command::List => Ok(persons::list(model)),
            Command::Find(keywords) => Ok(persons::find(model, keywords)),
            Command::Clear => {
                model.book_mut().clear();
                Ok(CommandResult::new(CLEAR_MESSAGE))
            }
            Command::Help => Ok(CommandResult {
                show_help: true,
                ..CommandResult::new(HELP_MESSAGE)
            }),
            Command::Exit => Ok(CommandResult {
                exit: true,
                ..CommandResult::new(EXIT_MESSAGE)
            }),
        }
    }

    /// Whether a successful run changes what is persisted.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::AddStudent(_)
                | Command::AddParent(_)
                | Command::Delete(_)
                | Command::Remark { .. }
                | Command::AddTags(_)
                | Command::DeleteTags(_)
                | Command::Link { .. }
                | Command::Unlink { .. }
                | Command::Clear
        )
    }

    /// Whether the displayed list is worth printing after this command.
    pub fn shows_list(&self) -> bool {
        matches!(
            self,
            Command::Filter(_)
                | Command::FindLink(_)
                | Command::ShowAll
                | Command::List
                | Command::Find(_)
        )
    }
}

/// Usage of every command, shown by `help`.
pub fn help_text() -> String {
    [
        persons::ADD_STUDENT_USAGE,
        persons::ADD_PARENT_USAGE,
        persons::DELETE_USAGE,
        persons::REMARK_USAGE,
        persons::FIND_USAGE,
        tags::ADD_TAGS_USAGE,
        tags::DELETE_TAGS_USAGE,
        tags::FILTER_USAGE,
        links::LINK_USAGE,
        links::UNLINK_USAGE,
        links::FIND_LINK_USAGE,
        "list_tags: Lists every registered tag.",
        "showall: Shows all persons.",
        "list: Lists all persons.",
        "clear: Removes every person, tag and link.",
        "help: Shows this message.",
        "exit: Leaves the shell.",
    ]
    .join("\n\n")
}
