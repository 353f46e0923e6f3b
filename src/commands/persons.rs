// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use log::info;

use super::{CommandResult, DeleteTarget};
use crate::book::{Model, PersonFilter};
use crate::error::CommandError;
use crate::models::{Person, Remark};

pub const ADD_STUDENT_USAGE: &str = "adds: Adds a student to the address book. \
Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS [r/REMARK] [t/TAG]...\n\
Example: adds n/Alex Jones p/98724958 e/alexj@example.com a/322, Clementi Ave 1, #05-01 r/Hates Math t/Math";

pub const ADD_PARENT_USAGE: &str = "addp: Adds a parent to the address book. \
Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS [r/REMARK]\n\
Example: addp n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 r/Busy from 9-6 daily";

pub const DELETE_USAGE: &str = "delete: Deletes the specified person from the address book.\n\
By index: delete INDEX (must be a positive integer)\n\
By details: delete [n/NAME] [e/EMAIL] [p/PHONE]\n\
Examples:\n  delete 2\n  delete e/alex@example.com\n  delete n/Ada Lovelace e/ada@example.com";

pub const REMARK_USAGE: &str = "remark: Edits the remark of the person identified by the index \
used in the displayed person list. Existing remark will be overwritten by the input.\n\
Parameters: INDEX (must be a positive integer) r/[REMARK]\n\
Example: remark 1 r/Likes to swim.";

pub const FIND_USAGE: &str = "find: Finds all persons whose names contain any of \
the specified keywords (case-insensitive) and displays them as a list.\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find alice bob charlie";

pub fn add(model: &mut Model, person: &Person) -> Result<CommandResult, CommandError> {
    if model.book().has_person(person) {
        return Err(CommandError::DuplicatePerson);
    }
    model.book().validate_tags(person)?;
    model.book_mut().add_person(person.clone())?;
    info!("Added {} '{}'", person.role(), person.name.as_str());
    Ok(CommandResult::new(format!("New person added: {}", person)))
}

pub fn delete(model: &mut Model, target: &DeleteTarget) -> Result<CommandResult, CommandError> {
    let doomed = {
        let shown = model.displayed();
        match target {
            DeleteTarget::Index(i) => shown.get(*i).ok_or(CommandError::InvalidIndex)?.name.clone(),
            DeleteTarget::Details { name, email, phone } => {
                let matches: Vec<_> = shown
                    .into_iter()
                    .filter(|p| name.as_ref().is_none_or(|n| p.name.eq_ignore_case(n.as_str())))
                    .filter(|p| email.as_ref().is_none_or(|e| &p.email == e))
                    .filter(|p| phone.as_ref().is_none_or(|ph| &p.phone == ph))
                    .collect();
                match matches.as_slice() {
                    [] => return Err(CommandError::NoMatch),
                    [only] => only.name.clone(),
                    _ => return Err(CommandError::MultipleMatches),
                }
            }
        }
    };
    let removed = model
        .book_mut()
        .remove_person(&doomed)
        .ok_or(CommandError::NoMatch)?;
    info!("Deleted '{}'", removed.name.as_str());
    Ok(CommandResult::new(format!("Deleted: {}", removed)))
}

pub fn remark(model: &mut Model, index: usize, remark: &Remark) -> Result<CommandResult, CommandError> {
    let target = model
        .displayed()
        .get(index)
        .map(|p| (*p).clone())
        .ok_or(CommandError::InvalidIndex)?;
    let edited = target.with_remark(remark.clone());
    model.book_mut().set_person(&target.name, edited.clone())?;
    let feedback = if remark.is_empty() {
        format!("Removed remark from Person: {}", edited)
    } else {
        format!("Added remark to Person: {}", edited)
    };
    Ok(CommandResult::new(feedback))
}

pub fn find(model: &mut Model, keywords: &[String]) -> CommandResult {
    model.set_filter(PersonFilter::NameKeywords(keywords.to_vec()));
    CommandResult::new(format!("{} persons listed!", model.displayed().len()))
}

pub fn show_all(model: &mut Model) -> CommandResult {
    model.set_filter(PersonFilter::All);
    CommandResult::new("Showing all persons.")
}

pub fn list(model: &mut Model) -> CommandResult {
    model.set_filter(PersonFilter::All);
    CommandResult::new("Listed all persons")
}
