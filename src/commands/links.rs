// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use log::info;

use super::{CommandResult, ContactRef};
use crate::book::{Model, PersonFilter};
use crate::error::{CommandError, LinkError};
use crate::models::{Name, Person, Role};

pub const LINK_USAGE: &str = "link: Links a student to a parent by name, with phones to tell apart namesakes.\n\
Parameters: sn/STUDENT_NAME [sp/STUDENT_PHONE] pn/PARENT_NAME [pp/PARENT_PHONE]\n\
Example: link sn/John Tan sp/91234567 pn/Mrs Tan pp/92345678";

pub const UNLINK_USAGE: &str = "unlink: Removes the link between two contacts.\n\
Parameters: sn/STUDENT_NAME [sp/STUDENT_PHONE] pn/PARENT_NAME [pp/PARENT_PHONE]\n\
Example: unlink sn/John Tan pn/Mrs Tan";

pub const FIND_LINK_USAGE: &str = "findlink: Shows contacts linked to the given person.\n\
Parameters: n/NAME\n\
Example: findlink n/John Tan";

fn name_matches<'a>(model: &'a Model, contact: &ContactRef) -> Vec<&'a Person> {
    model
        .displayed()
        .into_iter()
        .filter(|p| p.name.eq_ignore_case(&contact.name))
        .collect()
}

fn pick_by_phone<'a>(candidates: &[&'a Person], phone: Option<&str>) -> Option<&'a Person> {
    let phone = phone?;
    candidates.iter().copied().find(|p| p.phone.as_str() == phone)
}

/// Resolves a displayed contact of the given role.
fn resolve_role(model: &Model, contact: &ContactRef, role: Role) -> Result<Person, CommandError> {
    let named = name_matches(model, contact);
    let candidates: Vec<&Person> = named.iter().copied().filter(|p| p.role() == role).collect();
    let found = match candidates.as_slice() {
        [] if named.is_empty() => None,
        [] => {
            return Err(CommandError::WrongRole {
                role,
                name: contact.name.clone(),
            });
        }
        [only] => Some(*only),
        many => Some(
            pick_by_phone(many, contact.phone.as_deref()).ok_or_else(|| CommandError::Ambiguous {
                role,
                name: contact.name.clone(),
            })?,
        ),
    };
    found.cloned().ok_or_else(|| CommandError::NotShown {
        role,
        name: contact.name.clone(),
    })
}

/// Resolves a displayed contact of any role; `None` when missing or ambiguous.
fn resolve_any(model: &Model, contact: &ContactRef) -> Option<Name> {
    let named = name_matches(model, contact);
    match named.as_slice() {
        [] => None,
        [only] => Some(only.name.clone()),
        many => pick_by_phone(many, contact.phone.as_deref()).map(|p| p.name.clone()),
    }
}

pub fn link(
    model: &mut Model,
    student: &ContactRef,
    parent: &ContactRef,
) -> Result<CommandResult, CommandError> {
    let s = resolve_role(model, student, Role::Student)?;
    let p = resolve_role(model, parent, Role::Parent)?;
    model.book_mut().link(&s.name, &p.name)?;
    info!("Linked '{}' <-> '{}'", s.name.as_str(), p.name.as_str());
    Ok(CommandResult::new(format!("Linked {} ↔ {}", s, p)))
}

pub fn unlink(
    model: &mut Model,
    student: &ContactRef,
    parent: &ContactRef,
) -> Result<CommandResult, CommandError> {
    let (Some(a), Some(b)) = (resolve_any(model, student), resolve_any(model, parent)) else {
        return Err(CommandError::ContactNotFound);
    };
    if a == b {
        return Err(CommandError::UnlinkSelf);
    }
    model.book_mut().unlink(&a, &b).map_err(|e| match e {
        LinkError::UnknownPerson(_) => CommandError::ContactNotFound,
        other => CommandError::Link(other),
    })?;
    info!("Unlinked '{}' <-> '{}'", a.as_str(), b.as_str());
    Ok(CommandResult::new(format!(
        "Unlinked {} ↔ {}",
        a.as_str(),
        b.as_str()
    )))
}

/// Shows only the contacts linked to the named person, searched across the
/// whole book regardless of the current filter.
pub fn find_link(model: &mut Model, name: &str) -> Result<CommandResult, CommandError> {
    let name = name.trim();
    let target = model
        .book()
        .find_by_name(name)
        .map(|p| p.name.clone())
        .ok_or_else(|| CommandError::NameNotFound(name.to_string()))?;
    let linked: BTreeSet<Name> = model
        .book()
        .linked_persons(&target)
        .into_iter()
        .map(|p| p.name.clone())
        .collect();
    let count = linked.len();
    model.set_filter(PersonFilter::Members(linked));
    Ok(CommandResult::new(format!(
        "Showing {} linked contact(s) for {}",
        count,
        target.as_str()
    )))
}
