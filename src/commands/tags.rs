// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeSet, HashSet};

use log::debug;

use super::CommandResult;
use crate::book::{Model, PersonFilter};
use crate::models::{Tag, join_tags};

pub const ADD_TAGS_USAGE: &str = "add_tags: Registers new tags that students can carry. \
Parameters: t/TAG [t/TAG]...\n\
Example: add_tags t/Math t/Science";

pub const DELETE_TAGS_USAGE: &str = "deletetag: Deletes tags from the registry and from every student. \
Parameters: t/TAG [t/TAG]...\n\
Example: deletetag t/Math t/Science";

pub const FILTER_USAGE: &str = "filter: Filters students by tag(s).\n\
Parameters: TAG [MORE_TAGS]...\n\
Example: filter math j2";

pub fn add_tags(model: &mut Model, tags: &BTreeSet<Tag>) -> CommandResult {
    let already = model.book_mut().add_tag_types(tags);
    let added: Vec<&Tag> = tags.iter().filter(|t| !already.contains(*t)).collect();
    debug!("Registered {} tag(s), {} already present", added.len(), already.len());

    if already.is_empty() {
        return CommandResult::new(format!("New tags added: {}", join_tags(added)));
    }
    let mut feedback = format!(
        "Some tags already exist and were not added: {}",
        join_tags(&already)
    );
    if !added.is_empty() {
        feedback.push_str(&format!(". New tags added: {}", join_tags(added)));
    }
    CommandResult::new(feedback)
}

pub fn delete_tags(model: &mut Model, tags: &BTreeSet<Tag>) -> CommandResult {
    let (deleted, missing): (BTreeSet<Tag>, BTreeSet<Tag>) =
        tags.iter().cloned().partition(|t| model.book().has_tag(t));

    model.book_mut().delete_tag_types(&deleted);

    if missing.is_empty() {
        return CommandResult::new(format!(
            "Tag(s) successfully deleted: {}",
            join_tags(&deleted)
        ));
    }
    let mut feedback = format!(
        "The following tag(s) do not exist and were not deleted: {}.",
        join_tags(&missing)
    );
    if !deleted.is_empty() {
        feedback.push_str(&format!(
            " All other tag(s) were successfully deleted: {}",
            join_tags(&deleted)
        ));
    }
    CommandResult::new(feedback)
}

pub fn list_tags(model: &Model) -> CommandResult {
    let tags = model.book().tags();
    let listed = if tags.is_empty() {
        "No tags found.".to_string()
    } else {
        join_tags(tags)
    };
    CommandResult::new(format!("Listed all tags: {}", listed))
}

/// Narrows the displayed list to students carrying any of the keywords.
/// Keywords naming no tag carried by any student are reported and ignored.
pub fn filter(model: &mut Model, keywords: &[String]) -> CommandResult {
    let carried: HashSet<String> = model
        .book()
        .persons()
        .iter()
        .filter_map(|p| p.tags())
        .flatten()
        .map(|t| t.name().trim().to_lowercase())
        .collect();

    let requested = keywords.iter().map(|k| k.trim()).filter(|k| !k.is_empty());
    let (valid, missing): (Vec<&str>, Vec<&str>) =
        requested.partition(|k| carried.contains(&k.to_lowercase()));

    if valid.is_empty() {
        let feedback = match missing.as_slice() {
            [one] => format!(
                "The tag '{}' does not exist. Refer to tag list for valid tags or add a new tag.",
                one
            ),
            many => format!(
                "These tags do not exist: {}. Refer to tag list for valid tags or add new tags.",
                many.join(", ")
            ),
        };
        return CommandResult::new(feedback);
    }

    model.set_filter(PersonFilter::tags(&valid));
    let shown = model.displayed().len();
    let valid_shown = valid.join(", ");

    if shown == 0 {
        let mut feedback = format!("No users found with tag(s): {}.", valid_shown);
        match missing.as_slice() {
            [] => {}
            [one] => feedback.push_str(&format!(" Note: tag '{}' does not exist.", one)),
            many => feedback.push_str(&format!(
                " Note: these tags do not exist: {}.",
                many.join(", ")
            )),
        }
        return CommandResult::new(feedback);
    }

    let mut feedback = format!("Listed {} persons with tag(s): {}.", shown, valid_shown);
    match missing.as_slice() {
        [] => {}
        [one] => feedback.push_str(&format!(
            " Note: tag '{}' does not exist and was ignored.",
            one
        )),
        many => feedback.push_str(&format!(
            " Note: these tags do not exist and were ignored: {}.",
            many.join(", ")
        )),
    }
    CommandResult::new(feedback)
}
