// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use crate::error::TagNotFound;
use crate::models::{Person, Tag};

/// Registry of every tag students may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry {
    tags: BTreeSet<Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn set_tags(&mut self, replacement: &TagRegistry) {
        self.tags = replacement.tags.clone();
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Registers `to_add`, returning the tags that were already known.
    pub fn add_tags<'a>(&mut self, to_add: impl IntoIterator<Item = &'a Tag>) -> BTreeSet<Tag> {
        let mut already_present = BTreeSet::new();
        for tag in to_add {
            if !self.tags.insert(tag.clone()) {
                already_present.insert(tag.clone());
            }
        }
        already_present
    }

    pub fn delete_tags<'a>(&mut self, to_delete: impl IntoIterator<Item = &'a Tag>) {
        for tag in to_delete {
            self.tags.remove(tag);
        }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// `Ok(false)` for parents, `Ok(true)` for students whose tags are all
    /// registered, otherwise the first unregistered tag.
    pub fn validate_person(&self, person: &Person) -> Result<bool, TagNotFound> {
        let Some(tags) = person.tags() else {
            return Ok(false);
        };
        match tags.iter().find(|t| !self.contains(t)) {
            Some(missing) => Err(TagNotFound(missing.clone())),
            None => Ok(true),
        }
    }
}
