// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use crate::error::{CommandError, LinkError, TagNotFound};
use crate::graph::RelationshipGraph;
use crate::models::{Name, Person, Tag};
use crate::tags::TagRegistry;

/// Contacts together with their tag registry and links.
///
/// No two persons share a name. Links only ever join a student and a parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    persons: Vec<Person>,
    tags: TagRegistry,
    graph: RelationshipGraph,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    pub fn reset(&mut self, other: &AddressBook) {
        self.persons = other.persons.clone();
        self.tags.set_tags(&other.tags);
        self.graph.copy_from(&other.graph);
    }

    pub fn clear(&mut self) {
        self.persons.clear();
        self.tags.clear();
        self.graph.clear();
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.iter().any(|p| p.is_same_person(person))
    }

    pub fn person(&self, name: &Name) -> Option<&Person> {
        self.persons.iter().find(|p| &p.name == name)
    }

    /// First person whose name matches ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.name.eq_ignore_case(name))
    }

    /// Exact name first, falling back to [`find_by_name`](Self::find_by_name).
    pub fn resolve_name(&self, name: &str) -> Option<&Person> {
        self.persons
            .iter()
            .find(|p| p.name.as_str() == name)
            .or_else(|| self.find_by_name(name))
    }

    pub fn add_person(&mut self, person: Person) -> Result<(), CommandError> {
        if self.has_person(&person) {
            return Err(CommandError::DuplicatePerson);
        }
        self.persons.push(person);
        Ok(())
    }

    /// Replaces `target` in place. A rename carries the target's links over.
    pub fn set_person(&mut self, target: &Name, edited: Person) -> Result<(), CommandError> {
        let idx = self
            .persons
            .iter()
            .position(|p| &p.name == target)
            .ok_or_else(|| CommandError::UnknownPerson(target.as_str().to_string()))?;
        if &edited.name != target && self.person(&edited.name).is_some() {
            return Err(CommandError::DuplicatePerson);
        }
        if &edited.name != target {
            for peer in self.graph.linked(target) {
                self.graph.remove_link(target, &peer);
                self.graph.add_link(&edited.name, &peer);
            }
        }
        self.persons[idx] = edited;
        Ok(())
    }

    /// Removes the person and every link touching it.
    pub fn remove_person(&mut self, name: &Name) -> Option<Person> {
        let idx = self.persons.iter().position(|p| &p.name == name)?;
        self.graph.remove_all(name);
        Some(self.persons.remove(idx))
    }

    pub fn link(&mut self, a: &Name, b: &Name) -> Result<(), LinkError> {
        let pa = self
            .person(a)
            .ok_or_else(|| LinkError::UnknownPerson(a.as_str().to_string()))?;
        let pb = self
            .person(b)
            .ok_or_else(|| LinkError::UnknownPerson(b.as_str().to_string()))?;
        if a == b {
            return Err(LinkError::SelfLink);
        }
        if pa.role() == pb.role() {
            return Err(LinkError::SameRole(pa.role()));
        }
        if !self.graph.add_link(a, b) {
            return Err(LinkError::AlreadyLinked);
        }
        Ok(())
    }

    pub fn unlink(&mut self, a: &Name, b: &Name) -> Result<(), LinkError> {
        for n in [a, b] {
            if self.person(n).is_none() {
                return Err(LinkError::UnknownPerson(n.as_str().to_string()));
            }
        }
        if a == b {
            return Err(LinkError::SelfLink);
        }
        if !self.graph.remove_link(a, b) {
            return Err(LinkError::NotLinked);
        }
        Ok(())
    }

    /// Linked contacts in book order.
    pub fn linked_persons(&self, name: &Name) -> Vec<&Person> {
        let peers = self.graph.linked(name);
        self.persons
            .iter()
            .filter(|p| peers.contains(&p.name))
            .collect()
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        self.tags.tags()
    }

    /// Returns the tags that were already registered.
    pub fn add_tag_types<'a>(&mut self, tags: impl IntoIterator<Item = &'a Tag>) -> BTreeSet<Tag> {
        self.tags.add_tags(tags)
    }

    /// Unregisters the tags and strips them from every student.
    pub fn delete_tag_types(&mut self, tags: &BTreeSet<Tag>) {
        self.tags.delete_tags(tags);
        for p in &mut self.persons {
            p.remove_tags(tags);
        }
    }

    pub fn validate_tags(&self, person: &Person) -> Result<bool, TagNotFound> {
        self.tags.validate_person(person)
    }
}

/// Which persons the displayed list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    #[default]
    All,
    /// Students carrying any of the tags, compared ignoring case.
    Tags(Vec<String>),
    Members(BTreeSet<Name>),
    /// Persons with any whole name word equal to a keyword, ignoring case.
    NameKeywords(Vec<String>),
}

impl PersonFilter {
    /// Blank keywords are dropped and the rest trimmed.
    pub fn tags<S: AsRef<str>>(keywords: &[S]) -> Self {
        PersonFilter::Tags(
            keywords
                .iter()
                .map(|k| k.as_ref().trim())
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn matches(&self, person: &Person) -> bool {
        match self {
            PersonFilter::All => true,
            PersonFilter::Tags(keywords) => {
                let Some(tags) = person.tags() else {
                    return false;
                };
                tags.iter().any(|t| {
                    keywords
                        .iter()
                        .any(|k| t.name().eq_ignore_ascii_case(k))
                })
            }
            PersonFilter::Members(names) => names.contains(&person.name),
            PersonFilter::NameKeywords(words) => person
                .name
                .as_str()
                .split_whitespace()
                .any(|w| words.iter().any(|k| w.eq_ignore_ascii_case(k))),
        }
    }
}

/// The address book together with the filter of the displayed list.
#[derive(Debug, Clone, Default)]
pub struct Model {
    book: AddressBook,
    filter: PersonFilter,
}

impl Model {
    pub fn new(book: AddressBook) -> Self {
        Model {
            book,
            filter: PersonFilter::All,
        }
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut AddressBook {
        &mut self.book
    }

    pub fn into_book(self) -> AddressBook {
        self.book
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: PersonFilter) {
        self.filter = filter;
    }

    pub fn displayed(&self) -> Vec<&Person> {
        self.book
            .persons()
            .iter()
            .filter(|p| self.filter.matches(p))
            .collect()
    }
}
