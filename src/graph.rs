// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::Name;

/// Undirected links between contacts, keyed by contact name.
///
/// Every link is stored in both directions. A contact with no remaining
/// links has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipGraph {
    links: BTreeMap<Name, BTreeSet<Name>>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` for a self-link or a link that already exists.
    pub fn add_link(&mut self, a: &Name, b: &Name) -> bool {
        if a == b {
            return false;
        }
        let added_a = self.links.entry(a.clone()).or_default().insert(b.clone());
        let added_b = self.links.entry(b.clone()).or_default().insert(a.clone());
        added_a || added_b
    }

    /// Returns `true` if either direction of the link was present.
    pub fn remove_link(&mut self, a: &Name, b: &Name) -> bool {
        let removed_a = self.detach(a, b);
        let removed_b = self.detach(b, a);
        removed_a || removed_b
    }

    fn detach(&mut self, from: &Name, to: &Name) -> bool {
        let Some(set) = self.links.get_mut(from) else {
            return false;
        };
        let removed = set.remove(to);
        if set.is_empty() {
            self.links.remove(from);
        }
        removed
    }

    pub fn is_linked(&self, a: &Name, b: &Name) -> bool {
        self.links.get(a).is_some_and(|s| s.contains(b))
    }

    pub fn linked(&self, person: &Name) -> BTreeSet<Name> {
        self.links.get(person).cloned().unwrap_or_default()
    }

    /// Drops every link touching `person`.
    pub fn remove_all(&mut self, person: &Name) {
        let Some(peers) = self.links.remove(person) else {
            return;
        };
        for peer in peers {
            self.detach(&peer, person);
        }
    }

    pub fn copy_from(&mut self, other: &RelationshipGraph) {
        self.links = other.links.clone();
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Each undirected link once, lesser name first.
    pub fn pairs(&self) -> Vec<(Name, Name)> {
        let mut out = Vec::new();
        for (a, peers) in &self.links {
            for b in peers {
                if a < b {
                    out.push((a.clone(), b.clone()));
                }
            }
        }
        out
    }
}
