// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fmt;

use crate::error::ParseError;

/// Marks the start of an argument, e.g. `n/` in `n/John Tan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(pub &'static str);

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix("n/");
pub const PREFIX_PHONE: Prefix = Prefix("p/");
pub const PREFIX_EMAIL: Prefix = Prefix("e/");
pub const PREFIX_ADDRESS: Prefix = Prefix("a/");
pub const PREFIX_REMARK: Prefix = Prefix("r/");
pub const PREFIX_TAG: Prefix = Prefix("t/");
pub const PREFIX_STUDENT_NAME: Prefix = Prefix("sn/");
pub const PREFIX_STUDENT_PHONE: Prefix = Prefix("sp/");
pub const PREFIX_PARENT_NAME: Prefix = Prefix("pn/");
pub const PREFIX_PARENT_PHONE: Prefix = Prefix("pp/");

/// Values captured per prefix, in the order they appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first prefix, trimmed.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    pub fn verify_no_duplicate_prefixes_for(&self, prefixes: &[Prefix]) -> Result<(), ParseError> {
        let dupes: Vec<String> = prefixes
            .iter()
            .filter(|p| self.all_values(**p).len() > 1)
            .map(|p| p.to_string())
            .collect();
        if dupes.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(dupes.join(" ")))
        }
    }
}

/// Splits `args` on the given prefixes. A prefix only counts when it follows
/// whitespace (or starts the string), so `p/` inside `sp/` is not a match.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let padded = format!(" {}", args);
    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for (idx, ch) in padded.char_indices().filter(|(_, c)| c.is_whitespace()) {
        let start = idx + ch.len_utf8();
        let rest = &padded[start..];
        positions.extend(
            prefixes
                .iter()
                .filter(|p| rest.starts_with(p.0))
                .map(|p| (start, *p)),
        );
    }

    let mut map = ArgumentMultimap::default();
    let first = positions.first().map_or(padded.len(), |(pos, _)| *pos);
    map.preamble = padded[..first].trim().to_string();

    for (i, (pos, prefix)) in positions.iter().enumerate() {
        let end = positions.get(i + 1).map_or(padded.len(), |(next, _)| *next);
        let value = padded[pos + prefix.0.len()..end].trim().to_string();
        map.values.entry(*prefix).or_default().push(value);
    }
    map
}
