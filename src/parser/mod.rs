// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns one line of user input into a [`Command`].
//!
//! The first word picks the command; the remainder is split on prefixes such
//! as `n/` and `t/` by [`args::tokenize`]. Every field is validated here, so a
//! parsed command only carries well-formed values. Resolving names to
//! contacts happens later, against the model.

use std::collections::BTreeSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::commands::{links, persons, tags, Command, ContactRef, DeleteTarget};
use crate::error::ParseError;
use crate::models::{Address, Email, Name, Person, Phone, Remark, Tag};

pub mod args;

use args::{
    tokenize, ArgumentMultimap, Prefix, PREFIX_ADDRESS, PREFIX_EMAIL, PREFIX_NAME,
    PREFIX_PARENT_NAME, PREFIX_PARENT_PHONE, PREFIX_PHONE, PREFIX_REMARK, PREFIX_STUDENT_NAME,
    PREFIX_STUDENT_PHONE, PREFIX_TAG,
};

static BASIC_COMMAND_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(?P<word>\S+)(?P<args>.*)$").unwrap());

fn invalid_format(usage: &str) -> ParseError {
    ParseError::InvalidFormat(usage.to_string())
}

pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let caps = BASIC_COMMAND_FORMAT
        .captures(input.trim())
        .ok_or_else(|| invalid_format("help: Shows program usage instructions."))?;
    let word = &caps["word"];
    let rest = &caps["args"];
    debug!("Parsing '{}' with arguments '{}'", word, rest);

    match word {
        "adds" => parse_add_student(rest),
        "addp" => parse_add_parent(rest),
        "delete" => parse_delete(rest),
        "remark" => parse_remark(rest),
        "add_tags" => parse_tag_set(rest, tags::ADD_TAGS_USAGE).map(Command::AddTags),
        "deletetag" => parse_tag_set(rest, tags::DELETE_TAGS_USAGE).map(Command::DeleteTags),
        "list_tags" => Ok(Command::ListTags),
        "filter" => parse_keywords(rest, tags::FILTER_USAGE).map(Command::Filter),
        "link" => {
            let (student, parent) = parse_pair(rest, links::LINK_USAGE)?;
            Ok(Command::Link { student, parent })
        }
        "unlink" => {
            let (student, parent) = parse_pair(rest, links::UNLINK_USAGE)?;
            Ok(Command::Unlink { student, parent })
        }
        "findlink" => parse_find_link(rest),
        "showall" => Ok(Command::ShowAll),
        "list" => Ok(Command::List),
        "find" => parse_keywords(rest, persons::FIND_USAGE).map(Command::Find),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        _ => Err(ParseError::UnknownCommand),
    }
}

/// Parses a one-based index into a zero-based position.
pub fn parse_index(s: &str) -> Result<usize, ParseError> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidIndex);
    }
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseError::InvalidIndex),
    }
}

pub fn parse_tags<S: AsRef<str>>(values: &[S]) -> Result<BTreeSet<Tag>, ParseError> {
    values
        .iter()
        .map(|v| Tag::parse(v.as_ref().trim()).map_err(ParseError::from))
        .collect()
}

struct CommonFields {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    remark: Remark,
}

const REQUIRED: [(Prefix, &str); 4] = [
    (PREFIX_NAME, "n/NAME"),
    (PREFIX_PHONE, "p/PHONE"),
    (PREFIX_EMAIL, "e/EMAIL"),
    (PREFIX_ADDRESS, "a/ADDRESS"),
];

fn parse_common(map: &ArgumentMultimap, usage: &str) -> Result<CommonFields, ParseError> {
    let missing: Vec<&str> = REQUIRED
        .iter()
        .filter(|(p, _)| !map.has(*p))
        .map(|(_, label)| *label)
        .collect();
    if !missing.is_empty() {
        return Err(invalid_format(&format!(
            "Missing required fields: {}\n{}",
            missing.join(" "),
            usage
        )));
    }
    if !map.preamble().is_empty() {
        return Err(invalid_format(usage));
    }
    map.verify_no_duplicate_prefixes_for(&[
        PREFIX_NAME,
        PREFIX_PHONE,
        PREFIX_EMAIL,
        PREFIX_ADDRESS,
        PREFIX_REMARK,
    ])?;

    let value = |p: Prefix| map.value(p).unwrap_or_default();
    Ok(CommonFields {
        name: Name::parse(value(PREFIX_NAME))?,
        phone: Phone::parse(value(PREFIX_PHONE))?,
        email: Email::parse(value(PREFIX_EMAIL))?,
        address: Address::parse(value(PREFIX_ADDRESS))?,
        remark: Remark::parse(value(PREFIX_REMARK))?,
    })
}

fn parse_add_student(rest: &str) -> Result<Command, ParseError> {
    let map = tokenize(
        rest,
        &[
            PREFIX_NAME,
            PREFIX_PHONE,
            PREFIX_EMAIL,
            PREFIX_ADDRESS,
            PREFIX_REMARK,
            PREFIX_TAG,
        ],
    );
    let f = parse_common(&map, persons::ADD_STUDENT_USAGE)?;
    let tags = parse_tags(map.all_values(PREFIX_TAG))?;
    Ok(Command::AddStudent(Person::student(
        f.name, f.phone, f.email, f.address, f.remark, tags,
    )))
}

fn parse_add_parent(rest: &str) -> Result<Command, ParseError> {
    let map = tokenize(
        rest,
        &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS, PREFIX_REMARK],
    );
    let f = parse_common(&map, persons::ADD_PARENT_USAGE)?;
    Ok(Command::AddParent(Person::parent(
        f.name, f.phone, f.email, f.address, f.remark,
    )))
}

fn parse_delete(rest: &str) -> Result<Command, ParseError> {
    let map = tokenize(rest, &[PREFIX_NAME, PREFIX_EMAIL, PREFIX_PHONE]);
    let any_prefix = [PREFIX_NAME, PREFIX_EMAIL, PREFIX_PHONE]
        .iter()
        .any(|p| map.has(*p));

    if !any_prefix {
        return parse_index(rest)
            .map(|i| Command::Delete(DeleteTarget::Index(i)))
            .map_err(|_| invalid_format(persons::DELETE_USAGE));
    }

    Ok(Command::Delete(DeleteTarget::Details {
        name: map.value(PREFIX_NAME).map(Name::parse).transpose()?,
        email: map.value(PREFIX_EMAIL).map(Email::parse).transpose()?,
        phone: map.value(PREFIX_PHONE).map(Phone::parse).transpose()?,
    }))
}

fn parse_remark(rest: &str) -> Result<Command, ParseError> {
    let map = tokenize(rest, &[PREFIX_REMARK]);
    let index = parse_index(map.preamble()).map_err(|_| invalid_format(persons::REMARK_USAGE))?;
    let remark = Remark::parse(map.value(PREFIX_REMARK).unwrap_or_default())?;
    Ok(Command::Remark { index, remark })
}

fn parse_tag_set(rest: &str, usage: &str) -> Result<BTreeSet<Tag>, ParseError> {
    let map = tokenize(rest, &[PREFIX_TAG]);
    let values = map.all_values(PREFIX_TAG);
    if values.is_empty() {
        return Err(invalid_format(usage));
    }
    parse_tags(values)
}

fn parse_keywords(rest: &str, usage: &str) -> Result<Vec<String>, ParseError> {
    let keywords: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(invalid_format(usage));
    }
    Ok(keywords)
}

fn contact(map: &ArgumentMultimap, name: Prefix, phone: Prefix) -> ContactRef {
    ContactRef {
        name: map.value(name).unwrap_or_default().to_string(),
        phone: map
            .value(phone)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
    }
}

fn parse_pair(rest: &str, usage: &str) -> Result<(ContactRef, ContactRef), ParseError> {
    let prefixes = [
        PREFIX_STUDENT_NAME,
        PREFIX_STUDENT_PHONE,
        PREFIX_PARENT_NAME,
        PREFIX_PARENT_PHONE,
    ];
    let map = tokenize(rest, &prefixes);
    let named = |p: Prefix| map.value(p).is_some_and(|v| !v.is_empty());
    if !named(PREFIX_STUDENT_NAME) || !named(PREFIX_PARENT_NAME) {
        return Err(invalid_format(usage));
    }
    map.verify_no_duplicate_prefixes_for(&prefixes)?;
    Ok((
        contact(&map, PREFIX_STUDENT_NAME, PREFIX_STUDENT_PHONE),
        contact(&map, PREFIX_PARENT_NAME, PREFIX_PARENT_PHONE),
    ))
}

fn parse_find_link(rest: &str) -> Result<Command, ParseError> {
    let map = tokenize(rest, &[PREFIX_NAME]);
    if !map.preamble().is_empty() {
        return Err(invalid_format(links::FIND_LINK_USAGE));
    }
    let name = match map.value(PREFIX_NAME) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => return Err(invalid_format(links::FIND_LINK_USAGE)),
    };
    map.verify_no_duplicate_prefixes_for(&[PREFIX_NAME])?;
    Ok(Command::FindLink(name))
}
