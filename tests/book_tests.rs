// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use classconnect::book::{AddressBook, Model, PersonFilter};
use classconnect::error::{CommandError, LinkError, TagNotFound};
use classconnect::models::{Address, Email, Name, Person, Phone, Remark, Role, Tag};
use classconnect::tags::TagRegistry;

fn tag(t: &str) -> Tag {
    Tag::parse(t).unwrap()
}

fn name(s: &str) -> Name {
    Name::parse(s).unwrap()
}

fn student(n: &str, phone: &str, tags: &[&str]) -> Person {
    Person::student(
        name(n),
        Phone::parse(phone).unwrap(),
        Email::parse("student@example.com").unwrap(),
        Address::parse("123, Jurong West Ave 6").unwrap(),
        Remark::default(),
        tags.iter().map(|t| tag(t)).collect(),
    )
}

fn parent(n: &str, phone: &str) -> Person {
    Person::parent(
        name(n),
        Phone::parse(phone).unwrap(),
        Email::parse("parent@example.com").unwrap(),
        Address::parse("wall street").unwrap(),
        Remark::default(),
    )
}

fn setup() -> AddressBook {
    let mut book = AddressBook::new();
    book.add_tag_types(&[tag("Math"), tag("Science")]);
    book.add_person(student("Alice Pauline", "94351253", &["Math"]))
        .unwrap();
    book.add_person(student("Benson Meier", "98765432", &["Math", "Science"]))
        .unwrap();
    book.add_person(parent("Carl Kurz", "95352563")).unwrap();
    book.add_person(parent("Daniel Meier", "87652533")).unwrap();
    book.link(&name("Alice Pauline"), &name("Carl Kurz")).unwrap();
    book
}

#[test]
fn registry_reports_already_present_tags() {
    let mut reg = TagRegistry::new();
    assert!(reg.add_tags(&[tag("Math")]).is_empty());
    let already = reg.add_tags(&[tag("Math"), tag("Art")]);
    assert_eq!(already, BTreeSet::from([tag("Math")]));
    assert!(reg.contains(&tag("Art")));

    reg.delete_tags(&[tag("Math")]);
    assert!(!reg.contains(&tag("Math")));
    reg.clear();
    assert!(reg.is_empty());
}

#[test]
fn registry_validates_student_tags() {
    let mut reg = TagRegistry::new();
    reg.add_tags(&[tag("Math")]);
    assert_eq!(reg.validate_person(&student("A", "123", &["Math"])), Ok(true));
    assert_eq!(reg.validate_person(&parent("B", "123")), Ok(false));
    assert_eq!(
        reg.validate_person(&student("A", "123", &["Math", "Art"])),
        Err(TagNotFound(tag("Art")))
    );
}

#[test]
fn duplicate_names_are_rejected() {
    let mut book = setup();
    let err = book
        .add_person(parent("Alice Pauline", "11111111"))
        .unwrap_err();
    assert_eq!(err, CommandError::DuplicatePerson);
    assert_eq!(book.persons().len(), 4);
}

#[test]
fn find_by_name_ignores_case() {
    let book = setup();
    assert_eq!(
        book.find_by_name("carl kurz").map(|p| p.role()),
        Some(Role::Parent)
    );
    assert!(book.find_by_name("carl").is_none());
}

#[test]
fn link_rules() {
    let mut book = setup();
    assert_eq!(
        book.link(&name("Alice Pauline"), &name("Carl Kurz")),
        Err(LinkError::AlreadyLinked)
    );
    assert_eq!(
        book.link(&name("Alice Pauline"), &name("Benson Meier")),
        Err(LinkError::SameRole(Role::Student))
    );
    assert_eq!(
        book.link(&name("Carl Kurz"), &name("Carl Kurz")),
        Err(LinkError::SelfLink)
    );
    assert_eq!(
        book.link(&name("Nobody"), &name("Carl Kurz")),
        Err(LinkError::UnknownPerson("Nobody".into()))
    );
    assert_eq!(
        LinkError::SameRole(Role::Parent).to_string(),
        "Cannot link two parents together."
    );

    book.link(&name("Benson Meier"), &name("Carl Kurz")).unwrap();
    let linked: Vec<&str> = book
        .linked_persons(&name("Carl Kurz"))
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(linked, vec!["Alice Pauline", "Benson Meier"]);
}

#[test]
fn unlink_rules() {
    let mut book = setup();
    assert_eq!(
        book.unlink(&name("Benson Meier"), &name("Daniel Meier")),
        Err(LinkError::NotLinked)
    );
    book.unlink(&name("Carl Kurz"), &name("Alice Pauline")).unwrap();
    assert!(book.graph().is_empty());
}

#[test]
fn removing_a_person_drops_their_links() {
    let mut book = setup();
    let removed = book.remove_person(&name("Carl Kurz")).unwrap();
    assert_eq!(removed.name.as_str(), "Carl Kurz");
    assert!(book.graph().is_empty());
    assert!(book.linked_persons(&name("Alice Pauline")).is_empty());
    assert!(book.remove_person(&name("Carl Kurz")).is_none());
}

#[test]
fn renaming_carries_links_over() {
    let mut book = setup();
    let carl = book.person(&name("Carl Kurz")).unwrap().clone();
    let renamed = Person {
        name: name("Carl Kurtz"),
        ..carl
    };
    book.set_person(&name("Carl Kurz"), renamed).unwrap();
    assert!(book.graph().is_linked(&name("Alice Pauline"), &name("Carl Kurtz")));
    assert!(!book.graph().is_linked(&name("Alice Pauline"), &name("Carl Kurz")));

    let clash = parent("Daniel Meier", "87652533");
    assert_eq!(
        book.set_person(&name("Carl Kurtz"), clash),
        Err(CommandError::DuplicatePerson)
    );
}

#[test]
fn deleting_tag_types_strips_students() {
    let mut book = setup();
    book.delete_tag_types(&BTreeSet::from([tag("Math")]));
    assert!(!book.has_tag(&tag("Math")));
    for p in book.persons() {
        if let Some(tags) = p.tags() {
            assert!(!tags.contains(&tag("Math")));
        }
    }
    assert!(book.has_tag(&tag("Science")));
}

#[test]
fn reset_and_clear() {
    let book = setup();
    let mut other = AddressBook::new();
    other.reset(&book);
    assert_eq!(other, book);
    other.clear();
    assert!(other.persons().is_empty());
    assert!(other.tags().is_empty());
    assert!(other.graph().is_empty());
}

#[test]
fn filters_select_displayed_persons() {
    let mut model = Model::new(setup());
    assert_eq!(model.displayed().len(), 4);

    model.set_filter(PersonFilter::tags(&["science", " "]));
    let shown: Vec<&str> = model.displayed().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(shown, vec!["Benson Meier"]);

    model.set_filter(PersonFilter::NameKeywords(vec!["MEIER".into()]));
    assert_eq!(model.displayed().len(), 2);

    model.set_filter(PersonFilter::NameKeywords(vec!["Mei".into()]));
    assert!(model.displayed().is_empty());

    model.set_filter(PersonFilter::Members(BTreeSet::from([name("Carl Kurz")])));
    assert_eq!(model.displayed()[0].name.as_str(), "Carl Kurz");
}

#[test]
fn set_person_reports_a_missing_target() {
    let mut book = setup();
    let err = book
        .set_person(&name("Nobody"), parent("Nobody", "12345"))
        .unwrap_err();
    assert_eq!(err, CommandError::UnknownPerson("Nobody".into()));
    assert_eq!(err.to_string(), "'Nobody' is no longer in the address book.");
}

#[test]
fn resolve_name_prefers_the_exact_name() {
    let mut book = setup();
    book.add_person(student("alice pauline", "91112222", &[]))
        .unwrap();
    assert_eq!(
        book.resolve_name("alice pauline").map(|p| p.phone.as_str()),
        Some("91112222")
    );
    assert_eq!(
        book.resolve_name("ALICE PAULINE").map(|p| p.phone.as_str()),
        Some("94351253")
    );
    assert!(book.resolve_name("Nobody").is_none());
}
