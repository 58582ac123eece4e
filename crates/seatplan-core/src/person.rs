//! Attendee roster.

use crate::error::{SeatingError, SeatingResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a person.
pub type PersonId = String;

/// An attendee. Immutable once loaded into a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Avatar image reference (URL or asset path).
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    /// Free-form role such as `VIP`, `Speaker`, `Sponsor` or `Guest`.
    #[serde(default)]
    pub role: String,
}

impl Person {
    /// Create a person with only an id and a name.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: String::new(),
            company: String::new(),
            title: String::new(),
            role: String::new(),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// First letter of each word in the name, used for seat markers.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }

    /// Case-insensitive match against name, company and title.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.company.to_lowercase().contains(&term)
            || self.title.to_lowercase().contains(&term)
    }
}

/// Ordered collection of people with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    people: Vec<Person>,
    index: HashMap<PersonId, usize>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, rejecting duplicate ids.
    pub fn from_people(people: Vec<Person>) -> SeatingResult<Self> {
        let mut roster = Self::new();
        for person in people {
            roster.insert(person)?;
        }
        Ok(roster)
    }

    /// Append a person. Fails if the id is already present.
    pub fn insert(&mut self, person: Person) -> SeatingResult<()> {
        if self.index.contains_key(&person.id) {
            return Err(SeatingError::DuplicatePerson(person.id));
        }
        self.index.insert(person.id.clone(), self.people.len());
        self.people.push(person);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.index.get(id).map(|&i| &self.people[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// People in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    pub fn as_slice(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People whose name, company or title contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&Person> {
        self.people.iter().filter(|p| p.matches(term)).collect()
    }
}
