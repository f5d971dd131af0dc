//! Person key
//!
//! People are not stored entities: a person is the normalized form of the
//! name typed by a user (trimmed, lowercased) and is used as a map key across
//! items, expenses, balances and settlements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized person name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Person(String);

impl Person {
    /// Create a person key from a raw name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// The normalized key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the name was blank
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title-cased name for display ("mary jane" -> "Mary Jane")
    pub fn display_name(&self) -> String {
        self.0
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Person {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for Person {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<Person> for String {
    fn from(person: Person) -> Self {
        person.0
    }
}

/// Normalize a list of names, dropping repeats while keeping first-seen order
pub fn unique_people<I, S>(names: I) -> Vec<Person>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut people: Vec<Person> = Vec::new();
    for name in names {
        let person = Person::new(name);
        if !people.contains(&person) {
            people.push(person);
        }
    }
    people
}
