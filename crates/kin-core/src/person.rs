//! Person and relationship records.
//!
//! These are the entities the store owns: [`Person`] rows on the guest
//! list and directed parent-child [`Relationship`] edges between them.
//! [`PersonDraft`] and [`PersonPatch`] carry the field bundles for
//! insertion and partial update respectively.

use serde::{Deserialize, Serialize};

use crate::identifier::PersonId;

fn default_invited() -> bool {
    true
}

/// A person on the guest list and in the family tree.
///
/// Contact fields and tags are explicitly optional rather than
/// empty-string sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique, stable identifier. Never reused within a session.
    pub id: PersonId,

    /// Display name. Always non-empty once stored.
    pub name: String,

    /// Free-form side/category tag, e.g. "Bride", "Groom", "Friend".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Whether this person is on the guest list.
    #[serde(default = "default_invited")]
    pub invited: bool,

    #[serde(default)]
    pub plus_one: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Person {
    /// Text shown inside a rendered tree node: the name, with the side tag
    /// on a second line when present.
    pub fn display_label(&self) -> String {
        match &self.side {
            Some(side) => format!("{}\n({})", self.name, side),
            None => self.name.clone(),
        }
    }
}

/// Field bundle for creating a new person; the store assigns the id.
#[derive(Debug, Clone, Default)]
pub struct PersonDraft {
    pub name: String,
    pub side: Option<String>,
    pub notes: Option<String>,
    pub invited: bool,
    pub plus_one: bool,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PersonDraft {
    /// Creates a draft with the given name, invited by default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            invited: true,
            ..Self::default()
        }
    }

    /// Sets the side/category tag.
    pub fn side(mut self, side: impl Into<String>) -> Self {
        self.side = Some(side.into());
        self
    }

    /// Sets the invited flag.
    pub fn invited(mut self, invited: bool) -> Self {
        self.invited = invited;
        self
    }

    /// Sets the plus-one flag.
    pub fn plus_one(mut self, plus_one: bool) -> Self {
        self.plus_one = plus_one;
        self
    }

    /// Sets the notes field.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the email contact field.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone contact field.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Partial update for a person: only `Some` fields change.
///
/// Optional text fields use a nested `Option` so a patch can distinguish
/// "leave unchanged" (`None`) from "clear the field" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub side: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub invited: Option<bool>,
    pub plus_one: Option<bool>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
}

impl PersonPatch {
    /// Creates an empty patch that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the side tag (`None` clears it).
    pub fn side(mut self, side: Option<String>) -> Self {
        self.side = Some(side);
        self
    }

    /// Replaces the notes field (`None` clears it).
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Replaces the invited flag.
    pub fn invited(mut self, invited: bool) -> Self {
        self.invited = Some(invited);
        self
    }

    /// Replaces the plus-one flag.
    pub fn plus_one(mut self, plus_one: bool) -> Self {
        self.plus_one = Some(plus_one);
        self
    }

    /// Replaces the email contact field (`None` clears it).
    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = Some(email);
        self
    }

    /// Replaces the phone contact field (`None` clears it).
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = Some(phone);
        self
    }
}

/// A directed parent-child edge between two people.
///
/// Both endpoints must reference existing people, the pair must be unique,
/// and a person can never be their own parent. The store enforces all
/// three; acyclicity is deliberately NOT required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub parent: PersonId,
    pub child: PersonId,
}

impl Relationship {
    /// Creates a relationship edge from parent to child.
    pub fn new(parent: PersonId, child: PersonId) -> Self {
        Self { parent, child }
    }
}
