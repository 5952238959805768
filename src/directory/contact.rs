//! The `Contact` record and its identifier.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Returned when parsing an empty string into a [`ContactId`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("contact id must not be empty")]
pub struct EmptyContactId;

/// Opaque, non-empty identifier of a contact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(String);

impl ContactId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContactId {
    type Err = EmptyContactId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EmptyContactId);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ContactId {
    type Error = EmptyContactId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(EmptyContactId);
        }
        Ok(Self(value))
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque photo bytes. Never decoded by this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Photo(pub Vec<u8>);

impl Photo {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single directory entry.
///
/// Equality and hashing only look at [`Contact::id`]: two values with the same
/// id are the same contact, whatever their other fields hold. Name ordering is
/// available through [`Contact::cmp_by_name`] rather than `Ord`, since it does
/// not agree with that equality.
#[derive(Clone, Debug)]
pub struct Contact {
    id: ContactId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub photo: Option<Photo>,
    pub is_own_contact: bool,
}

impl Contact {
    /// New empty contact with a generated id.
    pub fn new() -> Self {
        Self::with_id(ContactId::generate())
    }

    /// New empty contact with the given id.
    pub fn with_id(id: ContactId) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            mobile: None,
            email: None,
            notes: None,
            photo: None,
            is_own_contact: false,
        }
    }

    pub fn id(&self) -> &ContactId {
        &self.id
    }

    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn with_mobile(mut self, value: impl Into<String>) -> Self {
        self.mobile = Some(value.into());
        self
    }

    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn with_notes(mut self, value: impl Into<String>) -> Self {
        self.notes = Some(value.into());
        self
    }

    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn own_contact(mut self, is_own: bool) -> Self {
        self.is_own_contact = is_own;
        self
    }

    /// Order by first name, then last name. Missing names compare as "".
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        fn first(c: &Contact) -> &str {
            c.first_name.as_deref().unwrap_or("")
        }
        fn last(c: &Contact) -> &str {
            c.last_name.as_deref().unwrap_or("")
        }
        first(self)
            .cmp(first(other))
            .then_with(|| last(self).cmp(last(other)))
    }

    /// Present name parts, each trimmed, joined by a single space.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Label for a list row: the full name, or the mobile number when there is no name.
    pub fn row_label(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.mobile.as_deref().unwrap_or("").trim().to_string()
        } else {
            name
        }
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn named(id: &str, first: Option<&str>, last: Option<&str>) -> Contact {
		Contact {
			first_name: first.map(str::to_string),
			last_name: last.map(str::to_string),
			..Contact::with_id(id.parse().unwrap())
		}
	}

	#[test]
	fn empty_id_is_rejected() {
		assert_eq!("".parse::<ContactId>(), Err(EmptyContactId));
		assert_eq!(ContactId::try_from(String::new()), Err(EmptyContactId));
		assert_eq!("abc".parse::<ContactId>().unwrap().as_str(), "abc");
	}

	#[test]
	fn generated_ids_are_distinct_and_non_empty() {
		let a = ContactId::generate();
		let b = ContactId::generate();
		assert!(!a.as_str().is_empty());
		assert_ne!(a, b);
	}

	#[test]
	fn equality_only_looks_at_id() {
		let a = named("1", Some("Ahmed"), Some("Fathi"));
		let b = named("1", Some("Someone"), None);
		let c = named("2", Some("Ahmed"), Some("Fathi"));
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn first_name_dominates_last_name() {
		let a = named("1", Some("Ahmed"), Some("Zed"));
		let b = named("2", Some("Radwa"), Some("Ahmed"));
		assert_eq!(a.cmp_by_name(&b), Ordering::Less);
		assert_eq!(b.cmp_by_name(&a), Ordering::Greater);
	}

	#[test]
	fn missing_names_compare_as_empty() {
		let none = named("1", None, Some("B"));
		let empty = named("2", Some(""), Some("B"));
		let some = named("3", Some("A"), None);
		assert_eq!(none.cmp_by_name(&empty), Ordering::Equal);
		assert_eq!(none.cmp_by_name(&some), Ordering::Less);
	}

	#[test]
	fn row_label_falls_back_to_mobile() {
		let mut c = named("1", Some("  Ahmed "), Some(" "));
		assert_eq!(c.row_label(), "Ahmed");
		c.first_name = None;
		c.mobile = Some("0112345678".into());
		assert_eq!(c.row_label(), "0112345678");
		c.last_name = Some("Fathi".into());
		assert_eq!(c.row_label(), "Fathi");
	}
}
