//! Letter-grouped sections for the sectioned list.
//!
//! [`group_by_letter`] buckets contacts under a [`GroupKey`]; [`Sections`]
//! answers the section/row questions a list widget asks.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use super::contact::{Contact, ContactId};

/// Section key: an ASCII initial `A`..=`Z`, or `#` for everything else.
///
/// The derived ordering puts every letter before [`GroupKey::Other`], so `#`
/// is always the last section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Letter(char),
    Other,
}

impl GroupKey {
    /// Key for a contact: initial of the first name, else of the last name, else `#`.
    pub fn for_contact(contact: &Contact) -> Self {
        let initial = |s: &Option<String>| s.as_deref().and_then(|s| s.trim().chars().next());
        match initial(&contact.first_name).or_else(|| initial(&contact.last_name)) {
            Some(ch) => Self::for_initial(ch),
            None => GroupKey::Other,
        }
    }

    /// Letters outside `A`..=`Z` (any script, any case form) land in `#`.
    fn for_initial(ch: char) -> Self {
        if ch.is_ascii_alphabetic() {
            GroupKey::Letter(ch.to_ascii_uppercase())
        } else {
            GroupKey::Other
        }
    }

    /// Parse an index-strip title such as `"a"`, `"R"` or `"#"`.
    pub fn from_title(title: &str) -> Option<Self> {
        let mut chars = title.trim().chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if ch == '#' {
            Some(GroupKey::Other)
        } else if ch.is_ascii_alphabetic() {
            Some(Self::for_initial(ch))
        } else {
            None
        }
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Letter(c) => write!(f, "{c}"),
            GroupKey::Other => f.write_str("#"),
        }
    }
}

/// Contacts grouped by [`GroupKey`], sections in display order.
#[derive(Clone, Debug, Default)]
pub struct Sections {
    groups: BTreeMap<GroupKey, Vec<Contact>>,
}

/// Group `contacts` by initial, keeping their relative order inside each group.
pub fn group_by_letter(contacts: &[Contact]) -> Sections {
    let mut groups: BTreeMap<GroupKey, Vec<Contact>> = BTreeMap::new();
    for contact in contacts {
        groups
            .entry(GroupKey::for_contact(contact))
            .or_default()
            .push(contact.clone());
    }
    Sections { groups }
}

impl Sections {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.groups.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = GroupKey> + '_ {
        self.groups.keys().copied()
    }

    pub fn section_titles(&self) -> Vec<String> {
        self.keys().map(|k| k.to_string()).collect()
    }

    pub fn get(&self, key: GroupKey) -> Option<&[Contact]> {
        self.groups.get(&key).map(Vec::as_slice)
    }

    /// Iterate `(key, rows)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &[Contact])> {
        self.groups.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn section(&self, section: usize) -> Option<(GroupKey, &[Contact])> {
        self.iter().nth(section)
    }

    pub fn row_count(&self, section: usize) -> usize {
        self.section(section).map(|(_, rows)| rows.len()).unwrap_or(0)
    }

    pub fn contact_at(&self, section: usize, row: usize) -> Option<&Contact> {
        self.section(section).and_then(|(_, rows)| rows.get(row))
    }

    pub fn total_rows(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Map a flat row index (rows counted across all sections) to `(section, row)`.
    pub fn locate(&self, flat: usize) -> Option<(usize, usize)> {
        let mut remaining = flat;
        for (section, rows) in self.groups.values().enumerate() {
            if remaining < rows.len() {
                return Some((section, remaining));
            }
            remaining -= rows.len();
        }
        None
    }

    /// Inverse of [`Sections::locate`].
    pub fn flat_position(&self, section: usize, row: usize) -> Option<usize> {
        let before: usize = self.groups.values().take(section).map(Vec::len).sum();
        (row < self.row_count(section)).then_some(before + row)
    }

    pub fn contact_at_flat(&self, flat: usize) -> Option<&Contact> {
        let (section, row) = self.locate(flat)?;
        self.contact_at(section, row)
    }

    /// Flat index of the contact with `id`, if it is displayed.
    pub fn position_of(&self, id: &ContactId) -> Option<usize> {
        self.groups.values().flatten().position(|c| c.id() == id)
    }

    /// Section to jump to for an index-strip title: the first present section
    /// at or after the title's key, else the last section.
    pub fn section_for_index_title(&self, title: &str) -> Option<usize> {
        if self.groups.is_empty() {
            return None;
        }
        let target = GroupKey::from_title(title)?;
        let idx = self
            .groups
            .keys()
            .position(|k| *k >= target)
            .unwrap_or(self.groups.len() - 1);
        Some(idx)
    }

    /// Flat index of the first row of `section`.
    pub fn section_start(&self, section: usize) -> Option<usize> {
        self.flat_position(section, 0)
    }
}
