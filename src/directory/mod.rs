//! The contact directory: the authoritative list of contacts and its derived views.
//!
//! Mutation goes through [`ContactDirectory::upsert`] and [`ContactDirectory::remove`].
//! Every view (sorted, filtered, grouped) is recomputed from the current
//! snapshot on each call. Interested parties register a listener with
//! [`ContactDirectory::subscribe`] to hear about changes.
//!
pub mod contact;
pub mod sections;

use std::fmt::{Debug, Formatter};

pub use contact::{Contact, ContactId, EmptyContactId, Photo};
pub use sections::{GroupKey, Sections, group_by_letter};

/// Change notification delivered to subscribed listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum DirectoryEvent {
    /// A contact was inserted or overwritten; carries the stored value.
    Upserted(Contact),
    /// A contact was removed; carries the value that was stored.
    Removed(Contact),
}

/// Handle returned by [`ContactDirectory::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&DirectoryEvent)>;

#[derive(Default)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from seed records. Later duplicates of an id overwrite earlier ones.
    pub fn seeded(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let mut dir = Self::new();
        for c in contacts {
            dir.upsert(c);
        }
        dir
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Contacts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: &ContactId) -> bool {
        self.get(id).is_some()
    }

    /// Insert `contact`, or overwrite every field of the stored contact with the same id.
    pub fn upsert(&mut self, contact: Contact) {
        match self.contacts.iter().position(|c| c == &contact) {
            Some(idx) => {
                tracing::debug!(id = %contact.id(), "replacing contact");
                self.contacts[idx] = contact.clone();
            }
            None => {
                tracing::debug!(id = %contact.id(), "adding contact");
                self.contacts.push(contact.clone());
            }
        }
        self.notify(&DirectoryEvent::Upserted(contact));
    }

    /// Remove the contact sharing `contact`'s id. Unknown ids are ignored.
    pub fn remove(&mut self, contact: &Contact) {
        self.remove_id(contact.id());
    }

    /// Remove by id, returning the stored value if there was one.
    pub fn remove_id(&mut self, id: &ContactId) -> Option<Contact> {
        let idx = self.contacts.iter().position(|c| c.id() == id)?;
        let removed = self.contacts.remove(idx);
        tracing::debug!(id = %id, "removed contact");
        self.notify(&DirectoryEvent::Removed(removed.clone()));
        Some(removed)
    }

    /// All contacts by first name, then last name. Ties keep insertion order.
    pub fn sorted_contacts(&self) -> Vec<Contact> {
        let mut sorted = self.contacts.clone();
        sorted.sort_by(Contact::cmp_by_name);
        sorted
    }

    /// Sorted contacts, filtered by `query` while searching, grouped by initial.
    pub fn display_view(&self, query: &str, is_searching: bool) -> Sections {
        let sorted = self.sorted_contacts();
        if is_searching && !query.trim().is_empty() {
            group_by_letter(&crate::search::filter(&sorted, query))
        } else {
            group_by_letter(&sorted)
        }
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&DirectoryEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: &DirectoryEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl Debug for ContactDirectory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactDirectory")
            .field("contacts", &self.contacts)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
