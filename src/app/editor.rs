//! State of the new/edit contact form.
//!
//! The photo field takes a file path. An existing photo shows as
//! [`CURRENT_PHOTO`] until the field is edited; clearing the field drops it.

use std::path::PathBuf;

use thiserror::Error;

use crate::directory::{Contact, ContactId, Photo};

/// Photo field placeholder meaning "keep the stored photo".
pub const CURRENT_PHOTO: &str = "(current photo)";

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("cannot read photo {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("photo {} is empty", .path.display())]
    Empty { path: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorField {
    FirstName,
    LastName,
    Mobile,
    Email,
    Notes,
    Photo,
}

impl EditorField {
    pub const ALL: [EditorField; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Mobile,
        Self::Email,
        Self::Notes,
        Self::Photo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Mobile => "Mobile",
            Self::Email => "Email",
            Self::Notes => "Notes",
            Self::Photo => "Photo file",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug)]
pub struct EditorState {
    /// Contact being edited, or a fresh one. Supplies the id, photo and own-contact flag.
    base: Contact,
    is_new: bool,
    values: [String; 6],
    pub focus: EditorField,
}

impl EditorState {
    pub fn new_contact() -> Self {
        Self {
            base: Contact::new(),
            is_new: true,
            values: Default::default(),
            focus: EditorField::FirstName,
        }
    }

    pub fn edit(contact: &Contact) -> Self {
        let text = |s: &Option<String>| s.clone().unwrap_or_default();
        Self {
            base: contact.clone(),
            is_new: false,
            values: [
                text(&contact.first_name),
                text(&contact.last_name),
                text(&contact.mobile),
                text(&contact.email),
                text(&contact.notes),
                match &contact.photo {
                    Some(_) => CURRENT_PHOTO.to_string(),
                    None => String::new(),
                },
            ],
            focus: EditorField::FirstName,
        }
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn target(&self) -> &ContactId {
        self.base.id()
    }

    pub fn title(&self) -> &'static str {
        if self.is_new { "New Contact" } else { "Edit Contact" }
    }

    pub fn value(&self, field: EditorField) -> &str {
        &self.values[field.index()]
    }

    pub fn set_value(&mut self, field: EditorField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn next_field(&mut self) {
        let i = (self.focus.index() + 1) % EditorField::ALL.len();
        self.focus = EditorField::ALL[i];
    }

    pub fn prev_field(&mut self) {
        let n = EditorField::ALL.len();
        let i = (self.focus.index() + n - 1) % n;
        self.focus = EditorField::ALL[i];
    }

    /// Type into the focused field. A leading space in an empty field is dropped.
    pub fn insert_char(&mut self, c: char) {
        let value = &mut self.values[self.focus.index()];
        if value.as_str() == CURRENT_PHOTO {
            value.clear();
        }
        if value.is_empty() && c == ' ' {
            return;
        }
        value.push(c);
    }

    pub fn backspace(&mut self) {
        let value = &mut self.values[self.focus.index()];
        if value.as_str() == CURRENT_PHOTO {
            value.clear();
        } else {
            value.pop();
        }
    }

    /// Saving needs at least one of first name, last name, mobile or email.
    pub fn can_save(&self) -> bool {
        [
            EditorField::FirstName,
            EditorField::LastName,
            EditorField::Mobile,
            EditorField::Email,
        ]
        .iter()
        .any(|f| !self.value(*f).trim().is_empty())
    }

    /// The contact to upsert. Blank fields become absent; a photo path is read from disk.
    pub fn to_contact(&self) -> Result<Contact, PhotoError> {
        let field = |f: EditorField| {
            let v = self.value(f).trim();
            (!v.is_empty()).then(|| v.to_string())
        };
        let mut contact = self.base.clone();
        contact.first_name = field(EditorField::FirstName);
        contact.last_name = field(EditorField::LastName);
        contact.mobile = field(EditorField::Mobile);
        contact.email = field(EditorField::Email);
        contact.notes = field(EditorField::Notes);
        contact.photo = match field(EditorField::Photo) {
            None => None,
            Some(v) if v == CURRENT_PHOTO => self.base.photo.clone(),
            Some(path) => Some(load_photo(PathBuf::from(path))?),
        };
        Ok(contact)
    }
}

fn load_photo(path: PathBuf) -> Result<Photo, PhotoError> {
    match std::fs::read(&path) {
        Ok(bytes) if bytes.is_empty() => Err(PhotoError::Empty { path }),
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded photo");
            Ok(Photo(bytes))
        }
        Err(source) => Err(PhotoError::Unreadable { path, source }),
    }
}
