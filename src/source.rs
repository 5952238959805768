//! Seed providers for the directory.
//!
//! A [`ContactSource`] hands back the initial records or a [`FetchError`].
//! [`seed_directory`] never fails: a broken source yields an empty directory
//! plus the error text for the empty-state message.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::directory::{Contact, ContactDirectory, ContactId};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("contacts source {} is unavailable: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("contacts source returned malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

pub trait ContactSource {
    /// Short description used in logs.
    fn name(&self) -> &str;
    fn fetch(&self) -> Result<Vec<Contact>, FetchError>;
}

/// The two built-in sample contacts.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleContacts;

impl ContactSource for SampleContacts {
    fn name(&self) -> &str {
        "built-in samples"
    }

    fn fetch(&self) -> Result<Vec<Contact>, FetchError> {
        let ahmed = Contact::new()
            .with_first_name("Ahmed")
            .with_last_name("Fathi")
            .with_mobile("0112345678")
            .with_email("ahmedfathi680@gmail.com");
        let radwa = Contact::new()
            .with_first_name("Radwa")
            .with_last_name("Ahmed")
            .with_mobile("0112233445");
        Ok(vec![ahmed, radwa])
    }
}

/// Wire shape of one record in a JSON seed file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContactRecord {
    id: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    mobile: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    is_own_contact: bool,
}

impl ContactRecord {
    fn into_contact(self, index: usize) -> Result<Contact, FetchError> {
        let id: ContactId = self.id.try_into().map_err(|e| FetchError::InvalidRecord {
            index,
            reason: format!("{e}"),
        })?;
        let mut contact = Contact::with_id(id).own_contact(self.is_own_contact);
        contact.first_name = self.first_name;
        contact.last_name = self.last_name;
        contact.mobile = self.mobile;
        contact.email = self.email;
        contact.notes = self.notes;
        Ok(contact)
    }
}

/// Parse a JSON array of contact records.
pub fn parse_records(json: &str) -> Result<Vec<Contact>, FetchError> {
    let records: Vec<ContactRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_contact(i))
        .collect()
}

/// Reads records from a JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
    label: String,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let label = path.display().to_string();
        Self { path, label }
    }
}

impl ContactSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> Result<Vec<Contact>, FetchError> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| FetchError::Unavailable {
                path: self.path.clone(),
                source,
            })?;
        parse_records(&contents)
    }
}

/// Result of seeding: the directory plus the fetch error, if one was swallowed.
#[derive(Debug)]
pub struct SeedOutcome {
    pub directory: ContactDirectory,
    pub error: Option<FetchError>,
}

/// Fetch from `source`, falling back to an empty directory on failure.
pub fn seed_directory(source: &dyn ContactSource) -> SeedOutcome {
    match source.fetch() {
        Ok(contacts) => {
            tracing::info!(source = source.name(), count = contacts.len(), "seeded directory");
            SeedOutcome {
                directory: ContactDirectory::seeded(contacts),
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(source = source.name(), error = %err, "seeding failed; starting empty");
            SeedOutcome {
                directory: ContactDirectory::new(),
                error: Some(err),
            }
        }
    }
}
