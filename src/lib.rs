//! Library crate for contacts-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - The contact store, ordering and letter sections (`directory`)
//! - Case-insensitive contact search (`search`)
//! - Seed providers: built-in samples and JSON files (`source`)
//! - Message / call / email hand-off (`launcher`)
//! - Application state and update loop (`app`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `contacts-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod app;
pub mod directory;
pub mod launcher;
pub mod search;
pub mod source;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use directory::{Contact, ContactDirectory, ContactId, DirectoryEvent, GroupKey, Sections};
pub use launcher::{Communication, LaunchError, Launcher};
pub use source::{ContactSource, FetchError, JsonFileSource, SampleContacts};
