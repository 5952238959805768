//! Message / call / email hand-off for a single contact.
//!
//! Builds `sms:`, `tel:` and `mailto:` URIs and, when an opener command is
//! configured (e.g. `xdg-open`), runs it with the URI as its only argument.
//!
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::directory::Contact;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("cannot {action}: {name} has no {field}")]
    MissingField {
        action: &'static str,
        name: String,
        field: &'static str,
    },
    #[error("failed to execute {command} {uri}: {source}")]
    Spawn {
        command: String,
        uri: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Opener(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Communication {
    Message,
    Call,
    Email,
}

impl Communication {
    pub const ALL: [Communication; 3] = [Self::Message, Self::Call, Self::Email];

    pub fn label(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Call => "call",
            Self::Email => "email",
        }
    }

    fn target(self, contact: &Contact) -> Option<&str> {
        let field = match self {
            Self::Message | Self::Call => contact.mobile.as_deref(),
            Self::Email => contact.email.as_deref(),
        };
        field.map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether `contact` has the field this action needs.
    pub fn is_available(self, contact: &Contact) -> bool {
        self.target(contact).is_some()
    }

    pub fn uri(self, contact: &Contact) -> Option<String> {
        let target = self.target(contact)?;
        let uri = match self {
            Self::Message => format!("sms:{}", strip_spaces(target)),
            Self::Call => format!("tel:{}", strip_spaces(target)),
            Self::Email => format!("mailto:{target}"),
        };
        Some(uri)
    }
}

fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Runs the configured opener, if any.
#[derive(Clone, Debug, Default)]
pub struct Launcher {
    pub command: Option<String>,
}

impl Launcher {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    /// Hand `action`'s URI for `contact` to the opener.
    ///
    /// Returns the URI. Without an opener nothing is run and the caller shows the URI instead.
    pub fn launch(
        &self,
        action: Communication,
        contact: &Contact,
    ) -> Result<String, LaunchError> {
        let uri = action.uri(contact).ok_or_else(|| LaunchError::MissingField {
            action: action.label(),
            name: display_name(contact),
            field: if action == Communication::Email { "email" } else { "mobile number" },
        })?;
        let Some(cmd) = self.command.as_deref() else {
            return Ok(uri);
        };
        tracing::info!(command = cmd, uri = %uri, "launching");
        let output = Command::new(cmd)
            .arg(&uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| LaunchError::Spawn {
                command: cmd.to_string(),
                uri: uri.clone(),
                source,
            })?;
        if output.status.success() {
            Ok(uri)
        } else {
            Err(LaunchError::Opener(format_cli_error(cmd, &output)))
        }
    }
}

fn display_name(contact: &Contact) -> String {
    let label = contact.row_label();
    if label.is_empty() { "contact".to_string() } else { label }
}

fn format_cli_error(cmd: &str, output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("{} returned non-zero status: {}", cmd, output.status)
    } else {
        format!("{} failed: {}", cmd, stderr)
    }
}
