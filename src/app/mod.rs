//! Application state types and entry glue.
//!
//! [`AppState`] owns the contact directory together with everything the list
//! screen needs: search state, selection, the open modal and user
//! configuration. Key handling lives in [`update`].
//!
pub mod editor;
pub mod keymap;
pub mod update;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ratatui::style::Color;

use crate::directory::{Contact, ContactDirectory, ContactId, DirectoryEvent, Sections};
use crate::launcher::{Communication, Launcher};
use crate::source::{ContactSource, seed_directory};

pub use editor::{CURRENT_PHOTO, EditorField, EditorState, PhotoError};
pub use keymap::{KeyAction, Keymap};

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub section: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

const THEME_KEYS: [&str; 11] = [
    "text",
    "muted",
    "title",
    "section",
    "border",
    "header_bg",
    "header_fg",
    "status_bg",
    "status_fg",
    "highlight_fg",
    "highlight_bg",
];

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            section: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
        }
    }

    /// Catppuccin Mocha.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            section: Color::Rgb(0x89, 0xb4, 0xfa),      // blue
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        let slot = match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "section" => &mut self.section,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            _ => return None,
        };
        Some(slot)
    }

    /// Load `key = color` lines on top of `mocha`. Unknown keys and bad colors are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            match (theme.slot(key.trim()), parse_color(val)) {
                (Some(slot), Some(color)) => *slot = color,
                _ => tracing::debug!(line, "ignoring theme line"),
            }
        }
        Some(theme)
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut buf = String::new();
        buf.push_str("# contacts-manager theme\n");
        buf.push_str("# Colors: #RRGGBB, RRGGBB, or 'reset'\n\n");
        let mut copy = *self;
        for key in THEME_KEYS {
            if let Some(color) = copy.slot(key) {
                let _ = writeln!(&mut buf, "{} = {}", key, color_to_str(*color));
            }
        }
        std::fs::write(path, buf)
    }

    /// Load `path`, or write `mocha` there and return it.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        t
    }
}

/// Parse `#RRGGBB`, `RRGGBB` or `reset`.
fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    let (r, g, b) = match c {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Reset => return "reset".to_string(),
        // best-effort approximations for named colors
        Color::Black => (0x00, 0x00, 0x00),
        Color::Red => (0xff, 0x00, 0x00),
        Color::Green => (0x00, 0xff, 0x00),
        Color::Yellow => (0xff, 0xff, 0x00),
        Color::Blue => (0x00, 0x00, 0xff),
        Color::Magenta => (0xff, 0x00, 0xff),
        Color::Cyan => (0x00, 0xff, 0xff),
        Color::Gray => (0xb3, 0xb3, 0xb3),
        Color::DarkGray => (0x4d, 0x4d, 0x4d),
        Color::LightRed => (0xff, 0x66, 0x66),
        Color::LightGreen => (0x66, 0xff, 0x66),
        Color::LightYellow => (0xff, 0xff, 0x66),
        Color::LightBlue => (0x66, 0x66, 0xff),
        Color::LightMagenta => (0xff, 0x66, 0xff),
        Color::LightCyan => (0x66, 0xff, 0xff),
        Color::White => (0xff, 0xff, 0xff),
        Color::Indexed(_) => return "reset".to_string(),
    };
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Resolve the default config directory: `$XDG_CONFIG_HOME/contacts-manager`,
/// then `~/.config/contacts-manager`, then the working directory.
pub fn default_config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("contacts-manager");
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config").join("contacts-manager");
    }
    PathBuf::from(".")
}

/// Modal dialogs layered over the list.
#[derive(Clone, Debug)]
pub enum ModalState {
    Editor(EditorState),
    DeleteConfirm { id: ContactId, selected: usize },
    Info { message: String },
    Help,
}

pub const EMPTY_DIRECTORY: &str = "No contacts. Press n to add.";
pub const EMPTY_SEARCH: &str = "No contacts match your search!";

pub struct AppState {
    pub directory: ContactDirectory,
    events: Rc<RefCell<Vec<DirectoryEvent>>>,
    pub input_mode: InputMode,
    pub search_query: String,
    pub is_searching: bool,
    /// Selected row, counted across all sections of the current view.
    pub selected: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub launcher: Launcher,
    /// Why seeding failed, if it did.
    pub load_error: Option<String>,
    /// One-line feedback for the status bar.
    pub status: Option<String>,
}

impl AppState {
    /// Build the app around an existing directory.
    pub fn with_directory(mut directory: ContactDirectory, theme: Theme, keymap: Keymap) -> Self {
        let events: Rc<RefCell<Vec<DirectoryEvent>>> = Rc::default();
        let sink = Rc::clone(&events);
        directory.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        Self {
            directory,
            events,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            is_searching: false,
            selected: 0,
            rows_per_page: 10,
            theme,
            keymap,
            modal: None,
            launcher: Launcher::default(),
            load_error: None,
            status: None,
        }
    }

    /// Seed from `source` and load `theme.conf` / `keybinds.conf` from `config_dir`.
    pub fn new(source: &dyn ContactSource, config_dir: &Path, launcher: Launcher) -> Self {
        let outcome = seed_directory(source);
        let theme = Theme::load_or_init(&config_dir.join("theme.conf"));
        let keymap = Keymap::load_or_init(&config_dir.join("keybinds.conf"));
        let mut app = Self::with_directory(outcome.directory, theme, keymap);
        app.launcher = launcher;
        app.load_error = outcome.error.map(|e| e.to_string());
        app
    }

    /// The sectioned list as currently displayed.
    pub fn view(&self) -> Sections {
        self.directory
            .display_view(&self.search_query, self.is_searching)
    }

    pub fn selected_contact(&self) -> Option<Contact> {
        self.view().contact_at_flat(self.selected).cloned()
    }

    pub fn empty_message(&self) -> String {
        let base = if self.is_searching { EMPTY_SEARCH } else { EMPTY_DIRECTORY };
        match &self.load_error {
            Some(err) if !self.is_searching => format!("{base}\n\n{err}"),
            _ => base.to_string(),
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.view().total_rows();
        self.selected = self.selected.min(total.saturating_sub(1));
    }

    pub fn start_search(&mut self) {
        self.is_searching = true;
        self.input_mode = InputMode::Search;
        self.selected = 0;
    }

    pub fn cancel_search(&mut self) {
        self.search_query.clear();
        self.is_searching = false;
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.selected = 0;
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn open_new_contact(&mut self) {
        self.open_modal(ModalState::Editor(EditorState::new_contact()));
    }

    pub fn open_edit_selected(&mut self) {
        if let Some(c) = self.selected_contact() {
            self.open_modal(ModalState::Editor(EditorState::edit(&c)));
        }
    }

    pub fn open_delete_selected(&mut self) {
        if let Some(c) = self.selected_contact() {
            self.open_modal(ModalState::DeleteConfirm {
                id: c.id().clone(),
                selected: 1,
            });
        }
    }

    /// Upsert the editor's contact if it is savable. Returns whether it was saved.
    pub fn save_editor(&mut self, editor: &EditorState) -> bool {
        if !editor.can_save() {
            self.status = Some("Enter a name, mobile or email first".to_string());
            return false;
        }
        match editor.to_contact() {
            Ok(contact) => {
                self.directory.upsert(contact);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "photo not loaded");
                self.status = Some(e.to_string());
                false
            }
        }
    }

    pub fn delete_contact(&mut self, id: &ContactId) {
        self.directory.remove_id(id);
    }

    /// Run a message/call/email action on the selected contact and report the result.
    pub fn communicate(&mut self, action: Communication) {
        let Some(contact) = self.selected_contact() else {
            return;
        };
        let message = match self.launcher.launch(action, &contact) {
            Ok(uri) if self.launcher.command.is_some() => format!("Opened {uri}"),
            Ok(uri) => format!("{}: {uri}", action.label()),
            Err(e) => {
                tracing::warn!(error = %e, "communication failed");
                e.to_string()
            }
        };
        self.open_modal(ModalState::Info { message });
    }

    /// Apply queued directory events: follow saved contacts, drop modals for removed ones.
    pub fn process_events(&mut self) {
        let events: Vec<DirectoryEvent> = self.events.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                DirectoryEvent::Upserted(contact) => {
                    if let Some(pos) = self.view().position_of(contact.id()) {
                        self.selected = pos;
                    }
                    self.status = Some(format!("Saved {}", contact.row_label()));
                }
                DirectoryEvent::Removed(contact) => {
                    let targets_removed = match &self.modal {
                        Some(ModalState::Editor(ed)) => ed.target() == contact.id(),
                        Some(ModalState::DeleteConfirm { id, .. }) => id == contact.id(),
                        _ => false,
                    };
                    if targets_removed {
                        self.close_modal();
                    }
                    self.clamp_selection();
                    self.status = Some(format!("Deleted {}", contact.row_label()));
                }
            }
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
	use super::*;

	fn mk(id: &str, first: &str, last: &str) -> Contact {
		Contact::with_id(id.parse().unwrap()).with_first_name(first).with_last_name(last)
	}

	fn mk_app() -> AppState {
		let dir = ContactDirectory::seeded([mk("1", "Ahmed", "Fathi"), mk("2", "Radwa", "Ahmed")]);
		AppState::with_directory(dir, Theme::dark(), Keymap::default())
	}

	#[test]
	fn saving_selects_the_saved_contact() {
		let mut app = mk_app();
		let mut ed = EditorState::new_contact();
		ed.set_value(EditorField::FirstName, "Mona");
		assert!(app.save_editor(&ed));
		app.process_events();
		assert_eq!(app.selected_contact().unwrap().row_label(), "Mona");
		assert_eq!(app.status.as_deref(), Some("Saved Mona"));
	}

	#[test]
	fn unsavable_editor_is_rejected() {
		let mut app = mk_app();
		assert!(!app.save_editor(&EditorState::new_contact()));
		assert_eq!(app.directory.len(), 2);
	}

	#[test]
	fn removing_closes_modal_for_that_contact() {
		let mut app = mk_app();
		app.selected = 1;
		app.open_edit_selected();
		app.delete_contact(&"2".parse().unwrap());
		app.process_events();
		assert!(app.modal.is_none());
		assert_eq!(app.selected, 0);
		assert_eq!(app.input_mode, InputMode::Normal);
	}

	#[test]
	fn empty_message_depends_on_search() {
		let mut app =
			AppState::with_directory(ContactDirectory::new(), Theme::dark(), Keymap::default());
		assert_eq!(app.empty_message(), EMPTY_DIRECTORY);
		app.load_error = Some("offline".into());
		assert!(app.empty_message().ends_with("offline"));
		app.start_search();
		assert_eq!(app.empty_message(), EMPTY_SEARCH);
	}

	#[test]
	fn parse_color_accepts_hex_and_reset() {
		assert_eq!(parse_color("#FF0080"), Some(Color::Rgb(0xff, 0x00, 0x80)));
		assert_eq!(parse_color("00ff00"), Some(Color::Rgb(0, 0xff, 0)));
		assert_eq!(parse_color("RESET"), Some(Color::Reset));
		assert_eq!(parse_color("#12345"), None);
		assert_eq!(parse_color("zzzzzz"), None);
	}
}
