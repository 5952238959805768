//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Bindings live in a simple `<Action> = <KeySpec>` file. Missing files are
//! created with the defaults so users have something to edit; unknown lines
//! are ignored.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions available on the contacts list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Show the keybindings reference.
    OpenHelp,
    /// Enter search mode.
    StartSearch,
    /// Drop the active search filter.
    CancelSearch,
    /// Open the editor for a new contact.
    NewContact,
    /// Open the editor for the selected contact.
    EditSelection,
    /// Ask to delete the selected contact.
    DeleteSelection,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Jump to the first row of the previous section.
    PrevSection,
    /// Jump to the first row of the next section.
    NextSection,
    /// Text the selected contact's mobile.
    MessageContact,
    /// Dial the selected contact's mobile.
    CallContact,
    /// Mail the selected contact.
    EmailContact,
    /// Ignore this key.
    Ignore,
}

pub const ACTIONS: [(KeyAction, &str); 17] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::CancelSearch, "CancelSearch"),
    (KeyAction::NewContact, "NewContact"),
    (KeyAction::EditSelection, "EditSelection"),
    (KeyAction::DeleteSelection, "DeleteSelection"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PageUp, "PageUp"),
    (KeyAction::PageDown, "PageDown"),
    (KeyAction::PrevSection, "PrevSection"),
    (KeyAction::NextSection, "NextSection"),
    (KeyAction::MessageContact, "MessageContact"),
    (KeyAction::CallContact, "CallContact"),
    (KeyAction::EmailContact, "EmailContact"),
    (KeyAction::Ignore, "Ignore"),
];

#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: arrows plus vim-style `j`/`k`, `[`/`]` for sections.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Esc), KeyAction::CancelSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewContact);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Char('[')), KeyAction::PrevSection);
        bindings.insert((M::NONE, Char(']')), KeyAction::NextSection);
        bindings.insert((M::NONE, Left), KeyAction::PrevSection);
        bindings.insert((M::NONE, Right), KeyAction::NextSection);

        bindings.insert((M::NONE, Char('s')), KeyAction::MessageContact);
        bindings.insert((M::NONE, Char('c')), KeyAction::CallContact);
        bindings.insert((M::NONE, Char('m')), KeyAction::EmailContact);

        Self { bindings }
    }

    /// Load `path`, or write the defaults there and return them.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "could not write default keybindings"
            );
        }
        km
    }

    /// Read overrides from `path` on top of the defaults.
    ///
    /// Accepts `Action = KeySpec` and the reversed `KeySpec = Action`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            tracing::debug!(line, "ignoring unrecognised keybinding");
        }
        Some(map)
    }

    /// Write every binding, sorted by action then key, to `path`.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut buf = String::new();
        buf.push_str("# contacts-manager keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Tab, Up, Down, Left, Right,\n");
        buf.push_str("#   PageUp, PageDown, Delete, /, [, ]\n");
        let names: Vec<&str> = ACTIONS.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut lines: Vec<(usize, String)> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| {
                let order = ACTIONS.iter().position(|(a, _)| a == action).unwrap_or(usize::MAX);
                (order, format!("{} = {}", format_action(*action), Self::format_key(*mods, *code)))
            })
            .collect();
        lines.sort();
        for (_, line) in lines {
            let _ = writeln!(&mut buf, "{line}");
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(action) = self.bindings.get(&(key.modifiers, key.code)) {
            return Some(*action);
        }
        // Terminals report symbols like '?' with SHIFT set
        match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::SHIFT) => self
                .bindings
                .get(&(key.modifiers - KeyModifiers::SHIFT, key.code))
                .copied(),
            _ => None,
        }
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys
    }

    /// Format a key like "Ctrl+c", "PageDown" or "/".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Backspace => "Backspace".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let mut rest = s;
    let mut mods = KeyModifiers::NONE;
    if let Some(after) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        rest = after;
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Backspace" => Backspace,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ACTIONS.iter().find(|(_, name)| *name == s).map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTIONS
        .iter()
        .find(|(action, _)| *action == a)
        .map(|(_, name)| *name)
        .unwrap_or("Ignore")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_resolve_core_keys() {
		let km = Keymap::default();
		let key = |c| KeyEvent::new(c, KeyModifiers::NONE);
		assert_eq!(km.resolve(&key(KeyCode::Char('/'))), Some(KeyAction::StartSearch));
		assert_eq!(km.resolve(&key(KeyCode::Char('n'))), Some(KeyAction::NewContact));
		assert_eq!(km.resolve(&key(KeyCode::Char(']'))), Some(KeyAction::NextSection));
		let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
		assert_eq!(km.resolve(&ctrl_c), Some(KeyAction::Quit));
		assert_eq!(km.resolve(&key(KeyCode::Char('Z'))), None);
	}

	#[test]
	fn parses_both_line_orders() {
		assert_eq!(parse_key("Ctrl+x"), Some((KeyModifiers::CONTROL, KeyCode::Char('x'))));
		assert_eq!(parse_key("PageDown"), Some((KeyModifiers::NONE, KeyCode::PageDown)));
		assert_eq!(parse_key("nope"), None);
		assert_eq!(parse_action("NewContact"), Some(KeyAction::NewContact));
		assert_eq!(format_action(KeyAction::EmailContact), "EmailContact");
	}

	#[test]
	fn keys_for_lists_every_binding() {
		let km = Keymap::default();
		assert_eq!(km.keys_for(KeyAction::MoveDown), vec!["Down".to_string(), "j".to_string()]);
	}
}
