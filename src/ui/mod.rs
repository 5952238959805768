pub mod components;
pub mod contacts;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, KeyAction, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(root[1]);

    let prompt = match app.input_mode {
        InputMode::Search => format!("  Search: {}_", app.search_query),
        _ if app.is_searching => format!("  Filter: {}", app.search_query),
        _ => String::new(),
    };
    let p = Paragraph::new(format!(
        "contacts: {}{prompt}  {}",
        app.directory.len(),
        key_hints(app)
    ))
    .block(
        Block::default()
            .title("Contacts")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    let view = app.view();
    contacts::render_contact_list(f, body[0], app, &view);
    contacts::render_contact_details(f, body[1], app);

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

const HEADER_HINTS: [(KeyAction, &str); 6] = [
    (KeyAction::StartSearch, "search"),
    (KeyAction::NewContact, "new"),
    (KeyAction::EditSelection, "edit"),
    (KeyAction::DeleteSelection, "delete"),
    (KeyAction::OpenHelp, "help"),
    (KeyAction::Quit, "quit"),
];

/// Header hint line built from the active keymap, e.g. `/: search; n: new`.
/// Shows the shortest key per action; actions left without a key are omitted.
pub fn key_hints(app: &AppState) -> String {
    HEADER_HINTS
        .iter()
        .filter_map(|(action, label)| {
            let keys = app.keymap.keys_for(*action);
            let key = keys.iter().min_by_key(|k| k.chars().count())?;
            Some(format!("{key}: {label}"))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(state) = app.modal.as_ref() else {
        return;
    };
    match state {
        ModalState::Editor(editor) => components::render_editor_modal(f, area, app, editor),
        ModalState::DeleteConfirm { .. } => components::render_delete_modal(f, area, app, state),
        ModalState::Info { .. } => components::render_info_modal(f, area, app, state),
        ModalState::Help => components::render_help_modal(f, area, app),
    }
}
