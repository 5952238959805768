use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::app::{AppState, EditorState, InputMode, KeyAction, ModalState};
use crate::launcher::Communication;
use crate::ui;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(app, key) {
                    break;
                }
            }
        }
    }
    tracing::info!(contacts = app.directory.len(), "exiting");
    Ok(())
}

/// Apply one key press. Returns `false` when the app should exit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    let keep_running = match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key);
            true
        }
        InputMode::Modal => {
            handle_modal_key(app, key);
            true
        }
    };
    app.process_events();
    keep_running
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> bool {
    let Some(action) = app.keymap.resolve(&key) else {
        // Index strip: Shift+letter or '#' jumps to that section
        if let KeyCode::Char(c) = key.code {
            if c.is_ascii_uppercase() || c == '#' {
                jump_to_index_title(app, &c.to_string());
            }
        }
        return true;
    };
    app.status = None;
    match action {
        KeyAction::Quit => return false,
        KeyAction::OpenHelp => app.open_modal(ModalState::Help),
        KeyAction::StartSearch => app.start_search(),
        KeyAction::CancelSearch => {
            if app.is_searching {
                app.cancel_search();
            }
        }
        KeyAction::NewContact => app.open_new_contact(),
        KeyAction::EditSelection => app.open_edit_selected(),
        KeyAction::DeleteSelection => app.open_delete_selected(),
        KeyAction::MoveUp => move_selection(app, -1),
        KeyAction::MoveDown => move_selection(app, 1),
        KeyAction::PageUp => move_selection(app, -(app.rows_per_page.max(1) as isize)),
        KeyAction::PageDown => move_selection(app, app.rows_per_page.max(1) as isize),
        KeyAction::PrevSection => jump_section(app, false),
        KeyAction::NextSection => jump_section(app, true),
        KeyAction::MessageContact => app.communicate(Communication::Message),
        KeyAction::CallContact => app.communicate(Communication::Call),
        KeyAction::EmailContact => app.communicate(Communication::Email),
        KeyAction::Ignore => {}
    }
    true
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if app.search_query.trim().is_empty() {
                app.cancel_search();
            } else {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Backspace => {
            let mut q = app.search_query.clone();
            q.pop();
            app.set_query(q);
        }
        KeyCode::Up => move_selection(app, -1),
        KeyCode::Down => move_selection(app, 1),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let q = format!("{}{}", app.search_query, c);
            app.set_query(q);
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) {
    let Some(modal) = app.modal.take() else {
        app.input_mode = InputMode::Normal;
        return;
    };
    match modal {
        ModalState::Editor(mut editor) => {
            if let Some(next) = handle_editor_key(app, &mut editor, key) {
                app.modal = Some(next);
            } else {
                app.close_modal();
            }
        }
        ModalState::DeleteConfirm { id, mut selected } => match key.code {
            KeyCode::Esc | KeyCode::Char('n') => app.close_modal(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                selected = if selected == 0 { 1 } else { 0 };
                app.modal = Some(ModalState::DeleteConfirm { id, selected });
            }
            KeyCode::Char('y') => {
                app.close_modal();
                app.delete_contact(&id);
            }
            KeyCode::Enter => {
                app.close_modal();
                if selected == 0 {
                    app.delete_contact(&id);
                }
            }
            _ => app.modal = Some(ModalState::DeleteConfirm { id, selected }),
        },
        ModalState::Info { message } => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_modal(),
            _ => app.modal = Some(ModalState::Info { message }),
        },
        ModalState::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.close_modal()
            }
            _ => app.modal = Some(ModalState::Help),
        },
    }
}

/// Returns the modal to keep open, or `None` to close the editor.
fn handle_editor_key(
    app: &mut AppState,
    editor: &mut EditorState,
    key: KeyEvent,
) -> Option<ModalState> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return None,
        KeyCode::Enter => {
            if app.save_editor(editor) {
                return None;
            }
        }
        KeyCode::Char('s') if ctrl => {
            if app.save_editor(editor) {
                return None;
            }
        }
        KeyCode::Tab | KeyCode::Down => editor.next_field(),
        KeyCode::BackTab | KeyCode::Up => editor.prev_field(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Char(c) if !ctrl => editor.insert_char(c),
        _ => {}
    }
    Some(ModalState::Editor(editor.clone()))
}

fn move_selection(app: &mut AppState, delta: isize) {
    let total = app.view().total_rows();
    if total == 0 {
        app.selected = 0;
        return;
    }
    let max = total - 1;
    app.selected = if delta < 0 {
        app.selected.saturating_sub(delta.unsigned_abs())
    } else {
        app.selected.saturating_add(delta as usize).min(max)
    };
}

fn jump_section(app: &mut AppState, forward: bool) {
    let view = app.view();
    let Some((section, row)) = view.locate(app.selected) else {
        return;
    };
    let target = if forward {
        section + 1
    } else if row > 0 {
        section
    } else {
        section.saturating_sub(1)
    };
    if let Some(start) = view.section_start(target) {
        app.selected = start;
    }
}

fn jump_to_index_title(app: &mut AppState, title: &str) {
    let view = app.view();
    if let Some(start) = view
        .section_for_index_title(title)
        .and_then(|s| view.section_start(s))
    {
        app.selected = start;
    }
}
