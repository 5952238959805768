//! Shared UI components (status bar, modals).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::ACTIONS;
use crate::app::{AppState, EditorField, EditorState, InputMode, KeyAction, ModalState};

/// Render the bottom status bar with mode, counts and the last status message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let view = app.view();
    let mut msg = format!(
        "mode: {mode}  shown:{}/{}  sections:{}",
        view.total_rows(),
        app.directory.len(),
        view.section_count()
    );
    if let Some(status) = &app.status {
        msg.push_str("  ");
        msg.push_str(status);
    }
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn modal_block(title: &str, app: &AppState) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        // Compute a sensible max width and height; wrap long text
        let max_w = area.width.saturating_sub(6).max(30);
        let min_w = 50u16.min(max_w);
        let approx_lines = (message.len() as u16 / (min_w.saturating_sub(4).max(10))).max(1);
        let max_h = area.height.saturating_sub(6).max(5);
        let height = (approx_lines + 4).min(max_h).max(5);
        let rect = centered_rect(min_w, height, area);
        let p = Paragraph::new(message.clone())
            .wrap(Wrap { trim: false })
            .block(modal_block("Info", app));
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

fn help_label(action: KeyAction) -> &'static str {
    match action {
        KeyAction::Quit => "Quit",
        KeyAction::OpenHelp => "Help",
        KeyAction::StartSearch => "Search",
        KeyAction::CancelSearch => "Clear search",
        KeyAction::NewContact => "New contact",
        KeyAction::EditSelection => "Edit contact",
        KeyAction::DeleteSelection => "Delete contact",
        KeyAction::MoveUp => "Move up",
        KeyAction::MoveDown => "Move down",
        KeyAction::PageUp => "Page up",
        KeyAction::PageDown => "Page down",
        KeyAction::PrevSection => "Previous section",
        KeyAction::NextSection => "Next section",
        KeyAction::MessageContact => "Message",
        KeyAction::CallContact => "Call",
        KeyAction::EmailContact => "Email",
        KeyAction::Ignore => "",
    }
}

/// Render the help modal listing the active key bindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 26u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines: Vec<Line> = Vec::new();
    for (action, _) in ACTIONS.iter() {
        let keys = app.keymap.keys_for(*action);
        if keys.is_empty() || *action == KeyAction::Ignore {
            continue;
        }
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>16} │ ", help_label(*action))),
            Span::styled(keys.join(", "), italic),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw(format!("  {:>16} │ ", "Jump to section")),
        Span::styled("Shift+letter, #", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw(format!("  {:>16} │ ", "Save in editor")),
        Span::styled("Enter, Ctrl+s", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw(format!("  {:>16} │ ", "Close")),
        Span::styled("Esc, Enter", italic),
    ]));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(modal_block("Help", app));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the new/edit contact form.
pub fn render_editor_modal(f: &mut Frame, area: Rect, app: &AppState, editor: &EditorState) {
    let width = 60u16.min(area.width.saturating_sub(4)).max(40);
    let rect = centered_rect(width, EditorField::ALL.len() as u16 + 6, area);

    let mut lines: Vec<Line> = Vec::with_capacity(EditorField::ALL.len() + 2);
    for field in EditorField::ALL {
        let focused = field == editor.focus;
        let marker = if focused { "▶" } else { " " };
        let cursor = if focused { "_" } else { "" };
        let style = if focused {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let label = format!("{marker} {:<11}", field.label());
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(app.theme.title)),
            Span::styled(format!("{}{cursor}", editor.value(field)), style),
        ]));
    }
    lines.push(Line::raw(""));
    if editor.focus == EditorField::Photo {
        lines.push(Line::from(Span::styled(
            "Type a file path; clear the field to remove the photo",
            Style::default().fg(app.theme.muted),
        )));
    } else {
        lines.push(Line::raw(""));
    }
    let hint = if editor.can_save() {
        Span::raw("Enter: done  Tab: next field  Esc: cancel")
    } else {
        Span::styled(
            "Done disabled: fill a name, mobile or email  Esc: cancel",
            Style::default().fg(app.theme.muted),
        )
    };
    lines.push(Line::from(hint));

    let p = Paragraph::new(lines).block(modal_block(editor.title(), app));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the delete confirmation for the selected contact.
pub fn render_delete_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::DeleteConfirm { id, selected } = state {
        let rect = centered_rect(50, 7, area);
        let name = app
            .directory
            .get(id)
            .map(|c| c.row_label())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "this contact".to_string());
        let delete = if *selected == 0 { "[Delete]" } else { " Delete " };
        let cancel = if *selected == 1 { "[Cancel]" } else { " Cancel " };
        let body = format!(
            "Delete {name}?\nAre you sure? You cannot undo this action\n\n  {delete}    {cancel}"
        );
        let p = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(modal_block("Delete Contact", app));
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}
