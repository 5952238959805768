//! Contact list (sectioned, with an index strip) and the details pane.
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::AppState;
use crate::directory::{Contact, Sections};
use crate::launcher::Communication;

/// Render the sectioned list. Also records how many rows fit, for paging.
pub fn render_contact_list(f: &mut Frame, area: Rect, app: &mut AppState, view: &Sections) {
    let title = if app.is_searching { "Results" } else { "All contacts" };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.is_empty() {
        let p = Paragraph::new(app.empty_message())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(app.theme.muted));
        f.render_widget(p, inner);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(2)].as_ref())
        .split(inner);

    let height = cols[0].height as usize;
    if height > 0 {
        app.rows_per_page = height;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(view.total_rows() + view.section_count());
    let mut selected_line = 0usize;
    let mut flat = 0usize;
    for (key, rows) in view.iter() {
        lines.push(Line::from(Span::styled(
            key.to_string(),
            Style::default()
                .fg(app.theme.section)
                .add_modifier(Modifier::BOLD),
        )));
        for contact in rows {
            let label = row_text(contact);
            if flat == app.selected {
                selected_line = lines.len();
                lines.push(Line::from(Span::styled(
                    format!("▶ {label}"),
                    Style::default()
                        .fg(app.theme.highlight_fg)
                        .bg(app.theme.highlight_bg)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    format!("  {label}"),
                    Style::default().fg(app.theme.text),
                )));
            }
            flat += 1;
        }
    }

    let offset = if height > 0 && selected_line >= height {
        selected_line + 1 - height
    } else {
        0
    };
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
    f.render_widget(Paragraph::new(visible), cols[0]);

    let strip: Vec<Line> = view
        .section_titles()
        .into_iter()
        .map(|t| Line::from(Span::styled(t, Style::default().fg(app.theme.muted))))
        .collect();
    f.render_widget(Paragraph::new(strip).alignment(Alignment::Right), cols[1]);
}

fn row_text(contact: &Contact) -> String {
    let label = contact.row_label();
    let label = if label.is_empty() { "(no name)".to_string() } else { label };
    if contact.is_own_contact {
        format!("{label} (me)")
    } else {
        label
    }
}

pub fn render_contact_details(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Details")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let Some(contact) = app.selected_contact() else {
        f.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(app.theme.title);
    let text = Style::default().fg(app.theme.text);
    let field = |name: &'static str, value: Option<&str>| {
        Line::from(vec![
            Span::styled(format!("{name:<8}"), label),
            Span::styled(value.unwrap_or("").to_string(), text),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            row_text(&contact),
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        field("Mobile", contact.mobile.as_deref()),
        field("Email", contact.email.as_deref()),
        field("Notes", contact.notes.as_deref()),
    ];
    let photo = match &contact.photo {
        Some(p) if !p.is_empty() => format!("{} bytes", p.len()),
        _ => "none".to_string(),
    };
    lines.push(field("Photo", Some(&photo)));
    lines.push(Line::raw(""));

    let mut actions = Vec::new();
    for action in Communication::ALL {
        let style = if action.is_available(&contact) {
            Style::default().fg(app.theme.highlight_fg)
        } else {
            Style::default().fg(app.theme.muted)
        };
        let keys = app
            .keymap
            .keys_for(match action {
                Communication::Message => crate::app::KeyAction::MessageContact,
                Communication::Call => crate::app::KeyAction::CallContact,
                Communication::Email => crate::app::KeyAction::EmailContact,
            })
            .join("/");
        actions.push(Span::styled(format!("[{keys}] {}", action.label()), style));
        actions.push(Span::raw("  "));
    }
    lines.push(Line::from(actions));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(p, area);
}
