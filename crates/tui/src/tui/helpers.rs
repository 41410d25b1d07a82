use std::cmp::min;

use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::model::Task;

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub fn status_label(task: &Task) -> &'static str {
    if task.done {
        "done"
    } else {
        "open"
    }
}

pub fn format_task_detail_entries(task: &Task) -> Vec<(&'static str, String)> {
    let mut entries = vec![
        ("ID", task.id.to_string()),
        ("Description", task.description.clone()),
        ("Status", status_label(task).to_string()),
    ];
    let created = format_opt_datetime(task.created_at.as_ref());
    if !created.is_empty() {
        entries.push(("Created", created));
    }
    let updated = format_opt_datetime(task.updated_at.as_ref());
    if !updated.is_empty() {
        entries.push(("Updated", updated));
    }
    entries
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / k or ↓ / ↑", "Move selection"),
        ("g / G, Home / End", "Jump to first or last task"),
        ("Space / Enter", "Toggle done"),
        ("a / i / Tab", "Focus the input to add a task"),
        ("Enter (input)", "Add the typed task, or save an edit"),
        ("Esc (input)", "Cancel edit and return to the list"),
        ("e", "Edit selected task"),
        ("d / x / Delete", "Delete task (with confirmation)"),
        ("c / y", "Copy task text to the clipboard"),
        ("r", "Reload from storage"),
        ("?", "Toggle this help overlay"),
        ("q / Ctrl+C", "Quit"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}

/// Bordered panel on the panel background with an accented title.
pub fn panel(title: &str, border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(accent_title(title))
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(BG_PANEL))
}

pub fn focus_color(focused: bool) -> Color {
    if focused {
        FG_ACCENT
    } else {
        Color::DarkGray
    }
}

pub fn format_opt_datetime(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| {
            let local: DateTime<Local> = (*dt).into();
            local.format("%Y-%m-%d %H:%M").to_string()
        })
        .unwrap_or_default()
}
