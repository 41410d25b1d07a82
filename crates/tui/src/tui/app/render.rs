use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::tui::constants::APP_VERSION;
use crate::tui::helpers::{
    build_help_lines, centered_rect, focus_color, format_task_detail_entries, inset_rect, panel,
    BG_ACCENT, BG_BASE, BG_PANEL, FG_ACCENT,
};

use super::{App, ConfirmChoice, Focus};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_body(f, chunks[1]);
        self.draw_input(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        if self.has_prompt() {
            self.draw_confirm_overlay(f, size);
        } else if self.show_help {
            self.draw_help_overlay(f, size);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let done = self.tasks.iter().filter(|task| task.done).count();
        let line = Line::from(vec![
            Span::styled(
                format!(" tasklet v{} ✅ ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} tasks, {} done", self.tasks.len(), done)),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.store_label),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_body(&mut self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        self.draw_tasks(f, cols[0]);
        self.draw_details(f, cols[1]);
    }

    fn draw_tasks(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = panel("📋 Tasks", focus_color(self.focus() == Focus::List));

        if self.tasks.is_empty() {
            let inner = block.inner(area);
            f.render_widget(block, area);
            let lines = vec![
                Line::from("All clear ✨"),
                Line::default(),
                Line::from(Span::styled(
                    "Press 'a' to add a task, '?' for help.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let content = centered_rect(inner.width, lines.len() as u16, inner);
            f.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(BG_PANEL)),
                content,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .tasks
            .iter()
            .map(|task| {
                let style = if task.done {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", task.status_marker()),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(format!("{}: ", task.id), Style::default().fg(Color::DarkGray)),
                    Span::styled(task.description.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_details(&self, f: &mut Frame<'_>, area: Rect) {
        let block = panel("🗒 Details", Color::DarkGray);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(task) = self.selected_task() else {
            return;
        };
        let rows: Vec<Row> = format_task_detail_entries(task)
            .into_iter()
            .map(|(key, value)| {
                Row::new(vec![
                    Cell::from(key)
                        .style(Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD)),
                    Cell::from(value),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(10)])
            .block(Block::default().style(Style::default().bg(BG_PANEL)))
            .column_spacing(1);
        f.render_widget(table, inset_rect(inner, 1));
    }

    fn draw_input(&self, f: &mut Frame<'_>, area: Rect) {
        let title = match self.editing() {
            Some(id) => format!("✏️ Edit Task #{id}"),
            None => String::from("➕ New Task"),
        };
        let focused = self.focus() == Focus::Input;
        let block = panel(&title, focus_color(focused));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(self.input.as_str()).style(Style::default().bg(BG_PANEL)),
            inner,
        );

        if focused && self.confirm.is_none() && !self.show_help && inner.width > 0 {
            let column = min(self.input.cursor_column() as u16, inner.width - 1);
            f.set_cursor(inner.x + column, inner.y);
        }
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = if self.confirm.is_some() {
            "y/n answer • ←/→ choose • Enter confirm • Esc cancel"
        } else if self.show_help {
            "Enter/Esc to close ❔"
        } else {
            match self.focus {
                Focus::List => {
                    "j/k move | space toggle ✅ | a add ✚ | e edit ✏️ | x delete 🗑️ | c copy 📋 | r reload 🔄 | ? help ❔ | q quit"
                }
                Focus::Input if self.editing.is_some() => "Enter to save ✏️ • Esc to cancel",
                Focus::Input => "Enter to add ✍️ • Tab/Esc back to list",
            }
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 70);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = panel("⌨️ Keyboard Reference", Color::DarkGray);
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(format!("{combo:<20}"), Style::default().fg(Color::Cyan)),
                    Span::raw(desc),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(prompt) = self.confirm.as_ref() else {
            return;
        };
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = panel("🗑 Confirm Deletion", Color::Red);
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let button = |choice: ConfirmChoice, color: Color| {
            if prompt.choice == choice {
                Style::default()
                    .fg(Color::Black)
                    .bg(color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            }
        };

        let lines = vec![
            Line::from(Span::styled(
                prompt.pending.message().to_string(),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "This action cannot be undone.",
                Style::default().fg(Color::Red),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("  Yes  ", button(ConfirmChoice::Yes, Color::Red)),
                Span::raw("    "),
                Span::styled("  No  ", button(ConfirmChoice::No, Color::Gray)),
            ]),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}
