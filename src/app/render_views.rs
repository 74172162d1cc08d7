use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    constants::DAYS,
    domain::SessionCode,
    grid::WeekGrid,
};

use super::{App, ui_helpers};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();

        let week_label = self
            .schedule
            .window
            .map(|window| window.label())
            .unwrap_or_default();
        let updated_label = ui_helpers::last_updated_label(&self.schedule);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    "Jadwal Lab",
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title(Line::from(week_label).alignment(Alignment::Center))
            .title(Line::from(updated_label).alignment(Alignment::Right));
        let inner = block.inner(size);
        f.render_widget(block, size);

        if self.loading() {
            let loading = Paragraph::new("Memuat data...").alignment(Alignment::Center);
            f.render_widget(loading, inner);
            return;
        }

        let Some(window) = self.schedule.window else {
            let message = self.error.as_deref().unwrap_or("Tekan r untuk memuat data");
            let paragraph = Paragraph::new(message.to_string()).alignment(Alignment::Center);
            f.render_widget(paragraph, inner);
            return;
        };

        let grid = WeekGrid::build(window, &self.schedule.records);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Min(3),
                Constraint::Min(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        self.draw_day_headers(f, rows[0], &grid);
        for (row_index, session) in SessionCode::ALL.into_iter().enumerate() {
            self.draw_session_row(f, rows[row_index + 1], &grid, session);
        }
        self.draw_footer(f, rows[5], &grid);
    }

    fn draw_day_headers(&self, f: &mut Frame, area: Rect, grid: &WeekGrid) {
        let columns = grid_columns(area);

        for (day_index, day) in DAYS.iter().enumerate() {
            let title = format!("{} {}", day, grid.window.day(day_index).format("%d/%m"));
            let header = Paragraph::new(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            f.render_widget(header, columns[day_index + 1]);
        }
    }

    fn draw_session_row(&self, f: &mut Frame, area: Rect, grid: &WeekGrid, session: SessionCode) {
        let columns = grid_columns(area);

        let label = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Sesi {}", session.code()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                session.time_range(),
                Style::default().fg(Color::Gray),
            )),
        ]);
        f.render_widget(label, columns[0]);

        for day_index in 0..DAYS.len() {
            let mut lines: Vec<Line<'static>> = Vec::new();
            for entry in grid.cell(session, day_index) {
                lines.extend(ui_helpers::entry_lines(entry));
            }

            let cell = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
            f.render_widget(cell, columns[day_index + 1]);
        }
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect, grid: &WeekGrid) {
        let footer = if let Some(error) = &self.error {
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::raw(format!(
                    "{} jadwal | {} pengajar",
                    grid.record_count, grid.instructor_count
                )),
                Span::styled(
                    "   \u{2190}/\u{2192} minggu  r refresh  a tambah data  q keluar",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        };

        f.render_widget(Paragraph::new(footer), area);
    }
}

/// Label column plus the six day columns.
fn grid_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 7),
            Constraint::Ratio(1, 7),
            Constraint::Ratio(1, 7),
            Constraint::Ratio(1, 7),
            Constraint::Ratio(1, 7),
            Constraint::Ratio(1, 7),
            Constraint::Ratio(1, 7),
        ])
        .split(area)
}
