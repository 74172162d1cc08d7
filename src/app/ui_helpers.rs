use ratatui::prelude::{Line, Span};
use ratatui::style::{Color, Modifier, Style};

use crate::{
    domain::Schedule,
    grid::{CellEntry, INCOMPLETE_DATA, MOVED_STAMP},
};

pub(super) fn last_updated_label(schedule: &Schedule) -> String {
    match schedule.last_updated {
        Some(stamp) => format!(
            "Diperbarui {} | Jumlah Data: {}",
            stamp.format("%d %b %Y %H:%M:%S"),
            schedule.records.len()
        ),
        None => String::new(),
    }
}

/// The stacked display lines for one cell entry: room (colored by lab
/// category), instructor/activity or the incomplete-data placeholder, and
/// the moved stamp when the record was relocated.
pub(super) fn entry_lines(entry: &CellEntry) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        entry.room.clone(),
        Style::default()
            .fg(entry.category.color())
            .add_modifier(Modifier::BOLD),
    ))];

    if entry.incomplete {
        lines.push(Line::from(Span::styled(
            INCOMPLETE_DATA.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        if !entry.instructor.is_empty() {
            lines.push(Line::from(entry.instructor.clone()));
        }
        if !entry.activity.is_empty() {
            lines.push(Line::from(Span::styled(
                entry.activity.clone(),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    if entry.moved {
        lines.push(Line::from(Span::styled(
            MOVED_STAMP.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    lines
}
