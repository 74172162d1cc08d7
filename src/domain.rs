use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration as ChronoDuration, Local, NaiveDate};
use ratatui::style::Color;

use crate::constants::{LAB_COLORS, SESSIONS};

/// One of the four fixed session slots of a lab day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCode {
    S1,
    S2,
    S3,
    S4,
}

impl SessionCode {
    pub const ALL: [SessionCode; 4] = [
        SessionCode::S1,
        SessionCode::S2,
        SessionCode::S3,
        SessionCode::S4,
    ];

    /// Parses the sheet's session value. Anything outside `1..=4` is not a
    /// session this calendar knows, and the record carrying it never renders.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(SessionCode::S1),
            "2" => Some(SessionCode::S2),
            "3" => Some(SessionCode::S3),
            "4" => Some(SessionCode::S4),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            SessionCode::S1 => 0,
            SessionCode::S2 => 1,
            SessionCode::S3 => 2,
            SessionCode::S4 => 3,
        }
    }

    pub fn code(self) -> &'static str {
        SESSIONS[self.index()].code
    }

    pub fn time_range(self) -> &'static str {
        SESSIONS[self.index()].time_range
    }
}

/// Derived from the remarks column. `Cancelled` records are dropped from the
/// working set; `Moved` records render with a stamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Normal,
    Moved,
    Cancelled,
}

impl Status {
    /// Exact match on the trimmed lowercase remarks value, using the sheet's
    /// Indonesian tokens. Everything else (including empty) is `Normal`.
    pub fn classify(remarks: &str) -> Self {
        match remarks.trim().to_lowercase().as_str() {
            "batal" => Status::Cancelled,
            "pindah" => Status::Moved,
            _ => Status::Normal,
        }
    }
}

/// Lab category, keyed off the room name for coloring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabCategory {
    Prk,
    Jarkom,
    Ai,
    Multimedia,
    #[default]
    Default,
}

impl LabCategory {
    /// Case-insensitive substring match against the fixed keyword list.
    pub fn classify(room: &str) -> Self {
        let name = room.to_lowercase();
        if name.contains("prk") {
            LabCategory::Prk
        } else if name.contains("jarkom") {
            LabCategory::Jarkom
        } else if name.contains("ai") {
            LabCategory::Ai
        } else if name.contains("multimedia") {
            LabCategory::Multimedia
        } else {
            LabCategory::Default
        }
    }

    pub fn color(self) -> Color {
        match self {
            LabCategory::Prk => LAB_COLORS.prk,
            LabCategory::Jarkom => LAB_COLORS.jarkom,
            LabCategory::Ai => LAB_COLORS.ai,
            LabCategory::Multimedia => LAB_COLORS.multimedia,
            LabCategory::Default => LAB_COLORS.default,
        }
    }
}

/// A normalized row of the published sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub date: NaiveDate,
    pub session: SessionCode,
    pub room: String,
    pub instructor: String,
    pub activity: String,
    pub status: Status,
}

/// The displayed week: a Monday plus its Saturday, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekWindow {
    pub monday: NaiveDate,
}

impl WeekWindow {
    /// The week containing `date`, ISO-style: Monday starts the week, so a
    /// Sunday belongs to the week that began six days earlier.
    pub fn containing(date: NaiveDate) -> Self {
        let shift = date.weekday().num_days_from_monday() as i64;
        WeekWindow {
            monday: date - ChronoDuration::days(shift),
        }
    }

    pub fn saturday(&self) -> NaiveDate {
        self.monday + ChronoDuration::days(5)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday && date <= self.saturday()
    }

    /// The calendar day at `day_index` (0 = Monday .. 5 = Saturday).
    pub fn day(&self, day_index: usize) -> NaiveDate {
        self.monday + ChronoDuration::days(day_index as i64)
    }

    /// Whole weeks from the displayed Monday, never from "today".
    pub fn advance(&self, delta_weeks: i64) -> Self {
        WeekWindow {
            monday: self.monday + ChronoDuration::weeks(delta_weeks),
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.monday.format("%d %b %Y"),
            self.saturday().format("%d %b %Y")
        )
    }
}

/// The working dataset plus the window being displayed. Owned by the
/// controller and replaced wholesale on every fetch.
#[derive(Debug, Default)]
pub struct Schedule {
    pub records: Vec<ScheduleRecord>,
    pub window: Option<WeekWindow>,
    pub last_updated: Option<DateTime<Local>>,
}

impl Schedule {
    /// Swaps in a freshly fetched dataset. Cancelled records leave the
    /// working set here. A manual refresh keeps the week the user was
    /// looking at; an initial load jumps to the busiest week.
    pub fn replace(&mut self, records: Vec<ScheduleRecord>, preserve_week: bool) {
        self.records = records
            .into_iter()
            .filter(|r| r.status != Status::Cancelled)
            .collect();
        self.last_updated = Some(Local::now());

        if !(preserve_week && self.window.is_some()) {
            self.window = Some(self.select_initial_week());
        }
    }

    /// The Monday whose week holds the most records; ties go to the earliest
    /// such Monday. With no records, the week of today.
    pub fn select_initial_week(&self) -> WeekWindow {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in &self.records {
            let monday = WeekWindow::containing(record.date).monday;
            *counts.entry(monday).or_insert(0) += 1;
        }

        let mut best: Option<(NaiveDate, usize)> = None;
        for (monday, count) in counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((monday, count)),
            }
        }

        match best {
            Some((monday, _)) => WeekWindow { monday },
            None => WeekWindow::containing(Local::now().date_naive()),
        }
    }

    pub fn advance_week(&mut self, delta_weeks: i64) {
        let current = self
            .window
            .unwrap_or_else(|| WeekWindow::containing(Local::now().date_naive()));
        self.window = Some(current.advance(delta_weeks));
    }
}
