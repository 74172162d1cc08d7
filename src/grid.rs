use itertools::Itertools;

use crate::domain::{LabCategory, ScheduleRecord, SessionCode, Status, WeekWindow};

pub const ROOM_UNKNOWN: &str = "Ruang tidak diketahui";
pub const INCOMPLETE_DATA: &str = "Data tidak lengkap";
pub const MOVED_STAMP: &str = "PINDAH";

/// One display entry inside a grid cell. Several entries may share a cell;
/// the view stacks them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellEntry {
    pub room: String,
    pub instructor: String,
    pub activity: String,
    pub moved: bool,
    pub incomplete: bool,
    pub category: LabCategory,
}

impl CellEntry {
    fn from_record(record: &ScheduleRecord) -> Self {
        let room = if record.room.is_empty() {
            ROOM_UNKNOWN.to_string()
        } else {
            record.room.clone()
        };

        CellEntry {
            room,
            instructor: record.instructor.clone(),
            activity: record.activity.clone(),
            moved: record.status == Status::Moved,
            incomplete: record.instructor.is_empty() && record.activity.is_empty(),
            category: LabCategory::classify(&record.room),
        }
    }
}

/// One week's records projected onto the day x session grid, plus the
/// summary numbers shown around it.
#[derive(Debug)]
pub struct WeekGrid {
    pub window: WeekWindow,
    cells: [[Vec<CellEntry>; 6]; 4],
    pub record_count: usize,
    pub instructor_count: usize,
}

impl WeekGrid {
    /// A record lands in cell (day, session) iff its date equals that exact
    /// calendar day within the window and its code equals the session.
    ///
    /// Expects the working set with cancelled records already filtered out,
    /// as `Schedule::replace` produces it.
    pub fn build(window: WeekWindow, records: &[ScheduleRecord]) -> Self {
        debug_assert!(
            records.iter().all(|r| r.status != Status::Cancelled),
            "cancelled records must not reach the grid"
        );

        let mut cells: [[Vec<CellEntry>; 6]; 4] =
            std::array::from_fn(|_| std::array::from_fn(|_| Vec::new()));

        let week_records: Vec<&ScheduleRecord> = records
            .iter()
            .filter(|record| window.contains(record.date))
            .collect();

        for record in &week_records {
            let day_index = (record.date - window.monday).num_days() as usize;
            cells[record.session.index()][day_index].push(CellEntry::from_record(record));
        }

        let instructor_count = week_records
            .iter()
            .map(|record| record.instructor.as_str())
            .filter(|instructor| !instructor.is_empty())
            .unique()
            .count();

        WeekGrid {
            window,
            record_count: week_records.len(),
            instructor_count,
            cells,
        }
    }

    /// Entries for (session, day), day 0 = Monday .. 5 = Saturday.
    pub fn cell(&self, session: SessionCode, day_index: usize) -> &[CellEntry] {
        &self.cells[session.index()][day_index]
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(d: NaiveDate, session: SessionCode) -> ScheduleRecord {
        ScheduleRecord {
            date: d,
            session,
            room: "Lab PRK".to_string(),
            instructor: "Dr. A.".to_string(),
            activity: "Praktikum".to_string(),
            status: Status::Normal,
        }
    }

    #[test]
    fn test_cell_matches_exact_day_and_session() {
        let window = WeekWindow::containing(date(2024, 1, 1));
        let records = vec![
            record(date(2024, 1, 3), SessionCode::S3),
            record(date(2024, 1, 3), SessionCode::S2),
            record(date(2024, 1, 4), SessionCode::S3),
            record(date(2024, 1, 10), SessionCode::S3),
        ];

        let grid = WeekGrid::build(window, &records);

        // Wednesday is day index 2.
        assert_eq!(grid.cell(SessionCode::S3, 2).len(), 1);
        assert_eq!(grid.cell(SessionCode::S2, 2).len(), 1);
        assert_eq!(grid.cell(SessionCode::S3, 3).len(), 1);
        assert_eq!(grid.record_count, 3);
    }

    #[test]
    fn test_stacked_entries_in_one_cell() {
        let window = WeekWindow::containing(date(2024, 1, 1));
        let records = vec![
            record(date(2024, 1, 1), SessionCode::S1),
            record(date(2024, 1, 1), SessionCode::S1),
        ];

        let grid = WeekGrid::build(window, &records);
        assert_eq!(grid.cell(SessionCode::S1, 0).len(), 2);
    }

    #[test]
    fn test_moved_record_gets_stamp_flag() {
        let window = WeekWindow::containing(date(2024, 1, 1));
        let mut moved = record(date(2024, 1, 2), SessionCode::S1);
        moved.status = Status::Moved;
        let plain = record(date(2024, 1, 2), SessionCode::S2);

        let grid = WeekGrid::build(window, &[moved, plain]);
        assert!(grid.cell(SessionCode::S1, 1)[0].moved);
        assert!(!grid.cell(SessionCode::S2, 1)[0].moved);
    }

    #[test]
    fn test_empty_room_gets_placeholder() {
        let window = WeekWindow::containing(date(2024, 1, 1));
        let mut no_room = record(date(2024, 1, 1), SessionCode::S1);
        no_room.room = String::new();

        let grid = WeekGrid::build(window, &[no_room]);
        assert_eq!(grid.cell(SessionCode::S1, 0)[0].room, ROOM_UNKNOWN);
    }

    #[test]
    fn test_incomplete_entry_flagged() {
        let window = WeekWindow::containing(date(2024, 1, 1));
        let mut bare = record(date(2024, 1, 1), SessionCode::S1);
        bare.instructor = String::new();
        bare.activity = String::new();

        let grid = WeekGrid::build(window, &[bare]);
        assert!(grid.cell(SessionCode::S1, 0)[0].incomplete);
    }

    #[test]
    fn test_empty_dataset_renders_empty_grid() {
        let window = WeekWindow::containing(date(2024, 1, 1));
        let grid = WeekGrid::build(window, &[]);

        assert!(grid.is_empty());
        assert_eq!(grid.record_count, 0);
        assert_eq!(grid.instructor_count, 0);
        for session in SessionCode::ALL {
            for day in 0..6 {
                assert!(grid.cell(session, day).is_empty());
            }
        }
    }

    #[test]
    #[should_panic(expected = "cancelled records must not reach the grid")]
    fn test_cancelled_record_rejected() {
        let window = WeekWindow::containing(date(2024, 1, 1));
        let mut cancelled = record(date(2024, 1, 2), SessionCode::S1);
        cancelled.status = Status::Cancelled;

        WeekGrid::build(window, &[cancelled]);
    }

    #[test]
    fn test_instructors_counted_once() {
        let window = WeekWindow::containing(date(2024, 1, 1));
        let mut other = record(date(2024, 1, 2), SessionCode::S2);
        other.instructor = "Dr. B.".to_string();
        let records = vec![
            record(date(2024, 1, 1), SessionCode::S1),
            record(date(2024, 1, 2), SessionCode::S1),
            other,
        ];

        let grid = WeekGrid::build(window, &records);
        assert_eq!(grid.instructor_count, 2);
    }
}
