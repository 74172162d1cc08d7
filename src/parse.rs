use std::collections::HashMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{ScheduleRecord, SessionCode, Status};

/// Column names of the published sheet. The parser is header-name-driven,
/// so column order in the sheet does not matter.
pub mod columns {
    pub const DATE: &str = "Tanggal";
    pub const SESSION: &str = "Sesi";
    pub const ROOM: &str = "Ruang";
    pub const INSTRUCTOR: &str = "Pengajar";
    pub const ACTIVITY: &str = "Kegiatan";
    pub const REMARKS: &str = "Keterangan";
}

/// Header-keyed raw values for one well-formed CSV line.
pub type RawRow = HashMap<String, String>;

/// The sheet writes sessions either as bare numbers or as "Sesi N" labels.
static SESSION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)sesi\s*(\d+)").expect("session label pattern should be valid"));

/// Parses the raw CSV export into header-keyed rows, in source order.
///
/// Tolerated-malformed-row policy: a data line whose field count does not
/// match the header count is dropped with a warning, never an error. Blank
/// lines are skipped. Quoted fields, doubled-quote escapes and commas inside
/// quotes follow standard CSV rules; fields are trimmed after extraction.
pub fn parse(text: &str) -> Vec<RawRow> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            eprintln!("Warning: Could not read CSV header line: {}", e);
            return Vec::new();
        }
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Warning: Skipping unreadable CSV line: {}", e);
                continue;
            }
        };

        if record.len() != headers.len() {
            eprintln!(
                "Warning: Skipping CSV line with {} fields, expected {}",
                record.len(),
                headers.len()
            );
            continue;
        }

        let mut row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();

        if let Some(session) = row.get_mut(columns::SESSION) {
            let extracted = SESSION_LABEL
                .captures(session)
                .map(|captures| captures[1].to_string());
            if let Some(number) = extracted {
                *session = number;
            }
        }

        rows.push(row);
    }

    rows
}

/// Normalizes one raw row into a `ScheduleRecord`, or excludes it.
///
/// Exclusion reasons: a date that does not split into three non-empty
/// day/month/year parts (warned, not fatal) and a session code outside the
/// four known slots. A row missing both instructor and activity is kept;
/// the renderer shows a placeholder for it.
pub fn normalize(row: &RawRow) -> Option<ScheduleRecord> {
    let raw_date = field(row, columns::DATE);
    let Some(date) = parse_sheet_date(raw_date) else {
        if !raw_date.is_empty() {
            eprintln!("Warning: Skipping row with unparseable date '{}'", raw_date);
        }
        return None;
    };

    let session = SessionCode::from_code(field(row, columns::SESSION))?;

    let room = clean_text(field(row, columns::ROOM));
    let instructor = rejoin_comma_list(&clean_text(field(row, columns::INSTRUCTOR)));
    let activity = rejoin_comma_list(&clean_text(field(row, columns::ACTIVITY)));
    let status = Status::classify(field(row, columns::REMARKS));

    Some(ScheduleRecord {
        date,
        session,
        room,
        instructor,
        activity,
        status,
    })
}

/// The whole ingestion pipeline for one fetched document.
pub fn records_from_csv(text: &str) -> Vec<ScheduleRecord> {
    parse(text).iter().filter_map(normalize).collect()
}

fn field<'a>(row: &'a RawRow, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

/// `DD/MM/YYYY`, exactly three non-empty parts.
fn parse_sheet_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('/');
    let day = parts.next()?.trim();
    let month = parts.next()?.trim();
    let year = parts.next()?.trim();
    if parts.next().is_some() || day.is_empty() || month.is_empty() || year.is_empty() {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Strips zero-width/BOM characters and collapses whitespace runs.
fn clean_text(value: &str) -> String {
    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comma-separated multi-value fields (instructor names with academic
/// titles, activity lists) are split, trimmed and rejoined with `", "`.
/// Idempotent; values without commas pass through unchanged.
fn rejoin_comma_list(value: &str) -> String {
    if !value.contains(',') {
        return value.to_string();
    }

    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_quoted_fields_round_trip() {
        let rows = parse("x,y,z\na,\"b,c\",\"d\"\"e\"\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["x"], "a");
        assert_eq!(rows[0]["y"], "b,c");
        assert_eq!(rows[0]["z"], "d\"e");
    }

    #[test]
    fn test_malformed_line_dropped_without_panic() {
        let rows = parse("x,y,z\na,b\na,b,c\na,b,c,d\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["z"], "c");
    }

    #[test]
    fn test_blank_lines_skipped_and_order_kept() {
        let rows = parse("x,y\n1,first\n\n2,second\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["y"], "first");
        assert_eq!(rows[1]["y"], "second");
    }

    #[test]
    fn test_fields_trimmed_after_extraction() {
        let rows = parse("x,y\n  a  ,\" b \"\n");
        assert_eq!(rows[0]["x"], "a");
        assert_eq!(rows[0]["y"], "b");
    }

    #[test]
    fn test_session_label_reduced_to_number() {
        let rows = parse("Tanggal,Sesi\n01/01/2024,Sesi 2\n02/01/2024,sesi3\n03/01/2024,4\n");
        assert_eq!(rows[0][columns::SESSION], "2");
        assert_eq!(rows[1][columns::SESSION], "3");
        assert_eq!(rows[2][columns::SESSION], "4");
    }

    #[test]
    fn test_normalize_full_row() {
        let record = normalize(&row(&[
            (columns::DATE, "03/01/2024"),
            (columns::SESSION, "3"),
            (columns::ROOM, "Lab Jarkom"),
            (columns::INSTRUCTOR, "Dr. A.,Dr. B."),
            (columns::ACTIVITY, "Praktikum,Responsi"),
            (columns::REMARKS, "pindah"),
        ]))
        .unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(record.session, SessionCode::S3);
        assert_eq!(record.instructor, "Dr. A., Dr. B.");
        assert_eq!(record.activity, "Praktikum, Responsi");
        assert_eq!(record.status, Status::Moved);
    }

    #[test]
    fn test_bad_date_excluded() {
        for bad in ["", "03-01-2024", "03/01", "03/01/2024/extra", "aa/bb/cccc"] {
            let excluded = normalize(&row(&[(columns::DATE, bad), (columns::SESSION, "1")]));
            assert!(excluded.is_none(), "date '{}' should be excluded", bad);
        }
    }

    #[test]
    fn test_unknown_session_excluded() {
        let excluded = normalize(&row(&[
            (columns::DATE, "03/01/2024"),
            (columns::SESSION, "7"),
        ]));
        assert!(excluded.is_none());
    }

    #[test]
    fn test_instructor_rejoin_idempotent() {
        let once = rejoin_comma_list(&clean_text("Dr. A., Dr. B."));
        assert_eq!(once, "Dr. A., Dr. B.");
        assert_eq!(rejoin_comma_list(&once), once);
    }

    #[test]
    fn test_invisible_characters_stripped() {
        let cleaned = clean_text("\u{FEFF}Dr.\u{200B} A.   B.");
        assert_eq!(cleaned, "Dr. A. B.");
    }

    #[test]
    fn test_empty_instructor_and_activity_retained() {
        let record = normalize(&row(&[
            (columns::DATE, "03/01/2024"),
            (columns::SESSION, "1"),
            (columns::ROOM, "Lab AI"),
        ]))
        .unwrap();

        assert!(record.instructor.is_empty());
        assert!(record.activity.is_empty());
    }

    #[test]
    fn test_parse_then_normalize_only_valid_records() {
        let csv = "Tanggal,Sesi,Ruang,Pengajar,Kegiatan,Keterangan\n\
                   01/01/2024,Sesi 1,Lab PRK,Dr. A.,Praktikum,\n\
                   bad-date,2,Lab PRK,Dr. A.,Praktikum,\n\
                   02/01/2024,9,Lab PRK,Dr. A.,Praktikum,\n\
                   03/01/2024,3,Lab AI,Dr. B.,Responsi,batal\n";

        let records: Vec<_> = parse(csv).iter().filter_map(normalize).collect();
        assert_eq!(records.len(), 2);
        assert!(
            records
                .iter()
                .all(|r| SessionCode::from_code(r.session.code()).is_some())
        );
    }
}
