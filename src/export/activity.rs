use chrono::NaiveDateTime;

use super::filename::activity_filename;
use super::table::{Table, to_xlsx};
use super::{ExportError, ExportFile, ExportFormat};
use crate::models::activity::ActivityEntry;

pub const ACTIVITY_SHEET: &str = "Activity Log";
pub const ACTIVITY_HEADERS: [&str; 11] = [
    "ID",
    "Username",
    "Date/Time",
    "Base Name",
    "Base IP",
    "Comment",
    "Start Number",
    "End Number",
    "Password Length",
    "Character Types",
    "Users Generated",
];

#[must_use]
pub fn activity_table(entries: &[ActivityEntry]) -> Table {
    let mut table = Table::new(ACTIVITY_SHEET, &ACTIVITY_HEADERS);
    for entry in entries {
        table.push_row(vec![
            entry.id.into(),
            entry.username.as_str().into(),
            entry.timestamp.as_str().into(),
            entry.base_name.as_str().into(),
            entry.base_ip.as_str().into(),
            entry.comment.as_str().into(),
            entry.start_number.into(),
            entry.end_number.into(),
            entry.password_length.into(),
            entry.character_types.as_str().into(),
            entry.users_generated.into(),
        ]);
    }
    table
}

pub fn export_activity(
    entries: &[ActivityEntry],
    format: ExportFormat,
    exported_at: NaiveDateTime,
) -> Result<ExportFile, ExportError> {
    let table = activity_table(entries);
    let bytes = match format {
        ExportFormat::Csv => table.to_csv()?,
        ExportFormat::Xlsx => to_xlsx(&[&table])?,
    };

    Ok(ExportFile {
        filename: activity_filename(format, exported_at),
        content_type: format.content_type(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(id: i32, username: &str) -> ActivityEntry {
        ActivityEntry {
            id,
            user_id: 1,
            username: username.to_string(),
            timestamp: "2026-01-02 03:04:05".to_string(),
            base_name: "guest".to_string(),
            base_ip: "10.0.0".to_string(),
            comment: "Lobby, east".to_string(),
            start_number: 1,
            end_number: 10,
            password_length: 8,
            character_types: "uppercase,numbers".to_string(),
            users_generated: 10,
        }
    }

    #[test]
    fn test_activity_csv() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let file = export_activity(&[entry(2, "bob"), entry(1, "admin")], ExportFormat::Csv, at)
            .unwrap();

        assert_eq!(file.filename, "activity_log_20260102_030405.csv");

        let text = String::from_utf8(file.bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ID,Username,Date/Time,Base Name,Base IP,Comment,Start Number,End Number,Password Length,Character Types,Users Generated"
        );
        assert_eq!(
            lines[1],
            "2,bob,2026-01-02 03:04:05,guest,10.0.0,\"Lobby, east\",1,10,8,\"uppercase,numbers\",10"
        );
    }

    #[test]
    fn test_empty_activity_has_header_only() {
        let table = activity_table(&[]);
        assert!(table.rows.is_empty());
        let csv = String::from_utf8(table.to_csv().unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
