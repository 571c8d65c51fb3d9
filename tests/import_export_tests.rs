use chrono::NaiveDate;
use leave_planner::export::{EventStatus, calendar_events};
use leave_planner::import::{
    CellValue, from_serial, parse_date_cell, parse_date_str, parse_holiday_rows,
};
use leave_planner::{
    Holiday, PlannerConfig, PlannerError, analyze, generate_ics, load_holidays,
    recommendations_to_csv_string, save_recommendations_to_csv, save_recommendations_to_json,
};
use std::collections::HashMap;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn temp_with_suffix(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

#[test]
fn serial_dates_convert_to_calendar_days() {
    assert_eq!(from_serial(25569.0), Some(d(1970, 1, 1)));
    assert_eq!(from_serial(45658.0), Some(d(2025, 1, 1)));
    // fractional serials round to the nearest day
    assert_eq!(from_serial(45658.6), Some(d(2025, 1, 2)));
    assert_eq!(from_serial(0.0), None);
    assert_eq!(from_serial(f64::NAN), None);
}

#[test]
fn date_strings_in_common_layouts_parse() {
    assert_eq!(parse_date_str("2025-07-04"), Some(d(2025, 7, 4)));
    assert_eq!(parse_date_str("2025/07/04"), Some(d(2025, 7, 4)));
    assert_eq!(parse_date_str("7/4/2025"), Some(d(2025, 7, 4)));
    assert_eq!(parse_date_str("4 July 2025"), Some(d(2025, 7, 4)));
    assert_eq!(parse_date_str("July 4, 2025"), Some(d(2025, 7, 4)));
    assert_eq!(parse_date_str("45842"), Some(d(2025, 7, 4)));
    assert_eq!(parse_date_str("not a date"), None);
    assert_eq!(parse_date_str(""), None);
}

#[test]
fn csv_import_drops_invalid_rows() {
    let file = temp_with_suffix(
        ".csv",
        "Date,Holiday\n2025-01-01,New Year's Day\nsometime,Mystery Day\n45842,Independence Day\n2025-12-25,\n,\n",
    );
    let holidays = load_holidays(file.path()).expect("load csv");
    assert_eq!(
        holidays,
        vec![
            Holiday::new(d(2025, 1, 1), "New Year's Day"),
            Holiday::new(d(2025, 7, 4), "Independence Day"),
        ]
    );
}

#[test]
fn csv_import_accepts_lowercase_holiday_column() {
    let file = temp_with_suffix(".csv", "Date,holiday\n2025-05-01,Labour Day\n");
    let holidays = load_holidays(file.path()).expect("load csv");
    assert_eq!(holidays, vec![Holiday::new(d(2025, 5, 1), "Labour Day")]);
}

#[test]
fn csv_without_valid_rows_is_an_error() {
    let file = temp_with_suffix(".csv", "Date,Holiday\nsoon,Someday\n");
    let err = load_holidays(file.path()).unwrap_err();
    assert!(matches!(err, PlannerError::NoHolidays));
    assert_eq!(err.to_string(), "No valid holiday data found in file");
}

#[test]
fn json_import_reads_holiday_list() {
    let file = temp_with_suffix(
        ".json",
        r#"[{"date":"2025-01-14","name":"Founders Day"},{"date":"2025-02-03","name":"  "}]"#,
    );
    let holidays = load_holidays(file.path()).expect("load json");
    assert_eq!(holidays, vec![Holiday::new(d(2025, 1, 14), "Founders Day")]);
}

#[test]
fn unknown_extension_is_rejected() {
    let file = temp_with_suffix(".txt", "Date,Holiday\n");
    let err = load_holidays(file.path()).unwrap_err();
    assert!(matches!(err, PlannerError::UnsupportedFormat(ext) if ext == "txt"));
}

#[test]
fn row_maps_with_serial_cells_parse() {
    let mut row = HashMap::new();
    row.insert("Date".to_string(), CellValue::Serial(45658.0));
    row.insert("Holiday".to_string(), CellValue::Text("New Year".into()));
    let holidays = parse_holiday_rows(vec![row]).expect("rows");
    assert_eq!(holidays, vec![Holiday::new(d(2025, 1, 1), "New Year")]);
}

#[test]
fn serials_past_the_spreadsheet_range_are_rejected() {
    assert_eq!(from_serial(2_958_465.0), Some(d(9999, 12, 31)));
    assert_eq!(from_serial(2_958_466.0), None);
    assert_eq!(from_serial(1e15), None);
    assert_eq!(from_serial(f64::INFINITY), None);
    assert_eq!(parse_date_str("1e15"), None);
    assert_eq!(parse_date_cell(&CellValue::Serial(1e15)), None);
}

#[test]
fn csv_import_drops_row_with_huge_serial() {
    let file = temp_with_suffix(".csv", "Date,Holiday
1e15,Bogus
2025-01-01,New Year
");
    let holidays = load_holidays(file.path()).expect("load csv");
    assert_eq!(holidays, vec![Holiday::new(d(2025, 1, 1), "New Year")]);
}

#[test]
fn json_import_drops_rows_with_impossible_dates() {
    let file = temp_with_suffix(
        ".json",
        r#"[{"date":"2025-01-01","name":"A"},{"date":"2025-02-30","name":"B"}]"#,
    );
    let holidays = load_holidays(file.path()).expect("load json");
    assert_eq!(holidays, vec![Holiday::new(d(2025, 1, 1), "A")]);
}

#[test]
fn json_import_accepts_serials_and_skips_incomplete_objects() {
    let file = temp_with_suffix(
        ".json",
        r#"[{"Date":45842,"Holiday":"Independence Day"},{"date":null,"name":"C"},{"name":"D"},{"date":1e15,"name":"E"}]"#,
    );
    let holidays = load_holidays(file.path()).expect("load json");
    assert_eq!(holidays, vec![Holiday::new(d(2025, 7, 4), "Independence Day")]);
}

#[test]
fn json_that_is_not_a_list_of_objects_is_an_error() {
    let file = temp_with_suffix(".json", r#"{"date":"2025-01-01","name":"A"}"#);
    let err = load_holidays(file.path()).unwrap_err();
    assert!(matches!(err, PlannerError::Json(_)));
}

#[cfg(feature = "xlsx")]
mod spreadsheet {
    use super::*;
    use calamine::{Data, ExcelDateTime, ExcelDateTimeType};
    use leave_planner::import::cell_from_data;

    fn row(date: Data, name: &str) -> HashMap<String, CellValue> {
        let mut row = HashMap::new();
        row.insert("Date".to_string(), cell_from_data(&date));
        row.insert(
            "Holiday".to_string(),
            cell_from_data(&Data::String(name.to_string())),
        );
        row
    }

    #[test]
    fn numeric_and_date_cells_keep_their_serial() {
        assert_eq!(cell_from_data(&Data::Float(45658.0)), CellValue::Serial(45658.0));
        assert_eq!(cell_from_data(&Data::Int(45658)), CellValue::Serial(45658.0));
        let stamp = ExcelDateTime::new(45842.25, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            cell_from_data(&Data::DateTime(stamp)),
            CellValue::Serial(45842.25)
        );
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Text(String::new()));
        assert_eq!(
            cell_from_data(&Data::String(" 2025-05-01 ".into())),
            CellValue::Text("2025-05-01".into())
        );
    }

    #[test]
    fn spreadsheet_rows_become_holidays() {
        let stamp = ExcelDateTime::new(45842.0, ExcelDateTimeType::DateTime, false);
        let rows = vec![
            row(Data::Float(45658.0), "New Year"),
            row(Data::DateTime(stamp), "Independence Day"),
            row(Data::Int(45772), "Labour Day"),
            row(Data::Float(1e15), "Bogus"),
            row(Data::Empty, "Undated"),
        ];
        let holidays = parse_holiday_rows(rows).expect("rows");
        assert_eq!(
            holidays,
            vec![
                Holiday::new(d(2025, 1, 1), "New Year"),
                Holiday::new(d(2025, 7, 4), "Independence Day"),
                Holiday::new(d(2025, 4, 25), "Labour Day"),
            ]
        );
    }

    #[test]
    fn unreadable_workbook_is_a_spreadsheet_error() {
        let file = temp_with_suffix(".xlsx", "Date,Holiday\n2025-01-01,New Year\n");
        let err = load_holidays(file.path()).unwrap_err();
        assert!(matches!(err, PlannerError::Excel(_)));
    }
}

#[test]
fn csv_export_has_expected_columns() {
    let recs = analyze(&[Holiday::new(d(2025, 1, 14), "Founders Day")]);
    let text = recommendations_to_csv_string(&recs).expect("csv");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Type,Title,Strategy,Days Needed,Efficiency Score,Dates,Related Holiday")
    );

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), recs.len());
    assert_eq!(&rows[0][0], "Long Weekend");
    assert_eq!(&rows[0][1], "Extended Weekend Opportunity");
    assert_eq!(&rows[0][3], "1");
    assert_eq!(&rows[0][4], "4.00");
    assert_eq!(&rows[0][5], "1/11/2025, 1/12/2025, 1/13/2025, 1/14/2025");
    assert_eq!(&rows[0][6], "Founders Day");
}

#[test]
fn csv_export_of_nothing_still_writes_header() {
    let text = recommendations_to_csv_string(&[]).expect("csv");
    assert_eq!(
        text.trim_end(),
        "Type,Title,Strategy,Days Needed,Efficiency Score,Dates,Related Holiday"
    );
}

#[test]
fn save_csv_and_json_to_disk() {
    let recs = analyze(&[
        Holiday::new(d(2025, 1, 6), "Start"),
        Holiday::new(d(2025, 1, 9), "End"),
    ]);

    let csv_file = NamedTempFile::new().expect("temp file");
    save_recommendations_to_csv(&recs, csv_file.path()).expect("save csv");
    let written = std::fs::read_to_string(csv_file.path()).unwrap();
    assert_eq!(written.lines().count(), recs.len() + 1);

    let json_file = NamedTempFile::new().expect("temp file");
    save_recommendations_to_json(&recs, json_file.path()).expect("save json");
    let loaded: Vec<leave_planner::LeaveRecommendation> =
        serde_json::from_reader(std::fs::File::open(json_file.path()).unwrap()).unwrap();
    assert_eq!(loaded, recs);
}

#[test]
fn ics_marks_holidays_confirmed_and_leave_tentative() {
    let holidays = vec![Holiday::new(d(2025, 1, 14), "Founders Day")];
    let recs = analyze(&holidays);
    let events = calendar_events(&holidays, &recs);

    let expected = holidays.len() + recs.iter().map(|r| r.dates.len()).sum::<usize>();
    assert_eq!(events.len(), expected);
    assert_eq!(events[0].status, EventStatus::Confirmed);
    assert!(events[1..].iter().all(|e| e.status == EventStatus::Tentative));

    let ics = generate_ics(&holidays, &recs);
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(ics.ends_with("END:VCALENDAR\r\n"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), expected);
    assert_eq!(ics.matches("TRIGGER:-P1D").count(), expected);
    assert_eq!(ics.matches("STATUS:CONFIRMED").count(), 1);
    assert!(ics.contains("DTSTART;VALUE=DATE:20250114\r\nDTEND;VALUE=DATE:20250115"));
    assert!(ics.contains("SUMMARY:Strategic Leave - Extended Weekend Opportunity"));
}

#[test]
fn ics_escapes_text_values() {
    let holidays = vec![Holiday::new(d(2025, 3, 1), "Saints, Martyrs; Others")];
    let ics = generate_ics(&holidays, &[]);
    assert!(ics.contains("SUMMARY:Saints\\, Martyrs\\; Others"));
}

#[test]
fn config_round_trips_through_json_file() {
    let config = PlannerConfig {
        bridge_max_gap_days: 3,
        ..PlannerConfig::default()
    };
    let file = NamedTempFile::new().expect("temp file");
    config.save_json(file.path()).expect("save config");
    let loaded = PlannerConfig::from_json_file(file.path()).expect("load config");
    assert_eq!(loaded, config);
}

#[test]
fn partial_config_uses_defaults_and_zero_is_rejected() {
    let file = temp_with_suffix(".json", r#"{"cluster_window_days": 14}"#);
    let loaded = PlannerConfig::from_json_file(file.path()).expect("load config");
    assert_eq!(loaded.cluster_window_days, 14);
    assert_eq!(loaded.bridge_max_gap_days, 5);
    assert_eq!(loaded.cluster_max_leave_days, 7);

    let file = temp_with_suffix(".json", r#"{"bridge_max_gap_days": 0}"#);
    let err = PlannerConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidConfig(_)));
}
