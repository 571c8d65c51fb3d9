pub mod ics;
pub mod spreadsheet;

pub use ics::{CalendarEvent, EventStatus, calendar_events, generate_ics, save_ics};
pub use spreadsheet::{
    format_display_date, recommendations_to_csv_string, save_recommendations_to_csv,
    save_recommendations_to_json, write_recommendations_csv,
};
