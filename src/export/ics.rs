use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::PlannerResult;
use crate::holiday::Holiday;
use crate::recommendation::LeaveRecommendation;

pub const PRODID: &str = "-//Holiday Planner//Strategic Leave Calendar//EN";
const CRLF: &str = "\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Confirmed,
    Tentative,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "CONFIRMED",
            EventStatus::Tentative => "TENTATIVE",
        }
    }
}

/// One all-day calendar event.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub uid: String,
    pub date: NaiveDate,
    pub summary: String,
    pub description: String,
    pub status: EventStatus,
}

impl CalendarEvent {
    fn write_to(&self, out: &mut Vec<String>) {
        // the last representable day has no successor; keep a zero-length event
        let end = self.date.succ_opt().unwrap_or(self.date);
        out.push("BEGIN:VEVENT".into());
        out.push(format!("UID:{}", self.uid));
        out.push(format!("DTSTART;VALUE=DATE:{}", ics_date(self.date)));
        out.push(format!("DTEND;VALUE=DATE:{}", ics_date(end)));
        out.push(format!("SUMMARY:{}", escape_text(&self.summary)));
        out.push(format!("DESCRIPTION:{}", escape_text(&self.description)));
        out.push(format!("STATUS:{}", self.status.as_str()));
        out.push("SEQUENCE:0".into());
        out.push("BEGIN:VALARM".into());
        out.push("TRIGGER:-P1D".into());
        out.push("ACTION:DISPLAY".into());
        out.push(format!("DESCRIPTION:Reminder: {}", escape_text(&self.summary)));
        out.push("END:VALARM".into());
        out.push("END:VEVENT".into());
    }
}

/// Holidays become confirmed events, every recommended date a tentative one.
pub fn calendar_events(
    holidays: &[Holiday],
    recommendations: &[LeaveRecommendation],
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for (idx, holiday) in holidays.iter().enumerate() {
        events.push(CalendarEvent {
            uid: format!("holiday-{}-{}@leave-planner", idx, ics_date(holiday.date)),
            date: holiday.date,
            summary: holiday.name.clone(),
            description: format!("Official holiday: {}", holiday.name),
            status: EventStatus::Confirmed,
        });
    }
    for (idx, rec) in recommendations.iter().enumerate() {
        for date in &rec.dates {
            events.push(CalendarEvent {
                uid: format!("leave-{}-{}@leave-planner", idx, ics_date(*date)),
                date: *date,
                summary: format!("Strategic Leave - {}", rec.title),
                description: rec.strategy.clone(),
                status: EventStatus::Tentative,
            });
        }
    }
    events
}

pub fn generate_ics(holidays: &[Holiday], recommendations: &[LeaveRecommendation]) -> String {
    let events = calendar_events(holidays, recommendations);
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
    ];
    for event in &events {
        event.write_to(&mut lines);
    }
    lines.push("END:VCALENDAR".into());
    debug!(events = events.len(), "generated calendar file");

    let mut body = lines.join(CRLF);
    body.push_str(CRLF);
    body
}

pub fn save_ics<P: AsRef<Path>>(
    path: P,
    holidays: &[Holiday],
    recommendations: &[LeaveRecommendation],
) -> PlannerResult<()> {
    fs::write(path, generate_ics(holidays, recommendations))?;
    Ok(())
}

fn ics_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}
