use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};
use crate::recommendation::LeaveRecommendation;

pub const HEADERS: [&str; 7] = [
    "Type",
    "Title",
    "Strategy",
    "Days Needed",
    "Efficiency Score",
    "Dates",
    "Related Holiday",
];

#[derive(Debug, Serialize)]
struct RecommendationCsvRecord {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Strategy")]
    strategy: String,
    #[serde(rename = "Days Needed")]
    days_needed: u32,
    #[serde(rename = "Efficiency Score")]
    efficiency: String,
    #[serde(rename = "Dates")]
    dates: String,
    #[serde(rename = "Related Holiday")]
    related_holiday: String,
}

impl From<&LeaveRecommendation> for RecommendationCsvRecord {
    fn from(rec: &LeaveRecommendation) -> Self {
        Self {
            kind: rec.kind.label().to_string(),
            title: rec.title.clone(),
            strategy: rec.strategy.clone(),
            days_needed: rec.days_needed,
            efficiency: format!("{:.2}", rec.efficiency),
            dates: join_dates(&rec.dates),
            related_holiday: rec.related_holiday.clone(),
        }
    }
}

/// `M/D/YYYY`, the short date layout used in exported sheets.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| format_display_date(*d))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn write_recommendations_csv<W: Write>(
    recommendations: &[LeaveRecommendation],
    writer: W,
) -> PlannerResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(HEADERS)?;
    for rec in recommendations {
        writer.serialize(RecommendationCsvRecord::from(rec))?;
    }
    writer.flush()?;
    debug!(rows = recommendations.len(), "wrote recommendation sheet");
    Ok(())
}

pub fn recommendations_to_csv_string(
    recommendations: &[LeaveRecommendation],
) -> PlannerResult<String> {
    let mut buf = Vec::new();
    write_recommendations_csv(recommendations, &mut buf)?;
    String::from_utf8(buf).map_err(|e| PlannerError::InvalidData(e.to_string()))
}

pub fn save_recommendations_to_csv<P: AsRef<Path>>(
    recommendations: &[LeaveRecommendation],
    path: P,
) -> PlannerResult<()> {
    let file = File::create(path)?;
    write_recommendations_csv(recommendations, file)
}

pub fn save_recommendations_to_json<P: AsRef<Path>>(
    recommendations: &[LeaveRecommendation],
    path: P,
) -> PlannerResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, recommendations)?;
    Ok(())
}
