use chrono::NaiveDate;
use tracing::debug;

use super::{efficiency, plural_days};
use crate::calendar::WorkCalendar;
use crate::holiday::Holiday;
use crate::recommendation::{LeaveRecommendation, RecommendationType, RELATED_MULTIPLE};

const TITLE: &str = "Holiday Cluster Found";

/// Groups a holiday with the holidays that follow it closely.
pub struct ClusterRule<'a> {
    calendar: &'a WorkCalendar,
    window_days: i64,
    max_leave_days: u32,
}

impl<'a> ClusterRule<'a> {
    pub fn new(calendar: &'a WorkCalendar, window_days: u32, max_leave_days: u32) -> Self {
        Self {
            calendar,
            window_days: i64::from(window_days),
            max_leave_days,
        }
    }

    /// Cluster anchored at `sorted[index]`, if one is worth recommending.
    pub fn candidate(&self, sorted: &[Holiday], index: usize) -> Option<LeaveRecommendation> {
        let anchor = sorted.get(index)?;
        let ahead: Vec<&Holiday> = sorted[index + 1..]
            .iter()
            .take_while(|h| WorkCalendar::days_between(anchor.date, h.date) <= self.window_days)
            .filter(|h| h.date > anchor.date)
            .collect();
        if ahead.len() < 2 {
            return None;
        }

        let last = ahead.last()?.date;
        let span = (WorkCalendar::days_between(anchor.date, last) + 1) as u32;
        let days_needed = self.calendar.count_available_days(anchor.date, last);
        if days_needed == 0 {
            return None;
        }
        if days_needed > self.max_leave_days {
            debug!(
                anchor = %anchor.date,
                days_needed,
                "cluster suppressed, too many leave days"
            );
            return None;
        }

        let mut dates: Vec<NaiveDate> = Vec::with_capacity(ahead.len() + 1);
        dates.push(anchor.date);
        dates.extend(ahead.iter().map(|h| h.date));
        // holidays sharing a day count once
        dates.dedup();

        let names = std::iter::once(anchor)
            .chain(ahead.iter().copied())
            .map(|h| h.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Some(LeaveRecommendation {
            kind: RecommendationType::Cluster,
            title: TITLE.to_string(),
            strategy: format!(
                "{} holidays fall within {} days ({}). Take {} off to turn them into one {}-day break",
                dates.len(),
                span,
                names,
                plural_days(days_needed),
                span,
            ),
            dates,
            related_holiday: RELATED_MULTIPLE.to_string(),
            days_needed,
            efficiency: efficiency(span, days_needed),
        })
    }
}
