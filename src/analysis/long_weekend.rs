use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::{describe_weekdays, efficiency, plural_days};
use crate::calendar::WorkCalendar;
use crate::holiday::Holiday;
use crate::recommendation::{LeaveRecommendation, RecommendationType};

const TITLE: &str = "Extended Weekend Opportunity";

/// Extends a weekday holiday into the neighbouring weekend.
pub struct LongWeekendRule<'a> {
    calendar: &'a WorkCalendar,
}

impl<'a> LongWeekendRule<'a> {
    pub fn new(calendar: &'a WorkCalendar) -> Self {
        Self { calendar }
    }

    pub fn candidates(&self, holiday: &Holiday) -> Vec<LeaveRecommendation> {
        let mut out = Vec::new();
        let weekday = holiday.date.weekday();

        // Mon-Thu: rest of the work week, then the following weekend
        if matches!(
            weekday,
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
        ) {
            if let Some(rec) = self.after(holiday) {
                out.push(rec);
            }
        }

        // Tue-Fri: start of the work week, preceded by the weekend before
        if matches!(
            weekday,
            Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri
        ) {
            if let Some(rec) = self.before(holiday) {
                out.push(rec);
            }
        }

        out
    }

    fn after(&self, holiday: &Holiday) -> Option<LeaveRecommendation> {
        let friday = WorkCalendar::week_end(holiday.date)?;
        let sunday = friday.checked_add_days(Days::new(2))?;
        let leave = self
            .calendar
            .available_days_in_range(holiday.date.succ_opt()?, friday);
        Self::build(holiday, &leave, holiday.date, sunday, "after")
    }

    fn before(&self, holiday: &Holiday) -> Option<LeaveRecommendation> {
        let monday = WorkCalendar::week_start(holiday.date)?;
        let saturday = monday.checked_sub_days(Days::new(2))?;
        let leave = self
            .calendar
            .available_days_in_range(monday, holiday.date.pred_opt()?);
        Self::build(holiday, &leave, saturday, holiday.date, "before")
    }

    fn build(
        holiday: &Holiday,
        leave: &[NaiveDate],
        start: NaiveDate,
        end: NaiveDate,
        side: &str,
    ) -> Option<LeaveRecommendation> {
        let days_needed = leave.len() as u32;
        if days_needed == 0 {
            return None;
        }
        let dates = WorkCalendar::days_in_range(start, end);
        let total = dates.len() as u32;
        Some(LeaveRecommendation {
            kind: RecommendationType::LongWeekend,
            title: TITLE.to_string(),
            strategy: format!(
                "Take {} off {} {} to create a {}-day weekend ({} needed)",
                describe_weekdays(leave),
                side,
                holiday.name,
                total,
                plural_days(days_needed),
            ),
            dates,
            related_holiday: holiday.name.clone(),
            days_needed,
            efficiency: efficiency(total, days_needed),
        })
    }
}
