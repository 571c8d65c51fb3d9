use super::{efficiency, plural_days};
use crate::calendar::WorkCalendar;
use crate::holiday::Holiday;
use crate::recommendation::{LeaveRecommendation, RecommendationType, RELATED_MULTIPLE};

const TITLE: &str = "Bridge Days Opportunity";

/// Connects a holiday with each later holiday that sits a short gap away.
pub struct BridgeRule<'a> {
    calendar: &'a WorkCalendar,
    max_gap_days: i64,
}

impl<'a> BridgeRule<'a> {
    pub fn new(calendar: &'a WorkCalendar, max_gap_days: u32) -> Self {
        Self {
            calendar,
            max_gap_days: i64::from(max_gap_days),
        }
    }

    /// Bridges from `sorted[index]` to every later holiday. `sorted` must be in
    /// chronological order.
    pub fn candidates(&self, sorted: &[Holiday], index: usize) -> Vec<LeaveRecommendation> {
        let Some(first) = sorted.get(index) else {
            return Vec::new();
        };
        let mut out = Vec::new();

        for second in &sorted[index + 1..] {
            let gap = WorkCalendar::days_between(first.date, second.date) - 1;
            if gap > self.max_gap_days {
                break;
            }
            if gap < 1 {
                continue;
            }

            let (Some(gap_start), Some(gap_end)) = (first.date.succ_opt(), second.date.pred_opt())
            else {
                continue;
            };
            let days_needed = self.calendar.count_available_days(gap_start, gap_end);
            if days_needed == 0 {
                continue;
            }

            let total = (gap + 2) as u32;
            out.push(LeaveRecommendation {
                kind: RecommendationType::Bridge,
                title: TITLE.to_string(),
                strategy: format!(
                    "Take {} between {} and {} for a {}-day break",
                    plural_days(days_needed),
                    first.name,
                    second.name,
                    total,
                ),
                dates: WorkCalendar::days_in_range(first.date, second.date),
                related_holiday: RELATED_MULTIPLE.to_string(),
                days_needed,
                efficiency: efficiency(total, days_needed),
            });
        }

        out
    }
}
