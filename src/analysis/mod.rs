//! Recommendation engine: turns a holiday list into ranked leave opportunities.
//!
//! The engine is a pure function. It sorts its input, runs the long-weekend,
//! bridge and cluster rules once per holiday, then ranks the pooled candidates
//! by efficiency and drops candidates whose date sequence was already seen.

use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use tracing::debug;

use crate::calendar::WorkCalendar;
use crate::config::PlannerConfig;
use crate::holiday::{Holiday, sorted_by_date};
use crate::recommendation::LeaveRecommendation;

pub mod bridge;
pub mod cluster;
pub mod long_weekend;

pub use bridge::BridgeRule;
pub use cluster::ClusterRule;
pub use long_weekend::LongWeekendRule;

/// Analyze holidays with the default thresholds.
pub fn analyze(holidays: &[Holiday]) -> Vec<LeaveRecommendation> {
    analyze_with_config(holidays, &PlannerConfig::default())
}

pub fn analyze_with_config(
    holidays: &[Holiday],
    config: &PlannerConfig,
) -> Vec<LeaveRecommendation> {
    let sorted = sorted_by_date(holidays);
    let calendar = WorkCalendar::from_holidays(&sorted);

    let long_weekend = LongWeekendRule::new(&calendar);
    let bridge = BridgeRule::new(&calendar, config.bridge_max_gap_days);
    let cluster = ClusterRule::new(
        &calendar,
        config.cluster_window_days,
        config.cluster_max_leave_days,
    );

    let mut candidates = Vec::new();
    let (mut long_count, mut bridge_count, mut cluster_count) = (0usize, 0usize, 0usize);
    for (index, holiday) in sorted.iter().enumerate() {
        let found = long_weekend.candidates(holiday);
        long_count += found.len();
        candidates.extend(found);

        let found = bridge.candidates(&sorted, index);
        bridge_count += found.len();
        candidates.extend(found);

        if let Some(found) = cluster.candidate(&sorted, index) {
            cluster_count += 1;
            candidates.push(found);
        }
    }
    debug!(
        holidays = sorted.len(),
        long_weekend = long_count,
        bridge = bridge_count,
        cluster = cluster_count,
        "generated leave candidates"
    );

    let ranked = rank(candidates);
    debug!(recommendations = ranked.len(), "ranked leave recommendations");
    ranked
}

/// Stable sort by efficiency (highest first), then keep the first entry for
/// each distinct date sequence. Zero-cost candidates are dropped.
pub fn rank(mut candidates: Vec<LeaveRecommendation>) -> Vec<LeaveRecommendation> {
    candidates.retain(|rec| rec.days_needed > 0);
    candidates.sort_by(|a, b| b.efficiency.total_cmp(&a.efficiency));

    let mut seen: HashSet<Vec<NaiveDate>> = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|rec| seen.insert(rec.dates.clone()))
        .collect()
}

pub(crate) fn efficiency(total_days: u32, days_needed: u32) -> f64 {
    f64::from(total_days) / f64::from(days_needed)
}

pub(crate) fn plural_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

/// "Friday", "Thursday and Friday", "Tuesday, Wednesday and Thursday"
pub(crate) fn describe_weekdays(dates: &[NaiveDate]) -> String {
    let names: Vec<&str> = dates.iter().map(|d| weekday_name(d.weekday())).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match weekday {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}
