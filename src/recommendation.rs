use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used as `related_holiday` when several holidays anchor one opportunity.
pub const RELATED_MULTIPLE: &str = "Multiple";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationType {
    LongWeekend,
    Bridge,
    Cluster,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::LongWeekend => "LongWeekend",
            RecommendationType::Bridge => "Bridge",
            RecommendationType::Cluster => "Cluster",
        }
    }

    /// Human label used by the spreadsheet export and the CLI table.
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationType::LongWeekend => "Long Weekend",
            RecommendationType::Bridge => "Bridge",
            RecommendationType::Cluster => "Cluster",
        }
    }

    pub fn variants() -> &'static [(&'static str, &'static str)] {
        &[
            ("long", "Extend a holiday into the adjacent weekend"),
            ("bridge", "Connect two nearby holidays"),
            ("cluster", "Buy out the work days inside a holiday cluster"),
        ]
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRecommendationTypeError(pub String);

impl fmt::Display for ParseRecommendationTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown recommendation type '{}'", self.0)
    }
}

impl std::error::Error for ParseRecommendationTypeError {}

impl FromStr for RecommendationType {
    type Err = ParseRecommendationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "longweekend" | "long" => Ok(RecommendationType::LongWeekend),
            "bridge" => Ok(RecommendationType::Bridge),
            "cluster" => Ok(RecommendationType::Cluster),
            _ => Err(ParseRecommendationTypeError(s.to_string())),
        }
    }
}

/// One ranked leave opportunity.
///
/// `dates` runs chronologically from the first to the last day of the
/// opportunity and always includes the anchor holiday(s). `efficiency` is the
/// number of days off gained per requested leave day and is always above 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub title: String,
    pub strategy: String,
    pub dates: Vec<NaiveDate>,
    pub related_holiday: String,
    pub days_needed: u32,
    pub efficiency: f64,
}

impl LeaveRecommendation {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// Keep only recommendations of `kind`, preserving rank order. `None` keeps all.
pub fn filter_by_type(
    recommendations: &[LeaveRecommendation],
    kind: Option<RecommendationType>,
) -> Vec<LeaveRecommendation> {
    recommendations
        .iter()
        .filter(|rec| kind.is_none_or(|k| rec.kind == k))
        .cloned()
        .collect()
}
