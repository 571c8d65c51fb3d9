pub mod analysis;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod holiday;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod import;
pub mod recommendation;

pub use analysis::{analyze, analyze_with_config};
pub use calendar::WorkCalendar;
pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use export::{
    generate_ics, recommendations_to_csv_string, save_ics, save_recommendations_to_csv,
    save_recommendations_to_json,
};
pub use holiday::Holiday;
pub use import::load_holidays;
pub use recommendation::{
    LeaveRecommendation, RELATED_MULTIPLE, RecommendationType, filter_by_type,
};
