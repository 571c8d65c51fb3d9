use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::error::{PlannerError, PlannerResult};

/// Thresholds used by the recommendation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Largest number of calendar days strictly between two holidays that a
    /// bridge may span.
    pub bridge_max_gap_days: u32,
    /// How far past a holiday the cluster rule looks for other holidays.
    pub cluster_window_days: u32,
    /// Clusters needing more leave days than this are not recommended.
    pub cluster_max_leave_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bridge_max_gap_days: 5,
            cluster_window_days: 21,
            cluster_max_leave_days: 7,
        }
    }
}

impl PlannerConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let file = File::open(path)?;
        let config: PlannerConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> PlannerResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if self.bridge_max_gap_days == 0 {
            return Err(PlannerError::InvalidConfig(
                "bridge_max_gap_days must be at least 1".into(),
            ));
        }
        if self.cluster_window_days == 0 {
            return Err(PlannerError::InvalidConfig(
                "cluster_window_days must be at least 1".into(),
            ));
        }
        if self.cluster_max_leave_days == 0 {
            return Err(PlannerError::InvalidConfig(
                "cluster_max_leave_days must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
