//! Reporting period selecting the window for trend and distribution queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Time window the mood trend and activity distribution are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportingPeriod {
    #[default]
    Week,
    Month,
    Year,
}

impl ReportingPeriod {
    pub const ALL: [ReportingPeriod; 3] = [
        ReportingPeriod::Week,
        ReportingPeriod::Month,
        ReportingPeriod::Year,
    ];

    /// Wire value used in the `period` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportingPeriod::Week => "week",
            ReportingPeriod::Month => "month",
            ReportingPeriod::Year => "year",
        }
    }

    /// Human label shown next to the period selector.
    pub fn label(&self) -> &'static str {
        match self {
            ReportingPeriod::Week => "This Week",
            ReportingPeriod::Month => "This Month",
            ReportingPeriod::Year => "This Year",
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportingPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ReportingPeriod::Week),
            "month" => Ok(ReportingPeriod::Month),
            "year" => Ok(ReportingPeriod::Year),
            other => Err(ValidationError::invalid_format(
                "period",
                format!("expected week, month or year, got '{}'", other),
            )),
        }
    }
}
