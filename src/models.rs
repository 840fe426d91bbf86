use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// Chart period granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Daily,
    Weekly,
    Monthly,
}

impl PeriodKind {
    /// Path segment the provider uses for this period (`/chart/day/...`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            PeriodKind::Daily => "day",
            PeriodKind::Weekly => "week",
            PeriodKind::Monthly => "month",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKind::Daily => write!(f, "daily"),
            PeriodKind::Weekly => write!(f, "weekly"),
            PeriodKind::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for PeriodKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(PeriodKind::Daily),
            "weekly" | "week" => Ok(PeriodKind::Weekly),
            "monthly" | "month" => Ok(PeriodKind::Monthly),
            other => Err(ChartError::InvalidPeriod(other.to_string())),
        }
    }
}

/// Date bounds of a chart request, in the provider's wire format.
///
/// Daily and weekly windows use `YYYYMMDD`; monthly windows use `YYYYMM`
/// with `start == end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: String,
    pub end: String,
}

/// A single ranked chart row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub rank: String,
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Entries of one chart together with the window that was queried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartResult {
    pub entries: Vec<ChartEntry>,
    pub window: DateWindow,
}
