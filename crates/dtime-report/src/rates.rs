use crate::error::{ReportError, Result};
use chrono::NaiveDate;
use dtime_calendar::overlap::overlaps;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a billing rate is hourly (standard) or a flat negotiated
/// amount (fixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    Standard,
    Fixed,
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateKind::Standard => write!(f, "standard"),
            RateKind::Fixed => write!(f, "fixed"),
        }
    }
}

/// The validity range of one configured billing rate. Missing
/// endpoints denote open-ended ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePeriod {
    pub kind: RateKind,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RatePeriod {
    pub fn overlaps(&self, other: &RatePeriod) -> bool {
        overlaps(self.from, self.to, other.from, other.to)
    }

    fn open_ended(&self) -> bool {
        self.to.is_none()
    }
}

impl fmt::Display for RatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = |date: Option<NaiveDate>| match date {
            Some(d) => d.to_string(),
            None => "..".to_string(),
        };
        write!(f, "{} {}..{}", self.kind, end(self.from), end(self.to))
    }
}

/// Validates the rate configuration of one project: it may not carry
/// both an open-ended standard rate and an open-ended fixed rate, and
/// no standard period may intersect a fixed period. Violations fail
/// the whole report request; they are never averaged away.
pub fn validate_project_rates(project_id: &str, periods: &[RatePeriod]) -> Result<()> {
    let open_standard = periods
        .iter()
        .any(|p| p.kind == RateKind::Standard && p.open_ended());
    let open_fixed = periods
        .iter()
        .any(|p| p.kind == RateKind::Fixed && p.open_ended());
    if open_standard && open_fixed {
        return Err(ReportError::OpenEndedRateClash {
            project_id: project_id.to_string(),
        });
    }

    for standard in periods.iter().filter(|p| p.kind == RateKind::Standard) {
        for fixed in periods.iter().filter(|p| p.kind == RateKind::Fixed) {
            if standard.overlaps(fixed) {
                return Err(ReportError::OverlappingRatePeriods {
                    project_id: project_id.to_string(),
                    standard: *standard,
                    fixed: *fixed,
                });
            }
        }
    }
    Ok(())
}

/// Admission check for a newly configured rate: its range may not
/// intersect an existing period of the same kind on the project.
pub fn admit_rate(
    project_id: &str,
    existing: &[RatePeriod],
    candidate: &RatePeriod,
) -> Result<()> {
    for period in existing.iter().filter(|p| p.kind == candidate.kind) {
        if period.overlaps(candidate) {
            return Err(ReportError::RateAdmission {
                project_id: project_id.to_string(),
                existing: *period,
                candidate: *candidate,
            });
        }
    }
    Ok(())
}
