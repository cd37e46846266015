use crate::rates::RatePeriod;

/// Errors that can occur while computing an invoice basis.
///
/// Each violated rate-configuration constraint is its own variant, so
/// callers match on the constraint rather than on message strings.
///
/// # Examples
///
/// ```rust
/// use dtime_report::error::ReportError;
///
/// let err = ReportError::OpenEndedRateClash {
///     project_id: "p-42".to_string(),
/// };
/// assert!(err.to_string().contains("p-42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// A project carries an open-ended standard rate and an open-ended
    /// fixed rate at the same time.
    #[error("Report: project {project_id} has open-ended standard and fixed rates at once")]
    OpenEndedRateClash { project_id: String },

    /// A standard-rate period and a fixed-rate period of the same
    /// project intersect.
    #[error("Report: project {project_id} has overlapping rate periods ({standard} vs {fixed})")]
    OverlappingRatePeriods {
        project_id: String,
        standard: RatePeriod,
        fixed: RatePeriod,
    },

    /// A new rate's range intersects an existing period of the same
    /// kind.
    #[error(
        "Report: new rate period {candidate} for project {project_id} overlaps existing {existing}"
    )]
    RateAdmission {
        project_id: String,
        existing: RatePeriod,
        candidate: RatePeriod,
    },

    /// A fixed-rate contribution row is missing its fixed amount.
    #[error("Report: fixed-rate contribution for project {project_id} is missing its amount")]
    MissingFixedAmount { project_id: String },

    /// The requested period falls outside the supported calendar.
    #[error("Report: {0}")]
    Calendar(#[from] dtime_calendar::error::CalendarError),
}

/// Convenience `Result` alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
