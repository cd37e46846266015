/// Errors that can occur within the calendar module.
///
/// # Examples
///
/// ```rust
/// use dtime_calendar::error::CalendarError;
///
/// let err = CalendarError::UnsupportedYear { year: 1500 };
/// assert!(err.to_string().contains("1500"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The Gauss computus century table has no entries outside
    /// 1583-2599; years beyond it fail rather than clamp.
    #[error("Calendar: year {year} is outside the supported range 1583-2599")]
    UnsupportedYear { year: i32 },
}

/// Convenience `Result` alias for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;
