/// Errors that can occur within the on-call subsystem.
///
/// Expected runtime conditions (missing subject or body, an unseen
/// sender, a message matching no rule) are boolean outcomes of the
/// matching and flooding checks, never errors.
///
/// # Examples
///
/// ```rust
/// use dtime_oncall::error::OnCallError;
///
/// let err = OnCallError::InvalidRule("empty from address".to_string());
/// assert!(err.to_string().contains("from address"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum OnCallError {
    /// A configured dispatch rule cannot be turned into a usable
    /// matcher.
    #[error("OnCall: invalid dispatch rule: {0}")]
    InvalidRule(String),

    /// Reading the on-call configuration file failed.
    #[error("OnCall: cannot read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The on-call configuration file is not valid TOML.
    #[error("OnCall: invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience `Result` alias for on-call operations.
pub type Result<T> = std::result::Result<T, OnCallError>;
