use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One inbound alert email, as handed over by the mailbox poller.
/// Immutable once polled; subject and body may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub sender: String,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub received_at: DateTime<Utc>,
}

/// An alarm raised by the on-call dispatcher for a matched email.
///
/// Exactly one event is produced per message that matches a rule and
/// passes flooding suppression. The surrounding system persists the
/// event and fans it out to the configured recipients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmEvent {
    pub id: String,
    /// Name of the dispatch rule that matched.
    pub rule_name: String,
    pub sender: String,
    pub subject: Option<String>,
    pub message: String,
    /// When the triggering email arrived.
    pub received_at: DateTime<Utc>,
    /// When the dispatcher raised the alarm.
    pub triggered_at: DateTime<Utc>,
}

/// One flat row of invoice-basis input: the hours a user reported on a
/// project within the requested period, together with the billing rates
/// in force for that stretch.
///
/// Rows arrive already fetched; the aggregation performs no querying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub company_id: String,
    pub project_id: String,
    pub user_id: String,
    pub hours: Decimal,
    /// Hourly rate invoiced to the customer, if one is configured.
    pub customer_rate: Option<Decimal>,
    /// Hourly rate owed to a subcontractor, if one is configured.
    pub subcontractor_rate: Option<Decimal>,
    /// Flat negotiated amount for fixed-rate work; required when
    /// `is_fixed_rate` is set.
    pub fixed_amount: Option<Decimal>,
    pub is_fixed_rate: bool,
}
