//! On-call alert dispatch for the dtime back office.
//!
//! A scheduled tick polls the unread messages of the on-call mailbox,
//! matches them against configured [`rule::DispatchRule`]s and raises
//! one alarm per matched message, subject to per-sender flooding
//! suppression. Mail polling, rule persistence and notification
//! delivery live outside this crate, behind the traits below.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod flooding;
pub mod rule;
pub mod service;


use anyhow::Result;
use async_trait::async_trait;
use crate::rule::DispatchRule;
use dtime_common::types::{AlarmEvent, EmailMessage};

/// Source of inbound alert emails, implemented by the surrounding
/// mail-polling infrastructure.
#[async_trait]
pub trait MailSource: Send + Sync {
    /// Returns the messages that arrived since the previous poll, in
    /// arrival order. Finite per poll; restartable next poll.
    async fn poll(&self) -> Result<Vec<EmailMessage>>;
}

/// Source of the configured dispatch rules.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Returns the current rule set in priority order. Read once per
    /// dispatch tick as a read-only snapshot.
    async fn rules(&self) -> Result<Vec<DispatchRule>>;
}

/// Delivers a raised alarm to its recipients (mail, SMS, alarm record).
///
/// Delivery failures are the notifier's responsibility; the dispatch
/// tick logs them and carries on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alarm: &AlarmEvent) -> Result<()>;
}
