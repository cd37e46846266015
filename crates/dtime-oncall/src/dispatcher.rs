use crate::flooding::FloodingChecker;
use crate::rule::DispatchRule;
use chrono::{DateTime, Utc};
use dtime_common::types::{AlarmEvent, EmailMessage};

/// Synchronous dispatch core: matches one polled message at a time
/// against the configured rules and applies flooding suppression.
pub struct OnCallDispatcher {
    rules: Vec<DispatchRule>,
    flooding: FloodingChecker,
}

impl OnCallDispatcher {
    pub fn new(rules: Vec<DispatchRule>, flooding: FloodingChecker) -> Self {
        Self { rules, flooding }
    }

    pub fn rules(&self) -> &[DispatchRule] {
        &self.rules
    }

    /// Installs a new rule snapshot. Cooldown state is kept: senders
    /// silenced under the old rules stay silenced under the new ones.
    pub fn set_rules(&mut self, rules: Vec<DispatchRule>) {
        self.rules = rules;
    }

    /// Drops all flooding state, e.g. after an operator reconfigures
    /// the on-call rotation.
    pub fn reset_flooding(&mut self) {
        self.flooding.reset();
    }

    /// Evaluates one polled message. The first matching rule in
    /// priority order wins and raises at most one alarm; a message
    /// matching no rule is ignored.
    pub fn evaluate(&mut self, now: DateTime<Utc>, message: &EmailMessage) -> Option<AlarmEvent> {
        let rule = self.rules.iter().find(|r| r.matches(message))?;

        if self.flooding.is_flooding(now, &message.sender) {
            tracing::debug!(
                rule = %rule.name,
                sender = %message.sender,
                "Alarm suppressed (flooding window)"
            );
            return None;
        }

        let subject_display = message.subject.as_deref().unwrap_or("(no subject)");
        let event = AlarmEvent {
            id: dtime_common::id::next_id(),
            rule_name: rule.name.clone(),
            sender: message.sender.clone(),
            subject: message.subject.clone(),
            message: format!(
                "On-call rule {} matched mail from {}: {}",
                rule.name, message.sender, subject_display
            ),
            received_at: message.received_at,
            triggered_at: now,
        };

        tracing::info!(
            rule = %rule.name,
            sender = %message.sender,
            alarm_id = %event.id,
            "Alarm raised"
        );
        Some(event)
    }
}
