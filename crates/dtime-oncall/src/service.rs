use crate::dispatcher::OnCallDispatcher;
use crate::{MailSource, Notifier, RuleStore};
use anyhow::Result;
use chrono::{DateTime, Utc};
use dtime_common::types::AlarmEvent;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Drives one scheduled dispatch tick: snapshot the rules, poll the
/// mailbox, evaluate every message and forward raised alarms to the
/// notifier.
///
/// Ticks are serialized by the external scheduler; the mutex is a
/// single global guard around the dispatcher's flooding state in case
/// they are not.
pub struct OnCallService {
    mail: Arc<dyn MailSource>,
    rule_store: Arc<dyn RuleStore>,
    notifier: Arc<dyn Notifier>,
    dispatcher: Mutex<OnCallDispatcher>,
}

impl OnCallService {
    pub fn new(
        mail: Arc<dyn MailSource>,
        rule_store: Arc<dyn RuleStore>,
        notifier: Arc<dyn Notifier>,
        dispatcher: OnCallDispatcher,
    ) -> Self {
        Self {
            mail,
            rule_store,
            notifier,
            dispatcher: Mutex::new(dispatcher),
        }
    }

    /// Runs one tick and returns the alarms that were raised.
    ///
    /// Polling or rule-store failures abort the tick; notifier failures
    /// are logged per alarm and do not fail the tick, delivery being
    /// the notifier's responsibility.
    pub async fn run_tick(&self, now: DateTime<Utc>) -> Result<Vec<AlarmEvent>> {
        let rules = self.rule_store.rules().await?;
        let messages = self.mail.poll().await?;

        let mut raised = Vec::new();
        {
            let mut dispatcher = self.dispatcher.lock().await;
            dispatcher.set_rules(rules);
            for message in &messages {
                if let Some(alarm) = dispatcher.evaluate(now, message) {
                    raised.push(alarm);
                }
            }
        }

        for alarm in &raised {
            if let Err(e) = self.notifier.notify(alarm).await {
                tracing::error!(
                    alarm_id = %alarm.id,
                    rule = %alarm.rule_name,
                    error = %e,
                    "Failed to deliver alarm notification"
                );
            }
        }

        tracing::debug!(
            polled = messages.len(),
            raised = raised.len(),
            "Dispatch tick finished"
        );
        Ok(raised)
    }
}
