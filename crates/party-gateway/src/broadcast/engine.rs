//! Broadcast engine
//!
//! Delivers a message to every member of a session. Membership is
//! snapshotted first and deliveries run with no lock held, so a slow or dead
//! recipient never blocks joins, leaves, or other broadcasts. Each
//! recipient's outcome is independent of every other recipient's.

use crate::connection::{ConnectionHandle, ConnectionId, OutboundFrame};
use crate::error::DeliveryError;
use crate::protocol::SyncMessage;
use crate::session::Session;
use futures_util::future::join_all;
use std::time::Duration;

/// Outcome of delivering to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientOutcome {
    pub connection_id: ConnectionId,
    pub outcome: Result<(), DeliveryError>,
}

/// Per-recipient results of one broadcast
#[derive(Debug, Clone, Default)]
pub struct BroadcastReport {
    pub outcomes: Vec<RecipientOutcome>,
}

impl BroadcastReport {
    /// Number of recipients the message was queued for
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_ok()).count()
    }

    /// Recipients whose delivery failed
    pub fn failed(&self) -> impl Iterator<Item = &RecipientOutcome> {
        self.outcomes.iter().filter(|o| o.outcome.is_err())
    }

    /// Number of recipients attempted
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }
}

/// Fans messages out to session members
#[derive(Debug, Clone)]
pub struct Broadcaster {
    delivery_timeout: Duration,
}

impl Broadcaster {
    /// Create a broadcaster that gives up on a recipient after `delivery_timeout`
    #[must_use]
    pub fn new(delivery_timeout: Duration) -> Self {
        Self { delivery_timeout }
    }

    /// Deliver `message` to every member of `session` except `exclude`
    ///
    /// Failed deliveries are logged and reported; the failing member stays in
    /// the session until its own connection ends.
    pub async fn broadcast(
        &self,
        session: &Session,
        message: SyncMessage,
        exclude: Option<ConnectionId>,
    ) -> BroadcastReport {
        let snapshot = session.snapshot();
        let recipients = snapshot
            .members
            .into_iter()
            .filter(|member| Some(member.id()) != exclude)
            .collect();

        self.deliver_all(session, recipients, OutboundFrame::control(message))
            .await
    }

    /// Announce the current participant count to every member of `session`
    pub async fn broadcast_count(&self, session: &Session) -> BroadcastReport {
        let snapshot = session.snapshot();
        let frame = OutboundFrame::count(snapshot.len(), snapshot.version);

        tracing::debug!(
            session_id = %session.id(),
            count = snapshot.len(),
            version = snapshot.version,
            "Broadcasting participant count"
        );

        self.deliver_all(session, snapshot.members, frame).await
    }

    async fn deliver_all(
        &self,
        session: &Session,
        recipients: Vec<ConnectionHandle>,
        frame: OutboundFrame,
    ) -> BroadcastReport {
        let deliveries = recipients.iter().map(|recipient| {
            let frame = frame.clone();
            async move {
                RecipientOutcome {
                    connection_id: recipient.id(),
                    outcome: recipient.deliver(frame, self.delivery_timeout).await,
                }
            }
        });

        let report = BroadcastReport {
            outcomes: join_all(deliveries).await,
        };

        for failure in report.failed() {
            if let Err(e) = failure.outcome {
                tracing::debug!(
                    session_id = %session.id(),
                    connection_id = %failure.connection_id,
                    error = %e,
                    "Delivery failed"
                );
            }
        }

        tracing::trace!(
            session_id = %session.id(),
            attempted = report.attempted(),
            delivered = report.delivered(),
            "Broadcast complete"
        );

        report
    }
}
