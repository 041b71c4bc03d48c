//! Outbound frames
//!
//! Frames queued for a connection's writer. Participant counts carry the
//! membership version they were computed from so a writer never lets an
//! older count overtake a newer one when two broadcasts race.

use crate::protocol::SyncMessage;

/// A message queued for delivery to one connection
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundFrame {
    pub message: SyncMessage,
    /// Membership version for participant counts, `None` for relayed events
    pub membership_version: Option<u64>,
}

impl OutboundFrame {
    /// Frame for a relayed control event
    #[must_use]
    pub fn control(message: SyncMessage) -> Self {
        Self {
            message,
            membership_version: None,
        }
    }

    /// Frame for a participant count taken at `version`
    #[must_use]
    pub fn count(count: usize, version: u64) -> Self {
        Self {
            message: SyncMessage::user_count(count),
            membership_version: Some(version),
        }
    }
}

/// Per-writer filter that drops stale participant counts
#[derive(Debug, Default)]
pub struct CountFilter {
    last_version: Option<u64>,
}

impl CountFilter {
    /// Returns false if the frame is a count no newer than one already written
    pub fn admit(&mut self, frame: &OutboundFrame) -> bool {
        let Some(version) = frame.membership_version else {
            return true;
        };

        if self.last_version.is_some_and(|last| version <= last) {
            return false;
        }

        self.last_version = Some(version);
        true
    }
}
