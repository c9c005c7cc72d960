//! # Copy Feedback
//!
//! Transient "copied" marker shown next to a verse after a successful
//! clipboard write. At most one marker is active.
//!
//! Every successful copy issues a fresh ticket. The deferred clear carries
//! the ticket it was scheduled with, so a clear that belongs to an older
//! copy finds a different ticket and does nothing.

use std::time::Duration;

/// How long the marker stays up after a copy.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// Identifies one successful copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CopyTicket(u64);

#[derive(Debug, Default)]
pub struct CopyFeedback {
    active: Option<(String, CopyTicket)>,
    next_ticket: u64,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `reference` as the active marker, superseding any previous one.
    /// Returns the ticket the auto-clear must carry.
    pub fn mark(&mut self, reference: &str) -> CopyTicket {
        self.next_ticket += 1;
        let ticket = CopyTicket(self.next_ticket);
        self.active = Some((reference.to_string(), ticket));
        ticket
    }

    /// Clears the marker if `ticket` is still the current one.
    /// Returns whether anything changed.
    pub fn expire(&mut self, ticket: CopyTicket) -> bool {
        match &self.active {
            Some((_, current)) if *current == ticket => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Reference of the verse whose copy most recently succeeded.
    pub fn active(&self) -> Option<&str> {
        self.active.as_ref().map(|(reference, _)| reference.as_str())
    }

    pub fn is_marked(&self, reference: &str) -> bool {
        self.active() == Some(reference)
    }
}
