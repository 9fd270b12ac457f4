//! Request sequencing.
//!
//! Lookups are not serialized: a user can fire a second query before the
//! first answers. Every dispatched request gets a [`Ticket`] with a
//! monotonically increasing sequence number; issuing a new ticket cancels the
//! previous one, and only the latest ticket may render.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared cancellation flag for one request.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub seq: u64,
    pub token: CancelToken,
}

#[derive(Debug, Default)]
pub struct Sequencer {
    latest: u64,
    in_flight: Option<CancelToken>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket, cancelling whichever request was in flight.
    pub fn issue(&mut self) -> Ticket {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.latest += 1;
        let token = CancelToken::new();
        self.in_flight = Some(token.clone());
        Ticket {
            seq: self.latest,
            token,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.seq == self.latest && !ticket.token.is_cancelled()
    }

    /// Retires `ticket`. Returns whether its response may be rendered.
    pub fn finish(&mut self, ticket: &Ticket) -> bool {
        let current = self.is_current(ticket);
        if current {
            self.in_flight = None;
        }
        current
    }

    /// Latest issued sequence number (0 before the first request).
    pub fn latest(&self) -> u64 {
        self.latest
    }
}
