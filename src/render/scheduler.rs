//! Serializes page renders against the single shared canvas.
//!
//! At most one render is in flight. Requests that arrive while it runs are
//! coalesced into one pending slot (last write wins), which is dispatched
//! when the in-flight render completes, whether it succeeded or failed.

use tracing::debug;

/// Identifies one dispatched render. Completions are matched by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    pub id: u64,
    pub page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Rendering(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDecision {
    /// The caller must start rendering this ticket now.
    Dispatch(RenderTicket),
    /// A render is busy; the page now waits in the pending slot.
    Coalesced { replaced: Option<usize> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub dispatched: u64,
    pub coalesced: u64,
    pub dropped: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
pub struct RenderScheduler {
    in_flight: Option<RenderTicket>,
    pending: Option<usize>,
    next_ticket_id: u64,
    stats: SchedulerStats,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds are the caller's job; any page number is accepted.
    pub fn request_render(&mut self, page: usize) -> RenderDecision {
        if self.in_flight.is_some() {
            let replaced = self.pending.replace(page);
            self.stats.coalesced = self.stats.coalesced.saturating_add(1);
            if replaced.is_some() {
                self.stats.dropped = self.stats.dropped.saturating_add(1);
            }
            debug!(page, ?replaced, "render coalesced into pending slot");
            return RenderDecision::Coalesced { replaced };
        }

        RenderDecision::Dispatch(self.dispatch(page))
    }

    /// Must be called once per dispatched ticket, on success and on failure.
    ///
    /// Returns the follow-up ticket when a pending page was waiting. A
    /// completion for a ticket that is not in flight changes nothing.
    pub fn on_render_complete(&mut self, ticket: RenderTicket) -> Option<RenderTicket> {
        if self.in_flight != Some(ticket) {
            debug!(ticket = ticket.id, "ignoring completion for unknown ticket");
            return None;
        }
        self.in_flight = None;

        let page = self.pending.take()?;
        Some(self.dispatch(page))
    }

    pub fn record_failure(&mut self) {
        self.stats.failed = self.stats.failed.saturating_add(1);
    }

    pub fn state(&self) -> SchedulerState {
        match self.in_flight {
            Some(ticket) => SchedulerState::Rendering(ticket.page),
            None => SchedulerState::Idle,
        }
    }

    pub fn is_rendering(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RenderTicket> {
        self.in_flight
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    fn dispatch(&mut self, page: usize) -> RenderTicket {
        self.next_ticket_id = self.next_ticket_id.wrapping_add(1);
        let ticket = RenderTicket {
            id: self.next_ticket_id,
            page,
        };
        self.in_flight = Some(ticket);
        self.stats.dispatched = self.stats.dispatched.saturating_add(1);
        debug!(page, ticket = ticket.id, "render dispatched");
        ticket
    }
}
