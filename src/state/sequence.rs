//! Request-sequence guard for list responses.

/// Identifies one issued list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter. Only the response to the most recently issued
/// ticket may be applied; anything older has been superseded.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding all earlier ones.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}
