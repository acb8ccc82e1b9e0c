//! Per-endpoint request sequencing
//!
//! Every refresh takes a ticket before it awaits the network. A response is
//! applied only while its ticket is still the newest one issued for that
//! endpoint, so a slow earlier request can never overwrite fresher data.

use std::cell::Cell;

/// Endpoints whose responses replace container content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Balance,
    Analysis,
    Chart,
    Orders,
    History,
}

impl Endpoint {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        match self {
            Endpoint::Balance => 0,
            Endpoint::Analysis => 1,
            Endpoint::Chart => 2,
            Endpoint::Orders => 3,
            Endpoint::History => 4,
        }
    }
}

/// Proof of issue order for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub endpoint: Endpoint,
    pub seq: u64,
}

/// Latest issued sequence number per endpoint
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: [Cell<u64>; Endpoint::COUNT],
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every previous one for `endpoint`
    pub fn issue(&self, endpoint: Endpoint) -> Ticket {
        let slot = &self.latest[endpoint.index()];
        let seq = slot.get() + 1;
        slot.set(seq);
        Ticket { endpoint, seq }
    }

    /// Whether no newer request has been issued since `ticket`
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest[ticket.endpoint.index()].get() == ticket.seq
    }
}
