use std::fmt::Display;

use tracing::debug;

use super::packet::Packet;

/// Phase of the rendezvous point between two pool passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendezvousState {
    /// Traffic is flowing, nothing to check.
    Running,
    /// The pool went idle and the held packet is being compared with the last re-injection.
    CheckRepeat,
    /// The same payload was re-injected twice in a row.
    Terminated,
}

impl Display for RendezvousState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendezvousState::Running => write!(f, "RUNNING"),
            RendezvousState::CheckRepeat => write!(f, "CHECK_REPEAT"),
            RendezvousState::Terminated => write!(f, "TERMINATED"),
        }
    }
}

/// What the orchestrator has to do after a pool pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Keep ticking.
    Continue,
    /// Deliver this packet to instance 0, then keep ticking.
    Reinject(Packet),
    /// Stop, the network converged on this payload.
    Terminate(i64),
}

/// The rendezvous point ("NAT"): holds the latest packet sent to the reserved address and
/// decides, once per pool pass, whether to re-inject it or stop.
///
/// The state machine is independent of any VM, so it can be driven by hand:
///
/// ```
/// use tapenet_network::{Packet, Rendezvous, RendezvousState, Transition};
///
/// let mut nat = Rendezvous::new();
/// nat.receive(Packet::new(255, 3, 9));
///
/// assert_eq!(nat.advance(false), Transition::Continue);
/// assert_eq!(nat.advance(true), Transition::Reinject(Packet::new(255, 3, 9)));
/// assert_eq!(nat.advance(true), Transition::Terminate(9));
/// assert_eq!(nat.state(), RendezvousState::Terminated);
/// ```
#[derive(Clone, Debug)]
pub struct Rendezvous {
    state: RendezvousState,
    last_packet: Option<Packet>,
    last_injected_y: Option<i64>,
    first_y: Option<i64>,
}

impl Default for Rendezvous {
    fn default() -> Self {
        Rendezvous::new()
    }
}

impl Rendezvous {
    /// Creates a rendezvous point that has not received anything yet.
    pub fn new() -> Rendezvous {
        Rendezvous {
            state: RendezvousState::Running,
            last_packet: None,
            last_injected_y: None,
            first_y: None,
        }
    }

    /// Stores `packet` as the one to re-inject, replacing any earlier packet.
    pub fn receive(&mut self, packet: Packet) {
        if self.first_y.is_none() {
            self.first_y = Some(packet.y);
        }
        self.last_packet = Some(packet);
    }

    /// The single transition function, called once after every full pool pass.
    ///
    /// Without idleness nothing happens. On idleness the held packet is compared with the last
    /// re-injected one: an identical `y` terminates, anything else is re-injected. An idle
    /// network with no held packet keeps running. Once terminated, the terminal result is
    /// returned again without further changes.
    pub fn advance(&mut self, idle: bool) -> Transition {
        if self.state == RendezvousState::Terminated {
            return self.last_injected_y.map_or(Transition::Continue, Transition::Terminate);
        }

        if !idle {
            self.state = RendezvousState::Running;
            return Transition::Continue;
        }

        self.state = RendezvousState::CheckRepeat;
        let packet = match self.last_packet {
            Some(packet) => packet,
            None => {
                debug!("network is idle but the rendezvous point holds no packet");
                self.state = RendezvousState::Running;
                return Transition::Continue;
            }
        };

        if self.last_injected_y == Some(packet.y) {
            self.state = RendezvousState::Terminated;
            return Transition::Terminate(packet.y);
        }

        self.last_injected_y = Some(packet.y);
        self.state = RendezvousState::Running;
        Transition::Reinject(packet)
    }

    /// The current phase.
    pub fn state(&self) -> RendezvousState {
        self.state
    }

    /// The packet that would be re-injected next.
    pub fn last_packet(&self) -> Option<Packet> {
        self.last_packet
    }

    /// `y` of the very first packet received.
    pub fn first_y(&self) -> Option<i64> {
        self.first_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_without_packet_keeps_running() {
        let mut nat = Rendezvous::new();

        assert_eq!(nat.advance(true), Transition::Continue);
        assert_eq!(nat.state(), RendezvousState::Running);
        assert_eq!(nat.first_y(), None);
    }

    #[test]
    fn test_changed_payload_is_reinjected() {
        let mut nat = Rendezvous::new();

        nat.receive(Packet::new(255, 1, 10));
        assert_eq!(nat.advance(true), Transition::Reinject(Packet::new(255, 1, 10)));

        nat.receive(Packet::new(255, 1, 11));
        assert_eq!(nat.advance(true), Transition::Reinject(Packet::new(255, 1, 11)));

        // same y, different x
        nat.receive(Packet::new(255, 2, 11));
        assert_eq!(nat.advance(true), Transition::Terminate(11));
        assert_eq!(nat.first_y(), Some(10));
    }

    #[test]
    fn test_busy_pass_does_not_check() {
        let mut nat = Rendezvous::new();
        nat.receive(Packet::new(255, 0, 5));

        assert_eq!(nat.advance(true), Transition::Reinject(Packet::new(255, 0, 5)));
        assert_eq!(nat.advance(false), Transition::Continue);
        assert_eq!(nat.advance(false), Transition::Continue);
        assert_eq!(nat.state(), RendezvousState::Running);
        assert_eq!(nat.advance(true), Transition::Terminate(5));
    }

    #[test]
    fn test_terminated_is_sticky() {
        let mut nat = Rendezvous::new();
        nat.receive(Packet::new(255, 0, 5));
        nat.advance(true);
        nat.advance(true);

        nat.receive(Packet::new(255, 0, 6));
        assert_eq!(nat.advance(false), Transition::Terminate(5));
        assert_eq!(nat.advance(true), Transition::Terminate(5));
        assert_eq!(nat.state().to_string(), "TERMINATED");
    }
}
