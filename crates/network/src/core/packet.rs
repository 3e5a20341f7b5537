use std::{collections::VecDeque, fmt::Display};

/// A message reconstructed from three consecutive output values of one instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Packet {
    /// The address of the receiving instance, or the rendezvous address.
    pub destination: i64,
    /// First payload value.
    pub x: i64,
    /// Second payload value.
    pub y: i64,
}

impl Packet {
    /// Creates a new [`Packet`].
    pub fn new(destination: i64, x: i64, y: i64) -> Packet {
        Packet { destination, x, y }
    }

    /// The two values delivered to the receiver's input queue. The destination is routing
    /// metadata and is never delivered.
    pub fn payload(&self) -> [i64; 2] {
        [self.x, self.y]
    }
}

impl Display for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Packet to={} x={} y={}", self.destination, self.x, self.y)
    }
}

/// Reassembles packets from an instance's raw output stream.
///
/// Values are buffered across calls, so a packet whose three values are emitted over more than
/// one tick is still framed correctly. Idle sentinels are discarded wherever a packet could
/// start.
#[derive(Clone, Debug)]
pub struct PacketFramer {
    sentinel: i64,
    pending: VecDeque<i64>,
}

impl PacketFramer {
    /// Creates an empty framer that discards `sentinel` between packets.
    pub fn new(sentinel: i64) -> PacketFramer {
        PacketFramer { sentinel, pending: VecDeque::new() }
    }

    /// Buffers `values` and returns every packet that is now complete, in production order.
    ///
    /// ```
    /// use tapenet_network::{Packet, PacketFramer};
    ///
    /// let mut framer = PacketFramer::new(-1);
    /// let packets = framer.push(&[-1, -1, 3, 10, 20, -1]);
    ///
    /// assert_eq!(packets, vec![Packet::new(3, 10, 20)]);
    /// assert_eq!(framer.pending(), 0);
    /// ```
    pub fn push(&mut self, values: &[i64]) -> Vec<Packet> {
        self.pending.extend(values.iter().copied());

        let mut packets = Vec::new();
        loop {
            while self.pending.front() == Some(&self.sentinel) {
                self.pending.pop_front();
            }

            if self.pending.len() < 3 {
                break;
            }

            if let (Some(destination), Some(x), Some(y)) =
                (self.pending.pop_front(), self.pending.pop_front(), self.pending.pop_front())
            {
                packets.push(Packet::new(destination, x, y));
            }
        }

        packets
    }

    /// Number of buffered values belonging to an incomplete packet.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_packets_are_retained() {
        let mut framer = PacketFramer::new(-1);

        assert!(framer.push(&[4, 1]).is_empty());
        assert_eq!(framer.pending(), 2);

        assert_eq!(framer.push(&[2, 5]), vec![Packet::new(4, 1, 2)]);
        assert_eq!(framer.pending(), 1);

        assert_eq!(framer.push(&[6, 7]), vec![Packet::new(5, 6, 7)]);
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn test_sentinels_are_stripped_between_packets() {
        let mut framer = PacketFramer::new(-1);
        let packets = framer.push(&[1, 2, 3, -1, -1, 4, 5, 6]);

        assert_eq!(packets, vec![Packet::new(1, 2, 3), Packet::new(4, 5, 6)]);
    }

    #[test]
    fn test_sentinel_inside_payload_is_kept() {
        let mut framer = PacketFramer::new(-1);
        let packets = framer.push(&[-1, 2, -1, -1]);

        assert_eq!(packets, vec![Packet::new(2, -1, -1)]);
    }

    #[test]
    fn test_custom_sentinel() {
        let mut framer = PacketFramer::new(0);
        let packets = framer.push(&[0, 0, -1, 8, 9]);

        assert_eq!(packets, vec![Packet::new(-1, 8, 9)]);
    }

    #[test]
    fn test_payload_skips_destination() {
        assert_eq!(Packet::new(255, 7, 42).payload(), [7, 42]);
        assert_eq!(Packet::new(255, 7, 42).to_string(), "Packet to=255 x=7 y=42");
    }
}
