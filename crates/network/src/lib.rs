//! The network module runs a pool of VM instances as a closed message-passing network.
//!
//! Every instance receives its own address as its first input value, then exchanges
//! three-value packets with the others. A rendezvous point watches for global idleness and
//! restarts traffic, and the run ends once it re-injects the same payload twice in a row.

/// Error types for the network module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{
    network,
    orchestrator::{Network, TerminationResult},
    packet::{Packet, PacketFramer},
    rendezvous::{Rendezvous, RendezvousState, Transition},
};
pub use error::Error;
pub use interfaces::{NetworkArgs, NetworkArgsBuilder};
