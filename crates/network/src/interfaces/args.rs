use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Runs a pool of instances of a program as a packet-switched network",
    override_usage = "tapenet network <TARGET> [OPTIONS]"
)]
/// Arguments for the network operation
///
/// Unset values fall back to the configuration when run from the CLI, and to the built-in
/// defaults otherwise.
pub struct NetworkArgs {
    /// The target program, either a file or inline comma separated program text.
    #[clap(required = true)]
    pub target: String,

    /// Number of instances in the pool.
    #[clap(long, short)]
    pub pool_size: Option<usize>,

    /// Destination address of the rendezvous point.
    #[clap(long, allow_hyphen_values = true)]
    pub nat_address: Option<i64>,

    /// Value delivered to instances that have no pending packets.
    #[clap(long, allow_hyphen_values = true)]
    pub idle_sentinel: Option<i64>,
}

impl NetworkArgsBuilder {
    /// Creates a new NetworkArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            pool_size: Some(None),
            nat_address: Some(None),
            idle_sentinel: Some(None),
        }
    }
}
