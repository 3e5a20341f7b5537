pub(crate) mod orchestrator;
pub(crate) mod packet;
pub(crate) mod rendezvous;

use std::{str::FromStr, time::Instant};

use crate::{error::Error, interfaces::NetworkArgs};
use eyre::eyre;
use tapenet_common::{
    constants::{DEFAULT_IDLE_SENTINEL, DEFAULT_NAT_ADDRESS, DEFAULT_POOL_SIZE},
    program::get_program_from_target,
};
use tapenet_vm::core::memory::Memory;
use tracing::{debug, info};

use orchestrator::{Network, TerminationResult};

/// Loads the target program, boots a pool of instances running it and lets them exchange
/// packets until the rendezvous point re-injects the same payload twice in a row.
///
/// Parameters left unset in `args` fall back to the default pool size (50), rendezvous address
/// (255) and idle sentinel (-1).
pub async fn network(args: NetworkArgs) -> Result<TerminationResult, Error> {
    let start_time = Instant::now();

    let program = get_program_from_target(&args.target)
        .await
        .map_err(|e| eyre!("fetching target program failed: {}", e))?;
    let memory = Memory::from_str(&program)?;
    debug!("loading program took {:?}", start_time.elapsed());

    let pool_size = args.pool_size.unwrap_or(DEFAULT_POOL_SIZE);
    let mut network = Network::new(&memory, pool_size)?
        .with_rendezvous_address(args.nat_address.unwrap_or(DEFAULT_NAT_ADDRESS))
        .with_idle_sentinel(args.idle_sentinel.unwrap_or(DEFAULT_IDLE_SENTINEL));

    let start_run_time = Instant::now();
    let result = network.run()?;
    debug!("network run took {:?}", start_run_time.elapsed());

    info!("ran {} instances for {} ticks successfully", pool_size, result.ticks);
    debug!("network took {:?}", start_time.elapsed());
    Ok(result)
}
