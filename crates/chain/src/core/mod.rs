pub(crate) mod pipeline;

use std::{str::FromStr, time::Instant};

use crate::{error::Error, interfaces::ChainArgs};
use eyre::eyre;
use tapenet_common::{program::get_program_from_target, utils::strings::parse_integer_list};
use tapenet_vm::core::memory::Memory;
use tracing::{debug, info};

/// Outcome of a chain run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainResult {
    /// The phase settings, in stage order. When searching, the best ordering found.
    pub phases: Vec<i64>,
    /// The signal produced by the last stage.
    pub signal: i64,
}

/// Runs the target program as a chain of stages, one per phase setting. With `search` set,
/// every ordering of the phase settings is tried and the one producing the largest signal is
/// returned.
pub async fn chain(args: ChainArgs) -> Result<ChainResult, Error> {
    let start_time = Instant::now();

    let program = get_program_from_target(&args.target)
        .await
        .map_err(|e| eyre!("fetching target program failed: {}", e))?;
    let memory = Memory::from_str(&program)?;
    let phases =
        parse_integer_list(&args.phases).map_err(|e| Error::InvalidPhases(e.to_string()))?;
    debug!("loading program took {:?}", start_time.elapsed());

    let result = if args.search {
        let (phases, signal) = pipeline::search(&memory, &phases, args.seed, args.feedback)?;
        ChainResult { phases, signal }
    } else {
        let signal = pipeline::run_chain(&memory, &phases, args.seed, args.feedback)?;
        ChainResult { phases, signal }
    };

    info!("ran a chain of {} stages successfully", result.phases.len());
    debug!("chain took {:?}", start_time.elapsed());
    Ok(result)
}
