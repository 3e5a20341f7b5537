use std::{str::FromStr, time::Instant};

use crate::{error::Error, interfaces::RunArgs};
use eyre::eyre;
use tapenet_common::{
    program::get_program_from_target,
    utils::strings::{parse_assignment, parse_integer_list},
};
use tapenet_vm::{
    core::{
        memory::Memory,
        vm::{Status, VM},
    },
    ext::ascii::push_ascii,
};
use tracing::{debug, info, warn};

/// Outcome of a single program run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunResult {
    /// The status the run stopped at. `NeedsInput` means the queued input ran out.
    pub status: Status,
    /// Every value the program emitted, oldest first.
    pub output: Vec<i64>,
    /// Cell 0 after the run.
    pub memory_head: i64,
    /// Number of instructions executed.
    pub instructions_executed: u64,
}

/// Writes each `ADDR=VALUE` patch into `memory`, in order.
fn apply_patches(memory: &mut Memory, patches: &[String]) -> Result<(), Error> {
    for patch in patches {
        let (address, value) = parse_assignment(patch)?;
        debug!(address, value, "patching memory");
        memory.write(address, value);
    }

    Ok(())
}

/// Runs the target program on the queued input until it stops.
///
/// Numeric input from `args.input` is queued first, followed by `args.ascii` as ASCII codes.
pub async fn run(args: RunArgs) -> Result<RunResult, Error> {
    let start_time = Instant::now();

    let program = get_program_from_target(&args.target)
        .await
        .map_err(|e| eyre!("fetching target program failed: {}", e))?;
    let mut memory = Memory::from_str(&program)?;
    apply_patches(&mut memory, &args.set)?;
    debug!("loading program took {:?}", start_time.elapsed());

    let mut vm = VM::new(memory);
    vm.extend_input(parse_integer_list(&args.input)?);
    if let Some(text) = &args.ascii {
        push_ascii(&mut vm, text);
    }

    let start_run_time = Instant::now();
    let result = vm.execute()?;
    debug!("execution took {:?}", start_run_time.elapsed());

    match result.status {
        Status::NeedsInput => warn!("program is waiting for more input at pc {}", result.pc),
        Status::UnknownOpcode(cell) => {
            warn!("program stopped at unknown opcode {} at pc {}", cell, result.pc)
        }
        _ => {}
    }

    info!("executed {} instructions successfully", result.instructions_executed);
    debug!("run took {:?}", start_time.elapsed());
    Ok(RunResult {
        status: result.status,
        output: result.output,
        memory_head: vm.memory.read(0),
        instructions_executed: result.instructions_executed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_patches() {
        let mut memory = Memory::from_values(&[1, 0, 0, 0, 99]);
        apply_patches(&mut memory, &["1=4".to_string(), "2=4".to_string(), "10=-1".to_string()])
            .expect("failed to patch");

        assert_eq!(memory.read(1), 4);
        assert_eq!(memory.read(2), 4);
        assert_eq!(memory.read(10), -1);
    }

    #[test]
    fn test_apply_patches_rejects_garbage() {
        let mut memory = Memory::from_values(&[99]);
        let result = apply_patches(&mut memory, &["one=1".to_string()]);

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(memory.to_vec(), vec![99]);
    }
}
