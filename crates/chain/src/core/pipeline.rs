use itertools::Itertools;
use tapenet_vm::core::{
    memory::Memory,
    vm::{Status, VM},
};
use tracing::{debug, trace};

use crate::error::Error;

/// Runs stage `index` until it emits one value.
///
/// `Ok(None)` means the stage halted first, which ends a feedback loop. Every other way of not
/// producing a value is an error.
fn next_signal(vm: &mut VM, index: usize) -> Result<Option<i64>, Error> {
    let status = vm
        .run_until_output()
        .map_err(|e| Error::StageFaulted { stage: index, reason: e.to_string() })?;

    if let Some(signal) = vm.pop_output() {
        return Ok(Some(signal));
    }

    match status {
        Status::Halted => Ok(None),
        Status::NeedsInput => Err(Error::Starved { stage: index }),
        status => Err(Error::StageFaulted { stage: index, reason: status.to_string() }),
    }
}

/// Passes `seed` through one stage per phase setting and returns the last stage's output.
///
/// In feedback mode the last stage's output is fed back into the first stage, round after
/// round, until a stage halts. The result is then the last value the last stage emitted.
///
/// ```
/// use std::str::FromStr;
/// use tapenet_chain::run_chain;
/// use tapenet_vm::core::memory::Memory;
///
/// // each stage computes 10 * input + phase
/// let memory = Memory::from_str("3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0")
///     .expect("valid program");
///
/// assert_eq!(run_chain(&memory, &[4, 3, 2, 1, 0], 0, false).expect("chain failed"), 43210);
/// ```
pub fn run_chain(memory: &Memory, phases: &[i64], seed: i64, feedback: bool) -> Result<i64, Error> {
    if phases.is_empty() {
        return Err(Error::InvalidPhases("at least one phase setting is required".to_string()));
    }

    let mut stages: Vec<VM> = phases
        .iter()
        .map(|phase| {
            let mut vm = VM::new(memory.clone());
            vm.push_input(*phase);
            vm
        })
        .collect();

    let mut signal = seed;
    let mut last_output = None;
    let mut round = 0usize;

    loop {
        for (index, vm) in stages.iter_mut().enumerate() {
            vm.push_input(signal);

            match next_signal(vm, index)? {
                Some(value) => {
                    trace!(round, stage = index, signal = value, "stage emitted signal");
                    signal = value;
                }
                None if feedback && round > 0 => {
                    debug!(round, stage = index, "feedback loop halted");
                    return last_output.ok_or(Error::NoSignal { stage: phases.len() - 1 });
                }
                None => return Err(Error::NoSignal { stage: index }),
            }
        }

        last_output = Some(signal);
        if !feedback {
            return Ok(signal);
        }
        round += 1;
    }
}

/// Tries every ordering of `phases` with a seed of 0 and returns the one producing the largest
/// signal, along with that signal.
pub fn best_phases(
    memory: &Memory,
    phases: &[i64],
    feedback: bool,
) -> Result<(Vec<i64>, i64), Error> {
    search(memory, phases, 0, feedback)
}

pub(crate) fn search(
    memory: &Memory,
    phases: &[i64],
    seed: i64,
    feedback: bool,
) -> Result<(Vec<i64>, i64), Error> {
    if phases.is_empty() {
        return Err(Error::InvalidPhases("at least one phase setting is required".to_string()));
    }

    let mut best: Option<(Vec<i64>, i64)> = None;
    for ordering in phases.iter().copied().permutations(phases.len()) {
        let signal = run_chain(memory, &ordering, seed, feedback)?;
        trace!(?ordering, signal, "tried phase ordering");

        if best.as_ref().is_none_or(|(_, best_signal)| signal > *best_signal) {
            best = Some((ordering, signal));
        }
    }

    best.ok_or_else(|| Error::InvalidPhases("no phase ordering produced a signal".to_string()))
}
