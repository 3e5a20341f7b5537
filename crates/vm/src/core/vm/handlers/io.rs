use crate::error::Error;

use super::super::{core::VM, execution::Instruction};

/// IN - Pop one queued value into the write operand
///
/// The caller checks that a value is queued; an empty queue is a suspension, not an error.
pub fn input(vm: &mut VM, instruction: &Instruction) -> Result<(), Error> {
    // pop only once the write succeeded
    if let Some(value) = vm.input.front().copied() {
        vm.write_operand(instruction, 0, value)?;
        vm.input.pop_front();
    }
    Ok(())
}

/// OUT - Push the operand's value to the output queue
pub fn output(vm: &mut VM, instruction: &Instruction) -> Result<(), Error> {
    let value = vm.read_operand(instruction, 0)?;
    vm.output.push_back(value);
    Ok(())
}
