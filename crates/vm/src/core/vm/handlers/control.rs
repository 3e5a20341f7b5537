use crate::error::Error;

use super::super::{
    core::VM,
    execution::{Instruction, Status},
};

/// HALT - Halts execution
pub fn halt(vm: &mut VM, _instruction: &Instruction) -> Status {
    vm.status = Status::Halted;
    Status::Halted
}

/// Converts a jump operand into a program counter.
fn jump_target(value: i64, instruction: &Instruction) -> Result<usize, Error> {
    usize::try_from(value)
        .map_err(|_| Error::AddressOutOfRange { address: value, pc: instruction.address })
}

/// JNZ - Jump to the second operand if the first is non-zero
pub fn jump_if_true(vm: &mut VM, instruction: &Instruction) -> Result<Option<usize>, Error> {
    let condition = vm.read_operand(instruction, 0)?;
    let target = vm.read_operand(instruction, 1)?;

    if condition != 0 {
        return jump_target(target, instruction).map(Some);
    }
    Ok(None)
}

/// JZ - Jump to the second operand if the first is zero
pub fn jump_if_false(vm: &mut VM, instruction: &Instruction) -> Result<Option<usize>, Error> {
    let condition = vm.read_operand(instruction, 0)?;
    let target = vm.read_operand(instruction, 1)?;

    if condition == 0 {
        return jump_target(target, instruction).map(Some);
    }
    Ok(None)
}

/// ARB - Adjust the relative base
pub fn adjust_relative_base(vm: &mut VM, instruction: &Instruction) -> Result<(), Error> {
    let offset = vm.read_operand(instruction, 0)?;
    vm.relative_base = vm.relative_base.checked_add(offset).ok_or(Error::AddressOverflow {
        base: vm.relative_base,
        offset,
        pc: instruction.address,
    })?;
    Ok(())
}
