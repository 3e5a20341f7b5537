use crate::error::Error;

use super::super::{core::VM, execution::Instruction};

/// LT - Less-than comparison
pub fn lt(vm: &mut VM, instruction: &Instruction) -> Result<(), Error> {
    let a = vm.read_operand(instruction, 0)?;
    let b = vm.read_operand(instruction, 1)?;
    vm.write_operand(instruction, 2, i64::from(a < b))
}

/// EQ - Equality comparison
pub fn eq(vm: &mut VM, instruction: &Instruction) -> Result<(), Error> {
    let a = vm.read_operand(instruction, 0)?;
    let b = vm.read_operand(instruction, 1)?;
    vm.write_operand(instruction, 2, i64::from(a == b))
}
