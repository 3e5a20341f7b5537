use crate::error::Error;

use super::super::{core::VM, execution::Instruction};

/// ADD - Addition operation
pub fn add(vm: &mut VM, instruction: &Instruction) -> Result<(), Error> {
    let a = vm.read_operand(instruction, 0)?;
    let b = vm.read_operand(instruction, 1)?;
    vm.write_operand(instruction, 2, a.wrapping_add(b))
}

/// MUL - Multiplication operation
pub fn mul(vm: &mut VM, instruction: &Instruction) -> Result<(), Error> {
    let a = vm.read_operand(instruction, 0)?;
    let b = vm.read_operand(instruction, 1)?;
    vm.write_operand(instruction, 2, a.wrapping_mul(b))
}
