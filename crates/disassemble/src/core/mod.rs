use std::{str::FromStr, time::Instant};

use crate::{error::Error, interfaces::DisassemblerArgs};
use eyre::eyre;
use tapenet_common::program::get_program_from_target;
use tapenet_vm::core::{memory::Memory, vm::Instruction};
use tracing::{debug, info};

/// Renders one listing line body for the instruction at `address`, and how many cells it
/// covers.
fn render(memory: &Memory, address: usize, size: usize) -> (String, usize) {
    let cell = memory.read(address);
    let instruction = match Instruction::decode(memory, address) {
        Ok(Some(instruction)) => instruction,
        // unknown opcodes and invalid mode digits are data
        Ok(None) | Err(_) => return (format!("DATA {cell}"), 1),
    };

    if instruction.next_address() <= size {
        return (instruction.to_string(), instruction.length());
    }

    // the image ends inside the operands
    let mut text = instruction.info.name().to_string();
    for (index, (mode, operand)) in instruction.modes.iter().zip(&instruction.operands).enumerate()
    {
        if address + 1 + index < size {
            text.push(' ');
            text.push_str(&mode.render(*operand));
        } else {
            text.push_str(" ?");
        }
    }
    (text, size - address)
}

/// Disassembles a memory image into one line per instruction, starting at address 0.
///
/// ```
/// use tapenet_disassembler::disassemble_memory;
/// use tapenet_vm::core::memory::Memory;
///
/// let memory = Memory::from_values(&[1002, 4, 3, 4, 33]);
/// assert_eq!(disassemble_memory(&memory, true), "0 MUL [4] 3 [4]\n4 DATA 33\n");
/// ```
pub fn disassemble_memory(memory: &Memory, decimal_counter: bool) -> String {
    let size = memory.size();
    let mut asm = String::new();
    let mut address = 0;

    while address < size {
        let (text, length) = render(memory, address, size);
        asm.push_str(&format!(
            "{} {}\n",
            if decimal_counter { address.to_string() } else { format!("{address:06x}") },
            text
        ));
        address += length;
    }

    asm
}

/// Disassembles a program into readable assembly instructions
///
/// Each line holds the address of the instruction, its mnemonic and its operands, rendered as
/// `[n]` (position), `n` (immediate) or `[rb+n]` (relative). Cells that do not decode to an
/// instruction are listed as `DATA`.
///
/// # Arguments
///
/// * `args` - Arguments specifying the target and disassembly options
///
/// # Returns
///
/// A string containing the disassembled program in assembly format
pub async fn disassemble(args: DisassemblerArgs) -> Result<String, Error> {
    let start_time = Instant::now();

    let start_fetch_time = Instant::now();
    let program = get_program_from_target(&args.target)
        .await
        .map_err(|e| eyre!("fetching target program failed: {}", e))?;
    let memory = Memory::from_str(&program)?;
    debug!("fetching target program took {:?}", start_fetch_time.elapsed());

    let start_disassemble_time = Instant::now();
    let asm = disassemble_memory(&memory, args.decimal_counter);
    debug!("disassembly took {:?}", start_disassemble_time.elapsed());

    info!("disassembled {} cells successfully", memory.size());
    debug!("disassembly took {:?}", start_time.elapsed());
    Ok(asm)
}
