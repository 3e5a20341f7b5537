use std::{collections::VecDeque, str::FromStr};

#[cfg(feature = "step-tracing")]
use std::time::Instant;
#[cfg(feature = "step-tracing")]
use tracing::trace;

use crate::{
    core::{constants::OPCODE_RADIX, opcodes},
    error::Error,
};

use super::super::memory::Memory;

use super::{
    execution::{ExecutionResult, Instruction, Mode, Status},
    handlers,
};

/// The [`VM`] struct represents a single machine instance. \
/// It owns its [`Memory`], registers and input/output queues exclusively. Cloning a [`VM`]
/// deep-copies all of it, so a clone can be run speculatively from a checkpoint without
/// affecting the original.
#[derive(Clone, Debug)]
pub struct VM {
    /// The tape the program runs on. Programs may read and rewrite their own code.
    pub memory: Memory,

    /// The current instruction pointer (program counter).
    pub pc: usize,

    /// Offset added to relative-mode operands.
    pub relative_base: i64,

    /// Values waiting to be consumed by input instructions, oldest first.
    pub input: VecDeque<i64>,

    /// Values emitted by output instructions, oldest first.
    pub output: VecDeque<i64>,

    /// The status reported by the last step.
    pub status: Status,

    /// Number of instructions executed so far.
    pub instructions_executed: u64,

    /// The time when execution started (only available with step-tracing feature).
    #[cfg(feature = "step-tracing")]
    pub start_time: Instant,
}

impl VM {
    /// Creates a new [`VM`] instance running the given memory image from address 0.
    ///
    /// ```
    /// use tapenet_vm::core::{memory::Memory, vm::{Status, VM}};
    ///
    /// let vm = VM::new(Memory::from_values(&[99]));
    /// assert_eq!(vm.pc, 0);
    /// assert_eq!(vm.status, Status::Continue);
    /// ```
    pub fn new(memory: Memory) -> VM {
        VM {
            memory,
            pc: 0,
            relative_base: 0,
            input: VecDeque::new(),
            output: VecDeque::new(),
            status: Status::Continue,
            instructions_executed: 0,
            #[cfg(feature = "step-tracing")]
            start_time: Instant::now(),
        }
    }

    /// Parses a comma separated program and creates a [`VM`] for it.
    pub fn from_program(source: &str) -> Result<VM, Error> {
        Ok(VM::new(Memory::from_str(source)?))
    }

    /// Queues one value for the next input instruction.
    pub fn push_input(&mut self, value: i64) {
        self.input.push_back(value);
    }

    /// Queues several values, in order.
    pub fn extend_input<I: IntoIterator<Item = i64>>(&mut self, values: I) {
        self.input.extend(values);
    }

    /// Whether some queued input has not been consumed yet.
    pub fn has_pending_input(&self) -> bool {
        !self.input.is_empty()
    }

    /// Takes the oldest unread output value.
    pub fn pop_output(&mut self) -> Option<i64> {
        self.output.pop_front()
    }

    /// Takes every unread output value, oldest first.
    pub fn drain_output(&mut self) -> Vec<i64> {
        self.output.drain(..).collect()
    }

    /// Number of output values not taken yet.
    pub fn pending_output(&self) -> usize {
        self.output.len()
    }

    /// Returns the opcode of the instruction at the program counter, without executing it.
    /// Cells that do not hold a known opcode return `None`.
    pub fn peek_opcode(&self) -> Option<u8> {
        let cell = self.memory.read(self.pc);
        if cell < 0 {
            return None;
        }
        let opcode = cell % OPCODE_RADIX;
        opcodes::OpCodeInfo::lookup(opcode).map(|_| opcode as u8)
    }

    /// Resolves operand `index` of `instruction` to an effective address.
    ///
    /// Immediate operands resolve to the address of the operand cell itself, so reading through
    /// it yields the literal.
    pub(crate) fn operand_address(
        &self,
        instruction: &Instruction,
        index: usize,
    ) -> Result<usize, Error> {
        let operand = instruction.operands[index];
        let address = match instruction.modes[index] {
            Mode::Position => operand,
            Mode::Immediate => return Ok(instruction.address + 1 + index),
            Mode::Relative => self.relative_base.checked_add(operand).ok_or(
                Error::AddressOverflow {
                    base: self.relative_base,
                    offset: operand,
                    pc: instruction.address,
                },
            )?,
        };

        usize::try_from(address)
            .map_err(|_| Error::AddressOutOfRange { address, pc: instruction.address })
    }

    /// Reads the effective value of operand `index`.
    pub(crate) fn read_operand(
        &self,
        instruction: &Instruction,
        index: usize,
    ) -> Result<i64, Error> {
        Ok(self.memory.read(self.operand_address(instruction, index)?))
    }

    /// Writes `value` through write operand `index`.
    pub(crate) fn write_operand(
        &mut self,
        instruction: &Instruction,
        index: usize,
        value: i64,
    ) -> Result<(), Error> {
        if instruction.modes[index] == Mode::Immediate {
            return Err(Error::ImmediateWrite { pc: instruction.address });
        }

        let address = self.operand_address(instruction, index)?;
        self.memory.write(address, value);
        Ok(())
    }

    /// Decodes and executes the instruction at the program counter.
    fn _step(&mut self) -> Result<Status, Error> {
        let instruction = match Instruction::decode(&self.memory, self.pc)? {
            Some(instruction) => instruction,
            None => return Ok(Status::UnknownOpcode(self.memory.read(self.pc))),
        };

        // an input instruction with nothing queued is a suspension point, not an error
        if instruction.opcode == opcodes::IN && self.input.is_empty() {
            return Ok(Status::NeedsInput);
        }

        #[cfg(feature = "step-tracing")]
        trace!(
            pc = instruction.address,
            relative_base = self.relative_base,
            instruction = %instruction,
            "executing instruction"
        );

        let mut jump = None;
        match instruction.opcode {
            opcodes::HALT => {
                self.instructions_executed += 1;
                return Ok(handlers::control::halt(self, &instruction));
            }

            opcodes::ADD => handlers::arithmetic::add(self, &instruction)?,
            opcodes::MUL => handlers::arithmetic::mul(self, &instruction)?,

            opcodes::IN => handlers::io::input(self, &instruction)?,
            opcodes::OUT => handlers::io::output(self, &instruction)?,

            opcodes::JNZ => jump = handlers::control::jump_if_true(self, &instruction)?,
            opcodes::JZ => jump = handlers::control::jump_if_false(self, &instruction)?,

            opcodes::LT => handlers::comparison::lt(self, &instruction)?,
            opcodes::EQ => handlers::comparison::eq(self, &instruction)?,

            opcodes::ARB => handlers::control::adjust_relative_base(self, &instruction)?,

            _ => return Ok(Status::UnknownOpcode(self.memory.read(self.pc))),
        }

        self.pc = jump.unwrap_or_else(|| instruction.next_address());
        self.instructions_executed += 1;

        #[cfg(feature = "step-tracing")]
        trace!(
            ops_per_sec =
                (self.instructions_executed as f64 / self.start_time.elapsed().as_secs_f64()),
            mem_size = self.memory.size(),
            "_step.end"
        );

        Ok(Status::Continue)
    }

    /// Executes the next instruction and reports the resulting [`Status`].
    ///
    /// Once the VM reached a terminal status, stepping again returns that status and changes
    /// nothing.
    ///
    /// ```
    /// use tapenet_vm::core::vm::{Status, VM};
    ///
    /// let mut vm = VM::from_program("3,0,99").expect("valid program");
    ///
    /// assert_eq!(vm.step(), Ok(Status::NeedsInput));
    /// assert_eq!(vm.pc, 0);
    ///
    /// vm.push_input(7);
    /// assert_eq!(vm.step(), Ok(Status::Continue));
    /// assert_eq!(vm.memory.read(0), 7);
    /// assert_eq!(vm.step(), Ok(Status::Halted));
    /// ```
    pub fn step(&mut self) -> Result<Status, Error> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        let status = self._step()?;
        self.status = status;
        Ok(status)
    }

    /// Steps until the status is anything other than [`Status::Continue`] and returns it.
    ///
    /// ```
    /// use tapenet_vm::core::vm::{Status, VM};
    ///
    /// let mut vm = VM::from_program("1,0,0,0,99").expect("valid program");
    /// assert_eq!(vm.run_to_halt(), Ok(Status::Halted));
    /// assert_eq!(vm.memory.to_vec(), vec![2, 0, 0, 0, 99]);
    /// ```
    pub fn run_to_halt(&mut self) -> Result<Status, Error> {
        loop {
            let status = self.step()?;
            if status != Status::Continue {
                return Ok(status);
            }
        }
    }

    /// Steps while the opcode of the *next* instruction does not satisfy `stop`.
    ///
    /// When the next instruction matches, it is executed as well if `inclusive` is set, and the
    /// status of that step is returned. Otherwise the VM is left in front of it and
    /// [`Status::Continue`] is returned. Any other status met on the way is returned as soon as
    /// it occurs.
    ///
    /// ```
    /// use tapenet_vm::core::{opcodes, vm::{Status, VM}};
    ///
    /// let mut vm = VM::from_program("104,5,3,9,99").expect("valid program");
    ///
    /// assert_eq!(vm.run_until(|opcode| opcode == opcodes::IN, false), Ok(Status::Continue));
    /// assert_eq!(vm.pc, 2);
    /// assert_eq!(vm.pop_output(), Some(5));
    /// ```
    pub fn run_until<F>(&mut self, mut stop: F, inclusive: bool) -> Result<Status, Error>
    where
        F: FnMut(u8) -> bool,
    {
        loop {
            if self.status.is_terminal() {
                return Ok(self.status);
            }

            if let Some(opcode) = self.peek_opcode() {
                if stop(opcode) {
                    return if inclusive { self.step() } else { Ok(Status::Continue) };
                }
            }

            let status = self.step()?;
            if status != Status::Continue {
                return Ok(status);
            }
        }
    }

    /// Runs until the next instruction is an input instruction, without executing it.
    pub fn run_until_input(&mut self) -> Result<Status, Error> {
        self.run_until(|opcode| opcode == opcodes::IN, false)
    }

    /// Runs up to and including the next output instruction.
    pub fn run_until_output(&mut self) -> Result<Status, Error> {
        self.run_until(|opcode| opcode == opcodes::OUT, true)
    }

    /// Runs until the program halts, faults or starves for input, and collects its output.
    ///
    /// ```
    /// use tapenet_vm::core::vm::{Status, VM};
    ///
    /// let mut vm = VM::from_program("3,9,8,9,10,9,4,9,99,-1,8").expect("valid program");
    /// vm.push_input(8);
    ///
    /// let result = vm.execute().expect("execution failed");
    /// assert_eq!(result.status, Status::Halted);
    /// assert_eq!(result.output, vec![1]);
    /// ```
    pub fn execute(&mut self) -> Result<ExecutionResult, Error> {
        let status = self.run_to_halt()?;

        Ok(ExecutionResult {
            status,
            output: self.drain_output(),
            instructions_executed: self.instructions_executed,
            pc: self.pc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(program: &[i64], input: &[i64]) -> VM {
        let mut vm = VM::new(Memory::from_values(program));
        vm.extend_input(input.iter().copied());
        vm.run_to_halt().expect("vm error");
        vm
    }

    #[test]
    fn test_arithmetic_self_modification() {
        for (program, expected) in [
            (vec![1, 0, 0, 0, 99], vec![2, 0, 0, 0, 99]),
            (vec![2, 3, 0, 3, 99], vec![2, 3, 0, 6, 99]),
            (vec![2, 4, 4, 5, 99, 0], vec![2, 4, 4, 5, 99, 9801]),
            (vec![1, 1, 1, 4, 99, 5, 6, 0, 99], vec![30, 1, 1, 4, 2, 5, 6, 0, 99]),
            (vec![1002, 4, 3, 4, 33], vec![1002, 4, 3, 4, 99]),
            (vec![1101, 100, -1, 4, 0], vec![1101, 100, -1, 4, 99]),
        ] {
            let vm = run(&program, &[]);
            assert_eq!(vm.status, Status::Halted);
            assert_eq!(vm.memory.to_vec(), expected);
        }
    }

    #[test]
    fn test_comparisons() {
        // position mode: input == 8
        let equal_8 = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
        assert_eq!(run(&equal_8, &[8]).drain_output(), vec![1]);
        assert_eq!(run(&equal_8, &[7]).drain_output(), vec![0]);

        // immediate mode: input < 8
        let less_8 = [3, 3, 1107, -1, 8, 3, 4, 3, 99];
        assert_eq!(run(&less_8, &[5]).drain_output(), vec![1]);
        assert_eq!(run(&less_8, &[9]).drain_output(), vec![0]);
    }

    #[test]
    fn test_jumps() {
        let position = [3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9];
        assert_eq!(run(&position, &[0]).drain_output(), vec![0]);
        assert_eq!(run(&position, &[3]).drain_output(), vec![1]);

        let immediate = [3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];
        assert_eq!(run(&immediate, &[0]).drain_output(), vec![0]);
        assert_eq!(run(&immediate, &[-4]).drain_output(), vec![1]);
    }

    #[test]
    fn test_quine() {
        let quine = [109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99];
        assert_eq!(run(&quine, &[]).drain_output(), quine.to_vec());
    }

    #[test]
    fn test_large_values() {
        assert_eq!(run(&[104, 1125899906842624, 99], &[]).drain_output(), vec![1125899906842624]);
        let output = run(&[1102, 34915192, 34915192, 7, 4, 7, 99, 0], &[]).drain_output();
        assert_eq!(output, vec![1219070632396864]);
    }

    #[test]
    fn test_relative_round_trip() {
        for (adjust, offset) in [(10, 5), (100, -50), (-3, 20), (0, 7)] {
            // ARB adjust ; IN [rb+offset] ; OUT [rb+offset] ; HALT
            let mut vm = VM::new(Memory::from_values(&[109, adjust, 203, offset, 204, offset, 99]));
            vm.push_input(4242);
            assert_eq!(vm.run_to_halt(), Ok(Status::Halted));
            assert_eq!(vm.relative_base, adjust);
            assert_eq!(vm.memory.read((adjust + offset) as usize), 4242);
            assert_eq!(vm.drain_output(), vec![4242]);
        }
    }

    #[test]
    fn test_relative_negative_adjustment() {
        // ARB 20 ; ARB -15 ; ADD 1 2 -> [rb+1] ; OUT [6] ; HALT
        let mut vm = VM::new(Memory::from_values(&[109, 20, 109, -15, 21101, 1, 2, 1, 4, 6, 99]));
        assert_eq!(vm.run_to_halt(), Ok(Status::Halted));
        assert_eq!(vm.relative_base, 5);
        assert_eq!(vm.drain_output(), vec![3]);
    }

    #[test]
    fn test_input_suspension_is_idempotent() {
        let mut vm = VM::new(Memory::from_values(&[3, 5, 99, 0, 0, 0]));
        let before = vm.memory.clone();

        for _ in 0..3 {
            assert_eq!(vm.step(), Ok(Status::NeedsInput));
            assert_eq!(vm.pc, 0);
            assert_eq!(vm.memory, before);
        }

        vm.push_input(-17);
        assert_eq!(vm.step(), Ok(Status::Continue));
        assert_eq!(vm.memory.read(5), -17);
        assert_eq!(vm.pc, 2);
        assert!(!vm.has_pending_input());
    }

    #[test]
    fn test_unknown_opcode() {
        let mut vm = VM::new(Memory::from_values(&[255, 0, 0, 0, 99]));
        assert_eq!(vm.step(), Ok(Status::UnknownOpcode(255)));
        assert_eq!(vm.memory.to_vec(), vec![255, 0, 0, 0, 99]);
        assert_eq!(vm.pc, 0);

        // stays terminal
        assert_eq!(vm.step(), Ok(Status::UnknownOpcode(255)));
        assert_eq!(vm.run_to_halt(), Ok(Status::UnknownOpcode(255)));
    }

    #[test]
    fn test_halt_is_sticky() {
        let mut vm = VM::new(Memory::from_values(&[99, 104, 1]));
        assert_eq!(vm.step(), Ok(Status::Halted));
        assert_eq!(vm.step(), Ok(Status::Halted));
        assert_eq!(vm.pc, 0);
        assert_eq!(vm.pending_output(), 0);
    }

    #[test]
    fn test_negative_address_fails_loudly() {
        let mut vm = VM::new(Memory::from_values(&[4, -1, 99]));
        assert_eq!(vm.step(), Err(Error::AddressOutOfRange { address: -1, pc: 0 }));

        let mut vm = VM::new(Memory::from_values(&[109, -5, 204, 1, 99]));
        assert_eq!(vm.run_to_halt(), Err(Error::AddressOutOfRange { address: -4, pc: 2 }));
    }

    #[test]
    fn test_relative_overflow_fails_loudly() {
        // ARB MAX ; ARB MAX
        let mut vm = VM::new(Memory::from_values(&[109, i64::MAX, 109, i64::MAX, 204, 5, 99]));
        assert_eq!(
            vm.run_to_halt(),
            Err(Error::AddressOverflow { base: i64::MAX, offset: i64::MAX, pc: 2 })
        );
        assert_eq!(vm.relative_base, i64::MAX);
        assert_eq!(vm.pending_output(), 0);

        // ARB MAX ; OUT [rb+5]
        let mut vm = VM::new(Memory::from_values(&[109, i64::MAX, 204, 5, 99]));
        assert_eq!(
            vm.run_to_halt(),
            Err(Error::AddressOverflow { base: i64::MAX, offset: 5, pc: 2 })
        );
        assert_eq!(vm.pending_output(), 0);
    }

    #[test]
    fn test_immediate_write_is_rejected() {
        let mut vm = VM::new(Memory::from_values(&[11101, 1, 1, 0, 99]));
        assert_eq!(vm.step(), Err(Error::ImmediateWrite { pc: 0 }));
        assert_eq!(vm.memory.read(0), 11101);
    }

    #[test]
    fn test_negative_jump_fails_loudly() {
        let mut vm = VM::new(Memory::from_values(&[1105, 1, -2]));
        assert_eq!(vm.step(), Err(Error::AddressOutOfRange { address: -2, pc: 0 }));
    }

    #[test]
    fn test_writes_beyond_program_extend_memory() {
        let mut vm = VM::new(Memory::from_values(&[1101, 6, 7, 1000, 4, 1000, 99]));
        assert_eq!(vm.run_to_halt(), Ok(Status::Halted));
        assert_eq!(vm.memory.read(1000), 13);
        assert_eq!(vm.drain_output(), vec![13]);
    }

    #[test]
    fn test_run_until_input_stops_before_input() {
        let mut vm = VM::new(Memory::from_values(&[104, 1, 104, 2, 3, 20, 4, 20, 99]));
        assert_eq!(vm.run_until_input(), Ok(Status::Continue));
        assert_eq!(vm.pc, 4);
        assert_eq!(vm.drain_output(), vec![1, 2]);

        // nothing queued: the inclusive variant reports starvation
        assert_eq!(vm.run_until(|opcode| opcode == opcodes::IN, true), Ok(Status::NeedsInput));

        vm.push_input(9);
        assert_eq!(vm.run_until(|opcode| opcode == opcodes::IN, true), Ok(Status::Continue));
        assert_eq!(vm.pc, 6);
        assert_eq!(vm.run_until_input(), Ok(Status::Halted));
        assert_eq!(vm.drain_output(), vec![9]);
    }

    #[test]
    fn test_run_until_output() {
        let mut vm = VM::new(Memory::from_values(&[104, 1, 104, 2, 99]));
        assert_eq!(vm.run_until_output(), Ok(Status::Continue));
        assert_eq!(vm.pop_output(), Some(1));
        assert_eq!(vm.run_until_output(), Ok(Status::Continue));
        assert_eq!(vm.pop_output(), Some(2));
        assert_eq!(vm.run_until_output(), Ok(Status::Halted));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut vm = VM::new(Memory::from_values(&[3, 10, 4, 10, 99]));
        assert_eq!(vm.run_to_halt(), Ok(Status::NeedsInput));

        let mut branch = vm.clone();
        branch.push_input(1);
        vm.push_input(2);

        assert_eq!(branch.run_to_halt(), Ok(Status::Halted));
        assert_eq!(vm.run_to_halt(), Ok(Status::Halted));
        assert_eq!(branch.drain_output(), vec![1]);
        assert_eq!(vm.drain_output(), vec![2]);
        assert_eq!(branch.memory.read(10), 1);
        assert_eq!(vm.memory.read(10), 2);
    }

    #[test]
    fn test_execute_reports_starvation() {
        let mut vm = VM::from_program("104,3,3,0,99").expect("valid program");
        let result = vm.execute().expect("execution failed");
        assert_eq!(result.status, Status::NeedsInput);
        assert_eq!(result.output, vec![3]);
        assert_eq!(result.pc, 2);
        assert_eq!(result.instructions_executed, 1);
    }
}
