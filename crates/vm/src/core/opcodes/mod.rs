//! VM opcodes and related utilities.
//!
//! This module provides the opcode table of the VM: one constant per opcode, plus static
//! information about each opcode (name, operand counts, control-flow behavior) used by the
//! executor and the disassembler.

/// Information about opcode, such as name, and operand counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpCodeInfo {
    /// Name
    name: &'static str,
    /// Operands whose value is read.
    reads: u8,
    /// Operands resolved to an address that is written.
    writes: u8,
    /// If the opcode stops execution. aka HALT
    terminating: bool,
    /// If the opcode may overwrite the program counter.
    branching: bool,
}

impl OpCodeInfo {
    /// Creates a new opcode info with the given name and default values.
    pub const fn new(name: &'static str) -> Self {
        Self { name, reads: 0, writes: 0, terminating: false, branching: false }
    }

    /// Returns the name of the opcode.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of read operands.
    #[inline]
    pub const fn reads(&self) -> u8 {
        self.reads
    }

    /// Returns the number of write operands.
    #[inline]
    pub const fn writes(&self) -> u8 {
        self.writes
    }

    /// Returns the total number of operands.
    #[inline]
    pub const fn operands(&self) -> u8 {
        self.reads + self.writes
    }

    /// Returns how many cells the instruction occupies, opcode cell included.
    #[inline]
    pub const fn length(&self) -> usize {
        1 + self.operands() as usize
    }

    /// Returns whether the opcode is terminating.
    #[inline]
    pub const fn terminating(&self) -> bool {
        self.terminating
    }

    /// Returns whether the opcode may jump.
    #[inline]
    pub const fn branching(&self) -> bool {
        self.branching
    }

    /// Looks up the info of a raw opcode number, if the opcode exists.
    ///
    /// ```
    /// use tapenet_vm::core::opcodes::{OpCodeInfo, ADD};
    ///
    /// let info = OpCodeInfo::lookup(ADD as i64).expect("ADD is a known opcode");
    /// assert_eq!(info.name(), "ADD");
    /// assert_eq!(info.length(), 4);
    /// assert!(OpCodeInfo::lookup(42).is_none());
    /// ```
    #[inline]
    pub fn lookup(opcode: i64) -> Option<Self> {
        usize::try_from(opcode).ok().and_then(|index| OPCODE_INFO_TABLE.get(index).copied().flatten())
    }
}

/// Sets the number of read and write operands.
#[inline]
pub const fn operands(mut op: OpCodeInfo, reads: u8, writes: u8) -> OpCodeInfo {
    op.reads = reads;
    op.writes = writes;
    op
}

/// Sets the terminating flag to true.
#[inline]
pub const fn terminating(mut op: OpCodeInfo) -> OpCodeInfo {
    op.terminating = true;
    op
}

/// Sets the branching flag to true.
#[inline]
pub const fn branching(mut op: OpCodeInfo) -> OpCodeInfo {
    op.branching = true;
    op
}

macro_rules! opcodes {
    ($($val:literal => $name:ident => $($modifier:ident $(( $($modifier_arg:expr),* ))?),*);* $(;)?) => {
        // create a constant for each opcode
        $(
            #[doc = concat!("The `", stringify!($val), "` (\"", stringify!($name),"\") opcode.")]
            pub const $name: u8 = $val;
        )*

        /// Maps each opcode to its info.
        pub const OPCODE_INFO_TABLE: [Option<OpCodeInfo>; 100] = {
            let mut map = [None; 100];
            let mut prev: u8 = 0;
            $(
                let val: u8 = $val;
                assert!(val > prev, "opcodes must be sorted in ascending order");
                prev = val;
                let info = OpCodeInfo::new(
                    stringify!($name)
                );
                $(
                let info = $modifier(info, $($($modifier_arg),*)?);
                )*
                map[$val] = Some(info);
            )*
            let _ = prev;
            map
        };

        /// Maps each opcode to its name. (So we dont need to load [`OpCodeInfo`] to get the name)
        pub const OPCODE_NAME_TABLE: [&'static str; 100] = {
            let mut map = ["unknown"; 100];
            $(
                map[$val] = stringify!($name);
            )*
            map
        };
    }
}

/// Get the name of an opcode.
#[inline]
pub fn opcode_name(opcode: u8) -> &'static str {
    OPCODE_NAME_TABLE.get(opcode as usize).copied().unwrap_or("unknown")
}

opcodes! {
    1 => ADD => operands(2, 1);
    2 => MUL => operands(2, 1);
    3 => IN => operands(0, 1);
    4 => OUT => operands(1, 0);
    5 => JNZ => operands(2, 0), branching;
    6 => JZ => operands(2, 0), branching;
    7 => LT => operands(2, 1);
    8 => EQ => operands(2, 1);
    9 => ARB => operands(1, 0);

    99 => HALT => terminating;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_lengths() {
        for (opcode, length) in [(ADD, 4), (MUL, 4), (LT, 4), (EQ, 4), (IN, 2), (OUT, 2), (ARB, 2)] {
            assert_eq!(OpCodeInfo::lookup(opcode as i64).map(|info| info.length()), Some(length));
        }
        assert_eq!(OpCodeInfo::lookup(JNZ as i64).map(|info| info.length()), Some(3));
        assert_eq!(OpCodeInfo::lookup(JZ as i64).map(|info| info.length()), Some(3));
        assert_eq!(OpCodeInfo::lookup(HALT as i64).map(|info| info.length()), Some(1));
    }

    #[test]
    fn test_unknown_opcodes() {
        assert!(OpCodeInfo::lookup(0).is_none());
        assert!(OpCodeInfo::lookup(10).is_none());
        assert!(OpCodeInfo::lookup(-1).is_none());
        assert!(OpCodeInfo::lookup(255).is_none());
        assert_eq!(opcode_name(55), "unknown");
    }

    #[test]
    fn test_flags() {
        assert!(OpCodeInfo::lookup(HALT as i64).is_some_and(|info| info.terminating()));
        assert!(OpCodeInfo::lookup(JZ as i64).is_some_and(|info| info.branching()));
        assert!(OpCodeInfo::lookup(ADD as i64).is_some_and(|info| !info.branching()));
    }
}
