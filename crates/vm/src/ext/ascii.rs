//! Helpers for programs whose input and output are ASCII codes, one character per value.

use crate::core::vm::VM;

/// Output of an ASCII program, split into printable text and everything else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsciiOutput {
    /// The printable characters, in order.
    pub text: String,

    /// Values that are not printable ASCII (usually a final numeric answer), in order.
    pub values: Vec<i64>,
}

/// Whether `value` is a character an ASCII program would print.
fn is_printable(value: i64) -> bool {
    value == i64::from(b'\n') || (32..=126).contains(&value)
}

/// Queues `text` as ASCII codes, making sure it ends with a newline.
///
/// ```
/// use tapenet_vm::{core::vm::VM, ext::ascii::push_ascii};
///
/// let mut vm = VM::from_program("99").expect("valid program");
/// push_ascii(&mut vm, "NOT A J");
/// assert_eq!(vm.input.len(), 8);
/// assert_eq!(vm.input.back(), Some(&10));
/// ```
pub fn push_ascii(vm: &mut VM, text: &str) {
    vm.extend_input(text.bytes().map(i64::from));
    if !text.ends_with('\n') {
        vm.push_input(i64::from(b'\n'));
    }
}

/// Splits raw output values into printable text and other values.
pub fn render_ascii(values: &[i64]) -> AsciiOutput {
    let mut output = AsciiOutput::default();
    for value in values {
        match u8::try_from(*value) {
            Ok(byte) if is_printable(*value) => output.text.push(char::from(byte)),
            _ => output.values.push(*value),
        }
    }
    output
}
