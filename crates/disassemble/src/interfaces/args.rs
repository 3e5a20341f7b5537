use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Disassembles a program to assembly",
    override_usage = "tapenet disassemble <TARGET> [OPTIONS]"
)]
/// Arguments for the disassemble operation
pub struct DisassemblerArgs {
    /// The target to disassemble, either a file or inline comma separated program text.
    #[clap(required = true)]
    pub target: String,

    /// Whether to use base-10 for the program counter.
    #[clap(long = "decimal-counter", short = 'd')]
    pub decimal_counter: bool,

    /// Name of the output file.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub name: String,

    /// The output directory to write the output to or 'print' to print to the console
    #[clap(long = "output", short = 'o', default_value = "output", hide_default_value = true)]
    pub output: String,
}

impl DisassemblerArgsBuilder {
    /// Creates a new DisassemblerArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            decimal_counter: Some(false),
            name: Some(String::new()),
            output: Some(String::new()),
        }
    }
}
