use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Runs a program until it halts or needs more input",
    override_usage = "tapenet run <TARGET> [OPTIONS]"
)]
/// Arguments for the run operation
pub struct RunArgs {
    /// The target program, either a file or inline comma separated program text.
    #[clap(required = true)]
    pub target: String,

    /// Comma separated values to queue as input before running.
    #[clap(long, short, default_value = "", hide_default_value = true, allow_hyphen_values = true)]
    pub input: String,

    /// Text to queue as ASCII input, after the numeric input.
    #[clap(long, short)]
    pub ascii: Option<String>,

    /// Memory patch of the form `ADDR=VALUE`, applied before running. May be repeated.
    #[clap(long = "set", short = 's', value_name = "ADDR=VALUE")]
    pub set: Vec<String>,

    /// Render printable output values as text.
    #[clap(long = "ascii-output")]
    pub ascii_output: bool,
}

impl RunArgsBuilder {
    /// Creates a new RunArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            input: Some(String::new()),
            ascii: Some(None),
            set: Some(Vec::new()),
            ascii_output: Some(false),
        }
    }
}
