use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Runs copies of a program as a pipeline of stages",
    override_usage = "tapenet chain <TARGET> [OPTIONS]"
)]
/// Arguments for the chain operation
pub struct ChainArgs {
    /// The target program, either a file or inline comma separated program text.
    #[clap(required = true)]
    pub target: String,

    /// Comma separated phase settings, one per stage.
    #[clap(long, short, default_value = "0,1,2,3,4")]
    pub phases: String,

    /// The signal fed into the first stage.
    #[clap(long, short, default_value = "0", allow_hyphen_values = true)]
    pub seed: i64,

    /// Feed the last stage's output back into the first stage until the chain halts.
    #[clap(long, short)]
    pub feedback: bool,

    /// Try every ordering of the phase settings and report the best one.
    #[clap(long)]
    pub search: bool,
}

impl ChainArgsBuilder {
    /// Creates a new ChainArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            phases: Some(String::from("0,1,2,3,4")),
            seed: Some(0),
            feedback: Some(false),
            search: Some(false),
        }
    }
}
