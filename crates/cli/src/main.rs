pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use colored::Colorize;
use error::Error;
use log_args::LogArgs;
use output::{build_output_path, print_with_less};
use tracing::debug;

use clap::{Parser, Subcommand};

use tapenet_common::{
    constants::DEFAULT_OUTPUT_DIRECTORY,
    utils::{io::file::write_file, strings::join_values},
};
use tapenet_config::{config, ConfigArgs, Configuration};
use tapenet_core::{
    tapenet_chain::{chain, ChainArgs},
    tapenet_disassembler::{disassemble, DisassemblerArgs},
    tapenet_network::{network, NetworkArgs},
    tapenet_run::{run, RunArgs},
    tapenet_vm::{core::vm::Status, ext::ascii::render_ascii},
};

#[derive(Debug, Parser)]
#[clap(name = "tapenet", version)]
pub struct Arguments {
    #[clap(subcommand)]
    pub sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "tapenet runs integer tape programs, alone, chained together, or as a packet-switched network."
)]
pub enum Subcommands {
    #[clap(name = "run", about = "Run a program until it halts or needs more input")]
    Run(RunArgs),

    #[clap(name = "network", about = "Run a pool of program instances as a network")]
    Network(NetworkArgs),

    #[clap(name = "chain", about = "Run copies of a program as a pipeline of stages")]
    Chain(ChainArgs),

    #[clap(name = "disassemble", about = "Disassemble a program to assembly")]
    Disassemble(DisassemblerArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Arguments::parse();

    // setup logging
    let _guard = args.logs.init_tracing();

    let configuration = Configuration::load()
        .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;
    match args.sub {
        Subcommands::Run(cmd) => {
            let ascii_output = cmd.ascii_output;
            let result =
                run(cmd).await.map_err(|e| Error::Generic(format!("failed to run program: {}", e)))?;

            let status = match result.status {
                Status::Halted => result.status.to_string().green(),
                _ => result.status.to_string().yellow(),
            };
            println!("{} {}", "status:".bold(), status);
            println!("{} {}", "memory[0]:".bold(), result.memory_head);
            println!("{} {}", "instructions:".bold(), result.instructions_executed);

            if ascii_output {
                let rendered = render_ascii(&result.output);
                print!("{}", rendered.text);
                if !rendered.values.is_empty() {
                    println!("{} {}", "values:".bold(), join_values(&rendered.values));
                }
            } else {
                println!("{} {}", "output:".bold(), join_values(&result.output));
            }
        }

        Subcommands::Network(mut cmd) => {
            // unset network parameters come from the configuration
            cmd.pool_size = cmd.pool_size.or(Some(configuration.pool_size));
            cmd.nat_address = cmd.nat_address.or(Some(configuration.nat_address));
            cmd.idle_sentinel = cmd.idle_sentinel.or(Some(configuration.idle_sentinel));
            debug!(
                "running network with pool_size={:?} nat_address={:?} idle_sentinel={:?}",
                cmd.pool_size, cmd.nat_address, cmd.idle_sentinel
            );

            let result = network(cmd)
                .await
                .map_err(|e| Error::Generic(format!("failed to run network: {}", e)))?;

            if let Some(first_y) = result.first_y {
                println!("{} {}", "first y:".bold(), first_y);
            }
            println!("{} {}", "repeated y:".bold(), result.y.to_string().green());
            println!("{} {}", "ticks:".bold(), result.ticks);
            println!("{} {}", "idle cycles:".bold(), result.idle_cycles);
        }

        Subcommands::Chain(cmd) => {
            let result = chain(cmd)
                .await
                .map_err(|e| Error::Generic(format!("failed to run chain: {}", e)))?;

            println!("{} {}", "phases:".bold(), join_values(&result.phases));
            println!("{} {}", "signal:".bold(), result.signal.to_string().green());
        }

        Subcommands::Disassemble(mut cmd) => {
            // if the user has not specified an output directory, use the configured one
            if cmd.output.is_empty() || cmd.output == DEFAULT_OUTPUT_DIRECTORY {
                cmd.output = configuration.output_directory;
            }

            // if the user has passed an output filename, override the default filename
            let mut filename: String = "disassembled.asm".to_string();
            let given_name = cmd.name.as_str();

            if !given_name.is_empty() {
                filename = format!("{}-{}", given_name, filename);
            }

            let assembly = disassemble(cmd.clone())
                .await
                .map_err(|e| Error::Generic(format!("failed to disassemble program: {}", e)))?;

            if cmd.output == "print" {
                print_with_less(&assembly)
                    .await
                    .map_err(|e| Error::Generic(format!("failed to print assembly: {}", e)))?;
            } else {
                let output_path = build_output_path(&cmd.output, &filename)
                    .map_err(|e| Error::Generic(format!("failed to build output path: {}", e)))?;

                write_file(&output_path, &assembly)
                    .map_err(|e| Error::Generic(format!("failed to write assembly: {}", e)))?;
                println!("{} {}", "wrote:".bold(), output_path);
            }
        }

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to configure: {}", e)))?;
        }
    }

    Ok(())
}
