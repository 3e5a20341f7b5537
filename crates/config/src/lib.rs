//! Configuration management for tapenet
//!
//! This crate provides functionality for managing the tapenet configuration,
//! including loading, saving, updating, and deleting configuration settings.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use clap::Parser;
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use std::{path::PathBuf, str::FromStr};
use tapenet_common::{
    constants::{
        DEFAULT_IDLE_SENTINEL, DEFAULT_NAT_ADDRESS, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_POOL_SIZE,
    },
    utils::io::file::{delete_path, read_file, write_file},
};
use tracing::{debug, error, info};

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "tapenet config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "", allow_hyphen_values = true)]
    value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. Network parameters left
/// unset on the command line are read from here.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// Number of instances booted by the `network` command
    pub pool_size: usize,

    /// Destination address of the rendezvous point
    pub nat_address: i64,

    /// Value delivered to an instance with no pending packets
    pub idle_sentinel: i64,

    /// Directory that output files are written to
    pub output_directory: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            pool_size: DEFAULT_POOL_SIZE,
            nat_address: DEFAULT_NAT_ADDRESS,
            idle_sentinel: DEFAULT_IDLE_SENTINEL,
            output_directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
        }
    }
}

/// Returns `$HOME/.tapenet/config.toml`.
#[allow(deprecated)]
fn config_path() -> Result<String, Error> {
    let mut home: PathBuf = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(".tapenet");
    home.push("config.toml");

    home.to_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, Error> {
    value.parse::<T>().map_err(|_| {
        Error::ParseError(format!("invalid value: \'{value}\' is not a valid value for \'{key}\'."))
    })
}

impl Configuration {
    /// Returns the current configuration, writing the defaults first if no configuration file
    /// exists yet.
    pub fn load() -> Result<Self, Error> {
        let path = config_path()?;

        if !std::path::Path::new(&path).exists() {
            debug!("no configuration found at '{}', writing defaults", path);
            Configuration::default().save()?;
        }

        let contents = read_file(&path)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        write_file(
            &config_path()?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.tapenet/config.toml`.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;
        if !delete_path(&path) {
            return Err(Error::Generic(format!("failed to delete config file '{path}'")));
        }

        Ok(())
    }

    /// Update a single key/value pair in the configuration and write it to disk.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        // update the key in the struct and ensure it's the correct type
        match key {
            "pool_size" => {
                let pool_size: usize = parse_value(key, value)?;
                if pool_size == 0 {
                    return Err(Error::ParseError("pool_size must be at least 1.".to_string()));
                }
                self.pool_size = pool_size;
            }
            "nat_address" => {
                self.nat_address = parse_value(key, value)?;
            }
            "idle_sentinel" => {
                self.idle_sentinel = parse_value(key, value)?;
            }
            "output_directory" => {
                self.output_directory = value.to_string();
            }
            _ => return Err(Error::UnknownKey(key.to_string())),
        }

        self.save()?;

        Ok(())
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            error!("found key but no value to set. Please specify a value to set, use `tapenet config --help` for more information.");
        }
    } else {
        // no key is set, print the config file
        println!("{:#?}", Configuration::load()?);
        info!("use `tapenet config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}
